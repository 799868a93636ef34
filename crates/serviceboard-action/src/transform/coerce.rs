//! Tolerant accessors over untrusted form input.
//!
//! Every accessor treats `null`, missing keys and unusable values the same way:
//! as absent. Callers pick the default.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use serviceboard_types::utils::truthy;

/// Lowercase, trim, and turn `-` and spaces into `_`
pub(crate) fn normalize_token(s: &str) -> String {
	s.trim()
		.chars()
		.map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
		.collect()
}

/// Read-only view over one (already synonym-normalized) input object
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
	map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
	pub fn new(map: &'a Map<String, Value>) -> Self {
		Self { map }
	}

	pub fn get(&self, key: &str) -> Option<&'a Value> {
		self.map.get(key).filter(|v| !v.is_null())
	}

	/// Trimmed non-empty string; numbers and booleans are stringified
	pub fn string(&self, key: &str) -> Option<String> {
		value_to_string(self.get(key)?)
	}

	pub fn string_or(&self, key: &str, default: &str) -> String {
		self.string(key).unwrap_or_else(|| default.to_string())
	}

	/// Finite number, parsed from strings when needed
	pub fn number(&self, key: &str) -> Option<f64> {
		value_to_number(self.get(key)?)
	}

	pub fn bool(&self, key: &str) -> Option<bool> {
		truthy(self.get(key)?)
	}

	/// List of non-empty strings, deduplicated in order.
	///
	/// Accepts an array, or a single comma-separated string.
	pub fn string_list(&self, key: &str) -> Vec<String> {
		let mut list = Vec::new();
		let mut push = |s: String| {
			if !list.contains(&s) {
				list.push(s);
			}
		};
		match self.get(key) {
			Some(Value::Array(items)) => {
				for item in items {
					if let Some(s) = list_item_to_string(item) {
						push(s);
					}
				}
			}
			Some(Value::String(s)) => {
				for part in s.split(',') {
					let part = part.trim();
					if !part.is_empty() {
						push(part.to_string());
					}
				}
			}
			_ => {}
		}
		list
	}

	pub fn array(&self, key: &str) -> &'a [Value] {
		self.get(key).and_then(Value::as_array).map_or(&[][..], Vec::as_slice)
	}

	pub fn object(&self, key: &str) -> Option<&'a Map<String, Value>> {
		self.get(key).and_then(Value::as_object)
	}

	/// Enum value after token normalization and value-synonym mapping.
	///
	/// Unknown spellings come back as `None`, never as an error.
	pub fn enum_of<T: DeserializeOwned>(
		&self,
		key: &str,
		value_synonyms: &[(&str, &str)],
	) -> Option<T> {
		let token = normalize_token(self.get(key)?.as_str()?);
		let canonical = value_synonyms
			.iter()
			.find(|(alias, _)| *alias == token)
			.map_or(token.as_str(), |(_, canonical)| *canonical);
		serde_json::from_value(Value::String(canonical.to_string())).ok()
	}
}

pub(crate) fn value_to_string(value: &Value) -> Option<String> {
	let s = match value {
		Value::String(s) => s.trim().to_string(),
		Value::Number(n) => n.to_string(),
		Value::Bool(b) => b.to_string(),
		_ => return None,
	};
	if s.is_empty() { None } else { Some(s) }
}

pub(crate) fn value_to_number(value: &Value) -> Option<f64> {
	let n = match value {
		Value::Number(n) => n.as_f64()?,
		Value::String(s) => s.trim().parse::<f64>().ok()?,
		_ => return None,
	};
	if n.is_finite() { Some(n) } else { None }
}

/// Array entries may be plain values or objects labelled by `label`, `name` or `text`
fn list_item_to_string(item: &Value) -> Option<String> {
	match item {
		Value::Object(obj) => ["label", "name", "text", "value"]
			.iter()
			.find_map(|key| obj.get(*key).and_then(value_to_string)),
		other => value_to_string(other),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn with<T>(value: Value, f: impl FnOnce(Fields<'_>) -> T) -> T {
		let map = value.as_object().cloned().unwrap_or_default();
		f(Fields::new(&map))
	}

	#[test]
	fn test_number_coercion() {
		with(json!({"a": "49.90", "b": 12, "c": "abc", "d": "NaN", "e": null}), |f| {
			assert_eq!(f.number("a"), Some(49.9));
			assert_eq!(f.number("b"), Some(12.0));
			assert_eq!(f.number("c"), None);
			assert_eq!(f.number("d"), None);
			assert_eq!(f.number("e"), None);
		});
	}

	#[test]
	fn test_string_list_forms() {
		let raw = json!({
			"a": ["paypal", " card ", "", "paypal"],
			"b": "zoom, teams",
			"c": [{"label": "Phone"}]
		});
		with(raw, |f| {
			assert_eq!(f.string_list("a"), vec!["paypal", "card"]);
			assert_eq!(f.string_list("b"), vec!["zoom", "teams"]);
			assert_eq!(f.string_list("c"), vec!["Phone"]);
			assert!(f.string_list("missing").is_empty());
		});
	}

	#[test]
	fn test_enum_of_with_synonyms() {
		use crate::details::AppointmentMode;
		let synonyms = [("fixed_date", "fixed_confirmed")];
		with(json!({"mode": "Fixed-Date", "other": "multiple_choice", "bad": "sometimes"}), |f| {
			assert_eq!(
				f.enum_of::<AppointmentMode>("mode", &synonyms),
				Some(AppointmentMode::FixedConfirmed)
			);
			assert_eq!(
				f.enum_of::<AppointmentMode>("other", &synonyms),
				Some(AppointmentMode::MultipleChoice)
			);
			assert_eq!(f.enum_of::<AppointmentMode>("bad", &synonyms), None);
		});
	}

	#[test]
	fn test_string_trims_and_skips_empty() {
		with(json!({"a": "  hi ", "b": "   ", "c": 3}), |f| {
			assert_eq!(f.string("a").as_deref(), Some("hi"));
			assert_eq!(f.string("b"), None);
			assert_eq!(f.string("c").as_deref(), Some("3"));
		});
	}
}

// vim: ts=4
