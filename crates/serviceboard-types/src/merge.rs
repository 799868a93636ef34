//! JSON document merge used for partial `action_details` updates.
//!
//! Merge semantics:
//! - top-level keys of the patch overwrite the target's keys
//! - nested objects are replaced, not merged
//! - dot-notation keys (`"responses.name"`) reach into nested objects
//! - `null` removes the key

use serde_json::{Map, Value};

use crate::prelude::*;

/// Merge `patch` into `target` in place.
///
/// A non-object patch or target is replaced wholesale. Fails if a dot-notation
/// key traverses through a field that is not an object.
pub fn shallow_merge(target: &mut Value, patch: &Value) -> ClResult<()> {
	let Value::Object(patch_obj) = patch else {
		*target = patch.clone();
		return Ok(());
	};
	let Some(target_obj) = target.as_object_mut() else {
		*target = patch.clone();
		return Ok(());
	};

	for (key, value) in patch_obj {
		if key.contains('.') {
			set_dotted(target_obj, key, value)?;
		} else if value.is_null() {
			target_obj.remove(key);
		} else {
			target_obj.insert(key.clone(), value.clone());
		}
	}
	Ok(())
}

fn set_dotted(target: &mut Map<String, Value>, dotted: &str, value: &Value) -> ClResult<()> {
	let mut parts = dotted.split('.').collect::<Vec<_>>();
	let Some(last) = parts.pop() else {
		return Ok(());
	};

	let mut current = target;
	for part in parts {
		let entry = current.entry(part.to_string()).or_insert_with(|| Value::Object(Map::new()));
		current = entry.as_object_mut().ok_or_else(|| {
			Error::ValidationFailed(vec![format!("{} ({} is not an object)", dotted, part)])
		})?;
	}

	if value.is_null() {
		current.remove(last);
	} else {
		current.insert(last.to_string(), value.clone());
	}
	Ok(())
}

/// Smallest top-level patch that turns `prev` into `next` under [`shallow_merge`].
///
/// Keys whose value changed are carried over, keys that disappeared (or became
/// `null`) are sent as `null`.
pub fn diff_patch(prev: &Value, next: &Value) -> Value {
	let (Some(prev_obj), Some(next_obj)) = (prev.as_object(), next.as_object()) else {
		return next.clone();
	};

	let mut patch = Map::new();
	for (key, value) in next_obj {
		if prev_obj.get(key) != Some(value) {
			patch.insert(key.clone(), value.clone());
		}
	}
	for key in prev_obj.keys() {
		if !next_obj.contains_key(key) {
			patch.insert(key.clone(), Value::Null);
		}
	}
	Value::Object(patch)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_merge_keeps_untouched_fields() {
		let mut doc = json!({"payment_status": "pending", "amount": 10});
		shallow_merge(&mut doc, &json!({"payment_status": "completed"})).unwrap();
		assert_eq!(doc, json!({"payment_status": "completed", "amount": 10}));
	}

	#[test]
	fn test_merge_null_removes() {
		let mut doc = json!({"platform_confirmed": "zoom", "appointment_title": "Intro"});
		shallow_merge(&mut doc, &json!({"platform_confirmed": null})).unwrap();
		assert_eq!(doc, json!({"appointment_title": "Intro"}));
	}

	#[test]
	fn test_merge_replaces_nested_objects() {
		let mut doc = json!({"responses": {"name": "Ann", "phone": "123"}});
		shallow_merge(&mut doc, &json!({"responses": {"name": "Bob"}})).unwrap();
		assert_eq!(doc, json!({"responses": {"name": "Bob"}}));
	}

	#[test]
	fn test_merge_dotted_key() {
		let mut doc = json!({"responses": {"name": "Ann", "phone": "123"}});
		shallow_merge(&mut doc, &json!({"responses.name": "Bob"})).unwrap();
		assert_eq!(doc, json!({"responses": {"name": "Bob", "phone": "123"}}));
	}

	#[test]
	fn test_merge_dotted_through_scalar_fails() {
		let mut doc = json!({"amount": 5});
		assert!(shallow_merge(&mut doc, &json!({"amount.cents": 1})).is_err());
	}

	#[test]
	fn test_diff_then_merge_reaches_target() {
		let prev = json!({"a": 1, "b": "x", "c": [1, 2], "gone": true});
		let next = json!({"a": 1, "b": "y", "c": [], "d": null});
		let patch = diff_patch(&prev, &next);
		assert_eq!(patch, json!({"b": "y", "c": [], "d": null, "gone": null}));

		let mut doc = prev.clone();
		shallow_merge(&mut doc, &patch).unwrap();
		assert_eq!(doc, json!({"a": 1, "b": "y", "c": []}));
	}
}

// vim: ts=4
