//! Utility functions

use rand::RngExt;

pub const ID_LENGTH: usize = 24;
pub const SAFE: [char; 62] = [
	'0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
	'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
	'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
	'V', 'W', 'X', 'Y', 'Z',
];

/// Random opaque identifier for new records
pub fn random_id() -> String {
	let mut rng = rand::rng();
	let mut result = String::with_capacity(ID_LENGTH);

	for _ in 0..ID_LENGTH {
		result.push(SAFE[rng.random_range(0..SAFE.len())]);
	}
	result
}

/// Interpret loosely typed form values as a boolean flag.
///
/// Accepts JSON booleans, `0`/`1` numbers and the usual string spellings.
pub fn truthy(value: &serde_json::Value) -> Option<bool> {
	match value {
		serde_json::Value::Bool(b) => Some(*b),
		serde_json::Value::Number(n) => n.as_f64().map(|n| n != 0.0),
		serde_json::Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
			"true" | "yes" | "on" | "1" | "completed" => Some(true),
			"false" | "no" | "off" | "0" | "" => Some(false),
			_ => None,
		},
		_ => None,
	}
}


// vim: ts=4
