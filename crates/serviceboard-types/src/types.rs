//! Common types used throughout the service board.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

impl From<chrono::DateTime<chrono::Utc>> for Timestamp {
	fn from(dt: chrono::DateTime<chrono::Utc>) -> Self {
		Timestamp(dt.timestamp())
	}
}

pub fn now() -> Timestamp {
	let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
	Timestamp(res.as_secs().cast_signed())
}

// Patch //
//*******//
/// Three-state field update: leave untouched, clear, or set.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Patch<T> {
	#[default]
	Undefined,
	Null,
	Value(T),
}

impl<T> Patch<T> {
	/// Apply the patch to an optional field in place
	pub fn apply_to(self, target: &mut Option<T>) {
		match self {
			Patch::Undefined => {}
			Patch::Null => *target = None,
			Patch::Value(v) => *target = Some(v),
		}
	}

	/// Apply the patch to a required field; `Null` leaves it untouched
	pub fn apply_required(self, target: &mut T) {
		if let Patch::Value(v) = self {
			*target = v;
		}
	}
}

impl<T> From<Option<T>> for Patch<T> {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(v) => Patch::Value(v),
			None => Patch::Null,
		}
	}
}


// vim: ts=4
