//! Error type shared by the action framework and its store adapters.

use std::fmt;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
	/// Action type tag not present in the registry
	UnknownActionType(String),
	/// Canonical payload is missing required fields (field names attached)
	ValidationFailed(Vec<String>),
	/// Transition is not permitted from the current state
	InvalidStateTransition { from: String, transition: &'static str },
	/// Appointment confirmation without a required datetime or platform
	IncompleteSelection(String),
	/// Board Action Store create/update failed
	StoreFailure(String),
	/// Stale write detected by optimistic concurrency
	Conflict,
	NotFound,
	Parse(String),
	ConfigError(String),
	Internal(String),
}

impl Error {
	/// Errors the UI shows inline next to the offending fields.
	pub fn is_user_facing(&self) -> bool {
		matches!(self, Error::ValidationFailed(_) | Error::IncompleteSelection(_))
	}

	/// Message suitable for end users.
	///
	/// Field errors are spelled out, everything else collapses into a generic retry hint.
	pub fn user_message(&self) -> String {
		match self {
			Error::ValidationFailed(fields) => fields
				.iter()
				.map(|field| format!("{} is required", field))
				.collect::<Vec<_>>()
				.join(", "),
			Error::IncompleteSelection(msg) => msg.clone(),
			_ => "The action could not be completed, please retry.".to_string(),
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::UnknownActionType(typ) => write!(f, "Unknown action type: {}", typ),
			Error::ValidationFailed(fields) => {
				write!(f, "Validation failed, missing fields: {}", fields.join(", "))
			}
			Error::InvalidStateTransition { from, transition } => {
				write!(f, "Invalid state transition: {} is not allowed from {}", transition, from)
			}
			Error::IncompleteSelection(msg) => write!(f, "Selection incomplete: {}", msg),
			Error::StoreFailure(msg) => write!(f, "Store failure: {}", msg),
			Error::Conflict => write!(f, "Conflict: action was modified concurrently"),
			Error::NotFound => write!(f, "Not found"),
			Error::Parse(msg) => write!(f, "Parse error: {}", msg),
			Error::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "Internal error: {}", msg),
		}
	}
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Parse(err.to_string())
	}
}

impl From<chrono::ParseError> for Error {
	fn from(err: chrono::ParseError) -> Self {
		Error::Parse(err.to_string())
	}
}


// vim: ts=4
