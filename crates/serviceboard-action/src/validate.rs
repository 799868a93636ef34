//! Validation pipeline: structural completeness of canonical payloads.
//!
//! Works on raw JSON rather than typed payloads so that it can judge anything a
//! store hands back, including documents that would not even deserialize.
//! Nothing in here panics or returns an error for bad input.

use serde_json::Value;

use crate::prelude::*;
use crate::registry::{self, FieldCheck};

fn check(value: Option<&Value>, check: FieldCheck) -> bool {
	let Some(value) = value else {
		return false;
	};
	match check {
		FieldCheck::NonEmptyString => value.as_str().is_some_and(|s| !s.trim().is_empty()),
		FieldCheck::Number => value.as_f64().is_some_and(f64::is_finite),
		FieldCheck::PositiveNumber => value.as_f64().is_some_and(|n| n.is_finite() && n > 0.0),
		FieldCheck::Bool => value.is_boolean(),
		FieldCheck::Array => value.is_array(),
		FieldCheck::NonEmptyArray => value.as_array().is_some_and(|a| !a.is_empty()),
		FieldCheck::OneOf(allowed) => value.as_str().is_some_and(|s| allowed.contains(&s)),
		FieldCheck::ChecklistItems => value.as_array().is_some_and(|items| {
			!items.is_empty()
				&& items.iter().all(|item| {
					item.get("text").and_then(Value::as_str).is_some_and(|s| !s.trim().is_empty())
				})
		}),
	}
}

fn push_unique(missing: &mut Vec<String>, field: &str) {
	if !missing.iter().any(|m| m == field) {
		missing.push(field.to_string());
	}
}

/// Cross-field rules of appointment scheduling on top of the base fields
fn appointment_missing(payload: &Value, missing: &mut Vec<String>) {
	let status = payload.get("confirmation_status").and_then(Value::as_str);
	let mode = payload.get("appointment_mode").and_then(Value::as_str);
	let typ = payload.get("appointment_type").and_then(Value::as_str);

	match status {
		Some("confirmed") => {
			if !check(payload.get("datetime_confirmed"), FieldCheck::NonEmptyString) {
				push_unique(missing, "datetime_confirmed");
			}
			if typ == Some("online")
				&& !check(payload.get("platform_confirmed"), FieldCheck::NonEmptyString)
			{
				push_unique(missing, "platform_confirmed");
			}
		}
		Some("pending_customer") => match mode {
			Some("multiple_choice") => {
				if !check(payload.get("datetimes_options"), FieldCheck::Array) {
					push_unique(missing, "datetimes_options");
				}
			}
			Some("fixed_confirmed" | "fixed_pending_confirmation") => {
				if !check(payload.get("datetime_confirmed"), FieldCheck::NonEmptyString) {
					push_unique(missing, "datetime_confirmed");
				}
			}
			_ => {}
		},
		_ => {}
	}
}

/// Names of the fields that keep `payload` from being valid for `kind`.
///
/// Order follows the registry definition, with conditional appointment fields last.
pub fn missing_fields(kind: ActionKind, payload: &Value) -> Vec<String> {
	let def = registry::definition(kind);
	let mut missing = Vec::new();

	for field in def.fields {
		if !check(payload.get(field.name), field.check) {
			push_unique(&mut missing, field.name);
		}
	}

	match kind {
		ActionKind::AppointmentScheduling => appointment_missing(payload, &mut missing),
		ActionKind::PaymentRequest
		| ActionKind::GenericMessage
		| ActionKind::InformationRequest
		| ActionKind::FeedbackRequest
		| ActionKind::MilestoneUpdate
		| ActionKind::ResourceLink
		| ActionKind::SignatureRequest
		| ActionKind::ApprovalRequest
		| ActionKind::Checklist
		| ActionKind::VideoMessage
		| ActionKind::OptInRequest
		| ActionKind::DocumentDownload => {}
	}

	missing
}

/// Whether `payload` is complete enough to persist and display
pub fn validate(kind: ActionKind, payload: &Value) -> bool {
	missing_fields(kind, payload).is_empty()
}

/// Like [`validate`] but for a type tag that still has to be resolved
pub fn validate_tagged(action_type: &str, payload: &Value) -> ClResult<bool> {
	let kind: ActionKind = action_type.parse()?;
	Ok(validate(kind, payload))
}

/// Fail with `Error::ValidationFailed` carrying the missing fields
pub fn ensure_valid(kind: ActionKind, payload: &Value) -> ClResult<()> {
	let missing = missing_fields(kind, payload);
	if missing.is_empty() {
		Ok(())
	} else {
		debug!(kind = %kind, ?missing, "payload failed validation");
		Err(Error::ValidationFailed(missing))
	}
}


// vim: ts=4
