//! Transform pipeline: untrusted form input to canonical payload.
//!
//! Three layers, applied in order:
//! 1. storage envelope unwrapping (`{"set": {...}}`)
//! 2. historical field-name mapping ([`synonyms`])
//! 3. per-kind construction of the typed payload with defaults and coercions
//!
//! Transforms never fail on messy input; they fall back to defaults and leave
//! it to validation to say what is still missing. Applying a transform to its
//! own output changes nothing.

mod appointment;
mod coerce;
mod generic;
pub mod synonyms;

use serde_json::{Map, Value};

use crate::details::*;
use crate::prelude::*;
use crate::settings::TransformCtx;
use coerce::Fields;

/// Maximum envelope nesting that is unwrapped
const MAX_ENVELOPE_DEPTH: usize = 8;

/// Strip storage-adapter envelopes: any object carrying an object under `set`
/// stands for that inner object. Non-objects become an empty object.
pub fn unwrap_envelope(raw: &Value) -> Map<String, Value> {
	let mut current = raw;
	for _ in 0..MAX_ENVELOPE_DEPTH {
		match current.get("set") {
			Some(inner @ Value::Object(_)) => current = inner,
			_ => break,
		}
	}
	current.as_object().cloned().unwrap_or_default()
}

/// Map raw input into the canonical payload of `kind`
pub fn transform(kind: ActionKind, raw: &Value, ctx: &TransformCtx<'_>) -> ActionDetails {
	let input = synonyms::normalize_fields(kind, &unwrap_envelope(raw));
	let f = Fields::new(&input);

	match kind {
		ActionKind::PaymentRequest => ActionDetails::PaymentRequest(generic::payment(f, ctx)),
		ActionKind::GenericMessage => ActionDetails::GenericMessage(generic::message(f, ctx)),
		ActionKind::AppointmentScheduling => {
			ActionDetails::AppointmentScheduling(appointment::appointment(f, ctx))
		}
		ActionKind::InformationRequest => {
			ActionDetails::InformationRequest(generic::information(f, ctx))
		}
		ActionKind::FeedbackRequest => ActionDetails::FeedbackRequest(generic::feedback(f, ctx)),
		ActionKind::MilestoneUpdate => ActionDetails::MilestoneUpdate(generic::milestone(f, ctx)),
		ActionKind::ResourceLink => ActionDetails::ResourceLink(generic::resource(f, ctx)),
		ActionKind::SignatureRequest => {
			ActionDetails::SignatureRequest(generic::signature(f, ctx))
		}
		ActionKind::ApprovalRequest => ActionDetails::ApprovalRequest(generic::approval(f, ctx)),
		ActionKind::Checklist => ActionDetails::Checklist(generic::checklist(f, ctx)),
		ActionKind::VideoMessage => ActionDetails::VideoMessage(generic::video(f, ctx)),
		ActionKind::OptInRequest => ActionDetails::OptInRequest(generic::opt_in(f, ctx)),
		ActionKind::DocumentDownload => ActionDetails::DocumentDownload(generic::document(f, ctx)),
	}
}

/// Transform for a type tag that still has to be resolved.
///
/// Unknown tags fail with `Error::UnknownActionType`.
pub fn transform_tagged(
	action_type: &str,
	raw: &Value,
	ctx: &TransformCtx<'_>,
) -> ClResult<ActionDetails> {
	let kind: ActionKind = action_type.parse().inspect_err(|_| {
		warn!(action_type, "transform requested for unknown action type");
	})?;
	Ok(transform(kind, raw, ctx))
}

/// Compatibility entry point for callers that cannot handle a failure.
///
/// Unknown tags are logged and the unwrapped input is returned as is.
pub fn transform_lenient(action_type: &str, raw: &Value, ctx: &TransformCtx<'_>) -> Value {
	let Ok(kind) = action_type.parse::<ActionKind>() else {
		warn!(action_type, "unknown action type, passing payload through untransformed");
		return Value::Object(unwrap_envelope(raw));
	};
	match transform(kind, raw, ctx).to_value() {
		Ok(value) => value,
		Err(err) => {
			warn!(action_type, %err, "canonical payload could not be serialized");
			Value::Object(unwrap_envelope(raw))
		}
	}
}

/// Build the canonical appointment payload directly, for follow-up proposal rounds
pub(crate) fn appointment_from(
	raw: &Map<String, Value>,
	ctx: &TransformCtx<'_>,
) -> AppointmentSchedulingDetails {
	let input = synonyms::normalize_fields(ActionKind::AppointmentScheduling, raw);
	appointment::appointment(Fields::new(&input), ctx)
}


// vim: ts=4
