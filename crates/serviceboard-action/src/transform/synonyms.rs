//! Compatibility mapping from historical input names to canonical ones.
//!
//! Forms written over the years use different names for the same field (and
//! different spellings for the same enum value). This table is the only place
//! that knows about them; everything past the transform boundary sees
//! canonical names only.

use serde_json::{Map, Value};

use crate::prelude::*;

/// `(alias, canonical)` field pairs per kind. The canonical name wins when both are present.
pub fn field_synonyms(kind: ActionKind) -> &'static [(&'static str, &'static str)] {
	match kind {
		ActionKind::PaymentRequest => &[
			("payment_methods", "allowed_payment_methods"),
			("price", "amount"),
			("total", "amount"),
			("status", "payment_status"),
		],
		ActionKind::GenericMessage => &[
			("content", "message"),
			("text", "message"),
			("body", "message"),
			("level", "severity"),
			("message_type", "severity"),
			("acknowledged", "is_acknowledged"),
		],
		ActionKind::AppointmentScheduling => &[
			("title", "appointment_title"),
			("location", "address"),
			("mode", "appointment_mode"),
			("type", "appointment_type"),
			("status", "confirmation_status"),
			("datetime_options", "datetimes_options"),
			("proposed_datetimes", "datetimes_options"),
			("platforms", "platform_options"),
			("confirmed_datetime", "datetime_confirmed"),
			("confirmed_platform", "platform_confirmed"),
		],
		ActionKind::InformationRequest => &[
			("fields", "requested_fields"),
			("questions", "requested_fields"),
			("status", "submission_status"),
		],
		ActionKind::FeedbackRequest => &[
			("prompt", "question"),
			("feedback_question", "question"),
			("scale", "rating_scale"),
			("max_rating", "rating_scale"),
			("status", "submission_status"),
		],
		ActionKind::MilestoneUpdate => &[
			("title", "milestone_title"),
			("completion_percentage", "progress_percentage"),
			("progress", "progress_percentage"),
			("completed", "is_completed"),
			("is_complete", "is_completed"),
			("status", "milestone_status"),
		],
		ActionKind::ResourceLink => &[
			("link", "url"),
			("resource_url", "url"),
			("title", "link_title"),
			("viewed", "is_viewed"),
		],
		ActionKind::SignatureRequest => &[
			("document", "document_url"),
			("file_url", "document_url"),
			("status", "signature_status"),
		],
		ActionKind::ApprovalRequest => &[
			("item", "approval_item"),
			("subject", "approval_item"),
			("status", "approval_status"),
		],
		ActionKind::Checklist => &[("checklist_items", "items"), ("tasks", "items")],
		ActionKind::VideoMessage => &[
			("url", "video_url"),
			("video_link", "video_url"),
			("thumbnail", "thumbnail_url"),
			("watched", "is_watched"),
		],
		ActionKind::OptInRequest => &[
			("description", "consent_text"),
			("message", "consent_text"),
			("status", "opt_in_status"),
		],
		ActionKind::DocumentDownload => &[
			("file_url", "document_url"),
			("url", "document_url"),
			("file_name", "document_name"),
		],
	}
}

// Enum value spellings, after `normalize_token`
pub const APPOINTMENT_MODE_VALUES: &[(&str, &str)] = &[
	("fixed_date", "fixed_confirmed"),
	("fixed", "fixed_confirmed"),
	("pending_confirmation", "fixed_pending_confirmation"),
	("multiple", "multiple_choice"),
	("multiple_options", "multiple_choice"),
];
pub const APPOINTMENT_TYPE_VALUES: &[(&str, &str)] = &[
	("inperson", "in_person"),
	("offline", "in_person"),
	("onsite", "in_person"),
	("virtual", "online"),
	("video", "online"),
	("remote", "online"),
];
pub const CONFIRMATION_STATUS_VALUES: &[(&str, &str)] = &[
	("pending", "pending_customer"),
	("accepted", "confirmed"),
	("declined", "rejected"),
	("canceled", "cancelled"),
];
pub const PAYMENT_STATUS_VALUES: &[(&str, &str)] =
	&[("paid", "completed"), ("succeeded", "completed"), ("canceled", "cancelled")];
pub const SEVERITY_VALUES: &[(&str, &str)] = &[("warn", "warning"), ("danger", "error")];
pub const SUBMISSION_STATUS_VALUES: &[(&str, &str)] =
	&[("completed", "submitted"), ("canceled", "cancelled")];
pub const MILESTONE_STATUS_VALUES: &[(&str, &str)] =
	&[("done", "completed"), ("pending", "not_started"), ("active", "in_progress")];
pub const SIGNATURE_STATUS_VALUES: &[(&str, &str)] =
	&[("completed", "signed"), ("rejected", "declined"), ("canceled", "cancelled")];
pub const APPROVAL_STATUS_VALUES: &[(&str, &str)] =
	&[("accepted", "approved"), ("declined", "rejected"), ("canceled", "cancelled")];
pub const OPT_IN_STATUS_VALUES: &[(&str, &str)] = &[
	("accepted", "opted_in"),
	("subscribed", "opted_in"),
	("declined", "opted_out"),
	("unsubscribed", "opted_out"),
];

/// Null and blank strings carry no value
fn is_blank(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(s) => s.trim().is_empty(),
		_ => false,
	}
}

/// Copy the input object with aliased fields renamed to their canonical name
pub fn normalize_fields(kind: ActionKind, raw: &Map<String, Value>) -> Map<String, Value> {
	let mut out = raw.clone();
	for (alias, canonical) in field_synonyms(kind) {
		if out.get(*canonical).is_none_or(is_blank) {
			if let Some(value) = raw.get(*alias).filter(|v| !is_blank(v)) {
				out.insert((*canonical).to_string(), value.clone());
			}
		}
	}
	out
}


// vim: ts=4
