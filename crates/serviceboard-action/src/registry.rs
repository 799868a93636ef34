//! Built-in action kind definitions
//!
//! Every kind is described here as static data: the canonical fields the
//! validation pipeline requires.

use crate::prelude::*;

/// Structural check applied to one canonical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCheck {
	/// String with at least one non-whitespace character
	NonEmptyString,
	Number,
	/// Number strictly greater than zero
	PositiveNumber,
	Bool,
	Array,
	NonEmptyArray,
	/// String that is one of the listed values
	OneOf(&'static [&'static str]),
	/// Non-empty array of objects, each with a non-empty `text`
	ChecklistItems,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
	pub name: &'static str,
	pub check: FieldCheck,
}

const fn rule(name: &'static str, check: FieldCheck) -> FieldRule {
	FieldRule { name, check }
}

#[derive(Debug, Clone, Copy)]
pub struct ActionDefinition {
	pub kind: ActionKind,
	pub fields: &'static [FieldRule],
}

pub const PAYMENT_STATUSES: &[&str] = &["pending", "completed", "failed", "cancelled"];
pub const SEVERITIES: &[&str] = &["info", "success", "warning", "error"];
pub const SUBMISSION_STATUSES: &[&str] = &["pending", "submitted", "cancelled"];
pub const MILESTONE_STATUSES: &[&str] = &["not_started", "in_progress", "completed", "blocked"];
pub const SIGNATURE_STATUSES: &[&str] = &["pending", "signed", "declined", "cancelled"];
pub const APPROVAL_STATUSES: &[&str] = &["pending", "approved", "rejected", "cancelled"];
pub const OPT_IN_STATUSES: &[&str] = &["pending", "opted_in", "opted_out"];
pub const APPOINTMENT_TYPES: &[&str] = &["online", "in_person"];
pub const APPOINTMENT_MODES: &[&str] =
	&["fixed_confirmed", "fixed_pending_confirmation", "multiple_choice"];
pub const CONFIRMATION_STATUSES: &[&str] =
	&["pending_customer", "confirmed", "cancelled", "rejected", "rescheduled"];

use FieldCheck::{
	Array, ChecklistItems, NonEmptyArray, NonEmptyString, Number, OneOf, PositiveNumber,
};

const PAYMENT_FIELDS: &[FieldRule] = &[
	rule("amount", PositiveNumber),
	rule("currency", NonEmptyString),
	rule("allowed_payment_methods", Array),
	rule("payment_status", OneOf(PAYMENT_STATUSES)),
];
const MESSAGE_FIELDS: &[FieldRule] =
	&[rule("message", NonEmptyString), rule("severity", OneOf(SEVERITIES))];
const APPOINTMENT_FIELDS: &[FieldRule] = &[
	rule("appointment_title", NonEmptyString),
	rule("appointment_type", OneOf(APPOINTMENT_TYPES)),
	rule("appointment_mode", OneOf(APPOINTMENT_MODES)),
	rule("confirmation_status", OneOf(CONFIRMATION_STATUSES)),
];
const INFORMATION_FIELDS: &[FieldRule] = &[
	rule("requested_fields", NonEmptyArray),
	rule("submission_status", OneOf(SUBMISSION_STATUSES)),
];
const FEEDBACK_FIELDS: &[FieldRule] = &[
	rule("question", NonEmptyString),
	rule("rating_scale", Number),
	rule("submission_status", OneOf(SUBMISSION_STATUSES)),
];
const MILESTONE_FIELDS: &[FieldRule] = &[
	rule("milestone_title", NonEmptyString),
	rule("milestone_status", OneOf(MILESTONE_STATUSES)),
	rule("progress_percentage", Number),
];
const RESOURCE_FIELDS: &[FieldRule] = &[rule("url", NonEmptyString)];
const SIGNATURE_FIELDS: &[FieldRule] = &[
	rule("document_url", NonEmptyString),
	rule("signature_status", OneOf(SIGNATURE_STATUSES)),
];
const APPROVAL_FIELDS: &[FieldRule] = &[
	rule("approval_item", NonEmptyString),
	rule("approval_status", OneOf(APPROVAL_STATUSES)),
];
const CHECKLIST_FIELDS: &[FieldRule] = &[rule("items", ChecklistItems)];
const VIDEO_FIELDS: &[FieldRule] = &[rule("video_url", NonEmptyString)];
const OPT_IN_FIELDS: &[FieldRule] = &[
	rule("consent_text", NonEmptyString),
	rule("opt_in_status", OneOf(OPT_IN_STATUSES)),
];
const DOCUMENT_FIELDS: &[FieldRule] = &[rule("document_url", NonEmptyString)];

/// Get the definition of a kind
pub fn definition(kind: ActionKind) -> ActionDefinition {
	let fields = match kind {
		ActionKind::PaymentRequest => PAYMENT_FIELDS,
		ActionKind::GenericMessage => MESSAGE_FIELDS,
		ActionKind::AppointmentScheduling => APPOINTMENT_FIELDS,
		ActionKind::InformationRequest => INFORMATION_FIELDS,
		ActionKind::FeedbackRequest => FEEDBACK_FIELDS,
		ActionKind::MilestoneUpdate => MILESTONE_FIELDS,
		ActionKind::ResourceLink => RESOURCE_FIELDS,
		ActionKind::SignatureRequest => SIGNATURE_FIELDS,
		ActionKind::ApprovalRequest => APPROVAL_FIELDS,
		ActionKind::Checklist => CHECKLIST_FIELDS,
		ActionKind::VideoMessage => VIDEO_FIELDS,
		ActionKind::OptInRequest => OPT_IN_FIELDS,
		ActionKind::DocumentDownload => DOCUMENT_FIELDS,
	};
	ActionDefinition { kind, fields }
}

/// Get all built-in action definitions
pub fn definitions() -> Vec<ActionDefinition> {
	ActionKind::ALL.iter().copied().map(definition).collect()
}


// vim: ts=4
