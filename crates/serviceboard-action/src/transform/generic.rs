//! Builders of the single-transition kinds' canonical payloads.

use serde_json::Value;
use sha2::{Digest, Sha256};

use super::coerce::{Fields, value_to_string};
use super::synonyms::*;
use crate::details::*;
use crate::settings::{ActionSettings, TransformCtx};

/// Stamp `now` when a completion flag is set but its timestamp is missing
fn stamp(done: bool, given: Option<String>, ctx: &TransformCtx<'_>) -> Option<String> {
	if done { Some(given.unwrap_or_else(|| ctx.now_iso())) } else { given }
}

pub(super) fn payment(f: Fields<'_>, ctx: &TransformCtx<'_>) -> PaymentRequestDetails {
	let payment_status: PaymentStatus =
		f.enum_of("payment_status", PAYMENT_STATUS_VALUES).unwrap_or_default();
	PaymentRequestDetails {
		amount: f.number("amount").unwrap_or(0.0),
		currency: f
			.string("currency")
			.map_or_else(|| ctx.settings.default_currency.clone(), |c| c.to_ascii_uppercase()),
		description: f.string("description").unwrap_or_default(),
		allowed_payment_methods: f.string_list("allowed_payment_methods"),
		payment_status,
		due_date: f.string("due_date"),
		payment_method_used: f.string("payment_method_used"),
		paid_at: stamp(payment_status == PaymentStatus::Completed, f.string("paid_at"), ctx),
	}
}

pub(super) fn message(f: Fields<'_>, ctx: &TransformCtx<'_>) -> GenericMessageDetails {
	let is_acknowledged = f.bool("is_acknowledged").unwrap_or(false);
	GenericMessageDetails {
		message: f.string("message").unwrap_or_default(),
		severity: f.enum_of("severity", SEVERITY_VALUES).unwrap_or(ctx.settings.default_severity),
		requires_acknowledgment: f.bool("requires_acknowledgment").unwrap_or(false),
		is_acknowledged,
		acknowledged_at: stamp(is_acknowledged, f.string("acknowledged_at"), ctx),
	}
}

pub(super) fn information(f: Fields<'_>, ctx: &TransformCtx<'_>) -> InformationRequestDetails {
	let submission_status: SubmissionStatus =
		f.enum_of("submission_status", SUBMISSION_STATUS_VALUES).unwrap_or_default();
	InformationRequestDetails {
		requested_fields: f.string_list("requested_fields"),
		instructions: f.string("instructions"),
		submission_status,
		responses: f.object("responses").cloned().unwrap_or_default(),
		submitted_at: stamp(
			submission_status == SubmissionStatus::Submitted,
			f.string("submitted_at"),
			ctx,
		),
	}
}

pub(super) fn feedback(f: Fields<'_>, ctx: &TransformCtx<'_>) -> FeedbackRequestDetails {
	let rating_scale = f
		.number("rating_scale")
		.map_or(ctx.settings.default_rating_scale, ActionSettings::clamp_rating_scale);
	let submission_status: SubmissionStatus =
		f.enum_of("submission_status", SUBMISSION_STATUS_VALUES).unwrap_or_default();
	FeedbackRequestDetails {
		question: f.string("question").unwrap_or_default(),
		rating_scale,
		allow_comments: f.bool("allow_comments").unwrap_or(true),
		submission_status,
		rating: f
			.number("rating")
			.map(f64::round)
			.filter(|r| *r >= 1.0)
			.map(|r| r.min(f64::from(rating_scale)) as u8),
		comment: f.string("comment"),
		submitted_at: stamp(
			submission_status == SubmissionStatus::Submitted,
			f.string("submitted_at"),
			ctx,
		),
	}
}

pub(super) fn milestone(f: Fields<'_>, ctx: &TransformCtx<'_>) -> MilestoneUpdateDetails {
	let progress = f.number("progress_percentage").unwrap_or(0.0).round().clamp(0.0, 100.0) as u8;
	let status: Option<MilestoneStatus> = f.enum_of("milestone_status", MILESTONE_STATUS_VALUES);
	let is_completed = status == Some(MilestoneStatus::Completed)
		|| f.bool("is_completed") == Some(true)
		|| progress == 100;

	let (milestone_status, progress_percentage) = if is_completed {
		(MilestoneStatus::Completed, 100)
	} else {
		let status = status.unwrap_or(if progress == 0 {
			MilestoneStatus::NotStarted
		} else {
			MilestoneStatus::InProgress
		});
		(status, progress)
	};

	MilestoneUpdateDetails {
		milestone_title: f.string("milestone_title").unwrap_or_default(),
		milestone_status,
		progress_percentage,
		is_completed,
		target_date: f.string("target_date"),
		actual_completion_date: stamp(is_completed, f.string("actual_completion_date"), ctx),
		notes: f.string("notes"),
	}
}

pub(super) fn resource(f: Fields<'_>, ctx: &TransformCtx<'_>) -> ResourceLinkDetails {
	let is_viewed = f.bool("is_viewed").unwrap_or(false);
	ResourceLinkDetails {
		url: f.string("url").unwrap_or_default(),
		link_title: f.string("link_title"),
		resource_type: f.string_or("resource_type", &ctx.settings.default_resource_type),
		is_viewed,
		viewed_at: stamp(is_viewed, f.string("viewed_at"), ctx),
	}
}

pub(super) fn signature(f: Fields<'_>, ctx: &TransformCtx<'_>) -> SignatureRequestDetails {
	let signature_status: SignatureStatus =
		f.enum_of("signature_status", SIGNATURE_STATUS_VALUES).unwrap_or_default();
	SignatureRequestDetails {
		document_url: f.string("document_url").unwrap_or_default(),
		document_name: f.string("document_name"),
		signature_status,
		signer_name: f.string("signer_name"),
		signed_at: stamp(signature_status == SignatureStatus::Signed, f.string("signed_at"), ctx),
	}
}

pub(super) fn approval(f: Fields<'_>, ctx: &TransformCtx<'_>) -> ApprovalRequestDetails {
	let approval_status: ApprovalStatus =
		f.enum_of("approval_status", APPROVAL_STATUS_VALUES).unwrap_or_default();
	let decided = matches!(approval_status, ApprovalStatus::Approved | ApprovalStatus::Rejected);
	ApprovalRequestDetails {
		approval_item: f.string("approval_item").unwrap_or_default(),
		approval_status,
		decision_notes: f.string("decision_notes"),
		decided_at: stamp(decided, f.string("decided_at"), ctx),
	}
}

/// Deterministic id for an item that came without one
fn synthetic_item_id(prefix: &str, index: usize, text: &str) -> String {
	let hash = Sha256::digest(text.as_bytes());
	let short = hash.iter().take(4).map(|b| format!("{:02x}", b)).collect::<String>();
	format!("{}-{}-{}", prefix, index, short)
}

fn checklist_item(entry: &Value, ctx: &TransformCtx<'_>) -> Option<ChecklistItem> {
	let mut item = ChecklistItem {
		id: String::new(),
		text: String::new(),
		is_completed: false,
		required: None,
		completed_at: None,
		attachments: None,
		notes: None,
	};

	match entry {
		Value::Object(obj) => {
			let f = Fields::new(obj);
			item.id = f.string("id").unwrap_or_default();
			item.text = ["text", "title", "label", "name"]
				.iter()
				.find_map(|key| f.string(key))
				.unwrap_or_default();
			item.is_completed = ["is_completed", "completed", "done", "checked"]
				.iter()
				.find_map(|key| f.bool(key))
				.unwrap_or(false);
			item.required = f.bool("required");
			let attachments = f.string_list("attachments");
			item.attachments = (!attachments.is_empty()).then_some(attachments);
			item.notes = f.string("notes");
			item.completed_at = if item.is_completed {
				Some(f.string("completed_at").unwrap_or_else(|| ctx.now_iso()))
			} else {
				None
			};
		}
		// Blank rows from list-style forms are dropped
		other => item.text = value_to_string(other)?,
	}
	Some(item)
}

pub(super) fn checklist(f: Fields<'_>, ctx: &TransformCtx<'_>) -> ChecklistDetails {
	let prefix = ctx.settings.checklist_id_prefix.as_str();
	let mut items: Vec<ChecklistItem> = Vec::new();

	for entry in f.array("items") {
		let Some(mut item) = checklist_item(entry, ctx) else {
			continue;
		};
		let taken = |id: &str| items.iter().any(|other| other.id == id);
		if item.id.is_empty() || taken(item.id.as_str()) {
			let base = synthetic_item_id(prefix, items.len(), &item.text);
			let mut id = base.clone();
			let mut suffix = 1;
			while taken(id.as_str()) {
				suffix += 1;
				id = format!("{}-{}", base, suffix);
			}
			item.id = id;
		}
		items.push(item);
	}

	let mut details = ChecklistDetails { items, is_completed: false, completed_at: None };
	details.is_completed = details.all_required_done();
	details.completed_at = if details.is_completed {
		Some(f.string("completed_at").unwrap_or_else(|| ctx.now_iso()))
	} else {
		None
	};
	details
}

pub(super) fn video(f: Fields<'_>, ctx: &TransformCtx<'_>) -> VideoMessageDetails {
	let is_watched = f.bool("is_watched").unwrap_or(false);
	VideoMessageDetails {
		video_url: f.string("video_url").unwrap_or_default(),
		thumbnail_url: f.string("thumbnail_url"),
		duration_seconds: f
			.number("duration_seconds")
			.filter(|d| *d >= 0.0)
			.map(|d| d.round().min(f64::from(u32::MAX)) as u32),
		is_watched,
		watched_at: stamp(is_watched, f.string("watched_at"), ctx),
	}
}

pub(super) fn opt_in(f: Fields<'_>, ctx: &TransformCtx<'_>) -> OptInRequestDetails {
	let opt_in_status: OptInStatus =
		f.enum_of("opt_in_status", OPT_IN_STATUS_VALUES).unwrap_or_default();
	OptInRequestDetails {
		consent_text: f.string("consent_text").unwrap_or_default(),
		opt_in_status,
		responded_at: stamp(opt_in_status != OptInStatus::Pending, f.string("responded_at"), ctx),
	}
}

pub(super) fn document(f: Fields<'_>, _ctx: &TransformCtx<'_>) -> DocumentDownloadDetails {
	DocumentDownloadDetails {
		document_url: f.string("document_url").unwrap_or_default(),
		document_name: f.string("document_name"),
		download_count: f
			.number("download_count")
			.filter(|n| *n >= 0.0)
			.map_or(0, |n| n.round().min(f64::from(u32::MAX)) as u32),
		last_downloaded_at: f.string("last_downloaded_at"),
	}
}

// vim: ts=4
