//! Notification events emitted after committed transitions.
//!
//! The framework never formats or sends notifications itself. A notification
//! collaborator implements [`ActionEventSink`] and builds messages from the
//! persisted payload carried by each event.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionEventKind {
	ActionCreated,
	ActionPublished,
	ActionCancelled,

	// Appointment scheduling
	AppointmentConfirmed,
	AppointmentRejected,
	AppointmentRescheduleRequested,
	AppointmentCancelled,

	// Generic kinds
	PaymentCompleted,
	PaymentFailed,
	MessageAcknowledged,
	InformationSubmitted,
	FeedbackSubmitted,
	MilestoneUpdated,
	MilestoneCompleted,
	ResourceViewed,
	DocumentSigned,
	SignatureDeclined,
	ApprovalGranted,
	ApprovalRejected,
	ChecklistItemUpdated,
	ChecklistCompleted,
	VideoWatched,
	OptedIn,
	OptedOut,
	DocumentDownloaded,
}

impl ActionEventKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ActionEventKind::ActionCreated => "action_created",
			ActionEventKind::ActionPublished => "action_published",
			ActionEventKind::ActionCancelled => "action_cancelled",
			ActionEventKind::AppointmentConfirmed => "appointment_confirmed",
			ActionEventKind::AppointmentRejected => "appointment_rejected",
			ActionEventKind::AppointmentRescheduleRequested => "appointment_reschedule_requested",
			ActionEventKind::AppointmentCancelled => "appointment_cancelled",
			ActionEventKind::PaymentCompleted => "payment_completed",
			ActionEventKind::PaymentFailed => "payment_failed",
			ActionEventKind::MessageAcknowledged => "message_acknowledged",
			ActionEventKind::InformationSubmitted => "information_submitted",
			ActionEventKind::FeedbackSubmitted => "feedback_submitted",
			ActionEventKind::MilestoneUpdated => "milestone_updated",
			ActionEventKind::MilestoneCompleted => "milestone_completed",
			ActionEventKind::ResourceViewed => "resource_viewed",
			ActionEventKind::DocumentSigned => "document_signed",
			ActionEventKind::SignatureDeclined => "signature_declined",
			ActionEventKind::ApprovalGranted => "approval_granted",
			ActionEventKind::ApprovalRejected => "approval_rejected",
			ActionEventKind::ChecklistItemUpdated => "checklist_item_updated",
			ActionEventKind::ChecklistCompleted => "checklist_completed",
			ActionEventKind::VideoWatched => "video_watched",
			ActionEventKind::OptedIn => "opted_in",
			ActionEventKind::OptedOut => "opted_out",
			ActionEventKind::DocumentDownloaded => "document_downloaded",
		}
	}
}

impl std::fmt::Display for ActionEventKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One committed transition, carrying the payload as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
	pub action_id: Box<str>,
	pub board_id: Box<str>,
	pub action_type: ActionKind,
	pub kind: ActionEventKind,
	pub details: serde_json::Value,
	pub at: Timestamp,
}

#[async_trait]
pub trait ActionEventSink: Debug + Send + Sync {
	async fn notify(&self, event: &ActionEvent) -> ClResult<()>;
}

// vim: ts=4
