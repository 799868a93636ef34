//! Action-kind registry and coarse status shared between the framework and stores.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// The fixed set of action kinds a service board understands.
///
/// Adding a kind here makes every exhaustive `match` in the transform,
/// validation and response code fail to compile until it is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
	PaymentRequest,
	GenericMessage,
	AppointmentScheduling,
	InformationRequest,
	FeedbackRequest,
	MilestoneUpdate,
	ResourceLink,
	SignatureRequest,
	ApprovalRequest,
	Checklist,
	VideoMessage,
	OptInRequest,
	DocumentDownload,
}

impl ActionKind {
	pub const ALL: [ActionKind; 13] = [
		ActionKind::PaymentRequest,
		ActionKind::GenericMessage,
		ActionKind::AppointmentScheduling,
		ActionKind::InformationRequest,
		ActionKind::FeedbackRequest,
		ActionKind::MilestoneUpdate,
		ActionKind::ResourceLink,
		ActionKind::SignatureRequest,
		ActionKind::ApprovalRequest,
		ActionKind::Checklist,
		ActionKind::VideoMessage,
		ActionKind::OptInRequest,
		ActionKind::DocumentDownload,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			ActionKind::PaymentRequest => "payment_request",
			ActionKind::GenericMessage => "generic_message",
			ActionKind::AppointmentScheduling => "appointment_scheduling",
			ActionKind::InformationRequest => "information_request",
			ActionKind::FeedbackRequest => "feedback_request",
			ActionKind::MilestoneUpdate => "milestone_update",
			ActionKind::ResourceLink => "resource_link",
			ActionKind::SignatureRequest => "signature_request",
			ActionKind::ApprovalRequest => "approval_request",
			ActionKind::Checklist => "checklist",
			ActionKind::VideoMessage => "video_message",
			ActionKind::OptInRequest => "opt_in_request",
			ActionKind::DocumentDownload => "document_download",
		}
	}
}

impl std::fmt::Display for ActionKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ActionKind {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ActionKind::ALL
			.iter()
			.find(|kind| kind.as_str() == s)
			.copied()
			.ok_or_else(|| Error::UnknownActionType(s.to_string()))
	}
}

/// Coarse status flag used by the surrounding UI.
///
/// Independent of the fine-grained per-kind status inside `action_details`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
	/// Partially built during multi-step creation, not yet validated
	Draft,
	Pending,
	Completed,
	Cancelled,
}

impl ActionStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			ActionStatus::Draft => "draft",
			ActionStatus::Pending => "pending",
			ActionStatus::Completed => "completed",
			ActionStatus::Cancelled => "cancelled",
		}
	}
}


// vim: ts=4
