//! Typed canonical payloads, one variant per action kind.
//!
//! Stores keep `action_details` as an untyped JSON document next to the
//! `action_type` tag. [`ActionDetails::from_value`] is the only way back from
//! that document into typed form, and it dispatches on the tag exhaustively.

pub mod appointment;
pub mod generic;

use serde::Serialize;
use serde_json::Value;

use crate::prelude::*;

pub use appointment::*;
pub use generic::*;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionDetails {
	PaymentRequest(PaymentRequestDetails),
	GenericMessage(GenericMessageDetails),
	AppointmentScheduling(AppointmentSchedulingDetails),
	InformationRequest(InformationRequestDetails),
	FeedbackRequest(FeedbackRequestDetails),
	MilestoneUpdate(MilestoneUpdateDetails),
	ResourceLink(ResourceLinkDetails),
	SignatureRequest(SignatureRequestDetails),
	ApprovalRequest(ApprovalRequestDetails),
	Checklist(ChecklistDetails),
	VideoMessage(VideoMessageDetails),
	OptInRequest(OptInRequestDetails),
	DocumentDownload(DocumentDownloadDetails),
}

impl ActionDetails {
	pub fn kind(&self) -> ActionKind {
		match self {
			ActionDetails::PaymentRequest(_) => ActionKind::PaymentRequest,
			ActionDetails::GenericMessage(_) => ActionKind::GenericMessage,
			ActionDetails::AppointmentScheduling(_) => ActionKind::AppointmentScheduling,
			ActionDetails::InformationRequest(_) => ActionKind::InformationRequest,
			ActionDetails::FeedbackRequest(_) => ActionKind::FeedbackRequest,
			ActionDetails::MilestoneUpdate(_) => ActionKind::MilestoneUpdate,
			ActionDetails::ResourceLink(_) => ActionKind::ResourceLink,
			ActionDetails::SignatureRequest(_) => ActionKind::SignatureRequest,
			ActionDetails::ApprovalRequest(_) => ActionKind::ApprovalRequest,
			ActionDetails::Checklist(_) => ActionKind::Checklist,
			ActionDetails::VideoMessage(_) => ActionKind::VideoMessage,
			ActionDetails::OptInRequest(_) => ActionKind::OptInRequest,
			ActionDetails::DocumentDownload(_) => ActionKind::DocumentDownload,
		}
	}

	/// Parse a persisted canonical payload.
	///
	/// This is strict: the document must already be canonical. Messy form input
	/// goes through [`crate::transform::transform`] instead.
	pub fn from_value(kind: ActionKind, value: &Value) -> ClResult<Self> {
		fn parse<T: serde::de::DeserializeOwned>(value: &Value) -> ClResult<T> {
			T::deserialize(value).map_err(|err| Error::Parse(err.to_string()))
		}

		Ok(match kind {
			ActionKind::PaymentRequest => ActionDetails::PaymentRequest(parse(value)?),
			ActionKind::GenericMessage => ActionDetails::GenericMessage(parse(value)?),
			ActionKind::AppointmentScheduling => {
				ActionDetails::AppointmentScheduling(parse(value)?)
			}
			ActionKind::InformationRequest => ActionDetails::InformationRequest(parse(value)?),
			ActionKind::FeedbackRequest => ActionDetails::FeedbackRequest(parse(value)?),
			ActionKind::MilestoneUpdate => ActionDetails::MilestoneUpdate(parse(value)?),
			ActionKind::ResourceLink => ActionDetails::ResourceLink(parse(value)?),
			ActionKind::SignatureRequest => ActionDetails::SignatureRequest(parse(value)?),
			ActionKind::ApprovalRequest => ActionDetails::ApprovalRequest(parse(value)?),
			ActionKind::Checklist => ActionDetails::Checklist(parse(value)?),
			ActionKind::VideoMessage => ActionDetails::VideoMessage(parse(value)?),
			ActionKind::OptInRequest => ActionDetails::OptInRequest(parse(value)?),
			ActionKind::DocumentDownload => ActionDetails::DocumentDownload(parse(value)?),
		})
	}

	pub fn to_value(&self) -> ClResult<Value> {
		Ok(serde_json::to_value(self)?)
	}

	/// Fine-grained status rendered as text, for diagnostics and error messages
	pub fn status_label(&self) -> String {
		fn label<T: Serialize>(status: &T) -> String {
			serde_json::to_value(status)
				.ok()
				.and_then(|v| v.as_str().map(str::to_string))
				.unwrap_or_default()
		}
		fn done(flag: bool, yes: &str) -> String {
			if flag { yes.to_string() } else { "pending".to_string() }
		}

		match self {
			ActionDetails::PaymentRequest(d) => label(&d.payment_status),
			ActionDetails::GenericMessage(d) => done(d.is_acknowledged, "acknowledged"),
			ActionDetails::AppointmentScheduling(d) => d.confirmation_status.to_string(),
			ActionDetails::InformationRequest(d) => label(&d.submission_status),
			ActionDetails::FeedbackRequest(d) => label(&d.submission_status),
			ActionDetails::MilestoneUpdate(d) => label(&d.milestone_status),
			ActionDetails::ResourceLink(d) => done(d.is_viewed, "viewed"),
			ActionDetails::SignatureRequest(d) => label(&d.signature_status),
			ActionDetails::ApprovalRequest(d) => label(&d.approval_status),
			ActionDetails::Checklist(d) => done(d.is_completed, "completed"),
			ActionDetails::VideoMessage(d) => done(d.is_watched, "watched"),
			ActionDetails::OptInRequest(d) => label(&d.opt_in_status),
			ActionDetails::DocumentDownload(_) => "available".to_string(),
		}
	}

	/// No further customer response is accepted
	pub fn is_terminal(&self) -> bool {
		match self {
			ActionDetails::PaymentRequest(d) => d.payment_status != PaymentStatus::Pending,
			ActionDetails::GenericMessage(d) => d.is_acknowledged,
			ActionDetails::AppointmentScheduling(d) => {
				d.confirmation_status != ConfirmationStatus::PendingCustomer
			}
			ActionDetails::InformationRequest(d) => {
				d.submission_status != SubmissionStatus::Pending
			}
			ActionDetails::FeedbackRequest(d) => d.submission_status != SubmissionStatus::Pending,
			ActionDetails::MilestoneUpdate(d) => d.is_completed,
			ActionDetails::ResourceLink(d) => d.is_viewed,
			ActionDetails::SignatureRequest(d) => d.signature_status != SignatureStatus::Pending,
			ActionDetails::ApprovalRequest(d) => d.approval_status != ApprovalStatus::Pending,
			ActionDetails::Checklist(d) => d.is_completed,
			ActionDetails::VideoMessage(d) => d.is_watched,
			ActionDetails::OptInRequest(d) => d.opt_in_status != OptInStatus::Pending,
			ActionDetails::DocumentDownload(_) => false,
		}
	}

	fn is_cancelled(&self) -> bool {
		match self {
			ActionDetails::PaymentRequest(d) => d.payment_status == PaymentStatus::Cancelled,
			ActionDetails::AppointmentScheduling(d) => {
				d.confirmation_status == ConfirmationStatus::Cancelled
			}
			ActionDetails::InformationRequest(d) => {
				d.submission_status == SubmissionStatus::Cancelled
			}
			ActionDetails::FeedbackRequest(d) => d.submission_status == SubmissionStatus::Cancelled,
			ActionDetails::SignatureRequest(d) => d.signature_status == SignatureStatus::Cancelled,
			ActionDetails::ApprovalRequest(d) => d.approval_status == ApprovalStatus::Cancelled,
			ActionDetails::GenericMessage(_)
			| ActionDetails::MilestoneUpdate(_)
			| ActionDetails::ResourceLink(_)
			| ActionDetails::Checklist(_)
			| ActionDetails::VideoMessage(_)
			| ActionDetails::OptInRequest(_)
			| ActionDetails::DocumentDownload(_) => false,
		}
	}

	/// Coarse `action_status` derived from the fine-grained payload status
	pub fn coarse_status(&self) -> ActionStatus {
		if self.is_cancelled() {
			ActionStatus::Cancelled
		} else if self.is_terminal() {
			ActionStatus::Completed
		} else {
			ActionStatus::Pending
		}
	}

	pub fn requires_customer_action(&self) -> bool {
		match self {
			ActionDetails::GenericMessage(d) => d.requires_acknowledgment && !d.is_acknowledged,
			ActionDetails::MilestoneUpdate(_) => false,
			ActionDetails::DocumentDownload(d) => d.download_count == 0,
			_ => !self.is_terminal(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn appointment(status: &str) -> Value {
		json!({
			"appointment_title": "Consultation",
			"appointment_type": "in_person",
			"appointment_mode": "fixed_confirmed",
			"address": "1 Main St",
			"confirmation_status": status,
			"datetime_confirmed": "2025-01-10T10:00:00Z",
			"platform_confirmed": null,
			"appointment_id": null,
			"reschedule_reason": null
		})
	}

	#[test]
	fn test_from_value_dispatches_on_kind() {
		let details =
			ActionDetails::from_value(ActionKind::AppointmentScheduling, &appointment("confirmed"))
				.unwrap();
		assert_eq!(details.kind(), ActionKind::AppointmentScheduling);
		assert_eq!(details.status_label(), "confirmed");
		assert_eq!(details.coarse_status(), ActionStatus::Completed);
		assert!(!details.requires_customer_action());
	}

	#[test]
	fn test_from_value_rejects_foreign_shape() {
		let res = ActionDetails::from_value(ActionKind::PaymentRequest, &appointment("confirmed"));
		assert!(matches!(res, Err(Error::Parse(_))));
	}

	#[test]
	fn test_cancelled_appointment_is_coarse_cancelled() {
		let details =
			ActionDetails::from_value(ActionKind::AppointmentScheduling, &appointment("cancelled"))
				.unwrap();
		assert_eq!(details.coarse_status(), ActionStatus::Cancelled);
	}

	#[test]
	fn test_to_value_is_untagged() {
		let details = ActionDetails::OptInRequest(OptInRequestDetails {
			consent_text: "Newsletter".into(),
			opt_in_status: OptInStatus::OptedIn,
			responded_at: None,
		});
		assert_eq!(
			details.to_value().unwrap(),
			json!({"consent_text": "Newsletter", "opt_in_status": "opted_in", "responded_at": null})
		);
		assert_eq!(details.status_label(), "opted_in");
	}
}

// vim: ts=4
