//! Response transitions of the single-transition kinds.
//!
//! Every generic kind moves from its pending state to a final one through
//! exactly one interaction. [`respond`] computes that step as a pure function,
//! returning the next payload and the notification to emit once it is committed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::appointment;
use crate::details::*;
use crate::prelude::*;
use crate::settings::iso;
use serviceboard_types::event::ActionEventKind;

/// An interaction with a generic action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "response", rename_all = "snake_case")]
pub enum ActionResponse {
	Pay {
		method: Option<String>,
	},
	PaymentFailed,
	Acknowledge,
	SubmitInformation {
		#[serde(default)]
		responses: Map<String, Value>,
	},
	SubmitFeedback {
		rating: u8,
		comment: Option<String>,
	},
	/// Business-side progress report
	UpdateMilestone {
		progress_percentage: Option<u8>,
		status: Option<MilestoneStatus>,
		notes: Option<String>,
	},
	MarkViewed,
	Sign {
		signer_name: String,
	},
	DeclineSignature,
	Approve {
		notes: Option<String>,
	},
	Reject {
		notes: Option<String>,
	},
	SetChecklistItem {
		item_id: String,
		completed: bool,
	},
	MarkWatched,
	OptIn,
	OptOut,
	RecordDownload,
	/// Business withdraws the action
	Cancel,
}

impl ActionResponse {
	pub fn name(&self) -> &'static str {
		match self {
			ActionResponse::Pay { .. } => "pay",
			ActionResponse::PaymentFailed => "payment_failed",
			ActionResponse::Acknowledge => "acknowledge",
			ActionResponse::SubmitInformation { .. } => "submit_information",
			ActionResponse::SubmitFeedback { .. } => "submit_feedback",
			ActionResponse::UpdateMilestone { .. } => "update_milestone",
			ActionResponse::MarkViewed => "mark_viewed",
			ActionResponse::Sign { .. } => "sign",
			ActionResponse::DeclineSignature => "decline_signature",
			ActionResponse::Approve { .. } => "approve",
			ActionResponse::Reject { .. } => "reject",
			ActionResponse::SetChecklistItem { .. } => "set_checklist_item",
			ActionResponse::MarkWatched => "mark_watched",
			ActionResponse::OptIn => "opt_in",
			ActionResponse::OptOut => "opt_out",
			ActionResponse::RecordDownload => "record_download",
			ActionResponse::Cancel => "cancel",
		}
	}
}

/// Outcome of a successful response
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
	pub details: ActionDetails,
	pub event: ActionEventKind,
}

fn trimmed(value: Option<&String>) -> Option<String> {
	value.map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Payload after a business-side cancel. Kinds without a cancelled status keep
/// their payload; only the coarse status records the cancellation then.
fn cancelled(details: &ActionDetails) -> ActionDetails {
	let mut next = details.clone();
	match &mut next {
		ActionDetails::PaymentRequest(d) => d.payment_status = PaymentStatus::Cancelled,
		ActionDetails::InformationRequest(d) => d.submission_status = SubmissionStatus::Cancelled,
		ActionDetails::FeedbackRequest(d) => d.submission_status = SubmissionStatus::Cancelled,
		ActionDetails::SignatureRequest(d) => d.signature_status = SignatureStatus::Cancelled,
		ActionDetails::ApprovalRequest(d) => d.approval_status = ApprovalStatus::Cancelled,
		ActionDetails::AppointmentScheduling(_)
		| ActionDetails::GenericMessage(_)
		| ActionDetails::MilestoneUpdate(_)
		| ActionDetails::ResourceLink(_)
		| ActionDetails::Checklist(_)
		| ActionDetails::VideoMessage(_)
		| ActionDetails::OptInRequest(_)
		| ActionDetails::DocumentDownload(_) => {}
	}
	next
}

fn pay(d: &PaymentRequestDetails, method: Option<&String>, at: String) -> ClResult<ActionDetails> {
	let method = trimmed(method);
	let method_used = if d.allowed_payment_methods.is_empty() {
		method
	} else {
		let Some(method) = method else {
			return Err(Error::IncompleteSelection("a payment method must be selected".into()));
		};
		let allowed =
			d.allowed_payment_methods.iter().find(|m| m.eq_ignore_ascii_case(&method)).ok_or_else(
				|| Error::IncompleteSelection(format!("payment method {} is not accepted", method)),
			)?;
		Some(allowed.clone())
	};
	Ok(ActionDetails::PaymentRequest(PaymentRequestDetails {
		payment_status: PaymentStatus::Completed,
		payment_method_used: method_used,
		paid_at: Some(at),
		..d.clone()
	}))
}

fn submit_information(
	d: &InformationRequestDetails,
	responses: &Map<String, Value>,
	at: String,
) -> ClResult<ActionDetails> {
	let missing: Vec<String> = d
		.requested_fields
		.iter()
		.filter(|field| {
			responses.get(field.as_str()).is_none_or(|v| {
				v.is_null() || v.as_str().is_some_and(|s| s.trim().is_empty())
			})
		})
		.cloned()
		.collect();
	if !missing.is_empty() {
		return Err(Error::ValidationFailed(missing));
	}
	Ok(ActionDetails::InformationRequest(InformationRequestDetails {
		submission_status: SubmissionStatus::Submitted,
		responses: responses.clone(),
		submitted_at: Some(at),
		..d.clone()
	}))
}

fn submit_feedback(
	d: &FeedbackRequestDetails,
	rating: u8,
	comment: Option<&String>,
	at: String,
) -> ClResult<ActionDetails> {
	if !(1..=d.rating_scale).contains(&rating) {
		return Err(Error::ValidationFailed(vec!["rating".into()]));
	}
	Ok(ActionDetails::FeedbackRequest(FeedbackRequestDetails {
		submission_status: SubmissionStatus::Submitted,
		rating: Some(rating),
		comment: if d.allow_comments { trimmed(comment) } else { None },
		submitted_at: Some(at),
		..d.clone()
	}))
}

fn update_milestone(
	d: &MilestoneUpdateDetails,
	progress: Option<u8>,
	status: Option<MilestoneStatus>,
	notes: Option<&String>,
	at: String,
) -> (ActionDetails, ActionEventKind) {
	let mut next = d.clone();
	if let Some(progress) = progress {
		next.progress_percentage = progress.min(100);
	}
	if let Some(status) = status {
		next.milestone_status = status;
	}
	if let Some(notes) = trimmed(notes) {
		next.notes = Some(notes);
	}

	next.is_completed =
		next.milestone_status == MilestoneStatus::Completed || next.progress_percentage == 100;
	if next.is_completed {
		next.milestone_status = MilestoneStatus::Completed;
		next.progress_percentage = 100;
		next.actual_completion_date = Some(at);
		(ActionDetails::MilestoneUpdate(next), ActionEventKind::MilestoneCompleted)
	} else {
		if status.is_none()
			&& next.milestone_status == MilestoneStatus::NotStarted
			&& next.progress_percentage > 0
		{
			next.milestone_status = MilestoneStatus::InProgress;
		}
		(ActionDetails::MilestoneUpdate(next), ActionEventKind::MilestoneUpdated)
	}
}

fn set_checklist_item(
	d: &ChecklistDetails,
	item_id: &str,
	completed: bool,
	at: &str,
) -> ClResult<(ActionDetails, ActionEventKind)> {
	let mut next = d.clone();
	let item = next
		.items
		.iter_mut()
		.find(|item| item.id == item_id)
		.ok_or_else(|| Error::ValidationFailed(vec!["items".into()]))?;
	item.is_completed = completed;
	item.completed_at = completed.then(|| at.to_string());

	next.is_completed = next.all_required_done();
	next.completed_at = next.is_completed.then(|| at.to_string());
	let event = if next.is_completed {
		ActionEventKind::ChecklistCompleted
	} else {
		ActionEventKind::ChecklistItemUpdated
	};
	Ok((ActionDetails::Checklist(next), event))
}

/// Compute the next payload of a generic action.
///
/// Fails with `Error::InvalidStateTransition` when the response does not belong
/// to the payload's kind or the payload is already final. Appointments only
/// accept `Cancel` here; their other transitions live in [`crate::appointment`].
pub fn respond(
	details: &ActionDetails,
	response: &ActionResponse,
	now: DateTime<Utc>,
) -> ClResult<Transition> {
	let invalid = || Error::InvalidStateTransition {
		from: details.status_label(),
		transition: response.name(),
	};

	if let ActionDetails::AppointmentScheduling(d) = details {
		return match response {
			ActionResponse::Cancel => Ok(Transition {
				details: ActionDetails::AppointmentScheduling(appointment::cancel(d)?),
				event: ActionEventKind::AppointmentCancelled,
			}),
			_ => Err(invalid()),
		};
	}
	if details.is_terminal() {
		return Err(invalid());
	}

	let at = iso(now);
	let (next, event) = match (details, response) {
		(_, ActionResponse::Cancel) => (cancelled(details), ActionEventKind::ActionCancelled),

		(ActionDetails::PaymentRequest(d), ActionResponse::Pay { method }) => {
			(pay(d, method.as_ref(), at)?, ActionEventKind::PaymentCompleted)
		}
		(ActionDetails::PaymentRequest(d), ActionResponse::PaymentFailed) => (
			ActionDetails::PaymentRequest(PaymentRequestDetails {
				payment_status: PaymentStatus::Failed,
				..d.clone()
			}),
			ActionEventKind::PaymentFailed,
		),

		(ActionDetails::GenericMessage(d), ActionResponse::Acknowledge) => (
			ActionDetails::GenericMessage(GenericMessageDetails {
				is_acknowledged: true,
				acknowledged_at: Some(at),
				..d.clone()
			}),
			ActionEventKind::MessageAcknowledged,
		),

		(ActionDetails::InformationRequest(d), ActionResponse::SubmitInformation { responses }) => {
			(submit_information(d, responses, at)?, ActionEventKind::InformationSubmitted)
		}

		(ActionDetails::FeedbackRequest(d), ActionResponse::SubmitFeedback { rating, comment }) => {
			(submit_feedback(d, *rating, comment.as_ref(), at)?, ActionEventKind::FeedbackSubmitted)
		}

		(
			ActionDetails::MilestoneUpdate(d),
			ActionResponse::UpdateMilestone { progress_percentage, status, notes },
		) => update_milestone(d, *progress_percentage, *status, notes.as_ref(), at),

		(ActionDetails::ResourceLink(d), ActionResponse::MarkViewed) => (
			ActionDetails::ResourceLink(ResourceLinkDetails {
				is_viewed: true,
				viewed_at: Some(at),
				..d.clone()
			}),
			ActionEventKind::ResourceViewed,
		),

		(ActionDetails::SignatureRequest(d), ActionResponse::Sign { signer_name }) => {
			let Some(signer_name) = trimmed(Some(signer_name)) else {
				return Err(Error::ValidationFailed(vec!["signer_name".into()]));
			};
			(
				ActionDetails::SignatureRequest(SignatureRequestDetails {
					signature_status: SignatureStatus::Signed,
					signer_name: Some(signer_name),
					signed_at: Some(at),
					..d.clone()
				}),
				ActionEventKind::DocumentSigned,
			)
		}
		(ActionDetails::SignatureRequest(d), ActionResponse::DeclineSignature) => (
			ActionDetails::SignatureRequest(SignatureRequestDetails {
				signature_status: SignatureStatus::Declined,
				..d.clone()
			}),
			ActionEventKind::SignatureDeclined,
		),

		(ActionDetails::ApprovalRequest(d), ActionResponse::Approve { notes }) => (
			ActionDetails::ApprovalRequest(ApprovalRequestDetails {
				approval_status: ApprovalStatus::Approved,
				decision_notes: trimmed(notes.as_ref()),
				decided_at: Some(at),
				..d.clone()
			}),
			ActionEventKind::ApprovalGranted,
		),
		(ActionDetails::ApprovalRequest(d), ActionResponse::Reject { notes }) => (
			ActionDetails::ApprovalRequest(ApprovalRequestDetails {
				approval_status: ApprovalStatus::Rejected,
				decision_notes: trimmed(notes.as_ref()),
				decided_at: Some(at),
				..d.clone()
			}),
			ActionEventKind::ApprovalRejected,
		),

		(ActionDetails::Checklist(d), ActionResponse::SetChecklistItem { item_id, completed }) => {
			set_checklist_item(d, item_id, *completed, &at)?
		}

		(ActionDetails::VideoMessage(d), ActionResponse::MarkWatched) => (
			ActionDetails::VideoMessage(VideoMessageDetails {
				is_watched: true,
				watched_at: Some(at),
				..d.clone()
			}),
			ActionEventKind::VideoWatched,
		),

		(ActionDetails::OptInRequest(d), ActionResponse::OptIn) => (
			ActionDetails::OptInRequest(OptInRequestDetails {
				opt_in_status: OptInStatus::OptedIn,
				responded_at: Some(at),
				..d.clone()
			}),
			ActionEventKind::OptedIn,
		),
		(ActionDetails::OptInRequest(d), ActionResponse::OptOut) => (
			ActionDetails::OptInRequest(OptInRequestDetails {
				opt_in_status: OptInStatus::OptedOut,
				responded_at: Some(at),
				..d.clone()
			}),
			ActionEventKind::OptedOut,
		),

		(ActionDetails::DocumentDownload(d), ActionResponse::RecordDownload) => (
			ActionDetails::DocumentDownload(DocumentDownloadDetails {
				download_count: d.download_count.saturating_add(1),
				last_downloaded_at: Some(at),
				..d.clone()
			}),
			ActionEventKind::DocumentDownloaded,
		),

		_ => return Err(invalid()),
	};

	debug!(
		action_type = %details.kind(),
		response = response.name(),
		from = %details.status_label(),
		to = %next.status_label(),
		"action response"
	);
	Ok(Transition { details: next, event })
}


// vim: ts=4
