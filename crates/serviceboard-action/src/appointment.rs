//! Appointment scheduling state machine.
//!
//! ```text
//!                  select_and_confirm               request_reschedule
//! pending_customer ------------------> confirmed ---------------------> rescheduled
//!        |   \                             |
//!        |    \ reject                     | cancel
//!        |     `-----> rejected            v
//!        `-------------------------->  cancelled
//!                   cancel
//! ```
//!
//! Transitions are pure functions of (current payload, event). They fail with
//! `Error::InvalidStateTransition` when the current status does not allow them,
//! and never fall back to a silent no-op. All I/O around a transition belongs to
//! [`crate::service::BoardActionService`].

use chrono::DateTime;
use serde_json::{Map, Value};

use crate::details::*;
use crate::prelude::*;
use crate::settings::TransformCtx;
use crate::transform::{self, synonyms};
use serviceboard_types::event::ActionEventKind;

/// One interaction with an appointment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentEvent {
	SelectAndConfirm { datetime: Option<String>, platform: Option<String> },
	Reject,
	RequestReschedule { reason: String },
	Cancel,
}

impl AppointmentEvent {
	pub fn name(&self) -> &'static str {
		match self {
			AppointmentEvent::SelectAndConfirm { .. } => "select_and_confirm",
			AppointmentEvent::Reject => "reject",
			AppointmentEvent::RequestReschedule { .. } => "request_reschedule",
			AppointmentEvent::Cancel => "cancel",
		}
	}

	/// Notification emitted once this event is committed
	pub fn event_kind(&self) -> ActionEventKind {
		match self {
			AppointmentEvent::SelectAndConfirm { .. } => ActionEventKind::AppointmentConfirmed,
			AppointmentEvent::Reject => ActionEventKind::AppointmentRejected,
			AppointmentEvent::RequestReschedule { .. } => {
				ActionEventKind::AppointmentRescheduleRequested
			}
			AppointmentEvent::Cancel => ActionEventKind::AppointmentCancelled,
		}
	}

	/// Compute the next payload
	pub fn apply(
		&self,
		details: &AppointmentSchedulingDetails,
	) -> ClResult<AppointmentSchedulingDetails> {
		let next = match self {
			AppointmentEvent::SelectAndConfirm { datetime, platform } => {
				select_and_confirm(details, datetime.as_deref(), platform.as_deref())
			}
			AppointmentEvent::Reject => reject(details),
			AppointmentEvent::RequestReschedule { reason } => request_reschedule(details, reason),
			AppointmentEvent::Cancel => cancel(details),
		}?;
		debug!(
			transition = self.name(),
			from = %details.confirmation_status,
			to = %next.confirmation_status,
			"appointment transition"
		);
		Ok(next)
	}
}

fn guard(
	details: &AppointmentSchedulingDetails,
	allowed: &[ConfirmationStatus],
	transition: &'static str,
) -> ClResult<()> {
	if allowed.contains(&details.confirmation_status) {
		Ok(())
	} else {
		Err(Error::InvalidStateTransition {
			from: details.confirmation_status.as_str().to_string(),
			transition,
		})
	}
}

/// Two ISO datetimes denote the same instant. Unparseable values compare as text.
fn same_datetime(a: &str, b: &str) -> bool {
	match (DateTime::parse_from_rfc3339(a.trim()), DateTime::parse_from_rfc3339(b.trim())) {
		(Ok(a), Ok(b)) => a == b,
		_ => a.trim() == b.trim(),
	}
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|s| !s.is_empty())
}

fn selected_datetime(
	details: &AppointmentSchedulingDetails,
	datetime: Option<&str>,
) -> ClResult<String> {
	let datetime = non_empty(datetime);

	if details.appointment_mode == AppointmentMode::MultipleChoice {
		let Some(datetime) = datetime else {
			return Err(Error::IncompleteSelection("a datetime must be selected".into()));
		};
		return details
			.datetimes_options
			.iter()
			.find(|option| same_datetime(option, datetime))
			.cloned()
			.ok_or_else(|| {
				Error::IncompleteSelection(format!("datetime {} was not offered", datetime))
			});
	}

	let Some(fixed) = details.datetime_confirmed.as_deref() else {
		return Err(Error::IncompleteSelection("no datetime was proposed".into()));
	};
	match datetime {
		Some(datetime) if !same_datetime(fixed, datetime) => Err(Error::IncompleteSelection(
			format!("datetime {} does not match the proposed {}", datetime, fixed),
		)),
		_ => Ok(fixed.to_string()),
	}
}

fn selected_platform(
	details: &AppointmentSchedulingDetails,
	platform: Option<&str>,
) -> ClResult<Option<String>> {
	if details.appointment_type == AppointmentType::InPerson {
		return Ok(None);
	}

	let options = &details.platform_options;
	match non_empty(platform) {
		Some(platform) if options.is_empty() => Ok(Some(platform.to_string())),
		Some(platform) => options
			.iter()
			.find(|option| option.eq_ignore_ascii_case(platform))
			.map(|option| Some(option.clone()))
			.ok_or_else(|| {
				Error::IncompleteSelection(format!("platform {} was not offered", platform))
			}),
		// A fixed proposal with a single platform leaves nothing to choose
		None if details.appointment_mode.is_fixed() && options.len() == 1 => {
			Ok(options.first().cloned())
		}
		None => Err(Error::IncompleteSelection("a platform must be selected".into())),
	}
}

/// Customer picks (or accepts) a datetime and, for online meetings, a platform
pub fn select_and_confirm(
	details: &AppointmentSchedulingDetails,
	datetime: Option<&str>,
	platform: Option<&str>,
) -> ClResult<AppointmentSchedulingDetails> {
	guard(details, &[ConfirmationStatus::PendingCustomer], "select_and_confirm")?;
	let datetime_confirmed = selected_datetime(details, datetime)?;
	let platform_confirmed = selected_platform(details, platform)?;

	Ok(AppointmentSchedulingDetails {
		confirmation_status: ConfirmationStatus::Confirmed,
		datetime_confirmed: Some(datetime_confirmed),
		platform_confirmed,
		datetimes_options: Vec::new(),
		platform_options: Vec::new(),
		..details.clone()
	})
}

/// Customer declines every offered option
pub fn reject(details: &AppointmentSchedulingDetails) -> ClResult<AppointmentSchedulingDetails> {
	guard(details, &[ConfirmationStatus::PendingCustomer], "reject")?;
	Ok(AppointmentSchedulingDetails {
		confirmation_status: ConfirmationStatus::Rejected,
		datetimes_options: Vec::new(),
		platform_options: Vec::new(),
		..details.clone()
	})
}

/// Customer asks to move a confirmed appointment.
///
/// The confirmed datetime and platform stay for display; they are stale from now on.
pub fn request_reschedule(
	details: &AppointmentSchedulingDetails,
	reason: &str,
) -> ClResult<AppointmentSchedulingDetails> {
	guard(details, &[ConfirmationStatus::Confirmed], "request_reschedule")?;
	let Some(reason) = non_empty(Some(reason)) else {
		return Err(Error::ValidationFailed(vec!["reschedule_reason".into()]));
	};
	Ok(AppointmentSchedulingDetails {
		confirmation_status: ConfirmationStatus::Rescheduled,
		reschedule_reason: Some(reason.to_string()),
		..details.clone()
	})
}

/// Business calls the appointment off
pub fn cancel(details: &AppointmentSchedulingDetails) -> ClResult<AppointmentSchedulingDetails> {
	guard(
		details,
		&[ConfirmationStatus::PendingCustomer, ConfirmationStatus::Confirmed],
		"cancel",
	)?;
	Ok(AppointmentSchedulingDetails {
		confirmation_status: ConfirmationStatus::Cancelled,
		datetimes_options: Vec::new(),
		platform_options: Vec::new(),
		..details.clone()
	})
}

/// Link the calendar record booked for a confirmed appointment
pub fn attach_appointment(
	details: &AppointmentSchedulingDetails,
	appointment_id: &str,
) -> ClResult<AppointmentSchedulingDetails> {
	guard(details, &[ConfirmationStatus::Confirmed], "attach_appointment")?;
	Ok(AppointmentSchedulingDetails {
		appointment_id: Some(appointment_id.to_string()),
		..details.clone()
	})
}

/// Build the follow-up proposal for a rescheduled appointment.
///
/// Title, type and address carry over unless `raw` overrides them; the option set
/// comes from `raw`. A previously confirmed platform is offered again when `raw`
/// names none.
pub fn next_round(
	previous: &AppointmentSchedulingDetails,
	raw: &Value,
	ctx: &TransformCtx<'_>,
) -> ClResult<AppointmentSchedulingDetails> {
	guard(previous, &[ConfirmationStatus::Rescheduled], "propose_new_round")?;

	let mut input: Map<String, Value> = synonyms::normalize_fields(
		ActionKind::AppointmentScheduling,
		&transform::unwrap_envelope(raw),
	);
	for key in ["confirmation_status", "appointment_id", "reschedule_reason"] {
		input.remove(key);
	}

	let offer_platform = input.get("platform_confirmed").is_none_or(Value::is_null);
	let mut carry = |key: &str, value: Option<Value>| {
		if let Some(value) = value {
			if input.get(key).is_none_or(Value::is_null) {
				input.insert(key.to_string(), value);
			}
		}
	};
	carry("appointment_title", Some(Value::from(previous.appointment_title.clone())));
	carry("appointment_type", Some(Value::from(previous.appointment_type.as_str())));
	carry("address", previous.address.clone().map(Value::from));
	if offer_platform {
		carry(
			"platform_options",
			previous.platform_confirmed.clone().map(|p| Value::from(vec![p])),
		);
	}

	Ok(transform::appointment_from(&input, ctx))
}


// vim: ts=4
