//! Builder of the appointment-scheduling canonical payload.

use super::coerce::Fields;
use super::synonyms::*;
use crate::details::*;
use crate::settings::TransformCtx;

pub(crate) fn appointment(f: Fields<'_>, ctx: &TransformCtx<'_>) -> AppointmentSchedulingDetails {
	let appointment_type = f
		.enum_of("appointment_type", APPOINTMENT_TYPE_VALUES)
		.unwrap_or(ctx.settings.default_appointment_type);
	let confirmation_status: ConfirmationStatus =
		f.enum_of("confirmation_status", CONFIRMATION_STATUS_VALUES).unwrap_or_default();

	let mut datetimes_options = f.string_list("datetimes_options");
	let mut datetime_confirmed = f.string("datetime_confirmed");
	let mut platform_options = f.string_list("platform_options");
	let mut platform_confirmed = f.string("platform_confirmed");

	let appointment_mode =
		f.enum_of("appointment_mode", APPOINTMENT_MODE_VALUES).unwrap_or_else(|| {
			if datetimes_options.is_empty() {
				AppointmentMode::FixedPendingConfirmation
			} else {
				AppointmentMode::MultipleChoice
			}
		});

	if appointment_mode.is_fixed() {
		// A single offered date on a fixed proposal is the fixed date
		if datetime_confirmed.is_none() && datetimes_options.len() == 1 {
			datetime_confirmed = datetimes_options.pop();
		}
		datetimes_options.clear();
	}

	if confirmation_status == ConfirmationStatus::PendingCustomer {
		if appointment_mode == AppointmentMode::MultipleChoice {
			datetime_confirmed = None;
		}
		// Nothing is agreed yet, a pre-set platform is just one more option
		if let Some(platform) = platform_confirmed.take() {
			if !platform_options.iter().any(|p| p.eq_ignore_ascii_case(&platform)) {
				platform_options.push(platform);
			}
		}
	} else {
		datetimes_options.clear();
		platform_options.clear();
	}

	if appointment_type == AppointmentType::InPerson {
		platform_options.clear();
		platform_confirmed = None;
	}

	AppointmentSchedulingDetails {
		appointment_title: f.string("appointment_title").unwrap_or_default(),
		appointment_type,
		appointment_mode,
		address: f.string("address"),
		confirmation_status,
		datetimes_options,
		datetime_confirmed,
		platform_options,
		platform_confirmed,
		appointment_id: f.string("appointment_id"),
		reschedule_reason: f.string("reschedule_reason"),
	}
}

// vim: ts=4
