//! Canonical payload of `appointment_scheduling` actions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
	#[default]
	Online,
	InPerson,
}

impl AppointmentType {
	pub fn as_str(&self) -> &'static str {
		match self {
			AppointmentType::Online => "online",
			AppointmentType::InPerson => "in_person",
		}
	}
}

/// Governs which of the date/platform fields are meaningful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentMode {
	/// Business set the date, customer only acknowledges it
	FixedConfirmed,
	/// Business set the date, customer must confirm it
	FixedPendingConfirmation,
	/// Customer picks one of `datetimes_options`
	MultipleChoice,
}

impl AppointmentMode {
	pub fn is_fixed(&self) -> bool {
		!matches!(self, AppointmentMode::MultipleChoice)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationStatus {
	#[default]
	PendingCustomer,
	Confirmed,
	Cancelled,
	Rejected,
	Rescheduled,
}

impl ConfirmationStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			ConfirmationStatus::PendingCustomer => "pending_customer",
			ConfirmationStatus::Confirmed => "confirmed",
			ConfirmationStatus::Cancelled => "cancelled",
			ConfirmationStatus::Rejected => "rejected",
			ConfirmationStatus::Rescheduled => "rescheduled",
		}
	}
}

impl std::fmt::Display for ConfirmationStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentSchedulingDetails {
	pub appointment_title: String,
	pub appointment_type: AppointmentType,
	pub appointment_mode: AppointmentMode,
	pub address: Option<String>,
	pub confirmation_status: ConfirmationStatus,
	/// ISO datetimes offered while `pending_customer` in `multiple_choice` mode
	#[serde(default)]
	pub datetimes_options: Vec<String>,
	pub datetime_confirmed: Option<String>,
	/// Online meeting platforms offered while `pending_customer`
	#[serde(default)]
	pub platform_options: Vec<String>,
	pub platform_confirmed: Option<String>,
	/// Calendar record created on confirmation
	pub appointment_id: Option<String>,
	pub reschedule_reason: Option<String>,
}

// vim: ts=4
