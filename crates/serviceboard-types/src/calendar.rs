//! Calendar collaborator used when an appointment gets confirmed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::prelude::*;

/// Data needed to book a calendar appointment for a confirmed action
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentBooking {
	pub action_id: Box<str>,
	pub board_id: Box<str>,
	pub title: Box<str>,
	/// Agreed ISO datetime
	pub datetime: Box<str>,
	pub platform: Option<Box<str>>,
	pub address: Option<Box<str>>,
}

#[async_trait]
pub trait AppointmentCalendar: Debug + Send + Sync {
	/// Books the appointment and returns the calendar record id
	async fn create_appointment(&self, booking: &AppointmentBooking) -> ClResult<Box<str>>;

	/// Marks a booked appointment as cancelled
	async fn cancel_appointment(&self, appointment_id: &str) -> ClResult<()>;

	/// Removes a booking that was never committed (compensation path)
	async fn delete_appointment(&self, appointment_id: &str) -> ClResult<()>;
}

// vim: ts=4
