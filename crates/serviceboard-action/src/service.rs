//! Commit workflow around the pure pipelines.
//!
//! Every write follows the same path: load the stored record, parse its typed
//! payload, compute the next payload, validate it, merge-write the difference
//! with the loaded version as precondition, and emit a notification built from
//! what the store returned. Side effects on the calendar that happen before
//! the write are compensated when the write fails.

use serde_json::Value;
use std::sync::Arc;

use crate::appointment::{self, AppointmentEvent};
use crate::details::*;
use crate::merge;
use crate::prelude::*;
use crate::respond::{self, ActionResponse};
use crate::settings::{ActionSettings, TransformCtx};
use crate::transform::{self, synonyms};
use crate::validate;
use serviceboard_types::board_store::{
	BoardAction, BoardActionStore, CreateBoardAction, ListActionOptions, UpdateBoardAction,
};
use serviceboard_types::calendar::{AppointmentBooking, AppointmentCalendar};
use serviceboard_types::event::{ActionEvent, ActionEventKind, ActionEventSink};
use serviceboard_types::types;

/// Business-side input for a new action card
#[derive(Debug, Clone)]
pub struct NewBoardAction {
	pub board_id: Box<str>,
	pub action_type: ActionKind,
	pub action_title: Box<str>,
	pub action_description: Option<Box<str>>,
	/// Raw form input, transformed before anything is stored
	pub action_details: Value,
}

/// Store failures surface as `StoreFailure`, except the ones callers act on
fn store_err(err: Error) -> Error {
	match err {
		Error::NotFound | Error::Conflict | Error::StoreFailure(_) => err,
		other => Error::StoreFailure(other.to_string()),
	}
}

#[derive(Debug, Clone)]
pub struct BoardActionService {
	store: Arc<dyn BoardActionStore>,
	calendar: Arc<dyn AppointmentCalendar>,
	events: Arc<dyn ActionEventSink>,
	settings: Arc<ActionSettings>,
}

impl BoardActionService {
	pub fn new(
		store: Arc<dyn BoardActionStore>,
		calendar: Arc<dyn AppointmentCalendar>,
		events: Arc<dyn ActionEventSink>,
		settings: ActionSettings,
	) -> Self {
		Self { store, calendar, events, settings: Arc::new(settings) }
	}

	pub fn settings(&self) -> &ActionSettings {
		&self.settings
	}

	fn ctx(&self) -> TransformCtx<'_> {
		TransformCtx::new(&self.settings)
	}

	/// Read a record together with its typed payload
	pub async fn load(&self, action_id: &str) -> ClResult<(BoardAction, ActionDetails)> {
		let record = self.store.read_action(action_id).await.map_err(store_err)?;
		let details = ActionDetails::from_value(record.action_type, &record.action_details)
			.inspect_err(|err| {
				warn!(
					action_id,
					action_type = %record.action_type,
					%err,
					"stored payload is not canonical"
				);
			})?;
		Ok((record, details))
	}

	pub async fn list_actions(
		&self,
		board_id: &str,
		opts: &ListActionOptions,
	) -> ClResult<Vec<BoardAction>> {
		self.store.list_actions(board_id, opts).await.map_err(store_err)
	}

	/// Transform, validate and store a new action, then announce it
	pub async fn create_action(&self, new: &NewBoardAction) -> ClResult<BoardAction> {
		let details = transform::transform(new.action_type, &new.action_details, &self.ctx());
		let payload = details.to_value()?;
		validate::ensure_valid(new.action_type, &payload)?;

		let record = self
			.store
			.create_action(&CreateBoardAction {
				board_id: new.board_id.clone(),
				action_type: new.action_type,
				action_title: new.action_title.clone(),
				action_description: new.action_description.clone(),
				action_details: payload,
				action_status: details.coarse_status(),
				is_customer_action_required: details.requires_customer_action(),
			})
			.await
			.map_err(store_err)?;
		info!(
			action_id = %record.action_id,
			board_id = %record.board_id,
			action_type = %record.action_type,
			"action created"
		);

		self.emit(&record, ActionEventKind::ActionCreated).await;
		Ok(record)
	}

	/// Store a partially filled action without validating it.
	///
	/// Drafts are invisible to the customer until [`Self::publish_draft`].
	pub async fn create_draft(&self, new: &NewBoardAction) -> ClResult<BoardAction> {
		let details = transform::transform(new.action_type, &new.action_details, &self.ctx());
		let record = self
			.store
			.create_action(&CreateBoardAction {
				board_id: new.board_id.clone(),
				action_type: new.action_type,
				action_title: new.action_title.clone(),
				action_description: new.action_description.clone(),
				action_details: details.to_value()?,
				action_status: ActionStatus::Draft,
				is_customer_action_required: false,
			})
			.await
			.map_err(store_err)?;
		debug!(action_id = %record.action_id, "draft created");
		Ok(record)
	}

	/// Fold more raw input into a draft. Canonical fields present in `raw` win.
	pub async fn update_draft(&self, action_id: &str, raw: &Value) -> ClResult<BoardAction> {
		let record = self.store.read_action(action_id).await.map_err(store_err)?;
		Self::require_draft(&record, "update_draft")?;

		// Resolve historical names first, the stored payload holds every canonical key
		let raw = transform::unwrap_envelope(raw);
		let patch = synonyms::normalize_fields(record.action_type, &raw);
		let mut input = record.action_details.clone();
		merge::shallow_merge(&mut input, &Value::Object(patch))?;
		let details = transform::transform(record.action_type, &input, &self.ctx());
		let payload = details.to_value()?;

		let update = UpdateBoardAction {
			action_details: Some(merge::diff_patch(&record.action_details, &payload)),
			expected_version: Some(record.version),
			..Default::default()
		};
		self.store.update_action(&record.action_id, &update).await.map_err(store_err)
	}

	/// Validate a draft and make it visible to the customer
	pub async fn publish_draft(&self, action_id: &str) -> ClResult<BoardAction> {
		let record = self.store.read_action(action_id).await.map_err(store_err)?;
		Self::require_draft(&record, "publish_draft")?;

		let details = transform::transform(record.action_type, &record.action_details, &self.ctx());
		let record = self.commit(&record, &details, None).await?;
		info!(action_id = %record.action_id, "draft published");

		self.emit(&record, ActionEventKind::ActionPublished).await;
		Ok(record)
	}

	fn require_draft(record: &BoardAction, transition: &'static str) -> ClResult<()> {
		if record.action_status == ActionStatus::Draft {
			Ok(())
		} else {
			Err(Error::InvalidStateTransition {
				from: record.action_status.as_str().to_string(),
				transition,
			})
		}
	}

	/// Drafts and withdrawn actions accept no interaction
	fn require_open(record: &BoardAction, transition: &'static str) -> ClResult<()> {
		match record.action_status {
			ActionStatus::Draft | ActionStatus::Cancelled => Err(Error::InvalidStateTransition {
				from: record.action_status.as_str().to_string(),
				transition,
			}),
			ActionStatus::Pending | ActionStatus::Completed => Ok(()),
		}
	}

	/// Validate `next`, then merge-write it over `record` with the record's
	/// version as precondition.
	async fn commit(
		&self,
		record: &BoardAction,
		next: &ActionDetails,
		status: Option<ActionStatus>,
	) -> ClResult<BoardAction> {
		let payload = next.to_value()?;
		validate::ensure_valid(record.action_type, &payload)?;

		let action_status = status.unwrap_or_else(|| next.coarse_status());
		let is_customer_action_required =
			action_status != ActionStatus::Cancelled && next.requires_customer_action();
		let update = UpdateBoardAction {
			action_details: Some(merge::diff_patch(&record.action_details, &payload)),
			action_status: Patch::Value(action_status),
			is_customer_action_required: Patch::Value(is_customer_action_required),
			expected_version: Some(record.version),
			..Default::default()
		};

		let updated = self.store.update_action(&record.action_id, &update).await.map_err(|err| {
			if err == Error::Conflict {
				warn!(
					action_id = %record.action_id,
					version = record.version,
					"stale write rejected"
				);
			}
			store_err(err)
		})?;
		info!(
			action_id = %updated.action_id,
			version = updated.version,
			action_status = %updated.action_status.as_str(),
			"action committed"
		);
		Ok(updated)
	}

	/// Notify about a committed record. Delivery failures are logged, the commit stands.
	async fn emit(&self, record: &BoardAction, kind: ActionEventKind) {
		// Merge patches drop null fields, so rebuild the full canonical document
		let details = ActionDetails::from_value(record.action_type, &record.action_details)
			.and_then(|details| details.to_value())
			.unwrap_or_else(|_| record.action_details.clone());
		let event = ActionEvent {
			action_id: record.action_id.clone(),
			board_id: record.board_id.clone(),
			action_type: record.action_type,
			kind,
			details,
			at: types::now(),
		};
		if let Err(err) = self.events.notify(&event).await {
			warn!(action_id = %record.action_id, %kind, %err, "event delivery failed");
		}
	}

	async fn load_appointment(
		&self,
		action_id: &str,
		transition: &'static str,
	) -> ClResult<(BoardAction, AppointmentSchedulingDetails)> {
		let (record, details) = self.load(action_id).await?;
		Self::require_open(&record, transition)?;
		match details {
			ActionDetails::AppointmentScheduling(appointment) => Ok((record, appointment)),
			other => Err(Error::InvalidStateTransition { from: other.status_label(), transition }),
		}
	}

	/// Run one appointment transition through the full commit path
	pub async fn transition_appointment(
		&self,
		action_id: &str,
		event: &AppointmentEvent,
	) -> ClResult<BoardAction> {
		let (record, current) = self.load_appointment(action_id, event.name()).await?;
		let mut next = event.apply(&current)?;

		// Book first so that the committed payload already links the booking
		let booked = if matches!(event, AppointmentEvent::SelectAndConfirm { .. }) {
			let booking = AppointmentBooking {
				action_id: record.action_id.clone(),
				board_id: record.board_id.clone(),
				title: next.appointment_title.clone().into(),
				datetime: next.datetime_confirmed.clone().unwrap_or_default().into(),
				platform: next.platform_confirmed.clone().map(Into::into),
				address: next.address.clone().map(Into::into),
			};
			let appointment_id = self.calendar.create_appointment(&booking).await?;
			next = appointment::attach_appointment(&next, &appointment_id)?;
			Some(appointment_id)
		} else {
			None
		};

		let committed =
			self.commit(&record, &ActionDetails::AppointmentScheduling(next), None).await;
		let record = match committed {
			Ok(record) => record,
			Err(err) => {
				if let Some(appointment_id) = booked {
					if let Err(undo) = self.calendar.delete_appointment(&appointment_id).await {
						error!(
							action_id,
							%appointment_id,
							err = %undo,
							"orphaned calendar appointment"
						);
					}
				}
				return Err(err);
			}
		};

		// A cancelled confirmed appointment also frees its calendar slot
		if matches!(event, AppointmentEvent::Cancel)
			&& current.confirmation_status == ConfirmationStatus::Confirmed
		{
			if let Some(appointment_id) = current.appointment_id.as_deref() {
				if let Err(err) = self.calendar.cancel_appointment(appointment_id).await {
					error!(action_id, appointment_id, %err, "calendar cancel failed");
				}
			}
		}

		self.emit(&record, event.event_kind()).await;
		Ok(record)
	}

	pub async fn select_and_confirm(
		&self,
		action_id: &str,
		datetime: Option<&str>,
		platform: Option<&str>,
	) -> ClResult<BoardAction> {
		let event = AppointmentEvent::SelectAndConfirm {
			datetime: datetime.map(str::to_string),
			platform: platform.map(str::to_string),
		};
		self.transition_appointment(action_id, &event).await
	}

	pub async fn reject_appointment(&self, action_id: &str) -> ClResult<BoardAction> {
		self.transition_appointment(action_id, &AppointmentEvent::Reject).await
	}

	pub async fn request_reschedule(&self, action_id: &str, reason: &str) -> ClResult<BoardAction> {
		let event = AppointmentEvent::RequestReschedule { reason: reason.to_string() };
		self.transition_appointment(action_id, &event).await
	}

	pub async fn cancel_appointment(&self, action_id: &str) -> ClResult<BoardAction> {
		self.transition_appointment(action_id, &AppointmentEvent::Cancel).await
	}

	/// Open a new proposal round for a rescheduled appointment.
	///
	/// The rescheduled action stays as history; the new round is a new action on
	/// the same board.
	pub async fn propose_new_round(&self, action_id: &str, raw: &Value) -> ClResult<BoardAction> {
		let (record, previous) = self.load_appointment(action_id, "propose_new_round").await?;
		let proposal = appointment::next_round(&previous, raw, &self.ctx())?;
		let details = ActionDetails::AppointmentScheduling(proposal);
		let payload = details.to_value()?;
		validate::ensure_valid(ActionKind::AppointmentScheduling, &payload)?;

		let created = self
			.store
			.create_action(&CreateBoardAction {
				board_id: record.board_id.clone(),
				action_type: ActionKind::AppointmentScheduling,
				action_title: record.action_title.clone(),
				action_description: record.action_description.clone(),
				action_details: payload,
				action_status: details.coarse_status(),
				is_customer_action_required: details.requires_customer_action(),
			})
			.await
			.map_err(store_err)?;
		info!(
			action_id = %created.action_id,
			previous = %record.action_id,
			"new appointment round proposed"
		);

		self.emit(&created, ActionEventKind::ActionCreated).await;
		Ok(created)
	}

	/// Apply a generic response through the full commit path
	pub async fn respond(
		&self,
		action_id: &str,
		response: &ActionResponse,
	) -> ClResult<BoardAction> {
		let (record, details) = self.load(action_id).await?;
		Self::require_open(&record, response.name())?;

		if details.kind() == ActionKind::AppointmentScheduling
			&& matches!(response, ActionResponse::Cancel)
		{
			return self.transition_appointment(action_id, &AppointmentEvent::Cancel).await;
		}

		let transition = respond::respond(&details, response, self.ctx().now)?;
		let status = matches!(response, ActionResponse::Cancel).then_some(ActionStatus::Cancelled);
		let record = self.commit(&record, &transition.details, status).await?;

		self.emit(&record, transition.event).await;
		Ok(record)
	}
}

// vim: ts=4
