//! Shared test doubles for the commit workflow tests

#![allow(dead_code)]

use async_trait::async_trait;
use flume::Receiver;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use serviceboard_action::events::ChannelEventSink;
use serviceboard_action::service::{BoardActionService, NewBoardAction};
use serviceboard_action::{ActionKind, ActionSettings};
use serviceboard_store_memory::MemoryBoardStore;
use serviceboard_types::board_store::{
	BoardAction, BoardActionStore, CreateBoardAction, ListActionOptions, UpdateBoardAction,
};
use serviceboard_types::calendar::{AppointmentBooking, AppointmentCalendar};
use serviceboard_types::error::{ClResult, Error};
use serviceboard_types::event::ActionEvent;

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

/// Calendar that records every call
#[derive(Debug, Default)]
pub struct FakeCalendar {
	next_id: AtomicU32,
	pub fail_create: AtomicBool,
	pub booked: Mutex<Vec<AppointmentBooking>>,
	pub cancelled: Mutex<Vec<String>>,
	pub deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl AppointmentCalendar for FakeCalendar {
	async fn create_appointment(&self, booking: &AppointmentBooking) -> ClResult<Box<str>> {
		if self.fail_create.load(Ordering::SeqCst) {
			return Err(Error::Internal("calendar unavailable".into()));
		}
		let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
		self.booked.lock().unwrap().push(booking.clone());
		Ok(format!("cal-{}", id).into())
	}

	async fn cancel_appointment(&self, appointment_id: &str) -> ClResult<()> {
		self.cancelled.lock().unwrap().push(appointment_id.to_string());
		Ok(())
	}

	async fn delete_appointment(&self, appointment_id: &str) -> ClResult<()> {
		self.deleted.lock().unwrap().push(appointment_id.to_string());
		Ok(())
	}
}

/// Memory store whose updates can be switched to fail
#[derive(Debug, Default)]
pub struct FlakyStore {
	pub inner: MemoryBoardStore,
	pub fail_updates: AtomicBool,
	/// Served by `read_action` instead of the current record while set
	pub stale_read: Mutex<Option<BoardAction>>,
}

#[async_trait]
impl BoardActionStore for FlakyStore {
	async fn create_action(&self, action: &CreateBoardAction) -> ClResult<BoardAction> {
		self.inner.create_action(action).await
	}

	async fn read_action(&self, action_id: &str) -> ClResult<BoardAction> {
		let stale = self.stale_read.lock().unwrap().clone();
		match stale {
			Some(record) if &*record.action_id == action_id => Ok(record),
			_ => self.inner.read_action(action_id).await,
		}
	}

	async fn update_action(
		&self,
		action_id: &str,
		update: &UpdateBoardAction,
	) -> ClResult<BoardAction> {
		if self.fail_updates.load(Ordering::SeqCst) {
			return Err(Error::Internal("disk full".into()));
		}
		self.inner.update_action(action_id, update).await
	}

	async fn list_actions(
		&self,
		board_id: &str,
		opts: &ListActionOptions,
	) -> ClResult<Vec<BoardAction>> {
		self.inner.list_actions(board_id, opts).await
	}
}

pub struct TestEnv {
	pub service: BoardActionService,
	pub store: Arc<FlakyStore>,
	pub calendar: Arc<FakeCalendar>,
	pub events: Receiver<ActionEvent>,
}

impl TestEnv {
	pub fn new() -> Self {
		setup_test_logging();
		let store = Arc::new(FlakyStore::default());
		let calendar = Arc::new(FakeCalendar::default());
		let (sink, events) = ChannelEventSink::new();
		let service = BoardActionService::new(
			store.clone(),
			calendar.clone(),
			Arc::new(sink),
			ActionSettings::default(),
		);
		Self { service, store, calendar, events }
	}

	/// Events emitted so far, oldest first
	pub fn drain_events(&self) -> Vec<ActionEvent> {
		self.events.drain().collect()
	}
}

pub fn new_action(kind: ActionKind, details: serde_json::Value) -> NewBoardAction {
	NewBoardAction {
		board_id: "board-1".into(),
		action_type: kind,
		action_title: "Test action".into(),
		action_description: None,
		action_details: details,
	}
}

// vim: ts=4
