//! Notification sinks.

use async_trait::async_trait;
use flume::{Receiver, Sender};

use crate::prelude::*;
use serviceboard_types::event::{ActionEvent, ActionEventSink};

/// Forwards every event over an unbounded channel to a notification worker
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
	tx: Sender<ActionEvent>,
}

impl ChannelEventSink {
	pub fn new() -> (Self, Receiver<ActionEvent>) {
		let (tx, rx) = flume::unbounded();
		(Self { tx }, rx)
	}
}

#[async_trait]
impl ActionEventSink for ChannelEventSink {
	async fn notify(&self, event: &ActionEvent) -> ClResult<()> {
		self.tx.send_async(event.clone()).await.map_err(|_| {
			Error::Internal(format!("notification channel closed, dropping {}", event.kind))
		})
	}
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

#[async_trait]
impl ActionEventSink for NullEventSink {
	async fn notify(&self, event: &ActionEvent) -> ClResult<()> {
		debug!(action_id = %event.action_id, kind = %event.kind, "event dropped");
		Ok(())
	}
}


// vim: ts=4
