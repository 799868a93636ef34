//! Board Action Store adapter trait and record types.
//!
//! A store persists one row per action card. `action_details` is an opaque JSON
//! document here; its shape is owned by the action framework.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::prelude::*;

/// A persisted action card
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardAction {
	pub action_id: Box<str>,
	pub board_id: Box<str>,
	pub action_type: ActionKind,
	pub action_title: Box<str>,
	pub action_description: Option<Box<str>>,
	pub action_details: serde_json::Value,
	pub action_status: ActionStatus,
	pub is_customer_action_required: bool,
	/// Incremented by every successful update
	pub version: u64,
	pub created_at: Timestamp,
	pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateBoardAction {
	pub board_id: Box<str>,
	pub action_type: ActionKind,
	pub action_title: Box<str>,
	pub action_description: Option<Box<str>>,
	pub action_details: serde_json::Value,
	pub action_status: ActionStatus,
	pub is_customer_action_required: bool,
}

/// Partial update of an action card.
///
/// `action_details` is merged into the stored document, never swapped in whole.
#[derive(Debug, Clone, Default)]
pub struct UpdateBoardAction {
	pub action_title: Patch<Box<str>>,
	pub action_description: Patch<Box<str>>,
	pub action_details: Option<serde_json::Value>,
	pub action_status: Patch<ActionStatus>,
	pub is_customer_action_required: Patch<bool>,
	/// Reject the write with `Error::Conflict` unless the stored version matches
	pub expected_version: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct ListActionOptions {
	pub action_type: Option<Vec<ActionKind>>,
	pub action_status: Option<Vec<ActionStatus>>,
	pub customer_action_required: Option<bool>,
}

#[async_trait]
pub trait BoardActionStore: Debug + Send + Sync {
	/// Creates an action card, assigning its id and timestamps
	async fn create_action(&self, action: &CreateBoardAction) -> ClResult<BoardAction>;

	/// Reads an action card by id. Returns `Error::NotFound` if missing
	async fn read_action(&self, action_id: &str) -> ClResult<BoardAction>;

	/// Applies a partial update and returns the updated record
	async fn update_action(
		&self,
		action_id: &str,
		update: &UpdateBoardAction,
	) -> ClResult<BoardAction>;

	/// Lists the actions of a board, newest first
	async fn list_actions(
		&self,
		board_id: &str,
		opts: &ListActionOptions,
	) -> ClResult<Vec<BoardAction>>;
}

// vim: ts=4
