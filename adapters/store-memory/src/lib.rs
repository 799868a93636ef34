//! In-memory Board Action Store.
//!
//! Keeps every action card in a map behind a lock. `action_details` updates are
//! merged into the stored document and guarded by the record version, the same
//! contract a database-backed store implements.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use serviceboard_types::{
	board_store::{
		BoardAction, BoardActionStore, CreateBoardAction, ListActionOptions, UpdateBoardAction,
	},
	merge,
	prelude::*,
	types::now,
	utils::random_id,
};

#[derive(Debug)]
struct Entry {
	/// Insertion order, breaks ties between equal creation timestamps
	seq: u64,
	action: BoardAction,
}

#[derive(Debug, Default)]
struct Inner {
	next_seq: u64,
	actions: HashMap<Box<str>, Entry>,
}

#[derive(Debug, Default)]
pub struct MemoryBoardStore {
	inner: RwLock<Inner>,
}

impl MemoryBoardStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.inner.read().actions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

fn is_listed(action: &BoardAction, opts: &ListActionOptions) -> bool {
	opts.action_type.as_ref().is_none_or(|types| types.contains(&action.action_type))
		&& opts
			.action_status
			.as_ref()
			.is_none_or(|statuses| statuses.contains(&action.action_status))
		&& opts
			.customer_action_required
			.is_none_or(|required| required == action.is_customer_action_required)
}

#[async_trait]
impl BoardActionStore for MemoryBoardStore {
	async fn create_action(&self, action: &CreateBoardAction) -> ClResult<BoardAction> {
		let created_at = now();
		let record = BoardAction {
			action_id: random_id().into(),
			board_id: action.board_id.clone(),
			action_type: action.action_type,
			action_title: action.action_title.clone(),
			action_description: action.action_description.clone(),
			action_details: action.action_details.clone(),
			action_status: action.action_status,
			is_customer_action_required: action.is_customer_action_required,
			version: 1,
			created_at,
			updated_at: created_at,
		};

		let mut inner = self.inner.write();
		inner.next_seq += 1;
		let seq = inner.next_seq;
		inner.actions.insert(record.action_id.clone(), Entry { seq, action: record.clone() });
		debug!(action_id = %record.action_id, board_id = %record.board_id, "action stored");
		Ok(record)
	}

	async fn read_action(&self, action_id: &str) -> ClResult<BoardAction> {
		self.inner.read().actions.get(action_id).map(|e| e.action.clone()).ok_or(Error::NotFound)
	}

	async fn update_action(
		&self,
		action_id: &str,
		update: &UpdateBoardAction,
	) -> ClResult<BoardAction> {
		let mut inner = self.inner.write();
		let entry = inner.actions.get_mut(action_id).ok_or(Error::NotFound)?;
		let current = &entry.action;

		if let Some(expected) = update.expected_version {
			if expected != current.version {
				debug!(action_id, expected, stored = current.version, "version mismatch");
				return Err(Error::Conflict);
			}
		}

		// Build the new record aside so a failed merge leaves the stored one untouched
		let mut next = current.clone();
		if let Some(patch) = &update.action_details {
			merge::shallow_merge(&mut next.action_details, patch)?;
		}
		update.action_title.clone().apply_required(&mut next.action_title);
		update.action_description.clone().apply_to(&mut next.action_description);
		update.action_status.clone().apply_required(&mut next.action_status);
		update
			.is_customer_action_required
			.clone()
			.apply_required(&mut next.is_customer_action_required);
		next.version += 1;
		next.updated_at = now();

		entry.action = next.clone();
		Ok(next)
	}

	async fn list_actions(
		&self,
		board_id: &str,
		opts: &ListActionOptions,
	) -> ClResult<Vec<BoardAction>> {
		let inner = self.inner.read();
		let mut found: Vec<&Entry> = inner
			.actions
			.values()
			.filter(|e| &*e.action.board_id == board_id && is_listed(&e.action, opts))
			.collect();
		found.sort_by(|a, b| {
			b.action.created_at.cmp(&a.action.created_at).then_with(|| b.seq.cmp(&a.seq))
		});
		Ok(found.into_iter().map(|e| e.action.clone()).collect())
	}
}

// vim: ts=4
