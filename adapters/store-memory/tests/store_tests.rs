//! Memory store contract tests
//!
//! Covers creation, merge updates, optimistic concurrency and listing

use serde_json::json;
use serviceboard_store_memory::MemoryBoardStore;
use serviceboard_types::action_types::{ActionKind, ActionStatus};
use serviceboard_types::board_store::{
	BoardActionStore, CreateBoardAction, ListActionOptions, UpdateBoardAction,
};
use serviceboard_types::error::Error;
use serviceboard_types::types::Patch;

fn new_action(board_id: &str, kind: ActionKind, details: serde_json::Value) -> CreateBoardAction {
	CreateBoardAction {
		board_id: board_id.into(),
		action_type: kind,
		action_title: "Test action".into(),
		action_description: None,
		action_details: details,
		action_status: ActionStatus::Pending,
		is_customer_action_required: true,
	}
}

#[tokio::test]
async fn test_create_and_read() {
	let store = MemoryBoardStore::new();
	let created = store
		.create_action(&new_action(
			"b1",
			ActionKind::ResourceLink,
			json!({"url": "https://example.com"}),
		))
		.await
		.unwrap();
	assert_eq!(created.version, 1);
	assert!(!created.action_id.is_empty());

	let read = store.read_action(&created.action_id).await.unwrap();
	assert_eq!(read, created);
	assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_read_missing() {
	let store = MemoryBoardStore::new();
	assert_eq!(store.read_action("nope").await, Err(Error::NotFound));
	let res = store.update_action("nope", &UpdateBoardAction::default()).await;
	assert_eq!(res, Err(Error::NotFound));
}

#[tokio::test]
async fn test_update_merges_details() {
	let store = MemoryBoardStore::new();
	let created = store
		.create_action(&new_action(
			"b1",
			ActionKind::PaymentRequest,
			json!({
				"amount": 10,
				"currency": "EUR",
				"payment_status": "pending",
				"due_date": "2025-02-01"
			}),
		))
		.await
		.unwrap();

	let update = UpdateBoardAction {
		action_details: Some(json!({"payment_status": "completed", "due_date": null})),
		action_status: Patch::Value(ActionStatus::Completed),
		is_customer_action_required: Patch::Value(false),
		..Default::default()
	};
	let updated = store.update_action(&created.action_id, &update).await.unwrap();

	assert_eq!(
		updated.action_details,
		json!({"amount": 10, "currency": "EUR", "payment_status": "completed"})
	);
	assert_eq!(updated.action_status, ActionStatus::Completed);
	assert!(!updated.is_customer_action_required);
	assert_eq!(updated.version, 2);
	assert_eq!(updated.action_title, created.action_title);
}

#[tokio::test]
async fn test_stale_version_is_rejected() {
	let store = MemoryBoardStore::new();
	let created = store
		.create_action(&new_action("b1", ActionKind::GenericMessage, json!({"message": "Hi"})))
		.await
		.unwrap();

	let first = UpdateBoardAction {
		action_details: Some(json!({"is_acknowledged": true})),
		expected_version: Some(created.version),
		..Default::default()
	};
	store.update_action(&created.action_id, &first).await.unwrap();

	// A second writer that loaded the same version loses
	let second = UpdateBoardAction {
		action_details: Some(json!({"message": "Changed"})),
		expected_version: Some(created.version),
		..Default::default()
	};
	let res = store.update_action(&created.action_id, &second).await;
	assert_eq!(res, Err(Error::Conflict));

	let stored = store.read_action(&created.action_id).await.unwrap();
	assert_eq!(stored.action_details, json!({"message": "Hi", "is_acknowledged": true}));
	assert_eq!(stored.version, 2);
}

#[tokio::test]
async fn test_failed_merge_leaves_record_untouched() {
	let store = MemoryBoardStore::new();
	let created = store
		.create_action(&new_action("b1", ActionKind::PaymentRequest, json!({"amount": 5})))
		.await
		.unwrap();

	let update = UpdateBoardAction {
		action_details: Some(json!({"amount.cents": 1})),
		action_status: Patch::Value(ActionStatus::Cancelled),
		..Default::default()
	};
	assert!(store.update_action(&created.action_id, &update).await.is_err());
	assert_eq!(store.read_action(&created.action_id).await.unwrap(), created);
}

#[tokio::test]
async fn test_list_filters_and_orders() {
	let store = MemoryBoardStore::new();
	let first = store
		.create_action(&new_action("b1", ActionKind::Checklist, json!({})))
		.await
		.unwrap();
	let second = store
		.create_action(&new_action("b1", ActionKind::PaymentRequest, json!({})))
		.await
		.unwrap();
	store
		.create_action(&new_action("b2", ActionKind::PaymentRequest, json!({})))
		.await
		.unwrap();

	let all = store.list_actions("b1", &ListActionOptions::default()).await.unwrap();
	let ids: Vec<_> = all.iter().map(|a| a.action_id.clone()).collect();
	assert_eq!(ids, vec![second.action_id.clone(), first.action_id.clone()]);

	let payments = store
		.list_actions(
			"b1",
			&ListActionOptions {
				action_type: Some(vec![ActionKind::PaymentRequest]),
				..Default::default()
			},
		)
		.await
		.unwrap();
	assert_eq!(payments.len(), 1);
	assert_eq!(payments[0].action_id, second.action_id);

	let completed = store
		.list_actions(
			"b1",
			&ListActionOptions {
				action_status: Some(vec![ActionStatus::Completed]),
				..Default::default()
			},
		)
		.await
		.unwrap();
	assert!(completed.is_empty());
}

// vim: ts=4
