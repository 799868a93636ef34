//! Commit workflow tests
//!
//! Runs every transition through the service against the memory store

mod common;

use serde_json::json;
use std::sync::atomic::Ordering;

use common::{TestEnv, new_action};
use serviceboard_action::respond::ActionResponse;
use serviceboard_action::{ActionKind, ActionStatus};
use serviceboard_types::board_store::{BoardActionStore, ListActionOptions};
use serviceboard_types::error::Error;
use serviceboard_types::event::ActionEventKind;

const MORNING: &str = "2025-01-10T10:00:00Z";
const AFTERNOON: &str = "2025-01-10T14:00:00Z";

fn online_choice() -> serde_json::Value {
	json!({
		"title": "Kick-off call",
		"mode": "multiple",
		"type": "virtual",
		"datetime_options": [MORNING, AFTERNOON],
		"platforms": ["zoom", "teams"]
	})
}

#[tokio::test]
async fn test_create_action_validates() {
	let env = TestEnv::new();
	let res = env.service.create_action(&new_action(ActionKind::PaymentRequest, json!({}))).await;
	assert_eq!(res, Err(Error::ValidationFailed(vec!["amount".into()])));
	assert!(env.store.inner.is_empty());
	assert!(env.drain_events().is_empty());
}

#[tokio::test]
async fn test_create_action_stores_canonical_payload() {
	let env = TestEnv::new();
	let record = env
		.service
		.create_action(&new_action(
			ActionKind::PaymentRequest,
			json!({"set": {"price": "49.90", "payment_methods": "paypal, card"}}),
		))
		.await
		.unwrap();

	assert_eq!(record.action_status, ActionStatus::Pending);
	assert!(record.is_customer_action_required);
	assert_eq!(record.action_details["amount"].as_f64(), Some(49.9));
	assert_eq!(record.action_details["allowed_payment_methods"], json!(["paypal", "card"]));

	let events = env.drain_events();
	assert_eq!(events.len(), 1);
	assert_eq!(events[0].kind, ActionEventKind::ActionCreated);
	assert_eq!(events[0].action_id, record.action_id);
}

#[tokio::test]
async fn test_confirm_books_calendar_and_commits() {
	let env = TestEnv::new();
	let created = env
		.service
		.create_action(&new_action(ActionKind::AppointmentScheduling, online_choice()))
		.await
		.unwrap();

	let res = env.service.select_and_confirm(&created.action_id, Some(AFTERNOON), None).await;
	assert!(matches!(res, Err(Error::IncompleteSelection(_))));
	assert!(env.calendar.booked.lock().unwrap().is_empty());

	let record = env
		.service
		.select_and_confirm(&created.action_id, Some(AFTERNOON), Some("zoom"))
		.await
		.unwrap();
	assert_eq!(record.action_status, ActionStatus::Completed);
	assert!(!record.is_customer_action_required);
	assert_eq!(record.version, created.version + 1);
	assert_eq!(record.action_details["confirmation_status"], json!("confirmed"));
	assert_eq!(record.action_details["datetime_confirmed"], json!(AFTERNOON));
	assert_eq!(record.action_details["platform_confirmed"], json!("zoom"));
	assert_eq!(record.action_details["appointment_id"], json!("cal-1"));
	assert_eq!(record.action_details["datetimes_options"], json!([]));

	let booked = env.calendar.booked.lock().unwrap().clone();
	assert_eq!(booked.len(), 1);
	assert_eq!(&*booked[0].datetime, AFTERNOON);
	assert_eq!(booked[0].platform.as_deref(), Some("zoom"));

	let events = env.drain_events();
	let confirmed = events.last().unwrap();
	assert_eq!(confirmed.kind, ActionEventKind::AppointmentConfirmed);
	assert_eq!(confirmed.details["appointment_id"], json!("cal-1"));
}

#[tokio::test]
async fn test_confirm_compensates_failed_write() {
	let env = TestEnv::new();
	let created = env
		.service
		.create_action(&new_action(ActionKind::AppointmentScheduling, online_choice()))
		.await
		.unwrap();

	env.store.fail_updates.store(true, Ordering::SeqCst);
	let res =
		env.service.select_and_confirm(&created.action_id, Some(MORNING), Some("teams")).await;
	assert!(matches!(res, Err(Error::StoreFailure(_))));
	assert_eq!(*env.calendar.deleted.lock().unwrap(), vec!["cal-1".to_string()]);

	let stored = env.store.read_action(&created.action_id).await.unwrap();
	assert_eq!(stored, created);
}

#[tokio::test]
async fn test_calendar_failure_leaves_action_pending() {
	let env = TestEnv::new();
	let created = env
		.service
		.create_action(&new_action(ActionKind::AppointmentScheduling, online_choice()))
		.await
		.unwrap();

	env.calendar.fail_create.store(true, Ordering::SeqCst);
	let res = env.service.select_and_confirm(&created.action_id, Some(MORNING), Some("zoom")).await;
	assert!(res.is_err());
	let stored = env.store.read_action(&created.action_id).await.unwrap();
	assert_eq!(stored.action_details["confirmation_status"], json!("pending_customer"));
}

#[tokio::test]
async fn test_stale_write_is_a_conflict() {
	let env = TestEnv::new();
	let created = env
		.service
		.create_action(&new_action(ActionKind::AppointmentScheduling, online_choice()))
		.await
		.unwrap();

	// Another writer commits after our read
	let rejected = env.service.reject_appointment(&created.action_id).await.unwrap();
	*env.store.stale_read.lock().unwrap() = Some(created.clone());

	let res = env.service.select_and_confirm(&created.action_id, Some(MORNING), Some("zoom")).await;
	assert_eq!(res, Err(Error::Conflict));
	assert_eq!(*env.calendar.deleted.lock().unwrap(), vec!["cal-1".to_string()]);

	*env.store.stale_read.lock().unwrap() = None;
	let stored = env.store.read_action(&created.action_id).await.unwrap();
	assert_eq!(stored, rejected);
	assert_eq!(stored.action_details["confirmation_status"], json!("rejected"));
}

#[tokio::test]
async fn test_update_draft_resolves_field_synonyms() {
	let env = TestEnv::new();
	let draft = env
		.service
		.create_draft(&new_action(ActionKind::PaymentRequest, json!({"description": "Deposit"})))
		.await
		.unwrap();
	assert_eq!(draft.action_details["amount"].as_f64(), Some(0.0));

	let updated =
		env.service.update_draft(&draft.action_id, &json!({"price": "25"})).await.unwrap();
	assert_eq!(updated.action_details["amount"].as_f64(), Some(25.0));
	let published = env.service.publish_draft(&draft.action_id).await.unwrap();
	assert_eq!(published.action_details["amount"].as_f64(), Some(25.0));

	let draft = env
		.service
		.create_draft(&new_action(
			ActionKind::SignatureRequest,
			json!({"document_name": "Contract"}),
		))
		.await
		.unwrap();
	let updated = env
		.service
		.update_draft(&draft.action_id, &json!({"set": {"file_url": "https://example.com/c.pdf"}}))
		.await
		.unwrap();
	assert_eq!(updated.action_details["document_url"], json!("https://example.com/c.pdf"));
	assert_eq!(updated.action_details["document_name"], json!("Contract"));
}

#[tokio::test]
async fn test_reschedule_and_new_round() {
	let env = TestEnv::new();
	let created = env
		.service
		.create_action(&new_action(ActionKind::AppointmentScheduling, online_choice()))
		.await
		.unwrap();
	env.service
		.select_and_confirm(&created.action_id, Some(MORNING), Some("zoom"))
		.await
		.unwrap();

	let res = env.service.propose_new_round(&created.action_id, &json!({})).await;
	assert!(matches!(res, Err(Error::InvalidStateTransition { .. })));

	let rescheduled = env
		.service
		.request_reschedule(&created.action_id, "customer unavailable")
		.await
		.unwrap();
	assert_eq!(rescheduled.action_details["confirmation_status"], json!("rescheduled"));
	assert_eq!(rescheduled.action_details["reschedule_reason"], json!("customer unavailable"));

	let round = env
		.service
		.propose_new_round(
			&created.action_id,
			&json!({"proposed_datetimes": ["2025-01-17T10:00:00Z", "2025-01-17T16:00:00Z"]}),
		)
		.await
		.unwrap();
	assert_ne!(round.action_id, created.action_id);
	assert_eq!(round.board_id, created.board_id);
	assert_eq!(round.action_status, ActionStatus::Pending);
	assert_eq!(round.action_details["confirmation_status"], json!("pending_customer"));
	assert_eq!(round.action_details["appointment_title"], json!("Kick-off call"));
	assert_eq!(round.action_details["platform_options"], json!(["zoom"]));

	let kinds: Vec<_> = env.drain_events().into_iter().map(|e| e.kind).collect();
	assert_eq!(
		kinds,
		vec![
			ActionEventKind::ActionCreated,
			ActionEventKind::AppointmentConfirmed,
			ActionEventKind::AppointmentRescheduleRequested,
			ActionEventKind::ActionCreated,
		]
	);

	let board = env.service.list_actions("board-1", &ListActionOptions::default()).await.unwrap();
	assert_eq!(board.len(), 2);
	assert_eq!(board[0].action_id, round.action_id);
}

#[tokio::test]
async fn test_cancel_confirmed_frees_calendar() {
	let env = TestEnv::new();
	let created = env
		.service
		.create_action(&new_action(ActionKind::AppointmentScheduling, online_choice()))
		.await
		.unwrap();
	env.service
		.select_and_confirm(&created.action_id, Some(MORNING), Some("zoom"))
		.await
		.unwrap();

	let record = env.service.cancel_appointment(&created.action_id).await.unwrap();
	assert_eq!(record.action_status, ActionStatus::Cancelled);
	assert_eq!(*env.calendar.cancelled.lock().unwrap(), vec!["cal-1".to_string()]);

	let res = env.service.select_and_confirm(&created.action_id, Some(MORNING), Some("zoom")).await;
	assert!(matches!(res, Err(Error::InvalidStateTransition { .. })));
}

#[tokio::test]
async fn test_generic_response_commit() {
	let env = TestEnv::new();
	let created = env
		.service
		.create_action(&new_action(
			ActionKind::Checklist,
			json!({"tasks": ["Bring ID", {"text": "Parking", "required": false}]}),
		))
		.await
		.unwrap();
	let item_id = created.action_details["items"][0]["id"].as_str().unwrap().to_string();

	let record = env
		.service
		.respond(&created.action_id, &ActionResponse::SetChecklistItem { item_id, completed: true })
		.await
		.unwrap();
	assert_eq!(record.action_status, ActionStatus::Completed);
	assert_eq!(record.action_details["is_completed"], json!(true));

	let res = env.service.respond(&created.action_id, &ActionResponse::Cancel).await;
	assert!(matches!(res, Err(Error::InvalidStateTransition { .. })));

	let kinds: Vec<_> = env.drain_events().into_iter().map(|e| e.kind).collect();
	assert_eq!(kinds.last(), Some(&ActionEventKind::ChecklistCompleted));
}

#[tokio::test]
async fn test_cancel_kind_without_cancelled_status() {
	let env = TestEnv::new();
	let created = env
		.service
		.create_action(&new_action(
			ActionKind::VideoMessage,
			json!({"url": "https://example.com/v.mp4"}),
		))
		.await
		.unwrap();

	let record = env.service.respond(&created.action_id, &ActionResponse::Cancel).await.unwrap();
	assert_eq!(record.action_status, ActionStatus::Cancelled);
	assert!(!record.is_customer_action_required);

	let res = env.service.respond(&created.action_id, &ActionResponse::MarkWatched).await;
	assert_eq!(
		res,
		Err(Error::InvalidStateTransition { from: "cancelled".into(), transition: "mark_watched" })
	);
}

#[tokio::test]
async fn test_draft_lifecycle() {
	let env = TestEnv::new();
	let draft = env
		.service
		.create_draft(&new_action(
			ActionKind::SignatureRequest,
			json!({"document_name": "Contract"}),
		))
		.await
		.unwrap();
	assert_eq!(draft.action_status, ActionStatus::Draft);
	assert!(!draft.is_customer_action_required);

	let res = env.service.respond(&draft.action_id, &ActionResponse::DeclineSignature).await;
	assert!(matches!(res, Err(Error::InvalidStateTransition { .. })));

	let res = env.service.publish_draft(&draft.action_id).await;
	assert_eq!(res, Err(Error::ValidationFailed(vec!["document_url".into()])));

	env.service
		.update_draft(&draft.action_id, &json!({"document_url": "https://example.com/c.pdf"}))
		.await
		.unwrap();
	let published = env.service.publish_draft(&draft.action_id).await.unwrap();
	assert_eq!(published.action_status, ActionStatus::Pending);
	assert!(published.is_customer_action_required);
	assert_eq!(published.action_details["document_name"], json!("Contract"));

	let res = env.service.publish_draft(&draft.action_id).await;
	assert!(matches!(res, Err(Error::InvalidStateTransition { transition: "publish_draft", .. })));

	let kinds: Vec<_> = env.drain_events().into_iter().map(|e| e.kind).collect();
	assert_eq!(kinds, vec![ActionEventKind::ActionPublished]);
}

#[tokio::test]
async fn test_events_carry_full_payload() {
	let env = TestEnv::new();
	let created = env
		.service
		.create_action(&new_action(
			ActionKind::PaymentRequest,
			json!({"amount": 20, "due_date": "2025-03-01"}),
		))
		.await
		.unwrap();
	env.service
		.respond(&created.action_id, &ActionResponse::Pay { method: Some("card".into()) })
		.await
		.unwrap();

	let events = env.drain_events();
	let paid = events.last().unwrap();
	assert_eq!(paid.kind, ActionEventKind::PaymentCompleted);
	assert_eq!(paid.details["payment_status"], json!("completed"));
	assert_eq!(paid.details["payment_method_used"], json!("card"));
	assert_eq!(paid.details["currency"], json!("EUR"));
}

// vim: ts=4
