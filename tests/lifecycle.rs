mod support;

use unicomm::application::usecases::record_event::RecordEventUseCase;
use unicomm::application::usecases::retry_message::RetryMessageUseCase;
use unicomm::domain::errors::DomainError;
use unicomm::domain::models::{Category, DeliveryEventKind, MessageStatus};

use support::{email_request, harness, lead, TestHarness};

fn record_event(h: &TestHarness) -> RecordEventUseCase {
    RecordEventUseCase::new(h.messages.clone(), h.events.clone(), h.gate.clone())
}

#[tokio::test]
async fn delivery_receipt_moves_a_sent_message_to_delivered() {
    let h = harness();
    let message = h
        .orchestrator
        .dispatch(email_request(lead(), Some(Category::Transactional)))
        .await
        .unwrap();
    assert_eq!(message.status, MessageStatus::Sent);

    let updated = record_event(&h)
        .execute(message.id, DeliveryEventKind::Delivered, None)
        .await
        .unwrap();
    assert_eq!(updated.status, MessageStatus::Delivered);

    let events = h.events.list_by_message(message.id).await.unwrap();
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn bounce_after_send_carries_the_provider_detail() {
    let h = harness();
    let message = h
        .orchestrator
        .dispatch(email_request(lead(), Some(Category::Transactional)))
        .await
        .unwrap();

    let updated = record_event(&h)
        .execute(
            message.id,
            DeliveryEventKind::Bounced,
            Some("mailbox does not exist".to_string()),
        )
        .await
        .unwrap();
    assert!(matches!(
        updated.status,
        MessageStatus::Bounced { ref reason } if reason == "mailbox does not exist"
    ));
}

#[tokio::test]
async fn engagement_events_never_change_status() {
    let h = harness();
    let message = h
        .orchestrator
        .dispatch(email_request(lead(), Some(Category::Transactional)))
        .await
        .unwrap();

    for kind in [DeliveryEventKind::Opened, DeliveryEventKind::Clicked] {
        let updated = record_event(&h).execute(message.id, kind, None).await.unwrap();
        assert_eq!(updated.status, MessageStatus::Sent);
    }
    assert_eq!(h.events.list_by_message(message.id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn a_status_is_never_reverted_by_a_late_event() {
    let h = harness();
    let message = h
        .orchestrator
        .dispatch(email_request(lead(), Some(Category::Transactional)))
        .await
        .unwrap();

    record_event(&h)
        .execute(message.id, DeliveryEventKind::Delivered, None)
        .await
        .unwrap();

    // A duplicate/late "sent" receipt is recorded but does not move the
    // message backwards.
    let updated = record_event(&h)
        .execute(message.id, DeliveryEventKind::Sent, None)
        .await
        .unwrap();
    assert_eq!(updated.status, MessageStatus::Delivered);
    assert_eq!(h.events.list_by_message(message.id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn delivery_event_on_a_pending_message_does_not_skip_ahead() {
    let h = harness();
    let pending = h
        .orchestrator
        .prepare(email_request(lead(), Some(Category::Transactional)))
        .await
        .unwrap();
    assert_eq!(pending.status, MessageStatus::Pending);

    let updated = record_event(&h)
        .execute(pending.id, DeliveryEventKind::Delivered, None)
        .await
        .unwrap();
    assert_eq!(updated.status, MessageStatus::Pending);
    // Still on the audit trail.
    assert_eq!(h.events.list_by_message(pending.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn events_for_an_unknown_message_are_rejected() {
    let h = harness();
    let result = record_event(&h)
        .execute(uuid::Uuid::new_v4(), DeliveryEventKind::Delivered, None)
        .await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn retry_creates_a_new_record_and_leaves_the_original_untouched() {
    let h = harness();
    let recipient = lead();
    h.email.fail_with("connection reset by peer");

    let result = h
        .orchestrator
        .dispatch(email_request(recipient, Some(Category::Transactional)))
        .await;
    assert!(result.is_err());

    let (messages, _) = h
        .messages
        .list_by_recipient(recipient, None, None)
        .await
        .unwrap();
    let original = messages[0].clone();

    h.email.succeed();
    let retry = RetryMessageUseCase::new(h.messages.clone(), h.orchestrator.clone());
    let retried = retry.execute(original.id).await.unwrap();

    assert_ne!(retried.id, original.id);
    assert_eq!(retried.status, MessageStatus::Sent);
    assert_eq!(retried.thread_id, original.thread_id);
    assert_eq!(
        retried.metadata["retry_of"],
        serde_json::Value::String(original.id.to_string())
    );

    let stored_original = h.messages.get(original.id).await.unwrap().unwrap();
    assert!(matches!(stored_original.status, MessageStatus::Failed { .. }));
    assert_eq!(h.messages.count().await.unwrap(), 2);
}

#[tokio::test]
async fn only_failed_or_bounced_messages_can_be_retried() {
    let h = harness();
    let sent = h
        .orchestrator
        .dispatch(email_request(lead(), Some(Category::Transactional)))
        .await
        .unwrap();

    let retry = RetryMessageUseCase::new(h.messages.clone(), h.orchestrator.clone());
    let result = retry.execute(sent.id).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn bounced_messages_are_retryable() {
    let h = harness();
    let message = h
        .orchestrator
        .dispatch(email_request(lead(), Some(Category::Transactional)))
        .await
        .unwrap();
    record_event(&h)
        .execute(
            message.id,
            DeliveryEventKind::Bounced,
            Some("greylisted".to_string()),
        )
        .await
        .unwrap();

    let retry = RetryMessageUseCase::new(h.messages.clone(), h.orchestrator.clone());
    let retried = retry.execute(message.id).await.unwrap();
    assert_eq!(retried.status, MessageStatus::Sent);
}
