mod support;

use chrono::{Duration, Utc};
use uuid::Uuid;

use unicomm::application::usecases::record_inbound::{
    RecordInboundRequest, RecordInboundUseCase,
};
use unicomm::domain::models::{Category, Channel, Direction, ProviderKind, Thread};

use support::{email_request, harness, lead, sms_request};

#[tokio::test]
async fn messages_for_the_same_recipient_and_channel_share_a_thread() {
    let h = harness();
    let recipient = lead();

    let first = h
        .orchestrator
        .dispatch(email_request(recipient, Some(Category::Transactional)))
        .await
        .unwrap();
    let second = h
        .orchestrator
        .dispatch(email_request(recipient, Some(Category::Transactional)))
        .await
        .unwrap();

    assert_eq!(first.thread_id, second.thread_id);

    let thread = h.threads.get(first.thread_id).await.unwrap().unwrap();
    assert!(thread.last_message_at >= second.created_at);
}

#[tokio::test]
async fn a_different_channel_opens_a_new_thread() {
    let h = harness();
    let recipient = lead();

    let email = h
        .orchestrator
        .dispatch(email_request(recipient, Some(Category::Transactional)))
        .await
        .unwrap();
    let sms = h
        .orchestrator
        .dispatch(sms_request(recipient, Some(Category::Transactional)))
        .await
        .unwrap();

    assert_ne!(email.thread_id, sms.thread_id);
    assert_eq!(h.threads.list_by_recipient(recipient).await.unwrap().len(), 2);
}

#[tokio::test]
async fn different_recipients_never_share_a_thread() {
    let h = harness();
    let first = h
        .orchestrator
        .dispatch(email_request(lead(), Some(Category::Transactional)))
        .await
        .unwrap();
    let second = h
        .orchestrator
        .dispatch(email_request(lead(), Some(Category::Transactional)))
        .await
        .unwrap();
    assert_ne!(first.thread_id, second.thread_id);
}

#[tokio::test]
async fn an_expired_thread_is_not_reused() {
    let h = harness();
    let recipient = lead();

    // A thread whose last activity is far outside the 30-day window.
    let stale = Thread {
        id: Uuid::new_v4(),
        recipient,
        channel: Channel::Email,
        subject: Some("old conversation".to_string()),
        last_message_at: Utc::now() - Duration::days(45),
        created_at: Utc::now() - Duration::days(60),
    };
    h.threads.insert(stale.clone()).await.unwrap();

    let message = h
        .orchestrator
        .dispatch(email_request(recipient, Some(Category::Transactional)))
        .await
        .unwrap();

    assert_ne!(message.thread_id, stale.id);
    assert_eq!(h.threads.list_by_recipient(recipient).await.unwrap().len(), 2);
}

#[tokio::test]
async fn a_thread_active_within_the_window_is_reused() {
    let h = harness();
    let recipient = lead();

    let recent = Thread {
        id: Uuid::new_v4(),
        recipient,
        channel: Channel::Email,
        subject: None,
        last_message_at: Utc::now() - Duration::days(10),
        created_at: Utc::now() - Duration::days(20),
    };
    h.threads.insert(recent.clone()).await.unwrap();

    let message = h
        .orchestrator
        .dispatch(email_request(recipient, Some(Category::Transactional)))
        .await
        .unwrap();
    assert_eq!(message.thread_id, recent.id);
}

#[tokio::test]
async fn inbound_messages_join_the_existing_thread() {
    let h = harness();
    let recipient = lead();

    let outbound = h
        .orchestrator
        .dispatch(email_request(recipient, Some(Category::Transactional)))
        .await
        .unwrap();

    let record_inbound = RecordInboundUseCase::new(h.messages.clone(), h.grouper.clone());
    let inbound = record_inbound
        .execute(RecordInboundRequest {
            recipient,
            channel: Channel::Email,
            provider: ProviderKind::Smtp,
            category: None,
            subject: Some("Re: Your quote is ready".to_string()),
            body: "Thanks, looks good. When can I come by?".to_string(),
            from_address: "buyer@example.com".to_string(),
            to_address: "sales@dealer.example".to_string(),
            metadata: serde_json::json!({}),
        })
        .await
        .unwrap();

    assert_eq!(inbound.thread_id, outbound.thread_id);
    assert_eq!(inbound.direction, Direction::Inbound);

    let messages = h.messages.list_by_thread(outbound.thread_id).await.unwrap();
    assert_eq!(messages.len(), 2);
    // Chronological order within a thread.
    assert_eq!(messages[0].id, outbound.id);
    assert_eq!(messages[1].id, inbound.id);
}
