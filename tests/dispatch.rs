mod support;

use unicomm::domain::errors::DomainError;
use unicomm::domain::models::{
    ActorContext, Category, Channel, DeliveryEventKind, MessageStatus, ProviderKind,
};

use support::{email_request, harness, lead, sms_request};

#[tokio::test]
async fn opted_out_recipient_blocks_send_without_creating_a_message() {
    let h = harness();
    let recipient = lead();
    h.gate
        .opt_out(
            recipient,
            Channel::Email,
            Category::Marketing,
            ActorContext::default(),
            Some("unsubscribed from footer link".to_string()),
        )
        .await
        .unwrap();

    let result = h
        .orchestrator
        .dispatch(email_request(recipient, Some(Category::Marketing)))
        .await;

    assert!(matches!(result, Err(DomainError::OptedOut(_))));
    assert_eq!(h.messages.count().await.unwrap(), 0);
    assert_eq!(h.email.sent_count(), 0);
}

#[tokio::test]
async fn transactional_send_succeeds_despite_blanket_opt_out() {
    let h = harness();
    let recipient = lead();
    for category in [
        Category::Marketing,
        Category::Transactional,
        Category::Quotes,
        Category::Documents,
        Category::Billing,
    ] {
        h.gate
            .opt_out(
                recipient,
                Channel::Sms,
                category,
                ActorContext::default(),
                None,
            )
            .await
            .unwrap();
    }

    let message = h
        .orchestrator
        .dispatch(sms_request(recipient, Some(Category::Transactional)))
        .await
        .unwrap();

    assert_eq!(message.status, MessageStatus::Sent);
    assert_eq!(h.sms.sent_count(), 1);
}

#[tokio::test]
async fn absent_record_allows_transactional_and_uncategorized_only() {
    let h = harness();
    let recipient = lead();

    let transactional = h
        .orchestrator
        .dispatch(email_request(recipient, Some(Category::Transactional)))
        .await;
    assert!(transactional.is_ok());

    let uncategorized = h.orchestrator.dispatch(email_request(recipient, None)).await;
    assert!(uncategorized.is_ok());

    let marketing = h
        .orchestrator
        .dispatch(email_request(recipient, Some(Category::Marketing)))
        .await;
    assert!(matches!(marketing, Err(DomainError::OptedOut(_))));
    assert_eq!(h.messages.count().await.unwrap(), 2);
}

#[tokio::test]
async fn opted_in_recipient_can_receive_marketing() {
    let h = harness();
    let recipient = lead();
    h.gate
        .opt_in(
            recipient,
            Channel::Email,
            Category::Marketing,
            ActorContext::default(),
            Some("newsletter signup".to_string()),
        )
        .await
        .unwrap();

    let message = h
        .orchestrator
        .dispatch(email_request(recipient, Some(Category::Marketing)))
        .await
        .unwrap();
    assert_eq!(message.status, MessageStatus::Sent);
}

#[tokio::test]
async fn successful_dispatch_appends_a_sent_event() {
    let h = harness();
    let message = h
        .orchestrator
        .dispatch(email_request(lead(), Some(Category::Transactional)))
        .await
        .unwrap();

    let events = h.events.list_by_message(message.id).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, DeliveryEventKind::Sent);
    assert!(events[0].detail.as_deref().unwrap().starts_with("stub-"));
}

#[tokio::test]
async fn provider_failure_marks_message_failed_and_propagates() {
    let h = harness();
    let recipient = lead();
    h.email.fail_with("smtp 550 mailbox unavailable");

    let result = h
        .orchestrator
        .dispatch(email_request(recipient, Some(Category::Transactional)))
        .await;
    assert!(matches!(result, Err(DomainError::Provider(_))));

    // The record exists and carries the provider's error text.
    let (messages, _) = h
        .messages
        .list_by_recipient(recipient, None, None)
        .await
        .unwrap();
    assert_eq!(messages.len(), 1);
    let failed = &messages[0];
    assert!(matches!(
        &failed.status,
        MessageStatus::Failed { reason } if reason.contains("550")
    ));

    let events = h.events.list_by_message(failed.id).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, DeliveryEventKind::Failed);
}

#[tokio::test]
async fn provider_override_must_match_the_channel() {
    let h = harness();
    let mut request = email_request(lead(), Some(Category::Transactional));
    request.provider = Some(ProviderKind::Twilio);

    let result = h.orchestrator.dispatch(request).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(h.messages.count().await.unwrap(), 0);
}

#[tokio::test]
async fn explicit_provider_override_is_honored() {
    let h = harness();
    let mut request = email_request(lead(), Some(Category::Transactional));
    request.provider = Some(ProviderKind::Smtp);

    let message = h.orchestrator.dispatch(request).await.unwrap();
    assert_eq!(message.provider, ProviderKind::Smtp);
    assert_eq!(h.email.sent_count(), 1);
}

#[tokio::test]
async fn empty_body_is_rejected_before_persistence() {
    let h = harness();
    let mut request = email_request(lead(), Some(Category::Transactional));
    request.body = "   ".to_string();

    let result = h.orchestrator.dispatch(request).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(h.messages.count().await.unwrap(), 0);
}
