mod support;

use unicomm::application::usecases::record_event::RecordEventUseCase;
use unicomm::domain::models::{ActorContext, Category, Channel, DeliveryEventKind};

use support::{email_request, harness, lead};

fn actor() -> ActorContext {
    ActorContext {
        ip: Some("203.0.113.9".to_string()),
        user_agent: Some("Mozilla/5.0".to_string()),
    }
}

#[tokio::test]
async fn opt_out_is_idempotent_but_every_call_is_audited() {
    let h = harness();
    let recipient = lead();

    for _ in 0..2 {
        let preference = h
            .gate
            .opt_out(
                recipient,
                Channel::Email,
                Category::Marketing,
                actor(),
                Some("clicked unsubscribe".to_string()),
            )
            .await
            .unwrap();
        assert!(!preference.opted_in);
    }

    let history = h
        .gate
        .history(recipient, Channel::Email, Category::Marketing)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|a| !a.opted_in));
    assert_eq!(history[0].actor.ip.as_deref(), Some("203.0.113.9"));
    assert_eq!(history[0].actor.user_agent.as_deref(), Some("Mozilla/5.0"));
    assert_eq!(history[0].reason.as_deref(), Some("clicked unsubscribe"));
}

#[tokio::test]
async fn opt_in_after_opt_out_restores_consent() {
    let h = harness();
    let recipient = lead();

    h.gate
        .opt_out(recipient, Channel::Email, Category::Marketing, actor(), None)
        .await
        .unwrap();
    assert!(
        !h.gate
            .can_send(recipient, Channel::Email, Some(Category::Marketing))
            .await
            .unwrap()
    );

    h.gate
        .opt_in(
            recipient,
            Channel::Email,
            Category::Marketing,
            actor(),
            Some("re-subscribed via portal".to_string()),
        )
        .await
        .unwrap();
    assert!(
        h.gate
            .can_send(recipient, Channel::Email, Some(Category::Marketing))
            .await
            .unwrap()
    );

    let history = h
        .gate
        .history(recipient, Channel::Email, Category::Marketing)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    // Newest first.
    assert!(history[0].opted_in);
    assert!(!history[1].opted_in);
}

#[tokio::test]
async fn preferences_are_scoped_per_channel_and_category() {
    let h = harness();
    let recipient = lead();

    h.gate
        .opt_in(recipient, Channel::Email, Category::Marketing, actor(), None)
        .await
        .unwrap();

    // Same category on another channel is still explicit-consent.
    assert!(
        !h.gate
            .can_send(recipient, Channel::Sms, Some(Category::Marketing))
            .await
            .unwrap()
    );
    // Another category on the same channel too.
    assert!(
        !h.gate
            .can_send(recipient, Channel::Email, Some(Category::Quotes))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn unsubscribe_event_opts_the_recipient_out_with_audit() {
    let h = harness();
    let recipient = lead();
    h.gate
        .opt_in(recipient, Channel::Email, Category::Marketing, actor(), None)
        .await
        .unwrap();

    let message = h
        .orchestrator
        .dispatch(email_request(recipient, Some(Category::Marketing)))
        .await
        .unwrap();

    let record_event = RecordEventUseCase::new(
        h.messages.clone(),
        h.events.clone(),
        h.gate.clone(),
    );
    record_event
        .execute(message.id, DeliveryEventKind::Unsubscribed, None)
        .await
        .unwrap();

    assert!(
        !h.gate
            .can_send(recipient, Channel::Email, Some(Category::Marketing))
            .await
            .unwrap()
    );
    let history = h
        .gate
        .history(recipient, Channel::Email, Category::Marketing)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].reason.as_deref().unwrap().contains("unsubscribed"));
}

#[tokio::test]
async fn list_returns_all_preferences_for_a_recipient() {
    let h = harness();
    let recipient = lead();

    h.gate
        .opt_in(recipient, Channel::Email, Category::Marketing, actor(), None)
        .await
        .unwrap();
    h.gate
        .opt_out(recipient, Channel::Sms, Category::Quotes, actor(), None)
        .await
        .unwrap();

    let preferences = h.gate.list(recipient).await.unwrap();
    assert_eq!(preferences.len(), 2);
}
