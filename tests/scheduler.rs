mod support;

use chrono::{Duration, Utc};

use unicomm::application::usecases::schedule_message::ScheduleMessageUseCase;
use unicomm::domain::errors::DomainError;
use unicomm::domain::models::{Category, MessageStatus};

use support::{email_request, harness, lead};

#[tokio::test]
async fn scheduling_in_the_past_is_rejected_without_a_record() {
    let h = harness();
    let schedule = ScheduleMessageUseCase::new(h.orchestrator.clone(), h.scheduler.clone());

    let result = schedule
        .execute(
            email_request(lead(), Some(Category::Transactional)),
            Utc::now() - Duration::minutes(5),
        )
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(h.messages.count().await.unwrap(), 0);
    assert!(h.bus.jobs().is_empty());
}

#[tokio::test]
async fn scheduling_an_already_sent_message_is_rejected() {
    let h = harness();
    let message = h
        .orchestrator
        .dispatch(email_request(lead(), Some(Category::Transactional)))
        .await
        .unwrap();
    assert_eq!(message.status, MessageStatus::Sent);

    let result = h
        .scheduler
        .schedule(message.id, Utc::now() + Duration::hours(1))
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn scheduling_defers_dispatch_and_enqueues_one_job() {
    let h = harness();
    let schedule = ScheduleMessageUseCase::new(h.orchestrator.clone(), h.scheduler.clone());
    let send_at = Utc::now() + Duration::hours(2);

    let message = schedule
        .execute(email_request(lead(), Some(Category::Transactional)), send_at)
        .await
        .unwrap();

    let stored = h.messages.get(message.id).await.unwrap().unwrap();
    assert_eq!(stored.status, MessageStatus::Scheduled);
    assert_eq!(stored.scheduled_at, Some(send_at));
    // Nothing was handed to a provider yet.
    assert_eq!(h.email.sent_count(), 0);

    let jobs = h.bus.jobs();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].message_id, message.id);
    assert_eq!(jobs[0].due_at, send_at);
}

#[tokio::test]
async fn cancel_marks_a_scheduled_message_cancelled() {
    let h = harness();
    let schedule = ScheduleMessageUseCase::new(h.orchestrator.clone(), h.scheduler.clone());
    let message = schedule
        .execute(
            email_request(lead(), Some(Category::Transactional)),
            Utc::now() + Duration::hours(1),
        )
        .await
        .unwrap();

    h.scheduler.cancel(message.id).await.unwrap();

    let stored = h.messages.get(message.id).await.unwrap().unwrap();
    assert_eq!(stored.status, MessageStatus::Cancelled);
    assert_eq!(stored.scheduled_at, None);
}

#[tokio::test]
async fn cancel_and_reschedule_reject_non_scheduled_messages() {
    let h = harness();
    let sent = h
        .orchestrator
        .dispatch(email_request(lead(), Some(Category::Transactional)))
        .await
        .unwrap();

    let cancel = h.scheduler.cancel(sent.id).await;
    assert!(matches!(cancel, Err(DomainError::Validation(_))));

    let reschedule = h
        .scheduler
        .reschedule(sent.id, Utc::now() + Duration::hours(1))
        .await;
    assert!(matches!(reschedule, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn reschedule_moves_the_due_time_and_enqueues_again() {
    let h = harness();
    let schedule = ScheduleMessageUseCase::new(h.orchestrator.clone(), h.scheduler.clone());
    let message = schedule
        .execute(
            email_request(lead(), Some(Category::Transactional)),
            Utc::now() + Duration::hours(1),
        )
        .await
        .unwrap();

    let later = Utc::now() + Duration::hours(6);
    h.scheduler.reschedule(message.id, later).await.unwrap();

    let stored = h.messages.get(message.id).await.unwrap().unwrap();
    assert_eq!(stored.status, MessageStatus::Scheduled);
    assert_eq!(stored.scheduled_at, Some(later));
    assert_eq!(h.bus.jobs().len(), 2);
}

#[tokio::test]
async fn cancelled_messages_cannot_be_rescheduled() {
    let h = harness();
    let schedule = ScheduleMessageUseCase::new(h.orchestrator.clone(), h.scheduler.clone());
    let message = schedule
        .execute(
            email_request(lead(), Some(Category::Transactional)),
            Utc::now() + Duration::hours(1),
        )
        .await
        .unwrap();
    h.scheduler.cancel(message.id).await.unwrap();

    let result = h
        .scheduler
        .reschedule(message.id, Utc::now() + Duration::hours(2))
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn sweep_reenqueues_only_overdue_scheduled_messages() {
    let h = harness();
    let schedule = ScheduleMessageUseCase::new(h.orchestrator.clone(), h.scheduler.clone());

    let overdue = schedule
        .execute(
            email_request(lead(), Some(Category::Transactional)),
            Utc::now() + Duration::hours(1),
        )
        .await
        .unwrap();
    let upcoming = schedule
        .execute(
            email_request(lead(), Some(Category::Transactional)),
            Utc::now() + Duration::hours(8),
        )
        .await
        .unwrap();

    // Simulate a lost job: push the first message's due time into the past,
    // beyond the sweep grace period.
    h.messages
        .set_schedule(
            overdue.id,
            MessageStatus::Scheduled,
            Some(Utc::now() - Duration::minutes(10)),
        )
        .await
        .unwrap();

    let enqueued = h.scheduler.sweep().await.unwrap();
    assert_eq!(enqueued, 1);

    let jobs = h.bus.jobs();
    // Two from scheduling, one from the sweep.
    assert_eq!(jobs.len(), 3);
    assert_eq!(jobs.last().unwrap().message_id, overdue.id);
    assert!(jobs.iter().filter(|j| j.message_id == upcoming.id).count() == 1);
}

#[tokio::test]
async fn worker_path_dispatches_a_scheduled_message() {
    let h = harness();
    let schedule = ScheduleMessageUseCase::new(h.orchestrator.clone(), h.scheduler.clone());
    let message = schedule
        .execute(
            email_request(lead(), Some(Category::Transactional)),
            Utc::now() + Duration::hours(1),
        )
        .await
        .unwrap();

    // What the queue worker does once the job is due.
    let sent = h.orchestrator.dispatch_existing(message.id).await.unwrap();
    assert_eq!(sent.status, MessageStatus::Sent);
    assert_eq!(h.email.sent_count(), 1);
}

#[tokio::test]
async fn dispatch_existing_rejects_cancelled_messages() {
    let h = harness();
    let schedule = ScheduleMessageUseCase::new(h.orchestrator.clone(), h.scheduler.clone());
    let message = schedule
        .execute(
            email_request(lead(), Some(Category::Transactional)),
            Utc::now() + Duration::hours(1),
        )
        .await
        .unwrap();
    h.scheduler.cancel(message.id).await.unwrap();

    let result = h.orchestrator.dispatch_existing(message.id).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(h.email.sent_count(), 0);
}
