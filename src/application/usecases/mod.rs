pub mod cancel_scheduled;
pub mod get_message;
pub mod get_message_events;
pub mod get_preference_audit;
pub mod list_messages;
pub mod list_preferences;
pub mod list_thread_messages;
pub mod list_threads;
pub mod record_event;
pub mod record_inbound;
pub mod reschedule_message;
pub mod retry_message;
pub mod schedule_message;
pub mod send_message;
pub mod update_preference;
