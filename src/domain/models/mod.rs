pub mod channel;
pub mod event;
pub mod message;
pub mod preference;
pub mod recipient;
pub mod thread;

pub use channel::{Category, Channel, ProviderKind};
pub use event::{DeliveryEvent, DeliveryEventKind};
pub use message::{Direction, Message, MessageStatus};
pub use preference::{ActorContext, Preference, PreferenceAudit};
pub use recipient::{RecipientKind, RecipientRef};
pub use thread::Thread;
