pub mod gmail;
pub mod portal;
pub mod ses;
pub mod smtp;
pub mod twilio;

pub use gmail::{GmailRelayConfig, GmailRelayProvider};
pub use portal::PortalProvider;
pub use ses::{SesConfig, SesProvider};
pub use smtp::{SmtpConfig, SmtpProvider};
pub use twilio::{TwilioConfig, TwilioProvider};
