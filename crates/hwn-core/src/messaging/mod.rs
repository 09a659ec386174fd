//! Outbound messaging abstraction (Telegram today).

pub mod port;

pub use port::{MessagingCapabilities, MessagingPort};
