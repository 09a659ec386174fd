//! Core logic for the homework review notifier.
//!
//! Framework-agnostic: the review API (reqwest) and Telegram (teloxide) live
//! behind ports implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod notifier;
pub mod poller;
pub mod ports;
pub mod review;

pub use errors::{Error, Result};
