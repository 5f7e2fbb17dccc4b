//! Existence probing for usernames, phone numbers and breached emails.
//! All verdicts are best-effort heuristics; `unknown` is a first-class
//! result, never folded into a bool.

pub mod config;
pub mod core;
pub mod modules;

pub use crate::config::{AppConfig, ProbeTarget};
pub use crate::core::error::OspreyError;
