pub mod classify;
pub mod engine;
pub mod error;
pub mod governor;
