//! lookup — search static roster, schedule and default-credential datasets.
//!
//! The binary either starts the TUI (`lookup-tui`) or runs a single search
//! and prints the result. This crate holds the one-shot path so the
//! integration tests can drive it without spawning a process.
//!
//! # Architecture
//!
//! ```text
//! Source ──► Session ──► Search / Group / Grid ──► Report ──► render (text | json)
//! ```

pub mod oneshot;
pub mod render;

pub use oneshot::{Outcome, Report};
