//! Services
//!
//! Business logic services for the memory bridge.
//! `memory` holds the core; `hooks` wires it to host lifecycle events.

pub mod hooks;
pub mod memory;

pub use hooks::{DegradeReason, HookOutcome, HookRunner, SaveReport};
