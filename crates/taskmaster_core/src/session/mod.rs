//! Dashboard session state.
//!
//! # Responsibility
//! - Own the in-memory dashboard state as one explicit value.
//! - Apply user events as pure transitions (old state, event) -> new state.
//!
//! # Invariants
//! - A failed event leaves the previous state untouched.
//! - Every transition names its outcome so storage can mirror it.

pub mod dashboard;
