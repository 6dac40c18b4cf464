//! Dashboard views over the task list.
//!
//! # Responsibility
//! - Resolve view selectors (`inbox`, `today`, `upcoming`, project names).
//! - Derive the visible task subset and per-view outstanding counts.
//!
//! # Invariants
//! - Filtering and counting only read tasks/projects; nothing is mutated.
//! - Visible tasks keep their input order.
//! - Completed tasks never contribute to a count.

pub mod aggregate;
pub mod selector;
