//! Selling phase: properties are traded for checks.

pub mod engine;

pub use engine::{AllocationEngine, AllocationOutcome, Sale};
