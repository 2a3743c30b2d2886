//! The spam classification engine.
//!
//! Everything here is synchronous and CPU-only. The engine owns the
//! per-user activity records, the banned-word set and the process-wide
//! counters, and is safe to call from concurrent handler tasks.

pub mod distance;
pub mod normalize;
mod service;

pub use service::{FilterStats, SpamFilter};
