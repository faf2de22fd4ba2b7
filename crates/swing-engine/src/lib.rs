//! # swing-engine
//!
//! Reconciliation of swing streams recorded by independent capture devices.
//!
//! The engine is a pipeline of pure, synchronous transformations over an
//! already-fetched batch:
//!
//! 1. [`normalize`] resolves each device's timestamp grammar onto one clock.
//! 2. [`matcher`] pairs swings across two streams by nearest time, one-to-one.
//! 3. [`sessions`] buckets pairs into calendar-day sessions.
//! 4. [`metrics`] derives per-swing and per-session statistics.
//!
//! [`pipeline::Reconciler`] runs all four stages. Nothing is cached between
//! runs; the same input always yields the same output.

pub mod clock;
pub mod error;
pub mod matcher;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod sessions;

pub use clock::LocalClock;
pub use error::EngineError;
pub use matcher::match_swings;
pub use metrics::MetricsCalculator;
pub use normalize::{ParsesTimestamp, normalize, normalize_all};
pub use pipeline::{Reconciler, reconcile};
pub use sessions::build_sessions;
