//! # swing-core
//!
//! Core types shared across the swingsync crates.
//!
//! This crate provides the foundational types for cross-sensor swing
//! reconciliation:
//! - Device kinds and the per-device row shapes pulled from the data service
//! - Raw and normalized swing records
//! - Matched pairs and calendar-day sessions
//! - Derived metric containers
//! - Reconciliation settings and their documented defaults
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod rows;
pub mod settings;
