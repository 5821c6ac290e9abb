//! Floodgate - Composable Rate Limiting Gate
//!
//! This crate wraps an arbitrary asynchronous action behind an admission gate
//! that enforces any number of sliding-window rate limits at once. Callers are
//! suspended only as long as the active limits require, the action runs exactly
//! once per admitted call, and the active limit set can be replaced at runtime
//! without disturbing calls already in flight.

pub mod config;
pub mod error;
pub mod throttle;
