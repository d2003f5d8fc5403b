//! Meridian Core
//!
//! Shared plumbing for the Meridian charting crates: hash collections,
//! logging setup and profiling scopes.

pub mod alloc;
pub mod logging;
pub mod profiling;
