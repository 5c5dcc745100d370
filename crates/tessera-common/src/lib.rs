//! Common utilities for the Tessera stylesheet engine.
//!
//! This crate provides shared infrastructure used by the engine crates:
//! - **Warning System** - deduplicated warnings for recoverable stylesheet problems
//! - **Logging** - `tracing` subscriber setup for binaries
//! - **Paths** - resolution of `url(...)` references against a sheet's directory

pub mod logging;
pub mod path;
pub mod warning;

pub use logging::{LogConfig, LogFormat, LoggingError, init_logging};
