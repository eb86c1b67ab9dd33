//! Tracing/logging setup shared by binaries.

pub mod tracing;

pub use self::tracing::{LogFormat, init, init_with};
