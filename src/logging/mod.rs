//! This module contains the `tracing` integration.
//!
//! It includes a layer that captures `tracing` events as log events and
//! writes them through a formatter, and an in-memory sink for those lines.
pub mod buffer;
pub mod collector;

pub use buffer::LineBuffer;
pub use collector::{capture_event, JsonLogCollector};
