//! Repository modules implementing record operations.
//!
//! Each module adds methods to `RecordService` via `impl RecordService` blocks.

pub mod analytics;
pub mod record;
pub mod transfer;
