//! Route handlers, grouped by concern.

pub mod health;
pub mod records;
pub mod reports;
pub mod transfer;
