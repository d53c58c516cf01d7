//! # rescat-core
//!
//! Core types for the rescat research catalog.
//!
//! This crate provides the foundational types shared across all rescat crates:
//! - The `ResearchRecord` entity and its validated insert form
//! - The `Field` enum describing every user-editable attribute
//! - Field-level validation that reports every failing field at once
//! - Inbound payloads and outbound response shapes (the wire format)
//! - Filter and pagination math for listings
//! - The CSV transfer format used by import and export

pub mod entities;
pub mod errors;
pub mod fields;
pub mod payload;
pub mod query;
pub mod responses;
pub mod transfer;
pub mod validation;
