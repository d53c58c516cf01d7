//! Entity structs for the research catalog.
//!
//! `ResearchRecord` maps to the `research_records` table. It derives
//! `Serialize`, `Deserialize` and `JsonSchema` and is itself the outbound wire
//! shape: every attribute is always present, absent optionals become `null`.

mod record;

pub use record::{NewRecord, ResearchRecord, SUGGESTED_CATEGORIES};
