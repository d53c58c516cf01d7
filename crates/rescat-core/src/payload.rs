//! Inbound record payloads (create and update bodies, CSV rows).
//!
//! Every field is `Option<Option<String>>`:
//! - `None`: the key was absent (update leaves the column unchanged)
//! - `Some(None)`: the key was explicitly `null` (update clears the column)
//! - `Some(Some(text))`: a value to validate
//!
//! Unknown keys are ignored. Numbers and booleans are accepted and kept as
//! their textual form, so `"volume": 12` and `"volume": "12"` are equivalent.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::ResearchRecord;
use crate::fields::Field;

/// Flat key/value record body accepted by create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayload {
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub author: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<Option<String>>,
    #[serde(
        rename = "abstract",
        default,
        deserialize_with = "nullable_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub abstract_text: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub methodology: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub results: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub conclusions: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub journal: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub volume: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub issue: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub pages: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub doi: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_text", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

impl RecordPayload {
    /// Mutable access to the slot backing `field`.
    pub fn slot_mut(&mut self, field: Field) -> &mut Option<Option<String>> {
        match field {
            Field::Title => &mut self.title,
            Field::Author => &mut self.author,
            Field::Category => &mut self.category,
            Field::Keywords => &mut self.keywords,
            Field::PublicationDate => &mut self.publication_date,
            Field::Abstract => &mut self.abstract_text,
            Field::Methodology => &mut self.methodology,
            Field::Results => &mut self.results,
            Field::Conclusions => &mut self.conclusions,
            Field::Journal => &mut self.journal,
            Field::Volume => &mut self.volume,
            Field::Issue => &mut self.issue,
            Field::Pages => &mut self.pages,
            Field::Doi => &mut self.doi,
            Field::Url => &mut self.url,
            Field::Notes => &mut self.notes,
        }
    }

    /// Set a field to a value (`Some`) or to explicit null (`None`).
    pub fn set(&mut self, field: Field, value: Option<String>) {
        *self.slot_mut(field) = Some(value);
    }

    /// Builder-style `set` with a present value.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }
}

/// Payload carrying every attribute of an existing record (used to replace
/// a record wholesale and by round-trip checks).
impl From<&ResearchRecord> for RecordPayload {
    fn from(record: &ResearchRecord) -> Self {
        let mut payload = Self::default();
        for field in Field::ALL {
            payload.set(field, record.value(field));
        }
        payload
    }
}

/// A request body that is either flat or nested under `research_datum`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PayloadEnvelope {
    Wrapped { research_datum: RecordPayload },
    Flat(RecordPayload),
}

impl PayloadEnvelope {
    #[must_use]
    pub fn into_payload(self) -> RecordPayload {
        match self {
            Self::Wrapped { research_datum } => research_datum,
            Self::Flat(payload) => payload,
        }
    }
}

fn nullable_text<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(Some(None)),
        Some(serde_json::Value::String(text)) => Ok(Some(Some(text))),
        Some(serde_json::Value::Number(number)) => Ok(Some(Some(number.to_string()))),
        Some(serde_json::Value::Bool(flag)) => Ok(Some(Some(flag.to_string()))),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or null, found {other}"
        ))),
    }
}
