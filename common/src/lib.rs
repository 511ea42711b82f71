//! Shared job model used by the feed paginator and the bookmark store.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A job posting as served by the remote feed.
///
/// Only `id` is interpreted; everything else is display data. Fields the
/// feed sends that are not modelled here are kept in `extra` so a stored
/// bookmark carries the full payload it was fetched with.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JobRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub primary_details: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub whatsapp_no: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub creatives: Vec<Creative>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_bookmarked: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobRecord {
    /// Builds a bare record, mostly useful for tests and fixtures.
    pub fn new(id: i64, title: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            company_name: company_name.into(),
            primary_details: BTreeMap::new(),
            whatsapp_no: None,
            creatives: Vec::new(),
            is_bookmarked: false,
            extra: Map::new(),
        }
    }

    /// Renders a primary detail label (e.g. `Place`, `Salary`) as text.
    pub fn detail(&self, key: &str) -> Option<String> {
        match self.primary_details.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Thumbnail of the first creative, if any.
    pub fn thumbnail(&self) -> Option<&str> {
        self.creatives.first().map(|c| c.thumb_url.as_str())
    }
}

/// An image asset attached to a job posting.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Creative {
    #[serde(default, deserialize_with = "lenient_text")]
    pub thumb_url: String,
    #[serde(
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub file: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub creative_type: Option<String>,
}

/// Envelope returned by `GET <base>?page=<n>`.
///
/// Entries stay raw until admission, since the feed is known to mix in
/// placeholder rows without an id.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct JobsPage {
    #[serde(default)]
    pub results: Vec<Value>,
}

// Display fields never reject a record: a value of the wrong shape falls
// back to the field's default, scalars are rendered as text.

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}
