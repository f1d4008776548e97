use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const UNKNOWN_DOCUMENT: &str = "Unknown Document";
pub const UNKNOWN_LOCATION: &str = "#";

/// A citation the assistant returned next to its answer.
///
/// Fields the client does not understand are kept in `extra` so the record
/// stays exactly what the service sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(
        rename = "source_document_name",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub document_name: Option<String>,
    #[serde(
        rename = "source_location",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accept any JSON value for a display field; non-strings are rendered as JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

impl Source {
    pub fn new<S: Into<String>, T: Into<String>>(document_name: S, location: T) -> Self {
        Self {
            document_name: Some(document_name.into()),
            location: Some(location.into()),
            extra: Map::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.document_name.as_deref().unwrap_or(UNKNOWN_DOCUMENT)
    }

    pub fn link(&self) -> &str {
        self.location.as_deref().unwrap_or(UNKNOWN_LOCATION)
    }

    /// Markdown list entry, numbered from 1.
    pub fn to_markdown(&self, index: usize) -> String {
        format!("{}. [{}]({})", index + 1, self.display_name(), self.link())
    }
}
