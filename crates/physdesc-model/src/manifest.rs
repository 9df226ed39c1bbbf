use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata label whose value is harvested.
pub const PHYSICAL_DESCRIPTION_LABEL: &str = "Physical Description";

/// A IIIF manifest, reduced to the parts this tool reads.
///
/// Everything besides `metadata` (sequences, structures, thumbnails, ...)
/// is ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Ordered label/value pairs. Absent and `null` are both treated as empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataEntry>>,
}

/// One `{"label": ..., "value": ...}` entry of a manifest's metadata.
///
/// Both fields are kept as raw JSON since libraries are not consistent
/// about using plain strings here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MetadataEntry {
    #[serde(default)]
    pub label: Value,
    #[serde(default)]
    pub value: Value,
}

impl Manifest {
    /// Parse a manifest from a JSON response body.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// The metadata entries, empty when the field is absent or null.
    pub fn entries(&self) -> &[MetadataEntry] {
        self.metadata.as_deref().unwrap_or(&[])
    }

    /// Value of the first entry labelled exactly `label`, as text.
    ///
    /// Later entries with the same label are never consulted.
    pub fn metadata_value(&self, label: &str) -> Option<String> {
        self.entries()
            .iter()
            .find(|entry| entry.has_label(label))
            .and_then(MetadataEntry::value_text)
    }

    /// The "Physical Description" value, if the manifest carries a non-empty one.
    pub fn physical_description(&self) -> Option<String> {
        self.metadata_value(PHYSICAL_DESCRIPTION_LABEL)
    }
}

impl MetadataEntry {
    /// Case-sensitive comparison; non-string labels never match.
    pub fn has_label(&self, label: &str) -> bool {
        matches!(&self.label, Value::String(s) if s == label)
    }

    /// The value as text, or `None` when there is nothing to write.
    ///
    /// Strings are returned verbatim, including any embedded line breaks.
    /// A IIIF language value (`{"@value": ...}`) yields its text, and an
    /// array of strings or language values is joined with `"; "`. Numbers,
    /// booleans, `null`, empty strings and containers without text yield `None`.
    pub fn value_text(&self) -> Option<String> {
        let text = match &self.value {
            Value::Array(items) => {
                let parts: Vec<&str> = items.iter().filter_map(text_of).collect();
                parts.join("; ")
            }
            other => text_of(other)?.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}

fn text_of(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.as_str()),
        Value::Object(map) => map.get("@value").and_then(text_of),
        _ => None,
    }
}
