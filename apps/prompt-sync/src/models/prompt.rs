use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Where a record came from. Display-only; never part of the dedup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PromptSource {
    #[default]
    Native,
    AwesomeCopilot,
}

/// One prompt entry as persisted in the generated dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tool: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_source")]
    pub source: PromptSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    /// Fields this tool does not model, carried through to the output untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Unrecognised origin markers load as `Native`; local entries are re-tagged anyway.
fn lenient_source<'de, D>(deserializer: D) -> Result<PromptSource, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value.as_ref().and_then(Value::as_str) {
        Some("awesome-copilot") => PromptSource::AwesomeCopilot,
        _ => PromptSource::Native,
    })
}

/// Bundled datasets have used both numeric and string ids.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
