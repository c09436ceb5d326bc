//! Success body of `POST /v1/obituaries/`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Response returned after the obituary was accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishResponse {
    /// Server-assigned identifier. Sent as a string or a number; absent
    /// or `null` still counts as an accepted submission.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub obituary_id: Option<String>,
    /// Link to the published obituary's public page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirector_url: Option<String>,
    /// Non-fatal issues the server noticed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Anything else in the body, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "obituary_id must be a string or number, got {other}"
        ))),
    }
}
