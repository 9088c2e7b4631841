use serde::{Deserialize, Serialize};

/// Error body returned by the admin backend for non-success responses.
///
/// FastAPI-style handlers put the human-readable reason in `detail`; some
/// endpoints answer with a plain `message` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    #[serde(default, deserialize_with = "detail_text")]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            message: None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        self.detail.as_deref().or(self.message.as_deref())
    }
}

// Validation failures carry a structured `detail` array rather than a string.
fn detail_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_string_and_structured_detail() {
        let plain: ApiError =
            serde_json::from_str(r#"{"detail":"Lesson not found"}"#).expect("decode");
        assert_eq!(plain.reason(), Some("Lesson not found"));

        let structured: ApiError =
            serde_json::from_str(r#"{"detail":[{"loc":["body"],"msg":"field required"}]}"#)
                .expect("decode");
        assert!(structured
            .reason()
            .is_some_and(|reason| reason.contains("field required")));

        let message_only: ApiError =
            serde_json::from_str(r#"{"message":"nope"}"#).expect("decode");
        assert_eq!(message_only.reason(), Some("nope"));
    }
}
