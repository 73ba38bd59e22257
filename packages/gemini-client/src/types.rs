//! Gemini API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Generate Content
// =============================================================================

/// `generateContent` request body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Conversation turns
    pub contents: Vec<Content>,
}

impl GenerateRequest {
    /// Create a request with a single user prompt.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(text)],
        }
    }
}

/// A single conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Role: "user" or "model"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }
}

/// A content part. Only text parts are modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Generate content response.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Concatenated text of the first candidate
    pub text: String,

    /// Why the model stopped, if reported
    pub finish_reason: Option<String>,

    /// Token usage statistics
    pub usage: Option<UsageMetadata>,
}

/// Raw response from API (for internal parsing).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponseRaw {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateResponseRaw {
    /// Collapse the raw payload into the first candidate's text.
    pub(crate) fn into_response(self) -> Option<GenerateResponse> {
        let usage = self.usage_metadata;
        let candidate = self.candidates.into_iter().next()?;
        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        Some(GenerateResponse {
            text,
            finish_reason: candidate.finish_reason,
            usage,
        })
    }
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,

    #[serde(default)]
    pub candidates_token_count: u32,

    #[serde(default)]
    pub total_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_request_shape() {
        let json = serde_json::to_value(GenerateRequest::prompt("Hello")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Hello" }] }]
            })
        );
    }

    #[test]
    fn test_response_joins_text_parts() {
        let raw: GenerateResponseRaw = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": "1}"}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4, "totalTokenCount": 14}
            }"#,
        )
        .unwrap();

        let response = raw.into_response().unwrap();
        assert_eq!(response.text, "{\"a\":1}");
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(response.usage.unwrap().total_token_count, 14);
    }

    #[test]
    fn test_response_without_candidates() {
        let raw: GenerateResponseRaw =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert_eq!(
            raw.prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref()),
            Some("SAFETY")
        );
        assert!(raw.into_response().is_none());
    }
}
