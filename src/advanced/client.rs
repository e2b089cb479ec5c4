//! Client for the remote multimodal completion service (Gemini
//! `generateContent`).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AdvancedError;
use super::image::parse_data_url;

/// Returned without a network call when the request carries nothing.
pub const NO_INPUT_MESSAGE: &str = "No input provided.";
/// Returned when the service answers with no usable candidate.
pub const NO_RESPONSE_MESSAGE: &str = "No response generated.";

/// Fixed directive sent with every request.
const SYSTEM_INSTRUCTION: &str = "You are a specialized computational engine. Provide direct, \
     concise answers to the user's query. If math is involved, solve it step-by-step but keep \
     it brief. Do not introduce yourself.";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize, Debug)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

/// Thin HTTP client around the completion endpoint.
pub struct CompletionClient {
    http: reqwest::Client,
    model: String,
    api_key: Option<String>,
}

impl CompletionClient {
    pub fn new(model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            model: model.into(),
            api_key,
        }
    }

    /// Forward text and/or an image data-URL, returning the response text.
    pub async fn generate(
        &self,
        text: &str,
        image_data_url: Option<&str>,
    ) -> Result<String, AdvancedError> {
        let key = self.api_key.as_deref().ok_or(AdvancedError::MissingApiKey)?;
        let Some(body) = build_request_body(text, image_data_url) else {
            return Ok(NO_INPUT_MESSAGE.to_string());
        };

        let url = format!("{API_BASE}/{}:generateContent", self.model);
        debug!(model = %self.model, "sending advanced request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let payload: GenerateContentResponse = response.json().await?;
        Ok(response_text(payload))
    }
}

/// Assemble the request body: inline image first (when present), then the
/// text part. `None` when both are absent.
fn build_request_body(text: &str, image_data_url: Option<&str>) -> Option<GenerateContentRequest> {
    let mut parts = Vec::new();

    if let Some(url) = image_data_url {
        let payload = parse_data_url(url);
        parts.push(Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: payload.mime_type,
                data: payload.data,
            }),
        });
    }

    if !text.is_empty() {
        parts.push(Part {
            text: Some(text.to_string()),
            inline_data: None,
        });
    }

    if parts.is_empty() {
        return None;
    }

    Some(GenerateContentRequest {
        contents: vec![Content { parts }],
        system_instruction: Content {
            parts: vec![Part {
                text: Some(SYSTEM_INSTRUCTION.to_string()),
                inline_data: None,
            }],
        },
    })
}

/// Concatenate the first candidate's text parts.
fn response_text(payload: GenerateContentResponse) -> String {
    let text = payload
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.is_empty() {
        NO_RESPONSE_MESSAGE.to_string()
    } else {
        text
    }
}
