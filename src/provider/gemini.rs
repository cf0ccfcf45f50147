//! Google Gemini `generateContent` adapter.
//!
//! Sends the prompt as a single user content and reads the text parts of the
//! first candidate plus `usageMetadata.totalTokenCount`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{
    BenchError, Dispatcher, HttpClient, HttpClientConfig, Prompt, ProviderConfig, RawResponse,
    traits::ensure_prompt,
};
use crate::provider::constants::gemini;

pub struct GeminiDispatcher {
    http: HttpClient,
}

impl GeminiDispatcher {
    pub fn new(http_config: &HttpClientConfig) -> Result<Self, BenchError> {
        Ok(Self {
            http: HttpClient::new(http_config)?,
        })
    }
}

fn endpoint(config: &ProviderConfig) -> String {
    format!(
        "{}{}/{}{}",
        config.base_url,
        gemini::MODELS_PATH,
        config.model,
        gemini::GENERATE_CONTENT_ACTION
    )
}

#[async_trait]
impl Dispatcher for GeminiDispatcher {
    #[tracing::instrument(
        name = "gemini_dispatch",
        skip(self, prompt, config),
        fields(model = %config.model, prompt = prompt.index + 1),
        err
    )]
    async fn dispatch(
        &self,
        prompt: &Prompt,
        config: &ProviderConfig,
    ) -> Result<RawResponse, BenchError> {
        ensure_prompt(prompt)?;

        let request = Request {
            contents: vec![Content {
                role: Some(Role::User),
                parts: vec![Part {
                    text: prompt.text.clone(),
                }],
            }],
        };
        let headers = [(
            gemini::API_KEY_HEADER.to_string(),
            config.api_key.expose().to_string(),
        )];

        let response: Response = self
            .http
            .post_json(&endpoint(config), &headers, &request)
            .await?;
        into_raw_response(response)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    User,
    Model,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Request {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
    #[serde(default)]
    prompt_feedback: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    total_token_count: Option<u64>,
}

fn into_raw_response(res: Response) -> Result<RawResponse, BenchError> {
    let Some(candidate) = res.candidates.into_iter().next() else {
        let feedback = res
            .prompt_feedback
            .map(|f| f.to_string())
            .unwrap_or_else(|| "none".to_string());
        return Err(BenchError::parse(format!(
            "No candidates in response (prompt feedback: {feedback})"
        )));
    };

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    if parts.is_empty() {
        return Err(BenchError::parse(format!(
            "Candidate has no content (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    let text = parts.into_iter().map(|p| p.text).collect::<String>();

    Ok(RawResponse {
        text,
        total_tokens: res.usage_metadata.and_then(|u| u.total_token_count),
        model: res.model_version,
    })
}
