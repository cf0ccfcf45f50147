//! OpenAI chat completions adapter.
//!
//! Sends a role-tagged message list and reads `choices[0].message.content`
//! plus `usage.total_tokens` from the answer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{
    BenchError, ChatRole, Dispatcher, HttpClient, HttpClientConfig, Message, Prompt,
    ProviderConfig, RawResponse, traits::ensure_prompt,
};
use crate::provider::constants::openai;

pub struct OpenAiDispatcher {
    http: HttpClient,
}

impl OpenAiDispatcher {
    pub fn new(http_config: &HttpClientConfig) -> Result<Self, BenchError> {
        Ok(Self {
            http: HttpClient::new(http_config)?,
        })
    }
}

#[async_trait]
impl Dispatcher for OpenAiDispatcher {
    #[tracing::instrument(
        name = "openai_dispatch",
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

        let request = build_request(prompt, config);
        let url = format!("{}{}", config.base_url, openai::CHAT_COMPLETIONS_ENDPOINT);
        let headers = [(
            "Authorization".to_string(),
            format!("Bearer {}", config.api_key.expose()),
        )];

        let response: ChatCompletionResponse = self.http.post_json(&url, &headers, &request).await?;
        into_raw_response(response)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: Option<u64>,
}

fn build_request(prompt: &Prompt, config: &ProviderConfig) -> ChatCompletionRequest {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &config.system_prompt {
        messages.push(Message {
            role: ChatRole::System,
            content: system.clone(),
        });
    }
    messages.push(Message {
        role: ChatRole::User,
        content: prompt.text.clone(),
    });

    ChatCompletionRequest {
        model: config.model.clone(),
        messages,
    }
}

fn into_raw_response(res: ChatCompletionResponse) -> Result<RawResponse, BenchError> {
    let message = res
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| BenchError::parse("No choices in response"))?;

    let text = match (message.content, message.refusal) {
        (Some(content), _) => content,
        (None, Some(refusal)) => {
            return Err(BenchError::parse(format!("Model refused: {refusal}")));
        }
        (None, None) => return Err(BenchError::parse("No content in message")),
    };

    Ok(RawResponse {
        text,
        total_tokens: res.usage.and_then(|u| u.total_tokens),
        model: res.model,
    })
}
