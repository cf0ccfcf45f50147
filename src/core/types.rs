use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::provider::{Provider, constants};

use super::{credentials::ApiKey, error::BenchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: ChatRole,
    pub content: String,
}

/// One unit of input. `index` is 0-based and decides artifact naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub index: usize,
    pub text: String,
}

impl Prompt {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Number a list of prompt texts in order.
    pub fn sequence<I, S>(texts: I) -> Vec<Prompt>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Prompt::new(index, text))
            .collect()
    }
}

/// Everything needed to reach one provider. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub api_key: ApiKey,
    pub model: String,
    pub base_url: String,
    /// Prepended as a system message by chat-style providers.
    pub system_prompt: Option<String>,
}

impl ProviderConfig {
    /// Config with the provider's default model and endpoint.
    pub fn new(provider: Provider, api_key: ApiKey) -> Self {
        let (model, base_url) = match provider {
            Provider::OpenAI => (constants::openai::DEFAULT_MODEL, constants::openai::API_BASE),
            Provider::Gemini => (constants::gemini::DEFAULT_MODEL, constants::gemini::API_BASE),
        };

        Self {
            provider,
            api_key,
            model: model.to_string(),
            base_url: base_url.to_string(),
            system_prompt: None,
        }
    }

    /// Load the credential from the environment and use provider defaults.
    pub fn from_env(provider: Provider) -> Result<Self, BenchError> {
        Ok(Self::new(provider, ApiKey::from_env(provider)?))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: Option<String>) -> Self {
        self.system_prompt = system_prompt;
        self
    }
}

/// Provider answer, already normalized by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub text: String,
    /// Prompt plus completion tokens, as reported by the provider.
    pub total_tokens: Option<u64>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseRecord {
    pub prompt_index: usize,
    pub provider: Provider,
    pub response_text: Option<String>,
    pub token_count: Option<u64>,
    pub elapsed_seconds: f64,
    pub error: Option<String>,
}

impl ResponseRecord {
    /// Turn a dispatch outcome into a record. Failed dispatches keep only the
    /// error message; text and tokens are left empty.
    pub fn from_outcome(
        prompt: &Prompt,
        provider: Provider,
        outcome: Result<RawResponse, BenchError>,
        elapsed: Duration,
    ) -> Self {
        let elapsed_seconds = elapsed.as_secs_f64();
        match outcome {
            Ok(raw) => Self {
                prompt_index: prompt.index,
                provider,
                response_text: Some(raw.text),
                token_count: raw.total_tokens,
                elapsed_seconds,
                error: None,
            },
            Err(err) => Self {
                prompt_index: prompt.index,
                provider,
                response_text: None,
                token_count: None,
                elapsed_seconds,
                error: Some(err.to_string()),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_outcome_copies_text_and_tokens() {
        let prompt = Prompt::new(2, "What is the capital of France?");
        let raw = RawResponse {
            text: "Paris".to_string(),
            total_tokens: Some(17),
            model: None,
        };

        let record = ResponseRecord::from_outcome(
            &prompt,
            Provider::Gemini,
            Ok(raw),
            Duration::from_millis(250),
        );

        assert_eq!(record.prompt_index, 2);
        assert_eq!(record.response_text.as_deref(), Some("Paris"));
        assert_eq!(record.token_count, Some(17));
        assert_eq!(record.elapsed_seconds, 0.25);
        assert!(record.is_success());
    }

    #[test]
    fn failed_outcome_has_no_text_or_tokens() {
        let prompt = Prompt::new(0, "Hello!");
        let err = BenchError::Provider {
            status: 401,
            body: "unauthorized".to_string(),
        };

        let record =
            ResponseRecord::from_outcome(&prompt, Provider::OpenAI, Err(err), Duration::ZERO);

        assert!(!record.is_success());
        assert_eq!(record.response_text, None);
        assert_eq!(record.token_count, None);
        assert!(record.error.unwrap().contains("401"));
    }

    #[test]
    fn sequence_numbers_in_order() {
        let prompts = Prompt::sequence(["a", "b", "c"]);
        let indices: Vec<usize> = prompts.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(prompts[1].text, "b");
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let config = ProviderConfig::new(Provider::OpenAI, ApiKey::new("k").unwrap())
            .with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.model, constants::openai::DEFAULT_MODEL);
    }
}
