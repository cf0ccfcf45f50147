pub mod constants;
pub(crate) mod gemini;
pub(crate) mod openai;

pub use gemini::GeminiDispatcher;
pub use openai::OpenAiDispatcher;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{BenchError, Dispatcher, HttpClientConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Gemini,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::OpenAI => write!(f, "OpenAI"),
            Provider::Gemini => write!(f, "Gemini"),
        }
    }
}

impl FromStr for Provider {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" | "chatgpt" => Ok(Provider::OpenAI),
            "gemini" | "google" => Ok(Provider::Gemini),
            other => Err(BenchError::Configuration(format!(
                "Unsupported provider: {other}"
            ))),
        }
    }
}

impl Provider {
    /// Environment variables holding this provider's API key, in lookup order.
    pub fn api_key_env_vars(&self) -> &'static [&'static str] {
        match self {
            Provider::OpenAI => constants::openai::API_KEY_ENV_VARS,
            Provider::Gemini => constants::gemini::API_KEY_ENV_VARS,
        }
    }

    /// Name used in artifact file names (`response_<name>_<n>.txt`).
    pub fn artifact_name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "chatgpt",
            Provider::Gemini => "gemini",
        }
    }

    /// Build the dispatcher for this provider.
    pub fn dispatcher(&self, http: &HttpClientConfig) -> Result<Box<dyn Dispatcher>, BenchError> {
        Ok(match self {
            Provider::OpenAI => Box::new(OpenAiDispatcher::new(http)?),
            Provider::Gemini => Box::new(GeminiDispatcher::new(http)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_names() {
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAI);
        assert_eq!("ChatGPT".parse::<Provider>().unwrap(), Provider::OpenAI);
        assert_eq!("gemini".parse::<Provider>().unwrap(), Provider::Gemini);
        assert!("claude".parse::<Provider>().is_err());
    }

    #[test]
    fn artifact_names_are_stable() {
        assert_eq!(Provider::OpenAI.artifact_name(), "chatgpt");
        assert_eq!(Provider::Gemini.artifact_name(), "gemini");
    }
}
