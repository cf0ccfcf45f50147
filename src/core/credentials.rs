//! API key loading.
//!
//! Keys are read once at startup and carried inside [`ProviderConfig`](super::ProviderConfig).
//! The secret never shows up in `Debug` output or logs.

use std::fmt;

use crate::provider::Provider;

use super::error::BenchError;

#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap an already known key. Blank keys are rejected.
    pub fn new(key: impl Into<String>) -> Result<Self, BenchError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(BenchError::Configuration("API key is empty".to_string()));
        }
        Ok(Self(key))
    }

    /// Read the key for `provider` from the process environment.
    pub fn from_env(provider: Provider) -> Result<Self, BenchError> {
        Self::from_lookup(provider, |name| std::env::var(name).ok())
    }

    /// Read the key for `provider` through `lookup`, trying each of the
    /// provider's variables in order. The first non-blank value wins.
    pub fn from_lookup<F>(provider: Provider, lookup: F) -> Result<Self, BenchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = provider.api_key_env_vars();

        vars.iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
            .map(Self)
            .ok_or_else(|| {
                BenchError::Configuration(format!(
                    "{provider} API key is not set. Define {} in your environment or in a local .env file.",
                    vars.join(" or ")
                ))
            })
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}
