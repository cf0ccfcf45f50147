use async_trait::async_trait;

use super::{
    error::BenchError,
    types::{Prompt, ProviderConfig, RawResponse},
};

/// One provider backend. The batch loop only talks to this trait.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Send a single prompt and wait for the provider's answer.
    ///
    /// Implementations issue exactly one request per call and never retry.
    async fn dispatch(
        &self,
        prompt: &Prompt,
        config: &ProviderConfig,
    ) -> Result<RawResponse, BenchError>;
}

pub(crate) fn ensure_prompt(prompt: &Prompt) -> Result<(), BenchError> {
    if prompt.text.trim().is_empty() {
        return Err(BenchError::InvalidPrompt(format!(
            "prompt {} is empty",
            prompt.index + 1
        )));
    }
    Ok(())
}
