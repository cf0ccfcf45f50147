//! # promptbench
//!
//! Sequential prompt/response benchmarking against interchangeable LLM providers.
//!
//! Each prompt is sent to one provider, timed end to end, and stored as a
//! [`ResponseRecord`] carrying the answer text, the provider-reported total
//! token count and the elapsed seconds.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use promptbench::{ExperimentRunner, FileSink, HttpClientConfig, Prompt, Provider, ProviderConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProviderConfig::from_env(Provider::Gemini)?;
//!     let dispatcher = config.provider.dispatcher(&HttpClientConfig::default())?;
//!
//!     let prompts = Prompt::sequence(["What is the capital of France?"]);
//!     let mut sink = FileSink::new("responses");
//!
//!     let report = ExperimentRunner::new(dispatcher.as_ref(), &config)
//!         .run("capital", "capital", &prompts, &mut sink)
//!         .await;
//!     println!("{} tokens", report.total_tokens());
//!     Ok(())
//! }
//! ```

pub mod bench;
pub mod core;
pub mod provider;

pub use bench::{
    ArtifactExtension, BatchReport, Experiment, ExperimentRunner, FileSink, MemorySink,
    PromptSource, RecordSink, SinkFailure, write_file,
};
pub use crate::core::{
    ApiKey, BenchError, Dispatcher, HttpClientConfig, Prompt, ProviderConfig, RawResponse,
    ResponseRecord, timed,
};
pub use provider::{GeminiDispatcher, OpenAiDispatcher, Provider};
