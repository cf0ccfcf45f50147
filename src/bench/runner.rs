//! The batch loop: dispatch, time, extract and store each prompt in order.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::core::{Dispatcher, Prompt, ProviderConfig, ResponseRecord, timed};
use crate::provider::Provider;

use super::sink::RecordSink;

/// A record that could not be stored. The record itself stays in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SinkFailure {
    pub prompt_index: usize,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub experiment: String,
    pub provider: Provider,
    pub model: String,
    pub records: Vec<ResponseRecord>,
    pub sink_failures: Vec<SinkFailure>,
    pub total_elapsed_seconds: f64,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.succeeded()
    }

    /// Sum of the reported token counts. Records without a count are skipped.
    pub fn total_tokens(&self) -> u64 {
        self.records.iter().filter_map(|r| r.token_count).sum()
    }
}

/// Runs prompt batches against one provider.
///
/// Holding a [`ProviderConfig`] means the credential was already loaded, so a
/// missing key can never reach the network.
pub struct ExperimentRunner<'a> {
    dispatcher: &'a dyn Dispatcher,
    config: &'a ProviderConfig,
}

impl<'a> ExperimentRunner<'a> {
    pub fn new(dispatcher: &'a dyn Dispatcher, config: &'a ProviderConfig) -> Self {
        Self { dispatcher, config }
    }

    /// Run every prompt sequentially and hand each record to `sink`.
    ///
    /// Provider and sink failures are logged and kept per prompt; the loop
    /// always reaches the last prompt.
    #[tracing::instrument(
        name = "batch",
        skip(self, prompts, sink),
        fields(provider = %self.config.provider, model = %self.config.model, prompts = prompts.len())
    )]
    pub async fn run(
        &self,
        experiment: &str,
        category: &str,
        prompts: &[Prompt],
        sink: &mut dyn RecordSink,
    ) -> BatchReport {
        let mut records = Vec::with_capacity(prompts.len());
        let mut sink_failures = Vec::new();

        let ((), total) = timed(async {
            for prompt in prompts {
                let (outcome, elapsed) =
                    timed(self.dispatcher.dispatch(prompt, self.config)).await;

                if let Err(e) = &outcome {
                    warn!(prompt = prompt.index + 1, error = %e, "Prompt failed, continuing");
                }

                let record =
                    ResponseRecord::from_outcome(prompt, self.config.provider, outcome, elapsed);

                if let Err(e) = sink.accept(category, &record) {
                    error!(prompt = prompt.index + 1, error = %e, "Failed to store record");
                    sink_failures.push(SinkFailure {
                        prompt_index: prompt.index,
                        error: e.to_string(),
                    });
                }

                records.push(record);
            }
        })
        .await;

        let report = BatchReport {
            experiment: experiment.to_string(),
            provider: self.config.provider,
            model: self.config.model.clone(),
            records,
            sink_failures,
            total_elapsed_seconds: total.as_secs_f64(),
        };

        if let Err(e) = sink.finish(category, &report) {
            error!(error = %e, "Failed to write batch summary");
        }

        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            sink_failures = report.sink_failures.len(),
            total_tokens = report.total_tokens(),
            elapsed_seconds = report.total_elapsed_seconds,
            "Batch finished"
        );

        report
    }
}
