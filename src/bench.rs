//! Experiment harness: prompt sources, the batch loop and result sinks.

pub mod experiment;
pub mod prompts;
pub mod runner;
pub mod sink;

pub use experiment::Experiment;
pub use prompts::PromptSource;
pub use runner::{BatchReport, ExperimentRunner, SinkFailure};
pub use sink::{ArtifactExtension, FileSink, MemorySink, RecordSink, write_file};
