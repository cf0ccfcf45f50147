use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use promptbench::{
    ArtifactExtension, Experiment, ExperimentRunner, FileSink, HttpClientConfig, Provider,
    ProviderConfig,
};

/// Send an experiment's prompts to one provider and save every answer.
#[derive(Debug, Parser)]
#[command(name = "promptbench", version, about)]
struct Cli {
    /// Provider to call (openai or gemini)
    #[arg(short, long)]
    provider: Provider,

    /// Experiment to run (code-generation, error-analysis, code-comprehension, smoke)
    #[arg(short, long, default_value = "code-generation")]
    experiment: Experiment,

    /// Model identifier; defaults to the provider's default model
    #[arg(short, long)]
    model: Option<String>,

    /// Override the provider's API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Root directory for response artifacts
    #[arg(long, default_value = "responses", env = "PROMPTBENCH_RESULTS_DIR")]
    results_dir: PathBuf,

    /// Root directory holding file-based prompt sets
    #[arg(long, default_value = "prompts", env = "PROMPTBENCH_PROMPTS_DIR")]
    prompts_dir: PathBuf,

    /// Read every consecutive prompt<n>.txt instead of the fixed six
    #[arg(long)]
    discover_prompts: bool,

    /// File extension of response artifacts
    #[arg(long, value_enum, default_value_t = ArtifactExtension::Txt)]
    extension: ArtifactExtension,

    /// Per-request timeout in seconds; unset means no timeout
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Credentials first: nothing goes out without a key.
    let mut config = ProviderConfig::from_env(cli.provider)?
        .with_system_prompt(cli.experiment.system_prompt(cli.provider));
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    let mut http = HttpClientConfig::default();
    if let Some(secs) = cli.timeout_secs {
        http = http.with_timeout(Duration::from_secs(secs));
    }
    let dispatcher = config.provider.dispatcher(&http)?;

    let source = if cli.discover_prompts {
        cli.experiment.discovered_prompt_source(&cli.prompts_dir)
    } else {
        cli.experiment.prompt_source(&cli.prompts_dir)
    };
    let prompts = source.load()?;
    let mut sink = FileSink::new(&cli.results_dir).with_extension(cli.extension);

    info!(
        provider = %config.provider,
        model = %config.model,
        experiment = %cli.experiment,
        prompts = prompts.len(),
        "Starting batch"
    );

    let report = ExperimentRunner::new(dispatcher.as_ref(), &config)
        .run(
            cli.experiment.name(),
            cli.experiment.category(),
            &prompts,
            &mut sink,
        )
        .await;

    println!(
        "{}/{} responses saved to {} ({} tokens, {:.2} seconds)",
        report.succeeded(),
        report.records.len(),
        sink.root().join(cli.experiment.category()).display(),
        report.total_tokens(),
        report.total_elapsed_seconds
    );

    Ok(())
}
