//! paper-synth - Entry Point
//!
//! Connects to the model backend, then serves the question form over HTTP.

use std::net::IpAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use paper_synth::config::{self, Config};
use paper_synth::generator::CompletionGenerator;
use paper_synth::{CrossrefClient, PaperComposer, PaperServer};

#[derive(Parser, Debug)]
#[command(name = "paper-synth")]
#[command(about = "Draft a research paper from a question, with Crossref references")]
#[command(version)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    host: IpAddr,

    /// HTTP server port
    #[arg(long, default_value_t = config::DEFAULT_PORT, env = "PORT")]
    port: u16,

    /// Development mode: debug logging and detailed error pages
    #[arg(long, env = "PAPER_SYNTH_DEBUG")]
    debug: bool,

    /// Base URL of the model backend (OpenAI-compatible completions API)
    #[arg(long, default_value = config::api::GENERATOR_API, env = "GENERATOR_URL")]
    generator_url: String,

    /// Model name served by the backend
    #[arg(long, default_value = config::api::DEFAULT_MODEL, env = "GENERATOR_MODEL")]
    model: String,

    /// Token ceiling per generated section
    #[arg(long, default_value_t = config::paper::MAX_LENGTH)]
    max_length: u32,

    /// Base URL of the Crossref API
    #[arg(long = "crossref-url", default_value = config::api::CROSSREF_API, env = "CROSSREF_API_URL")]
    crossref_api_url: String,

    /// Contact address for the Crossref polite pool
    #[arg(long, env = "CROSSREF_MAILTO")]
    mailto: Option<String>,

    /// Number of references per paper
    #[arg(long, default_value_t = config::paper::REFERENCE_COUNT)]
    references: usize,

    /// Retries for transient outbound failures (0 disables retrying)
    #[arg(long, default_value_t = 0)]
    max_retries: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = Config::new(self.debug);
        config.host = self.host;
        config.port = self.port;
        config.generator_url = self.generator_url;
        config.model = self.model;
        config.max_length = self.max_length;
        config.crossref_api_url = self.crossref_api_url;
        config.crossref_mailto = self.mailto;
        config.reference_count = self.references;
        config.max_retries = self.max_retries;
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    init_tracing(cli.log_level.as_deref().unwrap_or(default_level), cli.json_logs);

    let json_logs = cli.json_logs;
    let config = cli.into_config()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        debug = config.debug,
        json_logs,
        "Starting paper-synth"
    );

    // Fails fast when the model backend is unreachable or lacks the model.
    let generator = CompletionGenerator::connect(&config).await?;
    let references = CrossrefClient::new(&config)?;

    let composer =
        PaperComposer::new(Arc::new(generator), Arc::new(references)).with_limits(&config);

    PaperServer::new(composer, config.debug).run_http(config.listen_addr()).await
}
