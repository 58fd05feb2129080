//! Call insights batch entry point
//!
//! Reads a transcript CSV, annotates manager lines with greeting, goodbye,
//! manager-name and company-name insights, and writes the annotated CSV.
//!
//! Configuration priority: CLI flags > env vars > config/{env}.* >
//! config/default.* > defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use call_insights_config::{load_settings_from, AnalyzerBackend, AnalyzerSettings, Settings};
use call_insights_core::MorphAnalyzer;
use call_insights_dialog::DialogAnalysisPipeline;
use call_insights_persistence::{read_transcripts, write_insights};
use call_insights_text_processing::{LexiconAnalyzer, MessageTokenizer, MystemAnalyzer, MystemConfig};

#[derive(Parser, Debug)]
#[command(
    name = "call-insights",
    version,
    about = "Annotate sales call transcripts with greeting, goodbye and name insights"
)]
struct Cli {
    /// Transcript CSV to read (overrides config value).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Annotated CSV to write (overrides config value).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration environment, loads config/{env}.* on top of config/default.*.
    #[arg(long, env = "CALL_INSIGHTS_ENV")]
    env: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// Use the lexicon analyzer with this TOML word list instead of mystem.
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Path to the mystem executable.
    #[arg(long)]
    mystem: Option<String>,
}

impl Cli {
    /// Apply command line overrides on top of loaded settings
    fn apply(&self, settings: &mut Settings) {
        if let Some(input) = &self.input {
            settings.io.input_path = input.display().to_string();
        }
        if let Some(output) = &self.output {
            settings.io.output_path = output.display().to_string();
        }
        if let Some(level) = &self.log_level {
            settings.observability.log_level = level.clone();
        }
        if self.json_logs {
            settings.observability.log_json = true;
        }
        if let Some(lexicon) = &self.lexicon {
            settings.analyzer.backend = AnalyzerBackend::Lexicon;
            settings.analyzer.lexicon_path = Some(lexicon.display().to_string());
        }
        if let Some(mystem) = &self.mystem {
            settings.analyzer.mystem_binary = mystem.clone();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = resolve_settings(&cli, Path::new("config"))?;

    init_tracing(&settings);

    tracing::info!("Starting call-insights v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        input = %settings.io.input_path,
        output = %settings.io.output_path,
        analyzer = ?settings.analyzer.backend,
        "Configuration loaded"
    );

    // Reject bad input before the analyzer is started
    let records = read_transcripts(&settings.io.input_path)
        .await
        .with_context(|| format!("failed to read {}", settings.io.input_path))?;

    let analyzer = create_analyzer(&settings.analyzer).await?;
    let result = run_batch(&settings, analyzer.clone(), records).await;

    if let Err(e) = analyzer.shutdown().await {
        tracing::warn!(error = %e, "Analyzer shutdown failed");
    }

    match result {
        Ok(rows) => {
            tracing::info!(rows, output = %settings.io.output_path, "Batch complete");
            Ok(())
        },
        Err(e) => {
            tracing::error!(error = %e, "Batch aborted");
            Err(e)
        },
    }
}

/// Load layered settings from `dir`, apply CLI overrides, then validate once
///
/// Only a file that cannot be read or parsed falls back to defaults; a
/// setting that is still invalid after the overrides is fatal.
fn resolve_settings(cli: &Cli, dir: &Path) -> anyhow::Result<Settings> {
    let mut settings = match load_settings_from(dir, cli.env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        },
    };
    cli.apply(&mut settings);
    settings.validate().context("invalid configuration")?;
    Ok(settings)
}

/// Analyze all records and write the annotated file
async fn run_batch(
    settings: &Settings,
    analyzer: Arc<dyn MorphAnalyzer>,
    records: Vec<call_insights_core::TranscriptRecord>,
) -> anyhow::Result<usize> {
    let pipeline = DialogAnalysisPipeline::new(MessageTokenizer::new(analyzer));
    let batch = pipeline.run(records).await.context("dialog analysis failed")?;

    let rows = write_insights(&settings.io.output_path, &batch.records())
        .await
        .with_context(|| format!("failed to write {}", settings.io.output_path))?;
    Ok(rows)
}

/// Start the configured morphology backend
async fn create_analyzer(settings: &AnalyzerSettings) -> anyhow::Result<Arc<dyn MorphAnalyzer>> {
    let analyzer: Arc<dyn MorphAnalyzer> = match settings.backend {
        AnalyzerBackend::Mystem => {
            let config = MystemConfig::with_binary(&settings.mystem_binary);
            Arc::new(MystemAnalyzer::spawn(config).await?)
        },
        AnalyzerBackend::Lexicon => {
            let path = settings
                .lexicon_path
                .as_deref()
                .context("analyzer.lexicon_path is required for the lexicon backend")?;
            Arc::new(LexiconAnalyzer::load(path).await?)
        },
    };

    tracing::info!(analyzer = analyzer.name(), "Initialized morphological analyzer");
    Ok(analyzer)
}

fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        format!("call_insights={}", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    subscriber.with(fmt_layer).init();
}
