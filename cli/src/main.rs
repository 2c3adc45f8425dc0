//! CLI entrypoint for Review Panel
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use panel_application::{
    GenerationClient, KnowledgeBase, NoKnowledgeBase, NoLabeler, NoProgress, ProcessChunksUseCase,
    ProcessMode, ReviewChunkUseCase, ReviewProgressNotifier, ReviewerClients, ReviewerPool,
    TextLabeler,
};
use panel_domain::ChunkReport;
use panel_infrastructure::{
    ConfigLoader, ConfigRubricSource, FileConfig, FileKnowledgeBase, HttpZeroShotLabeler,
    JsonlChunkStore, JsonlResultSink, OpenAiGenerationClient,
};
use panel_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging from `-v` count; `RUST_LOG` takes precedence.
///
/// Returns the guard of the log file writer, which must outlive the run.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(chunks) = &cli.chunks {
        config.storage.chunks = chunks.clone();
    }
    if let Some(results) = &cli.results {
        config.storage.results = results.clone();
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let details = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("Invalid configuration:\n{}", details);
    }

    Ok(config)
}

fn build_labeler(config: &FileConfig) -> Result<Arc<dyn TextLabeler>> {
    if !config.labeler.enabled {
        return Ok(Arc::new(NoLabeler));
    }

    let labeler = HttpZeroShotLabeler::from_config(&config.labeler)
        .context("Failed to create zero-shot labeler")?;
    if !labeler
        .labels()
        .iter()
        .any(|l| l == &config.review.unrelated_label)
    {
        warn!(
            "Labeler labels do not include the unrelated label '{}'",
            config.review.unrelated_label
        );
    }
    Ok(Arc::new(labeler))
}

fn build_knowledge_base(config: &FileConfig) -> Result<Arc<dyn KnowledgeBase>> {
    match &config.knowledge_base.path {
        Some(path) => {
            let kb = FileKnowledgeBase::load(path, config.knowledge_base.limit)
                .context("Failed to load knowledge base")?;
            info!("Knowledge base: {} items from {}", kb.len(), path.display());
            Ok(Arc::new(kb))
        }
        None => Ok(Arc::new(NoKnowledgeBase)),
    }
}

fn render(format: OutputFormat, report: &ChunkReport) -> String {
    match format {
        OutputFormat::Summary => ConsoleFormatter::format_report(report),
        OutputFormat::Narrative => ConsoleFormatter::format_narrative(report),
        OutputFormat::Json => ConsoleFormatter::format_json(report),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;
    info!("Starting Review Panel");

    let config = load_config(&cli)?;

    // === Dependency Injection ===
    let pool = ReviewerPool::load(&ConfigRubricSource::from_config(&config))
        .context("Failed to build reviewer pool")?;

    let generator: Arc<dyn GenerationClient> = Arc::new(
        OpenAiGenerationClient::from_config(&config.generator)
            .context("Failed to create generator client")?,
    );
    let evaluator: Arc<dyn GenerationClient> = Arc::new(
        OpenAiGenerationClient::from_config(&config.evaluator)
            .context("Failed to create evaluator client")?,
    );
    let clients = ReviewerClients::new(generator, evaluator, build_knowledge_base(&config)?);

    let store = JsonlChunkStore::open(&config.storage.chunks).with_context(|| {
        format!(
            "Failed to open chunk store {}",
            config.storage.chunks.display()
        )
    })?;
    let sink = JsonlResultSink::new(&config.storage.results).with_context(|| {
        format!(
            "Failed to open results file {}",
            config.storage.results.display()
        )
    })?;

    let review = ReviewChunkUseCase::new(&pool, clients, config.review.to_review_params());
    let use_case = ProcessChunksUseCase::new(
        Arc::new(store),
        Arc::new(sink),
        build_labeler(&config)?,
        review,
    );

    // Ctrl-C abandons the chunk under review, which stays pending
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, abandoning the current chunk (it stays pending)");
                cancel.cancel();
            }
        });
    }

    let mode = if cli.next {
        ProcessMode::Next
    } else {
        ProcessMode::All
    };

    if !cli.quiet && cli.output != OutputFormat::Json {
        println!(
            "Reviewing {} with {} reviewers: {}",
            config.storage.chunks.display(),
            pool.len(),
            pool.names().join(", ")
        );
    }

    // JSON output keeps stdout machine-readable
    let progress: Box<dyn ReviewProgressNotifier> =
        if cli.quiet || cli.output == OutputFormat::Json {
            Box::new(NoProgress)
        } else if std::io::stdout().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };

    let summary = use_case
        .execute_with_progress(mode, &cancel, progress.as_ref())
        .await
        .context("Failed to list pending chunks")?;

    if !cli.quiet || cli.output == OutputFormat::Json {
        for report in &summary.reports {
            println!("{}", render(cli.output, report));
        }
    }

    if !cli.quiet && cli.output != OutputFormat::Json {
        println!("{}", ConsoleFormatter::format_summary(&summary));
    }

    Ok(())
}
