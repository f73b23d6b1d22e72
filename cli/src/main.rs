//! CLI entrypoint for GuruBu
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use gurubu_application::{
    AiEstimator, DisabledAiEstimator, EstimationProgress, EstimationRequest, NoProgress,
    NoSummaryLogger, ReconcileRoundInput, ReconcileRoundUseCase, SummaryLogger, VoteStore,
};
use gurubu_domain::{AiEstimate, EstimateValue, Label, OutputFormat, ParticipantId, RoomId, Votes};
use gurubu_infrastructure::{
    ConfigLoader, FileConfig, InMemoryVoteStore, JsonFileVoteStore, JsonlSummaryLogger,
    StaticAiEstimator,
};
use gurubu_presentation::{Cli, ConsoleFormatter, ProgressReporter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    // --scale replaces the configured scale, so a bad one there does not matter
    if cli.scale.is_some() {
        config.validate_without_scale()?;
    } else {
        config.validate()?;
    }

    let _log_guard = init_logging(&cli, &config);
    info!("Starting GuruBu");

    if cli.no_color || !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    let scale = match &cli.scale {
        Some(scale) => scale.clone(),
        None => config.point_scale()?,
    };
    let room = RoomId::new(cli.room.clone().unwrap_or_else(|| config.estimation.room.clone()));

    // === Dependency Injection ===
    let store: Arc<dyn VoteStore> = match &cli.votes_file {
        Some(path) => Arc::new(JsonFileVoteStore::open(path, room.clone()).await?),
        None => {
            let store = InMemoryVoteStore::new();
            store.insert_room(room.clone(), Votes::default()).await;
            Arc::new(store)
        }
    };
    for vote in &cli.votes {
        let participant = ParticipantId::new(vote.participant.clone());
        match &vote.label {
            Some(label) => {
                store
                    .cast(&room, participant, Label::new(label.clone()))
                    .await?
            }
            None => store.join(&room, participant).await?,
        }
    }
    if cli.votes_file.is_none() && cli.votes.is_empty() {
        warn!("No votes given; use --vote NAME=LABEL or --votes-file");
    }

    let (estimator, ai_enabled) = build_estimator(&cli, &config)?;
    let params = config.estimation_params().with_ai_enabled(ai_enabled);

    let logger: Arc<dyn SummaryLogger> = match &config.logging.summary_log {
        Some(path) => match JsonlSummaryLogger::new(expand_home(path)) {
            Some(logger) => {
                info!("Writing round log to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoSummaryLogger),
        },
        None => Arc::new(NoSummaryLogger),
    };

    let mut input = ReconcileRoundInput::new(room.clone(), scale.clone());
    if ai_enabled {
        match estimation_request(&cli, &scale) {
            Some(request) => input = input.with_request(request),
            None => warn!("AI estimation needs --item to know what to estimate; skipping"),
        }
    }

    let use_case: ReconcileRoundUseCase<dyn VoteStore, dyn AiEstimator> =
        ReconcileRoundUseCase::new(store, estimator)
            .with_params(params)
            .with_logger(logger);

    let format: OutputFormat = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    // Keep stderr quiet when the output is meant for machines
    let progress: Box<dyn EstimationProgress> = if cli.quiet || format == OutputFormat::Json {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let summary = use_case
        .execute_with_progress(input, progress.as_ref())
        .await
        .context("Reconciliation failed")?;

    println!("{}", ConsoleFormatter::render(&summary, format));

    if cli.clear {
        use_case.advance(&room).await?;
        info!("Votes cleared for the next item");
    }

    Ok(())
}

/// Initialize tracing: stderr always, plus a daily log file when configured
fn init_logging(cli: &Cli, config: &FileConfig) -> Option<WorkerGuard> {
    // RUST_LOG wins over -v flags
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (writer, guard) = match &config.logging.trace_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(expand_home(dir), "gurubu.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };
    let file_layer = writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Pick the AI estimator; the flag says whether the AI is consulted at all
fn build_estimator(cli: &Cli, config: &FileConfig) -> Result<(Arc<dyn AiEstimator>, bool)> {
    if cli.no_ai {
        return Ok((Arc::new(DisabledAiEstimator), false));
    }

    if let Some(value) = &cli.ai_estimate {
        let estimate = AiEstimate::new(EstimateValue::Text(value.clone()))
            .with_confidence(cli.ai_confidence.unwrap_or(0.0))
            .with_reasoning(cli.ai_reasoning.clone().unwrap_or_default())
            .with_split_recommendation(cli.ai_split);
        return Ok((Arc::new(StaticAiEstimator::new(estimate)), true));
    }

    let endpoint = cli
        .ai_endpoint
        .clone()
        .or_else(|| config.ai.enabled.then(|| config.ai.endpoint.clone()).flatten());

    match endpoint {
        Some(endpoint) => http_estimator(endpoint, config),
        None => Ok((Arc::new(DisabledAiEstimator), false)),
    }
}

#[cfg(feature = "ai-service")]
fn http_estimator(endpoint: String, config: &FileConfig) -> Result<(Arc<dyn AiEstimator>, bool)> {
    let api_key = config
        .ai
        .api_key_env
        .as_deref()
        .and_then(|var| std::env::var(var).ok());
    let timeout = config.estimation_params().ai_timeout;

    let estimator = gurubu_infrastructure::HttpAiEstimator::with_timeout(endpoint, timeout)?
        .with_api_key(api_key);
    info!("Using AI estimation service at {}", estimator.endpoint());
    Ok((Arc::new(estimator), true))
}

#[cfg(not(feature = "ai-service"))]
fn http_estimator(endpoint: String, _config: &FileConfig) -> Result<(Arc<dyn AiEstimator>, bool)> {
    warn!(
        "Built without the ai-service feature; ignoring AI endpoint {}",
        endpoint
    );
    Ok((Arc::new(DisabledAiEstimator), false))
}

/// Describe the item for the AI; a static estimate needs no item key
fn estimation_request(cli: &Cli, scale: &gurubu_domain::PointScale) -> Option<EstimationRequest> {
    let key = match (&cli.item, &cli.ai_estimate) {
        (Some(item), _) => item.clone(),
        (None, Some(_)) => "manual".to_string(),
        (None, None) => return None,
    };

    Some(
        EstimationRequest::new(key, scale.clone())
            .with_title(cli.title.clone().unwrap_or_default())
            .with_description(cli.description.clone().unwrap_or_default()),
    )
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
