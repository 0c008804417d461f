use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{Level, event};
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

/// Keeps the background writer alive; dropping it flushes pending events.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

pub fn telemetry_path(outputs: &ResolvedOutputs) -> PathBuf {
    outputs
        .summary_md
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("telemetry.jsonl")
}

pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
    run_id: &str,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_path = telemetry_path(outputs);
    if let Some(dir) = telemetry_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        fs::create_dir_all(dir).with_context(|| {
            format!("creating telemetry directory at {}", dir.display())
        })?;
    }

    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file at {}", telemetry_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let level = logging.level().unwrap_or(Level::INFO);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // A global subscriber may already be installed when running under tests.
    let _ = tracing::subscriber::set_global_default(subscriber);

    event!(
        target: "marjapussi_bench::run",
        Level::INFO,
        run_id,
        telemetry = %telemetry_path.display(),
        "structured logging enabled"
    );

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}
