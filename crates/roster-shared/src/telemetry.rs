//! Telemetry setup

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt,
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::LoggingSettings;
use crate::error::AppError;

/// Where log lines go besides the rolling file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// The terminal belongs to the TUI, so only the file is written.
    File,
    FileAndStderr,
}

/// Line format of the rolling file, picked by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }

    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|v| Self::from_name(&v))
            .unwrap_or(LogFormat::Pretty)
    }
}

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

pub type RosterSubscriber = Layered<Vec<BoxedLayer>, FilteredRegistry>;

pub fn init_telemetry(settings: &LoggingSettings, sink: LogSink) -> Result<(), AppError> {
    build_subscriber(settings, sink, LogFormat::from_env())?
        .try_init()
        .map_err(|e| AppError::TelemetryError(e.to_string()))
}

/// Assembles the subscriber without installing it.
pub fn build_subscriber(
    settings: &LoggingSettings,
    sink: LogSink,
    format: LogFormat,
) -> Result<RosterSubscriber, AppError> {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| AppError::TelemetryError(e.to_string()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("roster")
        .filename_suffix("log")
        .build(&settings.dir)
        .map_err(|e| AppError::TelemetryError(e.to_string()))?;

    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);

    layers.push(match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_target(true)
            .with_level(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_writer(file_appender)
            .with_target(true)
            .with_level(true)
            .with_ansi(false)
            .boxed(),
    });

    if sink == LogSink::FileAndStderr {
        layers.push(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .boxed(),
        );
    }

    Ok(tracing_subscriber::registry().with(filter).with(layers))
}
