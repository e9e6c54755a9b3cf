//! Logging infrastructure for charm tooling.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Log file path (if file logging enabled).
    pub file_path: Option<PathBuf>,
    /// Include source location.
    pub source_location: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
            LogLevel::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
            LogLevel::Info => tracing_subscriber::filter::LevelFilter::INFO,
            LogLevel::Warn => tracing_subscriber::filter::LevelFilter::WARN,
            LogLevel::Error => tracing_subscriber::filter::LevelFilter::ERROR,
        }
    }
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON structured format.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            file_path: None,
            source_location: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    ///
    /// `CHARM_LOG_LEVEL` (falling back to `RUST_LOG`), `CHARM_LOG_FORMAT`,
    /// `CHARM_LOG_FILE` and `CHARM_LOG_SOURCE`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level) = std::env::var("CHARM_LOG_LEVEL") {
            if let Some(l) = LogLevel::parse(&level) {
                config.level = l;
            }
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            if let Some(l) = LogLevel::parse(&level) {
                config.level = l;
            }
        }

        if let Ok(format) = std::env::var("CHARM_LOG_FORMAT") {
            config.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                _ => LogFormat::Pretty,
            };
        }

        if let Ok(file_path) = std::env::var("CHARM_LOG_FILE") {
            config.file_path = Some(PathBuf::from(file_path));
        }

        if let Ok(source_location) = std::env::var("CHARM_LOG_SOURCE") {
            config.source_location = source_location.to_lowercase() == "true" || source_location == "1";
        }

        config
    }

    /// Level from a `-v` count, as used by the command line.
    pub fn with_verbosity(mut self, verbose: u8, quiet: bool) -> Self {
        self.level = match verbose {
            0 if quiet => LogLevel::Error,
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
        self
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn format_layer<W>(format: LogFormat, writer: W, ansi: bool, source_location: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_file(source_location)
        .with_line_number(source_location);

    match format {
        LogFormat::Pretty => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Initialize logging with the given configuration.
///
/// Logs go to stderr, and additionally to `file_path` without ANSI colors
/// when one is set. `RUST_LOG` directives take precedence over `level`.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let mut layers: Vec<BoxedLayer> = vec![format_layer(
        config.format,
        io::stderr,
        true,
        config.source_location,
    )];

    if let Some(file_path) = &config.file_path {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        layers.push(format_layer(
            config.format,
            Mutex::new(file),
            false,
            config.source_location,
        ));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LogError::InitError(e.to_string()))?;

    tracing::debug!(level = config.level.as_str(), format = ?config.format, "logging initialized");
    Ok(())
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    #[error("failed to open log file: {0}")]
    FileError(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("Warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("invalid"), None);
    }

    #[test]
    fn test_log_level_from() {
        use tracing_subscriber::filter::LevelFilter;
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file_path.is_none());
        assert!(!config.source_location);
    }

    #[test]
    fn test_verbosity_levels() {
        let level = |v, q| LogConfig::default().with_verbosity(v, q).level;
        assert_eq!(level(0, true), LogLevel::Error);
        assert_eq!(level(0, false), LogLevel::Warn);
        assert_eq!(level(1, false), LogLevel::Info);
        assert_eq!(level(2, false), LogLevel::Debug);
        assert_eq!(level(5, false), LogLevel::Trace);
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("CHARM_LOG_LEVEL", "debug");
        env::set_var("CHARM_LOG_FORMAT", "json");
        env::set_var("CHARM_LOG_FILE", "/tmp/charm-test.log");
        env::set_var("CHARM_LOG_SOURCE", "1");

        let config = LogConfig::from_env();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file_path, Some(PathBuf::from("/tmp/charm-test.log")));
        assert!(config.source_location);

        env::remove_var("CHARM_LOG_LEVEL");
        env::remove_var("CHARM_LOG_FORMAT");
        env::remove_var("CHARM_LOG_FILE");
        env::remove_var("CHARM_LOG_SOURCE");
    }

    #[test]
    fn test_init_with_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            format: LogFormat::Compact,
            file_path: Some(dir.path().join("charm.log")),
            ..LogConfig::default()
        };

        // Only the first global subscriber in a test binary can be installed.
        match init(config) {
            Ok(()) => assert!(dir.path().join("charm.log").exists()),
            Err(e) => assert!(matches!(e, LogError::InitError(_))),
        }
    }
}
