//! Logging initialization (§10.3), mirroring the reference's
//! `logging.rs`: a `LogFormat` enum selected by `log.format`, a level
//! filter built from `log.level`, and an optional rolling file appender
//! in place of stdout when `log.path` is set.

use std::path::Path;
use std::str::FromStr;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    Full,
    #[default]
    Compact,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Maps the §6 `DEBUG..CRITICAL` level names onto `tracing`'s
/// `TRACE..ERROR` — `CRITICAL` collapses onto `ERROR` since `tracing` has
/// no fifth level.
fn tracing_level_name(level: &str) -> &'static str {
    match level.to_ascii_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "info",
    }
}

/// Installs the global subscriber. Returns a [`WorkerGuard`] that must be
/// held for the process lifetime when logging to a file (dropping it
/// flushes and stops the background writer thread).
pub fn init(level: &str, format: LogFormat, log_path: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_new(tracing_level_name(level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, guard): (BoxMakeWriter, Option<WorkerGuard>) = match log_path {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("previewgate.log"));
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    match format {
        LogFormat::Full => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .init(),
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_collapses_onto_error() {
        assert_eq!(tracing_level_name("CRITICAL"), "error");
        assert_eq!(tracing_level_name("critical"), "error");
    }

    #[test]
    fn unknown_level_defaults_to_info() {
        assert_eq!(tracing_level_name("bogus"), "info");
    }

    #[test]
    fn log_format_parses_case_insensitively() {
        assert!(matches!("Json".parse::<LogFormat>(), Ok(LogFormat::Json)));
        assert!("nonsense".parse::<LogFormat>().is_err());
    }
}
