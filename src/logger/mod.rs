//! Logger module
//!
//! Built on `tracing-subscriber` with:
//! - Console output with color control (ANSI only on a TTY)
//! - File output in Full, Compact or JSON format

pub mod config;
pub mod error;

pub use config::*;
pub use error::LoggerError;

use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Initialize the global subscriber with the given configuration
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    config
        .validate()
        .map_err(|e| LoggerError::config(e.to_string()))?;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let file = if config.file.enabled {
        Some(file_layer(&config.file)?)
    } else {
        None
    };
    let console = config
        .console
        .enabled
        .then(|| console_layer(&config.console));

    // File layer goes first so console ANSI settings never leak into span fields written to disk
    tracing_subscriber::registry()
        .with(filter)
        .with(file)
        .with(console)
        .try_init()?;

    Ok(())
}

fn console_layer<S>(config: &ConsoleConfig) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = config.colored && std::io::stdout().is_terminal();

    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer<S>(config: &FileConfig) -> Result<BoxedLayer<S>, LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let writer = Mutex::new(open_log_file(config)?);
    let base = fmt::layer().with_ansi(false).with_target(true);

    let layer = match config.format {
        LogFormat::Full => base.with_writer(writer).boxed(),
        LogFormat::Compact => base.compact().with_writer(writer).boxed(),
        LogFormat::Json => base.json().with_writer(writer).boxed(),
    };

    Ok(layer)
}

/// Opens the log file, creating its parent directory if needed.
pub(crate) fn open_log_file(config: &FileConfig) -> Result<File, LoggerError> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(config.append)
        .truncate(!config.append)
        .open(&config.path)?;

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use tempfile::TempDir;

    #[test]
    fn test_open_log_file_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let config = FileConfig {
            enabled: true,
            path: dir.path().join("nested/logs/app.log"),
            ..Default::default()
        };

        let mut file = open_log_file(&config).unwrap();
        file.write_all(b"first\n").unwrap();

        assert!(config.path.exists());
    }

    #[test]
    fn test_open_log_file_respects_append_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "old\n").unwrap();

        let appending = FileConfig {
            enabled: true,
            path: path.clone(),
            append: true,
            format: LogFormat::Json,
        };
        open_log_file(&appending).unwrap().write_all(b"new\n").unwrap();

        let mut contents = String::new();
        File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "old\nnew\n");

        let truncating = FileConfig {
            append: false,
            ..appending
        };
        open_log_file(&truncating).unwrap().write_all(b"fresh\n").unwrap();

        let mut contents = String::new();
        File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "fresh\n");
    }

    #[test]
    fn test_init_logger_rejects_invalid_config() {
        let config = LoggerConfig {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            init_logger(config),
            Err(LoggerError::Config { .. })
        ));
    }
}
