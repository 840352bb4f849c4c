use std::{env, str::FromStr};

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("unsupported log format: {other}")),
        }
    }
}

/// Subscriber settings, normally read from `RUST_LOG` and `LOG_FORMAT`.
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    pub filter: String,
    pub format: LogFormat,
}

impl LoggingOptions {
    pub fn from_env() -> Self {
        let filter = env::var("RUST_LOG").unwrap_or(DEFAULT_LOG_FILTER.to_string());
        let format = env::var("LOG_FORMAT")
            .ok()
            .and_then(|f| f.parse().ok())
            .unwrap_or(LogFormat::Text);

        Self { filter, format }
    }
}

pub fn configure_logging() -> Result<(), anyhow::Error> {
    configure_logging_with(LoggingOptions::from_env())
}

/// Installs the global tracing subscriber. A second call only logs a warning.
pub fn configure_logging_with(options: LoggingOptions) -> Result<(), anyhow::Error> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_str(&options.filter)?)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stdout);

    let result = match options.format {
        LogFormat::Json => subscriber.json().try_init(),
        LogFormat::Text => subscriber.try_init(),
    };

    if let Err(e) = result {
        warn!(
            "Failed to initialize logging, potentially because we have initialized logging already: {}",
            e
        );
    }

    Ok(())
}

#[cfg(test)]
mod unit_test {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let options = LoggingOptions {
            filter: "gateway=verbose".to_string(),
            format: LogFormat::Text,
        };
        assert!(configure_logging_with(options).is_err());
    }
}
