//! Tracing subscriber setup. Logs go to stderr so CLI JSON on stdout stays clean.

use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "" => Some(LogFormat::Compact),
            "pretty" => Some(LogFormat::Pretty),
            "json" | "1" => Some(LogFormat::Json),
            _ => None,
        }
    }

    /// `MUTANTSCAN_LOG_FORMAT`, falling back to compact on unknown values.
    pub fn from_env() -> Self {
        std::env::var("MUTANTSCAN_LOG_FORMAT")
            .ok()
            .and_then(|v| Self::from_str(&v))
            .unwrap_or_default()
    }
}

/// Install the global subscriber. Filter from `RUST_LOG`, default `info`.
/// A second call is a no-op.
pub fn init_logging() {
    init_logging_with(LogFormat::from_env());
}

pub fn init_logging_with(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formats() {
        assert_eq!(LogFormat::from_str("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::from_str("1"), Some(LogFormat::Json));
        assert_eq!(LogFormat::from_str(" pretty "), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::from_str(""), Some(LogFormat::Compact));
        assert_eq!(LogFormat::from_str("loud"), None);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging_with(LogFormat::Compact);
        init_logging_with(LogFormat::Json);
    }
}
