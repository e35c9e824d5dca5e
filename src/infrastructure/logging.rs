//! Tracing setup for the Sweet Shop API
//!
//! A `RUST_LOG` environment filter wins when set; otherwise the configured
//! level applies to this crate only, with dependencies held at warn.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LogFormat;

pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&config.level));

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
    }

    tracing::info!("Logging initialized with level: {}", config.level);
}

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("warn,sweetshop_api={level}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_scopes_level_to_this_crate() {
        let rendered = default_filter("debug").to_string();

        assert!(rendered.contains("sweetshop_api=debug"));
        assert!(rendered.contains("warn"));
    }

    #[test]
    fn test_default_filter_accepts_any_level() {
        let rendered = default_filter("trace").to_string();

        assert!(rendered.contains("sweetshop_api=trace"));
    }
}
