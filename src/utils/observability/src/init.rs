// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_LOGGING_LEVEL: &str = "info";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Text,
    /// Bunyan-compatible JSON lines
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directives in `RUST_LOG` syntax. `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOGGING_LEVEL.to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Keeps the background log writer alive. Drop it last, or buffered records
/// may be lost.
#[must_use]
#[derive(Default)]
pub struct Guard {
    pub appender: Option<WorkerGuard>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn configure_logging(app_name: &str, config: &LoggingConfig) -> Guard {
    // Logging may be already initialized when running under tests
    if tracing::dispatcher::has_been_set() {
        return Guard::default();
    }

    // Use configuration from RUST_LOG env var if provided
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOGGING_LEVEL));

    // Redirect all standard logging to tracing events
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to set LogTracer: {e}");
    }

    match config.format {
        LogFormat::Text => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .with_writer(std::io::stderr)
                .pretty()
                .finish();

            if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
                eprintln!("Failed to set subscriber: {e}");
            }

            Guard::default()
        }
        LogFormat::Json => {
            let (appender, appender_guard) = tracing_appender::non_blocking(std::io::stdout());

            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new(app_name.to_owned(), appender));

            if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
                eprintln!("Failed to set subscriber: {e}");
            }

            Guard {
                appender: Some(appender_guard),
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
