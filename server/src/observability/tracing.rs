use std::{error::Error, io::stdout};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use balance_ledger_application::infrastructure_config::{Config, LogFormat, LoggingConfig};

const SERVICE_NAME: &str = "balance-ledger";

/// `RUST_LOG` wins over the configured level when it parses.
fn level_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
}

pub fn setup_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    let logging = &config.logging;

    match logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(level_filter(logging))
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(SERVICE_NAME.to_string(), stdout))
            .try_init()?,
        LogFormat::Pretty => {
            let format = fmt::format()
                .with_target(true)
                .with_thread_ids(true)
                .compact();

            tracing_subscriber::fmt()
                .event_format(format)
                .with_env_filter(level_filter(logging))
                .with_file(logging.include_location)
                .with_line_number(logging.include_location)
                .try_init()
                .map_err(|e| -> Box<dyn Error> { e })?;
        }
    }

    Ok(())
}
