// src/observability.rs
//! Tracing setup
//!
//! Installs a global `tracing` subscriber. Test suites call
//! [`init_tracing`] to see interception decisions; `RUST_LOG` overrides the
//! configured level, e.g. `RUST_LOG=require_thunk=debug`.

use crate::utils::config::{LogConfig, LogFormat};
use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize tracing with default settings
pub fn init_tracing() -> anyhow::Result<()> {
    init_tracing_with(&LogConfig::default())
}

/// Initialize tracing from configuration
///
/// Only the first call installs a subscriber; later calls return `Ok(())`.
pub fn init_tracing_with(config: &LogConfig) -> anyhow::Result<()> {
    TRACING_INITIALIZED
        .get_or_try_init(|| -> anyhow::Result<()> {
            let env_filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.level))?;

            let registry = tracing_subscriber::registry().with(env_filter);

            match config.format {
                LogFormat::Pretty => registry
                    .with(
                        fmt::layer()
                            .with_writer(std::io::stderr)
                            .with_target(true),
                    )
                    .try_init()?,
                LogFormat::Json => registry
                    .with(
                        fmt::layer()
                            .json()
                            .with_writer(std::io::stderr)
                            .with_current_span(false),
                    )
                    .try_init()?,
            }

            Ok(())
        })
        .map(|_| ())
}
