// src/utils/errors.rs
//! Error types for the thunk provider

use thiserror::Error;

/// Errors raised while loading or intercepting dependencies
#[derive(Debug, Error)]
pub enum ThunkError {
    /// Interception is already enabled; the active session must be disabled first
    #[error("loader is already intercepted - cannot enable thunking twice")]
    DoubleInterception,

    /// Interception was requested for an empty target list
    #[error("thunking requires at least one target")]
    EmptySelection,

    /// The host loader could not resolve the identifier
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    /// The thunk handler failed; the underlying error is passed through as-is
    #[error(transparent)]
    Handler(anyhow::Error),

    /// The process-wide loader was already captured
    #[error("a global loader is already installed")]
    LoaderAlreadyInstalled,

    /// No process-wide loader has been captured yet
    #[error("no global loader installed")]
    LoaderNotInstalled,

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl ThunkError {
    /// The error returned by the handler, if this is a handler failure
    pub fn handler_error(&self) -> Option<&anyhow::Error> {
        match self {
            ThunkError::Handler(err) => Some(err),
            _ => None,
        }
    }

    /// Consume into the handler's error, if this is a handler failure
    pub fn into_handler_error(self) -> Option<anyhow::Error> {
        match self {
            ThunkError::Handler(err) => Some(err),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for ThunkError {
    fn from(err: config::ConfigError) -> Self {
        ThunkError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ThunkError {
    fn from(err: serde_json::Error) -> Self {
        ThunkError::Config(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ThunkError>;
