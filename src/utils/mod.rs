// src/utils/mod.rs
//! Shared configuration and error types

pub mod config;
pub mod errors;

pub use config::{LogConfig, LogFormat, ThunkConfig};
pub use errors::{Result, ThunkError};
