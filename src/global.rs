// src/global.rs
//! Process-wide thunk provider
//!
//! The host captures its original loader once with [`install_loader`]; from
//! then on every [`require`] goes through the single global provider, and
//! test code toggles interception with [`enable_thunking`] and
//! [`disable_thunking`].
//!
//! ```ignore
//! use require_thunk::global;
//! use serde_json::json;
//!
//! global::enable_thunking("net", |_, _| Ok(json!({"connect": "stub"})))?;
//! let net = global::require("net")?;
//! assert!(net.is_thunked());
//! global::disable_thunking();
//! ```

use crate::interception::interceptor::{Loaded, ThunkProvider};
use crate::interception::selector::Targets;
use crate::loader::Loader;
use crate::utils::errors::{Result, ThunkError};
use once_cell::sync::OnceCell;
use tracing::info;

/// Module value type handled by the global provider
pub type Exports = serde_json::Value;

static PROVIDER: OnceCell<ThunkProvider<Exports>> = OnceCell::new();

/// Capture the host's original loader; may only happen once per process
pub fn install_loader(loader: impl Loader<Exports> + 'static) -> Result<()> {
    PROVIDER
        .set(ThunkProvider::new(loader))
        .map_err(|_| ThunkError::LoaderAlreadyInstalled)?;
    info!("Global loader installed");
    Ok(())
}

pub fn is_installed() -> bool {
    PROVIDER.get().is_some()
}

fn provider() -> Result<&'static ThunkProvider<Exports>> {
    PROVIDER.get().ok_or(ThunkError::LoaderNotInstalled)
}

/// Load `id` through the global load path
pub fn require(id: &str) -> Result<Loaded<Exports>> {
    provider()?.load(id)
}

/// Start intercepting `targets`; fails if thunking is already enabled
pub fn enable_thunking<F>(targets: impl Into<Targets>, handler: F) -> Result<()>
where
    F: Fn(&str, Exports) -> anyhow::Result<Exports> + Send + Sync + 'static,
{
    provider()?.enable(targets, handler)
}

/// Drop every cached thunk
pub fn clear_thunk_cache() {
    if let Some(provider) = PROVIDER.get() {
        provider.clear_cache();
    }
}

/// Drop cached thunks for one or several identifiers
pub fn clear_thunk_cache_for(targets: impl Into<Targets>) {
    if let Some(provider) = PROVIDER.get() {
        provider.clear_cache_for(targets);
    }
}

/// Stop intercepting; safe to call unconditionally
pub fn disable_thunking() {
    if let Some(provider) = PROVIDER.get() {
        provider.disable();
    }
}

pub fn is_thunking() -> bool {
    PROVIDER.get().is_some_and(|p| p.is_active())
}

/// Whether `id` currently has a cached thunk
pub fn is_cached(id: &str) -> bool {
    PROVIDER.get().is_some_and(|p| p.is_cached(id))
}
