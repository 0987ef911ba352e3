// src/interception/mod.rs
//! Dependency load interception
//!
//! - **Interceptor**: wraps the original loader and owns the session
//! - **Selector**: exact-name or wildcard target matching
//! - **Thunk Cache**: per-identifier memo of substitute values
//!
//! # Architecture
//!
//! ```text
//! Test Code (unmodified load calls)
//!     │
//!     └─ load(id) → ThunkProvider ─┬─ Selection::matches(id)?
//!                                  ├─ ThunkCache::get(id)
//!                                  ├─ original Loader::load(id)
//!                                  └─ handler(id, genuine) → ThunkCache::put
//! ```

pub mod interceptor;
pub mod selector;
pub mod thunk_cache;

// Re-export commonly used types
pub use interceptor::{Loaded, ThunkHandler, ThunkProvider};
pub use selector::{Selection, Targets, WILDCARD};
pub use thunk_cache::{CacheScope, ThunkCache};
