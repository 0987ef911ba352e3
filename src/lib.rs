// src/lib.rs
//! Require Thunk
//!
//! Lets test code intercept loads of named dependencies and substitute
//! replacement values, without touching the dependency or the code that
//! loads it.
//!
//! # Architecture
//!
//! - **interception**: the interceptor, target selector and thunk cache
//! - **loader**: the host load path being wrapped
//! - **global**: the process-wide provider and its free-function API
//! - **observability**: tracing setup
//! - **utils**: configuration and errors
//!
//! # Example
//!
//! ```
//! use require_thunk::{ModuleRegistry, ThunkProvider};
//!
//! let provider = ThunkProvider::new(
//!     ModuleRegistry::new()
//!         .with_module("net", "real net".to_string())
//!         .with_module("fs", "real fs".to_string()),
//! );
//!
//! provider
//!     .enable("net", |_id: &str, _genuine: String| Ok("fake net".to_string()))
//!     .unwrap();
//!
//! assert_eq!(*provider.load("net").unwrap(), "fake net");
//! assert_eq!(*provider.load("fs").unwrap(), "real fs");
//!
//! provider.disable();
//! assert_eq!(*provider.load("net").unwrap(), "real net");
//! ```

// Public module exports
pub mod global;
pub mod interception;
pub mod loader;
pub mod observability;
pub mod utils;

// Re-export commonly used types
pub use interception::{CacheScope, Loaded, Selection, Targets, ThunkCache, ThunkProvider};
pub use loader::{Loader, ModuleRegistry};
pub use utils::config::ThunkConfig;
pub use utils::errors::{Result, ThunkError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
