// src/loader/mod.rs
//! Host load path
//!
//! A [`Loader`] is the "load dependency by identifier" entry point the
//! interceptor wraps. Any `Fn(&str) -> Result<T>` closure is a loader, and
//! [`ModuleRegistry`] provides a concrete in-memory module table.

pub mod registry;

pub use registry::ModuleRegistry;

use crate::utils::errors::Result;

/// Resolves an identifier to its module value
pub trait Loader<T>: Send + Sync {
    fn load(&self, id: &str) -> Result<T>;
}

impl<T, F> Loader<T> for F
where
    F: Fn(&str) -> Result<T> + Send + Sync,
{
    fn load(&self, id: &str) -> Result<T> {
        self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::ThunkError;
    use std::sync::Arc;

    #[test]
    fn test_closure_loader() {
        let loader = |id: &str| -> Result<String> {
            match id {
                "net" => Ok("net-exports".to_string()),
                other => Err(ThunkError::ModuleNotFound(other.to_string())),
            }
        };

        assert_eq!(loader.load("net").unwrap(), "net-exports");
        assert!(matches!(
            loader.load("fs"),
            Err(ThunkError::ModuleNotFound(id)) if id == "fs"
        ));
    }

    #[test]
    fn test_shared_loader() {
        let loader: Arc<dyn Loader<u32>> = Arc::new(|_: &str| -> Result<u32> { Ok(7) });
        assert_eq!(loader.load("anything").unwrap(), 7);
    }
}
