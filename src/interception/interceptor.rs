// src/interception/interceptor.rs
//! Load-path interceptor
//!
//! Wraps the host's original loader and owns the single interception
//! session. While a session is active, every load of a selected identifier
//! is answered from the thunk cache, or on a miss by running the genuine
//! load through the caller's handler and caching the result.
//!
//! ```text
//! load(id)
//!     │
//!     ├─ inactive / not selected ──→ original loader ──→ Loaded::Genuine
//!     ├─ selected, cached ─────────→ thunk cache ──────→ Loaded::Thunked
//!     └─ selected, uncached ───────→ original loader
//!                                         ↓
//!                                   handler(id, genuine)
//!                                         ↓
//!                                   thunk cache ──────→ Loaded::Thunked
//! ```

use crate::interception::selector::{Selection, Targets};
use crate::interception::thunk_cache::{CacheScope, ThunkCache};
use crate::loader::Loader;
use crate::utils::config::ThunkConfig;
use crate::utils::errors::{Result, ThunkError};
use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Produces the substitute for a selected identifier from its genuine value
pub type ThunkHandler<T> = Arc<dyn Fn(&str, T) -> anyhow::Result<T> + Send + Sync>;

/// Result of a load through the provider
pub enum Loaded<T> {
    /// Passed through from the original loader untouched
    Genuine(T),

    /// Produced by the thunk handler; cache hits share the same allocation
    Thunked(Arc<T>),
}

impl<T> Loaded<T> {
    pub fn is_thunked(&self) -> bool {
        matches!(self, Loaded::Thunked(_))
    }

    /// The shared substitute, if this load was intercepted
    pub fn as_thunked(&self) -> Option<&Arc<T>> {
        match self {
            Loaded::Thunked(value) => Some(value),
            Loaded::Genuine(_) => None,
        }
    }

    pub fn into_thunked(self) -> Option<Arc<T>> {
        match self {
            Loaded::Thunked(value) => Some(value),
            Loaded::Genuine(_) => None,
        }
    }

    pub fn into_genuine(self) -> Option<T> {
        match self {
            Loaded::Genuine(value) => Some(value),
            Loaded::Thunked(_) => None,
        }
    }
}

impl<T: Clone> Loaded<T> {
    /// Owned copy of the value regardless of origin
    pub fn into_inner(self) -> T {
        match self {
            Loaded::Genuine(value) => value,
            Loaded::Thunked(value) => {
                Arc::try_unwrap(value).unwrap_or_else(|shared| (*shared).clone())
            }
        }
    }
}

impl<T> Deref for Loaded<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            Loaded::Genuine(value) => value,
            Loaded::Thunked(value) => &**value,
        }
    }
}

impl<T: Clone> Clone for Loaded<T> {
    fn clone(&self) -> Self {
        match self {
            Loaded::Genuine(value) => Loaded::Genuine(value.clone()),
            Loaded::Thunked(value) => Loaded::Thunked(Arc::clone(value)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Loaded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loaded::Genuine(value) => f.debug_tuple("Genuine").field(value).finish(),
            Loaded::Thunked(value) => f.debug_tuple("Thunked").field(&**value).finish(),
        }
    }
}

/// An active interception session
struct Session<T> {
    selection: Selection,
    handler: ThunkHandler<T>,
    cache: ThunkCache<T>,
    generation: u64,
}

struct State<T> {
    session: Option<Session<T>>,
    generation: u64,
}

/// Thunk provider
///
/// Holds the original loader, captured once at construction, and at most
/// one interception session. All loads are serialized by a re-entrant lock,
/// so a handler may itself load other modules on the same thread.
pub struct ThunkProvider<T> {
    original: Arc<dyn Loader<T>>,
    state: ReentrantMutex<RefCell<State<T>>>,
}

impl<T: Send + Sync + 'static> ThunkProvider<T> {
    /// Create a provider wrapping `loader`
    pub fn new(loader: impl Loader<T> + 'static) -> Self {
        Self::from_shared(Arc::new(loader))
    }

    /// Create a provider over an already shared loader
    pub fn from_shared(original: Arc<dyn Loader<T>>) -> Self {
        Self {
            original,
            state: ReentrantMutex::new(RefCell::new(State {
                session: None,
                generation: 0,
            })),
        }
    }

    /// Start intercepting loads of `targets`
    ///
    /// Fails with [`ThunkError::DoubleInterception`] if a session is already
    /// active; the existing session is left untouched.
    pub fn enable<F>(&self, targets: impl Into<Targets>, handler: F) -> Result<()>
    where
        F: Fn(&str, T) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();

        if state.session.is_some() {
            warn!("Thunking already enabled, refusing to start a second session");
            return Err(ThunkError::DoubleInterception);
        }

        let selection = Selection::new(targets).ok_or(ThunkError::EmptySelection)?;
        state.generation += 1;
        let generation = state.generation;

        info!(
            "Thunking enabled for {:?} (session {})",
            selection.targets(),
            generation
        );

        state.session = Some(Session {
            selection,
            handler: Arc::new(handler),
            cache: ThunkCache::new(),
            generation,
        });

        Ok(())
    }

    /// Start intercepting the targets named in `config`
    pub fn enable_from_config<F>(&self, config: &ThunkConfig, handler: F) -> Result<()>
    where
        F: Fn(&str, T) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        self.enable(config.targets.clone(), handler)
    }

    /// End the session, dropping the cache, selection and handler
    ///
    /// Silent no-op when no session is active.
    pub fn disable(&self) {
        let guard = self.state.lock();
        let session = guard.borrow_mut().session.take();

        match session {
            Some(session) => {
                info!(
                    "Thunking disabled (session {}), dropped {} cached thunks",
                    session.generation,
                    session.cache.len()
                );
            }
            None => debug!("Thunking already disabled"),
        }
    }

    /// Drop every cached thunk; the session stays active
    pub fn clear_cache(&self) {
        self.clear(CacheScope::All);
    }

    /// Drop cached thunks for `targets`; absent identifiers are ignored
    pub fn clear_cache_for(&self, targets: impl Into<Targets>) {
        self.clear(CacheScope::Targets(targets.into()));
    }

    fn clear(&self, scope: CacheScope) {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();

        if let Some(session) = state.session.as_mut() {
            session.cache.clear(scope);
        }
    }

    /// Load `id` through the interception path
    ///
    /// Loader and handler errors propagate unchanged and leave the cache
    /// as it was.
    pub fn load(&self, id: &str) -> Result<Loaded<T>> {
        let guard = self.state.lock();

        let pending = {
            let state = guard.borrow();
            match state.session.as_ref() {
                Some(session) if session.selection.matches(id) => {
                    if let Some(cached) = session.cache.get(id) {
                        debug!("Thunk cache hit for {}", id);
                        return Ok(Loaded::Thunked(cached));
                    }
                    Some((Arc::clone(&session.handler), session.generation))
                }
                _ => None,
            }
        };

        let genuine = self.original.load(id)?;

        let Some((handler, generation)) = pending else {
            return Ok(Loaded::Genuine(genuine));
        };

        debug!("Invoking thunk handler for {}", id);
        let substitute = Arc::new(handler(id, genuine).map_err(ThunkError::Handler)?);

        let mut state = guard.borrow_mut();
        match state.session.as_mut() {
            Some(session) if session.generation == generation => {
                session.cache.put(id, Arc::clone(&substitute));
            }
            _ => warn!(
                "Session changed while thunking {}, result not cached",
                id
            ),
        }

        Ok(Loaded::Thunked(substitute))
    }

    /// Load `id` straight from the original loader, bypassing interception
    pub fn load_original(&self, id: &str) -> Result<T> {
        self.original.load(id)
    }

    pub fn is_active(&self) -> bool {
        self.state.lock().borrow().session.is_some()
    }

    /// Selection of the active session
    pub fn selection(&self) -> Option<Selection> {
        let guard = self.state.lock();
        let state = guard.borrow();
        state.session.as_ref().map(|s| s.selection.clone())
    }

    pub fn is_cached(&self, id: &str) -> bool {
        let guard = self.state.lock();
        let state = guard.borrow();
        state
            .session
            .as_ref()
            .is_some_and(|s| s.cache.contains(id))
    }

    /// Identifiers with a cached thunk, sorted
    pub fn cached_targets(&self) -> Vec<String> {
        let guard = self.state.lock();
        let state = guard.borrow();
        state
            .session
            .as_ref()
            .map(|s| s.cache.keys())
            .unwrap_or_default()
    }
}
