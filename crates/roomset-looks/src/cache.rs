//! Per-look load state.
//!
//! Every look id moves through `Unloaded -> Loading -> Loaded | Failed`.
//! [`LookCache::ensure_loaded`] is the only way in: it refuses to start a
//! second resolution for a look that is already loading or loaded, so any
//! number of observers (visibility triggers, bulk loads) can call it freely.
//! A failure is recorded on that look alone and never reaches its siblings.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::stream::{self, StreamExt};
use roomset_core::LookProduct;

use crate::resolve::{resolve_look, ResolvedLook};
use crate::source::LookSource;

#[derive(Debug, Clone, Default)]
pub enum LookState {
    #[default]
    Unloaded,
    Loading,
    Loaded(Arc<ResolvedLook>),
    /// Resolution failed; the message is kept for display. A later
    /// `ensure_loaded` retries.
    Failed(String),
}

impl LookState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, LookState::Loading)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, LookState::Loaded(_))
    }
}

/// What a call to [`LookCache::ensure_loaded`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// This call resolved the look.
    Loaded,
    /// This call tried and failed.
    Failed,
    /// Another call already resolved it; nothing was fetched.
    AlreadyLoaded,
    /// Another call is resolving it right now; nothing was fetched.
    AlreadyLoading,
}

/// Tally of a [`LookCache::load_all`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct LookCache {
    states: Mutex<HashMap<String, LookState>>,
}

impl LookCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, LookState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn state(&self, look_id: &str) -> LookState {
        self.lock().get(look_id).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn resolved(&self, look_id: &str) -> Option<Arc<ResolvedLook>> {
        match self.lock().get(look_id) {
            Some(LookState::Loaded(look)) => Some(Arc::clone(look)),
            _ => None,
        }
    }

    /// The look's shopping list. Empty for any look that is not loaded,
    /// including failed ones.
    #[must_use]
    pub fn unique_products(&self, look_id: &str) -> Vec<LookProduct> {
        self.resolved(look_id)
            .map(|look| look.unique_products())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn total_price(&self, look_id: &str) -> f64 {
        self.resolved(look_id).map_or(0.0, |look| look.total_price())
    }

    /// Resolves `look_id` unless it is already loading or loaded.
    ///
    /// Dropping the returned future mid-flight puts the look back to
    /// `Unloaded` so the next call starts over.
    pub async fn ensure_loaded<S: LookSource>(&self, source: &S, look_id: &str) -> EnsureOutcome {
        {
            let mut states = self.lock();
            match states.get(look_id) {
                Some(LookState::Loading) => return EnsureOutcome::AlreadyLoading,
                Some(LookState::Loaded(_)) => return EnsureOutcome::AlreadyLoaded,
                Some(LookState::Failed(_) | LookState::Unloaded) | None => {
                    states.insert(look_id.to_owned(), LookState::Loading);
                }
            }
        }

        let mut guard = LoadingGuard {
            cache: self,
            look_id,
            armed: true,
        };

        let (state, outcome) = match resolve_look(source, look_id).await {
            Ok(look) => {
                tracing::debug!(
                    look_id,
                    images = look.images.len(),
                    spots = look.spots.len(),
                    "look loaded"
                );
                (LookState::Loaded(Arc::new(look)), EnsureOutcome::Loaded)
            }
            Err(e) => {
                tracing::warn!(look_id, error = %e, "look failed to load");
                (LookState::Failed(e.to_string()), EnsureOutcome::Failed)
            }
        };

        self.lock().insert(look_id.to_owned(), state);
        guard.armed = false;
        outcome
    }

    /// Resolves every look in `look_ids`, at most `max_concurrent` at a time.
    pub async fn load_all<S: LookSource>(
        &self,
        source: &S,
        look_ids: &[String],
        max_concurrent: usize,
    ) -> LoadSummary {
        let outcomes: Vec<EnsureOutcome> = stream::iter(look_ids)
            .map(|look_id| self.ensure_loaded(source, look_id))
            .buffer_unordered(max_concurrent.max(1))
            .collect()
            .await;

        let mut summary = LoadSummary::default();
        for outcome in outcomes {
            match outcome {
                EnsureOutcome::Loaded => summary.loaded += 1,
                EnsureOutcome::Failed => summary.failed += 1,
                EnsureOutcome::AlreadyLoaded | EnsureOutcome::AlreadyLoading => {
                    summary.skipped += 1;
                }
            }
        }

        if summary.failed > 0 {
            tracing::warn!(
                failed = summary.failed,
                total = look_ids.len(),
                "some looks failed to load"
            );
        }
        summary
    }
}

struct LoadingGuard<'a> {
    cache: &'a LookCache,
    look_id: &'a str,
    armed: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut states = self.cache.lock();
        if matches!(states.get(self.look_id), Some(LookState::Loading)) {
            tracing::debug!(look_id = self.look_id, "look load abandoned");
            states.insert(self.look_id.to_owned(), LookState::Unloaded);
        }
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
