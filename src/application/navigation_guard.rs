//! NavigationGuardStore - protects unsaved edits from every navigation vector.
//!
//! One store is shared (behind an `Arc`) by the wizard session and whatever
//! drives navigation. It owns the dirty flag and the pending-navigation slot:
//!
//! - In-app navigation goes through [`NavigationGuardStore::request_navigation`].
//! - Native back/forward is reported via [`NavigationGuardStore::on_history_pop`];
//!   the store re-pushes a synthetic entry so the move is neutralized until
//!   the user confirms.
//! - Synthetic entries repeat the current location. The store counts them,
//!   and every move back steps over them to the page before the wizard.
//! - Tab close and refresh can only be cancelled, see
//!   [`NavigationGuardStore::before_unload`].
//!
//! The internal lock is never held across an await or a platform call.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::domain::navigation::{NavigationOutcome, NavigationTarget, PopOutcome, UnloadDecision};
use crate::ports::HistoryPlatform;

/// Default query parameter appended to same-path navigations.
pub const DEFAULT_CACHE_BUST_MARKER: &str = "_nav";

#[derive(Debug, Default)]
struct GuardState {
    mounted: bool,
    dirty: bool,
    pending: Option<NavigationTarget>,
    confirmation_open: bool,
    navigation_counter: u64,
    synthetic_depth: u32,
}

/// Unsaved-changes guard for one browser tab.
pub struct NavigationGuardStore {
    platform: Arc<dyn HistoryPlatform>,
    cache_bust_marker: String,
    state: Mutex<GuardState>,
}

impl NavigationGuardStore {
    pub fn new(platform: Arc<dyn HistoryPlatform>) -> Self {
        Self::with_cache_bust_marker(platform, DEFAULT_CACHE_BUST_MARKER)
    }

    pub fn with_cache_bust_marker(
        platform: Arc<dyn HistoryPlatform>,
        marker: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            cache_bust_marker: marker.into(),
            state: Mutex::new(GuardState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, GuardState> {
        // A panic while holding the lock leaves plain flags behind; keep going.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ───────────────────────────────────────────────────────────────
    // Lifecycle
    // ───────────────────────────────────────────────────────────────

    /// Starts guarding the current view.
    pub fn mount(&self) {
        self.state().mounted = true;
        self.push_synthetic_entry();
    }

    /// Stops guarding and forgets the dirty flag and any pending target.
    pub fn unmount(&self) {
        let mut state = self.state();
        state.mounted = false;
        state.dirty = false;
        state.pending = None;
        state.confirmation_open = false;
        state.synthetic_depth = 0;
    }

    pub fn is_mounted(&self) -> bool {
        self.state().mounted
    }

    // ───────────────────────────────────────────────────────────────
    // Dirty flag
    // ───────────────────────────────────────────────────────────────

    /// Sets the unsaved-changes flag.
    ///
    /// A clean-to-dirty transition while mounted pushes a synthetic history
    /// entry so the next native back press can be intercepted.
    pub fn set_dirty(&self, dirty: bool) {
        let became_dirty = {
            let mut state = self.state();
            let became_dirty = dirty && !state.dirty && state.mounted;
            state.dirty = dirty;
            became_dirty
        };
        if became_dirty {
            self.push_synthetic_entry();
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.state().dirty
    }

    // ───────────────────────────────────────────────────────────────
    // Pending navigation
    // ───────────────────────────────────────────────────────────────

    pub fn pending(&self) -> Option<NavigationTarget> {
        self.state().pending.clone()
    }

    pub fn has_pending(&self) -> bool {
        self.state().pending.is_some()
    }

    pub fn is_confirmation_open(&self) -> bool {
        self.state().confirmation_open
    }

    /// Navigates, or parks the target behind a confirmation when dirty.
    ///
    /// Only the most recent request is kept while a confirmation is open.
    pub fn request_navigation(&self, target: NavigationTarget) -> NavigationOutcome {
        {
            let mut state = self.state();
            if state.dirty {
                debug!(%target, "navigation held for confirmation");
                state.pending = Some(target);
                return if state.confirmation_open {
                    NavigationOutcome::ConfirmationPending
                } else {
                    state.confirmation_open = true;
                    NavigationOutcome::ConfirmationRequired
                };
            }
        }
        NavigationOutcome::Navigated(self.perform(target))
    }

    /// The user chose to leave.
    ///
    /// The flag is cleared first, then the executor gets a turn before the
    /// parked navigation runs, so anything that reads the guard in between
    /// already sees a clean state. Returns the navigation performed.
    pub async fn confirm_leave(&self) -> Option<NavigationTarget> {
        let target = {
            let mut state = self.state();
            state.dirty = false;
            state.confirmation_open = false;
            state.pending.take()
        };

        tokio::task::yield_now().await;

        let target = target?;
        Some(self.perform(target))
    }

    /// The user chose to stay; the dirty flag and location are untouched.
    pub fn cancel_leave(&self) -> Option<NavigationTarget> {
        let mut state = self.state();
        state.confirmation_open = false;
        state.pending.take()
    }

    // ───────────────────────────────────────────────────────────────
    // Platform notifications
    // ───────────────────────────────────────────────────────────────

    /// Handles a native back/forward move.
    ///
    /// The platform has already moved one entry back. While dirty, the move
    /// is neutralized with one synthetic re-push and treated as a request to
    /// leave the wizard backwards. While clean, the rest of the wizard's
    /// entries are skipped so the move actually leaves the page.
    pub fn on_history_pop(&self) -> PopOutcome {
        let outcome = {
            let mut state = self.state();
            if !state.mounted {
                return PopOutcome::Allowed;
            }
            if !state.dirty {
                let skipped = std::mem::take(&mut state.synthetic_depth);
                drop(state);
                if skipped > 0 {
                    self.platform.go(-offset_of(skipped));
                }
                return PopOutcome::Allowed;
            }
            state.synthetic_depth = state.synthetic_depth.saturating_sub(1);
            state.pending = Some(NavigationTarget::back());
            if state.confirmation_open {
                PopOutcome::ConfirmationPending
            } else {
                state.confirmation_open = true;
                PopOutcome::ConfirmationRequired
            }
        };
        self.push_synthetic_entry();
        debug!(?outcome, "native history move intercepted");
        outcome
    }

    /// Handles tab close and refresh.
    pub fn before_unload(&self) -> UnloadDecision {
        if self.state().dirty {
            UnloadDecision::Prompt
        } else {
            UnloadDecision::Allow
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────

    fn push_synthetic_entry(&self) {
        let location = self.platform.current_location();
        self.platform.push_state(&location);
        self.state().synthetic_depth += 1;
    }

    /// Backward offsets are widened past the synthetic entries; the
    /// returned target carries the offset actually applied.
    fn perform(&self, target: NavigationTarget) -> NavigationTarget {
        match target {
            NavigationTarget::HistoryOffset(offset) if offset < 0 => {
                let skipped = std::mem::take(&mut self.state().synthetic_depth);
                let offset = offset.saturating_sub(offset_of(skipped));
                self.platform.go(offset);
                NavigationTarget::HistoryOffset(offset)
            }
            NavigationTarget::HistoryOffset(offset) => {
                self.platform.go(offset);
                NavigationTarget::HistoryOffset(offset)
            }
            NavigationTarget::Path(path) => {
                let resolved = self.resolve_path(path);
                self.platform.navigate(&resolved);
                self.state().synthetic_depth = 0;
                NavigationTarget::Path(resolved)
            }
        }
    }

    /// Same-path navigation gets a fresh query marker so the destination
    /// re-initializes instead of being treated as a no-op.
    fn resolve_path(&self, path: String) -> String {
        let current = self.platform.current_location();
        if path_only(&current) != path_only(&path) {
            return path;
        }
        let counter = {
            let mut state = self.state();
            state.navigation_counter += 1;
            state.navigation_counter
        };
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}={}", path, separator, self.cache_bust_marker, counter)
    }
}

impl std::fmt::Debug for NavigationGuardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("NavigationGuardStore")
            .field("mounted", &state.mounted)
            .field("dirty", &state.dirty)
            .field("pending", &state.pending)
            .field("synthetic_depth", &state.synthetic_depth)
            .finish()
    }
}

fn offset_of(depth: u32) -> i32 {
    i32::try_from(depth).unwrap_or(i32::MAX)
}

fn path_only(location: &str) -> &str {
    location.split(['?', '#']).next().unwrap_or(location)
}
