//! HistoryPlatform port - the browser history primitive.
//!
//! Pop-state and before-unload notifications flow the other way: the
//! platform calls `NavigationGuardStore::on_history_pop` and
//! `NavigationGuardStore::before_unload`.

/// Port for manipulating navigation history.
pub trait HistoryPlatform: Send + Sync {
    /// Path (with query) currently displayed.
    fn current_location(&self) -> String;

    /// Pushes a history entry for `path` without navigating.
    fn push_state(&self, path: &str);

    /// Moves `offset` entries through the history.
    fn go(&self, offset: i32);

    /// Navigates to an in-app path.
    fn navigate(&self, path: &str);
}
