//! Recording History
//!
//! A history stack in memory that records every platform call.

use std::sync::Mutex;

use crate::ports::HistoryPlatform;

/// One call made against the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryCall {
    Push(String),
    Go(i32),
    Navigate(String),
}

#[derive(Debug)]
struct HistoryState {
    entries: Vec<String>,
    index: usize,
    calls: Vec<HistoryCall>,
}

/// History stack that records calls; `go` moves within recorded entries.
#[derive(Debug)]
pub struct RecordingHistory {
    state: Mutex<HistoryState>,
}

impl RecordingHistory {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(HistoryState {
                entries: vec![location.into()],
                index: 0,
                calls: Vec::new(),
            }),
        }
    }

    pub fn calls(&self) -> Vec<HistoryCall> {
        self.lock().calls.clone()
    }

    /// Number of entries pushed without navigating.
    pub fn pushes(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, HistoryCall::Push(_)))
            .count()
    }

    /// Paths passed to `navigate`, oldest first.
    pub fn navigations(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                HistoryCall::Navigate(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.lock().entries.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl HistoryPlatform for RecordingHistory {
    fn current_location(&self) -> String {
        let state = self.lock();
        state.entries[state.index].clone()
    }

    fn push_state(&self, path: &str) {
        let mut state = self.lock();
        let next = state.index + 1;
        state.entries.truncate(next);
        state.entries.push(path.to_string());
        state.index = next;
        state.calls.push(HistoryCall::Push(path.to_string()));
    }

    fn go(&self, offset: i32) {
        let mut state = self.lock();
        let last = state.entries.len() - 1;
        let target = (state.index as i64 + i64::from(offset)).clamp(0, last as i64);
        state.index = target as usize;
        state.calls.push(HistoryCall::Go(offset));
    }

    fn navigate(&self, path: &str) {
        let mut state = self.lock();
        let next = state.index + 1;
        state.entries.truncate(next);
        state.entries.push(path.to_string());
        state.index = next;
        state.calls.push(HistoryCall::Navigate(path.to_string()));
    }
}
