//! Debouncing of rapidly changing input.
//!
//! Search and zoom inputs change on every keystroke; only a value that has
//! been left alone for the settle window is worth a re-render.

use std::time::{Duration, Instant};

use crate::config::{ViewerConfig, DEFAULT_DEBOUNCE};

/// Holds the latest value until input goes quiet.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    /// Value waiting for the settle window, with when it was last replaced
    pending: Option<(T, Instant)>,
    window: Duration,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the default 500ms window.
    pub fn new() -> Self {
        Self::with_window(DEFAULT_DEBOUNCE)
    }

    /// Create a debouncer with a custom window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            pending: None,
            window,
        }
    }

    /// Create a debouncer using the configured window.
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::with_window(config.debounce)
    }

    /// The settle window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a new value, restarting the window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Release the pending value if it has been quiet for the full window.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, last_seen)) if now.saturating_duration_since(*last_seen) >= self.window => {
                self.pending.take().map(|(value, _)| value)
            },
            _ => None,
        }
    }

    /// When the pending value becomes ready, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, last_seen)| *last_seen + self.window)
    }

    /// Release the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Check if there is a value waiting.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new()
    }
}
