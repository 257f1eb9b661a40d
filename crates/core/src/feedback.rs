//! Transient user feedback.
//!
//! A toast is a short message that disappears on its own. Only one is
//! visible at a time: showing a new toast replaces the current one and
//! restarts the expiry timer.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_millis(4500);

/// Number of recent toasts [`Toaster::history`] retains.
pub const HISTORY_LIMIT: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

impl Toast {
    pub fn expires_at(&self) -> Instant {
        self.shown_at + TOAST_DURATION
    }
}

/// Toast state owned by one exporter instance.
#[derive(Debug, Default)]
pub struct Toaster {
    current: Mutex<Option<Toast>>,
    history: Mutex<VecDeque<(String, ToastKind)>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        let toast = Toast {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        };
        log::debug!("Toast ({:?}): {}", toast.kind, toast.message);
        {
            let mut history = self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if history.len() == HISTORY_LIMIT {
                history.pop_front();
            }
            history.push_back((toast.message.clone(), kind));
        }
        *self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(toast);
    }

    /// The visible toast, if one was shown less than [`TOAST_DURATION`] ago.
    pub fn current(&self) -> Option<Toast> {
        let mut current = self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if current.as_ref().is_some_and(|t| Instant::now() >= t.expires_at()) {
            *current = None;
        }
        current.clone()
    }

    /// The last [`HISTORY_LIMIT`] toasts shown, oldest first.
    pub fn history(&self) -> Vec<(String, ToastKind)> {
        let history = self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        history.iter().cloned().collect()
    }
}
