//! Shared view state: load states, toasts and timing

use docwise_client::ApiConfig;
use std::time::Duration;

/// Lifecycle of data a view fetches on load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// Transient notification raised by a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

/// Toasts queued by a view until the caller drains them
#[derive(Debug, Default)]
pub struct Toasts(Vec<Toast>);

impl Toasts {
    pub fn push(&mut self, toast: Toast) {
        self.0.push(toast);
    }

    pub fn pending(&self) -> &[Toast] {
        &self.0
    }

    pub fn take(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.0)
    }
}

/// Delays applied before re-fetching after asynchronous backend work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub refresh_delay: Duration,
    pub extraction_refresh_delay: Duration,
}

impl Timing {
    /// No delays; used by tests and the in-memory store
    pub fn immediate() -> Self {
        Self {
            refresh_delay: Duration::ZERO,
            extraction_refresh_delay: Duration::ZERO,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for Timing {
    fn from(config: &ApiConfig) -> Self {
        Self {
            refresh_delay: config.refresh_delay(),
            extraction_refresh_delay: config.extraction_refresh_delay(),
        }
    }
}

/// Sleep unless the delay is zero
pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
