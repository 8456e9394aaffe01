//! Application state for the DocumentWise server

use docwise_client::config::DEFAULT_MAX_UPLOAD_BYTES;
use docwise_client::{Actions, ApiConfig, DocumentWiseApi, HttpApi, InMemoryApi};
use std::sync::Arc;

/// Where requests are answered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Forwarded to the configured DocumentWise backend
    Proxy,
    /// Answered from the seeded in-memory store
    Demo,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Proxy => "proxy",
            Mode::Demo => "demo",
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub actions: Actions,
    pub mode: Mode,
    /// Body limit applied to the upload route
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(api: Arc<dyn DocumentWiseApi>, mode: Mode) -> Self {
        Self {
            actions: Actions::new(api),
            mode,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Proxy to the backend named in `config`
    pub fn proxy(config: &ApiConfig) -> anyhow::Result<Self> {
        let missing = config.missing();
        if !missing.is_empty() {
            tracing::warn!(
                ?missing,
                "Backend URLs are not configured; affected routes will return configuration errors"
            );
        }
        let api = HttpApi::new(config)?;
        Ok(Self::new(Arc::new(api), Mode::Proxy).with_max_upload_bytes(config.max_upload_bytes))
    }

    pub fn demo() -> Self {
        tracing::info!("Serving the in-memory demo store");
        Self::new(Arc::new(InMemoryApi::demo()), Mode::Demo)
    }
}
