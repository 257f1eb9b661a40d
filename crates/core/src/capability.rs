//! Acquisition of the document rendering capability.
//!
//! The exporter never reaches for a renderer directly. It asks a
//! [`CapabilityLoader`], which may already hold one ([`StaticLoader`]) or may
//! have to try several sources in turn ([`FallbackLoader`]).

use crate::error::CapabilityError;
use async_trait::async_trait;
use folio_render_core::DocumentRenderer;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Default per-source time limit for [`FallbackLoader`].
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait CapabilityLoader: Send + Sync {
    /// Returns a ready renderer, loading it first if needed.
    async fn ensure_available(&self) -> Result<Arc<dyn DocumentRenderer>, CapabilityError>;

    /// Identifies the source in logs and error messages.
    fn name(&self) -> &str;
}

/// A renderer that is available from the start.
pub struct StaticLoader {
    renderer: Arc<dyn DocumentRenderer>,
}

impl StaticLoader {
    pub fn new(renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self { renderer }
    }
}

#[async_trait]
impl CapabilityLoader for StaticLoader {
    async fn ensure_available(&self) -> Result<Arc<dyn DocumentRenderer>, CapabilityError> {
        Ok(Arc::clone(&self.renderer))
    }

    fn name(&self) -> &str {
        self.renderer.name()
    }
}

/// Tries each source in order, each under its own timeout, and keeps the
/// first renderer that loads. Later calls reuse it without touching the
/// sources again. A failed attempt is not cached, so a later export retries.
pub struct FallbackLoader {
    sources: Vec<Arc<dyn CapabilityLoader>>,
    timeout: Duration,
    loaded: OnceCell<Arc<dyn DocumentRenderer>>,
}

impl FallbackLoader {
    pub fn new(sources: Vec<Arc<dyn CapabilityLoader>>) -> Self {
        Self {
            sources,
            timeout: DEFAULT_SOURCE_TIMEOUT,
            loaded: OnceCell::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    async fn load_first(&self) -> Result<Arc<dyn DocumentRenderer>, CapabilityError> {
        if self.sources.is_empty() {
            return Err(CapabilityError::NoSources);
        }

        let mut failures = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let err = match tokio::time::timeout(self.timeout, source.ensure_available()).await {
                Ok(Ok(renderer)) => {
                    log::info!("Loaded PDF engine '{}' from source '{}'", renderer.name(), source.name());
                    return Ok(renderer);
                }
                Ok(Err(err)) => err,
                Err(_) => CapabilityError::TimedOut {
                    source_name: source.name().to_string(),
                    timeout: self.timeout,
                },
            };
            log::warn!("Capability source '{}' failed: {}", source.name(), err);
            failures.push(err.to_string());
        }

        Err(CapabilityError::Exhausted(failures))
    }
}

#[async_trait]
impl CapabilityLoader for FallbackLoader {
    async fn ensure_available(&self) -> Result<Arc<dyn DocumentRenderer>, CapabilityError> {
        let renderer = self.loaded.get_or_try_init(|| self.load_first()).await?;
        Ok(Arc::clone(renderer))
    }

    fn name(&self) -> &str {
        "fallback"
    }
}
