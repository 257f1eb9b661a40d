//! The export orchestrator.
//!
//! One [`Exporter`] owns the busy flag and the toast state for one export
//! button. An export runs capability loading, layout, rendering and saving in
//! sequence; whatever happens, the busy flag is released and the user sees
//! exactly one closing toast.

use crate::capability::CapabilityLoader;
use crate::error::ExportError;
use crate::feedback::{ToastKind, Toaster};
use crate::sections;
use folio_layout::{Document, LayoutConfig, LayoutEngine, LayoutError, Theme};
use folio_traits::{ArtifactSink, TextMeasurer};
use folio_types::ContentModel;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub const DEFAULT_FILE_NAME: &str = "CV.pdf";

pub const GENERATING_MESSAGE: &str = "Generating PDF\u{2026}";
pub const SUCCESS_MESSAGE: &str = "CV downloaded successfully!";

#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Used when the content does not name its own file.
    pub file_name: String,
    pub layout: LayoutConfig,
    pub theme: Theme,
    /// Replaces the default attribution line in the footer.
    pub footer_text: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            layout: LayoutConfig::a4(),
            theme: Theme::dark(),
            footer_text: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub file_name: String,
    pub location: String,
    pub page_count: usize,
    pub byte_len: usize,
}

#[derive(Debug)]
pub enum ExportOutcome {
    Saved(ExportReport),
    /// Another export held the busy flag; nothing was done.
    AlreadyRunning,
    Failed(ExportError),
}

impl ExportOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, ExportOutcome::Saved(_))
    }
}

/// Lays out the whole CV. Pure and synchronous; the same input always gives
/// the same document.
pub fn build_document(
    content: &ContentModel,
    config: &ExportConfig,
    measurer: Arc<dyn TextMeasurer>,
) -> Result<Document, LayoutError> {
    config.layout.validate()?;
    let mut engine = LayoutEngine::new(config.layout, config.theme, measurer);
    sections::render_all(&mut engine, content, config.footer_text.as_deref())?;
    Ok(engine.finish())
}

/// Holds the busy flag for the lifetime of one export.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Exporter {
    loader: Arc<dyn CapabilityLoader>,
    sink: Arc<dyn ArtifactSink>,
    measurer: Arc<dyn TextMeasurer>,
    config: ExportConfig,
    busy: AtomicBool,
    toaster: Toaster,
}

impl Exporter {
    pub fn new(
        loader: Arc<dyn CapabilityLoader>,
        sink: Arc<dyn ArtifactSink>,
        measurer: Arc<dyn TextMeasurer>,
        config: ExportConfig,
    ) -> Self {
        Self {
            loader,
            sink,
            measurer,
            config,
            busy: AtomicBool::new(false),
            toaster: Toaster::new(),
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Whether an export is in flight. The export button should read as
    /// disabled while this is set.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    /// Runs one export. Never panics and never returns an error: failures are
    /// logged, toasted and reported in the outcome.
    pub async fn export(&self, content: &ContentModel) -> ExportOutcome {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            log::debug!("Export requested while another is running; ignoring");
            return ExportOutcome::AlreadyRunning;
        };

        self.toaster.show(GENERATING_MESSAGE, ToastKind::Info);
        match self.run(content).await {
            Ok(report) => {
                log::info!(
                    "Exported '{}' ({} page(s), {} bytes) to {}",
                    report.file_name,
                    report.page_count,
                    report.byte_len,
                    report.location
                );
                self.toaster.show(SUCCESS_MESSAGE, ToastKind::Success);
                ExportOutcome::Saved(report)
            }
            Err(err) => {
                log::error!("CV export failed: {err}");
                self.toaster.show(err.user_message(), ToastKind::Error);
                ExportOutcome::Failed(err)
            }
        }
    }

    fn file_name_for(&self, content: &ContentModel) -> String {
        content
            .cv_filename
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.config.file_name)
            .to_string()
    }

    async fn run(&self, content: &ContentModel) -> Result<ExportReport, ExportError> {
        let renderer = self.loader.ensure_available().await?;
        log::debug!("Using PDF engine '{}' via '{}'", renderer.name(), self.loader.name());

        let document = build_document(content, &self.config, Arc::clone(&self.measurer))?;
        let bytes = renderer.render(&document)?;

        let file_name = self.file_name_for(content);
        let sink = Arc::clone(&self.sink);
        let name = file_name.clone();
        let saved = tokio::task::spawn_blocking(move || sink.save(&name, &bytes))
            .await
            .map_err(|err| ExportError::Task(err.to_string()))??;

        Ok(ExportReport {
            file_name,
            location: saved.location,
            page_count: document.page_count(),
            byte_len: saved.byte_len,
        })
    }
}
