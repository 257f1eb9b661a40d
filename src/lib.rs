//! # folio
//!
//! Exports a portfolio owner's CV as a paginated PDF without capturing any
//! screen rendering. The content model is laid out section by section onto
//! A4 pages by a cursor-based layout engine, rendered with lopdf and saved
//! through an artifact sink.
//!
//! ```no_run
//! use folio::{ContentModel, ExportOutcome, ExporterBuilder};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let content = ContentModel::from_path("portfolio.json")?;
//! let exporter = ExporterBuilder::new().with_output_dir("out").build();
//! if let ExportOutcome::Saved(report) = exporter.export(&content).await {
//!     println!("{} pages written to {}", report.page_count, report.location);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;

pub use folio_core::capability::DEFAULT_SOURCE_TIMEOUT;
pub use folio_core::{
    CapabilityError, CapabilityLoader, ExportConfig, ExportError, ExportOutcome, ExportReport, Exporter,
    FallbackLoader, StaticLoader, Toast, ToastKind, Toaster, build_document, sections,
};
pub use folio_layout::{
    Document, DrawOp, LayoutConfig, LayoutEngine, LayoutError, Role, SectionKind, SectionMark, StandardFontMetrics,
    Theme,
};
pub use folio_render_core::{DocumentRenderer, RenderError};
pub use folio_render_lopdf::LopdfRenderer;
pub use folio_resource::{FileSink, InMemorySink};
pub use folio_traits::{ArtifactSink, SavedArtifact, SinkError, TextMeasurer};
pub use folio_types::{ContentError, ContentModel};

/// The renderer compiled into this binary, behind the loader interface so
/// callers can swap in their own sources.
pub fn builtin_loader() -> Arc<dyn CapabilityLoader> {
    let renderer: Arc<dyn DocumentRenderer> = Arc::new(LopdfRenderer::new());
    Arc::new(FallbackLoader::new(vec![Arc::new(StaticLoader::new(renderer))]))
}

/// Fluent construction of an [`Exporter`].
///
/// Defaults: the built-in lopdf renderer, a file sink in the current
/// directory, standard Helvetica metrics and [`ExportConfig::default`].
#[derive(Default)]
pub struct ExporterBuilder {
    loader: Option<Arc<dyn CapabilityLoader>>,
    sink: Option<Arc<dyn ArtifactSink>>,
    measurer: Option<Arc<dyn TextMeasurer>>,
    config: ExportConfig,
}

impl ExporterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loader(mut self, loader: Arc<dyn CapabilityLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn ArtifactSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Shorthand for a [`FileSink`] writing into `dir`.
    pub fn with_output_dir<P: AsRef<Path>>(self, dir: P) -> Self {
        self.with_sink(Arc::new(FileSink::new(dir)))
    }

    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = Some(measurer);
        self
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.config.file_name = file_name.into();
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    pub fn with_footer_text(mut self, text: impl Into<String>) -> Self {
        self.config.footer_text = Some(text.into());
        self
    }

    pub fn build(self) -> Exporter {
        Exporter::new(
            self.loader.unwrap_or_else(builtin_loader),
            self.sink.unwrap_or_else(|| Arc::new(FileSink::current_dir())),
            self.measurer.unwrap_or_else(|| Arc::new(StandardFontMetrics::new())),
            self.config,
        )
    }
}

/// Lays out `content` with the default configuration and renders it to PDF
/// bytes, without the orchestrator.
pub fn render_pdf(content: &ContentModel, config: &ExportConfig) -> Result<Vec<u8>, ExportError> {
    let document = build_document(content, config, Arc::new(StandardFontMetrics::new()))?;
    let title = match content.name.trim() {
        "" => "CV".to_string(),
        name => format!("{name} CV"),
    };
    Ok(LopdfRenderer::new().with_title(title).render(&document)?)
}
