use anyhow::Context;
use clap::{Parser, Subcommand};
use folio::{ContentModel, ExportConfig, ExportOutcome, ExporterBuilder, LayoutConfig, StandardFontMetrics, Theme};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Export a portfolio CV as a paginated PDF.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out, render and save the CV.
    Export {
        /// Content model JSON file.
        #[arg(short, long)]
        content: PathBuf,

        /// Directory the PDF is written into.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// File name, overriding the one in the content file.
        #[arg(short, long)]
        file_name: Option<String>,

        /// Use US Letter instead of A4.
        #[arg(long)]
        letter: bool,

        /// Replace the footer's attribution line.
        #[arg(long)]
        footer: Option<String>,

        /// JSON file overriding theme colours.
        #[arg(long)]
        theme: Option<PathBuf>,
    },
    /// Lay out the CV and print its pages and sections without writing a file.
    Inspect {
        #[arg(short, long)]
        content: PathBuf,

        #[arg(long)]
        letter: bool,

        #[arg(long)]
        theme: Option<PathBuf>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct SectionReport {
    section: String,
    page: usize,
    y_mm: f32,
}

#[derive(Serialize)]
struct InspectReport {
    pages: usize,
    sections: Vec<SectionReport>,
}

fn layout_for(letter: bool) -> LayoutConfig {
    if letter { LayoutConfig::letter() } else { LayoutConfig::a4() }
}

fn load_content(path: &PathBuf) -> anyhow::Result<ContentModel> {
    ContentModel::from_path(path).with_context(|| format!("Failed to load content from '{}'", path.display()))
}

fn load_theme(path: Option<&PathBuf>) -> anyhow::Result<Theme> {
    let Some(path) = path else {
        return Ok(Theme::dark());
    };
    let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read theme '{}'", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid theme in '{}'", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("folio=info,folio_core=info")).init();

    match Cli::parse().command {
        Command::Export {
            content,
            out_dir,
            file_name,
            letter,
            footer,
            theme,
        } => {
            let mut content = load_content(&content)?;
            if file_name.is_some() {
                content.cv_filename = file_name;
            }

            let mut builder = ExporterBuilder::new()
                .with_output_dir(&out_dir)
                .with_layout(layout_for(letter))
                .with_theme(load_theme(theme.as_ref())?);
            if let Some(footer) = footer {
                builder = builder.with_footer_text(footer);
            }
            let exporter = builder.build();

            match exporter.export(&content).await {
                ExportOutcome::Saved(report) => {
                    println!(
                        "Saved {} ({} page(s), {} bytes) to {}",
                        report.file_name, report.page_count, report.byte_len, report.location
                    );
                    Ok(())
                }
                ExportOutcome::AlreadyRunning => anyhow::bail!("An export is already running"),
                ExportOutcome::Failed(err) => Err(anyhow::Error::new(err).context(
                    exporter
                        .toaster()
                        .current()
                        .map(|toast| toast.message)
                        .unwrap_or_else(|| "PDF export failed".to_string()),
                )),
            }
        }
        Command::Inspect {
            content,
            letter,
            theme,
            json,
        } => {
            let content = load_content(&content)?;
            let config = ExportConfig {
                layout: layout_for(letter),
                theme: load_theme(theme.as_ref())?,
                ..ExportConfig::default()
            };
            let document = folio::build_document(&content, &config, Arc::new(StandardFontMetrics::new()))?;

            let report = InspectReport {
                pages: document.page_count(),
                sections: document
                    .sections
                    .iter()
                    .map(|mark| SectionReport {
                        section: mark.kind.to_string(),
                        page: mark.page + 1,
                        y_mm: mark.y,
                    })
                    .collect(),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{} page(s)", report.pages);
                for section in &report.sections {
                    println!("  {:<22} page {} at {:.1}mm", section.section, section.page, section.y_mm);
                }
            }
            Ok(())
        }
    }
}
