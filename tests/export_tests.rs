mod common;

use common::{TestResult, portfolio, render};
use folio::{
    ContentModel, DrawOp, ExportConfig, ExportOutcome, ExporterBuilder, InMemorySink, LayoutConfig, Role,
    SectionKind, StandardFontMetrics, Theme, build_document,
};
use std::sync::Arc;

#[test]
fn fixture_exports_every_section_in_order() -> TestResult {
    let document = build_document(&portfolio(), &ExportConfig::default(), Arc::new(StandardFontMetrics::new()))?;
    assert_eq!(
        document.section_kinds(),
        [
            SectionKind::Header,
            SectionKind::Summary,
            SectionKind::Skills,
            SectionKind::Projects,
            SectionKind::Exposure,
            SectionKind::Education,
            SectionKind::Interests,
            SectionKind::Footer,
        ]
    );
    Ok(())
}

#[test]
fn pdf_has_one_page_per_layout_page_and_readable_text() -> TestResult {
    let content = portfolio();
    let document = build_document(&content, &ExportConfig::default(), Arc::new(StandardFontMetrics::new()))?;
    let pdf = render(&content)?;

    assert_eq!(pdf.page_count(), document.page_count());
    let runs = pdf.text_runs();
    for expected in ["Ada Lovelace", "SUMMARY", "SKILLS", "PROJECTS", "ENGINEERING EXPOSURE", "EDUCATION", "INTERESTS"] {
        assert!(runs.iter().any(|r| r == expected), "missing {expected:?} in {runs:?}");
    }
    assert!(runs.iter().any(|r| r == "Rust \u{00B7} Redis \u{00B7} gRPC"));
    assert!(runs.iter().any(|r| r == "Generated from Ada Lovelace's portfolio"));
    Ok(())
}

#[test]
fn no_content_escapes_the_margins() -> TestResult {
    for layout in [LayoutConfig::a4(), LayoutConfig::letter()] {
        let config = ExportConfig {
            layout,
            ..ExportConfig::default()
        };
        let document = build_document(&portfolio(), &config, Arc::new(StandardFontMetrics::new()))?;
        let top = layout.margin;
        let bottom = layout.page_size.height - layout.margin;
        for (page, op) in document.content_ops() {
            assert!(op.top() >= top - 1e-3 && op.bottom() <= bottom + 1e-3, "page {page}: {op:?}");
        }
    }
    Ok(())
}

#[test]
fn theme_file_overrides_page_colours() -> TestResult {
    let theme: Theme = serde_json::from_str(r##"{ "background": "#ffffff", "text": "#111111" }"##)?;
    let config = ExportConfig {
        theme,
        ..ExportConfig::default()
    };
    let document = build_document(&portfolio(), &config, Arc::new(StandardFontMetrics::new()))?;

    for page in &document.pages {
        match &page.ops[0] {
            DrawOp::Rect { fill, role: Role::Background, .. } => assert_eq!(*fill, Some(theme.background)),
            other => panic!("page {} starts with {other:?}", page.index),
        }
    }
    assert_eq!(theme.accent, Theme::dark().accent);
    Ok(())
}

#[test]
fn rendering_is_byte_for_byte_repeatable() -> TestResult {
    let first = render(&portfolio())?;
    let second = render(&portfolio())?;
    assert_eq!(first.bytes, second.bytes);
    Ok(())
}

#[test]
fn minimal_content_still_produces_a_document() -> TestResult {
    let content = ContentModel::from_json_str(r#"{ "name": "Ada" }"#)?;
    let document = build_document(&content, &ExportConfig::default(), Arc::new(StandardFontMetrics::new()))?;
    assert_eq!(document.section_kinds(), [SectionKind::Header, SectionKind::Footer]);
    assert_eq!(document.page_count(), 1);
    assert_eq!(render(&content)?.page_count(), 1);
    Ok(())
}

#[test]
fn long_content_paginates_without_splitting_cards() -> TestResult {
    let mut content = portfolio();
    let projects = content.projects.clone();
    for _ in 0..6 {
        content.projects.extend(projects.iter().cloned());
    }
    let document = build_document(&content, &ExportConfig::default(), Arc::new(StandardFontMetrics::new()))?;
    assert!(document.page_count() >= 3);

    let bottom = 297.0 - 14.0;
    for (_, card) in document.ops_with_role(Role::Card) {
        assert!(card.bottom() <= bottom + 1e-3);
    }
    assert_eq!(render(&content)?.page_count(), document.page_count());
    Ok(())
}

#[tokio::test]
async fn exporter_saves_under_the_content_file_name() -> TestResult {
    let sink = Arc::new(InMemorySink::new());
    let exporter = ExporterBuilder::new().with_sink(sink.clone()).build();

    let ExportOutcome::Saved(report) = exporter.export(&portfolio()).await else {
        panic!("export failed: {:?}", exporter.toaster().history());
    };
    assert_eq!(report.file_name, "Ada_Lovelace_CV.pdf");

    let bytes = sink.get("Ada_Lovelace_CV.pdf").ok_or("nothing saved")?;
    let pdf = common::GeneratedPdf::from_bytes(bytes.to_vec())?;
    assert_eq!(pdf.page_count(), report.page_count);
    assert_eq!(
        exporter.toaster().current().map(|t| t.message),
        Some("CV downloaded successfully!".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn exporter_writes_into_the_output_directory() -> TestResult {
    let dir = tempfile::tempdir()?;
    let exporter = ExporterBuilder::new()
        .with_output_dir(dir.path())
        .with_file_name("resume.pdf")
        .build();

    let content = ContentModel {
        cv_filename: None,
        ..portfolio()
    };
    let outcome = exporter.export(&content).await;
    assert!(outcome.is_saved());

    let written = std::fs::read(dir.path().join("resume.pdf"))?;
    assert!(written.starts_with(b"%PDF-"));
    let entries = std::fs::read_dir(dir.path())?.count();
    assert_eq!(entries, 1);
    Ok(())
}
