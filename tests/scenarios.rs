//! End-to-end behaviour of the review core: catalog on disk, PDF check,
//! navigation and the data view for whatever the cursor points at.

use std::fs;

use invoice_review::catalog::{load_catalog, unreferenced_pdfs, verify_pdfs};
use invoice_review::config::load_config;
use invoice_review::data_view::{self, Notice, Section};
use invoice_review::navigation::{Move, Session};
use invoice_review::types::{CatalogError, NavigationError};
use serde_json::json;
use tempfile::TempDir;

/// A download folder, a catalog and a config pointing at both.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(catalog: serde_json::Value, pdfs: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let downloads = dir.path().join("downloads");
        fs::create_dir(&downloads).unwrap();
        for name in pdfs {
            fs::write(downloads.join(name), b"%PDF-1.4\n%%EOF\n").unwrap();
        }
        fs::write(dir.path().join("output.json"), catalog.to_string()).unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            format!(
                "processing:\n  output_file: {}\n  local_download_folder: {}\n",
                dir.path().join("output.json").display(),
                downloads.display()
            ),
        )
        .unwrap();
        Self { dir }
    }

    fn config_path(&self) -> std::path::PathBuf {
        self.dir.path().join("config.yaml")
    }
}

fn record(summary: &str, structured: &str) -> serde_json::Value {
    json!({"summary": summary, "structured": structured, "full": "raw text"})
}

fn open(fixture: &Fixture) -> Result<(invoice_review::catalog::InvoiceCatalog, Session), CatalogError> {
    let config = load_config(&fixture.config_path()).unwrap();
    let catalog = load_catalog(&config.processing.output_file)?;
    verify_pdfs(&catalog, &config.processing.local_download_folder)?;
    let session = Session::new(catalog.filenames().to_vec()).unwrap();
    Ok((catalog, session))
}

#[test]
fn single_invoice_with_one_line_item() {
    let fixture = Fixture::new(
        json!({"inv1.pdf": record("$100 due", r#"{"line_items": [{"item": "Widget", "price": 100}]}"#)}),
        &["inv1.pdf"],
    );
    let (catalog, session) = open(&fixture).unwrap();

    let cursor = session.cursor();
    assert!(!cursor.can_previous());
    assert!(!cursor.can_next());

    let view = data_view::render(&catalog, session.current_filename());
    let chart = view.chart().expect("chart for line items");
    assert_eq!(chart.bars.len(), 1);
    assert_eq!(chart.bars[0].label, "Widget");
    assert_eq!(chart.bars[0].value, 100.0);
    assert_eq!(view.summary(), Some("\\$100 due"));
}

#[test]
fn next_stops_at_the_last_invoice() {
    let fixture = Fixture::new(
        json!({
            "a.pdf": record("a", "{}"),
            "b.pdf": record("b", "{}"),
            "c.pdf": record("c", "{}"),
        }),
        &["a.pdf", "b.pdf", "c.pdf"],
    );
    let (_, mut session) = open(&fixture).unwrap();

    assert_eq!(session.cursor().index(), 0);
    assert!(session.apply(Move::Next).unwrap());
    assert_eq!(session.current_filename(), "b.pdf");
    assert!(session.apply(Move::Next).unwrap());
    assert_eq!(session.current_filename(), "c.pdf");
    assert!(!session.apply(Move::Next).unwrap());
    assert_eq!(session.cursor().index(), 2);
}

#[test]
fn bad_structured_json_stays_local_to_its_record() {
    let fixture = Fixture::new(
        json!({
            "good.pdf": record("fine", r#"{"vendor": "Acme"}"#),
            "bad.pdf": record("broken", "not json"),
        }),
        &["good.pdf", "bad.pdf"],
    );
    let (catalog, mut session) = open(&fixture).unwrap();

    session.apply(Move::Next).unwrap();
    let view = data_view::render(&catalog, session.current_filename());
    assert!(matches!(
        view.notices().next(),
        Some(Notice::BadStructured { .. })
    ));
    assert!(view.sections.iter().any(|s| matches!(s, Section::FullText(_))));

    // Navigation still works after the failure
    assert!(session.apply(Move::Previous).unwrap());
    let view = data_view::render(&catalog, session.current_filename());
    assert_eq!(view.notices().count(), 0);
}

#[test]
fn missing_pdf_refuses_startup() {
    let fixture = Fixture::new(
        json!({
            "present.pdf": record("x", "{}"),
            "missing.pdf": record("y", "{}"),
        }),
        &["present.pdf"],
    );

    match open(&fixture) {
        Err(CatalogError::MissingPdfs { missing, .. }) => assert_eq!(missing, ["missing.pdf"]),
        other => panic!("expected MissingPdfs, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn no_line_items_means_no_chart_and_no_error() {
    let fixture = Fixture::new(
        json!({"inv.pdf": record("total $5", r#"{"vendor": "Acme", "total": 5}"#)}),
        &["inv.pdf"],
    );
    let (catalog, session) = open(&fixture).unwrap();

    let view = data_view::render(&catalog, session.current_filename());
    assert!(view.chart().is_none());
    assert_eq!(view.notices().count(), 0);
}

#[test]
fn selector_jump_and_out_of_range_rejection() {
    let fixture = Fixture::new(
        json!({"a.pdf": record("a", "{}"), "b.pdf": record("b", "{}")}),
        &["a.pdf", "b.pdf"],
    );
    let (_, mut session) = open(&fixture).unwrap();

    assert!(session.apply(Move::JumpTo(1)).unwrap());
    assert_eq!(
        session.apply(Move::JumpTo(7)),
        Err(NavigationError::OutOfRange { index: 7, len: 2 })
    );
    assert_eq!(session.current_filename(), "b.pdf");
}

#[test]
fn extra_pdfs_are_reported_but_do_not_block() {
    let fixture = Fixture::new(json!({"a.pdf": record("a", "{}")}), &["a.pdf", "stray.PDF", "notes.txt"]);
    let config = load_config(&fixture.config_path()).unwrap();
    let catalog = load_catalog(&config.processing.output_file).unwrap();

    assert!(verify_pdfs(&catalog, &config.processing.local_download_folder).is_ok());
    let extra = unreferenced_pdfs(&catalog, &config.processing.local_download_folder).unwrap();
    assert_eq!(extra, ["stray.PDF"]);
}

#[test]
fn empty_catalog_cannot_start_a_session() {
    let fixture = Fixture::new(json!({}), &[]);
    let config = load_config(&fixture.config_path()).unwrap();
    let catalog = load_catalog(&config.processing.output_file).unwrap();
    assert!(catalog.is_empty());
    assert_eq!(
        Session::new(catalog.filenames().to_vec()).err(),
        Some(NavigationError::EmptyCatalog)
    );
}
