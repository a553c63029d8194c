//! Extracted-data view for one invoice.
//!
//! [`render`] never fails: a missing record, undecodable `structured` text or
//! an unexpected panic all become [`Section::Notice`] entries scoped to the
//! invoice being shown, so navigation keeps working.

use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};

use crate::catalog::{InvoiceCatalog, InvoiceRecord};
use crate::chart::{bar_chart, BarChart};
use crate::debug_log;
use crate::line_items::{line_item_rows, total_price, ITEM_FIELD, PRICE_FIELD};

pub const SUMMARY_TITLE: &str = "Summary";
pub const STRUCTURED_TITLE: &str = "Structured Data";
pub const CHART_TITLE: &str = "Invoice Breakdown";
pub const FULL_TEXT_TITLE: &str = "Detailed Text";

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    NotFound { filename: String },
    BadStructured { error: String },
    RenderFailed { error: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::NotFound { filename } => format!("Data for {} not found.", filename),
            Notice::BadStructured { error } | Notice::RenderFailed { error } => {
                format!("Error displaying data: {}", error)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    /// Markdown text with `$` already escaped.
    Summary(String),
    Structured(Value),
    Chart { chart: BarChart, total: Option<f64> },
    /// Shown verbatim, no markup interpretation.
    FullText(String),
    Notice(Notice),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub filename: String,
    pub sections: Vec<Section>,
}

impl RenderedView {
    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.sections.iter().filter_map(|s| match s {
            Section::Notice(n) => Some(n),
            _ => None,
        })
    }

    pub fn chart(&self) -> Option<&BarChart> {
        self.sections.iter().find_map(|s| match s {
            Section::Chart { chart, .. } => Some(chart),
            _ => None,
        })
    }

    pub fn summary(&self) -> Option<&str> {
        self.sections.iter().find_map(|s| match s {
            Section::Summary(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Escapes `$` so a markdown renderer does not read it as math delimiters.
pub fn escape_dollars(text: &str) -> String {
    text.replace('$', "\\$")
}

pub fn render(catalog: &InvoiceCatalog, filename: &str) -> RenderedView {
    render_with(catalog, filename, record_sections)
}

fn render_with<F>(catalog: &InvoiceCatalog, filename: &str, build: F) -> RenderedView
where
    F: Fn(&InvoiceRecord) -> Vec<Section>,
{
    let sections = match catalog.get(filename) {
        None => {
            debug_log(format!("no catalog record for {}", filename));
            vec![Section::Notice(Notice::NotFound { filename: filename.to_string() })]
        }
        Some(record) => {
            match panic::catch_unwind(AssertUnwindSafe(|| build(record))) {
                Ok(sections) => sections,
                Err(payload) => {
                    let error = crate::debug_log::panic_message(payload.as_ref());
                    crate::debug_error!("rendering {} panicked: {}", filename, error);
                    vec![Section::Notice(Notice::RenderFailed { error })]
                }
            }
        }
    };

    RenderedView {
        filename: filename.to_string(),
        sections,
    }
}

fn record_sections(record: &InvoiceRecord) -> Vec<Section> {
    let mut sections = vec![Section::Summary(escape_dollars(&record.summary))];

    match record.structured_value() {
        Ok(structured) => {
            let chart = line_item_rows(&structured).and_then(|rows| {
                bar_chart(rows, ITEM_FIELD, PRICE_FIELD, CHART_TITLE)
                    .map(|chart| (chart, total_price(rows)))
            });
            sections.push(Section::Structured(structured));
            if let Some((chart, total)) = chart {
                sections.push(Section::Chart { chart, total });
            }
        }
        Err(e) => {
            crate::debug_error!("structured data is not JSON: {}", e);
            sections.push(Section::Notice(Notice::BadStructured { error: e.to_string() }));
        }
    }

    sections.push(Section::FullText(record.full.clone()));
    sections
}
