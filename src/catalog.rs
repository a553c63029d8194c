// Invoice catalog: filename -> extracted data, in pipeline order
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::types::CatalogError;

/// Extracted data for one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InvoiceRecord {
    /// Human readable prose; may contain `$`.
    pub summary: String,
    /// JSON text, decoded only at display time.
    pub structured: String,
    /// Raw extracted text.
    pub full: String,
}

impl InvoiceRecord {
    pub fn structured_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.structured)
    }
}

/// Ordered filename list plus record map.
///
/// The two halves are kept apart so lookups always go filename -> record,
/// never index -> record.
#[derive(Debug, Clone, Default)]
pub struct InvoiceCatalog {
    filenames: Vec<String>,
    records: HashMap<String, InvoiceRecord>,
}

impl InvoiceCatalog {
    pub fn from_parts(filenames: Vec<String>, records: HashMap<String, InvoiceRecord>) -> Self {
        Self { filenames, records }
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn get(&self, filename: &str) -> Option<&InvoiceRecord> {
        self.records.get(filename)
    }

    pub fn len(&self) -> usize {
        self.filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }
}

pub fn parse_catalog(content: &str) -> Result<InvoiceCatalog, CatalogError> {
    let doc: Value = serde_json::from_str(content)?;
    let Value::Object(entries) = doc else {
        return Err(CatalogError::NotAnObject);
    };

    let mut filenames = Vec::with_capacity(entries.len());
    let mut records = HashMap::with_capacity(entries.len());

    for (filename, entry) in entries {
        if !entry.is_object() {
            return Err(CatalogError::BadRecord {
                filename,
                reason: "expected an object".to_string(),
            });
        }
        let record: InvoiceRecord = match serde_json::from_value(entry) {
            Ok(record) => record,
            Err(e) => {
                return Err(CatalogError::BadRecord {
                    filename,
                    reason: e.to_string(),
                })
            }
        };
        filenames.push(filename.clone());
        records.insert(filename, record);
    }

    Ok(InvoiceCatalog { filenames, records })
}

pub fn load_catalog(path: &Path) -> Result<InvoiceCatalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&content)
}

/// Every catalog key must name a file in `folder`. Reports all missing files at once.
pub fn verify_pdfs(catalog: &InvoiceCatalog, folder: &Path) -> Result<(), CatalogError> {
    let missing: Vec<String> = catalog
        .filenames()
        .iter()
        .filter(|name| !folder.join(name.as_str()).is_file())
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::MissingPdfs {
            folder: folder.to_path_buf(),
            missing,
        })
    }
}

/// PDFs sitting in `folder` that the catalog never mentions, sorted by name.
pub fn unreferenced_pdfs(catalog: &InvoiceCatalog, folder: &Path) -> std::io::Result<Vec<String>> {
    let known: HashSet<&str> = catalog.filenames().iter().map(String::as_str).collect();
    let mut extra = Vec::new();

    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.to_lowercase().ends_with(".pdf") && !known.contains(name.as_str()) {
            extra.push(name);
        }
    }

    extra.sort();
    Ok(extra)
}
