// Core types and error enums for invoice-review
use std::path::PathBuf;

// Screen rectangle in terminal cells
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Area {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Area {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

// App state flags using bitflags
bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AppFlags: u8 {
        const DARK_MODE      = 0b0001;
        const EXIT           = 0b0010;
        const REDRAW         = 0b0100;
        const SHOW_FULL_TEXT = 0b1000;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("config is missing required field `{0}`")]
    MissingField(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog top level must be an object mapping filename to record")]
    NotAnObject,

    #[error("catalog entry {filename:?} is malformed: {reason}")]
    BadRecord { filename: String, reason: String },

    #[error("{} invoice PDF(s) missing from {}: {}", missing.len(), folder.display(), missing.join(", "))]
    MissingPdfs { folder: PathBuf, missing: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("catalog has no invoices to review")]
    EmptyCatalog,

    #[error("invoice index {index} out of range (catalog has {len})")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum PdfRenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("page {page} out of range (document has {count})")]
    PageOutOfRange { page: usize, count: usize },

    #[error("pdftoppm failed: {0}")]
    Rasterizer(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
