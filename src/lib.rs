//! Review invoice PDFs next to the data an extraction pipeline pulled out of them.
//!
//! Startup is `config` -> `catalog` -> `navigation::Session`; after that every
//! key press moves the session cursor and the front end redraws the PDF
//! (`pdf_renderer`) and the extracted data (`data_view`) for the current file.

pub mod catalog;
pub mod chart;
pub mod config;
pub mod data_panel;
pub mod data_view;
pub mod debug_log;
pub mod debug_panel;
pub mod invoice_picker;
pub mod json_tree;
pub mod line_items;
pub mod navigation;
pub mod pdf_renderer;
pub mod screen_mode;
pub mod theme;
pub mod types;
pub mod viuer_display;

pub use debug_log::debug_log;
