// Review configuration, read once from config.yaml
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const REQUIRED_FIELDS: [(&str, &str); 2] = [
    ("output_file", "processing.output_file"),
    ("local_download_folder", "processing.local_download_folder"),
];

/// Immutable configuration handed to every component that needs it.
///
/// The file is shared with the extraction pipeline, so sections other than
/// `processing` and `ui` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingConfig {
    /// JSON catalog written by the extraction pipeline.
    pub output_file: PathBuf,
    /// Folder holding one PDF per catalog key.
    pub local_download_folder: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Tabs,
    Split,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_layout")]
    pub layout: Layout,
    #[serde(default = "default_pdf_width_percent")]
    pub pdf_width_percent: u16,
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    #[serde(default = "default_render_size")]
    pub render_size: u32,
    #[serde(default = "default_json_expand_depth")]
    pub json_expand_depth: usize,
    #[serde(default)]
    pub show_full_text: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            layout: default_layout(),
            pdf_width_percent: default_pdf_width_percent(),
            dark_mode: default_true(),
            render_size: default_render_size(),
            json_expand_depth: default_json_expand_depth(),
            show_full_text: false,
        }
    }
}

fn default_layout() -> Layout { Layout::Tabs }
fn default_pdf_width_percent() -> u16 { 60 }
fn default_true() -> bool { true }
fn default_render_size() -> u32 { 1000 }
fn default_json_expand_depth() -> usize { 2 }

impl UiConfig {
    pub fn pdf_width_percent(&self) -> u16 {
        self.pdf_width_percent.clamp(20, 80)
    }
}

impl Config {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let doc: serde_yaml::Value = serde_yaml::from_str(content)?;

        // Name the missing key instead of serde's generic message
        let processing = doc.get("processing");
        for (key, dotted) in REQUIRED_FIELDS {
            if processing.and_then(|p| p.get(key)).is_none() {
                return Err(ConfigError::MissingField(dotted));
            }
        }

        Ok(serde_yaml::from_value(doc)?)
    }

    /// Path of the PDF backing a catalog entry.
    pub fn pdf_path(&self, filename: &str) -> PathBuf {
        self.processing.local_download_folder.join(filename)
    }
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_yaml_str(&content)
}
