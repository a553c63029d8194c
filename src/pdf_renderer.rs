// PDF page rasterizing via pdftoppm, page counts via lopdf
use image::DynamicImage;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempDir;

use crate::types::PdfRenderError;

#[derive(Debug, Clone)]
pub struct PdfPage {
    pub image: DynamicImage,
    /// 0-based
    pub page: usize,
    pub page_count: usize,
}

/// Displays a PDF for one invoice. `session_key` identifies the viewer
/// instance, so a renderer may reuse work while the same invoice stays open.
pub trait PdfRenderer {
    fn render_pdf(&mut self, path: &Path, session_key: &str, page: usize) -> Result<Arc<PdfPage>, PdfRenderError>;
}

pub fn session_key(filename: &str) -> String {
    format!("pdf_reader_{}", filename)
}

pub fn page_count(path: &Path) -> Result<usize, PdfRenderError> {
    let document = lopdf::Document::load(path)?;
    Ok(document.get_pages().len())
}

pub struct SystemPdfRenderer {
    /// Longest side of the rasterized page, in pixels.
    render_size: u32,
    last: Option<(String, Arc<PdfPage>)>,
}

impl SystemPdfRenderer {
    pub fn new(render_size: u32) -> Self {
        Self {
            render_size,
            last: None,
        }
    }

    fn rasterize(&self, path: &Path, page: usize) -> Result<DynamicImage, PdfRenderError> {
        let temp_dir = TempDir::new()?;
        let output_prefix = temp_dir.path().join("page");

        // pdftoppm pages are 1-based
        let page_arg = (page + 1).to_string();
        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-singlefile")
            .args(["-f", &page_arg, "-l", &page_arg])
            .args(["-scale-to", &self.render_size.to_string()])
            .arg(path)
            .arg(&output_prefix)
            .output()
            .map_err(|e| PdfRenderError::Rasterizer(format!("cannot run pdftoppm: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PdfRenderError::Rasterizer(stderr.trim().to_string()));
        }

        Ok(image::open(output_prefix.with_extension("png"))?)
    }
}

impl PdfRenderer for SystemPdfRenderer {
    fn render_pdf(&mut self, path: &Path, session_key: &str, page: usize) -> Result<Arc<PdfPage>, PdfRenderError> {
        let cache_key = format!("{}#{}", session_key, page);
        if let Some((key, rendered)) = &self.last {
            if *key == cache_key {
                crate::debug_trace!("PDF cache hit {}", cache_key);
                return Ok(Arc::clone(rendered));
            }
        }

        let start = Instant::now();
        let page_count = page_count(path)?;
        if page >= page_count {
            return Err(PdfRenderError::PageOutOfRange { page, count: page_count });
        }

        let image = self.rasterize(path, page)?;
        crate::debug_log(format!(
            "rendered {} page {}/{}: {}x{}",
            path.display(),
            page + 1,
            page_count,
            image.width(),
            image.height()
        ));
        crate::debug_timing!("PDF rendering", start);

        let rendered = Arc::new(PdfPage { image, page, page_count });
        self.last = Some((cache_key, Arc::clone(&rendered)));
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_names_the_invoice() {
        assert_eq!(session_key("inv1.pdf"), "pdf_reader_inv1.pdf");
    }

    #[test]
    fn unreadable_pdf_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let mut renderer = SystemPdfRenderer::new(200);
        assert!(renderer.render_pdf(&path, &session_key("broken.pdf"), 0).is_err());
        assert!(page_count(&path).is_err());
    }
}
