use crate::constants::{MAX_RENDER_DIMENSION, MIN_RENDER_DIMENSION};
use crate::error::{PdfError, Result};
use crate::viewer::viewport::PageDimensions;
use image::RgbaImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};

/// One page at one size. `page` is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRenderRequest {
    pub page: u16,
    pub width: u32,
    pub height: u32,
    pub render_annotation_layer: bool,
    pub render_text_layer: bool,
}

impl PageRenderRequest {
    /// Raster-only request for `page`, truncated to whole pixels so the bitmap never exceeds the
    /// fitted size, within the allowed bitmap range.
    pub fn raster(page: u16, dimensions: PageDimensions) -> Self {
        Self {
            page,
            width: to_pixels(dimensions.width),
            height: to_pixels(dimensions.height),
            render_annotation_layer: false,
            render_text_layer: false,
        }
    }
}

fn to_pixels(value: f32) -> u32 {
    (value.floor().max(0.0) as u32).clamp(MIN_RENDER_DIMENSION, MAX_RENDER_DIMENSION)
}

/// Document decoding and rasterisation. Implementations keep no per-document state; the
/// caller passes the payload bytes each time.
pub trait RenderHost {
    fn page_count(&self, bytes: &[u8]) -> Result<u16>;

    fn render_page(&self, bytes: &[u8], request: &PageRenderRequest) -> Result<RgbaImage>;
}

#[cfg(target_os = "windows")]
const LIBRARY_NAME: &str = "pdfium.dll";
#[cfg(target_os = "macos")]
const LIBRARY_NAME: &str = "libpdfium.dylib";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const LIBRARY_NAME: &str = "libpdfium.so";

fn candidate_library_dirs(configured: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = configured {
        dirs.push(dir.to_path_buf());
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }
    dirs
}

pub struct PdfiumHost {
    pdfium: Pdfium,
}

impl PdfiumHost {
    /// Binds PDFium from the configured directory, the executable's directory, or the system
    /// library path, in that order.
    pub fn bind(library_dir: Option<&Path>) -> Result<Self> {
        for dir in candidate_library_dirs(library_dir) {
            let library_path = dir.join(LIBRARY_NAME);
            if !library_path.exists() {
                continue;
            }
            match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir)) {
                Ok(bindings) => {
                    log::info!("Bound PDFium from {}", library_path.display());
                    return Ok(Self {
                        pdfium: Pdfium::new(bindings),
                    });
                }
                Err(e) => log::warn!("Failed to bind {}: {}", library_path.display(), e),
            }
        }

        let bindings = Pdfium::bind_to_system_library().map_err(|e| {
            PdfError::LibraryUnavailable(format!("{} not found ({})", LIBRARY_NAME, e))
        })?;
        log::info!("Bound system PDFium library");

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<PdfDocument<'a>> {
        if bytes.is_empty() {
            return Err(PdfError::InvalidPdf("empty file".into()));
        }
        self.pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| PdfError::InvalidPdf(format!("Failed to load PDF: {}", e)))
    }
}

impl RenderHost for PdfiumHost {
    fn page_count(&self, bytes: &[u8]) -> Result<u16> {
        let document = self.open(bytes)?;
        Ok(document.pages().len())
    }

    fn render_page(&self, bytes: &[u8], request: &PageRenderRequest) -> Result<RgbaImage> {
        let document = self.open(bytes)?;
        let page_count = document.pages().len();

        if request.page == 0 || request.page > page_count {
            return Err(PdfError::PageOutOfRange {
                page: request.page,
                page_count,
            });
        }

        let page = document
            .pages()
            .get(request.page - 1)
            .map_err(|e| PdfError::RenderFailed(format!("Failed to get page: {}", e)))?;

        // PDFium rasterises glyphs only; there is no selectable text layer to switch off.
        let config = PdfRenderConfig::new()
            .set_target_width(request.width as i32)
            .set_maximum_height(request.height as i32)
            .set_format(PdfBitmapFormat::BGRA)
            .render_annotations(request.render_annotation_layer)
            .render_form_data(request.render_annotation_layer);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| PdfError::RenderFailed(format!("Failed to render bitmap: {:?}", e)))?;

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;

        bgra_to_rgba(width, height, &bitmap.as_raw_bytes())
    }
}

/// PDFium hands back BGRA rows; egui wants RGBA.
pub fn bgra_to_rgba(width: u32, height: u32, pixels: &[u8]) -> Result<RgbaImage> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() < expected {
        return Err(PdfError::RenderFailed(format!(
            "Bitmap too small: {} bytes for {}x{}",
            pixels.len(),
            width,
            height
        )));
    }

    let mut rgba = Vec::with_capacity(expected);
    for chunk in pixels[..expected].chunks_exact(4) {
        rgba.extend_from_slice(&[chunk[2], chunk[1], chunk[0], chunk[3]]);
    }

    RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| PdfError::RenderFailed("Bitmap size mismatch".into()))
}
