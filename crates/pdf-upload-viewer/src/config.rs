use crate::constants::*;
use crate::error::{PdfError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "pdf-upload-viewer.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
    System,
}

impl ThemePreference {
    pub fn to_egui(self) -> egui::ThemePreference {
        match self {
            ThemePreference::Light => egui::ThemePreference::Light,
            ThemePreference::Dark => egui::ThemePreference::Dark,
            ThemePreference::System => egui::ThemePreference::System,
        }
    }
}

/// Startup configuration. Built once in `main` and handed to the app; nothing reads it
/// from a global afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window_title: String,
    pub theme: ThemePreference,
    /// Directory holding the PDFium shared library. Falls back to the executable's directory
    /// and then the system library search path.
    pub pdfium_library_dir: Option<PathBuf>,
    /// Width over height of the displayed page.
    pub page_aspect_ratio: f32,
    /// Largest share of the modal body a page may occupy on either axis.
    pub page_fill: f32,
    /// Share of the window taken by the modal on either axis.
    pub modal_fraction: f32,
    pub cache_capacity: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_title: "PDF Viewer".to_string(),
            theme: ThemePreference::default(),
            pdfium_library_dir: None,
            page_aspect_ratio: US_LETTER_ASPECT_RATIO,
            page_fill: DEFAULT_PAGE_FILL,
            modal_fraction: DEFAULT_MODAL_FRACTION,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl ViewerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PdfError::ConfigError(format!("{}: {}", path.display(), e)))?;
        let config: ViewerConfig = serde_json::from_str(&contents)
            .map_err(|e| PdfError::ConfigError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` when it exists. A missing file yields defaults silently; an invalid one
    /// is logged and replaced by defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.page_aspect_ratio.is_finite() && self.page_aspect_ratio > 0.0) {
            return Err(PdfError::ConfigError(format!(
                "page_aspect_ratio must be positive, got {}",
                self.page_aspect_ratio
            )));
        }
        if !is_unit_fraction(self.page_fill) {
            return Err(PdfError::ConfigError(format!(
                "page_fill must be in (0, 1], got {}",
                self.page_fill
            )));
        }
        if !is_unit_fraction(self.modal_fraction) {
            return Err(PdfError::ConfigError(format!(
                "modal_fraction must be in (0, 1], got {}",
                self.modal_fraction
            )));
        }
        if self.cache_capacity == 0 {
            return Err(PdfError::ConfigError(
                "cache_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_unit_fraction(value: f32) -> bool {
    value.is_finite() && value > 0.0 && value <= 1.0
}
