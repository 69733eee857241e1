use std::path::PathBuf;
use thiserror::Error;

pub const NO_FILE_MESSAGE: &str = "No PDF file specified.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load PDF file.";
pub const LOADING_MESSAGE: &str = "Loading PDF...";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PdfError {
    #[error("No PDF file specified")]
    NoFileSpecified,

    #[error("Not a PDF file: {0}")]
    NotPdf(PathBuf),

    #[error("PDF library unavailable: {0}")]
    LibraryUnavailable(String),

    #[error("Invalid PDF file: {0}")]
    InvalidPdf(String),

    #[error("Document has no pages")]
    EmptyDocument,

    #[error("Render failed: {0}")]
    RenderFailed(String),

    #[error("Page {page} out of range (1-{page_count})")]
    PageOutOfRange { page: u16, page_count: u16 },

    #[error("File read error: {0}")]
    FileReadError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Render worker disconnected")]
    WorkerDisconnected,
}

impl PdfError {
    /// Text shown in place of the page. Everything except a missing document collapses into
    /// the generic load failure; the detailed cause goes to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            PdfError::NoFileSpecified => NO_FILE_MESSAGE,
            _ => LOAD_FAILED_MESSAGE,
        }
    }
}

pub type Result<T> = std::result::Result<T, PdfError>;
