pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod ui;
pub mod viewer;
pub mod widget;

pub use config::ViewerConfig;
pub use error::{PdfError, Result};
pub use viewer::state::PdfViewerState;
pub use widget::PdfViewerWidget;
