pub mod cache;
pub mod document;
pub mod intake;
pub mod pagination;
pub mod render_host;
pub mod render_worker;
pub mod state;
pub mod viewport;

pub use document::{DocumentId, DocumentStatus, PdfPayload};
pub use render_host::{PageRenderRequest, PdfiumHost, RenderHost};
pub use viewport::{ContainerSizeProvider, PageDimensions, fit_page};
