use crate::error::{LOADING_MESSAGE, NO_FILE_MESSAGE, PdfError};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of one upload. Results carrying an older id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw bytes of an uploaded file. Cheap to clone; the bytes are shared.
#[derive(Clone)]
pub struct PdfPayload {
    pub id: DocumentId,
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl PdfPayload {
    pub fn new(id: DocumentId, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id,
            name: name.into(),
            bytes: Arc::from(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for PdfPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfPayload")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentStatus {
    Empty,
    Loading,
    Loaded { page_count: u16 },
    Failed(PdfError),
}

impl DocumentStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, DocumentStatus::Loaded { .. })
    }

    pub fn page_count(&self) -> Option<u16> {
        match self {
            DocumentStatus::Loaded { page_count } => Some(*page_count),
            _ => None,
        }
    }

    /// Text shown instead of a page, or `None` when a page can be shown.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            DocumentStatus::Empty => Some(NO_FILE_MESSAGE),
            DocumentStatus::Loading => Some(LOADING_MESSAGE),
            DocumentStatus::Loaded { .. } => None,
            DocumentStatus::Failed(error) => Some(error.user_message()),
        }
    }
}
