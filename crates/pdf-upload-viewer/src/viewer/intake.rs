use crate::error::{PdfError, Result};
use crate::viewer::document::{DocumentId, PdfPayload};
use crossbeam::channel::{Receiver, Sender, unbounded};
use std::path::{Path, PathBuf};

pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Completed read for one selection.
#[derive(Debug)]
pub struct IntakeResult {
    pub id: DocumentId,
    pub path: PathBuf,
    pub result: Result<PdfPayload>,
}

fn read_payload(id: DocumentId, path: &Path) -> Result<PdfPayload> {
    let bytes = std::fs::read(path)
        .map_err(|e| PdfError::FileReadError(format!("{}: {}", path.display(), e)))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(PdfPayload::new(id, name, bytes))
}

/// Reads selected files on background threads. Only the most recent selection is ever
/// handed back; reads that finish after a newer selection are dropped.
pub struct FileIntake {
    sender: Sender<IntakeResult>,
    receiver: Receiver<IntakeResult>,
    latest: Option<DocumentId>,
    repaint: Option<egui::Context>,
}

impl FileIntake {
    pub fn new(repaint: Option<egui::Context>) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            latest: None,
            repaint,
        }
    }

    /// Starts reading `path`. Paths without a `.pdf` extension are rejected up front and
    /// leave any in-flight read untouched.
    pub fn select(&mut self, path: PathBuf) -> Result<DocumentId> {
        if !is_pdf_path(&path) {
            log::warn!("Ignoring non-PDF selection: {}", path.display());
            return Err(PdfError::NotPdf(path));
        }

        let id = DocumentId::new();
        self.latest = Some(id);
        log::info!("Reading {} as {}", path.display(), id);

        let sender = self.sender.clone();
        let repaint = self.repaint.clone();
        std::thread::spawn(move || {
            let result = read_payload(id, &path);
            if sender.send(IntakeResult { id, path, result }).is_ok()
                && let Some(ctx) = repaint
            {
                ctx.request_repaint();
            }
        });

        Ok(id)
    }

    /// Shows the native dialog. Cancelling it changes nothing.
    pub fn pick(&mut self) -> Option<DocumentId> {
        let path = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .pick_file()?;
        self.select(path).ok()
    }

    pub fn is_reading(&self) -> bool {
        self.latest.is_some()
    }

    /// Returns the read for the latest selection once it has finished.
    pub fn poll(&mut self) -> Option<IntakeResult> {
        let mut newest = None;
        while let Ok(result) = self.receiver.try_recv() {
            if Some(result.id) == self.latest {
                newest = Some(result);
            } else {
                log::warn!("Dropping stale read of {}", result.path.display());
            }
        }

        if newest.is_some() {
            self.latest = None;
        }
        newest
    }

    /// Blocks until the latest selection finishes. Used by tests and headless callers.
    pub fn wait(&mut self) -> Option<IntakeResult> {
        let latest = self.latest?;
        while let Ok(result) = self.receiver.recv() {
            if result.id == latest {
                self.latest = None;
                return Some(result);
            }
            log::warn!("Dropping stale read of {}", result.path.display());
        }
        None
    }
}

impl Default for FileIntake {
    fn default() -> Self {
        Self::new(None)
    }
}
