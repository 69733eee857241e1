use super::cache::{self, PageKey};
use super::document::{DocumentId, DocumentStatus, PdfPayload};
use super::intake::IntakeResult;
use super::pagination::Pagination;
use super::render_host::PageRenderRequest;
use super::render_worker::{RenderCommand, RenderEvent};
use super::viewport::{MeasuredContainer, PageDimensions, ResizeTrigger, ViewportSizer};
use crate::config::ViewerConfig;
use crate::error::PdfError;
use image::RgbaImage;
use std::sync::Arc;

/// Everything the upload card and the modal show. Mutated only from the UI thread; work for
/// the render worker comes back out as `RenderCommand`s.
#[derive(Debug)]
pub struct PdfViewerState {
    document: Option<PdfPayload>,
    status: DocumentStatus,
    pagination: Pagination,
    viewport: ViewportSizer,
    container: MeasuredContainer,
    modal_open: bool,
    pending_trigger: Option<ResizeTrigger>,
    last_window_size: Option<egui::Vec2>,
    cache: cache::PageCache,
    in_flight: Option<PageKey>,
    page_error: Option<(PageKey, PdfError)>,
    intake_error: Option<String>,
}

impl PdfViewerState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            document: None,
            status: DocumentStatus::Empty,
            pagination: Pagination::new(),
            viewport: ViewportSizer::new(config.page_aspect_ratio, config.page_fill),
            container: MeasuredContainer::default(),
            modal_open: false,
            pending_trigger: None,
            last_window_size: None,
            cache: cache::PageCache::new(config.cache_capacity),
            in_flight: None,
            page_error: None,
            intake_error: None,
        }
    }

    /// Replaces the current document outright and asks the worker to parse the new one.
    pub fn accept_payload(&mut self, payload: PdfPayload) -> RenderCommand {
        log::info!("Loaded {} ({} bytes)", payload.name, payload.len());

        self.document = Some(payload.clone());
        self.status = DocumentStatus::Loading;
        self.pagination.reset();
        self.cache.clear();
        self.in_flight = None;
        self.page_error = None;
        self.intake_error = None;

        RenderCommand::Load(payload)
    }

    /// A failed read leaves the current document alone.
    pub fn accept_intake(&mut self, intake: IntakeResult) -> Option<RenderCommand> {
        match intake.result {
            Ok(payload) => Some(self.accept_payload(payload)),
            Err(e) => {
                log::error!("Failed to read {}: {}", intake.path.display(), e);
                self.intake_error = Some(e.to_string());
                None
            }
        }
    }

    pub fn reject_selection(&mut self, error: &PdfError) {
        log::warn!("Selection rejected: {}", error);
        self.intake_error = Some(error.to_string());
    }

    /// Applies a worker result. Returns false for results about a document that has since
    /// been replaced.
    pub fn apply_event(&mut self, event: RenderEvent) -> bool {
        if Some(event.id()) != self.document_id() {
            log::warn!("Ignoring result for superseded document {}", event.id());
            return false;
        }

        match event {
            RenderEvent::Loaded { result, .. } => {
                if !matches!(self.status, DocumentStatus::Loading) {
                    log::warn!("Ignoring repeated load result");
                    return false;
                }
                match result {
                    Ok(page_count) => {
                        self.pagination.set_page_count(page_count);
                        self.status = DocumentStatus::Loaded { page_count };
                    }
                    Err(e) => {
                        self.status = DocumentStatus::Failed(e);
                    }
                }
            }
            RenderEvent::Rendered {
                request, result, ..
            } => {
                let key = PageKey::from(&request);
                if self.in_flight == Some(key) {
                    self.in_flight = None;
                }
                match result {
                    Ok(image) => {
                        self.cache.put_page(key, image);
                        if self.page_error.as_ref().is_some_and(|(k, _)| *k == key) {
                            self.page_error = None;
                        }
                    }
                    Err(e) => {
                        self.page_error = Some((key, e));
                    }
                }
            }
        }
        true
    }

    /// The render worker is gone. A pending parse fails the document and a pending render
    /// fails its page. Returns false when nothing was waiting on the worker.
    pub fn fail_pending(&mut self, error: PdfError) -> bool {
        let mut changed = false;
        if matches!(self.status, DocumentStatus::Loading) {
            self.status = DocumentStatus::Failed(error.clone());
            changed = true;
        }
        if let Some(key) = self.in_flight.take() {
            self.page_error = Some((key, error.clone()));
            changed = true;
        }
        if changed {
            log::error!("Render worker unavailable: {}", error);
        }
        changed
    }

    /// Opens the modal. Without a document the view action is disabled, so this is a no-op.
    pub fn open_modal(&mut self) -> bool {
        if self.document.is_none() {
            return false;
        }
        if !self.modal_open {
            log::info!("Opening document modal");
            self.modal_open = true;
            self.pending_trigger = Some(ResizeTrigger::Opened);
        }
        true
    }

    pub fn close_modal(&mut self) {
        if self.modal_open {
            log::info!("Closing document modal");
        }
        self.modal_open = false;
        self.pending_trigger = None;
        self.container.forget();
    }

    /// Called once per frame with the window size; a change while the modal is open
    /// schedules a refit.
    pub fn observe_window_size(&mut self, size: egui::Vec2) {
        let changed = self.last_window_size.is_some_and(|last| last != size);
        self.last_window_size = Some(size);
        if changed && self.modal_open && self.pending_trigger.is_none() {
            self.pending_trigger = Some(ResizeTrigger::WindowResized);
        }
    }

    /// Records the modal body's laid-out size and refits the page if a trigger is pending.
    pub fn measure_container(&mut self, size: egui::Vec2) -> PageDimensions {
        self.container.measure(size);
        if let Some(trigger) = self.pending_trigger.take() {
            self.viewport.recompute(trigger, &self.container);
        }
        self.viewport.dimensions()
    }

    pub fn next_page(&mut self) -> bool {
        self.status.is_loaded() && self.pagination.next()
    }

    pub fn previous_page(&mut self) -> bool {
        self.status.is_loaded() && self.pagination.previous()
    }

    pub fn can_next(&self) -> bool {
        self.status.is_loaded() && self.pagination.can_next()
    }

    pub fn can_previous(&self) -> bool {
        self.status.is_loaded() && self.pagination.can_previous()
    }

    /// The render the modal needs right now, if any. Out-of-range pages are never
    /// requested.
    pub fn render_request(&self) -> Option<PageRenderRequest> {
        self.document.as_ref()?;
        if !self.modal_open || !self.status.is_loaded() {
            return None;
        }

        let dimensions = self.viewport.dimensions();
        if dimensions.is_empty() {
            return None;
        }

        let page = self.pagination.current();
        if !self.pagination.contains(page) {
            log::warn!("Refusing to render page {} outside the document", page);
            return None;
        }

        Some(PageRenderRequest::raster(page, dimensions))
    }

    /// Command for the current page unless it is cached, already requested, or failed.
    pub fn next_render_command(&mut self) -> Option<RenderCommand> {
        let request = self.render_request()?;
        let key = PageKey::from(&request);
        let id = self.document_id()?;

        let failed = self.page_error.as_ref().is_some_and(|(k, _)| *k == key);
        if failed || self.in_flight == Some(key) || self.cache.contains(&key) {
            return None;
        }

        log::debug!(
            "Requesting page {} at {}x{}",
            request.page,
            request.width,
            request.height
        );
        self.in_flight = Some(key);
        Some(RenderCommand::Render { id, request })
    }

    /// Rendered bitmap for the current page at the current size.
    pub fn current_page_image(&mut self) -> Option<(PageKey, Arc<RgbaImage>)> {
        let key = PageKey::from(&self.render_request()?);
        self.cache.get_page(&key).map(|image| (key, image))
    }

    /// Error for the page currently on screen, if its render failed.
    pub fn current_page_error(&self) -> Option<&PdfError> {
        let key = PageKey::from(&self.render_request()?);
        self.page_error
            .as_ref()
            .filter(|(k, _)| *k == key)
            .map(|(_, e)| e)
    }

    pub fn document_id(&self) -> Option<DocumentId> {
        self.document.as_ref().map(|doc| doc.id)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.document.as_ref().map(|doc| doc.name.as_str())
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn status(&self) -> &DocumentStatus {
        &self.status
    }

    pub fn current_page(&self) -> u16 {
        self.pagination.current()
    }

    pub fn page_count(&self) -> Option<u16> {
        self.pagination.page_count()
    }

    pub fn page_label(&self) -> String {
        self.pagination.label()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn page_dimensions(&self) -> PageDimensions {
        self.viewport.dimensions()
    }

    pub fn intake_error(&self) -> Option<&str> {
        self.intake_error.as_deref()
    }

    pub fn get_cache_stats(&self) -> cache::CacheStats {
        self.cache.get_stats()
    }
}

impl Default for PdfViewerState {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> PdfPayload {
        PdfPayload::new(DocumentId::new(), "doc.pdf", b"%PDF-1.7".to_vec())
    }

    fn loaded(state: &mut PdfViewerState, page_count: u16) -> DocumentId {
        let doc = payload();
        let id = doc.id;
        state.accept_payload(doc);
        assert!(state.apply_event(RenderEvent::Loaded {
            id,
            result: Ok(page_count),
        }));
        id
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = PdfViewerState::default();
        assert_eq!(state.status(), &DocumentStatus::Empty);
        assert!(!state.has_document());
        assert!(state.render_request().is_none());
    }

    #[test]
    fn test_open_without_document_is_noop() {
        let mut state = PdfViewerState::default();
        assert!(!state.open_modal());
        assert!(!state.is_modal_open());
    }

    #[test]
    fn test_upload_resets_to_first_page() {
        let mut state = PdfViewerState::default();
        loaded(&mut state, 5);
        state.next_page();
        state.next_page();
        assert_eq!(state.current_page(), 3);

        let command = state.accept_payload(payload());
        assert!(matches!(command, RenderCommand::Load(_)));
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.status(), &DocumentStatus::Loading);
        assert!(!state.can_next());
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut state = PdfViewerState::default();
        let old = payload();
        let old_id = old.id;
        state.accept_payload(old);
        state.accept_payload(payload());

        assert!(!state.apply_event(RenderEvent::Loaded {
            id: old_id,
            result: Ok(3),
        }));
        assert_eq!(state.status(), &DocumentStatus::Loading);
    }

    #[test]
    fn test_parse_failure_disables_navigation() {
        let mut state = PdfViewerState::default();
        let doc = payload();
        let id = doc.id;
        state.accept_payload(doc);
        state.apply_event(RenderEvent::Loaded {
            id,
            result: Err(PdfError::InvalidPdf("trailer".into())),
        });

        assert_eq!(state.status().message(), Some("Failed to load PDF file."));
        assert!(!state.next_page());
        assert!(!state.can_previous());
    }

    #[test]
    fn test_render_requires_open_modal_and_size() {
        let mut state = PdfViewerState::default();
        loaded(&mut state, 2);
        assert!(state.render_request().is_none());

        state.open_modal();
        assert!(state.render_request().is_none());

        state.measure_container(egui::vec2(1000.0, 800.0));
        let request = state.render_request().unwrap();
        assert_eq!(request.page, 1);
        assert_eq!(request.height, 720);
        assert_eq!(request.width, 556);
    }

    #[test]
    fn test_render_command_sent_once() {
        let mut state = PdfViewerState::default();
        loaded(&mut state, 2);
        state.open_modal();
        state.measure_container(egui::vec2(1000.0, 800.0));

        assert!(state.next_render_command().is_some());
        assert!(state.next_render_command().is_none());
    }

    #[test]
    fn test_rendered_page_is_cached() {
        let mut state = PdfViewerState::default();
        let id = loaded(&mut state, 2);
        state.open_modal();
        state.measure_container(egui::vec2(1000.0, 800.0));

        let Some(RenderCommand::Render { request, .. }) = state.next_render_command() else {
            panic!("expected render command");
        };
        state.apply_event(RenderEvent::Rendered {
            id,
            request,
            result: Ok(Arc::new(RgbaImage::new(2, 2))),
        });

        assert!(state.current_page_image().is_some());
        assert!(state.next_render_command().is_none());
    }

    #[test]
    fn test_render_failure_is_scoped_to_page() {
        let mut state = PdfViewerState::default();
        let id = loaded(&mut state, 2);
        state.open_modal();
        state.measure_container(egui::vec2(1000.0, 800.0));

        let Some(RenderCommand::Render { request, .. }) = state.next_render_command() else {
            panic!("expected render command");
        };
        state.apply_event(RenderEvent::Rendered {
            id,
            request,
            result: Err(PdfError::RenderFailed("oom".into())),
        });

        assert!(state.current_page_error().is_some());
        assert!(state.next_render_command().is_none());

        state.next_page();
        assert!(state.current_page_error().is_none());
        assert!(state.next_render_command().is_some());
    }

    #[test]
    fn test_resize_only_refits_while_open() {
        let mut state = PdfViewerState::default();
        loaded(&mut state, 1);
        state.observe_window_size(egui::vec2(1280.0, 1024.0));
        state.open_modal();
        let opened = state.measure_container(egui::vec2(1000.0, 800.0));

        // same window size: measurement alone does not refit
        let unchanged = state.measure_container(egui::vec2(500.0, 400.0));
        assert_eq!(opened, unchanged);

        state.observe_window_size(egui::vec2(640.0, 512.0));
        let resized = state.measure_container(egui::vec2(500.0, 400.0));
        assert!((resized.height - 360.0).abs() < 0.01);
    }

    #[test]
    fn test_close_modal_stops_rendering() {
        let mut state = PdfViewerState::default();
        loaded(&mut state, 3);
        state.open_modal();
        state.measure_container(egui::vec2(1000.0, 800.0));
        state.close_modal();
        assert!(state.render_request().is_none());
    }

    #[test]
    fn test_intake_failure_keeps_document() {
        let mut state = PdfViewerState::default();
        let id = loaded(&mut state, 4);
        let command = state.accept_intake(IntakeResult {
            id: DocumentId::new(),
            path: "broken.pdf".into(),
            result: Err(PdfError::FileReadError("denied".into())),
        });

        assert!(command.is_none());
        assert_eq!(state.document_id(), Some(id));
        assert_eq!(state.status(), &DocumentStatus::Loaded { page_count: 4 });
        assert!(state.intake_error().is_some());
    }

    #[test]
    fn test_lost_worker_fails_pending_load() {
        let mut state = PdfViewerState::default();
        state.accept_payload(payload());

        assert!(state.fail_pending(PdfError::WorkerDisconnected));
        assert_eq!(state.status().message(), Some("Failed to load PDF file."));
        assert!(!state.fail_pending(PdfError::WorkerDisconnected));
    }

    #[test]
    fn test_lost_worker_fails_pending_render() {
        let mut state = PdfViewerState::default();
        loaded(&mut state, 2);
        state.open_modal();
        state.measure_container(egui::vec2(1000.0, 800.0));
        assert!(state.next_render_command().is_some());

        assert!(state.fail_pending(PdfError::WorkerDisconnected));
        assert_eq!(state.status(), &DocumentStatus::Loaded { page_count: 2 });
        assert_eq!(
            state.current_page_error(),
            Some(&PdfError::WorkerDisconnected)
        );
        assert!(state.next_render_command().is_none());
    }
}
