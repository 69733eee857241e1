use image::RgbaImage;
use pdf_upload_viewer::viewer::intake::FileIntake;
use pdf_upload_viewer::viewer::render_worker::{RenderCommand, RenderEvent, RenderWorker};
use pdf_upload_viewer::viewer::{
    DocumentId, DocumentStatus, PageRenderRequest, PdfPayload, RenderHost,
};
use pdf_upload_viewer::{PdfError, PdfViewerState, PdfViewerWidget, Result, ViewerConfig};
use std::io::Write;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Understands `FAKEPDF:<pages>` and nothing else.
struct FakeHost;

impl RenderHost for FakeHost {
    fn page_count(&self, bytes: &[u8]) -> Result<u16> {
        std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| text.strip_prefix("FAKEPDF:"))
            .and_then(|count| count.trim().parse().ok())
            .ok_or_else(|| PdfError::InvalidPdf("missing FAKEPDF header".into()))
    }

    fn render_page(&self, bytes: &[u8], request: &PageRenderRequest) -> Result<RgbaImage> {
        let page_count = self.page_count(bytes)?;
        if request.page == 0 || request.page > page_count {
            return Err(PdfError::PageOutOfRange {
                page: request.page,
                page_count,
            });
        }
        Ok(RgbaImage::new(request.width, request.height))
    }
}

fn spawn_worker() -> RenderWorker {
    RenderWorker::spawn(|| Ok(Box::new(FakeHost) as Box<dyn RenderHost>), None)
}

fn write_pdf(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::File::create(&path)
        .unwrap()
        .write_all(contents)
        .unwrap();
    path
}

fn upload(
    state: &mut PdfViewerState,
    intake: &mut FileIntake,
    worker: &RenderWorker,
    path: std::path::PathBuf,
) {
    intake.select(path).unwrap();
    let read = intake.wait().unwrap();
    let command = state.accept_intake(read).unwrap();
    worker.send(command).unwrap();

    let event = worker.recv_timeout(TIMEOUT).unwrap();
    assert!(state.apply_event(event));
}

#[test]
fn test_five_page_document_clamps_navigation() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = PdfViewerState::default();
    let mut intake = FileIntake::default();
    let worker = spawn_worker();

    upload(
        &mut state,
        &mut intake,
        &worker,
        write_pdf(&dir, "five.pdf", b"FAKEPDF:5"),
    );

    assert_eq!(state.status(), &DocumentStatus::Loaded { page_count: 5 });
    assert_eq!(state.current_page(), 1);

    for _ in 0..10 {
        state.next_page();
    }
    assert_eq!(state.current_page(), 5);
    assert!(!state.can_next());

    for _ in 0..10 {
        state.previous_page();
    }
    assert_eq!(state.current_page(), 1);
    assert!(!state.can_previous());
}

#[test]
fn test_corrupt_file_shows_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = PdfViewerState::default();
    let mut intake = FileIntake::default();
    let worker = spawn_worker();

    upload(
        &mut state,
        &mut intake,
        &worker,
        write_pdf(&dir, "broken.pdf", b"\x00\x01garbage"),
    );

    assert_eq!(state.status().message(), Some("Failed to load PDF file."));
    assert!(!state.can_next());
    assert!(!state.can_previous());
    assert!(!state.next_page());
}

#[test]
fn test_view_disabled_before_upload() {
    let mut state = PdfViewerState::default();
    assert!(!state.has_document());
    assert!(!state.open_modal());
    assert!(!state.is_modal_open());
    assert_eq!(state.status().message(), Some("No PDF file specified."));
}

#[test]
fn test_second_upload_resets_page() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = PdfViewerState::default();
    let mut intake = FileIntake::default();
    let worker = spawn_worker();

    upload(
        &mut state,
        &mut intake,
        &worker,
        write_pdf(&dir, "a.pdf", b"FAKEPDF:4"),
    );
    state.next_page();
    state.next_page();
    assert_eq!(state.current_page(), 3);

    upload(
        &mut state,
        &mut intake,
        &worker,
        write_pdf(&dir, "b.pdf", b"FAKEPDF:2"),
    );
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.page_count(), Some(2));
    assert_eq!(state.file_name(), Some("b.pdf"));
}

#[test]
fn test_stale_parse_is_ignored() {
    let mut state = PdfViewerState::default();
    let worker = spawn_worker();

    let first = PdfPayload::new(DocumentId::new(), "first.pdf", b"FAKEPDF:9".to_vec());
    let second = PdfPayload::new(DocumentId::new(), "second.pdf", b"FAKEPDF:3".to_vec());
    let first_id = first.id;

    let first_command = state.accept_payload(first);
    let second_command = state.accept_payload(second);

    // the older parse finishes first and must not win
    worker.send(first_command).unwrap();
    let stale = worker.recv_timeout(TIMEOUT).unwrap();
    assert_eq!(stale.id(), first_id);
    assert!(!state.apply_event(stale));
    assert_eq!(state.status(), &DocumentStatus::Loading);

    worker.send(second_command).unwrap();
    let fresh = worker.recv_timeout(TIMEOUT).unwrap();
    assert!(state.apply_event(fresh));
    assert_eq!(state.page_count(), Some(3));
}

#[test]
fn test_open_modal_renders_fitted_page() {
    let mut state = PdfViewerState::default();
    let worker = spawn_worker();

    let doc = PdfPayload::new(DocumentId::new(), "doc.pdf", b"FAKEPDF:2".to_vec());
    worker.send(state.accept_payload(doc)).unwrap();
    state.apply_event(worker.recv_timeout(TIMEOUT).unwrap());

    assert!(state.open_modal());
    let dims = state.measure_container(egui::vec2(1000.0, 800.0));
    assert!((dims.height - 720.0).abs() < 0.01);

    let command = state.next_render_command().unwrap();
    assert!(matches!(command, RenderCommand::Render { .. }));
    worker.send(command).unwrap();

    let event = worker.recv_timeout(TIMEOUT).unwrap();
    assert!(matches!(event, RenderEvent::Rendered { .. }));
    state.apply_event(event);

    let (key, image) = state.current_page_image().unwrap();
    assert_eq!(key.page, 1);
    assert_eq!((image.width(), image.height()), (556, 720));
    assert!(state.next_render_command().is_none());
}

#[test]
fn test_render_for_replaced_document_is_dropped() {
    let mut state = PdfViewerState::default();
    let worker = spawn_worker();

    let old = PdfPayload::new(DocumentId::new(), "old.pdf", b"FAKEPDF:2".to_vec());
    worker.send(state.accept_payload(old)).unwrap();
    state.apply_event(worker.recv_timeout(TIMEOUT).unwrap());
    state.open_modal();
    state.measure_container(egui::vec2(800.0, 800.0));
    let render = state.next_render_command().unwrap();

    let new = PdfPayload::new(DocumentId::new(), "new.pdf", b"FAKEPDF:1".to_vec());
    worker.send(state.accept_payload(new)).unwrap();
    worker.send(render).unwrap();

    let loaded = worker.recv_timeout(TIMEOUT).unwrap();
    assert!(matches!(loaded, RenderEvent::Loaded { .. }));
    assert!(state.apply_event(loaded));
    assert!(worker.recv_timeout(Duration::from_millis(200)).is_none());
}

#[test]
fn test_worker_rejects_out_of_range_page() {
    let worker = spawn_worker();
    let doc = PdfPayload::new(DocumentId::new(), "doc.pdf", b"FAKEPDF:2".to_vec());
    let id = doc.id;
    worker.send(RenderCommand::Load(doc)).unwrap();
    worker.recv_timeout(TIMEOUT).unwrap();

    worker
        .send(RenderCommand::Render {
            id,
            request: PageRenderRequest {
                page: 7,
                width: 10,
                height: 10,
                render_annotation_layer: false,
                render_text_layer: false,
            },
        })
        .unwrap();

    match worker.recv_timeout(TIMEOUT).unwrap() {
        RenderEvent::Rendered { result, .. } => assert_eq!(
            result.unwrap_err(),
            PdfError::PageOutOfRange {
                page: 7,
                page_count: 2
            }
        ),
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_empty_file_shows_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = PdfViewerState::default();
    let mut intake = FileIntake::default();
    let worker = spawn_worker();

    upload(
        &mut state,
        &mut intake,
        &worker,
        write_pdf(&dir, "empty.pdf", b""),
    );

    assert!(state.has_document());
    assert_eq!(state.status().message(), Some("Failed to load PDF file."));
}

#[test]
fn test_crashed_render_host_fails_upload() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(&dir, "a.pdf", b"FAKEPDF:3");
    let ctx = egui::Context::default();
    let mut widget = PdfViewerWidget::with_host(&ctx, &ViewerConfig::default(), || {
        panic!("render host crashed")
    });

    widget.open_pdf(path);
    let deadline = std::time::Instant::now() + TIMEOUT;
    while std::time::Instant::now() < deadline {
        let _ = ctx.run(egui::RawInput::default(), |ctx| widget.show(ctx));
        if matches!(widget.state().status(), DocumentStatus::Failed(_)) {
            break;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    assert_eq!(
        widget.state().status(),
        &DocumentStatus::Failed(PdfError::WorkerDisconnected)
    );
    assert_eq!(
        widget.state().status().message(),
        Some("Failed to load PDF file.")
    );
}
