use crate::config::ViewerConfig;
use crate::error::Result;
use crate::ui::ViewerAction;
use crate::ui::modal::show_document_modal;
use crate::ui::page_view::PageTexture;
use crate::ui::upload_card::show_upload_card;
use crate::viewer::intake::FileIntake;
use crate::viewer::render_host::{PdfiumHost, RenderHost};
use crate::viewer::render_worker::{RenderCommand, RenderWorker};
use crate::viewer::state::PdfViewerState;
use eframe::egui;
use std::path::PathBuf;

pub struct PdfViewerWidget {
    viewer_state: PdfViewerState,
    intake: FileIntake,
    worker: RenderWorker,
    texture: PageTexture,
    modal_fraction: f32,
}

impl PdfViewerWidget {
    /// Widget backed by PDFium. The library is bound on the render thread; if that fails
    /// every upload reports a load failure.
    pub fn new(ctx: &egui::Context, config: &ViewerConfig) -> Self {
        let library_dir = config.pdfium_library_dir.clone();
        Self::with_host(
            ctx,
            config,
            move || {
                PdfiumHost::bind(library_dir.as_deref())
                    .map(|host| Box::new(host) as Box<dyn RenderHost>)
            },
        )
    }

    pub fn with_host<F>(ctx: &egui::Context, config: &ViewerConfig, factory: F) -> Self
    where
        F: FnOnce() -> Result<Box<dyn RenderHost>> + Send + 'static,
    {
        Self {
            viewer_state: PdfViewerState::new(config),
            intake: FileIntake::new(Some(ctx.clone())),
            worker: RenderWorker::spawn(factory, Some(ctx.clone())),
            texture: PageTexture::default(),
            modal_fraction: config.modal_fraction,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.poll_background();
        self.handle_dropped_files(ctx);
        self.viewer_state
            .observe_window_size(ctx.content_rect().size());

        if let Some(action) = show_upload_card(ctx, &self.viewer_state) {
            self.apply(action);
        }

        if self.viewer_state.is_modal_open() {
            let actions = show_document_modal(
                ctx,
                &mut self.viewer_state,
                &mut self.texture,
                self.modal_fraction,
            );
            for action in actions {
                self.apply(action);
            }
        }

        if let Some(command) = self.viewer_state.next_render_command() {
            self.dispatch(command);
        }
    }

    fn poll_background(&mut self) {
        if let Some(intake) = self.intake.poll()
            && let Some(command) = self.viewer_state.accept_intake(intake)
        {
            self.texture.clear();
            self.dispatch(command);
        }

        match self.worker.try_events() {
            Ok(events) => {
                for event in events {
                    self.viewer_state.apply_event(event);
                }
            }
            Err(e) => {
                self.viewer_state.fail_pending(e);
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Option<PathBuf> =
            ctx.input(|i| i.raw.dropped_files.iter().find_map(|f| f.path.clone()));

        if let Some(path) = dropped {
            self.open_pdf(path);
        }
    }

    fn apply(&mut self, action: ViewerAction) {
        match action {
            ViewerAction::Upload => {
                if self.intake.pick().is_none() {
                    log::debug!("File selection cancelled");
                }
            }
            ViewerAction::View => {
                self.viewer_state.open_modal();
            }
            ViewerAction::PreviousPage => {
                self.viewer_state.previous_page();
            }
            ViewerAction::NextPage => {
                self.viewer_state.next_page();
            }
            ViewerAction::Close => self.viewer_state.close_modal(),
        }
    }

    fn dispatch(&mut self, command: RenderCommand) {
        if let Err(e) = self.worker.send(command) {
            log::error!("Failed to reach render worker: {}", e);
            self.viewer_state.fail_pending(e);
        }
    }

    /// Starts reading `path` as if it had been picked in the dialog.
    pub fn open_pdf(&mut self, path: PathBuf) {
        if let Err(e) = self.intake.select(path) {
            self.viewer_state.reject_selection(&e);
        }
    }

    pub fn state(&self) -> &PdfViewerState {
        &self.viewer_state
    }

    pub fn state_mut(&mut self) -> &mut PdfViewerState {
        &mut self.viewer_state
    }

    pub fn current_page(&self) -> u16 {
        self.viewer_state.current_page()
    }

    pub fn page_count(&self) -> Option<u16> {
        self.viewer_state.page_count()
    }
}
