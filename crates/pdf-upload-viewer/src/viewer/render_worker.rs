use crate::error::{PdfError, Result};
use crate::viewer::document::{DocumentId, PdfPayload};
use crate::viewer::render_host::{PageRenderRequest, RenderHost};
use crossbeam::channel::{Receiver, Sender, TryRecvError, unbounded};
use image::RgbaImage;
use std::sync::Arc;
use std::thread::JoinHandle;

#[derive(Debug)]
pub enum RenderCommand {
    Load(PdfPayload),
    Render {
        id: DocumentId,
        request: PageRenderRequest,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum RenderEvent {
    Loaded {
        id: DocumentId,
        result: Result<u16>,
    },
    Rendered {
        id: DocumentId,
        request: PageRenderRequest,
        result: Result<Arc<RgbaImage>>,
    },
}

impl RenderEvent {
    pub fn id(&self) -> DocumentId {
        match self {
            RenderEvent::Loaded { id, .. } | RenderEvent::Rendered { id, .. } => *id,
        }
    }
}

/// Drops work made obsolete by later commands in the same batch: everything before the last
/// `Load`, and every render but the last one. A `Shutdown` ends the batch.
pub fn coalesce(batch: Vec<RenderCommand>) -> Vec<RenderCommand> {
    let batch: Vec<RenderCommand> = match batch
        .iter()
        .position(|command| matches!(command, RenderCommand::Shutdown))
    {
        Some(stop) => batch.into_iter().take(stop + 1).collect(),
        None => batch,
    };

    let last_load = batch
        .iter()
        .rposition(|command| matches!(command, RenderCommand::Load(_)));
    let last_render = batch
        .iter()
        .rposition(|command| matches!(command, RenderCommand::Render { .. }));

    batch
        .into_iter()
        .enumerate()
        .filter(|(index, command)| match command {
            RenderCommand::Load(_) => Some(*index) == last_load,
            RenderCommand::Render { .. } => {
                Some(*index) == last_render && last_load.is_none_or(|load| *index > load)
            }
            RenderCommand::Shutdown => true,
        })
        .map(|(_, command)| command)
        .collect()
}

struct WorkerLoop {
    host: Result<Box<dyn RenderHost>>,
    current: Option<PdfPayload>,
    events: Sender<RenderEvent>,
    repaint: Option<egui::Context>,
}

impl WorkerLoop {
    fn run(mut self, commands: Receiver<RenderCommand>) {
        while let Ok(first) = commands.recv() {
            let mut batch = vec![first];
            batch.extend(commands.try_iter());

            for command in coalesce(batch) {
                match command {
                    RenderCommand::Load(payload) => self.load(payload),
                    RenderCommand::Render { id, request } => self.render(id, request),
                    RenderCommand::Shutdown => {
                        log::debug!("Render worker shutting down");
                        return;
                    }
                }
            }
        }
    }

    fn host(&self) -> Result<&dyn RenderHost> {
        match &self.host {
            Ok(host) => Ok(&**host),
            Err(e) => Err(e.clone()),
        }
    }

    fn parse(&self, payload: &PdfPayload) -> Result<u16> {
        if payload.is_empty() {
            return Err(PdfError::InvalidPdf("empty file".into()));
        }
        self.host()?.page_count(&payload.bytes)
    }

    fn load(&mut self, payload: PdfPayload) {
        let id = payload.id;
        let result = self
            .parse(&payload)
            .and_then(|count| match count {
                0 => Err(PdfError::EmptyDocument),
                count => Ok(count),
            });

        match &result {
            Ok(count) => log::info!("Parsed {} ({} pages)", payload.name, count),
            Err(e) => log::error!("Failed to parse {}: {}", payload.name, e),
        }

        self.current = Some(payload);
        self.send(RenderEvent::Loaded { id, result });
    }

    fn render(&self, id: DocumentId, request: PageRenderRequest) {
        let Some(payload) = self.current.as_ref().filter(|payload| payload.id == id) else {
            log::warn!("Skipping render of page {} for superseded document", request.page);
            return;
        };

        let result = self
            .host()
            .and_then(|host| host.render_page(&payload.bytes, &request))
            .map(Arc::new);

        if let Err(e) = &result {
            log::error!("Failed to render page {}: {}", request.page, e);
        }

        self.send(RenderEvent::Rendered {
            id,
            request,
            result,
        });
    }

    fn send(&self, event: RenderEvent) {
        if self.events.send(event).is_ok()
            && let Some(ctx) = &self.repaint
        {
            ctx.request_repaint();
        }
    }
}

/// Owns the render host on a dedicated thread. The host is built on that thread, so it never
/// has to be `Send`.
pub struct RenderWorker {
    commands: Sender<RenderCommand>,
    events: Receiver<RenderEvent>,
    handle: Option<JoinHandle<()>>,
}

impl RenderWorker {
    pub fn spawn<F>(factory: F, repaint: Option<egui::Context>) -> Self
    where
        F: FnOnce() -> Result<Box<dyn RenderHost>> + Send + 'static,
    {
        let (command_tx, command_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();

        let handle = std::thread::Builder::new()
            .name("pdf-render".to_string())
            .spawn(move || {
                let host = factory();
                if let Err(e) = &host {
                    log::error!("Render host unavailable: {}", e);
                }
                WorkerLoop {
                    host,
                    current: None,
                    events: event_tx,
                    repaint,
                }
                .run(command_rx);
            })
            .map_err(|e| log::error!("Failed to spawn render worker: {}", e))
            .ok();

        Self {
            commands: command_tx,
            events: event_rx,
            handle,
        }
    }

    pub fn send(&self, command: RenderCommand) -> Result<()> {
        if self.handle.is_none() {
            return Err(PdfError::WorkerDisconnected);
        }
        self.commands
            .send(command)
            .map_err(|_| PdfError::WorkerDisconnected)
    }

    /// Drains finished work. Fails with `WorkerDisconnected` once the worker thread has
    /// exited and nothing is left to drain.
    pub fn try_events(&self) -> Result<Vec<RenderEvent>> {
        let mut events = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => return Ok(events),
                Err(TryRecvError::Disconnected) if events.is_empty() => {
                    return Err(PdfError::WorkerDisconnected);
                }
                Err(TryRecvError::Disconnected) => return Ok(events),
            }
        }
    }

    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<RenderEvent> {
        self.events.recv_timeout(timeout).ok()
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        let _ = self.commands.send(RenderCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
