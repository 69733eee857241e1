use crate::constants::PAGE_BACKGROUND;
use crate::viewer::cache::PageKey;
use crate::viewer::document::DocumentId;
use crate::viewer::state::PdfViewerState;
use eframe::egui;
use image::RgbaImage;

/// GPU copy of the page on screen. Re-uploaded only when the document, page or size changes.
#[derive(Default)]
pub struct PageTexture {
    key: Option<(DocumentId, PageKey)>,
    handle: Option<egui::TextureHandle>,
}

impl PageTexture {
    fn get_or_upload(
        &mut self,
        ctx: &egui::Context,
        id: DocumentId,
        key: PageKey,
        image: &RgbaImage,
    ) -> &egui::TextureHandle {
        if self.key != Some((id, key)) {
            self.handle = None;
        }
        let handle = self.handle.get_or_insert_with(|| {
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [image.width() as usize, image.height() as usize],
                image.as_raw(),
            );
            ctx.load_texture(
                format!("pdf_page_{}", key.page),
                color_image,
                egui::TextureOptions::LINEAR,
            )
        });
        self.key = Some((id, key));
        handle
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.handle = None;
    }
}

fn show_message(ui: &egui::Ui, rect: egui::Rect, message: &str) {
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        message,
        egui::FontId::proportional(16.0),
        ui.visuals().text_color(),
    );
}

pub fn show_page(
    ui: &mut egui::Ui,
    body_rect: egui::Rect,
    state: &mut PdfViewerState,
    texture: &mut PageTexture,
) {
    if let Some(message) = state.status().message() {
        show_message(ui, body_rect, message);
        return;
    }

    if let Some(error) = state.current_page_error() {
        show_message(ui, body_rect, error.user_message());
        return;
    }

    let (Some(id), Some((key, image))) = (state.document_id(), state.current_page_image()) else {
        ui.put(
            egui::Rect::from_center_size(body_rect.center(), egui::vec2(24.0, 24.0)),
            egui::Spinner::new(),
        );
        return;
    };

    let size = egui::vec2(image.width() as f32, image.height() as f32);
    let page_rect = egui::Rect::from_center_size(body_rect.center(), size);
    let handle = texture.get_or_upload(ui.ctx(), id, key, &image);

    ui.painter().rect_filled(page_rect, 0.0, PAGE_BACKGROUND);
    ui.put(page_rect, egui::Image::new(handle).fit_to_exact_size(size));
}
