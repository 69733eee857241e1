use super::{ViewerAction, filled_button};
use crate::constants::*;
use crate::viewer::state::PdfViewerState;
use eframe::egui;

pub fn show_upload_card(ctx: &egui::Context, state: &PdfViewerState) -> Option<ViewerAction> {
    let mut action = None;
    let card_width = CARD_WIDTH.min(ctx.content_rect().width() * CARD_MAX_WIDTH_FRACTION);

    egui::CentralPanel::default().show(ctx, |_ui| {});

    egui::Area::new(egui::Id::new("upload_card"))
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            egui::Frame::window(ui.style())
                .inner_margin(egui::Margin::same(16))
                .show(ui, |ui| {
                    ui.set_width(card_width);
                    ui.vertical_centered(|ui| {
                        ui.heading("PDF VIEWER");
                        ui.add_space(12.0);

                        match state.file_name() {
                            Some(name) => ui.label(name),
                            None => ui.label("Upload to View"),
                        };

                        if let Some(error) = state.intake_error() {
                            ui.colored_label(INTAKE_ERROR_COLOR, error);
                        }

                        ui.add_space(12.0);
                        ui.horizontal(|ui| {
                            if ui
                                .add(filled_button("Upload", UPLOAD_BUTTON_COLOR))
                                .clicked()
                            {
                                action = Some(ViewerAction::Upload);
                            }

                            if ui
                                .add_enabled(
                                    state.has_document(),
                                    filled_button("View", VIEW_BUTTON_COLOR),
                                )
                                .clicked()
                            {
                                action = Some(ViewerAction::View);
                            }
                        });
                    });
                });
        });

    action
}
