use super::page_view::{self, PageTexture};
use super::{ViewerAction, filled_button};
use crate::constants::*;
use crate::viewer::state::PdfViewerState;
use eframe::egui;

fn keyboard_action(ui: &egui::Ui) -> Option<ViewerAction> {
    ui.input(|i| {
        if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::PageUp) {
            Some(ViewerAction::PreviousPage)
        } else if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::PageDown) {
            Some(ViewerAction::NextPage)
        } else {
            None
        }
    })
}

fn show_footer(ui: &mut egui::Ui, state: &PdfViewerState, actions: &mut Vec<ViewerAction>) {
    ui.horizontal(|ui| {
        if ui
            .add_enabled(
                state.can_previous(),
                filled_button("Previous", VIEW_BUTTON_COLOR),
            )
            .clicked()
        {
            actions.push(ViewerAction::PreviousPage);
        }

        ui.label(state.page_label());

        if ui
            .add_enabled(state.can_next(), filled_button("Next", VIEW_BUTTON_COLOR))
            .clicked()
        {
            actions.push(ViewerAction::NextPage);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.add(filled_button("Close", CLOSE_BUTTON_COLOR)).clicked() {
                actions.push(ViewerAction::Close);
            }
        });
    });
}

/// Document dialog: header, one page sized to the body, pagination footer. Escape and
/// backdrop clicks close it as well.
pub fn show_document_modal(
    ctx: &egui::Context,
    state: &mut PdfViewerState,
    texture: &mut PageTexture,
    modal_fraction: f32,
) -> Vec<ViewerAction> {
    let mut actions = Vec::new();
    let modal_size = ctx.content_rect().size() * modal_fraction;

    let response = egui::Modal::new(egui::Id::new("pdf_document_modal"))
        .backdrop_color(BACKDROP_COLOR)
        .show(ctx, |ui| {
            ui.set_width(modal_size.x);
            ui.set_height(modal_size.y);

            ui.horizontal(|ui| {
                ui.heading("PDF Document");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("❌").clicked() {
                        actions.push(ViewerAction::Close);
                    }
                });
            });
            ui.separator();

            let body_height =
                (modal_size.y - MODAL_HEADER_HEIGHT - MODAL_FOOTER_HEIGHT - MODAL_MARGIN).max(0.0);
            let (body_rect, _) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), body_height),
                egui::Sense::hover(),
            );
            state.measure_container(body_rect.size());
            page_view::show_page(ui, body_rect, state, texture);

            ui.separator();
            show_footer(ui, state, &mut actions);

            if let Some(action) = keyboard_action(ui) {
                actions.push(action);
            }
        });

    if response.should_close() {
        actions.push(ViewerAction::Close);
    }

    actions
}
