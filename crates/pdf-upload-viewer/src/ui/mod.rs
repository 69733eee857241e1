pub mod modal;
pub mod page_view;
pub mod upload_card;

use crate::constants::BUTTON_TEXT_COLOR;
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Upload,
    View,
    PreviousPage,
    NextPage,
    Close,
}

pub(crate) fn filled_button(label: &str, fill: egui::Color32) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(label).color(BUTTON_TEXT_COLOR)).fill(fill)
}
