use egui::Color32;

pub const US_LETTER_ASPECT_RATIO: f32 = 8.5 / 11.0;
pub const DEFAULT_PAGE_FILL: f32 = 0.9;
pub const DEFAULT_MODAL_FRACTION: f32 = 0.8;
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

pub const FIRST_PAGE: u16 = 1;

pub const MIN_RENDER_DIMENSION: u32 = 1;
pub const MAX_RENDER_DIMENSION: u32 = 4096;

pub const CARD_WIDTH: f32 = 400.0;
pub const CARD_MAX_WIDTH_FRACTION: f32 = 0.9;
pub const MODAL_HEADER_HEIGHT: f32 = 32.0;
pub const MODAL_FOOTER_HEIGHT: f32 = 36.0;
pub const MODAL_MARGIN: f32 = 8.0;

pub const PAGE_BACKGROUND: Color32 = Color32::WHITE;
pub const BACKDROP_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 120);
pub const UPLOAD_BUTTON_COLOR: Color32 = Color32::from_rgb(229, 62, 62);
pub const VIEW_BUTTON_COLOR: Color32 = Color32::from_rgb(49, 130, 206);
pub const CLOSE_BUTTON_COLOR: Color32 = Color32::from_rgb(229, 62, 62);
pub const BUTTON_TEXT_COLOR: Color32 = Color32::WHITE;
pub const INTAKE_ERROR_COLOR: Color32 = Color32::from_rgb(197, 48, 48);
