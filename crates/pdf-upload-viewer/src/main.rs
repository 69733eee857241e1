use eframe::egui;
use pdf_upload_viewer::app::PdfViewerApp;
use pdf_upload_viewer::config::{CONFIG_FILE_NAME, ViewerConfig};
use std::path::Path;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::load_or_default(Path::new(CONFIG_FILE_NAME));
    let title = config.window_title.clone();

    let options = eframe::NativeOptions {
        vsync: true,
        renderer: eframe::Renderer::Glow,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_title(&title)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    log::info!("Starting {}", title);

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(PdfViewerApp::new(cc, &config)))),
    )
}
