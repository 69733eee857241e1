use crate::config::ViewerConfig;
use crate::widget::PdfViewerWidget;
use eframe::egui;

pub struct PdfViewerApp {
    widget: PdfViewerWidget,
}

impl PdfViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &ViewerConfig) -> Self {
        cc.egui_ctx.set_theme(config.theme.to_egui());
        Self {
            widget: PdfViewerWidget::new(&cc.egui_ctx, config),
        }
    }
}

impl eframe::App for PdfViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.widget.show(ctx);
    }
}
