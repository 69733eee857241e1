use crate::constants::{DEFAULT_PAGE_FILL, US_LETTER_ASPECT_RATIO};

/// Source of the modal body's measured size. `None` means nothing has been laid out yet.
pub trait ContainerSizeProvider {
    fn container_size(&self) -> Option<egui::Vec2>;
}

impl ContainerSizeProvider for egui::Vec2 {
    fn container_size(&self) -> Option<egui::Vec2> {
        Some(*self)
    }
}

/// Last size reported by the layout pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasuredContainer {
    size: Option<egui::Vec2>,
}

impl MeasuredContainer {
    pub fn measure(&mut self, size: egui::Vec2) {
        self.size = Some(size);
    }

    pub fn forget(&mut self) {
        self.size = None;
    }
}

impl ContainerSizeProvider for MeasuredContainer {
    fn container_size(&self) -> Option<egui::Vec2> {
        self.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
}

impl PageDimensions {
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Largest page of the given aspect ratio that fits in `fill` of the container on both axes.
pub fn fit_page(container: egui::Vec2, aspect_ratio: f32, fill: f32) -> PageDimensions {
    let max_width = container.x.max(0.0) * fill;
    let max_height = container.y.max(0.0) * fill;

    let mut width = max_width;
    let mut height = width / aspect_ratio;

    if height > max_height {
        height = max_height;
        width = height * aspect_ratio;
    }

    PageDimensions { width, height }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeTrigger {
    Opened,
    WindowResized,
}

#[derive(Debug, Clone)]
pub struct ViewportSizer {
    aspect_ratio: f32,
    fill: f32,
    dimensions: PageDimensions,
}

impl ViewportSizer {
    pub fn new(aspect_ratio: f32, fill: f32) -> Self {
        Self {
            aspect_ratio,
            fill,
            dimensions: PageDimensions::default(),
        }
    }

    /// Re-measures the container and refits the page. Keeps the previous dimensions when the
    /// provider has no measurement yet.
    pub fn recompute(
        &mut self,
        trigger: ResizeTrigger,
        provider: &dyn ContainerSizeProvider,
    ) -> PageDimensions {
        if let Some(size) = provider.container_size() {
            self.dimensions = fit_page(size, self.aspect_ratio, self.fill);
            log::debug!(
                "Viewport {:?}: container {:.0}x{:.0} -> page {:.1}x{:.1}",
                trigger,
                size.x,
                size.y,
                self.dimensions.width,
                self.dimensions.height
            );
        }
        self.dimensions
    }

    pub fn dimensions(&self) -> PageDimensions {
        self.dimensions
    }
}

impl Default for ViewportSizer {
    fn default() -> Self {
        Self::new(US_LETTER_ASPECT_RATIO, DEFAULT_PAGE_FILL)
    }
}
