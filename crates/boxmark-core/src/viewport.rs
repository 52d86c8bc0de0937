//! Viewport module for pan/zoom transforms and layout measurement.

use crate::config::EditorConfig;
use crate::geometry::{LayoutMetrics, ScaleFactors};
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Viewport manages the user zoom and pan applied on top of the container.
///
/// Layout pixels are mapped to client pixels by translating to the container's
/// client origin plus the pan offset and scaling by `zoom`. The zoom is
/// independent of the image's display scale; the two compose into the
/// effective scale reported by [`Viewport::effective_scale`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan), in client pixels.
    pub offset: Vec2,
    /// Current zoom level (1.0 = container at its layout size).
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
    /// Zoom-in/zoom-out step, applied as a factor of `exp(zoom_step)`.
    pub zoom_step: f64,
    /// Client position of the container's unzoomed top-left corner.
    pub container_origin: Point,
    container_size: Option<Size>,
    natural_size: Option<Size>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Viewport {
    /// Create an unmeasured viewport with limits taken from `config`.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: config.min_zoom,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_step: config.zoom_step,
            container_origin: Point::ZERO,
            container_size: None,
            natural_size: None,
        }
    }

    pub fn container_size(&self) -> Option<Size> {
        self.container_size
    }

    pub fn natural_size(&self) -> Option<Size> {
        self.natural_size
    }

    /// Record the container's rendered size, rounded to whole pixels.
    ///
    /// Returns true if the stored size changed.
    pub fn set_container_size(&mut self, size: Size) -> bool {
        let rounded = size.round();
        if rounded.width <= 0.0 || rounded.height <= 0.0 {
            log::debug!("Ignoring degenerate container size {size:?}");
            return false;
        }
        if self.container_size == Some(rounded) {
            return false;
        }
        self.container_size = Some(rounded);
        true
    }

    /// Record the image's natural size. Returns true if it changed.
    pub fn set_natural_size(&mut self, size: Size) -> bool {
        if size.width <= 0.0 || size.height <= 0.0 || self.natural_size == Some(size) {
            return false;
        }
        self.natural_size = Some(size);
        true
    }

    /// Rendered size divided by natural size, once both are known.
    pub fn display_scale(&self) -> Option<ScaleFactors> {
        ScaleFactors::display(self.container_size?, self.natural_size?)
    }

    /// `display_scale × zoom`, once layout is measured.
    pub fn effective_scale(&self) -> Option<ScaleFactors> {
        self.display_scale().map(|display| display.compose(self.zoom))
    }

    /// Snapshot of the current measurements, or `None` until layout is measured.
    pub fn metrics(&self) -> Option<LayoutMetrics> {
        Some(LayoutMetrics {
            container: self.container_size?,
            display_scale: self.display_scale()?,
            zoom: self.zoom,
        })
    }

    /// Get the affine transform from layout to client coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.container_origin.to_vec2() + self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform, from client to layout coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom)
            * Affine::translate(-(self.container_origin.to_vec2() + self.offset))
    }

    /// Offset of a client point inside the container's zoomed on-screen box.
    pub fn client_to_zoomed_offset(&self, client: Point) -> Point {
        client - self.container_origin.to_vec2() - self.offset
    }

    /// Convert a client point to layout coordinates.
    pub fn client_to_layout(&self, client: Point) -> Point {
        self.inverse_transform() * client
    }

    /// Convert a layout point to client coordinates.
    pub fn layout_to_client(&self, layout: Point) -> Point {
        self.transform() * layout
    }

    /// The container's on-screen box after pan and zoom.
    pub fn container_client_box(&self) -> Option<Rect> {
        let size = self.container_size?;
        Some(self.transform().transform_rect_bbox(size.to_rect()))
    }

    /// Pan by a delta in client pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set an absolute zoom, keeping the given client point fixed.
    pub fn zoom_to(&mut self, scale: f64, center: Point) {
        let new_zoom = scale.max(self.min_zoom).min(self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let layout_point = self.client_to_layout(center);
        self.zoom = new_zoom;

        // Adjust offset so layout_point stays at center
        let new_client = self.layout_to_client(layout_point);
        self.offset += center - new_client;
    }

    /// Zoom by a factor, keeping the given client point fixed.
    pub fn zoom_at(&mut self, center: Point, factor: f64) {
        self.zoom_to(self.zoom * factor, center);
    }

    pub fn zoom_in(&mut self, center: Point) {
        self.zoom_at(center, self.zoom_step.exp());
    }

    pub fn zoom_out(&mut self, center: Point) {
        self.zoom_at(center, (-self.zoom_step).exp());
    }

    /// Double-click toggle: step in from minimum zoom, otherwise step out.
    pub fn double_click(&mut self, center: Point) {
        if self.is_at_min_zoom() {
            self.zoom_in(center);
        } else {
            self.zoom_out(center);
        }
    }

    pub fn is_at_min_zoom(&self) -> bool {
        self.zoom <= self.min_zoom + f64::EPSILON
    }

    /// Reset to minimum zoom with no pan.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = self.min_zoom;
    }

    /// Position of the zoom within `[min_zoom, max_zoom]` as a whole percentage.
    pub fn zoom_percent(&self) -> u32 {
        let range = self.max_zoom - self.min_zoom;
        if range <= 0.0 {
            return 0;
        }
        let percent = (self.zoom - self.min_zoom) * 100.0 / range;
        ((percent * 10.0).round() / 10.0).floor().max(0.0) as u32
    }
}
