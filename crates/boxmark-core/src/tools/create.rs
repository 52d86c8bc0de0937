//! Creation engine: a press-drag-release sequence turned into a rectangle.

use crate::geometry::{Bounds, LayoutMetrics, normalize};
use crate::rectangle::{Rectangle, RectangleId};
use kurbo::{Point, Size, Vec2};
use uuid::Uuid;

/// A rectangle being drawn.
///
/// Coordinates are offsets inside the container's zoomed on-screen box, so
/// the raw size may be negative when the pointer moves up or left of the
/// anchor. A draft never enters the committed collection until [`Draft::finish`].
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    id: RectangleId,
    anchor: Point,
    size: Vec2,
    real: Bounds,
}

impl Draft {
    /// Start a zero-sized draft at `anchor`.
    pub fn begin(anchor: Point, metrics: &LayoutMetrics) -> Self {
        let mut draft = Self {
            id: Uuid::new_v4(),
            anchor,
            size: Vec2::ZERO,
            real: Bounds::ZERO,
        };
        draft.refresh_real(metrics);
        draft
    }

    pub fn id(&self) -> RectangleId {
        self.id
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Track the pointer's current offset.
    pub fn update(&mut self, offset: Point, metrics: &LayoutMetrics) {
        self.size = offset - self.anchor;
        self.refresh_real(metrics);
    }

    /// Un-normalized bounds in zoomed screen pixels.
    pub fn raw_bounds(&self) -> Bounds {
        Bounds::new(self.anchor.x, self.anchor.y, self.size.x, self.size.y)
    }

    /// Normalized layout bounds for drawing the draft.
    pub fn preview(&self, zoom: f64) -> Bounds {
        normalize(self.raw_bounds(), zoom)
    }

    /// Live size readout at the image's natural resolution.
    pub fn real_size(&self) -> Size {
        self.real.size()
    }

    pub fn real_coordinates(&self) -> Bounds {
        self.real
    }

    /// Whether the draft is too small to keep, measured in screen pixels.
    pub fn is_undersized(&self, min_size: f64) -> bool {
        let screen = normalize(self.raw_bounds(), 1.0);
        screen.width < min_size || screen.height < min_size
    }

    /// Commit the draft, or `None` if it was an accidental click.
    pub fn finish(self, metrics: &LayoutMetrics, min_size: f64) -> Option<Rectangle> {
        if self.is_undersized(min_size) {
            log::debug!("Discarding undersized draft {:?}", self.raw_bounds());
            return None;
        }
        let bounds = normalize(self.raw_bounds(), metrics.zoom);
        Some(Rectangle::with_id(self.id, bounds, metrics))
    }

    fn refresh_real(&mut self, metrics: &LayoutMetrics) {
        let effective = metrics.effective_scale();
        self.real = normalize(self.raw_bounds(), 1.0).scaled(1.0 / effective.x, 1.0 / effective.y);
    }
}
