//! Geometry primitives shared by the engines.
//!
//! Four coordinate spaces are in play:
//! - client: raw pointer coordinates reported by the host window,
//! - zoomed: offsets inside the container's on-screen (panned and zoomed) box,
//! - layout: container pixels before viewport zoom; rectangles live here,
//! - real: the image's natural resolution; the canonical persisted geometry.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Axis-aligned box stored as origin plus size.
///
/// `width`/`height` are only negative while a creation drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const ZERO: Bounds = Bounds {
        top: 0.0,
        left: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create bounds from the top-left corner and a size.
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Flip the anchor corner so that width and height are non-negative.
    pub fn normalized(self) -> Self {
        Self {
            top: if self.height < 0.0 {
                self.top + self.height
            } else {
                self.top
            },
            left: if self.width < 0.0 {
                self.left + self.width
            } else {
                self.left
            },
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }

    /// Multiply every field by the per-axis factors.
    pub fn scaled(self, sx: f64, sy: f64) -> Self {
        Self {
            top: self.top * sy,
            left: self.left * sx,
            width: self.width * sx,
            height: self.height * sy,
        }
    }

    /// Express layout bounds in real image pixels, given the display scale.
    pub fn to_real(self, display: ScaleFactors) -> Self {
        self.scaled(1.0 / display.x, 1.0 / display.y)
    }

    /// Express real image bounds in layout pixels, given the display scale.
    pub fn to_layout(self, display: ScaleFactors) -> Self {
        self.scaled(display.x, display.y)
    }

    /// Get the bounds as a kurbo Rect (normalized first).
    pub fn as_rect(&self) -> Rect {
        let n = self.normalized();
        Rect::new(n.left, n.top, n.right(), n.bottom())
    }

    /// Check whether a point lies inside (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        let n = self.normalized();
        point.x >= n.left && point.x <= n.right() && point.y >= n.top && point.y <= n.bottom()
    }

    /// Compare field by field within `tolerance`.
    pub fn approx_eq(&self, other: &Bounds, tolerance: f64) -> bool {
        (self.top - other.top).abs() <= tolerance
            && (self.left - other.left).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

/// Normalize a drag rectangle and bring it down to the unzoomed layout scale.
///
/// Idempotent for `scale == 1.0`.
pub fn normalize(bounds: Bounds, scale: f64) -> Bounds {
    let n = bounds.normalized();
    Bounds {
        top: n.top / scale,
        left: n.left / scale,
        width: n.width / scale,
        height: n.height / scale,
    }
}

/// `value` limited to `[min, max]`, with `min` winning when the range is empty.
///
/// Does not panic on an empty range, unlike `f64::clamp`.
pub fn clamp_between(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Per-axis scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ScaleFactors {
    pub const IDENTITY: ScaleFactors = ScaleFactors { x: 1.0, y: 1.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Display scale of an image rendered at `rendered` whose natural size is `natural`.
    ///
    /// Returns `None` until both sizes are measured.
    pub fn display(rendered: Size, natural: Size) -> Option<Self> {
        Self::ratio(rendered, natural)
    }

    /// Per-axis ratio `new / old`, or `None` if either size is degenerate.
    pub fn ratio(new: Size, old: Size) -> Option<Self> {
        if new.width <= 0.0 || new.height <= 0.0 || old.width <= 0.0 || old.height <= 0.0 {
            return None;
        }
        Some(Self::new(new.width / old.width, new.height / old.height))
    }

    /// Combine a display scale with a uniform viewport zoom.
    pub fn compose(self, zoom: f64) -> Self {
        Self::new(self.x * zoom, self.y * zoom)
    }

    /// Remove a uniform viewport zoom from an effective scale.
    pub fn decompose(self, zoom: f64) -> Self {
        Self::new(self.x / zoom, self.y / zoom)
    }
}

/// The measurements an engine needs to turn layout geometry into real geometry.
///
/// Always read fresh from the viewport at the moment a delta is applied, never
/// cached across a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Rendered container size (layout pixels).
    pub container: Size,
    /// Rendered size divided by natural size.
    pub display_scale: ScaleFactors,
    /// Viewport zoom (1.0 = no zoom).
    pub zoom: f64,
}

impl LayoutMetrics {
    /// `display_scale × zoom`: real pixels to on-screen zoomed pixels.
    pub fn effective_scale(&self) -> ScaleFactors {
        self.display_scale.compose(self.zoom)
    }

    /// Real geometry for layout bounds.
    ///
    /// Layout bounds are first lifted to zoomed screen pixels and then divided
    /// by the effective scale, which is the same as dividing by the display scale.
    pub fn to_real(&self, layout: Bounds) -> Bounds {
        let effective = self.effective_scale();
        layout
            .scaled(self.zoom, self.zoom)
            .scaled(1.0 / effective.x, 1.0 / effective.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_normalize_flips_negative_size() {
        let drag = Bounds::new(300.0, 250.0, -200.0, -150.0);
        let n = normalize(drag, 1.0);
        assert!(n.approx_eq(&Bounds::new(100.0, 100.0, 200.0, 150.0), EPS));
    }

    #[test]
    fn test_normalize_divides_by_zoom() {
        let drag = Bounds::new(200.0, 100.0, 100.0, -50.0);
        let n = normalize(drag, 2.0);
        assert!(n.approx_eq(&Bounds::new(100.0, 25.0, 50.0, 25.0), EPS));
    }

    #[test]
    fn test_normalize_idempotent() {
        let signs = [-1.0, 0.0, 1.0];
        for &sw in &signs {
            for &sh in &signs {
                let r = Bounds::new(37.5, 12.25, 80.0 * sw, 33.0 * sh);
                let once = normalize(r, 1.0);
                let twice = normalize(once, 1.0);
                assert_eq!(once, twice);
                assert!(once.width >= 0.0 && once.height >= 0.0);
            }
        }
    }

    #[test]
    fn test_real_round_trip() {
        let display = ScaleFactors::new(0.5, 0.25);
        let layout = Bounds::new(10.0, 20.0, 30.0, 40.0);
        let real = layout.to_real(display);
        assert!(real.approx_eq(&Bounds::new(20.0, 80.0, 60.0, 160.0), EPS));
        assert!(real.to_layout(display).approx_eq(&layout, EPS));
    }

    #[test]
    fn test_display_scale_requires_measurement() {
        assert!(ScaleFactors::display(Size::new(800.0, 600.0), Size::ZERO).is_none());
        assert!(ScaleFactors::display(Size::ZERO, Size::new(800.0, 600.0)).is_none());
        let s = ScaleFactors::display(Size::new(800.0, 600.0), Size::new(1600.0, 1200.0)).unwrap();
        assert!((s.x - 0.5).abs() < EPS);
        assert!((s.y - 0.5).abs() < EPS);
    }

    #[test]
    fn test_compose_decompose() {
        let display = ScaleFactors::new(0.5, 0.75);
        let effective = display.compose(2.0);
        assert!((effective.x - 1.0).abs() < EPS);
        assert!((effective.y - 1.5).abs() < EPS);
        assert_eq!(effective.decompose(2.0), display);
    }

    #[test]
    fn test_metrics_real_is_zoom_independent() {
        let layout = Bounds::new(100.0, 100.0, 200.0, 150.0);
        let mut metrics = LayoutMetrics {
            container: Size::new(800.0, 600.0),
            display_scale: ScaleFactors::new(0.5, 0.5),
            zoom: 1.0,
        };
        let at_one = metrics.to_real(layout);
        metrics.zoom = 3.0;
        let at_three = metrics.to_real(layout);
        assert!(at_one.approx_eq(&Bounds::new(200.0, 200.0, 400.0, 300.0), 1e-6));
        assert!(at_one.approx_eq(&at_three, 1e-6));
    }

    #[test]
    fn test_clamp_between_empty_range() {
        assert_eq!(clamp_between(50.0, 0.0, -20.0), 0.0);
        assert_eq!(clamp_between(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_between(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_contains_edges() {
        let b = Bounds::new(10.0, 10.0, 20.0, 20.0);
        assert!(b.contains(Point::new(10.0, 30.0)));
        assert!(!b.contains(Point::new(31.0, 15.0)));
        let r = b.as_rect();
        assert!((r.width() - 20.0).abs() < EPS);
    }
}
