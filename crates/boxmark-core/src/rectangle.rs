//! Region-of-interest rectangle, the one entity the editor persists.

use crate::geometry::{Bounds, LayoutMetrics, ScaleFactors};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for rectangles.
pub type RectangleId = Uuid;

/// Display band for an externally supplied confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    /// Classify a score in `[0, 1]`.
    pub fn from_score(score: f64) -> Self {
        if score < 0.5 {
            ScoreBand::Low
        } else if score < 0.75 {
            ScoreBand::Medium
        } else {
            ScoreBand::High
        }
    }
}

/// A committed rectangle.
///
/// `bounds` are layout pixels; `real_coordinates` are derived from them and the
/// scale in effect at the last mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub(crate) id: RectangleId,
    /// Current geometry in layout pixels.
    #[serde(flatten)]
    pub bounds: Bounds,
    /// Last committed layout geometry, the reference for responsive re-layout.
    pub initial_coordinates: Bounds,
    /// Container size when `initial_coordinates` was captured.
    pub initial_image_size: Size,
    /// Effective scale when the rectangle was created, moved or resized.
    pub initial_scale: ScaleFactors,
    /// Geometry at the image's natural resolution.
    pub real_coordinates: Bounds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Detector confidence in `[0, 1]`; dropped on any manual geometry change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Rectangle {
    /// Create a rectangle from normalized layout bounds, stamping every
    /// reference field from the current metrics.
    pub fn new(bounds: Bounds, metrics: &LayoutMetrics) -> Self {
        Self::with_id(Uuid::new_v4(), bounds, metrics)
    }

    pub(crate) fn with_id(id: RectangleId, bounds: Bounds, metrics: &LayoutMetrics) -> Self {
        Self {
            id,
            bounds,
            initial_coordinates: bounds,
            initial_image_size: metrics.container,
            initial_scale: metrics.effective_scale(),
            real_coordinates: metrics.to_real(bounds),
            name: None,
            description: None,
            score: None,
        }
    }

    /// Materialise a baseline annotation at the current layout.
    ///
    /// Returns `None` when the annotation carries no usable natural size.
    pub fn from_annotation(annotation: &Annotation, metrics: &LayoutMetrics) -> Option<Self> {
        let display = ScaleFactors::display(metrics.container, annotation.natural_size)?;
        let bounds = annotation.real_coordinates.to_layout(display);
        Some(Self {
            id: annotation.id.unwrap_or_else(Uuid::new_v4),
            bounds,
            initial_coordinates: bounds,
            initial_image_size: metrics.container,
            initial_scale: display.compose(metrics.zoom),
            real_coordinates: annotation.real_coordinates,
            name: annotation.name.clone(),
            description: annotation.description.clone(),
            score: annotation.score,
        })
    }

    pub fn id(&self) -> RectangleId {
        self.id
    }

    /// Commit new layout geometry after a manual move or resize.
    pub fn commit_geometry(&mut self, bounds: Bounds, metrics: &LayoutMetrics) {
        self.bounds = bounds;
        self.initial_coordinates = bounds;
        self.initial_image_size = metrics.container;
        self.initial_scale = metrics.effective_scale();
        self.real_coordinates = metrics.to_real(bounds);
        self.score = None;
    }

    /// Rescale from the last committed geometry to a new container size.
    ///
    /// Real coordinates are left untouched: the rectangle still covers the
    /// same part of the image.
    pub fn relayout(&mut self, container: Size) {
        if let Some(ratio) = ScaleFactors::ratio(container, self.initial_image_size) {
            self.bounds = self.initial_coordinates.scaled(ratio.x, ratio.y);
        }
    }

    /// Recompute real geometry and the stamped scale from the current bounds.
    ///
    /// Layout geometry and the score are left untouched.
    pub fn rescale_real(&mut self, metrics: &LayoutMetrics) {
        self.initial_scale = metrics.effective_scale();
        self.real_coordinates = metrics.to_real(self.bounds);
    }

    /// A copy with a fresh identifier.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    pub fn score_band(&self) -> Option<ScoreBand> {
        self.score.map(ScoreBand::from_score)
    }

    pub fn as_rect(&self) -> Rect {
        self.bounds.as_rect()
    }

    /// Check if a layout point hits the rectangle.
    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }
}

/// Baseline entry supplied by the external image/detection source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RectangleId>,
    pub real_coordinates: Bounds,
    /// Natural size of the image the coordinates refer to.
    pub natural_size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Annotation {
    pub fn new(real_coordinates: Bounds, natural_size: Size) -> Self {
        Self {
            id: None,
            real_coordinates,
            natural_size,
            name: None,
            description: None,
            score: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> LayoutMetrics {
        LayoutMetrics {
            container: Size::new(800.0, 600.0),
            display_scale: ScaleFactors::new(0.5, 0.5),
            zoom: 1.0,
        }
    }

    #[test]
    fn test_new_stamps_reference_fields() {
        let rect = Rectangle::new(Bounds::new(100.0, 100.0, 200.0, 150.0), &metrics());
        assert_eq!(rect.initial_coordinates, rect.bounds);
        assert_eq!(rect.initial_image_size, Size::new(800.0, 600.0));
        assert_eq!(rect.initial_scale, ScaleFactors::new(0.5, 0.5));
        assert!(rect
            .real_coordinates
            .approx_eq(&Bounds::new(200.0, 200.0, 400.0, 300.0), 1e-9));
    }

    #[test]
    fn test_from_annotation() {
        let mut annotation = Annotation::new(
            Bounds::new(200.0, 200.0, 400.0, 300.0),
            Size::new(1600.0, 1200.0),
        );
        annotation.score = Some(0.9);
        let rect = Rectangle::from_annotation(&annotation, &metrics()).unwrap();
        assert!(rect.bounds.approx_eq(&Bounds::new(100.0, 100.0, 200.0, 150.0), 1e-9));
        assert_eq!(rect.score_band(), Some(ScoreBand::High));
    }

    #[test]
    fn test_from_annotation_without_natural_size() {
        let annotation = Annotation::new(Bounds::new(1.0, 1.0, 1.0, 1.0), Size::ZERO);
        assert!(Rectangle::from_annotation(&annotation, &metrics()).is_none());
    }

    #[test]
    fn test_commit_geometry_clears_score() {
        let mut rect = Rectangle::new(Bounds::new(0.0, 0.0, 50.0, 50.0), &metrics());
        rect.score = Some(0.4);
        rect.commit_geometry(Bounds::new(10.0, 10.0, 50.0, 50.0), &metrics());
        assert!(rect.score.is_none());
        assert_eq!(rect.initial_coordinates, Bounds::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn test_relayout_round_trip() {
        let mut rect = Rectangle::new(Bounds::new(100.0, 60.0, 200.0, 150.0), &metrics());
        rect.relayout(Size::new(400.0, 300.0));
        assert!(rect.bounds.approx_eq(&Bounds::new(50.0, 30.0, 100.0, 75.0), 1e-9));
        rect.relayout(Size::new(800.0, 600.0));
        assert!(rect.bounds.approx_eq(&Bounds::new(100.0, 60.0, 200.0, 150.0), 1e-9));
    }

    #[test]
    fn test_rescale_real_keeps_layout_and_score() {
        let mut rect = Rectangle::new(Bounds::new(100.0, 100.0, 200.0, 150.0), &metrics());
        rect.score = Some(0.6);
        let sharper = LayoutMetrics {
            display_scale: ScaleFactors::new(0.25, 0.25),
            ..metrics()
        };
        rect.rescale_real(&sharper);
        assert_eq!(rect.bounds, Bounds::new(100.0, 100.0, 200.0, 150.0));
        assert!(rect
            .real_coordinates
            .approx_eq(&Bounds::new(400.0, 400.0, 800.0, 600.0), 1e-9));
        assert_eq!(rect.initial_scale, ScaleFactors::new(0.25, 0.25));
        assert_eq!(rect.score, Some(0.6));
    }

    #[test]
    fn test_duplicate_has_new_id() {
        let rect = Rectangle::new(Bounds::new(0.0, 0.0, 50.0, 50.0), &metrics());
        let copy = rect.duplicate();
        assert_ne!(copy.id(), rect.id());
        assert_eq!(copy.bounds, rect.bounds);
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(0.2), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(0.5), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(0.75), ScoreBand::High);
    }

    #[test]
    fn test_serde_layout() {
        let rect = Rectangle::new(Bounds::new(1.0, 2.0, 3.0, 4.0), &metrics());
        let json = serde_json::to_value(&rect).unwrap();
        assert_eq!(json["left"], 1.0);
        assert_eq!(json["top"], 2.0);
        assert!(json.get("initialCoordinates").is_some());
        assert!(json.get("score").is_none());
        let back: Rectangle = serde_json::from_value(json).unwrap();
        assert_eq!(back, rect);
    }
}
