//! Resize engine.

use crate::geometry::{Bounds, clamp_between};
use crate::selection::{Edge, HandleKind};
use kurbo::{Size, Vec2};

/// Resize `bounds` by dragging `handle` by a layout delta.
///
/// Corner handles apply the horizontal and vertical rules independently.
pub fn apply_resize(bounds: Bounds, handle: HandleKind, delta: Vec2, container: Size) -> Bounds {
    let mut result = bounds;

    match handle.horizontal() {
        Some(Edge::Right) => {
            result.width = grow(bounds.left, bounds.width, delta.x, container.width);
        }
        Some(_) => {
            (result.left, result.width) = shrink_from_origin(bounds.left, bounds.width, delta.x);
        }
        None => {}
    }

    match handle.vertical() {
        Some(Edge::Bottom) => {
            result.height = grow(bounds.top, bounds.height, delta.y, container.height);
        }
        Some(_) => {
            (result.top, result.height) = shrink_from_origin(bounds.top, bounds.height, delta.y);
        }
        None => {}
    }

    result
}

/// Far edge moves; the origin stays put and the size is bounded by the container.
fn grow(origin: f64, size: f64, delta: f64, bound: f64) -> f64 {
    clamp_between(size + delta, 0.0, bound - origin)
}

/// Origin edge moves; origin and size are co-derived so the far edge stays fixed.
fn shrink_from_origin(origin: f64, size: f64, delta: f64) -> (f64, f64) {
    let far = origin + size;
    (
        clamp_between(origin + delta, 0.0, far),
        clamp_between(size - delta, 0.0, far),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Corner;

    const CONTAINER: Size = Size::new(800.0, 600.0);

    fn rect() -> Bounds {
        Bounds::new(100.0, 100.0, 200.0, 150.0)
    }

    #[test]
    fn test_right_handle_grows_width() {
        let r = apply_resize(
            rect(),
            HandleKind::Edge(Edge::Right),
            Vec2::new(50.0, 0.0),
            CONTAINER,
        );
        assert_eq!(r, Bounds::new(100.0, 100.0, 250.0, 150.0));
    }

    #[test]
    fn test_right_handle_bounded_by_container() {
        let r = apply_resize(
            rect(),
            HandleKind::Edge(Edge::Right),
            Vec2::new(900.0, 0.0),
            CONTAINER,
        );
        assert_eq!(r.width, 700.0);
        assert_eq!(r.right(), CONTAINER.width);
    }

    #[test]
    fn test_bottom_handle_never_negative() {
        let r = apply_resize(
            rect(),
            HandleKind::Edge(Edge::Bottom),
            Vec2::new(0.0, -500.0),
            CONTAINER,
        );
        assert_eq!(r.height, 0.0);
        assert_eq!(r.top, 100.0);
    }

    #[test]
    fn test_left_handle_keeps_right_edge() {
        let r = apply_resize(rect(), HandleKind::Edge(Edge::Left), Vec2::new(30.0, 0.0), CONTAINER);
        assert_eq!(r.left, 130.0);
        assert_eq!(r.width, 170.0);
        assert_eq!(r.right(), 300.0);
    }

    #[test]
    fn test_left_handle_stops_at_container_origin() {
        let r = apply_resize(
            rect(),
            HandleKind::Edge(Edge::Left),
            Vec2::new(-150.0, 0.0),
            CONTAINER,
        );
        assert_eq!(r.left, 0.0);
        assert_eq!(r.width, 300.0);
        assert_eq!(r.right(), 300.0);
    }

    #[test]
    fn test_left_handle_collapses_past_right_edge() {
        let r = apply_resize(
            rect(),
            HandleKind::Edge(Edge::Left),
            Vec2::new(260.0, 0.0),
            CONTAINER,
        );
        assert_eq!(r.left, 300.0);
        assert_eq!(r.width, 0.0);
    }

    #[test]
    fn test_top_left_corner_moves_both_axes() {
        let r = apply_resize(
            rect(),
            HandleKind::Corner(Corner::TopLeft),
            Vec2::new(-20.0, 10.0),
            CONTAINER,
        );
        assert_eq!(r, Bounds::new(80.0, 110.0, 220.0, 140.0));
    }

    #[test]
    fn test_bottom_right_corner() {
        let r = apply_resize(
            rect(),
            HandleKind::Corner(Corner::BottomRight),
            Vec2::new(10.0, 1000.0),
            CONTAINER,
        );
        assert_eq!(r, Bounds::new(100.0, 100.0, 210.0, 500.0));
    }

    #[test]
    fn test_edge_handle_ignores_other_axis() {
        let r = apply_resize(
            rect(),
            HandleKind::Edge(Edge::Top),
            Vec2::new(999.0, -40.0),
            CONTAINER,
        );
        assert_eq!(r, Bounds::new(100.0, 60.0, 200.0, 190.0));
    }

    #[test]
    fn test_containment_for_every_handle() {
        let deltas = [
            Vec2::new(400.0, 400.0),
            Vec2::new(-400.0, -400.0),
            Vec2::new(35.5, -12.0),
            Vec2::new(-7.0, 620.0),
        ];
        for handle in HandleKind::ALL {
            let mut bounds = rect();
            for delta in deltas {
                bounds = apply_resize(bounds, handle, delta, CONTAINER);
                assert!(bounds.width >= 0.0 && bounds.height >= 0.0, "{handle:?}");
                assert!(bounds.left >= 0.0 && bounds.right() <= CONTAINER.width, "{handle:?}");
                assert!(bounds.top >= 0.0 && bounds.bottom() <= CONTAINER.height, "{handle:?}");
            }
        }
    }
}
