//! Move engine.

use crate::geometry::{Bounds, clamp_between};
use kurbo::{Size, Vec2};

/// Translate `bounds` by a layout delta, keeping the box inside the container.
///
/// Width and height never change; the far edge is bounded by the container.
pub fn apply_move(bounds: Bounds, delta: Vec2, container: Size) -> Bounds {
    Bounds {
        top: clamp_between(bounds.top + delta.y, 0.0, container.height - bounds.height),
        left: clamp_between(bounds.left + delta.x, 0.0, container.width - bounds.width),
        ..bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Size = Size::new(800.0, 600.0);

    #[test]
    fn test_free_move() {
        let moved = apply_move(
            Bounds::new(100.0, 100.0, 50.0, 50.0),
            Vec2::new(25.0, -10.0),
            CONTAINER,
        );
        assert_eq!(moved, Bounds::new(125.0, 90.0, 50.0, 50.0));
    }

    #[test]
    fn test_clamps_far_edge() {
        let moved = apply_move(
            Bounds::new(750.0, 100.0, 100.0, 100.0),
            Vec2::new(100.0, 0.0),
            CONTAINER,
        );
        assert_eq!(moved.left, 700.0);
        assert_eq!(moved.width, 100.0);
    }

    #[test]
    fn test_clamps_origin() {
        let moved = apply_move(
            Bounds::new(10.0, 10.0, 100.0, 100.0),
            Vec2::new(-50.0, -50.0),
            CONTAINER,
        );
        assert_eq!(moved.left, 0.0);
        assert_eq!(moved.top, 0.0);
    }

    #[test]
    fn test_containment_over_many_steps() {
        let mut bounds = Bounds::new(400.0, 300.0, 120.0, 80.0);
        let steps = [
            Vec2::new(500.0, 0.0),
            Vec2::new(-37.5, 410.0),
            Vec2::new(-900.0, -3.0),
            Vec2::new(12.25, -700.0),
            Vec2::new(333.0, 333.0),
        ];
        for delta in steps {
            bounds = apply_move(bounds, delta, CONTAINER);
            assert!(bounds.left >= 0.0 && bounds.right() <= CONTAINER.width);
            assert!(bounds.top >= 0.0 && bounds.bottom() <= CONTAINER.height);
            assert_eq!(bounds.width, 120.0);
            assert_eq!(bounds.height, 80.0);
        }
    }
}
