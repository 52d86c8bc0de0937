//! Resize handles, hit testing and drag sessions.

use crate::geometry::Bounds;
use crate::rectangle::RectangleId;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Type of resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Edge midpoint handle, resizes one axis.
    Edge(Edge),
    /// Corner handle, resizes both axes.
    Corner(Corner),
}

impl HandleKind {
    /// All eight handles, corners first so they win hit tests against edges.
    pub const ALL: [HandleKind; 8] = [
        HandleKind::Corner(Corner::TopLeft),
        HandleKind::Corner(Corner::TopRight),
        HandleKind::Corner(Corner::BottomLeft),
        HandleKind::Corner(Corner::BottomRight),
        HandleKind::Edge(Edge::Left),
        HandleKind::Edge(Edge::Top),
        HandleKind::Edge(Edge::Right),
        HandleKind::Edge(Edge::Bottom),
    ];

    /// Horizontal side moved by this handle, if any.
    pub fn horizontal(self) -> Option<Edge> {
        match self {
            HandleKind::Edge(edge @ (Edge::Left | Edge::Right)) => Some(edge),
            HandleKind::Edge(_) => None,
            HandleKind::Corner(Corner::TopLeft | Corner::BottomLeft) => Some(Edge::Left),
            HandleKind::Corner(Corner::TopRight | Corner::BottomRight) => Some(Edge::Right),
        }
    }

    /// Vertical side moved by this handle, if any.
    pub fn vertical(self) -> Option<Edge> {
        match self {
            HandleKind::Edge(edge @ (Edge::Top | Edge::Bottom)) => Some(edge),
            HandleKind::Edge(_) => None,
            HandleKind::Corner(Corner::TopLeft | Corner::TopRight) => Some(Edge::Top),
            HandleKind::Corner(Corner::BottomLeft | Corner::BottomRight) => Some(Edge::Bottom),
        }
    }
}

/// A resize handle with its position and type.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Center of the handle in layout coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a layout point falls within the handle's square hit box.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.position.x).abs() <= tolerance
            && (point.y - self.position.y).abs() <= tolerance
    }
}

/// Handle positions for a rectangle's bounds.
pub fn get_handles(bounds: &Bounds) -> Vec<Handle> {
    let cx = bounds.left + bounds.width / 2.0;
    let cy = bounds.top + bounds.height / 2.0;
    HandleKind::ALL
        .iter()
        .map(|&kind| {
            let x = match kind.horizontal() {
                Some(Edge::Left) => bounds.left,
                Some(_) => bounds.right(),
                None => cx,
            };
            let y = match kind.vertical() {
                Some(Edge::Top) => bounds.top,
                Some(_) => bounds.bottom(),
                None => cy,
            };
            Handle::new(Point::new(x, y), kind)
        })
        .collect()
}

/// Find which handle (if any) is hit at the given layout point.
pub fn hit_test_handles(bounds: &Bounds, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(bounds)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// Per-gesture state of a move or resize drag.
///
/// Created on press and dropped on release. Deltas are measured against the
/// previous pointer position, not the press position, so each step composes
/// with whatever re-layout happened in between.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// The rectangle being dragged.
    pub rectangle_id: RectangleId,
    /// The handle being dragged (None = moving the whole rectangle).
    pub handle: Option<HandleKind>,
    /// Last pointer position seen, in client coordinates.
    last_point: Point,
}

impl DragSession {
    pub fn new(rectangle_id: RectangleId, handle: Option<HandleKind>, start_point: Point) -> Self {
        Self {
            rectangle_id,
            handle,
            last_point: start_point,
        }
    }

    pub fn last_point(&self) -> Point {
        self.last_point
    }

    /// Record a new pointer position and return the client delta since the last one.
    pub fn advance(&mut self, point: Point) -> Vec2 {
        let delta = point - self.last_point;
        self.last_point = point;
        delta
    }
}
