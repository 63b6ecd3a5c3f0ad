use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Edge of a shape an endpoint is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Unit vector pointing away from the shape.
    pub fn outward(self) -> (f64, f64) {
        match self {
            Side::Left => (-1.0, 0.0),
            Side::Right => (1.0, 0.0),
            Side::Top => (0.0, -1.0),
            Side::Bottom => (0.0, 1.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

/// Axis-aligned obstacle box. `id` is carried for callers only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Rect {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn expand(&self, pad: f64) -> Rect {
        Rect {
            left: self.left - pad,
            right: self.right + pad,
            top: self.top - pad,
            bottom: self.bottom + pad,
            id: self.id.clone(),
        }
    }

    pub(crate) fn contains_strict(&self, p: Point, margin: f64) -> bool {
        p.x > self.left + margin
            && p.x < self.right - margin
            && p.y > self.top + margin
            && p.y < self.bottom - margin
    }

    pub(crate) fn contains_inclusive(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Overlap unless one box lies strictly outside the other on some axis.
    pub(crate) fn overlaps(&self, other: &Rect) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }
}

/// Drawable result of routing a single connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConnectionRender {
    Bezier {
        p0: Point,
        p1: Point,
        p2: Point,
        p3: Point,
        path: String,
    },
    Orthogonal {
        path: String,
        points: Vec<Point>,
    },
}

impl ConnectionRender {
    pub fn path(&self) -> &str {
        match self {
            ConnectionRender::Bezier { path, .. } | ConnectionRender::Orthogonal { path, .. } => {
                path
            }
        }
    }

    pub fn start(&self) -> Option<Point> {
        match self {
            ConnectionRender::Bezier { p0, .. } => Some(*p0),
            ConnectionRender::Orthogonal { points, .. } => points.first().copied(),
        }
    }

    pub fn end(&self) -> Option<Point> {
        match self {
            ConnectionRender::Bezier { p3, .. } => Some(*p3),
            ConnectionRender::Orthogonal { points, .. } => points.last().copied(),
        }
    }
}

/// Which strategy produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteKind {
    Straight,
    Bezier,
    Grid,
    GridFallback,
}

impl RouteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteKind::Straight => "straight",
            RouteKind::Bezier => "bezier",
            RouteKind::Grid => "grid",
            RouteKind::GridFallback => "gridFallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    pub kind: RouteKind,
    pub render: ConnectionRender,
}
