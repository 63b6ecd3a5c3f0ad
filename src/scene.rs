//! Scene documents: shapes plus the connections between their sides.
//!
//! This is the caller side of the routing engine. It validates input,
//! resolves anchors to `(Point, Side)` endpoints, builds obstacles from shape
//! boxes and routes every connection in document order.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RoutingConfig;
use crate::routing::{ConnectionRender, Point, Rect, RouteKind, Side, route_connection_traced};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid scene document: {0}")]
    Parse(#[from] json5::Error),
    #[error("duplicate shape id `{0}`")]
    DuplicateShape(String),
    #[error("shape `{id}` has a non-positive size ({width} x {height})")]
    InvalidSize { id: String, width: f64, height: f64 },
    #[error("shape `{0}` has a non-finite coordinate")]
    NonFinite(String),
    #[error("connection {connection} references unknown shape `{shape}`")]
    UnknownShape { connection: String, shape: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub label: Option<String>,
}

impl Shape {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.x + self.width, self.y, self.y + self.height).with_id(self.id.clone())
    }

    /// Midpoint of `side`, slid along it by `offset` (clamped to the side).
    pub fn anchor_point(&self, side: Side, offset: f64) -> Point {
        let cx = self.x + self.width / 2.0;
        let cy = self.y + self.height / 2.0;
        match side {
            Side::Left | Side::Right => {
                let half = self.height / 2.0;
                let y = cy + offset.clamp(-half, half);
                let x = if side == Side::Left { self.x } else { self.x + self.width };
                Point::new(x, y)
            }
            Side::Top | Side::Bottom => {
                let half = self.width / 2.0;
                let x = cx + offset.clamp(-half, half);
                let y = if side == Side::Top { self.y } else { self.y + self.height };
                Point::new(x, y)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anchor {
    pub shape: String,
    pub side: Side,
    #[serde(default)]
    pub offset: f64,
}

fn default_directed() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    #[serde(default)]
    pub id: Option<String>,
    pub from: Anchor,
    pub to: Anchor,
    #[serde(default = "default_directed")]
    pub directed: bool,
}

fn default_include_endpoint_shapes() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    /// Whether the two shapes a connection attaches to count as obstacles.
    #[serde(default = "default_include_endpoint_shapes")]
    pub include_endpoint_shapes: bool,
}

#[derive(Debug, Clone)]
pub struct RoutedConnection {
    pub id: String,
    pub from: String,
    pub to: String,
    pub directed: bool,
    pub kind: RouteKind,
    pub render: ConnectionRender,
}

#[derive(Debug, Clone)]
pub struct RoutedScene {
    pub bounds: Rect,
    pub shapes: Vec<Shape>,
    pub connections: Vec<RoutedConnection>,
}

pub fn parse_scene(input: &str) -> Result<Scene, SceneError> {
    let scene: Scene = json5::from_str(input)?;
    scene.validate()?;
    Ok(scene)
}

impl Scene {
    pub fn validate(&self) -> Result<(), SceneError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.shapes.len());
        for shape in &self.shapes {
            if !seen.insert(shape.id.as_str()) {
                return Err(SceneError::DuplicateShape(shape.id.clone()));
            }
            if ![shape.x, shape.y, shape.width, shape.height]
                .iter()
                .all(|v| v.is_finite())
            {
                return Err(SceneError::NonFinite(shape.id.clone()));
            }
            if shape.width <= 0.0 || shape.height <= 0.0 {
                return Err(SceneError::InvalidSize {
                    id: shape.id.clone(),
                    width: shape.width,
                    height: shape.height,
                });
            }
        }
        for (idx, conn) in self.connections.iter().enumerate() {
            for anchor in [&conn.from, &conn.to] {
                if !seen.contains(anchor.shape.as_str()) {
                    return Err(SceneError::UnknownShape {
                        connection: connection_label(conn, idx),
                        shape: anchor.shape.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn connection_label(conn: &Connection, idx: usize) -> String {
    conn.id
        .clone()
        .unwrap_or_else(|| format!("#{idx} ({} -> {})", conn.from.shape, conn.to.shape))
}

/// Routes every connection of `scene` against the boxes of its shapes.
pub fn route_scene(scene: &Scene, config: &RoutingConfig) -> Result<RoutedScene, SceneError> {
    scene.validate()?;
    let by_id: HashMap<&str, &Shape> = scene.shapes.iter().map(|s| (s.id.as_str(), s)).collect();
    let all_obstacles: Vec<Rect> = scene.shapes.iter().map(Shape::bounds).collect();

    let mut connections = Vec::with_capacity(scene.connections.len());
    for (idx, conn) in scene.connections.iter().enumerate() {
        let lookup = |anchor: &Anchor| {
            by_id
                .get(anchor.shape.as_str())
                .copied()
                .ok_or_else(|| SceneError::UnknownShape {
                    connection: connection_label(conn, idx),
                    shape: anchor.shape.clone(),
                })
        };
        let from = lookup(&conn.from)?;
        let to = lookup(&conn.to)?;
        let p0 = from.anchor_point(conn.from.side, conn.from.offset);
        let p3 = to.anchor_point(conn.to.side, conn.to.offset);

        let excluded;
        let obstacles: &[Rect] = if scene.include_endpoint_shapes {
            &all_obstacles
        } else {
            excluded = all_obstacles
                .iter()
                .filter(|r| {
                    let id = r.id.as_deref();
                    id != Some(from.id.as_str()) && id != Some(to.id.as_str())
                })
                .cloned()
                .collect::<Vec<_>>();
            &excluded
        };

        let outcome = route_connection_traced(config, p0, p3, conn.from.side, conn.to.side, obstacles);
        log::debug!(
            "connection {} routed as {}",
            connection_label(conn, idx),
            outcome.kind.as_str()
        );
        connections.push(RoutedConnection {
            id: conn.id.clone().unwrap_or_else(|| format!("c{idx}")),
            from: conn.from.shape.clone(),
            to: conn.to.shape.clone(),
            directed: conn.directed,
            kind: outcome.kind,
            render: outcome.render,
        });
    }

    Ok(RoutedScene {
        bounds: scene_bounds(&all_obstacles, &connections),
        shapes: scene.shapes.clone(),
        connections,
    })
}

/// Union of shape boxes and route geometry. Bezier control points are
/// included, which bounds the curve by its convex hull.
fn scene_bounds(shapes: &[Rect], connections: &[RoutedConnection]) -> Rect {
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    let mut add = |p: Point| {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    };
    for r in shapes {
        add(Point::new(r.left, r.top));
        add(Point::new(r.right, r.bottom));
    }
    for conn in connections {
        match &conn.render {
            ConnectionRender::Bezier { p0, p1, p2, p3, .. } => {
                for p in [p0, p1, p2, p3] {
                    add(*p);
                }
            }
            ConnectionRender::Orthogonal { points, .. } => {
                for p in points {
                    add(*p);
                }
            }
        }
    }
    if min_x == f64::MAX {
        return Rect::new(0.0, 0.0, 0.0, 0.0);
    }
    Rect::new(min_x, max_x, min_y, max_y)
}
