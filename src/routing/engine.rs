use crate::config::RoutingConfig;

use super::curve::{bezier_render, candidate_controls, is_bezier_valid_with};
use super::grid::{GridBounds, GridCell, astar, pad_obstacles, safe_launch_point};
use super::path::{format_path, polyline_commands, round_corners, simplify_path};
use super::types::{ConnectionRender, Point, Rect, RouteKind, RouteOutcome, Side};

/// Routes one connection with the default constants.
pub fn route_connection(
    p0: Point,
    p3: Point,
    side_a: Side,
    side_b: Side,
    obstacles: &[Rect],
) -> ConnectionRender {
    route_connection_with(&RoutingConfig::default(), p0, p3, side_a, side_b, obstacles)
}

pub fn route_connection_with(
    config: &RoutingConfig,
    p0: Point,
    p3: Point,
    side_a: Side,
    side_b: Side,
    obstacles: &[Rect],
) -> ConnectionRender {
    route_connection_traced(config, p0, p3, side_a, side_b, obstacles).render
}

/// Picks the cheapest valid route: straight segment, then the bezier
/// candidate, then the orthogonal grid route. Never fails.
pub fn route_connection_traced(
    config: &RoutingConfig,
    p0: Point,
    p3: Point,
    side_a: Side,
    side_b: Side,
    obstacles: &[Rect],
) -> RouteOutcome {
    let axis_aligned = (p3.y - p0.y).abs() < config.straight_tolerance
        || (p3.x - p0.x).abs() < config.straight_tolerance;
    if axis_aligned && !is_line_blocked(p0, p3, obstacles) {
        log::debug!("straight route ({}, {}) -> ({}, {})", p0.x, p0.y, p3.x, p3.y);
        let points = vec![p0, p3];
        return RouteOutcome {
            kind: RouteKind::Straight,
            render: ConnectionRender::Orthogonal {
                path: format_path(&polyline_commands(&points)),
                points,
            },
        };
    }

    let (p1, p2) = candidate_controls(config, p0, p3, side_a, side_b);
    if is_bezier_valid_with(config, p0, p1, p2, p3, obstacles) {
        log::debug!("bezier route ({}, {}) -> ({}, {})", p0.x, p0.y, p3.x, p3.y);
        return RouteOutcome {
            kind: RouteKind::Bezier,
            render: bezier_render(p0, p1, p2, p3),
        };
    }

    route_orthogonal(config, p0, p3, side_a, side_b, obstacles)
}

/// Bounding-box overlap between the segment and any obstacle.
///
/// Conservative on purpose: a box the segment would not actually cross can
/// still block it. Callers rely on this exact behavior.
pub fn is_line_blocked(p0: Point, p3: Point, obstacles: &[Rect]) -> bool {
    let span = Rect::new(p0.x.min(p3.x), p0.x.max(p3.x), p0.y.min(p3.y), p0.y.max(p3.y));
    obstacles.iter().any(|obs| span.overlaps(obs))
}

/// Grid phase on its own: A* between safe launch points, bridged back to
/// the endpoints, simplified and corner-rounded. Falls back to a two-bend
/// path through the horizontal midpoint when the search fails.
pub fn route_orthogonal(
    config: &RoutingConfig,
    p0: Point,
    p3: Point,
    side_a: Side,
    side_b: Side,
    obstacles: &[Rect],
) -> RouteOutcome {
    let cell = config.grid_size;
    let padded = pad_obstacles(obstacles, config.obstacle_padding);
    let bounds = GridBounds::around(p0, p3, obstacles, config.bounds_padding, cell);
    let launch_a = safe_launch_point(p0, side_a, &padded, cell, config.launch_attempts);
    let launch_b = safe_launch_point(p3, side_b, &padded, cell, config.launch_attempts);

    log::trace!("grid search bounds span {} cells", bounds.cell_count());
    let cells = astar(
        GridCell::from_point(launch_a, cell),
        GridCell::from_point(launch_b, cell),
        bounds,
        &padded,
        cell,
        config.max_iterations,
    );

    let Some(cells) = cells else {
        log::debug!(
            "grid route failed for ({}, {}) -> ({}, {}), using midpoint fallback",
            p0.x,
            p0.y,
            p3.x,
            p3.y
        );
        let mid_x = (p0.x + p3.x) / 2.0;
        // `points` keeps both bends even when they coincide; only the drawn
        // path drops the degenerate legs.
        let points = vec![p0, Point::new(mid_x, p0.y), Point::new(mid_x, p3.y), p3];
        let drawn = simplify_path(&points, config.simplify_tolerance);
        return RouteOutcome {
            kind: RouteKind::GridFallback,
            render: ConnectionRender::Orthogonal {
                path: format_path(&round_corners(&drawn, config.corner_radius)),
                points,
            },
        };
    };

    let mut raw: Vec<Point> = Vec::with_capacity(cells.len() + 6);
    raw.push(p0);
    raw.extend(bridge(p0, launch_a, side_a));
    raw.extend(cells.iter().map(|c| c.to_point(cell)));
    raw.extend(bridge(p3, launch_b, side_b).into_iter().rev());
    raw.push(p3);

    let points = simplify_path(&raw, config.simplify_tolerance);
    log::debug!("grid route with {} waypoints", points.len());
    RouteOutcome {
        kind: RouteKind::Grid,
        render: ConnectionRender::Orthogonal {
            path: format_path(&round_corners(&points, config.corner_radius)),
            points,
        },
    }
}

/// Single-bend connector from an endpoint to its launch point; leaves the
/// shape along the side normal first.
fn bridge(endpoint: Point, launch: Point, side: Side) -> [Point; 2] {
    let corner = if side.is_horizontal() {
        Point::new(launch.x, endpoint.y)
    } else {
        Point::new(endpoint.x, launch.y)
    };
    [corner, launch]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_route_without_obstacles() {
        let render = route_connection(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Side::Right,
            Side::Left,
            &[],
        );
        assert_eq!(
            render,
            ConnectionRender::Orthogonal {
                path: "M 0 0 L 100 0".to_string(),
                points: vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            }
        );
    }

    #[test]
    fn line_block_uses_bounding_boxes() {
        let p0 = Point::new(0.0, 0.0);
        let p3 = Point::new(100.0, 0.0);
        assert!(is_line_blocked(p0, p3, &[Rect::new(40.0, 60.0, -10.0, 10.0)]));
        // Touching the span still blocks.
        assert!(is_line_blocked(p0, p3, &[Rect::new(100.0, 120.0, 0.0, 10.0)]));
        assert!(!is_line_blocked(p0, p3, &[Rect::new(40.0, 60.0, 1.0, 10.0)]));
    }

    #[test]
    fn bridge_leaves_along_side_axis() {
        let endpoint = Point::new(5.0, 7.0);
        let launch = Point::new(24.0, 24.0);
        assert_eq!(bridge(endpoint, launch, Side::Right), [Point::new(24.0, 7.0), launch]);
        assert_eq!(bridge(endpoint, launch, Side::Bottom), [Point::new(5.0, 24.0), launch]);
    }

    #[test]
    fn nearly_vertical_pair_counts_as_aligned() {
        let outcome = route_connection_traced(
            &RoutingConfig::default(),
            Point::new(10.0, 0.0),
            Point::new(10.5, 200.0),
            Side::Bottom,
            Side::Top,
            &[],
        );
        assert_eq!(outcome.kind, RouteKind::Straight);
    }

    #[test]
    fn level_fallback_draws_a_single_line() {
        let cage = Rect::new(200.0, 400.0, -100.0, 100.0);
        let p0 = Point::new(0.0, 0.0);
        let p3 = Point::new(300.0, 0.0);
        let outcome = route_orthogonal(
            &RoutingConfig::default(),
            p0,
            p3,
            Side::Right,
            Side::Left,
            std::slice::from_ref(&cage),
        );
        assert_eq!(outcome.kind, RouteKind::GridFallback);
        assert_eq!(
            outcome.render,
            ConnectionRender::Orthogonal {
                path: "M 0 0 L 300 0".to_string(),
                points: vec![p0, Point::new(150.0, 0.0), Point::new(150.0, 0.0), p3],
            }
        );
    }

    #[test]
    fn diagonal_pair_without_obstacles_is_bezier() {
        let outcome = route_connection_traced(
            &RoutingConfig::default(),
            Point::new(0.0, 0.0),
            Point::new(200.0, 100.0),
            Side::Right,
            Side::Left,
            &[],
        );
        assert_eq!(outcome.kind, RouteKind::Bezier);
    }
}
