use crate::config::RoutingConfig;

use super::path::{PathCommand, format_path};
use super::types::{ConnectionRender, Point, Rect, Side};

/// `p` moved `distance` along the outward normal of `side`.
pub fn project_control_point(p: Point, side: Side, distance: f64) -> Point {
    let (dx, dy) = side.outward();
    Point::new(p.x + dx * distance, p.y + dy * distance)
}

pub fn bezier_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Control-point distance grows with endpoint separation but never drops
/// below `base`.
pub(crate) fn control_distance(p0: Point, p3: Point, base: f64) -> f64 {
    ((p0.distance(p3) / 2.0) / base).max(1.0) * base
}

pub fn compute_bezier_candidate(p0: Point, p3: Point, side_a: Side, side_b: Side) -> ConnectionRender {
    compute_bezier_candidate_with(&RoutingConfig::default(), p0, p3, side_a, side_b)
}

pub fn compute_bezier_candidate_with(
    config: &RoutingConfig,
    p0: Point,
    p3: Point,
    side_a: Side,
    side_b: Side,
) -> ConnectionRender {
    let (p1, p2) = candidate_controls(config, p0, p3, side_a, side_b);
    bezier_render(p0, p1, p2, p3)
}

pub(crate) fn candidate_controls(
    config: &RoutingConfig,
    p0: Point,
    p3: Point,
    side_a: Side,
    side_b: Side,
) -> (Point, Point) {
    let dist = control_distance(p0, p3, config.bezier_base_distance);
    (
        project_control_point(p0, side_a, dist),
        project_control_point(p3, side_b, dist),
    )
}

pub(crate) fn bezier_render(p0: Point, p1: Point, p2: Point, p3: Point) -> ConnectionRender {
    let path = format_path(&[PathCommand::MoveTo(p0), PathCommand::CubicTo(p1, p2, p3)]);
    ConnectionRender::Bezier { p0, p1, p2, p3, path }
}

pub fn is_bezier_valid(p0: Point, p1: Point, p2: Point, p3: Point, obstacles: &[Rect]) -> bool {
    is_bezier_valid_with(&RoutingConfig::default(), p0, p1, p2, p3, obstacles)
}

/// Samples interior parameters only: the endpoints sit on shape edges and
/// must not reject the curve on their own.
pub fn is_bezier_valid_with(
    config: &RoutingConfig,
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    obstacles: &[Rect],
) -> bool {
    if obstacles.is_empty() {
        return true;
    }
    let steps = config.bezier_samples.max(2);
    for i in 1..steps {
        let t = i as f64 / steps as f64;
        let sample = bezier_point(p0, p1, p2, p3, t);
        if obstacles
            .iter()
            .any(|obs| obs.contains_strict(sample, config.bezier_margin))
        {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control_points(render: &ConnectionRender) -> (Point, Point, Point, Point) {
        match render {
            ConnectionRender::Bezier { p0, p1, p2, p3, .. } => (*p0, *p1, *p2, *p3),
            other => panic!("expected bezier, got {other:?}"),
        }
    }

    #[test]
    fn projection_follows_side_normal() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(project_control_point(p, Side::Left, 5.0), Point::new(5.0, 20.0));
        assert_eq!(project_control_point(p, Side::Right, 5.0), Point::new(15.0, 20.0));
        assert_eq!(project_control_point(p, Side::Top, 5.0), Point::new(10.0, 15.0));
        assert_eq!(project_control_point(p, Side::Bottom, 5.0), Point::new(10.0, 25.0));
    }

    #[test]
    fn control_distance_never_below_base() {
        let near = compute_bezier_candidate(
            Point::new(0.0, 0.0),
            Point::new(50.0, 30.0),
            Side::Right,
            Side::Left,
        );
        let (_, p1, p2, _) = control_points(&near);
        assert_eq!(p1, Point::new(100.0, 0.0));
        assert_eq!(p2, Point::new(-50.0, 30.0));

        let far = compute_bezier_candidate(
            Point::new(0.0, 0.0),
            Point::new(0.0, 600.0),
            Side::Bottom,
            Side::Top,
        );
        let (_, p1, p2, _) = control_points(&far);
        assert_eq!(p1, Point::new(0.0, 300.0));
        assert_eq!(p2, Point::new(0.0, 300.0));
    }

    #[test]
    fn candidate_path_is_a_single_cubic() {
        let render = compute_bezier_candidate(
            Point::new(0.0, 0.0),
            Point::new(200.0, 100.0),
            Side::Right,
            Side::Left,
        );
        assert_eq!(render.path(), "M 0 0 C 111.8 0 88.2 100 200 100");
    }

    #[test]
    fn no_obstacles_is_valid() {
        let p = Point::new(0.0, 0.0);
        assert!(is_bezier_valid(p, p, p, Point::new(10.0, 10.0), &[]));
    }

    #[test]
    fn endpoint_inside_obstacle_does_not_reject() {
        // Straight-line cubic from (0,0) to (200,0); only the start lies in the box.
        let p0 = Point::new(0.0, 0.0);
        let p3 = Point::new(200.0, 0.0);
        let p1 = Point::new(200.0 / 3.0, 0.0);
        let p2 = Point::new(400.0 / 3.0, 0.0);
        // Samples are at x = 10, 20, ...; the box interior stops before x = 10.
        let obstacle = Rect::new(-20.0, 14.0, -20.0, 20.0);
        assert!(is_bezier_valid(p0, p1, p2, p3, &[obstacle]));
        let wider = Rect::new(-20.0, 16.0, -20.0, 20.0);
        assert!(!is_bezier_valid(p0, p1, p2, p3, &[wider]));
    }

    #[test]
    fn margin_tolerates_grazing() {
        let p0 = Point::new(0.0, 0.0);
        let p3 = Point::new(200.0, 0.0);
        let p1 = Point::new(200.0 / 3.0, 0.0);
        let p2 = Point::new(400.0 / 3.0, 0.0);
        // The curve runs 4 units inside the top edge: within the margin.
        let grazed = Rect::new(80.0, 120.0, -4.0, 60.0);
        assert!(is_bezier_valid(p0, p1, p2, p3, &[grazed]));
        let crossed = Rect::new(80.0, 120.0, -6.0, 60.0);
        assert!(!is_bezier_valid(p0, p1, p2, p3, &[crossed]));
    }
}
