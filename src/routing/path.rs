use super::types::Point;

const AXIS_EPS: f64 = 1e-6;

/// Structured path; `format_path` turns it into the `d` mini-language.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    QuadTo(Point, Point),
}

pub fn format_path(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for cmd in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match cmd {
            PathCommand::MoveTo(p) => d.push_str(&format!("M {} {}", fmt_num(p.x), fmt_num(p.y))),
            PathCommand::LineTo(p) => d.push_str(&format!("L {} {}", fmt_num(p.x), fmt_num(p.y))),
            PathCommand::CubicTo(c1, c2, p) => d.push_str(&format!(
                "C {} {} {} {} {} {}",
                fmt_num(c1.x),
                fmt_num(c1.y),
                fmt_num(c2.x),
                fmt_num(c2.y),
                fmt_num(p.x),
                fmt_num(p.y)
            )),
            PathCommand::QuadTo(c, p) => d.push_str(&format!(
                "Q {} {} {} {}",
                fmt_num(c.x),
                fmt_num(c.y),
                fmt_num(p.x),
                fmt_num(p.y)
            )),
        }
    }
    d
}

/// Two decimals, trailing zeros trimmed, no `-0`.
pub fn fmt_num(value: f64) -> String {
    let mut s = format!("{value:.2}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

pub fn polyline_commands(points: &[Point]) -> Vec<PathCommand> {
    let mut out = Vec::with_capacity(points.len());
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        out.push(PathCommand::MoveTo(*first));
    }
    out.extend(iter.map(|p| PathCommand::LineTo(*p)));
    out
}

fn is_horizontal(a: Point, b: Point) -> bool {
    (a.y - b.y).abs() <= AXIS_EPS
}

fn is_vertical(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() <= AXIS_EPS
}

fn drop_near_duplicates(points: &[Point], tolerance: f64) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    out.push(points[0]);
    for &p in &points[1..points.len() - 1] {
        if p.distance(out[out.len() - 1]) < tolerance {
            continue;
        }
        out.push(p);
    }
    let last = points[points.len() - 1];
    while out.len() > 1 && last.distance(out[out.len() - 1]) < tolerance {
        out.pop();
    }
    out.push(last);
    out
}

fn drop_collinear(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        while out.len() >= 2 {
            let a = out[out.len() - 2];
            let b = out[out.len() - 1];
            let straight = (is_horizontal(a, b) && is_horizontal(b, p))
                || (is_vertical(a, b) && is_vertical(b, p));
            if !straight {
                break;
            }
            out.pop();
        }
        out.push(p);
    }
    out
}

/// Keeps the two endpoints and the true turning points.
///
/// Interior points closer than `tolerance` to their predecessor are dropped,
/// then vertices between two horizontal (or two vertical) segments. The
/// passes run to a fixpoint since removing a backtracking vertex can leave
/// a fresh near-duplicate behind, which also makes the result idempotent.
pub fn simplify_path(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let mut current = points.to_vec();
    loop {
        let next = drop_collinear(&drop_near_duplicates(&current, tolerance));
        // Both passes only remove points.
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

/// Turns a polyline into lines plus quadratic corner arcs.
///
/// The arc at each interior vertex uses the vertex as control point and a
/// radius capped by `radius` and by half of either adjacent segment.
pub fn round_corners(points: &[Point], radius: f64) -> Vec<PathCommand> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(points.len() * 2);
    out.push(PathCommand::MoveTo(first));
    if points.len() == 1 {
        return out;
    }
    for window in points.windows(3) {
        let (prev, curr, next) = (window[0], window[1], window[2]);
        let len_in = prev.distance(curr);
        let len_out = curr.distance(next);
        let r = radius.min(len_in / 2.0).min(len_out / 2.0);
        if r <= AXIS_EPS {
            out.push(PathCommand::LineTo(curr));
            continue;
        }
        let before = Point::new(
            curr.x - (curr.x - prev.x) / len_in * r,
            curr.y - (curr.y - prev.y) / len_in * r,
        );
        let after = Point::new(
            curr.x + (next.x - curr.x) / len_out * r,
            curr.y + (next.y - curr.y) / len_out * r,
        );
        out.push(PathCommand::LineTo(before));
        out.push(PathCommand::QuadTo(curr, after));
    }
    out.push(PathCommand::LineTo(points[points.len() - 1]));
    out
}
