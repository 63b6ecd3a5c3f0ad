use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::curve::project_control_point;
use super::types::{Point, Rect, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn from_point(p: Point, cell: f64) -> Self {
        Self {
            x: (p.x / cell).round() as i32,
            y: (p.y / cell).round() as i32,
        }
    }

    pub fn to_point(self, cell: f64) -> Point {
        Point::new(self.x as f64 * cell, self.y as f64 * cell)
    }

    pub fn manhattan(self, other: GridCell) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

/// Inclusive cell-index bounds of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl GridBounds {
    /// Union box of both endpoints and the unpadded obstacles, grown by `pad`.
    pub fn around(p0: Point, p3: Point, obstacles: &[Rect], pad: f64, cell: f64) -> Self {
        let mut min_x = p0.x.min(p3.x);
        let mut min_y = p0.y.min(p3.y);
        let mut max_x = p0.x.max(p3.x);
        let mut max_y = p0.y.max(p3.y);
        for obs in obstacles {
            min_x = min_x.min(obs.left);
            min_y = min_y.min(obs.top);
            max_x = max_x.max(obs.right);
            max_y = max_y.max(obs.bottom);
        }
        Self {
            min_x: ((min_x - pad) / cell).floor() as i32,
            min_y: ((min_y - pad) / cell).floor() as i32,
            max_x: ((max_x + pad) / cell).ceil() as i32,
            max_y: ((max_y + pad) / cell).ceil() as i32,
        }
    }

    pub fn contains(&self, c: GridCell) -> bool {
        c.x >= self.min_x && c.x <= self.max_x && c.y >= self.min_y && c.y <= self.max_y
    }

    /// Number of cells inside the bounds; zero when inverted.
    pub fn cell_count(&self) -> u64 {
        let width = (i64::from(self.max_x) - i64::from(self.min_x) + 1).max(0) as u64;
        let height = (i64::from(self.max_y) - i64::from(self.min_y) + 1).max(0) as u64;
        width.saturating_mul(height)
    }
}

pub fn pad_obstacles(obstacles: &[Rect], pad: f64) -> Vec<Rect> {
    obstacles.iter().map(|obs| obs.expand(pad)).collect()
}

pub(crate) fn point_blocked(p: Point, padded: &[Rect]) -> bool {
    padded.iter().any(|obs| obs.contains_inclusive(p))
}

/// Grid point near `p` outside every padded obstacle, best effort.
///
/// Tries 1..=`attempts` cells out along the side normal; when every attempt
/// lands inside an obstacle the last candidate is returned anyway.
pub fn safe_launch_point(p: Point, side: Side, padded: &[Rect], cell: f64, attempts: u32) -> Point {
    let mut candidate = p;
    for step in 1..=attempts.max(1) {
        let projected = project_control_point(p, side, cell * step as f64);
        candidate = GridCell::from_point(projected, cell).to_point(cell);
        if !point_blocked(candidate, padded) {
            return candidate;
        }
        log::trace!(
            "launch candidate ({}, {}) blocked after {} step(s)",
            candidate.x,
            candidate.y,
            step
        );
    }
    candidate
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct OpenEntry {
    f: u32,
    g: u32,
    cell: GridCell,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.cell.y.cmp(&self.cell.y))
            .then_with(|| other.cell.x.cmp(&self.cell.x))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* over the 4-connected grid with unit steps and a Manhattan heuristic.
///
/// Returns the cell path including `start` and `goal`, or `None` once
/// `max_iterations` nodes were expanded or the open set ran dry. A cell is
/// blocked when its world point falls inside any padded obstacle; the start
/// cell is never tested. Search state is keyed by cell, so memory follows
/// the visited cells and not the size of `bounds`.
pub fn astar(
    start: GridCell,
    goal: GridCell,
    bounds: GridBounds,
    padded: &[Rect],
    cell: f64,
    max_iterations: usize,
) -> Option<Vec<GridCell>> {
    if !bounds.contains(start) || !bounds.contains(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut best_g: HashMap<GridCell, u32> = HashMap::new();
    let mut parent: HashMap<GridCell, GridCell> = HashMap::new();
    let mut closed: HashSet<GridCell> = HashSet::new();
    let mut blocked: HashMap<GridCell, bool> = HashMap::new();
    let mut open = BinaryHeap::new();

    best_g.insert(start, 0);
    open.push(OpenEntry {
        f: start.manhattan(goal),
        g: 0,
        cell: start,
    });

    let dirs: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
    let mut expansions = 0usize;

    while let Some(OpenEntry { g, cell: current, .. }) = open.pop() {
        if closed.contains(&current) || best_g.get(&current) != Some(&g) {
            continue;
        }
        if current == goal {
            let mut cells = vec![current];
            let mut cursor = current;
            while let Some(&prev) = parent.get(&cursor) {
                cells.push(prev);
                cursor = prev;
            }
            cells.reverse();
            return Some(cells);
        }
        expansions += 1;
        if expansions > max_iterations {
            log::debug!("grid search gave up after {max_iterations} expansions");
            return None;
        }
        closed.insert(current);

        for (dx, dy) in dirs {
            let (Some(x), Some(y)) = (current.x.checked_add(dx), current.y.checked_add(dy)) else {
                continue;
            };
            let next = GridCell::new(x, y);
            if !bounds.contains(next) || closed.contains(&next) {
                continue;
            }
            let is_blocked = *blocked
                .entry(next)
                .or_insert_with(|| point_blocked(next.to_point(cell), padded));
            if is_blocked {
                continue;
            }
            let next_g = g + 1;
            if best_g.get(&next).is_some_and(|&known| next_g >= known) {
                continue;
            }
            best_g.insert(next, next_g);
            parent.insert(next, current);
            open.push(OpenEntry {
                f: next_g.saturating_add(next.manhattan(goal)),
                g: next_g,
                cell: next,
            });
        }
    }

    log::debug!("grid search exhausted the open set");
    None
}
