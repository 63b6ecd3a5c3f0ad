mod curve;
mod engine;
mod grid;
mod path;
pub(crate) mod types;

pub use curve::{
    bezier_point, compute_bezier_candidate, compute_bezier_candidate_with, is_bezier_valid,
    is_bezier_valid_with, project_control_point,
};
pub use engine::{
    is_line_blocked, route_connection, route_connection_traced, route_connection_with,
    route_orthogonal,
};
pub use grid::{GridBounds, GridCell, astar, pad_obstacles, safe_launch_point};
pub use path::{PathCommand, fmt_num, format_path, polyline_commands, round_corners, simplify_path};
pub use types::*;
