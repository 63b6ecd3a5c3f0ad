#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod render;
pub mod route_dump;
pub mod routing;
pub mod scene;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, RenderConfig, RoutingConfig, load_config};
pub use render::render_svg;
pub use routing::{ConnectionRender, Point, Rect, RouteKind, Side, route_connection};
pub use scene::{Scene, SceneError, parse_scene, route_scene};
pub use theme::Theme;

/// Parses a scene document, routes it and renders SVG in one call.
pub fn render_scene_svg(input: &str, config: &Config) -> anyhow::Result<String> {
    let scene = parse_scene(input)?;
    let routed = route_scene(&scene, &config.routing)?;
    Ok(render_svg(&routed, &config.theme, &config.render))
}
