use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables of the routing engine. The defaults are the engine's reference
/// constants; changing them changes routes, not the strategy order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutingConfig {
    /// Minimum control-point distance of the bezier candidate.
    pub bezier_base_distance: f64,
    /// The curve is sampled at `i / bezier_samples` for interior `i`.
    pub bezier_samples: u32,
    /// Obstacles shrink by this much before bezier samples are tested.
    pub bezier_margin: f64,
    /// `|dx|` or `|dy|` below this counts as axis-aligned.
    pub straight_tolerance: f64,
    pub grid_size: f64,
    pub corner_radius: f64,
    pub obstacle_padding: f64,
    pub bounds_padding: f64,
    pub max_iterations: usize,
    pub launch_attempts: u32,
    /// Interior waypoints closer than this to their predecessor are dropped.
    pub simplify_tolerance: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            bezier_base_distance: 100.0,
            bezier_samples: 20,
            bezier_margin: 5.0,
            straight_tolerance: 1.0,
            grid_size: 24.0,
            corner_radius: 12.0,
            obstacle_padding: 10.0,
            bounds_padding: 300.0,
            max_iterations: 2000,
            launch_attempts: 5,
            simplify_tolerance: 1.0,
        }
    }
}

/// Smallest grid cell the search accepts; finer grids saturate cell indices.
const MIN_GRID_SIZE: f64 = 1.0;

impl RoutingConfig {
    /// Copy with every field forced into a range the engine can route with.
    ///
    /// Non-finite values fall back to the defaults, lengths are clamped to be
    /// non-negative, and counts to their minimum useful value.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let grid_size = if self.grid_size.is_finite() && self.grid_size > 0.0 {
            if self.grid_size < MIN_GRID_SIZE {
                log::warn!("gridSize {} raised to {MIN_GRID_SIZE}", self.grid_size);
            }
            self.grid_size.max(MIN_GRID_SIZE)
        } else {
            log::warn!("ignoring non-positive gridSize {}", self.grid_size);
            defaults.grid_size
        };
        Self {
            bezier_base_distance: finite_or(self.bezier_base_distance, defaults.bezier_base_distance)
                .max(0.0),
            bezier_samples: self.bezier_samples.max(2),
            bezier_margin: finite_or(self.bezier_margin, defaults.bezier_margin),
            straight_tolerance: finite_or(self.straight_tolerance, defaults.straight_tolerance)
                .max(0.0),
            grid_size,
            corner_radius: finite_or(self.corner_radius, defaults.corner_radius).max(0.0),
            obstacle_padding: finite_or(self.obstacle_padding, defaults.obstacle_padding),
            bounds_padding: finite_or(self.bounds_padding, defaults.bounds_padding).max(0.0),
            max_iterations: self.max_iterations,
            launch_attempts: self.launch_attempts.max(1),
            simplify_tolerance: finite_or(self.simplify_tolerance, defaults.simplify_tolerance)
                .max(0.0),
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
    /// Margin around the scene bounds in the SVG viewBox.
    pub padding: f64,
    /// Draw the structured waypoints on top of orthogonal routes.
    pub show_waypoints: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
            padding: 24.0,
            show_waypoints: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub theme: Theme,
    pub routing: RoutingConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    shape_fill: Option<String>,
    shape_border: Option<String>,
    shape_text_color: Option<String>,
    line_color: Option<String>,
    line_width: Option<f32>,
    debug_waypoint_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RoutingConfigFile {
    bezier_base_distance: Option<f64>,
    bezier_samples: Option<u32>,
    bezier_margin: Option<f64>,
    straight_tolerance: Option<f64>,
    grid_size: Option<f64>,
    corner_radius: Option<f64>,
    obstacle_padding: Option<f64>,
    bounds_padding: Option<f64>,
    max_iterations: Option<usize>,
    launch_attempts: Option<u32>,
    simplify_tolerance: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    padding: Option<f64>,
    show_waypoints: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    routing: Option<RoutingConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" || theme_name == "default" {
            config.theme = Theme::modern();
        } else if theme_name == "plain" || theme_name == "base" {
            config.theme = Theme::plain();
        } else {
            log::warn!("unknown theme {theme_name:?}, keeping the default");
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.shape_fill {
            config.theme.shape_fill = v;
        }
        if let Some(v) = vars.shape_border {
            config.theme.shape_border = v;
        }
        if let Some(v) = vars.shape_text_color {
            config.theme.shape_text_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.line_width {
            config.theme.line_width = v;
        }
        if let Some(v) = vars.debug_waypoint_color {
            config.theme.debug_waypoint_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(routing) = parsed.routing {
        if let Some(v) = routing.bezier_base_distance {
            config.routing.bezier_base_distance = v;
        }
        if let Some(v) = routing.bezier_samples {
            config.routing.bezier_samples = v;
        }
        if let Some(v) = routing.bezier_margin {
            config.routing.bezier_margin = v;
        }
        if let Some(v) = routing.straight_tolerance {
            config.routing.straight_tolerance = v;
        }
        if let Some(v) = routing.grid_size {
            config.routing.grid_size = v;
        }
        if let Some(v) = routing.corner_radius {
            config.routing.corner_radius = v;
        }
        if let Some(v) = routing.obstacle_padding {
            config.routing.obstacle_padding = v;
        }
        if let Some(v) = routing.bounds_padding {
            config.routing.bounds_padding = v;
        }
        if let Some(v) = routing.max_iterations {
            config.routing.max_iterations = v;
        }
        if let Some(v) = routing.launch_attempts {
            config.routing.launch_attempts = v;
        }
        if let Some(v) = routing.simplify_tolerance {
            config.routing.simplify_tolerance = v;
        }
        config.routing = config.routing.sanitized();
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.padding {
            config.render.padding = v.max(0.0);
        }
        if let Some(v) = render.show_waypoints {
            config.render.show_waypoints = v;
        }
    }

    config.render.background = config.theme.background.clone();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let cfg = RoutingConfig::default();
        assert_eq!(cfg.grid_size, 24.0);
        assert_eq!(cfg.corner_radius, 12.0);
        assert_eq!(cfg.obstacle_padding, 10.0);
        assert_eq!(cfg.bounds_padding, 300.0);
        assert_eq!(cfg.max_iterations, 2000);
        assert_eq!(cfg.bezier_samples, 20);
    }

    #[test]
    fn overrides_are_merged_over_defaults() {
        let cfg = parse_config(
            r##"{
                "theme": "plain",
                "themeVariables": { "lineColor": "#ff0000" },
                "routing": { "gridSize": 16, "cornerRadius": 4, "launchAttempts": 0 }
            }"##,
        )
        .unwrap();
        assert_eq!(cfg.theme.line_color, "#ff0000");
        assert_eq!(cfg.theme.font_size, Theme::plain().font_size);
        assert_eq!(cfg.routing.grid_size, 16.0);
        assert_eq!(cfg.routing.corner_radius, 4.0);
        assert_eq!(cfg.routing.launch_attempts, 1);
        assert_eq!(cfg.routing.obstacle_padding, 10.0);
    }

    #[test]
    fn non_positive_grid_size_is_ignored() {
        let cfg = parse_config(r#"{ "routing": { "gridSize": 0 } }"#).unwrap();
        assert_eq!(cfg.routing.grid_size, 24.0);
    }

    #[test]
    fn sanitized_repairs_unusable_values() {
        let raw = RoutingConfig {
            grid_size: 1e-7,
            corner_radius: -3.0,
            bounds_padding: f64::NAN,
            launch_attempts: 0,
            bezier_samples: 0,
            simplify_tolerance: f64::INFINITY,
            ..RoutingConfig::default()
        };
        let cfg = raw.sanitized();
        assert_eq!(cfg.grid_size, 1.0);
        assert_eq!(cfg.corner_radius, 0.0);
        assert_eq!(cfg.bounds_padding, 300.0);
        assert_eq!(cfg.launch_attempts, 1);
        assert_eq!(cfg.bezier_samples, 2);
        assert_eq!(cfg.simplify_tolerance, 1.0);

        let negative = RoutingConfig {
            grid_size: -24.0,
            ..RoutingConfig::default()
        };
        assert_eq!(negative.sanitized().grid_size, 24.0);
    }

    #[test]
    fn missing_path_yields_defaults() {
        let cfg = load_config(None).unwrap();
        assert_eq!(cfg.routing.max_iterations, 2000);
    }
}
