use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wire_router::routing::{ConnectionRender, Point, Rect, RouteKind, Side, route_connection_traced};
use wire_router::{Config, RoutingConfig, Theme, render_scene_svg};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteRequest {
    start: Point,
    end: Point,
    start_side: Side,
    end_side: Side,
    #[serde(default)]
    obstacles: Vec<Rect>,
    #[serde(default)]
    routing: Option<RoutingConfig>,
}

#[derive(Debug, Serialize)]
struct RouteResponse {
    kind: RouteKind,
    #[serde(flatten)]
    render: ConnectionRender,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneRenderOptions {
    theme: Option<String>,
    line_color: Option<String>,
    show_waypoints: Option<bool>,
}

fn route_request(raw: &str) -> Result<String, String> {
    let request: RouteRequest = serde_json::from_str(raw).map_err(|error| error.to_string())?;
    let config = request.routing.unwrap_or_default().sanitized();
    let outcome = route_connection_traced(
        &config,
        request.start,
        request.end,
        request.start_side,
        request.end_side,
        &request.obstacles,
    );
    serde_json::to_string(&RouteResponse {
        kind: outcome.kind,
        render: outcome.render,
    })
    .map_err(|error| error.to_string())
}

fn build_config(options: SceneRenderOptions) -> Config {
    let mut config = Config::default();
    if options.theme.as_deref() == Some("plain") {
        config.theme = Theme::plain();
    }
    if let Some(color) = options.line_color {
        config.theme.line_color = color;
    }
    if let Some(show) = options.show_waypoints {
        config.render.show_waypoints = show;
    }
    config.render.background = config.theme.background.clone();
    config
}

/// Routes one connection. Input and output are JSON; the engine itself
/// never fails, only malformed requests do.
#[wasm_bindgen]
pub fn route_connection_json(request_json: &str) -> Result<String, JsValue> {
    route_request(request_json).map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn route_scene_svg(scene: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<SceneRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        SceneRenderOptions::default()
    };
    render_scene_svg(scene, &build_config(options)).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use wire_router::render_scene_svg;

    use crate::{SceneRenderOptions, build_config, route_request};

    #[test]
    fn routes_a_blocked_request() {
        let response = route_request(
            r#"{
                "start": { "x": 0, "y": 0 },
                "end": { "x": 100, "y": 0 },
                "startSide": "right",
                "endSide": "left",
                "obstacles": [{ "left": 40, "right": 60, "top": -10, "bottom": 10, "id": "box" }]
            }"#,
        )
        .expect("request should route");
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["kind"], "grid");
        assert_eq!(value["type"], "orthogonal");
        assert!(value["path"].as_str().unwrap().starts_with("M 0 0"));
    }

    #[test]
    fn unusable_routing_overrides_are_repaired() {
        let response = route_request(
            r#"{
                "start": { "x": 0, "y": 0 },
                "end": { "x": 100, "y": 0 },
                "startSide": "right",
                "endSide": "left",
                "obstacles": [{ "left": 40, "right": 60, "top": -10, "bottom": 10 }],
                "routing": { "gridSize": 1e-7, "launchAttempts": 0 }
            }"#,
        )
        .expect("request should route");
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        let points = value["points"].as_array().unwrap();
        assert_eq!(points.first().unwrap()["x"], 0.0);
        assert_eq!(points.last().unwrap()["x"], 100.0);
    }

    #[test]
    fn rejects_unknown_side() {
        let err = route_request(
            r#"{ "start": { "x": 0, "y": 0 }, "end": { "x": 1, "y": 1 }, "startSide": "up", "endSide": "left" }"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn renders_scene_with_options() {
        let options = SceneRenderOptions {
            theme: Some("plain".to_string()),
            line_color: Some("#123456".to_string()),
            show_waypoints: None,
        };
        let svg = render_scene_svg(
            r#"{ shapes: [{ id: "a", x: 0, y: 0, width: 40, height: 40 },
                          { id: "b", x: 100, y: 100, width: 40, height: 40 }],
                 connections: [{ from: { shape: "a", side: "bottom" }, to: { shape: "b", side: "left" } }] }"#,
            &build_config(options),
        )
        .expect("scene should render");
        assert!(svg.contains("#123456"));
    }
}
