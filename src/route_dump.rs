use crate::routing::{ConnectionRender, RouteKind};
use crate::scene::RoutedScene;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDump {
    pub bounds: [f64; 4],
    pub shapes: Vec<ShapeDump>,
    pub connections: Vec<ConnectionDump>,
}

#[derive(Debug, Serialize)]
pub struct ShapeDump {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Serialize)]
pub struct ConnectionDump {
    pub id: String,
    pub from: String,
    pub to: String,
    pub directed: bool,
    pub kind: RouteKind,
    pub render: ConnectionRender,
}

impl RouteDump {
    pub fn from_scene(scene: &RoutedScene) -> Self {
        let shapes = scene
            .shapes
            .iter()
            .map(|shape| ShapeDump {
                id: shape.id.clone(),
                x: shape.x,
                y: shape.y,
                width: shape.width,
                height: shape.height,
            })
            .collect();

        let connections = scene
            .connections
            .iter()
            .map(|conn| ConnectionDump {
                id: conn.id.clone(),
                from: conn.from.clone(),
                to: conn.to.clone(),
                directed: conn.directed,
                kind: conn.kind,
                render: conn.render.clone(),
            })
            .collect();

        RouteDump {
            bounds: [
                scene.bounds.left,
                scene.bounds.top,
                scene.bounds.right,
                scene.bounds.bottom,
            ],
            shapes,
            connections,
        }
    }
}

pub fn route_dump_json(scene: &RoutedScene) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&RouteDump::from_scene(scene))?)
}

pub fn write_route_dump(path: &Path, scene: &RoutedScene) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = RouteDump::from_scene(scene);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
