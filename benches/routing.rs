use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wire_router::config::RoutingConfig;
use wire_router::routing::{Point, Rect, Side, route_connection_with, route_orthogonal};
use wire_router::scene::{parse_scene, route_scene};

/// `cols x rows` boxes with gaps, plus one connection per neighbouring pair.
fn grid_scene_source(cols: usize, rows: usize) -> String {
    let mut shapes = Vec::new();
    let mut connections = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            shapes.push(format!(
                "{{ id: \"s{row}_{col}\", x: {}, y: {}, width: 90, height: 50 }}",
                col * 180,
                row * 140
            ));
            if col + 1 < cols {
                connections.push(format!(
                    "{{ from: {{ shape: \"s{row}_{col}\", side: \"right\" }}, to: {{ shape: \"s{row}_{}\", side: \"left\" }} }}",
                    col + 1
                ));
            }
            if row + 1 < rows && col + 1 < cols {
                connections.push(format!(
                    "{{ from: {{ shape: \"s{row}_{col}\", side: \"bottom\" }}, to: {{ shape: \"s{}_{}\", side: \"top\" }} }}",
                    row + 1,
                    col + 1
                ));
            }
        }
    }
    format!(
        "{{ shapes: [{}], connections: [{}] }}",
        shapes.join(", "),
        connections.join(", ")
    )
}

fn scattered_obstacles(count: usize) -> Vec<Rect> {
    (0..count)
        .map(|i| {
            let x = ((i * 97) % 640) as f64;
            let y = ((i * 53) % 480) as f64;
            Rect::new(x, x + 40.0, y, y + 30.0).with_id(format!("o{i}"))
        })
        .collect()
}

fn bench_single_connection(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_connection");
    let config = RoutingConfig::default();
    for count in [0usize, 8, 32, 128] {
        let obstacles = scattered_obstacles(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &obstacles, |b, obstacles| {
            b.iter(|| {
                let render = route_connection_with(
                    &config,
                    black_box(Point::new(-40.0, 20.0)),
                    black_box(Point::new(700.0, 500.0)),
                    Side::Right,
                    Side::Left,
                    obstacles,
                );
                black_box(render.path().len());
            });
        });
    }
    group.finish();
}

fn bench_grid_phase(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_orthogonal");
    let config = RoutingConfig::default();
    for count in [8usize, 32, 128] {
        let obstacles = scattered_obstacles(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &obstacles, |b, obstacles| {
            b.iter(|| {
                let outcome = route_orthogonal(
                    &config,
                    black_box(Point::new(-40.0, 20.0)),
                    black_box(Point::new(700.0, 500.0)),
                    Side::Right,
                    Side::Left,
                    obstacles,
                );
                black_box(outcome.kind);
            });
        });
    }
    group.finish();
}

fn bench_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_scene");
    let config = RoutingConfig::default();
    for (cols, rows) in [(4usize, 3usize), (8, 6), (12, 10)] {
        let scene = parse_scene(&grid_scene_source(cols, rows)).expect("parse failed");
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{cols}x{rows}")),
            &scene,
            |b, scene| {
                b.iter(|| {
                    let routed = route_scene(black_box(scene), &config).expect("route failed");
                    black_box(routed.connections.len());
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_single_connection, bench_grid_phase, bench_scene);
criterion_main!(benches);
