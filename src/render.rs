use crate::config::RenderConfig;
use crate::routing::{ConnectionRender, fmt_num};
use crate::scene::RoutedScene;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(scene: &RoutedScene, theme: &Theme, config: &RenderConfig) -> String {
    let mut svg = String::new();
    let pad = config.padding;
    let min_x = scene.bounds.left - pad;
    let min_y = scene.bounds.top - pad;
    let width = (scene.bounds.right - scene.bounds.left + pad * 2.0).max(1.0);
    let height = (scene.bounds.bottom - scene.bounds.top + pad * 2.0).max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\">",
        fmt_num(width),
        fmt_num(height),
        fmt_num(min_x),
        fmt_num(min_y),
        fmt_num(width),
        fmt_num(height),
    ));

    svg.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        fmt_num(min_x),
        fmt_num(min_y),
        config.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.line_color
    ));
    svg.push_str("</defs>");

    for shape in &scene.shapes {
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"6\" ry=\"6\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.2\"/>",
            shape.x,
            shape.y,
            shape.width,
            shape.height,
            theme.shape_fill,
            theme.shape_border
        ));
        let label = shape.label.as_deref().unwrap_or(shape.id.as_str());
        let center_x = shape.x + shape.width / 2.0;
        let center_y = shape.y + shape.height / 2.0 + theme.font_size as f64 * 0.35;
        svg.push_str(&format!(
            "<text x=\"{center_x:.2}\" y=\"{center_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            theme.font_family,
            theme.font_size,
            theme.shape_text_color,
            escape_xml(label)
        ));
    }

    for conn in &scene.connections {
        let marker = if conn.directed { "marker-end=\"url(#arrow)\"" } else { "" };
        svg.push_str(&format!(
            "<path id=\"{}\" data-route=\"{}\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" {} />",
            escape_xml(&conn.id),
            conn.kind.as_str(),
            conn.render.path(),
            theme.line_color,
            theme.line_width,
            marker
        ));
        if config.show_waypoints
            && let ConnectionRender::Orthogonal { points, .. } = &conn.render
        {
            for p in points {
                svg.push_str(&format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"2\" fill=\"{}\"/>",
                    fmt_num(p.x),
                    fmt_num(p.y),
                    theme.debug_waypoint_color
                ));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|s| s.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "Inter".to_string());
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid default size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
