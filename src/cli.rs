use crate::config::load_config;
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_svg, write_output_svg};
use crate::route_dump::{route_dump_json, write_route_dump};
use crate::scene::{parse_scene, route_scene};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "wrr", version, about = "Route obstacle-avoiding connections in a diagram scene")]
pub struct Args {
    /// Scene file (.json / .json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (routing constants, theme, themeVariables)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Width used when rasterizing
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f32,

    /// Height used when rasterizing
    #[arg(short = 'H', long = "height", default_value_t = 800.0)]
    pub height: f32,

    /// Draw orthogonal waypoints on top of the routes
    #[arg(long = "waypoints")]
    pub waypoints: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.render.width = args.width;
    config.render.height = args.height;
    if args.waypoints {
        config.render.show_waypoints = true;
    }

    let input = read_input(args.input.as_deref())?;
    let scene = parse_scene(&input)?;
    log::info!(
        "routing {} connection(s) across {} shape(s)",
        scene.connections.len(),
        scene.shapes.len()
    );
    let routed = route_scene(&scene, &config.routing)?;

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&routed, &config.theme, &config.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_route_dump(path, &routed)?,
            None => println!("{}", route_dump_json(&routed)?),
        },
        #[cfg(feature = "png")]
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&routed, &config.theme, &config.render);
            write_output_png(&svg, &output, &config.render, &config.theme)?;
        }
        #[cfg(not(feature = "png"))]
        OutputFormat::Png => {
            return Err(anyhow::anyhow!(
                "PNG output requires the `png` feature"
            ));
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg_attr(not(feature = "png"), allow(dead_code))]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}
