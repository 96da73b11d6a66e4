// File: crates/demo/src/main.rs
// Summary: CLI that loads the usage CSV and writes the animated SVG plus PNG snapshots of chosen instants.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use usage_chart_core::{ChartConfig, ChartState, Dataset, Millis, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "usage-chart", about = "Animated men vs women social media usage chart")]
struct Args {
    /// Usage CSV (social_media_app, age_group, men_percent, women_percent).
    #[arg(default_value = "data/social-media-uk.csv")]
    input: PathBuf,

    /// Directory receiving chart.svg and the PNG frames.
    #[arg(long, default_value = "target/out")]
    out_dir: PathBuf,

    /// Chart config JSON; missing fields keep their defaults.
    #[arg(long, env = "USAGE_CHART_CONFIG")]
    config: Option<PathBuf>,

    /// Animation instants (ms after the first render) to snapshot as PNG.
    #[arg(long = "at", value_name = "MS", default_values_t = [0.0, 1000.0, 3500.0])]
    at: Vec<Millis>,

    /// Skip text (axis labels, legend names, annotations).
    #[arg(long)]
    no_labels: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ChartConfig::from_json_file(path)?,
        None => ChartConfig::default(),
    };
    let dataset = Dataset::from_path(&args.input)
        .with_context(|| format!("failed to load usage data '{}'", args.input.display()))?;

    let state = ChartState::build(&dataset, &config, 0.0);
    let mut opts = RenderOptions::for_config(&config);
    opts.draw_labels = !args.no_labels;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let svg_path = args.out_dir.join("chart.svg");
    state.render_to_svg(&opts, &svg_path)?;
    log::info!("wrote {}", svg_path.display());

    for &at in &args.at {
        let frame = state.frame(at);
        let png_path = args.out_dir.join(format!("frame_{}.png", at.max(0.0).round() as u64));
        state.render_to_png(&frame, &opts, &png_path)?;
        log::info!("wrote {} (t={at}ms)", png_path.display());
    }

    Ok(())
}
