use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tweetscape::app::{AppOptions, TweetscapeApp};
use tweetscape::cluster::Canvas;
use tweetscape::dataset::load_records;
use tweetscape::encoding::Attribute;
use tweetscape::engine::Engine;
use tweetscape::export::{settle_layout, write_layout};
use tweetscape::physics::SimulationConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum ColorBy {
    #[default]
    Sentiment,
    Subjectivity,
}

impl From<ColorBy> for Attribute {
    fn from(value: ColorBy) -> Self {
        match value {
            ColorBy::Sentiment => Attribute::Sentiment,
            ColorBy::Subjectivity => Attribute::Subjectivity,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Tweet dataset (JSON) to open on start.
    #[arg(long)]
    data: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ColorBy::Sentiment)]
    color_by: ColorBy,

    /// Strength of the mutual repulsion between tweets.
    #[arg(long)]
    charge: Option<f32>,

    #[arg(long)]
    anchor_strength: Option<f32>,

    #[arg(long)]
    collision_radius: Option<f32>,

    /// Stop the layout after this many ticks even if it has not settled.
    #[arg(long)]
    max_ticks: Option<u32>,

    /// Run the layout to completion without a window and print it as JSON.
    #[arg(long, requires = "data")]
    export_layout: bool,
}

impl Args {
    fn simulation_config(&self) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        if let Some(charge) = self.charge {
            config.charge_strength = charge;
        }
        if let Some(strength) = self.anchor_strength {
            config.anchor_strength = strength;
        }
        if let Some(radius) = self.collision_radius {
            config.collision_radius = radius;
        }
        config.max_ticks = self.max_ticks;
        config
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.simulation_config();
    let attribute = Attribute::from(args.color_by);

    if args.export_layout {
        let path = args
            .data
            .context("--export-layout needs a dataset passed with --data")?;
        return export(&path, attribute, config);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 820.0]),
        ..Default::default()
    };
    let app_options = AppOptions {
        data: args.data,
        attribute,
        simulation: config,
    };

    eframe::run_native(
        "tweetscape",
        options,
        Box::new(move |cc| Ok(Box::new(TweetscapeApp::new(cc, app_options)))),
    )
    .map_err(|error| anyhow!("failed to run the tweetscape window: {error}"))
}

fn export(path: &Path, attribute: Attribute, config: SimulationConfig) -> anyhow::Result<()> {
    let records: Arc<[_]> = load_records(path)?.into();
    if records.is_empty() {
        return Err(anyhow!("{} contains no records", path.display()));
    }

    let mut engine = Engine::new(Canvas::default(), config, attribute);
    let rows = settle_layout(&mut engine, records);
    info!(
        points = rows.len(),
        ticks = engine.simulation().map_or(0, |simulation| simulation.ticks()),
        "layout settled"
    );

    write_layout(&rows, io::stdout().lock())
}
