//! Headless map generation.
//! Run with: cargo run --bin generate_map -- --cols 48 --rows 32 --seed 7

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::{Parser, ValueEnum};
use hexmap_gen::map::{GenerateMapRequest, MapGenerationTask};
use hexmap_gen::{ActiveMap, MapOptions, MapType, render_ascii};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MapKind {
    Continents,
    Pangaea,
    Archipelago,
}

impl From<MapKind> for MapType {
    fn from(kind: MapKind) -> Self {
        match kind {
            MapKind::Continents => MapType::Continents,
            MapKind::Pangaea => MapType::Pangaea,
            MapKind::Archipelago => MapType::Archipelago,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
    Both,
}

#[derive(Parser)]
#[command(name = "generate_map")]
#[command(about = "Generate a hex terrain map and print it")]
struct Args {
    /// World shape preset; the flags below override its values
    #[arg(long, value_enum, default_value_t = MapKind::Continents)]
    map_type: MapKind,

    #[arg(long)]
    cols: Option<u32>,

    #[arg(long)]
    rows: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Share of cells that become land, in (0, 1]
    #[arg(long)]
    land: Option<f64>,

    /// Share of the land covered by mountains
    #[arg(long)]
    mountains: Option<f64>,

    /// Extra share of cells counted as shallow shelf
    #[arg(long)]
    shelf: Option<f64>,

    /// Normalized elevation treated as high ground
    #[arg(long)]
    high_elevation: Option<f64>,

    /// Skip the smoothing pass
    #[arg(long)]
    no_blend: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,

    /// Write the JSON snapshot here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log per-phase timings
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn options(&self) -> MapOptions {
        let mut options = MapOptions::for_map_type(self.map_type.into());
        if let Some(cols) = self.cols {
            options.cols = cols;
        }
        if let Some(rows) = self.rows {
            options.rows = rows;
        }
        if let Some(seed) = self.seed {
            options.seed = seed;
        }
        if let Some(land) = self.land {
            options.land_percentage = land;
        }
        if let Some(mountains) = self.mountains {
            options.mountain_percentage = mountains;
        }
        if let Some(shelf) = self.shelf {
            options.shelf_percentage = shelf;
        }
        if let Some(high) = self.high_elevation {
            options.high_elevation = high;
        }
        options.blend = !self.no_blend;
        options
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let options = args.options();
    options.validate()?;

    let mut app = hexmap_gen::app(LogPlugin {
        level: if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        },
        ..default()
    });
    app.world_mut()
        .resource_mut::<Messages<GenerateMapRequest>>()
        .write(GenerateMapRequest { options });

    // One phase per update
    loop {
        app.update();
        if app.world().contains_resource::<ActiveMap>() {
            break;
        }
        if !app.world().contains_resource::<MapGenerationTask>() {
            bail!("map generation stopped without producing a map");
        }
    }

    let active = app
        .world_mut()
        .remove_resource::<ActiveMap>()
        .context("generated map went missing")?;

    if matches!(args.format, OutputFormat::Ascii | OutputFormat::Both) {
        print!("{}", render_ascii(active.grid()));
    }

    if matches!(args.format, OutputFormat::Json | OutputFormat::Both) {
        let json = serde_json::to_string_pretty(&active.grid().to_snapshot())?;
        match &args.output {
            Some(path) => {
                std::fs::write(path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("Snapshot written to {}", path.display());
            }
            None => println!("{}", json),
        }
    }

    Ok(())
}
