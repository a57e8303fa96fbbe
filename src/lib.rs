//! Hexmap Gen - procedural terrain for hexagonal strategy maps
//!
//! A map is built in fixed phases: a Perlin heightmap split into land and
//! water, a distance-to-coast field, latitude climate bands warmed near the
//! coast, per-climate biomes, a grown coastal shelf, mountains on the highest
//! land, an optional smoothing pass, and vegetation and ice features. Use
//! [`generate_map`] for a one-shot call or [`MapGenerationPlugin`] to spread
//! the phases over app frames.

use bevy::log::LogPlugin;
use bevy::prelude::*;

pub mod constants;
pub mod map;

pub use map::{
    ActiveMap, Grid, GridSnapshot, MapError, MapGenerationPlugin, MapOptions, MapType,
    generate_map, render_ascii,
};

/// Headless app with logging and the generation plugin installed
pub fn app(log: LogPlugin) -> App {
    let mut app = App::new();
    app.add_plugins((log, MapGenerationPlugin));
    app
}

#[cfg(test)]
pub mod test_utils;
