//! The generation pipeline.
//!
//! Phases run strictly in order and each one fully populates its output before
//! the next starts: heightmap, coastal distance, climate, biomes, coasts,
//! mountains, blending, features. [`MapGeneration`] runs one phase per `next()` call so a caller can
//! spread the work over frames or stop between phases.

use std::time::Instant;

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BIOME_RNG_SALT, DEFAULT_COLS, DEFAULT_HIGH_ELEVATION, DEFAULT_LAND_PERCENTAGE,
    DEFAULT_MOUNTAIN_PERCENTAGE, DEFAULT_ROWS, DEFAULT_SEED, DEFAULT_SHELF_PERCENTAGE,
    MOISTURE_SEED_OFFSET, ZOOM_ARCHIPELAGO, ZOOM_CONTINENTS, ZOOM_PANGAEA,
};
use crate::map::biome::{BiomeThresholds, apply_biomes};
use crate::map::climate::apply_climate;
use crate::map::coast::{CoastalDistanceField, expand_coasts};
use crate::map::error::MapError;
use crate::map::features::{
    blend_terrain, mountain_threshold, place_features, place_mountains, thin_mountains,
};
use crate::map::grid::Grid;
use crate::map::heightmap::{HeightMap, MoistureMap, noise_seed};
use crate::map::tiles::TerrainType;

/// Overall shape of the generated world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MapType {
    #[default]
    Continents,
    Pangaea,
    Archipelago,
}

impl MapType {
    /// Noise zoom; smaller values give bigger landmasses
    pub fn zoom(self) -> f64 {
        match self {
            MapType::Continents => ZOOM_CONTINENTS,
            MapType::Pangaea => ZOOM_PANGAEA,
            MapType::Archipelago => ZOOM_ARCHIPELAGO,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MapType::Continents => "continents",
            MapType::Pangaea => "pangaea",
            MapType::Archipelago => "archipelago",
        }
    }
}

/// Parameters of one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    pub cols: u32,
    pub rows: u32,
    pub map_type: MapType,
    /// Share of all cells that become land, in `(0, 1]`
    pub land_percentage: f64,
    /// Share of the land covered by mountains, in `[0, 1]`
    pub mountain_percentage: f64,
    /// Share of all cells below sea level that still count as shallow shelf
    pub shelf_percentage: f64,
    /// Normalized elevation above which land is high ground
    pub high_elevation: f64,
    pub seed: u64,
    /// Run the neighbourhood-majority smoothing pass
    pub blend: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            map_type: MapType::Continents,
            land_percentage: DEFAULT_LAND_PERCENTAGE,
            mountain_percentage: DEFAULT_MOUNTAIN_PERCENTAGE,
            shelf_percentage: DEFAULT_SHELF_PERCENTAGE,
            high_elevation: DEFAULT_HIGH_ELEVATION,
            seed: DEFAULT_SEED,
            blend: true,
        }
    }
}

impl MapOptions {
    // Preset world types for easy selection
    pub fn continents() -> Self {
        Self::default()
    }

    pub fn pangaea() -> Self {
        Self {
            map_type: MapType::Pangaea,
            land_percentage: 0.5,
            ..Default::default()
        }
    }

    pub fn archipelago() -> Self {
        Self {
            map_type: MapType::Archipelago,
            land_percentage: 0.3,
            mountain_percentage: 0.05,
            ..Default::default()
        }
    }

    pub fn for_map_type(map_type: MapType) -> Self {
        match map_type {
            MapType::Continents => Self::continents(),
            MapType::Pangaea => Self::pangaea(),
            MapType::Archipelago => Self::archipelago(),
        }
    }

    pub fn with_size(mut self, cols: u32, rows: u32) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(MapError::InvalidOptions(format!(
                "grid must be at least 1x1, got {}x{}",
                self.cols, self.rows
            )));
        }
        if !(self.land_percentage > 0.0 && self.land_percentage <= 1.0) {
            return Err(MapError::InvalidOptions(format!(
                "land percentage {} is outside (0, 1]",
                self.land_percentage
            )));
        }
        for (name, value) in [
            ("mountain percentage", self.mountain_percentage),
            ("shelf percentage", self.shelf_percentage),
            ("high elevation", self.high_elevation),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MapError::InvalidOptions(format!(
                    "{} {} is outside [0, 1]",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// One step of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationPhase {
    Heightmap,
    CoastalDistance,
    Climate,
    Biomes,
    Coasts,
    Mountains,
    Blending,
    Features,
}

impl GenerationPhase {
    pub const ALL: [GenerationPhase; 8] = [
        GenerationPhase::Heightmap,
        GenerationPhase::CoastalDistance,
        GenerationPhase::Climate,
        GenerationPhase::Biomes,
        GenerationPhase::Coasts,
        GenerationPhase::Mountains,
        GenerationPhase::Blending,
        GenerationPhase::Features,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GenerationPhase::Heightmap => "Generating heightmap",
            GenerationPhase::CoastalDistance => "Measuring distance to coast",
            GenerationPhase::Climate => "Assigning climate zones",
            GenerationPhase::Biomes => "Assigning biomes",
            GenerationPhase::Coasts => "Expanding coasts",
            GenerationPhase::Mountains => "Placing mountains",
            GenerationPhase::Blending => "Blending terrain",
            GenerationPhase::Features => "Placing features",
        }
    }

    pub fn next(self) -> Option<GenerationPhase> {
        let index = Self::ALL.iter().position(|phase| *phase == self)?;
        Self::ALL.get(index + 1).copied()
    }

    /// Share of the pipeline done once this phase has finished
    pub fn completed_fraction(self) -> f32 {
        let index = Self::ALL
            .iter()
            .position(|phase| *phase == self)
            .unwrap_or(0);
        (index + 1) as f32 / Self::ALL.len() as f32
    }
}

/// Reported after each finished phase
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationProgress {
    pub phase: GenerationPhase,
    pub status: &'static str,
    /// In `[0, 1]`; 1.0 once the last phase is done
    pub fraction: f32,
}

/// Finished map plus the intermediate fields it was built from
#[derive(Debug, Clone)]
pub struct GeneratedMap {
    pub grid: Grid,
    pub heightmap: HeightMap,
    pub moisture: MoistureMap,
    pub coastal_distance: CoastalDistanceField,
    pub sea_level: f64,
    pub mountain_threshold: f64,
}

impl GeneratedMap {
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

/// Resumable generation task.
///
/// Each `next()` runs exactly one phase and yields its progress. Dropping the
/// task between phases cancels the run; nothing partial is handed out.
pub struct MapGeneration {
    options: MapOptions,
    next_phase: Option<GenerationPhase>,
    grid: Grid,
    heightmap: HeightMap,
    moisture: MoistureMap,
    coastal_distance: CoastalDistanceField,
    thresholds: BiomeThresholds,
    mountain_threshold: f64,
    rng: StdRng,
}

impl MapGeneration {
    pub fn new(options: MapOptions) -> Result<Self, MapError> {
        options.validate()?;
        let rng = StdRng::seed_from_u64(options.seed ^ BIOME_RNG_SALT);
        Ok(Self {
            grid: Grid::new(options.cols, options.rows),
            heightmap: HeightMap::default(),
            moisture: MoistureMap::default(),
            coastal_distance: CoastalDistanceField::default(),
            thresholds: BiomeThresholds {
                sea_level: 0.0,
                shelf_level: 0.0,
                high_elevation: options.high_elevation,
            },
            mountain_threshold: f64::INFINITY,
            next_phase: Some(GenerationPhase::Heightmap),
            options,
            rng,
        })
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Phase the next `next()` call will run
    pub fn pending_phase(&self) -> Option<GenerationPhase> {
        self.next_phase
    }

    pub fn is_complete(&self) -> bool {
        self.next_phase.is_none()
    }

    /// Runs the remaining phases and hands over the result
    pub fn finish(mut self) -> GeneratedMap {
        for _ in self.by_ref() {}
        self.into_generated()
    }

    /// Moves the finished map out once every phase has run.
    ///
    /// The task is left empty afterwards and should be dropped.
    pub fn take_result(&mut self) -> Option<GeneratedMap> {
        if !self.is_complete() {
            return None;
        }
        Some(GeneratedMap {
            grid: std::mem::replace(&mut self.grid, Grid::new(0, 0)),
            heightmap: std::mem::take(&mut self.heightmap),
            moisture: std::mem::take(&mut self.moisture),
            coastal_distance: std::mem::take(&mut self.coastal_distance),
            sea_level: self.thresholds.sea_level,
            mountain_threshold: self.mountain_threshold,
        })
    }

    fn into_generated(self) -> GeneratedMap {
        GeneratedMap {
            grid: self.grid,
            heightmap: self.heightmap,
            moisture: self.moisture,
            coastal_distance: self.coastal_distance,
            sea_level: self.thresholds.sea_level,
            mountain_threshold: self.mountain_threshold,
        }
    }

    fn run_phase(&mut self, phase: GenerationPhase) {
        let started = Instant::now();
        info!("{}...", phase.label());

        match phase {
            GenerationPhase::Heightmap => self.generate_fields(),
            GenerationPhase::CoastalDistance => {
                self.coastal_distance = CoastalDistanceField::compute(&self.grid);
            }
            GenerationPhase::Climate => apply_climate(&mut self.grid, &self.coastal_distance),
            GenerationPhase::Biomes => apply_biomes(
                &mut self.grid,
                &self.heightmap,
                &self.moisture,
                &self.thresholds,
                &mut self.rng,
            ),
            GenerationPhase::Coasts => {
                expand_coasts(&mut self.grid, &mut self.rng);
            }
            GenerationPhase::Mountains => {
                self.mountain_threshold = mountain_threshold(
                    &self.heightmap,
                    self.options.mountain_percentage,
                    self.options.land_percentage,
                );
                let placed = place_mountains(&mut self.grid, &self.heightmap, self.mountain_threshold);
                let thinned = thin_mountains(&mut self.grid, &mut self.rng);
                debug!("Placed {} mountain tiles", placed - thinned);
            }
            GenerationPhase::Blending => {
                if self.options.blend {
                    blend_terrain(&mut self.grid);
                }
            }
            GenerationPhase::Features => {
                let counts = place_features(&mut self.grid, &mut self.rng);
                debug!("Placed {} feature tiles", counts.total());
            }
        }

        debug!("{} took {:?}", phase.label(), started.elapsed());
    }

    /// Elevation and moisture rasters, then the provisional land/water split
    fn generate_fields(&mut self) {
        let MapOptions {
            cols,
            rows,
            map_type,
            seed,
            land_percentage,
            shelf_percentage,
            ..
        } = self.options;
        let seed = noise_seed(seed);

        self.heightmap = HeightMap::generate_with_zoom(cols, rows, seed, map_type.zoom());
        self.moisture = MoistureMap::generate_with_zoom(
            cols,
            rows,
            seed.wrapping_add(MOISTURE_SEED_OFFSET),
            map_type.zoom(),
        );

        self.thresholds.sea_level = self.heightmap.find_threshold_above(land_percentage);
        self.thresholds.shelf_level = self
            .heightmap
            .find_threshold_above(land_percentage + shelf_percentage);

        let sea_level = self.thresholds.sea_level;
        for (tile, elevation) in self
            .grid
            .tiles_mut()
            .iter_mut()
            .zip(self.heightmap.values())
        {
            tile.terrain = if *elevation >= sea_level {
                TerrainType::Plains
            } else {
                TerrainType::Water
            };
        }

        info!(
            "Sea level {:.3}: {} of {} tiles are land",
            sea_level,
            self.heightmap.count_at_or_above(sea_level),
            self.grid.len()
        );
    }
}

impl Iterator for MapGeneration {
    type Item = GenerationProgress;

    fn next(&mut self) -> Option<Self::Item> {
        let phase = self.next_phase?;
        self.run_phase(phase);
        self.next_phase = phase.next();
        Some(GenerationProgress {
            phase,
            status: phase.label(),
            fraction: phase.completed_fraction(),
        })
    }
}

/// Generates a complete map in one call, reporting progress after each phase
pub fn generate_map(
    options: MapOptions,
    mut progress: Option<&mut dyn FnMut(&GenerationProgress)>,
) -> Result<Grid, MapError> {
    let mut generation = MapGeneration::new(options)?;
    for step in generation.by_ref() {
        if let Some(report) = progress.as_deref_mut() {
            report(&step);
        }
    }
    Ok(generation.into_generated().into_grid())
}

#[cfg(test)]
mod tests;
