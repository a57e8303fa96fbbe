//! Terrain and hills assignment.
//!
//! Water cells become shore or ocean. Land cells go through a per-climate
//! decision table driven by normalized elevation, moisture, and RNG draws.

use bevy::prelude::*;
use rand::Rng;

use crate::constants::{
    HIGH_GROUND_CHANCE, LOWLAND_HILLS_CHANCE, MID_ELEVATION, POLAR_HILLS_CHANCE,
    SUB_POLAR_MID_SNOW_CHANCE, SUB_TROPIC_ARID_MOISTURE, SUB_TROPIC_DESERT_CHANCE,
    SUB_TROPIC_DRY_MOISTURE, TEMPERATE_DRY_MOISTURE, TROPIC_ARID_MOISTURE, TROPIC_DESERT_CHANCE,
};
use crate::map::grid::Grid;
use crate::map::heightmap::{HeightMap, MoistureMap};
use crate::map::tiles::{ClimateZone, TerrainType};

/// Elevation cut-offs for one generation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeThresholds {
    /// Elevation at and above which a cell is land
    pub sea_level: f64,
    /// Elevation at and above which a water cell is shallow shelf
    pub shelf_level: f64,
    /// Elevation above which land is high ground
    pub high_elevation: f64,
}

/// Water terrain for a cell: shore next to land or on the shelf, ocean otherwise
pub fn resolve_water(touches_land: bool, elevation: f64, shelf_level: f64) -> TerrainType {
    if touches_land || elevation >= shelf_level {
        TerrainType::Shore
    } else {
        TerrainType::Ocean
    }
}

/// Terrain and hills flag for a land cell.
///
/// High ground only takes the hilly variant of its zone when a
/// [`HIGH_GROUND_CHANCE`] draw passes; otherwise it falls through to the
/// ordinary rules. The draw is skipped entirely below `high_elevation`.
pub fn assign_biome<R: Rng + ?Sized>(
    elevation: f64,
    moisture: f64,
    zone: ClimateZone,
    high_elevation: f64,
    rng: &mut R,
) -> (TerrainType, bool) {
    if zone == ClimateZone::Polar {
        return (TerrainType::Snow, rng.random_bool(POLAR_HILLS_CHANCE));
    }

    if elevation > high_elevation && rng.random_bool(HIGH_GROUND_CHANCE) {
        let terrain = match zone {
            ClimateZone::SubPolar => TerrainType::Snow,
            ClimateZone::Temperate => TerrainType::Grass,
            _ => TerrainType::Plains,
        };
        return (terrain, true);
    }

    if zone == ClimateZone::SubPolar {
        if elevation > MID_ELEVATION && rng.random_bool(SUB_POLAR_MID_SNOW_CHANCE) {
            return (TerrainType::Snow, false);
        }
        return (TerrainType::Tundra, rng.random_bool(LOWLAND_HILLS_CHANCE));
    }

    let hills = rng.random_bool(LOWLAND_HILLS_CHANCE);
    let terrain = match zone {
        ClimateZone::Temperate if moisture < TEMPERATE_DRY_MOISTURE => TerrainType::Plains,
        ClimateZone::Temperate => TerrainType::Grass,
        ClimateZone::SubTropic if moisture < SUB_TROPIC_ARID_MOISTURE => {
            if rng.random_bool(SUB_TROPIC_DESERT_CHANCE) {
                TerrainType::Desert
            } else {
                TerrainType::Plains
            }
        }
        ClimateZone::SubTropic if moisture < SUB_TROPIC_DRY_MOISTURE => TerrainType::Plains,
        ClimateZone::SubTropic => TerrainType::Grass,
        ClimateZone::Tropic
            if moisture < TROPIC_ARID_MOISTURE && rng.random_bool(TROPIC_DESERT_CHANCE) =>
        {
            TerrainType::Desert
        }
        _ => TerrainType::Plains,
    };
    (terrain, hills)
}

/// Runs the biome phase over the whole grid.
///
/// Climate zones must already be in place.
pub fn apply_biomes<R: Rng + ?Sized>(
    grid: &mut Grid,
    heightmap: &HeightMap,
    moisture: &MoistureMap,
    thresholds: &BiomeThresholds,
    rng: &mut R,
) {
    let mut shore = 0usize;
    let mut land = 0usize;

    for point in grid.points() {
        let index = grid.flat_index(point);
        let elevation = heightmap.values()[index];
        let tile = grid.tiles()[index];

        if tile.is_water() {
            let terrain = resolve_water(grid.touches_land(point), elevation, thresholds.shelf_level);
            if terrain == TerrainType::Shore {
                shore += 1;
            }
            grid.tiles_mut()[index].terrain = terrain;
            continue;
        }

        land += 1;
        let (terrain, is_hills) = assign_biome(
            elevation,
            moisture.values()[index],
            tile.climate_zone,
            thresholds.high_elevation,
            rng,
        );
        let tile = &mut grid.tiles_mut()[index];
        tile.terrain = terrain;
        tile.is_hills = is_hills;
    }

    debug!("Biomes assigned: {} land tiles, {} shore tiles", land, shore);
}
