use bevy::prelude::*;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::constants::{
    BLEND_MAJORITY, FOREST_PERCENT, MARSH_PERCENT, MOUNTAIN_CROWD_EDGE, MOUNTAIN_CROWD_FULL,
    OASIS_PERCENT, RAINFOREST_PERCENT, REEF_PERCENT,
};
use crate::map::grid::Grid;
use crate::map::heightmap::HeightMap;
use crate::map::hex::HexPoint;
use crate::map::tiles::{FeatureType, TerrainType, Tile};

/// How many of each feature the feature pass placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureCounts {
    pub ice: usize,
    pub reef: usize,
    pub oasis: usize,
    pub marsh: usize,
    pub rainforest: usize,
    pub forest: usize,
}

impl FeatureCounts {
    pub fn total(&self) -> usize {
        self.ice + self.reef + self.oasis + self.marsh + self.rainforest + self.forest
    }
}

/// Raw elevation at and above which land carries mountains
pub fn mountain_threshold(
    heightmap: &HeightMap,
    mountain_percentage: f64,
    land_percentage: f64,
) -> f64 {
    heightmap.find_threshold_above(mountain_percentage * land_percentage)
}

/// Marks the highest land cells as mountains; the terrain underneath is kept.
///
/// Returns the number of mountain tiles placed.
pub fn place_mountains(grid: &mut Grid, heightmap: &HeightMap, threshold: f64) -> usize {
    let mut placed = 0;
    for (tile, elevation) in grid.tiles_mut().iter_mut().zip(heightmap.values()) {
        if !tile.is_water() && *elevation >= threshold {
            tile.feature = FeatureType::Mountains;
            placed += 1;
        }
    }
    placed
}

/// Flattens mountains buried inside a range into hills.
///
/// Cells are visited in shuffled order and each change is seen by later
/// cells. A mountain with six neighbours on the map and at least
/// [`MOUNTAIN_CROWD_FULL`] of them mountains, or with five on the map and at
/// least [`MOUNTAIN_CROWD_EDGE`], loses the feature and becomes hills.
/// Returns the number of mountains removed.
pub fn thin_mountains<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> usize {
    let mut points: Vec<HexPoint> = grid.points().collect();
    points.shuffle(rng);

    let mut removed = 0;
    for point in points {
        let index = grid.flat_index(point);
        if !grid.tiles()[index].is_mountain() {
            continue;
        }

        let mut neighbors = 0;
        let mut mountains = 0;
        for neighbor in grid.neighbors_in_bounds(point) {
            neighbors += 1;
            if grid.tiles()[grid.flat_index(neighbor)].is_mountain() {
                mountains += 1;
            }
        }

        let crowded = (neighbors == 6 && mountains >= MOUNTAIN_CROWD_FULL)
            || (neighbors == 5 && mountains >= MOUNTAIN_CROWD_EDGE);
        if crowded {
            let tile = &mut grid.tiles_mut()[index];
            tile.feature = FeatureType::None;
            tile.is_hills = true;
            removed += 1;
        }
    }

    debug!("Mountain thinning turned {} mountains into hills", removed);
    removed
}

/// Absorbs isolated land tiles into the terrain that surrounds them.
///
/// A land tile without mountains is isolated when no neighbour shares its
/// terrain. If one land terrain holds at least [`BLEND_MAJORITY`] of its six
/// neighbour slots, the tile takes that terrain. Sweeps repeat until nothing
/// changes, so a second call is a no-op. Returns the number of converted tiles.
pub fn blend_terrain(grid: &mut Grid) -> usize {
    let mut converted = 0;
    loop {
        let mut changed = 0;
        for point in grid.points() {
            let index = grid.flat_index(point);
            let tile = grid.tiles()[index];
            if tile.is_water() || tile.is_mountain() {
                continue;
            }

            let neighbors: Vec<TerrainType> = grid
                .neighbors_in_bounds(point)
                .map(|neighbor| grid.tiles()[grid.flat_index(neighbor)].terrain)
                .collect();
            if neighbors.contains(&tile.terrain) {
                continue;
            }

            if let Some(majority) = majority_land_terrain(&neighbors) {
                grid.tiles_mut()[index].terrain = majority;
                changed += 1;
            }
        }

        if changed == 0 {
            break;
        }
        converted += changed;
    }

    if converted > 0 {
        debug!("Blending converted {} isolated tiles", converted);
    }
    converted
}

fn majority_land_terrain(neighbors: &[TerrainType]) -> Option<TerrainType> {
    neighbors
        .iter()
        .filter(|terrain| !terrain.is_water())
        .find(|candidate| neighbors.iter().filter(|t| t == candidate).count() >= BLEND_MAJORITY)
        .copied()
}

/// Places ice, reef, oasis, marsh, rainforest and forest.
///
/// Tiles that already carry a feature are skipped. Water on the first and
/// last rows freezes. Shore elsewhere may take reef. Land candidates are
/// shuffled and each takes the first feature it supports whose share of the
/// candidates is still within its cap.
pub fn place_features<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> FeatureCounts {
    let last_row = grid.rows() as i32 - 1;
    let mut frozen = Vec::new();
    let mut reef_sites = Vec::new();
    let mut land_sites = Vec::new();

    for point in grid.points() {
        let index = grid.flat_index(point);
        let tile = grid.tiles()[index];
        if tile.feature != FeatureType::None {
            continue;
        }
        if !tile.is_water() {
            land_sites.push(index);
        } else if point.y == 0 || point.y == last_row {
            frozen.push(index);
        } else if tile.terrain == TerrainType::Shore {
            reef_sites.push(index);
        }
    }

    let mut counts = FeatureCounts {
        ice: frozen.len(),
        ..Default::default()
    };
    for index in frozen {
        grid.tiles_mut()[index].feature = FeatureType::Ice;
    }

    reef_sites.shuffle(rng);
    for &index in &reef_sites {
        if within_share(counts.reef, REEF_PERCENT, reef_sites.len()) {
            grid.tiles_mut()[index].feature = FeatureType::Reef;
            counts.reef += 1;
        }
    }

    land_sites.shuffle(rng);
    let total = land_sites.len();
    for index in land_sites {
        let tile = &mut grid.tiles_mut()[index];
        let feature = if supports(tile, FeatureType::Oasis)
            && within_share(counts.oasis, OASIS_PERCENT, total)
        {
            counts.oasis += 1;
            FeatureType::Oasis
        } else if supports(tile, FeatureType::Marsh)
            && within_share(counts.marsh, MARSH_PERCENT, total)
        {
            counts.marsh += 1;
            FeatureType::Marsh
        } else if supports(tile, FeatureType::Rainforest)
            && within_share(counts.rainforest, RAINFOREST_PERCENT, total)
        {
            counts.rainforest += 1;
            FeatureType::Rainforest
        } else if supports(tile, FeatureType::Forest)
            && within_share(counts.forest, FOREST_PERCENT, total)
        {
            counts.forest += 1;
            FeatureType::Forest
        } else {
            continue;
        };
        tile.feature = feature;
    }

    debug!(
        "Features placed: {} ice, {} reef, {} oasis, {} marsh, {} rainforest, {} forest",
        counts.ice, counts.reef, counts.oasis, counts.marsh, counts.rainforest, counts.forest
    );
    counts
}

/// Whether `feature` can sit on the terrain of `tile`
pub fn supports(tile: &Tile, feature: FeatureType) -> bool {
    match feature {
        FeatureType::None => true,
        FeatureType::Ice => tile.is_water(),
        FeatureType::Reef => tile.terrain == TerrainType::Shore,
        FeatureType::Oasis => tile.terrain == TerrainType::Desert && !tile.is_hills,
        FeatureType::Marsh => tile.terrain == TerrainType::Grass && !tile.is_hills,
        FeatureType::Rainforest => tile.terrain == TerrainType::Plains,
        FeatureType::Forest => matches!(
            tile.terrain,
            TerrainType::Tundra | TerrainType::Grass | TerrainType::Plains
        ),
        FeatureType::Mountains => !tile.is_water(),
    }
}

/// `placed` out of `total` is still at or under `percent`
fn within_share(placed: usize, percent: usize, total: usize) -> bool {
    placed * 100 <= percent * total
}
