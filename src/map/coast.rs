use std::collections::VecDeque;

use bevy::prelude::*;
use rand::Rng;

use crate::constants::{COAST_EXPANSION_CHANCE, COAST_EXPANSION_PASSES};
use crate::map::grid::Grid;
use crate::map::hex::HexPoint;
use crate::map::tiles::TerrainType;

/// Per-cell hex-step distance to the nearest water cell.
///
/// Water cells hold 0. Cells with no path to water keep [`CoastalDistanceField::UNREACHABLE`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoastalDistanceField {
    cols: u32,
    rows: u32,
    distances: Vec<u32>,
}

impl CoastalDistanceField {
    pub const UNREACHABLE: u32 = u32::MAX;

    /// Multi-source breadth-first search seeded from every water cell of `grid`
    pub fn compute(grid: &Grid) -> Self {
        let mut distances = vec![Self::UNREACHABLE; grid.len()];
        let mut queue = VecDeque::new();

        for point in grid.points() {
            let index = grid.flat_index(point);
            if grid.tiles()[index].is_water() {
                distances[index] = 0;
                queue.push_back(point);
            }
        }

        while let Some(current) = queue.pop_front() {
            let next = distances[grid.flat_index(current)] + 1;
            for neighbor in grid.neighbors_in_bounds(current) {
                let index = grid.flat_index(neighbor);
                if distances[index] > next {
                    distances[index] = next;
                    queue.push_back(neighbor);
                }
            }
        }

        Self {
            cols: grid.cols(),
            rows: grid.rows(),
            distances,
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn distances(&self) -> &[u32] {
        &self.distances
    }

    /// Distance at `point`, or `None` outside the field
    pub fn get(&self, point: HexPoint) -> Option<u32> {
        if point.x < 0 || point.y < 0 || point.x as u32 >= self.cols || point.y as u32 >= self.rows
        {
            return None;
        }
        self.distances
            .get(point.y as usize * self.cols as usize + point.x as usize)
            .copied()
    }

    pub fn is_reachable(&self, point: HexPoint) -> bool {
        self.get(point)
            .is_some_and(|distance| distance != Self::UNREACHABLE)
    }
}

/// Shorthand for [`CoastalDistanceField::compute`]
pub fn compute_distance_to_coast(grid: &Grid) -> CoastalDistanceField {
    CoastalDistanceField::compute(grid)
}

/// Grows the shallow shelf out into open ocean.
///
/// Each pass collects the ocean cells that win a [`COAST_EXPANSION_CHANCE`]
/// draw against one of their shore neighbours, then turns them all to shore
/// at once. Returns the number of cells converted.
pub fn expand_coasts<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> usize {
    let mut expanded = 0;

    for _ in 0..COAST_EXPANSION_PASSES {
        let grown: Vec<usize> = grid
            .points()
            .filter(|&point| {
                grid.tiles()[grid.flat_index(point)].terrain == TerrainType::Ocean
                    && grid.neighbors_in_bounds(point).any(|neighbor| {
                        grid.tiles()[grid.flat_index(neighbor)].terrain == TerrainType::Shore
                            && rng.random_bool(COAST_EXPANSION_CHANCE)
                    })
            })
            .map(|point| grid.flat_index(point))
            .collect();

        for &index in &grown {
            grid.tiles_mut()[index].terrain = TerrainType::Shore;
        }
        expanded += grown.len();
    }

    debug!("Coast expansion turned {} ocean tiles to shore", expanded);
    expanded
}
