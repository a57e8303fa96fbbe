//! Testing utilities for the map generator
//!
//! Helpers for building small grids by hand so individual phases can be
//! exercised in isolation.

use crate::map::grid::Grid;
use crate::map::hex::HexPoint;
use crate::map::tiles::{TerrainType, Tile};

/// Builds a grid from text rows: `~` is water, anything else is plains land
pub fn grid_from_mask(rows: &[&str]) -> Grid {
    let cols = rows.first().map_or(0, |row| row.chars().count()) as u32;
    let mut grid = Grid::new(cols, rows.len() as u32);

    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.chars().count() as u32, cols, "ragged mask row {}", y);
        for (x, cell) in row.chars().enumerate() {
            let terrain = if cell == '~' {
                TerrainType::Water
            } else {
                TerrainType::Plains
            };
            grid.set_terrain(HexPoint::new(x as i32, y as i32), terrain)
                .unwrap();
        }
    }

    grid
}

/// Builds a grid from terrain glyphs (see [`TerrainType::glyph`]); `^` marks mountain plains
pub fn grid_from_glyphs(rows: &[&str]) -> Grid {
    let mut grid = grid_from_mask(rows);
    for (y, row) in rows.iter().enumerate() {
        for (x, cell) in row.chars().enumerate() {
            let point = HexPoint::new(x as i32, y as i32);
            let tile = grid.tile_at_mut(point).unwrap();
            *tile = tile_for_glyph(cell);
        }
    }
    grid
}

fn tile_for_glyph(glyph: char) -> Tile {
    let mut tile = Tile::default();
    match glyph {
        '^' => {
            tile.terrain = TerrainType::Plains;
            tile.feature = crate::map::tiles::FeatureType::Mountains;
        }
        other => {
            tile.terrain = TerrainType::ALL
                .into_iter()
                .find(|terrain| terrain.glyph() == other)
                .unwrap_or_else(|| panic!("no terrain for glyph '{}'", other));
        }
    }
    tile
}

/// Terrain of every tile in row-major order
pub fn terrains(grid: &Grid) -> Vec<TerrainType> {
    grid.tiles().iter().map(|tile| tile.terrain).collect()
}
