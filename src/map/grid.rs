use serde::{Deserialize, Serialize};

use crate::map::error::MapError;
use crate::map::hex::HexPoint;
use crate::map::snapshot::GridSnapshot;
use crate::map::tiles::{ClimateZone, FeatureType, ResourceType, TerrainType, Tile};

/// Rectangular `cols x rows` store of tiles, row-major.
///
/// Dimensions are fixed at construction. Every accessor taking a [`HexPoint`]
/// fails with [`MapError::OutOfBounds`] instead of clamping. Serde goes
/// through [`GridSnapshot`](crate::map::GridSnapshot), so a decoded grid
/// always holds `cols * rows` tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridSnapshot", into = "GridSnapshot")]
pub struct Grid {
    cols: u32,
    rows: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            tiles: vec![Tile::default(); cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn valid(&self, point: HexPoint) -> bool {
        point.x >= 0 && point.y >= 0 && (point.x as u32) < self.cols && (point.y as u32) < self.rows
    }

    /// Row-major index of a point
    pub fn index_of(&self, point: HexPoint) -> Result<usize, MapError> {
        if self.valid(point) {
            Ok(point.y as usize * self.cols as usize + point.x as usize)
        } else {
            Err(MapError::OutOfBounds {
                point,
                cols: self.cols,
                rows: self.rows,
            })
        }
    }

    pub fn point_at(&self, index: usize) -> HexPoint {
        let cols = self.cols as usize;
        HexPoint::new((index % cols) as i32, (index / cols) as i32)
    }

    /// Every valid point in row-major order
    pub fn points(&self) -> impl Iterator<Item = HexPoint> + use<> {
        let (cols, rows) = (self.cols as i32, self.rows as i32);
        (0..rows).flat_map(move |y| (0..cols).map(move |x| HexPoint::new(x, y)))
    }

    /// Neighbours of `point` that lie inside the grid, in direction order
    pub fn neighbors_in_bounds(&self, point: HexPoint) -> impl Iterator<Item = HexPoint> + '_ {
        point
            .neighbors()
            .into_iter()
            .filter(move |neighbor| self.valid(*neighbor))
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile_at(&self, point: HexPoint) -> Result<&Tile, MapError> {
        let index = self.index_of(point)?;
        Ok(&self.tiles[index])
    }

    pub fn tile_at_mut(&mut self, point: HexPoint) -> Result<&mut Tile, MapError> {
        let index = self.index_of(point)?;
        Ok(&mut self.tiles[index])
    }

    pub fn terrain_at(&self, point: HexPoint) -> Result<TerrainType, MapError> {
        Ok(self.tile_at(point)?.terrain)
    }

    pub fn feature_at(&self, point: HexPoint) -> Result<FeatureType, MapError> {
        Ok(self.tile_at(point)?.feature)
    }

    pub fn resource_at(&self, point: HexPoint) -> Result<ResourceType, MapError> {
        Ok(self.tile_at(point)?.resource)
    }

    pub fn climate_zone_at(&self, point: HexPoint) -> Result<ClimateZone, MapError> {
        Ok(self.tile_at(point)?.climate_zone)
    }

    pub fn is_hills_at(&self, point: HexPoint) -> Result<bool, MapError> {
        Ok(self.tile_at(point)?.is_hills)
    }

    pub fn is_land(&self, point: HexPoint) -> Result<bool, MapError> {
        Ok(!self.tile_at(point)?.is_water())
    }

    pub fn set_terrain(&mut self, point: HexPoint, terrain: TerrainType) -> Result<(), MapError> {
        self.tile_at_mut(point)?.terrain = terrain;
        Ok(())
    }

    pub fn set_feature(&mut self, point: HexPoint, feature: FeatureType) -> Result<(), MapError> {
        self.tile_at_mut(point)?.feature = feature;
        Ok(())
    }

    pub fn set_resource(
        &mut self,
        point: HexPoint,
        resource: ResourceType,
    ) -> Result<(), MapError> {
        self.tile_at_mut(point)?.resource = resource;
        Ok(())
    }

    pub fn set_hills(&mut self, point: HexPoint, is_hills: bool) -> Result<(), MapError> {
        self.tile_at_mut(point)?.is_hills = is_hills;
        Ok(())
    }

    pub fn set_climate_zone(&mut self, point: HexPoint, zone: ClimateZone) -> Result<(), MapError> {
        self.tile_at_mut(point)?.climate_zone = zone;
        Ok(())
    }

    /// True when any in-bounds neighbour is land
    pub fn touches_land(&self, point: HexPoint) -> bool {
        self.neighbors_in_bounds(point)
            .any(|neighbor| !self.tiles[self.flat_index(neighbor)].is_water())
    }

    /// Index of a point already known to be valid
    pub(crate) fn flat_index(&self, point: HexPoint) -> usize {
        point.y as usize * self.cols as usize + point.x as usize
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub(crate) fn from_tiles(cols: u32, rows: u32, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), cols as usize * rows as usize);
        Self { cols, rows, tiles }
    }
}
