//! Name-tagged, row-major copy of a grid for handing to other tools.

use serde::{Deserialize, Serialize};

use crate::map::error::MapError;
use crate::map::grid::Grid;
use crate::map::tiles::Tile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub terrain: String,
    pub feature: String,
    pub resource: String,
    pub climate: String,
    #[serde(rename = "isHills")]
    pub is_hills: bool,
}

impl From<&Tile> for TileRecord {
    fn from(tile: &Tile) -> Self {
        Self {
            terrain: tile.terrain.name().to_string(),
            feature: tile.feature.name().to_string(),
            resource: tile.resource.name().to_string(),
            climate: tile.climate_zone.name().to_string(),
            is_hills: tile.is_hills,
        }
    }
}

impl TryFrom<&TileRecord> for Tile {
    type Error = MapError;

    fn try_from(record: &TileRecord) -> Result<Self, Self::Error> {
        Ok(Tile {
            terrain: record.terrain.parse()?,
            feature: record.feature.parse()?,
            resource: record.resource.parse()?,
            climate_zone: record.climate.parse()?,
            is_hills: record.is_hills,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub cols: u32,
    pub rows: u32,
    pub tiles: Vec<TileRecord>,
}

impl Grid {
    pub fn to_snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cols: self.cols(),
            rows: self.rows(),
            tiles: self.tiles().iter().map(TileRecord::from).collect(),
        }
    }

    /// Rebuilds a grid, rejecting unknown or misplaced names and wrong tile counts
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Grid, MapError> {
        let expected = snapshot.cols as usize * snapshot.rows as usize;
        if snapshot.tiles.len() != expected {
            return Err(MapError::SnapshotShape {
                cols: snapshot.cols,
                rows: snapshot.rows,
                expected,
                actual: snapshot.tiles.len(),
            });
        }

        let tiles = snapshot
            .tiles
            .iter()
            .map(Tile::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Grid::from_tiles(snapshot.cols, snapshot.rows, tiles))
    }
}

impl From<Grid> for GridSnapshot {
    fn from(grid: Grid) -> Self {
        grid.to_snapshot()
    }
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = MapError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        Grid::from_snapshot(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::hex::HexPoint;
    use crate::map::tiles::{ClimateZone, FeatureType, ResourceType, TerrainType};
    use crate::test_utils::grid_from_glyphs;

    fn sample_grid() -> Grid {
        let mut grid = grid_from_glyphs(&["~-p", "gs^"]);
        grid.set_hills(HexPoint::new(1, 1), true).unwrap();
        grid.set_resource(HexPoint::new(2, 0), ResourceType::Wheat)
            .unwrap();
        grid.set_climate_zone(HexPoint::new(0, 1), ClimateZone::Temperate)
            .unwrap();
        grid
    }

    #[test]
    fn test_snapshot_uses_names() {
        let snapshot = sample_grid().to_snapshot();
        assert_eq!((snapshot.cols, snapshot.rows), (3, 2));
        assert_eq!(snapshot.tiles.len(), 6);

        let wheat = &snapshot.tiles[2];
        assert_eq!(wheat.terrain, "plains");
        assert_eq!(wheat.resource, "wheat");
        assert_eq!(wheat.feature, "none");

        let mountain = &snapshot.tiles[5];
        assert_eq!(mountain.feature, "mountains");
        assert!(snapshot.tiles[4].is_hills);
        assert_eq!(snapshot.tiles[3].climate, "temperate");
    }

    #[test]
    fn test_snapshot_restores_grid() {
        let grid = sample_grid();
        assert_eq!(Grid::from_snapshot(&grid.to_snapshot()).unwrap(), grid);
    }

    #[test]
    fn test_json_field_names() {
        let snapshot = sample_grid().to_snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();
        let first = &json["tiles"][0];
        assert_eq!(first["terrain"], "water");
        assert_eq!(first["isHills"], false);
        assert_eq!(first["climate"], "polar");
        assert!(first.get("is_hills").is_none());

        let parsed: GridSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_unknown_name_rejected() {
        let mut snapshot = sample_grid().to_snapshot();
        snapshot.tiles[0].terrain = "lava".to_string();
        assert_eq!(
            Grid::from_snapshot(&snapshot),
            Err(MapError::UnknownIdentifier {
                category: TerrainType::CATEGORY,
                value: "lava".to_string(),
            })
        );
    }

    #[test]
    fn test_name_from_other_category_rejected() {
        let mut snapshot = sample_grid().to_snapshot();
        snapshot.tiles[1].feature = "desert".to_string();
        assert_eq!(
            Grid::from_snapshot(&snapshot),
            Err(MapError::TypeMismatch {
                expected: FeatureType::CATEGORY,
                found: TerrainType::CATEGORY,
                value: "desert".to_string(),
            })
        );
    }

    #[test]
    fn test_wrong_tile_count_rejected() {
        let mut snapshot = sample_grid().to_snapshot();
        snapshot.tiles.pop();
        assert_eq!(
            Grid::from_snapshot(&snapshot),
            Err(MapError::SnapshotShape {
                cols: 3,
                rows: 2,
                expected: 6,
                actual: 5,
            })
        );
    }

    #[test]
    fn test_grid_deserialize_checks_shape() {
        let result = serde_json::from_str::<Grid>(r#"{"cols":3,"rows":3,"tiles":[]}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("snapshot holds 0 tiles"), "{}", message);
    }

    #[test]
    fn test_grid_serializes_as_snapshot() {
        let mut grid = Grid::new(2, 2);
        grid.set_feature(HexPoint::new(1, 0), FeatureType::Ice).unwrap();

        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json, serde_json::to_value(grid.to_snapshot()).unwrap());
        assert_eq!(json["tiles"][1]["feature"], "ice");

        let parsed: Grid = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, grid);
        assert_eq!(parsed.tile_at(HexPoint::new(1, 1)).unwrap(), &Tile::default());
    }
}
