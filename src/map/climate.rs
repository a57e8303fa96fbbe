use crate::constants::{
    COASTAL_WARMING_DISTANCE, SUB_POLAR_MAX_LATITUDE, SUB_TROPIC_MAX_LATITUDE,
    TEMPERATE_MAX_LATITUDE, TROPIC_MAX_LATITUDE,
};
use crate::map::coast::CoastalDistanceField;
use crate::map::grid::Grid;
use crate::map::tiles::ClimateZone;

/// Distance from the equator row, 0.0 at the middle and 1.0 at the edges
pub fn latitude(y: u32, rows: u32) -> f64 {
    let half = rows as f64 / 2.0;
    if half <= 0.0 {
        return 1.0;
    }
    ((half - y as f64).abs() / half).min(1.0)
}

/// Climate band for a latitude in `[0, 1]`
pub fn zone_for_latitude(latitude: f64) -> ClimateZone {
    if latitude < TROPIC_MAX_LATITUDE {
        ClimateZone::Tropic
    } else if latitude < SUB_TROPIC_MAX_LATITUDE {
        ClimateZone::SubTropic
    } else if latitude < TEMPERATE_MAX_LATITUDE {
        ClimateZone::Temperate
    } else if latitude < SUB_POLAR_MAX_LATITUDE {
        ClimateZone::SubPolar
    } else {
        ClimateZone::Polar
    }
}

/// Base zone per row; the first and last rows are always polar
pub fn assign_base_zones(rows: u32) -> Vec<ClimateZone> {
    (0..rows)
        .map(|y| {
            if y == 0 || y + 1 == rows {
                ClimateZone::Polar
            } else {
                zone_for_latitude(latitude(y, rows))
            }
        })
        .collect()
}

/// Warms every cell within the coastal band by exactly one step
pub fn refine_near_coast(
    zones: &[ClimateZone],
    distances: &CoastalDistanceField,
) -> Vec<ClimateZone> {
    let cols = distances.cols() as usize;
    distances
        .distances()
        .iter()
        .enumerate()
        .map(|(index, distance)| {
            let base = zones[index / cols];
            if *distance < COASTAL_WARMING_DISTANCE {
                base.warmer()
            } else {
                base
            }
        })
        .collect()
}

/// Writes the refined climate zone of every cell into `grid`
pub fn apply_climate(grid: &mut Grid, distances: &CoastalDistanceField) {
    let zones = assign_base_zones(grid.rows());
    let refined = refine_near_coast(&zones, distances);
    for (tile, zone) in grid.tiles_mut().iter_mut().zip(refined) {
        tile.climate_zone = zone;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::hex::HexPoint;
    use crate::test_utils::grid_from_mask;

    #[test]
    fn test_band_edges() {
        assert_eq!(zone_for_latitude(0.0), ClimateZone::Tropic);
        assert_eq!(zone_for_latitude(0.19), ClimateZone::Tropic);
        assert_eq!(zone_for_latitude(0.2), ClimateZone::SubTropic);
        assert_eq!(zone_for_latitude(0.4), ClimateZone::Temperate);
        assert_eq!(zone_for_latitude(0.65), ClimateZone::SubPolar);
        assert_eq!(zone_for_latitude(0.9), ClimateZone::Polar);
        assert_eq!(zone_for_latitude(1.0), ClimateZone::Polar);
    }

    #[test]
    fn test_edge_rows_forced_polar() {
        for rows in [2, 3, 10, 41] {
            let zones = assign_base_zones(rows);
            assert_eq!(zones.len(), rows as usize);
            assert_eq!(zones[0], ClimateZone::Polar);
            assert_eq!(zones[rows as usize - 1], ClimateZone::Polar);
        }
    }

    #[test]
    fn test_zones_get_colder_away_from_equator() {
        for rows in [10, 25, 40, 101] {
            let zones = assign_base_zones(rows);
            let equator = (rows / 2) as usize;

            for y in equator..zones.len() - 1 {
                assert!(
                    zones[y + 1].band() <= zones[y].band(),
                    "rows={} y={} went warmer going south",
                    rows,
                    y
                );
            }
            for y in (1..=equator).rev() {
                assert!(
                    zones[y - 1].band() <= zones[y].band(),
                    "rows={} y={} went warmer going north",
                    rows,
                    y
                );
            }
            assert_eq!(zones[equator], ClimateZone::Tropic);
        }
    }

    #[test]
    fn test_coast_warms_one_step() {
        let grid = grid_from_mask(&[
            "~~~~~~~~",
            "~######~",
            "~######~",
            "~######~",
            "~######~",
            "~######~",
            "~~~~~~~~",
        ]);
        let distances = CoastalDistanceField::compute(&grid);
        let zones = assign_base_zones(grid.rows());
        let refined = refine_near_coast(&zones, &distances);

        for point in grid.points() {
            let index = grid.index_of(point).unwrap();
            let base = zones[point.y as usize];
            let distance = distances.get(point).unwrap();
            if distance < 2 {
                assert_eq!(refined[index], base.warmer());
            } else {
                assert_eq!(refined[index], base);
            }
        }
    }

    #[test]
    fn test_apply_climate_sets_every_tile() {
        let mut grid = grid_from_mask(&["####", "####", "#~##", "####", "####"]);
        let distances = CoastalDistanceField::compute(&grid);
        apply_climate(&mut grid, &distances);

        // Far from the lake the base zone stands; next to it the zone is warmer
        let base = assign_base_zones(5);
        assert_eq!(
            grid.climate_zone_at(HexPoint::new(1, 2)).unwrap(),
            base[2].warmer()
        );
        assert_eq!(grid.climate_zone_at(HexPoint::new(3, 0)).unwrap(), base[0]);
    }
}
