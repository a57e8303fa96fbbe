use super::*;
use crate::map::features::supports;
use crate::map::hex::HexPoint;
use crate::map::tiles::FeatureType;

fn small(seed: u64) -> MapOptions {
    MapOptions {
        land_percentage: 0.4,
        ..MapOptions::default().with_size(10, 10).with_seed(seed)
    }
}

#[test]
fn test_ten_by_ten_map() {
    let grid = generate_map(small(7), None).unwrap();

    for y in 0..10 {
        for x in 0..10 {
            assert!(grid.valid(HexPoint::new(x, y)));
        }
    }
    assert!(!grid.valid(HexPoint::new(10, 0)));
    assert!(!grid.valid(HexPoint::new(0, 10)));

    for tile in grid.tiles() {
        // Raw water never survives the biome phase
        assert_ne!(tile.terrain, TerrainType::Water);
        assert!(supports(tile, tile.feature), "{:?}", tile);
    }
}

#[test]
fn test_edge_rows_are_polar() {
    let generated = MapGeneration::new(small(3)).unwrap().finish();
    let grid = &generated.grid;
    for x in 0..10 {
        for y in [0, 9] {
            let point = HexPoint::new(x, y);
            let distance = generated.coastal_distance.get(point).unwrap();
            let zone = grid.climate_zone_at(point).unwrap();
            if distance >= crate::constants::COASTAL_WARMING_DISTANCE {
                assert_eq!(zone, crate::map::tiles::ClimateZone::Polar);
            } else {
                assert_eq!(zone, crate::map::tiles::ClimateZone::SubPolar);
            }
        }
    }
}

#[test]
fn test_land_share_matches_request() {
    let generated = MapGeneration::new(small(99).with_size(40, 30))
        .unwrap()
        .finish();
    let land = generated
        .heightmap
        .count_at_or_above(generated.sea_level);
    // floor(1200 * 0.4) cells, barring exact ties at the threshold
    assert!(land >= 480, "{} land cells", land);
    assert!(land < 490, "{} land cells", land);
}

#[test]
fn test_same_seed_same_map() {
    let a = generate_map(small(1234), None).unwrap();
    let b = generate_map(small(1234), None).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_different_seed_different_map() {
    let options = MapOptions::default().with_size(32, 24);
    let a = generate_map(options.clone().with_seed(1), None).unwrap();
    let b = generate_map(options.with_seed(2), None).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_mountains_only_on_land() {
    let grid = generate_map(MapOptions::default().with_size(30, 20), None).unwrap();
    let mut mountains = 0;
    for tile in grid.tiles() {
        if tile.is_mountain() {
            mountains += 1;
            assert!(!tile.is_water());
        }
    }
    assert!(mountains > 0);
}

#[test]
fn test_progress_reports_every_phase_in_order() {
    let mut seen = Vec::new();
    let mut record = |progress: &GenerationProgress| seen.push(progress.clone());
    generate_map(
        small(5),
        Some(&mut record as &mut dyn FnMut(&GenerationProgress)),
    )
    .unwrap();

    let phases: Vec<GenerationPhase> = seen.iter().map(|p| p.phase).collect();
    assert_eq!(phases, GenerationPhase::ALL.to_vec());
    for pair in seen.windows(2) {
        assert!(pair[0].fraction < pair[1].fraction);
    }
    assert_eq!(seen.last().unwrap().fraction, 1.0);
}

#[test]
fn test_stepwise_matches_one_shot() {
    let mut generation = MapGeneration::new(small(77)).unwrap();
    assert_eq!(generation.pending_phase(), Some(GenerationPhase::Heightmap));
    let first = generation.next().unwrap();
    assert_eq!(first.phase, GenerationPhase::Heightmap);
    assert_eq!(
        generation.pending_phase(),
        Some(GenerationPhase::CoastalDistance)
    );
    assert!(!generation.is_complete());

    let stepped = generation.finish().into_grid();
    let direct = generate_map(small(77), None).unwrap();
    assert_eq!(stepped, direct);
}

#[test]
fn test_result_only_after_last_phase() {
    let mut generation = MapGeneration::new(small(21)).unwrap();
    generation.next();
    assert!(generation.take_result().is_none());

    for _ in generation.by_ref() {}
    let map = generation.take_result().unwrap();
    assert_eq!(map.grid, generate_map(small(21), None).unwrap());
    assert_eq!(map.heightmap.values().len(), 100);
}

#[test]
fn test_exhausted_generation_yields_nothing() {
    let mut generation = MapGeneration::new(small(8)).unwrap();
    assert_eq!(generation.by_ref().count(), GenerationPhase::ALL.len());
    assert!(generation.is_complete());
    assert!(generation.next().is_none());
}

#[test]
fn test_blending_can_be_disabled() {
    let options = MapOptions {
        blend: false,
        ..MapOptions::default().with_size(24, 16)
    };
    let unblended = generate_map(options.clone(), None).unwrap();
    let full = generate_map(MapOptions { blend: true, ..options }, None).unwrap();

    // Blending only retypes land; water, mountains, hills and climate agree
    for point in full.points() {
        let a = unblended.tile_at(point).unwrap();
        let b = full.tile_at(point).unwrap();
        assert_eq!(a.is_water(), b.is_water());
        assert_eq!(a.is_mountain(), b.is_mountain());
        assert_eq!(a.is_hills, b.is_hills);
        assert_eq!(a.climate_zone, b.climate_zone);
    }
    assert_eq!(blend_terrain(&mut full.clone()), 0);
}

#[test]
fn test_generated_map_carries_features() {
    let grid = generate_map(MapOptions::default().with_size(40, 30).with_seed(3), None).unwrap();
    let count = |feature: FeatureType| grid.tiles().iter().filter(|t| t.feature == feature).count();

    assert!(count(FeatureType::Forest) > 0);
    for point in grid.points() {
        let tile = grid.tile_at(point).unwrap();
        if tile.is_water() && (point.y == 0 || point.y == 29) {
            assert_eq!(tile.feature, FeatureType::Ice);
        }
        assert!(supports(tile, tile.feature), "{:?} at {:?}", tile, point);
    }
}

#[test]
fn test_coast_expansion_never_strands_ocean_by_land() {
    let grid = generate_map(MapOptions::archipelago().with_size(40, 30), None).unwrap();
    let shore = grid
        .tiles()
        .iter()
        .filter(|t| t.terrain == TerrainType::Shore)
        .count();
    assert!(shore > 0);
    for point in grid.points() {
        if grid.terrain_at(point).unwrap() == TerrainType::Ocean {
            assert!(!grid.touches_land(point));
        }
    }
}

#[test]
fn test_every_map_type_generates() {
    for map_type in [MapType::Continents, MapType::Pangaea, MapType::Archipelago] {
        let options = MapOptions::for_map_type(map_type).with_size(20, 12);
        assert_eq!(options.map_type, map_type);
        let grid = generate_map(options, None).unwrap();
        assert_eq!(grid.len(), 240);
    }
}

#[test]
fn test_single_cell_map() {
    let grid = generate_map(small(1).with_size(1, 1), None).unwrap();
    assert_eq!(grid.len(), 1);
}

#[test]
fn test_full_land_map_has_no_water() {
    let options = MapOptions {
        land_percentage: 1.0,
        ..small(11)
    };
    let grid = generate_map(options, None).unwrap();
    assert!(grid.tiles().iter().all(|tile| !tile.is_water()));
}

#[test]
fn test_invalid_options_rejected() {
    let cases = [
        small(1).with_size(0, 10),
        small(1).with_size(10, 0),
        MapOptions {
            land_percentage: 0.0,
            ..small(1)
        },
        MapOptions {
            land_percentage: 1.5,
            ..small(1)
        },
        MapOptions {
            land_percentage: f64::NAN,
            ..small(1)
        },
        MapOptions {
            mountain_percentage: -0.1,
            ..small(1)
        },
        MapOptions {
            shelf_percentage: 2.0,
            ..small(1)
        },
        MapOptions {
            high_elevation: f64::NAN,
            ..small(1)
        },
    ];
    for options in cases {
        assert!(
            matches!(
                generate_map(options.clone(), None),
                Err(MapError::InvalidOptions(_))
            ),
            "{:?} was accepted",
            options
        );
    }
}

#[test]
fn test_phase_sequence() {
    assert_eq!(
        GenerationPhase::Heightmap.next(),
        Some(GenerationPhase::CoastalDistance)
    );
    assert_eq!(
        GenerationPhase::Biomes.next(),
        Some(GenerationPhase::Coasts)
    );
    assert_eq!(
        GenerationPhase::Blending.next(),
        Some(GenerationPhase::Features)
    );
    assert_eq!(GenerationPhase::Features.next(), None);
    assert_eq!(GenerationPhase::Features.completed_fraction(), 1.0);
}
