use bevy::prelude::*;

use super::*;

fn sample_points() -> impl Iterator<Item = HexPoint> {
    (-12..12).flat_map(|y| (-12..12).map(move |x| HexPoint::new(x, y)))
}

#[test]
fn test_offset_to_cube_known_values() {
    assert_eq!(HexPoint::new(0, 0).to_cube(), HexCube::new(0, 0, 0));
    assert_eq!(HexPoint::new(3, 1).to_cube(), HexCube::new(2, -3, 1));
    assert_eq!(HexPoint::new(3, 2).to_cube(), HexCube::new(2, -4, 2));
    assert_eq!(HexPoint::new(0, -1).to_cube(), HexCube::new(0, 1, -1));
}

#[test]
fn test_offset_cube_round_trip() {
    for point in sample_points() {
        let cube = point.to_cube();
        assert!(cube.is_valid(), "cube {:?} breaks q + r + s == 0", cube);
        assert_eq!(HexPoint::from_cube(cube), point);
        assert_eq!(cube.to_offset(), point);
    }
}

#[test]
fn test_hexx_conversion_round_trip() {
    for point in sample_points() {
        let cube = point.to_cube();
        let hex: hexx::Hex = cube.into();
        assert_eq!(HexCube::from(hex), cube);
    }
}

#[test]
fn test_distance_is_a_metric() {
    let points: Vec<HexCube> = (-4..4)
        .flat_map(|y| (-4..4).map(move |x| HexPoint::new(x, y).to_cube()))
        .collect();

    for &a in &points {
        assert_eq!(a.distance(a), 0);
        for &b in &points {
            let ab = a.distance(b);
            assert_eq!(ab, b.distance(a));
            if a != b {
                assert!(ab > 0);
            }
            for &c in points.iter().step_by(5) {
                assert!(a.distance(c) <= ab + b.distance(c));
            }
        }
    }
}

#[test]
fn test_distance_matches_max_axis_delta() {
    let a = HexCube::new(2, -5, 3);
    let b = HexCube::new(-1, 1, 0);
    assert_eq!(a.distance(b), 6);
}

#[test]
fn test_direction_offsets_are_unit_cubes() {
    for direction in HexDirection::ALL {
        let offset = direction.offset();
        assert!(offset.is_valid());
        assert_eq!(offset.distance(HexCube::ZERO), 1);
        assert_eq!(offset + direction.opposite().offset(), HexCube::ZERO);
    }
}

#[test]
fn test_neighbors_are_adjacent_and_distinct() {
    for point in sample_points() {
        let neighbors = point.neighbors();
        for (i, neighbor) in neighbors.iter().enumerate() {
            assert_eq!(point.distance(*neighbor), 1);
            assert_eq!(*neighbor, point.neighbor(HexDirection::ALL[i], 1));
            assert!(!neighbors[i + 1..].contains(neighbor));
        }
    }
}

#[test]
fn test_neighbor_symmetry() {
    for a in sample_points() {
        for b in a.neighbors() {
            assert!(
                b.neighbors().contains(&a),
                "{:?} lists {:?} but not the reverse",
                a,
                b
            );
        }
    }
}

#[test]
fn test_neighbor_steps() {
    let start = HexPoint::new(5, 5);
    for direction in HexDirection::ALL {
        for steps in 0..6 {
            let target = start.neighbor(direction, steps);
            assert_eq!(start.distance(target), steps);
        }
        let there = start.neighbor(direction, 3);
        assert_eq!(there.neighbor(direction.opposite(), 3), start);
    }
}

#[test]
fn test_extreme_steps_wrap_instead_of_overflowing() {
    let grid = crate::map::grid::Grid::new(8, 8);
    let start = HexPoint::new(3, 3);
    for direction in HexDirection::ALL {
        for steps in [i32::MAX, i32::MIN, i32::MAX / 2 + 1] {
            let target = start.neighbor(direction, steps);
            assert!(!grid.valid(target), "{:?} x {} landed on the grid", direction, steps);
        }
    }
    // Edges of the coordinate range still convert both ways
    for point in [HexPoint::new(i32::MAX, i32::MAX), HexPoint::new(i32::MIN, i32::MIN)] {
        assert_eq!(HexPoint::from_cube(point.to_cube()), point);
    }
}

#[test]
fn test_same_row_neighbors() {
    // East-west moves keep the row; the others change it
    let point = HexPoint::new(4, 3);
    assert_eq!(point.neighbor(HexDirection::SouthEast, 1), HexPoint::new(5, 3));
    assert_eq!(point.neighbor(HexDirection::NorthWest, 1), HexPoint::new(3, 3));
    assert_eq!(point.neighbor(HexDirection::North, 1).y, 2);
    assert_eq!(point.neighbor(HexDirection::South, 1).y, 4);
}

#[test]
fn test_screen_round_trip_hits_same_cell() {
    let projection = Projection::new(10.0, Vec2::new(40.0, -25.0));
    for point in sample_points() {
        let center = point.to_screen(&projection);
        assert_eq!(screen_to_hex(center.x, center.y, &projection), point);

        // Anything well inside the inner radius still resolves to the same cell
        let nudge = projection.hex_size() * 0.4;
        for (dx, dy) in [(nudge, 0.0), (-nudge, 0.0), (0.0, nudge), (0.0, -nudge)] {
            assert_eq!(
                screen_to_hex(center.x + dx, center.y + dy, &projection),
                point
            );
        }
    }
}

#[test]
fn test_screen_layout_rows_are_horizontal() {
    let projection = Projection::default();
    let a = HexPoint::new(2, 6).to_screen(&projection);
    let b = HexPoint::new(3, 6).to_screen(&projection);
    assert!((a.y - b.y).abs() < 1e-4);
    let spacing = 3.0_f32.sqrt() * projection.hex_size();
    assert!(((b.x - a.x).abs() - spacing).abs() < 1e-3);
}

#[test]
fn test_projection_origin() {
    let projection = Projection::new(12.0, Vec2::new(5.0, 7.0));
    let origin = HexPoint::new(0, 0).to_screen(&projection);
    assert!((origin - Vec2::new(5.0, 7.0)).length() < 1e-4);
}
