use crate::map::grid::Grid;
use crate::map::tiles::Tile;

/// Text rendering of a grid, one line per row.
///
/// Odd rows are shifted right by one column to show the hex stagger.
/// Mountains print as `^`, hilly tiles use the uppercase terrain glyph.
pub fn render_ascii(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.cols() as usize * 2 + 2) * grid.rows() as usize);

    for (y, row) in grid.tiles().chunks(grid.cols().max(1) as usize).enumerate() {
        if y % 2 == 1 {
            out.push(' ');
        }
        for (x, tile) in row.iter().enumerate() {
            if x > 0 {
                out.push(' ');
            }
            out.push(tile_glyph(tile));
        }
        out.push('\n');
    }

    out
}

fn tile_glyph(tile: &Tile) -> char {
    if tile.is_mountain() {
        '^'
    } else if tile.is_hills {
        tile.terrain.glyph().to_ascii_uppercase()
    } else {
        tile.terrain.glyph()
    }
}
