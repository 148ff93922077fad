//! Training-grid generation around a city center.

use aquaguard_types::GridCell;

/// Rough degrees per kilometer used for grid construction (1 km ≈ 1/110°).
pub const DEG_PER_KM: f64 = 1.0 / 110.0;

/// Tile a `rows × cols` grid of square cells around a center point.
///
/// Cells are emitted in row-major order and tile the area with no
/// overlap or gap by construction: each cell's north edge is the next
/// row's south edge, and likewise for columns.
pub fn make_grid(
    center_lat: f64,
    center_lng: f64,
    cell_size_km: f64,
    rows: usize,
    cols: usize,
) -> Vec<GridCell> {
    let step = cell_size_km * DEG_PER_KM;
    let half_rows = rows as f64 / 2.0;
    let half_cols = cols as f64 / 2.0;

    let mut cells = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            let south = center_lat - (half_rows - i as f64) * step;
            let west = center_lng - (half_cols - j as f64) * step;
            cells.push(GridCell {
                north: south + step,
                south,
                east: west + step,
                west,
            });
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_grid_tiles_without_gaps() {
        let cells = make_grid(13.0827, 80.2707, 1.0, 2, 2);
        assert_eq!(cells.len(), 4);

        let step = DEG_PER_KM;
        for cell in &cells {
            assert!((cell.north - cell.south - step).abs() < 1e-12);
            assert!((cell.east - cell.west - step).abs() < 1e-12);
        }

        // Row-major: first row is the southern one; adjacent rows share
        // an edge, as do adjacent columns.
        assert!((cells[0].north - cells[2].south).abs() < 1e-12);
        assert!((cells[0].east - cells[1].west).abs() < 1e-12);
    }

    #[test]
    fn grid_is_centered_on_the_given_point() {
        let cells = make_grid(10.0, 20.0, 1.0, 2, 2);
        // With an even row count the center sits on the shared edge.
        assert!((cells[0].north - 10.0).abs() < 1e-12);
        assert!((cells[1].west - 20.0).abs() < 1e-12);
    }

    #[test]
    fn cell_count_matches_rows_times_cols() {
        assert_eq!(make_grid(0.0, 0.0, 1.0, 10, 10).len(), 100);
    }
}
