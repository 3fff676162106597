//! Snake-ordered grid of level positions.
use tracing::debug;

use super::{PathPosition, Viewport};
use crate::config::LayoutConfig;

/// Grid descriptor. `rows * cols` positions are produced; callers that need
/// fewer (partial last row) truncate.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub margin: f64,
    pub viewport: Viewport,
}

impl GridSpec {
    /// Smallest grid holding `count` levels, at most `max_columns` wide.
    /// Missing spacings stretch the grid across the viewport.
    pub fn for_level_count(count: usize, layout: &LayoutConfig, viewport: Viewport) -> Self {
        let cols = count.min(layout.max_columns.max(1));
        let rows = if cols == 0 { 0 } else { count.div_ceil(cols) };
        let spread = |extent: f64, cells: usize| -> f64 {
            if cells <= 1 {
                0.0
            } else {
                ((extent - 2.0 * layout.margin) / (cells - 1) as f64).max(0.0)
            }
        };
        Self {
            rows,
            cols,
            spacing_x: layout.spacing_x.unwrap_or_else(|| spread(viewport.width, cols)),
            spacing_y: layout.spacing_y.unwrap_or_else(|| spread(viewport.height, rows)),
            margin: layout.margin,
            viewport,
        }
    }

    fn extent_x(&self) -> f64 {
        self.cols.saturating_sub(1) as f64 * self.spacing_x + 2.0 * self.margin
    }

    fn extent_y(&self) -> f64 {
        self.rows.saturating_sub(1) as f64 * self.spacing_y + 2.0 * self.margin
    }
}

/// (row, column) cells in traversal order: left to right on even rows, right to
/// left on odd rows, so consecutive cells are always neighbours.
pub fn snake_cells(rows: usize, cols: usize) -> Vec<(usize, usize)> {
    let mut cells = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let column = if r % 2 == 0 { c } else { cols - 1 - c };
            cells.push((r, column));
        }
    }
    cells
}

pub fn generate_grid_positions(spec: &GridSpec) -> Vec<PathPosition> {
    let (extent_x, extent_y) = (spec.extent_x(), spec.extent_y());
    // Zero extent only happens for a single column/row without margin: center it.
    let normalize = |raw: f64, extent: f64| -> f64 {
        if extent > 0.0 { raw / extent * 100.0 } else { 50.0 }
    };
    let positions: Vec<PathPosition> = snake_cells(spec.rows, spec.cols)
        .into_iter()
        .map(|(r, column)| {
            let raw_x = column as f64 * spec.spacing_x + spec.margin;
            let raw_y = r as f64 * spec.spacing_y + spec.margin;
            PathPosition {
                x: normalize(raw_x, extent_x),
                y: normalize(raw_y, extent_y),
            }
        })
        .collect();
    debug!(rows = spec.rows, cols = spec.cols, count = positions.len(), "generated grid positions");
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(rows: usize, cols: usize) -> GridSpec {
        GridSpec {
            rows,
            cols,
            spacing_x: 100.0,
            spacing_y: 80.0,
            margin: 50.0,
            viewport: Viewport { width: 800.0, height: 600.0 },
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_snake_order_two_by_two() {
        assert_eq!(snake_cells(2, 2), vec![(0, 0), (0, 1), (1, 1), (1, 0)]);
    }

    #[test]
    fn test_snake_order_three_columns() {
        assert_eq!(
            snake_cells(3, 3),
            vec![(0, 0), (0, 1), (0, 2), (1, 2), (1, 1), (1, 0), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn test_generate_normalizes_to_percent() {
        let pos = generate_grid_positions(&spec(2, 2));
        assert_eq!(pos.len(), 4);
        // extent_x = 100 + 100 = 200, extent_y = 80 + 100 = 180
        assert!(approx(pos[0].x, 25.0) && approx(pos[0].y, 50.0 / 180.0 * 100.0));
        assert!(approx(pos[1].x, 75.0) && approx(pos[1].y, pos[0].y));
        assert!(approx(pos[2].x, 75.0) && approx(pos[2].y, 130.0 / 180.0 * 100.0));
        assert!(approx(pos[3].x, 25.0) && approx(pos[3].y, pos[2].y));
        for p in &pos {
            assert!((0.0..=100.0).contains(&p.x) && (0.0..=100.0).contains(&p.y));
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let s = spec(3, 4);
        assert_eq!(generate_grid_positions(&s), generate_grid_positions(&s));
    }

    #[test]
    fn test_degenerate_extent_centers() {
        let mut s = spec(1, 1);
        s.margin = 0.0;
        let pos = generate_grid_positions(&s);
        assert_eq!(pos, vec![PathPosition::new(50.0, 50.0)]);
        assert!(generate_grid_positions(&spec(0, 0)).is_empty());
    }

    #[test]
    fn test_for_level_count_sizes_grid() {
        let layout = LayoutConfig::default();
        let vp = Viewport { width: 1000.0, height: 500.0 };
        let g = GridSpec::for_level_count(7, &layout, vp);
        assert_eq!((g.rows, g.cols), (3, 3));
        assert!(approx(g.spacing_x, (1000.0 - 120.0) / 2.0));
        assert!(approx(g.spacing_y, (500.0 - 120.0) / 2.0));
        let g = GridSpec::for_level_count(2, &layout, vp);
        assert_eq!((g.rows, g.cols), (1, 2));
        let g = GridSpec::for_level_count(0, &layout, vp);
        assert_eq!((g.rows, g.cols), (0, 0));
    }

    #[test]
    fn test_for_level_count_keeps_explicit_spacing() {
        let layout = LayoutConfig {
            spacing_x: Some(42.0),
            ..LayoutConfig::default()
        };
        let g = GridSpec::for_level_count(4, &layout, Viewport { width: 10.0, height: 10.0 });
        assert_eq!(g.spacing_x, 42.0);
        assert_eq!(g.spacing_y, 0.0);
    }
}
