use super::layout::{AreaLayout, Leaning, LocalToScene};
use crate::algo::{GridMode, LayoutAlignment};
use crate::geom::Rectangle;
use std::ops::Range;

/// Occupancy grid over the irregular lines induced by the zone and exclusion corners.
///
/// Cell `(row, col)` spans `x_values[col]..x_values[col + 1]` and
/// `y_values[row]..y_values[row + 1]`; it is free unless some exclusion covers it.
#[derive(Debug, Clone)]
pub(crate) struct AreasGrid {
    x_values: Vec<f64>,
    y_values: Vec<f64>,
    free: Vec<bool>,
}

impl AreasGrid {
    pub(crate) fn new(zone: &Rectangle, exclusion_areas: &[Rectangle]) -> Self {
        let corners = std::iter::once(zone).chain(exclusion_areas);
        let x_values = sorted_unique(
            corners
                .clone()
                .flat_map(|r| [r.min_point().x, r.max_point().x]),
        );
        let y_values = sorted_unique(corners.flat_map(|r| [r.min_point().y, r.max_point().y]));

        let mut grid = Self {
            free: vec![true; (x_values.len() - 1) * (y_values.len() - 1)],
            x_values,
            y_values,
        };
        for area in exclusion_areas {
            grid.occupy(area);
        }
        grid
    }

    fn columns(&self) -> usize {
        self.x_values.len() - 1
    }

    fn rows(&self) -> usize {
        self.y_values.len() - 1
    }

    fn is_free(&self, row: usize, col: usize) -> bool {
        self.free[row * self.columns() + col]
    }

    fn occupy(&mut self, area: &Rectangle) {
        let cols = index_range(&self.x_values, area.min_point().x, area.max_point().x);
        let rows = index_range(&self.y_values, area.min_point().y, area.max_point().y);
        let width = self.columns();
        for row in rows {
            self.free[row * width + cols.start..row * width + cols.end].fill(false);
        }
    }

    /// Extracts the maximal free strips as layouts, normalized to `alignment`.
    pub(crate) fn allowed_areas(
        &self,
        mode: GridMode,
        alignment: LayoutAlignment,
    ) -> Vec<AreaLayout> {
        let mut layouts = match mode {
            GridMode::Horizontal => self.horizontal_areas(),
            GridMode::Vertical => self.vertical_areas(),
        };
        for layout in &mut layouts {
            layout.apply_alignment(alignment);
        }
        layouts
    }

    fn horizontal_areas(&self) -> Vec<AreaLayout> {
        let (rows, cols) = (self.rows(), self.columns());
        let mut out = Vec::new();
        for row in 0..rows {
            let mut col = 0;
            while col < cols {
                if !self.is_free(row, col) {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < cols && self.is_free(row, col) {
                    col += 1;
                }
                // A maximal run ends at the zone edge or at an exclusion on both sides.
                let leaning = Leaning {
                    left: true,
                    right: true,
                    bottom: row == 0,
                    top: row + 1 == rows,
                };
                out.push(self.area_layout(start..col, row..row + 1, leaning));
            }
        }
        out
    }

    fn vertical_areas(&self) -> Vec<AreaLayout> {
        let (rows, cols) = (self.rows(), self.columns());
        let mut out = Vec::new();
        for col in 0..cols {
            let mut row = 0;
            while row < rows {
                if !self.is_free(row, col) {
                    row += 1;
                    continue;
                }
                let start = row;
                while row < rows && self.is_free(row, col) {
                    row += 1;
                }
                let leaning = Leaning {
                    left: col == 0,
                    right: col + 1 == cols,
                    bottom: true,
                    top: true,
                };
                out.push(self.area_layout(col..col + 1, start..row, leaning));
            }
        }
        out
    }

    fn area_layout(&self, cols: Range<usize>, rows: Range<usize>, leaning: Leaning) -> AreaLayout {
        let (x0, x1) = (self.x_values[cols.start], self.x_values[cols.end]);
        let (y0, y1) = (self.y_values[rows.start], self.y_values[rows.end]);
        AreaLayout::new(
            LocalToScene::translation(x0, y0),
            x1 - x0,
            y1 - y0,
            leaning,
        )
    }
}

fn sorted_unique(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// Cell index range covered by `min..max`; both bounds are grid lines.
fn index_range(lines: &[f64], min: f64, max: f64) -> Range<usize> {
    let start = lines.partition_point(|&v| v < min);
    let end = start + lines[start..].partition_point(|&v| v < max);
    start..end
}

impl std::fmt::Display for AreasGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "x_values: {:?}", self.x_values)?;
        writeln!(f, "y_values: {:?}", self.y_values)?;
        // Top row first, so the dump reads like the scene.
        for row in (0..self.rows()).rev() {
            let cells: Vec<&str> = (0..self.columns())
                .map(|col| if self.is_free(row, col) { "1" } else { "0" })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
