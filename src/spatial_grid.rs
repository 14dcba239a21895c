/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for neighbor lookups on the
 * toroidal domain. The domain is cut into cells as wide as the interaction
 * radius, so every particle within reach of a query lies in the query's cell
 * or one of the cells around it, with column and row indices wrapping at the
 * domain edges.
 *
 * Particles live in the engine's contiguous store; each cell only keeps the
 * indices of its particles. Rebuilding clears and refills those index lists,
 * keeping their allocations from one step to the next.
 */

use glam::DVec2;

use crate::error::{ConfigurationError, Result};

/// Validated cell size and domain extent of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    cell_size: f64,
    width: f64,
    height: f64,
    cols: usize,
    rows: usize,
}

impl GridLayout {
    pub fn new(cell_size: f64, width: f64, height: f64) -> Result<Self> {
        if !(cell_size > 0.0) {
            return Err(ConfigurationError::NonPositiveCellSize(cell_size));
        }
        if !(width > 0.0) || !(height > 0.0) {
            return Err(ConfigurationError::EmptyDomain { width, height });
        }

        // A cell larger than the domain degenerates to a single cell
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);

        Ok(Self {
            cell_size,
            width,
            height,
            cols,
            rows,
        })
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn domain(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    // Column (or row) containing a coordinate already wrapped into the domain
    #[inline]
    fn axis_index(&self, coord: f64, count: usize) -> usize {
        ((coord / self.cell_size).floor().max(0.0) as usize).min(count - 1)
    }

    #[inline]
    pub fn cell_coords(&self, position: DVec2) -> (usize, usize) {
        (
            self.axis_index(position.x, self.cols),
            self.axis_index(position.y, self.rows),
        )
    }

    #[inline]
    pub fn cell_index(&self, position: DVec2) -> usize {
        let (col, row) = self.cell_coords(position);
        row * self.cols + col
    }

    /// Distinct columns (or rows) within one cell size of `coord`, walking
    /// forward across the seam. On an evenly divided axis this is the cell
    /// and its two wrapped neighbors. When the domain is not a whole number
    /// of cells the last cell is narrow and the reach can span a fourth
    /// index, which is included so no neighbor is missed.
    fn axis_span(&self, coord: f64, size: f64, count: usize) -> AxisSpan {
        let mut span = AxisSpan::default();
        let reach = self.cell_size;
        if 2.0 * reach >= size {
            // At most two cells along this axis, take them all
            for index in 0..count {
                span.push(index);
            }
            return span;
        }

        let low = coord - reach;
        let high = coord + reach;
        let low_wrapped = crate::physics::wrap(low, size);
        let mut index = self.axis_index(low_wrapped, count);
        // Unwrapped coordinate where the current cell ends
        let mut boundary = low - low_wrapped + self.cell_extent(index, count, size);
        loop {
            span.push(index);
            if boundary >= high || span.len == count || span.len == MAX_SPAN {
                break;
            }
            index = (index + 1) % count;
            boundary += self.cell_width(index, count, size);
        }
        span
    }

    // Upper edge of cell `index` along an axis
    #[inline]
    fn cell_extent(&self, index: usize, count: usize, size: f64) -> f64 {
        if index + 1 == count {
            size
        } else {
            (index + 1) as f64 * self.cell_size
        }
    }

    #[inline]
    fn cell_width(&self, index: usize, count: usize, size: f64) -> f64 {
        self.cell_extent(index, count, size) - index as f64 * self.cell_size
    }
}

const MAX_SPAN: usize = 4;

// Distinct cell indices along one axis
#[derive(Debug, Default, Clone, Copy)]
struct AxisSpan {
    indices: [usize; MAX_SPAN],
    len: usize,
}

impl AxisSpan {
    #[inline]
    fn push(&mut self, index: usize) {
        self.indices[self.len] = index;
        self.len += 1;
    }

    #[inline]
    fn as_slice(&self) -> &[usize] {
        &self.indices[..self.len]
    }
}

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    layout: GridLayout,
    pub grid: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Empty grid with the given layout.
    pub fn new(layout: GridLayout) -> Self {
        let mut grid = Vec::with_capacity(layout.cols * layout.rows);
        grid.resize_with(layout.cols * layout.rows, Vec::new);
        Self { layout, grid }
    }

    /// Partitions `positions` (already wrapped into the domain) into cells.
    /// The n-th position is stored as index n.
    pub fn build<I>(cell_size: f64, width: f64, height: f64, positions: I) -> Result<Self>
    where
        I: IntoIterator<Item = DVec2>,
    {
        let layout = GridLayout::new(cell_size, width, height)?;
        let mut grid = Self::new(layout);
        grid.fill(positions);
        Ok(grid)
    }

    /// Re-partitions for a new step, reusing the per-cell allocations when
    /// the layout is unchanged.
    pub fn rebuild<I>(&mut self, layout: GridLayout, positions: I)
    where
        I: IntoIterator<Item = DVec2>,
    {
        if layout != self.layout {
            log::debug!(
                "spatial grid relayout: {}x{} cells of {:.1}",
                layout.cols,
                layout.rows,
                layout.cell_size
            );
            self.layout = layout;
            self.grid.resize_with(layout.cols * layout.rows, Vec::new);
        }
        self.clear();
        self.fill(positions);
    }

    fn fill<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = DVec2>,
    {
        for (index, position) in positions.into_iter().enumerate() {
            self.insert(index, position);
        }
    }

    // Clear the grid
    pub fn clear(&mut self) {
        for cell in &mut self.grid {
            cell.clear();
        }
    }

    #[inline]
    pub fn insert(&mut self, index: usize, position: DVec2) {
        let cell_index = self.layout.cell_index(position);
        self.grid[cell_index].push(index);
    }

    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn cell(&self, col: usize, row: usize) -> &[usize] {
        &self.grid[row * self.layout.cols + col]
    }

    /// Candidate neighbors of the particle stored as `index` at `position`:
    /// everything in its cell and the surrounding wrapped cells, minus the
    /// particle itself.
    pub fn neighbors_of(&self, index: usize, position: DVec2) -> Vec<usize> {
        let mut result = Vec::new();
        self.collect_neighbors(index, position, &mut result);
        result
    }

    /// Same as `neighbors_of`, writing into a caller-owned buffer.
    pub fn collect_neighbors(&self, index: usize, position: DVec2, out: &mut Vec<usize>) {
        out.clear();

        let layout = &self.layout;
        let cols = layout.axis_span(position.x, layout.width, layout.cols);
        let rows = layout.axis_span(position.y, layout.height, layout.rows);

        // Spans hold distinct indices, so each cell is visited once even
        // when the neighborhood wraps onto itself
        for &row in rows.as_slice() {
            let row_start = row * layout.cols;
            for &col in cols.as_slice() {
                out.extend(
                    self.grid[row_start + col]
                        .iter()
                        .copied()
                        .filter(|&other| other != index),
                );
            }
        }
    }
}
