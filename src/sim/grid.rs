//! Hex grid geometry and occupancy
//!
//! The grid uses offset coordinates: rows run top to bottom, columns left to
//! right, and every odd row is shifted right by one bubble radius. Rows are
//! spaced `sqrt(3) * r` apart so all six neighbors of a cell sit exactly one
//! bubble diameter from its center.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Bubble colors, in palette order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BubbleColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Cyan,
}

impl BubbleColor {
    pub const ALL: [BubbleColor; 6] = [
        BubbleColor::Red,
        BubbleColor::Green,
        BubbleColor::Blue,
        BubbleColor::Yellow,
        BubbleColor::Purple,
        BubbleColor::Cyan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BubbleColor::Red => "red",
            BubbleColor::Green => "green",
            BubbleColor::Blue => "blue",
            BubbleColor::Yellow => "yellow",
            BubbleColor::Purple => "purple",
            BubbleColor::Cyan => "cyan",
        }
    }
}

/// A grid address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn is_odd_row(&self) -> bool {
        self.row % 2 == 1
    }
}

/// Neighbor offsets `(d_row, d_col)` for cells on even rows
pub const EVEN_ROW_OFFSETS: [(isize, isize); 6] =
    [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];
/// Neighbor offsets for cells on odd rows (shifted right)
pub const ODD_ROW_OFFSETS: [(isize, isize); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

/// Offset table for a row's parity
#[inline]
pub fn neighbor_offsets(row: usize) -> &'static [(isize, isize); 6] {
    if row % 2 == 1 {
        &ODD_ROW_OFFSETS
    } else {
        &EVEN_ROW_OFFSETS
    }
}

/// A bubble resident in the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub row: usize,
    pub col: usize,
    /// Center in playfield pixels (always `grid_to_pixel(row, col)`)
    pub pos: Vec2,
    pub color: BubbleColor,
}

impl Bubble {
    #[inline]
    pub fn cell(&self) -> Cell {
        Cell::new(self.row, self.col)
    }
}

/// Sparse occupancy table addressed by `(row, col)`
///
/// Rows are allocated on demand below the last row; trailing empty rows are
/// released again so `row_count` tracks the lowest occupied row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    columns: usize,
    radius: f32,
    rows: Vec<Vec<Option<Bubble>>>,
}

impl Grid {
    pub fn new(columns: usize, radius: f32) -> Self {
        Self {
            columns: columns.max(1),
            radius,
            rows: Vec::new(),
        }
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn row_height(&self) -> f32 {
        self.radius * 3.0_f32.sqrt()
    }

    /// Number of allocated rows (one past the lowest occupied row)
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Center of a cell in playfield pixels
    pub fn grid_to_pixel(&self, cell: Cell) -> Vec2 {
        let r = self.radius;
        let shift = if cell.is_odd_row() { r } else { 0.0 };
        Vec2::new(
            r + cell.col as f32 * 2.0 * r + shift,
            r + cell.row as f32 * self.row_height(),
        )
    }

    /// Nearest cell to a pixel position, clamped into the grid
    pub fn pixel_to_grid(&self, pos: Vec2) -> Cell {
        let r = self.radius;
        let row = ((pos.y - r) / self.row_height()).round().max(0.0) as usize;
        let shift = if row % 2 == 1 { r } else { 0.0 };
        let max_col = (self.columns - 1) as f32;
        let col = ((pos.x - r - shift) / (2.0 * r)).round().clamp(0.0, max_col) as usize;
        Cell::new(row, col)
    }

    /// Hex neighbors of a cell that lie inside the column range
    ///
    /// The conceptual row above the ceiling is never returned.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        neighbor_offsets(cell.row)
            .iter()
            .filter_map(|&(d_row, d_col)| {
                let row = cell.row.checked_add_signed(d_row)?;
                let col = cell.col.checked_add_signed(d_col)?;
                (col < self.columns).then_some(Cell::new(row, col))
            })
            .collect()
    }

    pub fn get(&self, cell: Cell) -> Option<&Bubble> {
        self.rows.get(cell.row)?.get(cell.col)?.as_ref()
    }

    #[inline]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Put a bubble of `color` at `cell`, growing rows as needed
    ///
    /// The column must be in range. Returns the placed bubble.
    pub fn place(&mut self, cell: Cell, color: BubbleColor) -> Bubble {
        debug_assert!(cell.col < self.columns, "column {} out of range", cell.col);
        while self.rows.len() <= cell.row {
            self.rows.push(vec![None; self.columns]);
        }
        let bubble = Bubble {
            row: cell.row,
            col: cell.col,
            pos: self.grid_to_pixel(cell),
            color,
        };
        self.rows[cell.row][cell.col] = Some(bubble);
        bubble
    }

    /// Take the bubble out of `cell`, if any
    pub fn remove(&mut self, cell: Cell) -> Option<Bubble> {
        let removed = self.rows.get_mut(cell.row)?.get_mut(cell.col)?.take();
        while self
            .rows
            .last()
            .is_some_and(|row| row.iter().all(Option::is_none))
        {
            self.rows.pop();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles().next().is_none()
    }

    pub fn bubble_count(&self) -> usize {
        self.bubbles().count()
    }

    /// Occupied cells in row-major order
    pub fn bubbles(&self) -> impl Iterator<Item = &Bubble> {
        self.rows.iter().flat_map(|row| row.iter().flatten())
    }

    /// Distinct colors present, in palette order
    pub fn colors_in_play(&self) -> Vec<BubbleColor> {
        let mut colors: Vec<BubbleColor> = self.bubbles().map(|b| b.color).collect();
        colors.sort();
        colors.dedup();
        colors
    }

    /// Nearest empty cell to a landing point
    ///
    /// Looks at the 3x3 block of cells around the approximate cell first and
    /// widens the block one ring at a time until an empty cell turns up. An
    /// occupied cell is never returned.
    pub fn find_closest_slot(&self, target: Vec2) -> Cell {
        let approx = self.pixel_to_grid(target);
        // Once the block reaches past the last allocated row it contains an
        // empty row, so this loop always returns.
        for reach in 1..=self.rows.len() + 1 {
            if let Some(cell) = self.closest_empty_within(approx, reach, target) {
                return cell;
            }
        }
        Cell::new(self.rows.len().max(approx.row), approx.col)
    }

    fn closest_empty_within(&self, center: Cell, reach: usize, target: Vec2) -> Option<Cell> {
        let col_lo = center.col.saturating_sub(reach);
        let col_hi = (center.col + reach).min(self.columns - 1);
        let row_lo = center.row.saturating_sub(reach);
        let row_hi = center.row + reach;

        (row_lo..=row_hi)
            .flat_map(|row| (col_lo..=col_hi).map(move |col| Cell::new(row, col)))
            .filter(|&cell| !self.is_occupied(cell))
            .min_by(|&a, &b| {
                let da = self.grid_to_pixel(a).distance_squared(target);
                let db = self.grid_to_pixel(b).distance_squared(target);
                da.total_cmp(&db)
            })
    }
}
