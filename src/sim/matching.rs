//! Match resolution after a bubble lands
//!
//! Two passes run on every landing:
//! 1. Pop: the same-color cluster containing the landed bubble is removed if
//!    it has at least `MIN_CLUSTER` members.
//! 2. Drop: every bubble no longer connected to the ceiling (row 0) through
//!    occupied cells is removed.

use std::collections::{HashSet, VecDeque};

use super::grid::{Cell, Grid};
use crate::consts::{DROP_POINTS, MIN_CLUSTER, POP_POINTS};

/// Outcome of resolving one landing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Cells removed as a same-color cluster
    pub popped: Vec<Cell>,
    /// Cells removed because they hung from nothing
    pub dropped: Vec<Cell>,
}

impl Resolution {
    pub fn pop_points(&self) -> u64 {
        self.popped.len() as u64 * POP_POINTS
    }

    pub fn drop_points(&self) -> u64 {
        self.dropped.len() as u64 * DROP_POINTS
    }

    /// Total score earned
    pub fn points(&self) -> u64 {
        self.pop_points() + self.drop_points()
    }

    pub fn is_empty(&self) -> bool {
        self.popped.is_empty() && self.dropped.is_empty()
    }
}

/// Connected same-color cells containing `start`, sorted by cell
///
/// Empty if `start` is unoccupied.
pub fn find_cluster(grid: &Grid, start: Cell) -> Vec<Cell> {
    let Some(color) = grid.get(start).map(|b| b.color) else {
        return Vec::new();
    };

    let mut visited = HashSet::from([start]);
    let mut stack = vec![start];
    let mut cluster = Vec::new();

    while let Some(cell) = stack.pop() {
        cluster.push(cell);
        for next in grid.neighbors(cell) {
            if grid.get(next).is_some_and(|b| b.color == color) && visited.insert(next) {
                stack.push(next);
            }
        }
    }

    cluster.sort();
    cluster
}

/// Occupied cells not reachable from row 0, in row-major order
pub fn find_floating(grid: &Grid) -> Vec<Cell> {
    let mut anchored: HashSet<Cell> = HashSet::new();
    let mut queue: VecDeque<Cell> = grid
        .bubbles()
        .filter(|b| b.row == 0)
        .map(|b| b.cell())
        .collect();
    anchored.extend(queue.iter().copied());

    while let Some(cell) = queue.pop_front() {
        for next in grid.neighbors(cell) {
            if grid.is_occupied(next) && anchored.insert(next) {
                queue.push_back(next);
            }
        }
    }

    grid.bubbles()
        .map(|b| b.cell())
        .filter(|cell| !anchored.contains(cell))
        .collect()
}

/// Pop the landed bubble's cluster if large enough, then drop floaters
pub fn resolve_landing(grid: &mut Grid, landed: Cell) -> Resolution {
    let cluster = find_cluster(grid, landed);
    let popped = if cluster.len() >= MIN_CLUSTER {
        for &cell in &cluster {
            grid.remove(cell);
        }
        cluster
    } else {
        Vec::new()
    };

    let dropped = find_floating(grid);
    for &cell in &dropped {
        grid.remove(cell);
    }

    Resolution { popped, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::BubbleColor;
    use proptest::prelude::*;

    const COLUMNS: usize = 8;

    fn grid_from(cells: &[(usize, usize, BubbleColor)]) -> Grid {
        let mut grid = Grid::new(COLUMNS, 16.0);
        for &(row, col, color) in cells {
            grid.place(Cell::new(row, col), color);
        }
        grid
    }

    use crate::sim::grid::BubbleColor::{Blue as B, Green as G, Red as R};

    #[test]
    fn test_cluster_follows_hex_adjacency() {
        // (1,0) on an odd row touches (0,0) and (0,1); (2,0) touches (1,0)
        let grid = grid_from(&[(0, 0, R), (0, 1, G), (1, 0, R), (2, 0, R), (2, 2, R)]);
        assert_eq!(
            find_cluster(&grid, Cell::new(2, 0)),
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]
        );
        assert_eq!(find_cluster(&grid, Cell::new(2, 2)), vec![Cell::new(2, 2)]);
        assert!(find_cluster(&grid, Cell::new(5, 5)).is_empty());
    }

    #[test]
    fn test_three_in_a_row_pops_for_300() {
        let mut grid = grid_from(&[(0, 0, R), (0, 1, R), (0, 2, R), (0, 3, B)]);
        let res = resolve_landing(&mut grid, Cell::new(0, 2));
        assert_eq!(res.popped, vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]);
        assert!(res.dropped.is_empty());
        assert_eq!(res.points(), 300);
        assert_eq!(grid.bubble_count(), 1);
    }

    #[test]
    fn test_pair_does_not_pop() {
        let mut grid = grid_from(&[(0, 0, R), (0, 1, R), (0, 2, B)]);
        let res = resolve_landing(&mut grid, Cell::new(0, 1));
        assert!(res.is_empty());
        assert_eq!(res.points(), 0);
        assert_eq!(grid.bubble_count(), 3);
    }

    #[test]
    fn test_pop_drops_hanging_bubbles() {
        // Blue pair hangs only from the red trio on row 1 via (1, 1)
        let mut grid = grid_from(&[
            (0, 0, R),
            (0, 1, R),
            (0, 2, R),
            (1, 1, R),
            (2, 1, B),
            (3, 1, B),
        ]);
        let res = resolve_landing(&mut grid, Cell::new(1, 1));
        assert_eq!(res.popped.len(), 4);
        assert_eq!(res.dropped, vec![Cell::new(2, 1), Cell::new(3, 1)]);
        assert_eq!(res.points(), 4 * 100 + 2 * 150);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_detached_landing_is_dropped() {
        let mut grid = grid_from(&[(0, 0, R), (4, 4, G)]);
        let res = resolve_landing(&mut grid, Cell::new(4, 4));
        assert!(res.popped.is_empty());
        assert_eq!(res.dropped, vec![Cell::new(4, 4)]);
        assert_eq!(res.points(), 150);
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        proptest::collection::vec((0usize..7, 0usize..COLUMNS, 0usize..3), 0..40).prop_map(
            |cells| {
                let mut grid = Grid::new(COLUMNS, 16.0);
                for (row, col, color) in cells {
                    grid.place(Cell::new(row, col), BubbleColor::ALL[color]);
                }
                grid
            },
        )
    }

    proptest! {
        #[test]
        fn prop_cluster_is_single_color_and_maximal(grid in arb_grid()) {
            for bubble in grid.bubbles() {
                let cluster = find_cluster(&grid, bubble.cell());
                let members: HashSet<Cell> = cluster.iter().copied().collect();
                prop_assert!(members.contains(&bubble.cell()));
                for &cell in &cluster {
                    prop_assert_eq!(grid.get(cell).map(|b| b.color), Some(bubble.color));
                    for n in grid.neighbors(cell) {
                        if grid.get(n).is_some_and(|b| b.color == bubble.color) {
                            prop_assert!(members.contains(&n));
                        }
                    }
                }
            }
        }

        #[test]
        fn prop_no_floaters_after_cleanup(grid in arb_grid(), pick in 0usize..40) {
            let mut grid = grid;
            let cells: Vec<Cell> = grid.bubbles().map(|b| b.cell()).collect();
            prop_assume!(!cells.is_empty());
            let landed = cells[pick % cells.len()];

            let before = grid.bubble_count();
            let res = resolve_landing(&mut grid, landed);
            prop_assert_eq!(grid.bubble_count(), before - res.popped.len() - res.dropped.len());
            prop_assert!(find_floating(&grid).is_empty());
            for bubble in grid.bubbles() {
                prop_assert!(reaches_ceiling(&grid, bubble.cell()));
            }
        }
    }

    /// Independent check: walk occupied cells upward until row 0
    fn reaches_ceiling(grid: &Grid, start: Cell) -> bool {
        let mut seen = HashSet::from([start]);
        let mut stack = vec![start];
        while let Some(cell) = stack.pop() {
            if cell.row == 0 {
                return true;
            }
            for n in grid.neighbors(cell) {
                if grid.is_occupied(n) && seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        false
    }
}
