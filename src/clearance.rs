//! Clearance tells how large a square agent can stand at a cell. The square is anchored at the
//! cell and grows towards increasing `x` and `y`, following the
//! [clearance-based pathfinding](https://web.archive.org/web/20190725152730/http://aigamedev.com/open/tutorial/clearance-based-pathfinding/)
//! approach.
use log::debug;

use crate::cost::CostField;
use crate::grid::{Grid, ValueGrid};
use crate::IMPASSABLE;

/// Clearance of `(x, y)`. Probe `i` looks at the diagonal cell `(x + i, y + i)` and at the cells
/// `(x + i, y + i - j)` and `(x + i - j, y + i)` for `j` in `1..i`. The first probe that hits an
/// impassable cell is returned; running off the grid returns the last complete probe. With
/// `max_clearance` set, probing stops once it is reached.
pub fn cell_clearance(costs: &CostField, x: usize, y: usize, max_clearance: Option<u32>) -> u32 {
    debug_assert!(costs.index_in_bounds(x, y));
    let mut i: u32 = 0;
    loop {
        let (dx, dy) = (x + i as usize, y + i as usize);
        if !costs.index_in_bounds(dx, dy) {
            return i.saturating_sub(1);
        }
        if costs.get(dx, dy) == IMPASSABLE {
            return i;
        }
        for j in 1..i as usize {
            if costs.get(dx, dy - j) == IMPASSABLE || costs.get(dx - j, dy) == IMPASSABLE {
                return i;
            }
        }
        if max_clearance == Some(i) {
            return i;
        }
        i += 1;
    }
}

/// [cell_clearance] of every cell.
pub fn clearance_field(costs: &CostField, max_clearance: Option<u32>) -> Grid<u32> {
    let mut field = Grid::new(costs.width(), costs.height(), 0);
    for i in 0..costs.area() {
        let (x, y) = costs.coordinate(i);
        field[i] = cell_clearance(costs, x, y, max_clearance);
    }
    debug!(
        "Clearance field {}x{} (cap {:?})",
        costs.width(),
        costs.height(),
        max_clearance
    );
    field
}
