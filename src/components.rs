use log::info;
use petgraph::unionfind::UnionFind;

use crate::cost::CostField;
use crate::grid::ValueGrid;

/// Connected regions of passable cells under 4-connected movement, the same movement the
/// propagator uses. Two passable cells share a region exactly when a route of passable cells
/// connects them, so a planner can rule out unreachable goals before propagating a field.
#[derive(Clone, Debug)]
pub struct PassableRegions {
    passable: Vec<bool>,
    components: UnionFind<usize>,
}

impl PassableRegions {
    /// Links every passable cell with its passable right and lower neighbour.
    pub fn new(costs: &CostField) -> Self {
        let mut components = UnionFind::new(costs.area());
        let passable: Vec<bool> = (0..costs.area())
            .map(|i| costs.is_passable_index(i))
            .collect();
        for y in 0..costs.height() {
            for x in 0..costs.width() {
                let ix = costs.get_ix(x, y);
                if !passable[ix] {
                    continue;
                }
                if x + 1 < costs.width() && passable[ix + 1] {
                    components.union(ix, ix + 1);
                }
                if y + 1 < costs.height() && passable[ix + costs.width()] {
                    components.union(ix, ix + costs.width());
                }
            }
        }
        info!(
            "Generated passable regions for a {}x{} cost field",
            costs.width(),
            costs.height()
        );
        PassableRegions {
            passable,
            components,
        }
    }
    pub fn is_passable(&self, index: usize) -> bool {
        self.passable[index]
    }
    /// Region id of a passable cell, [None] for walls.
    pub fn region(&self, index: usize) -> Option<usize> {
        self.passable[index].then(|| self.components.find(index))
    }
    /// Checks if both cells are passable and in the same region.
    pub fn connected(&self, a: usize, b: usize) -> bool {
        self.passable[a] && self.passable[b] && self.components.equiv(a, b)
    }
    /// Checks if `index` shares a region with any of `goals`.
    pub fn any_connected(&self, index: usize, goals: &[usize]) -> bool {
        goals.iter().any(|&g| self.connected(index, g))
    }
    /// Number of distinct passable regions.
    pub fn count(&self) -> usize {
        let mut roots: Vec<usize> = (0..self.passable.len())
            .filter_map(|i| self.region(i))
            .collect();
        roots.sort_unstable();
        roots.dedup();
        roots.len()
    }
}
