//! Traversal costs. A [CostField] stores one byte per cell where `0..=254` is the cost of
//! entering the cell and [IMPASSABLE] (`255`) marks a wall.
use crate::grid::{Grid, ValueGrid};
use crate::{IMPASSABLE, MAX_COST};

/// Grid of per-cell traversal costs.
pub type CostField = Grid<u8>;

/// Tagged view of a cost cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cost {
    /// Cost of entering the cell. Values above [MAX_COST] are clamped to it when written to a
    /// field; build the variant with [Cost::passable] to keep it in range.
    Passable(u8),
    Impassable,
}

impl Cost {
    /// A passable cost clamped to `0..=`[MAX_COST], so it can never alias [IMPASSABLE].
    pub fn passable(cost: u8) -> Self {
        Cost::Passable(cost.min(MAX_COST))
    }
    pub fn is_passable(self) -> bool {
        matches!(self, Cost::Passable(_))
    }
    /// Packed byte representation. Passable costs above [MAX_COST] are clamped.
    pub fn raw(self) -> u8 {
        match self {
            Cost::Passable(cost) => cost.min(MAX_COST),
            Cost::Impassable => IMPASSABLE,
        }
    }
}

impl From<u8> for Cost {
    fn from(raw: u8) -> Self {
        if raw == IMPASSABLE {
            Cost::Impassable
        } else {
            Cost::Passable(raw)
        }
    }
}

impl From<Cost> for u8 {
    fn from(cost: Cost) -> u8 {
        cost.raw()
    }
}

impl Grid<u8> {
    pub fn cost(&self, x: usize, y: usize) -> Cost {
        Cost::from(self.get(x, y))
    }
    pub fn cost_at(&self, index: usize) -> Cost {
        Cost::from(self.get_index(index))
    }
    pub fn set_cost(&mut self, x: usize, y: usize, cost: Cost) {
        self.set(x, y, cost.raw());
    }
    pub fn is_passable(&self, x: usize, y: usize) -> bool {
        self.get(x, y) != IMPASSABLE
    }
    pub fn is_passable_index(&self, index: usize) -> bool {
        self.get_index(index) != IMPASSABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_maps_to_impassable() {
        assert_eq!(Cost::from(255), Cost::Impassable);
        assert_eq!(Cost::from(0), Cost::Passable(0));
        assert_eq!(Cost::from(254), Cost::Passable(254));
        assert_eq!(u8::from(Cost::Impassable), IMPASSABLE);
    }

    #[test]
    fn passable_cost_never_becomes_sentinel() {
        let mut field = CostField::new(2, 2, 1);
        field.set_cost(1, 1, Cost::Passable(255));
        assert_eq!(field.get(1, 1), MAX_COST);
        assert!(field.is_passable(1, 1));
        field.set_cost(0, 1, Cost::Impassable);
        assert!(!field.is_passable_index(2));
        assert_eq!(field.cost_at(2), Cost::Impassable);
    }

    #[test]
    fn passable_constructor_clamps() {
        assert_eq!(Cost::passable(255), Cost::Passable(MAX_COST));
        assert_eq!(Cost::passable(7), Cost::Passable(7));
        assert_eq!(Cost::from(u8::from(Cost::Passable(255))), Cost::passable(255));
        assert!(Cost::passable(255).is_passable());
    }
}
