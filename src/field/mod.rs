//! Integration fields hold the accumulated cost of the cheapest 4-connected route from every cell to
//! the nearest goal. Goals are `0`, cells that no goal can reach keep [UNREACHED].
//!
//! A uniform cost field with a goal in the centre produces the familiar diamond:
//!
//! ```text
//! 2 1 2
//! 1 0 1
//! 2 1 2
//! ```
pub mod combine;
pub mod propagate;

pub use combine::{combine_integration_fields, combine_into};
pub use propagate::{
    generate_integration_field, generate_integration_field_with, Relaxation,
};

use crate::cost::CostField;
use crate::error::FieldError;
use crate::grid::{Grid, ValueGrid};
use crate::UNREACHED;

/// Grid of accumulated distances to the goal set.
pub type IntegrationField = Grid<u16>;

impl Grid<u16> {
    /// A field of the given size with every cell [UNREACHED].
    pub fn unreached(width: usize, height: usize) -> Self {
        Grid::new(width, height, UNREACHED)
    }
    /// Propagates a fresh field over `costs` from `goals` using FIFO relaxation.
    pub fn from_costs(costs: &CostField, goals: &[usize]) -> Result<Self, FieldError> {
        let mut field = IntegrationField::unreached(costs.width(), costs.height());
        generate_integration_field(costs, goals, &mut field)?;
        Ok(field)
    }
    /// Distance of a cell, [None] if it was never reached.
    pub fn distance(&self, index: usize) -> Option<u16> {
        match self.get_index(index) {
            UNREACHED => None,
            d => Some(d),
        }
    }
    pub fn is_reached(&self, index: usize) -> bool {
        self.get_index(index) != UNREACHED
    }
    /// Cell-wise minimum of two fields, see [combine_integration_fields].
    pub fn combined(&self, other: &IntegrationField) -> Result<IntegrationField, FieldError> {
        let mut out = self.clone();
        combine_into(&mut out, other)?;
        Ok(out)
    }
}
