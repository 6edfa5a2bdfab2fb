//! # grid_flowfield
//!
//! Navigation fields on weighted grids. A [CostField](cost::CostField) assigns every cell the cost
//! of entering it; from one or more goal cells an
//! [integration field](field::IntegrationField) of accumulated cost-to-goal is propagated, and
//! from that a [vector field](direction::generate_vector_field) or
//! [direction field](direction::generate_direction_field) tells every cell which neighbour to step
//! to. This is the [flow field](https://leifnode.com/2013/12/flow-field-pathfinding/) approach to
//! crowd pathfinding: one field serves any number of agents heading for the same goals.
//!
//! Two utilities support planners built on top: [direct_path](line_of_sight::direct_path)
//! checks a straight line for obstacles and sums its cost, and
//! [cell_clearance](clearance::cell_clearance) reports how large a square agent fits at a cell.
//! [PassableRegions](components::PassableRegions) pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) so unreachable
//! goals can be detected without propagating.
//!
//! Sentinels are packed into the cells for density: [IMPASSABLE] in cost fields and [UNREACHED]
//! in integration fields. [Cost](cost::Cost) and
//! [IntegrationField::distance](field::IntegrationField) give tagged views of them.
pub mod clearance;
pub mod components;
pub mod cost;
pub mod direction;
pub mod error;
pub mod field;
pub mod grid;
pub mod line_of_sight;
pub mod mesh;


pub use clearance::{cell_clearance, clearance_field};
pub use components::PassableRegions;
pub use cost::{Cost, CostField};
pub use direction::{
    best_direction, best_neighbour, best_neighbour_unconstrained, generate_direction_field,
    generate_vector_field, generate_vector_field_from_costs, generate_vector_field_into,
    trace_path, DiagonalRule, MovementDirection,
};
pub use error::{FieldError, PolygonError};
pub use field::{
    combine_integration_fields, combine_into, generate_integration_field,
    generate_integration_field_with, IntegrationField, Relaxation,
};
pub use grid::{Grid, Neighbours, ValueGrid};
pub use line_of_sight::{direct_path, direct_path_between, line_cells, BresenhamLine};
pub use mesh::{
    generate_mesh_from_polygon, Mesh, Orientation, Polygon, PolygonPart, Ring, Triangulator,
    Vertex,
};

/// Cost field value of a cell that can never be entered.
pub const IMPASSABLE: u8 = 255;
/// Highest cost of a passable cell.
pub const MAX_COST: u8 = 254;
/// Integration field value of a cell that no goal reaches.
pub const UNREACHED: u16 = u16::MAX;

/// Inline capacity of neighbour lists; a cell has at most eight neighbours.
pub const N_SMALLVEC_SIZE: usize = 8;
