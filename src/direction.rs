//! Turning an integration field into movement. Every cell points at the neighbour with the lowest
//! integration value. Two rules decide which diagonals may be chosen:
//!
//! * [DiagonalRule::CornerCutting] considers all eight neighbours.
//! * [DiagonalRule::Occluded] drops a diagonal when either direct neighbour it passes between is
//!   unreached, so agents never clip the corner of a wall.
use grid_util::point::Point;
use log::debug;

use crate::cost::CostField;
use crate::error::FieldError;
use crate::field::IntegrationField;
use crate::grid::{Grid, ValueGrid};
use crate::UNREACHED;

/// One of the eight compass directions, or no movement, packed into four bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MovementDirection(u8);

impl MovementDirection {
    pub const X: u8 = 1 << 0;
    pub const INVERT_X: u8 = 1 << 1;
    pub const Y: u8 = 1 << 2;
    pub const INVERT_Y: u8 = 1 << 3;
    pub const NONE: MovementDirection = MovementDirection(0);

    pub fn bits(self) -> u8 {
        self.0
    }
    /// Keeps only the sign of each component.
    pub fn from_vector(x: f32, y: f32) -> Self {
        let mut dir = 0;
        if x.abs() > 0.0 {
            dir |= Self::X;
            if x < 0.0 {
                dir |= Self::INVERT_X;
            }
        }
        if y.abs() > 0.0 {
            dir |= Self::Y;
            if y < 0.0 {
                dir |= Self::INVERT_Y;
            }
        }
        MovementDirection(dir)
    }
    pub fn from_offset(dx: i32, dy: i32) -> Self {
        Self::from_vector(dx as f32, dy as f32)
    }
    /// Unit step in grid coordinates, `(0, 0)` for [NONE](Self::NONE).
    pub fn offset(self) -> Point {
        let axis = |present: u8, invert: u8| {
            if self.0 & present == 0 {
                0
            } else if self.0 & invert != 0 {
                -1
            } else {
                1
            }
        };
        Point::new(axis(Self::X, Self::INVERT_X), axis(Self::Y, Self::INVERT_Y))
    }
    /// Angle in radians as given by `atan2(y, x)`.
    pub fn angle(self) -> f32 {
        let step = self.offset();
        (step.y as f32).atan2(step.x as f32)
    }
    pub fn has_magnitude(self) -> bool {
        self.0 & (Self::X | Self::Y) != 0
    }
    pub fn is_diagonal(self) -> bool {
        self.0 & Self::X != 0 && self.0 & Self::Y != 0
    }
}

/// Which diagonal neighbours may be suggested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiagonalRule {
    /// Any of the eight neighbours.
    CornerCutting,
    /// Diagonals only when neither straddled direct neighbour is unreached.
    #[default]
    Occluded,
}

/// Sides of a cell whose direct neighbour is unreached. `up` is `y - 1`, `down` is `y + 1`.
#[derive(Default, Debug)]
struct BlockedSides {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl BlockedSides {
    fn mark(&mut self, (x, y): (usize, usize), (nx, ny): (usize, usize)) {
        if nx < x {
            self.left = true;
        } else if nx > x {
            self.right = true;
        } else if ny < y {
            self.up = true;
        } else if ny > y {
            self.down = true;
        }
    }
    /// Whether a diagonal step from `(x, y)` to `(nx, ny)` passes between two open sides.
    fn allows(&self, (x, y): (usize, usize), (nx, ny): (usize, usize)) -> bool {
        let horizontal = if nx < x { self.left } else { self.right };
        let vertical = if ny < y { self.up } else { self.down };
        !horizontal && !vertical
    }
}

/// Index of the reachable neighbour with the lowest strictly better value than `(x, y)`, or the
/// index of `(x, y)` itself if there is none. Direct neighbours are considered first and win ties.
/// A diagonal is skipped when the direct neighbour on either side of it is unreached.
pub fn best_neighbour(field: &IntegrationField, x: usize, y: usize) -> usize {
    let own = field.get_ix(x, y);
    let mut best = field[own];
    let mut best_index = own;
    let mut blocked = BlockedSides::default();

    for n in field.direct_neighbours(x, y) {
        let d = field[n];
        if d < best {
            best = d;
            best_index = n;
        } else if d == UNREACHED {
            blocked.mark((x, y), field.coordinate(n));
        }
    }
    for n in field.diagonal_neighbours(x, y) {
        let d = field[n];
        if d < best && blocked.allows((x, y), field.coordinate(n)) {
            best = d;
            best_index = n;
        }
    }
    best_index
}

/// Like [best_neighbour] but any of the eight neighbours may be chosen.
pub fn best_neighbour_unconstrained(field: &IntegrationField, x: usize, y: usize) -> usize {
    let own = field.get_ix(x, y);
    field
        .all_neighbours(x, y)
        .into_iter()
        .fold((field[own], own), |(best, best_index), n| {
            if field[n] < best {
                (field[n], n)
            } else {
                (best, best_index)
            }
        })
        .1
}

fn best_neighbour_with(
    field: &IntegrationField,
    x: usize,
    y: usize,
    rule: DiagonalRule,
) -> usize {
    match rule {
        DiagonalRule::CornerCutting => best_neighbour_unconstrained(field, x, y),
        DiagonalRule::Occluded => best_neighbour(field, x, y),
    }
}

fn direction_towards(
    field: &IntegrationField,
    x: usize,
    y: usize,
    target: usize,
) -> MovementDirection {
    let (tx, ty) = field.coordinate(target);
    MovementDirection::from_offset(tx as i32 - x as i32, ty as i32 - y as i32)
}

/// Direction of [best_neighbour] from `(x, y)`.
pub fn best_direction(field: &IntegrationField, x: usize, y: usize) -> MovementDirection {
    direction_towards(field, x, y, best_neighbour(field, x, y))
}

/// Per-cell direction under the given diagonal rule.
pub fn generate_direction_field(
    field: &IntegrationField,
    rule: DiagonalRule,
) -> Grid<MovementDirection> {
    let mut directions = Grid::new(field.width(), field.height(), MovementDirection::NONE);
    for i in 0..field.area() {
        let (x, y) = field.coordinate(i);
        directions[i] = direction_towards(field, x, y, best_neighbour_with(field, x, y, rule));
    }
    directions
}

/// Dense vector field: for every cell the angle `atan2(dy, dx)` towards its lowest neighbour,
/// corner cutting allowed. Cells without a better neighbour get `0.0`.
pub fn generate_vector_field(field: &IntegrationField) -> Grid<f32> {
    let mut angles = Grid::new(field.width(), field.height(), 0.0);
    fill_vector_field(field, &mut angles);
    angles
}

/// [generate_vector_field] into an existing grid of the same shape.
pub fn generate_vector_field_into(
    field: &IntegrationField,
    result: &mut Grid<f32>,
) -> Result<(), FieldError> {
    field.check_dimensions(result)?;
    fill_vector_field(field, result);
    Ok(())
}

fn fill_vector_field(field: &IntegrationField, angles: &mut Grid<f32>) {
    for i in 0..field.area() {
        let (x, y) = field.coordinate(i);
        let (bx, by) = field.coordinate(best_neighbour_unconstrained(field, x, y));
        let dx = bx as f32 - x as f32;
        let dy = by as f32 - y as f32;
        angles[i] = dy.atan2(dx);
    }
}

/// Propagates from `goals` and returns the resulting vector field.
pub fn generate_vector_field_from_costs(
    costs: &CostField,
    goals: &[usize],
) -> Result<Grid<f32>, FieldError> {
    let field = IntegrationField::from_costs(costs, goals)?;
    Ok(generate_vector_field(&field))
}

/// Follows [best_neighbour] from `start` until a cell has no better neighbour or `max_steps`
/// moves were made. The returned path starts with `start`; it is empty if `start` is off the grid.
pub fn trace_path(field: &IntegrationField, start: Point, max_steps: usize) -> Vec<Point> {
    if !field.point_in_bounds(start) {
        return Vec::new();
    }
    let mut current = field.get_ix_point(&start);
    let mut path = vec![start];
    for _ in 0..max_steps {
        let (x, y) = field.coordinate(current);
        let next = best_neighbour(field, x, y);
        if next == current {
            break;
        }
        current = next;
        path.push(field.point(current));
    }
    if !field.is_reached(current) {
        debug!("Path traced from {} ended on an unreached cell", start);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const U: u16 = UNREACHED;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn direction_bits_round_trip_offsets() {
        for dx in -1..=1 {
            for dy in -1..=1 {
                let dir = MovementDirection::from_offset(dx, dy);
                assert_eq!(dir.offset(), Point::new(dx, dy));
                assert_eq!(dir.has_magnitude(), dx != 0 || dy != 0);
                assert_eq!(dir.is_diagonal(), dx != 0 && dy != 0);
            }
        }
        assert_eq!(
            MovementDirection::from_vector(-0.5, 2.0).bits(),
            MovementDirection::X | MovementDirection::INVERT_X | MovementDirection::Y
        );
    }

    #[test]
    fn direction_angles() {
        assert!(close(MovementDirection::from_offset(1, 0).angle(), 0.0));
        assert!(close(MovementDirection::from_offset(0, 1).angle(), FRAC_PI_2));
        assert!(close(MovementDirection::from_offset(-1, 0).angle(), PI));
        assert!(close(MovementDirection::from_offset(1, -1).angle(), -FRAC_PI_4));
        assert!(close(MovementDirection::NONE.angle(), 0.0));
        assert!(!MovementDirection::NONE.has_magnitude());
    }

    /// The best diagonal (value 1) lies next to an unreached right-hand neighbour and must not
    /// be picked by the occlusion-aware rule.
    #[test]
    fn occluded_diagonal_is_skipped() {
        #[rustfmt::skip]
        let field = Grid::from_vec(3, 3, vec![
            6, 4, 1,
            6, 5, U,
            6, 6, 6,
        ]).unwrap();
        assert_eq!(best_neighbour(&field, 1, 1), 1);
        assert_eq!(best_neighbour_unconstrained(&field, 1, 1), 2);
        let dir = best_direction(&field, 1, 1);
        assert_eq!(dir.offset(), Point::new(0, -1));
        assert!(close(dir.angle(), -FRAC_PI_2));
    }

    #[test]
    fn open_diagonal_is_taken() {
        #[rustfmt::skip]
        let field = Grid::from_vec(3, 3, vec![
            6, 4, 1,
            6, 5, 6,
            6, 6, 6,
        ]).unwrap();
        assert_eq!(best_neighbour(&field, 1, 1), 2);
    }

    /// An unreached left neighbour blocks the lower-left diagonal but not the lower-right one.
    #[test]
    fn each_diagonal_checks_its_own_sides() {
        #[rustfmt::skip]
        let field = Grid::from_vec(3, 3, vec![
            9, 9, 9,
            U, 8, 9,
            0, 7, 3,
        ]).unwrap();
        assert_eq!(best_neighbour(&field, 1, 1), 8);
        assert_eq!(best_neighbour_unconstrained(&field, 1, 1), 6);
    }

    #[test]
    fn no_better_neighbour_returns_self() {
        #[rustfmt::skip]
        let field = Grid::from_vec(3, 3, vec![
            1, 1, 1,
            1, 0, 1,
            1, 1, 1,
        ]).unwrap();
        assert_eq!(best_neighbour(&field, 1, 1), 4);
        assert_eq!(best_direction(&field, 1, 1), MovementDirection::NONE);
        let isolated = IntegrationField::unreached(2, 2);
        assert_eq!(best_neighbour(&isolated, 1, 0), 1);
    }

    /// Wall at (1, 0), goal at (2, 0). From the centre the goal is diagonal but the route would
    /// clip the wall, so the resolver steps right first.
    ///  ___
    /// |.#G|
    /// |...|
    /// |...|
    ///  ___
    #[test]
    fn propagated_wall_is_not_cut() {
        let mut costs = CostField::new(3, 3, 1);
        costs.set(1, 0, 255);
        let field = IntegrationField::from_costs(&costs, &[2]).unwrap();
        assert_eq!(best_neighbour(&field, 1, 1), 5);
        assert_eq!(best_neighbour_unconstrained(&field, 1, 1), 2);

        let occluded = generate_direction_field(&field, DiagonalRule::Occluded);
        let cutting = generate_direction_field(&field, DiagonalRule::CornerCutting);
        assert_eq!(occluded.get(1, 1).offset(), Point::new(1, 0));
        assert_eq!(cutting.get(1, 1).offset(), Point::new(1, -1));
        assert_eq!(occluded.get(2, 0), MovementDirection::NONE);
    }

    #[test]
    fn vector_field_angles() {
        let costs = CostField::new(3, 3, 1);
        let angles = generate_vector_field_from_costs(&costs, &[4]).unwrap();
        assert!(close(angles.get(0, 0), FRAC_PI_4));
        assert!(close(angles.get(1, 0), FRAC_PI_2));
        assert!(close(angles.get(2, 1), PI));
        assert!(close(angles.get(1, 2), -FRAC_PI_2));
        assert!(close(angles.get(1, 1), 0.0));
    }

    #[test]
    fn vector_field_into_checks_dimensions() {
        let field = IntegrationField::unreached(3, 2);
        let mut wrong = Grid::new(2, 3, 1.0);
        assert!(generate_vector_field_into(&field, &mut wrong).is_err());
        assert!(wrong.cells().iter().all(|&a| a == 1.0));
        let mut right = Grid::new(3, 2, 1.0);
        generate_vector_field_into(&field, &mut right).unwrap();
        assert!(right.cells().iter().all(|&a| a == 0.0));
    }

    #[test]
    fn trace_reaches_goal_diagonally() {
        let costs = CostField::new(5, 5, 1);
        let goal = costs.get_ix(4, 4);
        let field = IntegrationField::from_costs(&costs, &[goal]).unwrap();
        let path = trace_path(&field, Point::new(0, 0), 100);
        assert_eq!(path.len(), 5);
        assert_eq!(path.last(), Some(&Point::new(4, 4)));
        assert!(trace_path(&field, Point::new(-1, 0), 10).is_empty());
        assert_eq!(trace_path(&field, Point::new(0, 0), 2).len(), 3);
    }
}
