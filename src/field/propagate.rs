use core::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use log::debug;

use crate::cost::CostField;
use crate::error::FieldError;
use crate::field::IntegrationField;
use crate::grid::ValueGrid;
use crate::{IMPASSABLE, UNREACHED};

/// Order in which the open set is drained during propagation. Both produce the same field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Relaxation {
    /// First in, first out. A cell is re-queued every time its distance improves, so it may be
    /// expanded several times.
    #[default]
    Fifo,
    /// Lowest tentative distance first. Each cell is expanded once; stale heap entries are skipped.
    Ordered,
}

/// Fills `result` with the integration field of `costs` towards `goals`, see
/// [generate_integration_field_with].
pub fn generate_integration_field(
    costs: &CostField,
    goals: &[usize],
    result: &mut IntegrationField,
) -> Result<(), FieldError> {
    generate_integration_field_with(costs, goals, result, Relaxation::Fifo)
}

/// Computes the accumulated cost from every cell to the nearest goal over 4-connected moves.
/// Moving into a cell costs that cell's value; impassable cells are never entered. Goals are
/// seeded at `0` whatever their own cost.
///
/// All preconditions are checked before `result` is written: `goals` must be non-empty and in
/// range, and `result` must match the shape of `costs`.
pub fn generate_integration_field_with(
    costs: &CostField,
    goals: &[usize],
    result: &mut IntegrationField,
    relaxation: Relaxation,
) -> Result<(), FieldError> {
    costs.check_dimensions(result)?;
    if goals.is_empty() {
        return Err(FieldError::NoGoals);
    }
    if let Some(&index) = goals.iter().find(|&&g| !costs.contains_index(g)) {
        return Err(FieldError::GoalOutOfBounds {
            index,
            area: costs.area(),
        });
    }

    result.fill(UNREACHED);
    for &goal in goals {
        result[goal] = 0;
    }
    let expanded = match relaxation {
        Relaxation::Fifo => relax_fifo(costs, goals, result),
        Relaxation::Ordered => relax_ordered(costs, goals, result),
    };
    debug!(
        "Integration field {}x{} from {} goal(s): {} expansions ({:?})",
        costs.width(),
        costs.height(),
        goals.len(),
        expanded,
        relaxation
    );
    Ok(())
}

/// Cost of stepping from a cell at `distance` into `neighbour`, if that improves on its record.
#[inline]
fn improved(
    costs: &CostField,
    result: &IntegrationField,
    distance: u16,
    neighbour: usize,
) -> Option<u16> {
    let cost = costs[neighbour];
    if cost == IMPASSABLE {
        return None;
    }
    let candidate = distance as u32 + cost as u32;
    if candidate < result[neighbour] as u32 {
        Some(candidate as u16)
    } else {
        None
    }
}

fn relax_fifo(costs: &CostField, goals: &[usize], result: &mut IntegrationField) -> usize {
    let mut open: VecDeque<usize> = goals.iter().copied().collect();
    let mut expanded = 0;
    while let Some(current) = open.pop_front() {
        expanded += 1;
        let distance = result[current];
        let (x, y) = costs.coordinate(current);
        for neighbour in costs.direct_neighbours(x, y) {
            if let Some(d) = improved(costs, result, distance, neighbour) {
                result[neighbour] = d;
                open.push_back(neighbour);
            }
        }
    }
    expanded
}

fn relax_ordered(costs: &CostField, goals: &[usize], result: &mut IntegrationField) -> usize {
    let mut open: BinaryHeap<Reverse<(u16, usize)>> =
        goals.iter().map(|&g| Reverse((0, g))).collect();
    let mut expanded = 0;
    while let Some(Reverse((distance, current))) = open.pop() {
        // A cheaper route was recorded after this entry was pushed.
        if distance > result[current] {
            continue;
        }
        expanded += 1;
        let (x, y) = costs.coordinate(current);
        for neighbour in costs.direct_neighbours(x, y) {
            if let Some(d) = improved(costs, result, distance, neighbour) {
                result[neighbour] = d;
                open.push(Reverse((d, neighbour)));
            }
        }
    }
    expanded
}
