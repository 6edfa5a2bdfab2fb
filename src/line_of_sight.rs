//! Straight-line visibility over a [CostField] using
//! [Bresenham's line algorithm](https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm).
use grid_util::point::Point;

use crate::cost::CostField;
use crate::grid::ValueGrid;
use crate::IMPASSABLE;

/// Iterator over the cells of a rasterised line, both endpoints included.
///
/// The axis with the larger extent drives the walk (the vertical axis on ties) and the endpoints
/// are swapped so that it always advances in increasing order along that axis. Walking `a -> b`
/// and `b -> a` therefore visits the same cells in the same order.
#[derive(Clone, Debug)]
pub struct BresenhamLine {
    current: Point,
    end: i32,
    steep: bool,
    step: i32,
    delta_major: i32,
    delta_minor: i32,
    error: i32,
    done: bool,
}

impl BresenhamLine {
    pub fn new(from: Point, to: Point) -> Self {
        let steep = (to.y - from.y).abs() >= (to.x - from.x).abs();
        let (start, end) = if steep {
            if from.y > to.y {
                (to, from)
            } else {
                (from, to)
            }
        } else if from.x > to.x {
            (to, from)
        } else {
            (from, to)
        };
        let (delta_major, delta_minor) = if steep {
            (end.y - start.y, end.x - start.x)
        } else {
            (end.x - start.x, end.y - start.y)
        };
        let step = if delta_minor < 0 { -1 } else { 1 };
        let delta_minor = delta_minor.abs();
        BresenhamLine {
            current: start,
            end: if steep { end.y } else { end.x },
            steep,
            step,
            delta_major,
            delta_minor,
            error: 2 * delta_minor - delta_major,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let point = self.current;
        let (major, minor) = if self.steep {
            (&mut self.current.y, &mut self.current.x)
        } else {
            (&mut self.current.x, &mut self.current.y)
        };
        if *major == self.end {
            self.done = true;
        } else {
            *major += 1;
            if self.error > 0 {
                *minor += self.step;
                self.error += 2 * (self.delta_minor - self.delta_major);
            } else {
                self.error += 2 * self.delta_minor;
            }
        }
        Some(point)
    }
}

/// The cells between `from` and `to`, both included.
pub fn line_cells(from: Point, to: Point) -> Vec<Point> {
    BresenhamLine::new(from, to).collect()
}

/// Walks the straight line between cells `a` and `b` (linear indices) and sums the cost of every
/// cell on it, endpoints included. Returns `(true, cost)` if the line is clear. On the first
/// impassable cell the walk stops and returns `false` with the cost gathered so far, which callers
/// should ignore.
pub fn direct_path(costs: &CostField, a: usize, b: usize) -> (bool, u32) {
    direct_path_between(costs, costs.point(a), costs.point(b))
}

/// [direct_path] for two in-bounds points.
pub fn direct_path_between(costs: &CostField, from: Point, to: Point) -> (bool, u32) {
    debug_assert!(costs.point_in_bounds(from) && costs.point_in_bounds(to));
    let mut total: u32 = 0;
    for point in BresenhamLine::new(from, to) {
        let cost = costs.get_point(point);
        if cost == IMPASSABLE {
            return (false, total);
        }
        total = total.saturating_add(cost as u32);
    }
    (true, total)
}
