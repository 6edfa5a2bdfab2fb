use itertools::izip;

use crate::error::FieldError;
use crate::field::IntegrationField;

/// Writes the cell-wise minimum of `a` and `b` into `out`. The result routes every cell to the
/// nearer of the two goal sets without propagating again, provided both fields were computed over
/// the same cost field. Use [combine_into] to overwrite one of the inputs.
pub fn combine_integration_fields(
    a: &IntegrationField,
    b: &IntegrationField,
    out: &mut IntegrationField,
) -> Result<(), FieldError> {
    a.check_dimensions(b)?;
    a.check_dimensions(out)?;
    for (o, &da, &db) in izip!(out.cells_mut(), a.cells(), b.cells()) {
        *o = da.min(db);
    }
    Ok(())
}

/// In-place form of [combine_integration_fields]: `target[i] = min(target[i], other[i])`.
pub fn combine_into(
    target: &mut IntegrationField,
    other: &IntegrationField,
) -> Result<(), FieldError> {
    target.check_dimensions(other)?;
    for (t, &d) in target.cells_mut().iter_mut().zip(other.cells()) {
        *t = (*t).min(d);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostField;
    use crate::grid::ValueGrid;
    use crate::UNREACHED;

    fn fields() -> (IntegrationField, IntegrationField) {
        let mut costs = CostField::new(6, 4, 1);
        costs.set(2, 1, 255);
        costs.set(2, 2, 255);
        let a = IntegrationField::from_costs(&costs, &[0]).unwrap();
        let b = IntegrationField::from_costs(&costs, &[costs.get_ix(5, 3)]).unwrap();
        (a, b)
    }

    #[test]
    fn combine_is_commutative() {
        let (a, b) = fields();
        assert_eq!(a.combined(&b).unwrap(), b.combined(&a).unwrap());
    }

    #[test]
    fn combine_is_idempotent() {
        let (a, _) = fields();
        assert_eq!(a.combined(&a).unwrap(), a);
    }

    /// Combining two single-goal fields equals propagating from both goals at once.
    #[test]
    fn combine_matches_joint_propagation() {
        let mut costs = CostField::new(6, 4, 1);
        costs.set(2, 1, 255);
        costs.set(2, 2, 255);
        let goals = [0, costs.get_ix(5, 3)];
        let joint = IntegrationField::from_costs(&costs, &goals).unwrap();
        let (a, b) = fields();
        let mut out = IntegrationField::unreached(6, 4);
        combine_integration_fields(&a, &b, &mut out).unwrap();
        assert_eq!(out, joint);
    }

    #[test]
    fn combine_in_place() {
        let (mut a, b) = fields();
        let expected = a.combined(&b).unwrap();
        combine_into(&mut a, &b).unwrap();
        assert_eq!(a, expected);
    }

    #[test]
    fn mismatched_dimensions_leave_output_untouched() {
        let (a, _) = fields();
        let b = IntegrationField::unreached(4, 6);
        let mut out = IntegrationField::new(6, 4, 3);
        assert!(combine_integration_fields(&a, &b, &mut out).is_err());
        assert!(out.cells().iter().all(|&d| d == 3));
        let mut small = IntegrationField::unreached(1, 1);
        assert!(combine_integration_fields(&a, &a, &mut small).is_err());
        assert_eq!(small.get_index(0), UNREACHED);
    }
}
