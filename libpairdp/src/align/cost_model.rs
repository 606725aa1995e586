use super::AlignmentError;

/// A pure mapping from a residue pair to the value of aligning them,
/// plus the fixed value of a single gap step.
///
/// Under a minimizing objective these are costs; under a maximizing
/// objective the substitution value is a score and the gap is a penalty
/// that gets subtracted.
pub trait CostModel {
    fn substitution(&self, a: u8, b: u8) -> i64;
    fn gap(&self) -> i64;

    /// Check that every pair of residues drawn from `s` and `t` has a value.
    /// The engine calls this once, before the table fill.
    fn validate(&self, _s: &[u8], _t: &[u8]) -> Result<(), AlignmentError> {
        Ok(())
    }
}

/// Levenshtein costs: 0 for identical residues, 1 for a substitution or a gap.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnitCost;

impl CostModel for UnitCost {
    #[inline]
    fn substitution(&self, a: u8, b: u8) -> i64 {
        if a == b {
            0
        } else {
            1
        }
    }

    #[inline]
    fn gap(&self) -> i64 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_cost() {
        assert_eq!(UnitCost.substitution(b'A', b'A'), 0);
        assert_eq!(UnitCost.substitution(b'A', b'C'), 1);
        // case sensitive, like the residues themselves
        assert_eq!(UnitCost.substitution(b'a', b'A'), 1);
        assert_eq!(UnitCost.gap(), 1);
        assert!(UnitCost.validate(b"ANY", b"THING").is_ok());
    }
}
