use log::debug;

use super::structs::{AlignmentTable, Modes, TraceStep};
use super::{AlignmentError, CostModel};
use crate::structs::Sequence;

/// Path counts are reported modulo this value.
pub const COUNT_MODULUS: u32 = 134_217_727;

/// Which end of the value range the recurrence optimizes toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Values are costs: substitution and gap costs are added, the smallest wins
    Minimize,
    /// Values are scores: substitution scores are added, gap penalties
    /// are subtracted, and the largest wins
    Maximize,
}

impl Objective {
    /// The change in value for a single gap step, if it is representable.
    #[inline]
    pub fn gap_step(self, gap: i64) -> Option<i64> {
        match self {
            Objective::Minimize => Some(gap),
            Objective::Maximize => gap.checked_neg(),
        }
    }

    #[inline]
    pub fn best(self, a: i64, b: i64) -> i64 {
        match self {
            Objective::Minimize => a.min(b),
            Objective::Maximize => a.max(b),
        }
    }
}

#[inline]
fn add_mod(a: u32, b: u32) -> u32 {
    // both operands are already reduced, so this never overflows
    (a + b) % COUNT_MODULUS
}

#[inline]
fn step(value: i64, delta: i64, s_idx: usize, t_idx: usize) -> Result<i64, AlignmentError> {
    value
        .checked_add(delta)
        .ok_or(AlignmentError::ValueOverflow { s_idx, t_idx })
}

/// Fill an alignment table for `s` against `t`.
///
/// The table always holds optimal values. With `Modes::TRACEBACK` it also
/// holds a traceback tag per cell, and with `Modes::COUNT` it holds the
/// number of optimal paths into each cell modulo `COUNT_MODULUS`.
///
/// When counting, a cell's tag records every predecessor that ties for the
/// optimum, since each of them contributes to the count. Without counting,
/// only the first tied predecessor in `TraceStep::PRIORITY` order is
/// recorded. Either way, traceback resolves tags in that same order.
pub fn align(
    s: &Sequence,
    t: &Sequence,
    cost_model: &impl CostModel,
    objective: Objective,
    modes: Modes,
) -> Result<AlignmentTable, AlignmentError> {
    cost_model.validate(s.residues(), t.residues())?;

    let mut table = AlignmentTable::new(s.length, t.length, modes)?;

    let record_tags = modes.contains(Modes::TRACEBACK);
    let record_counts = modes.contains(Modes::COUNT);
    let gap_step = objective
        .gap_step(cost_model.gap())
        .ok_or(AlignmentError::ValueOverflow { s_idx: 0, t_idx: 0 })?;

    debug!(
        "filling {} x {} alignment table: {:?}, {:?}",
        s.length + 1,
        t.length + 1,
        objective,
        modes
    );

    // the (0, 0) cell holds a zero value
    // and is the start of exactly one path
    if record_counts {
        table.set_count(0, 0, 1);
    }

    // the first column aligns a prefix of s against nothing but gaps
    for s_idx in 1..=s.length {
        let value = step(table.get_value(s_idx - 1, 0), gap_step, s_idx, 0)?;
        table.set_value(s_idx, 0, value);
        if record_tags {
            table.set_tags(s_idx, 0, TraceStep::TAG_UP);
        }
        if record_counts {
            table.set_count(s_idx, 0, 1);
        }
    }

    // the first row aligns a prefix of t against nothing but gaps
    for t_idx in 1..=t.length {
        let value = step(table.get_value(0, t_idx - 1), gap_step, 0, t_idx)?;
        table.set_value(0, t_idx, value);
        if record_tags {
            table.set_tags(0, t_idx, TraceStep::TAG_LEFT);
        }
        if record_counts {
            table.set_count(0, t_idx, 1);
        }
    }

    for s_idx in 1..=s.length {
        let s_residue = s.utf8_bytes[s_idx];

        for t_idx in 1..=t.length {
            let t_residue = t.utf8_bytes[t_idx];

            let diagonal_value = step(
                table.get_value(s_idx - 1, t_idx - 1),
                cost_model.substitution(s_residue, t_residue),
                s_idx,
                t_idx,
            )?;
            let up_value = step(table.get_value(s_idx - 1, t_idx), gap_step, s_idx, t_idx)?;
            let left_value = step(table.get_value(s_idx, t_idx - 1), gap_step, s_idx, t_idx)?;

            let best_value = objective.best(diagonal_value, objective.best(up_value, left_value));
            table.set_value(s_idx, t_idx, best_value);

            let mut tied = TraceStep::TAG_NONE;
            if diagonal_value == best_value {
                tied |= TraceStep::TAG_DIAGONAL;
            }
            if up_value == best_value {
                tied |= TraceStep::TAG_UP;
            }
            if left_value == best_value {
                tied |= TraceStep::TAG_LEFT;
            }

            if record_counts {
                let mut count = 0;
                if tied & TraceStep::TAG_DIAGONAL != 0 {
                    count = add_mod(count, table.get_count(s_idx - 1, t_idx - 1));
                }
                if tied & TraceStep::TAG_UP != 0 {
                    count = add_mod(count, table.get_count(s_idx - 1, t_idx));
                }
                if tied & TraceStep::TAG_LEFT != 0 {
                    count = add_mod(count, table.get_count(s_idx, t_idx - 1));
                }
                table.set_count(s_idx, t_idx, count);
            }

            if record_tags {
                let tags = if record_counts {
                    tied
                } else {
                    TraceStep::from_tags(tied).map_or(TraceStep::TAG_NONE, TraceStep::tag)
                };
                table.set_tags(s_idx, t_idx, tags);
            }
        }
    }

    Ok(table)
}
