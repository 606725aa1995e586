pub mod structs;

mod error;
pub use error::AlignmentError;

mod cost_model;
pub use cost_model::{CostModel, UnitCost};

mod substitution_matrix;
pub use substitution_matrix::{SubstitutionMatrix, SubstitutionMatrixError};

mod engine;
pub use engine::{align, Objective, COUNT_MODULUS};

mod traceback;
pub use traceback::{trace_path, traceback};

pub use structs::{AlignmentTable, Modes, PairAlignment, Trace, TraceStep};

use crate::structs::Sequence;

/// The minimum number of single residue insertions, deletions,
/// and substitutions that turn `s` into `t`.
pub fn edit_distance(s: &Sequence, t: &Sequence) -> Result<i64, AlignmentError> {
    let table = align(s, t, &UnitCost, Objective::Minimize, Modes::VALUE)?;
    Ok(table.score())
}

/// The number of minimum cost edit alignments of `s` and `t`, modulo `COUNT_MODULUS`.
pub fn count_optimal_alignments(s: &Sequence, t: &Sequence) -> Result<u32, AlignmentError> {
    let table = align(s, t, &UnitCost, Objective::Minimize, Modes::VALUE | Modes::COUNT)?;
    Ok(table.count().unwrap_or_default())
}

/// One minimum cost edit alignment of `s` and `t`.
pub fn edit_alignment(s: &Sequence, t: &Sequence) -> Result<PairAlignment, AlignmentError> {
    let table = align(
        s,
        t,
        &UnitCost,
        Objective::Minimize,
        Modes::VALUE | Modes::TRACEBACK,
    )?;
    traceback(&table, s, t)
}

/// The maximum global alignment score of `s` and `t` under a substitution matrix.
pub fn global_alignment_score(
    s: &Sequence,
    t: &Sequence,
    matrix: &SubstitutionMatrix,
) -> Result<i64, AlignmentError> {
    let table = align(s, t, matrix, Objective::Maximize, Modes::VALUE)?;
    Ok(table.score())
}

pub fn global_alignment(
    s: &Sequence,
    t: &Sequence,
    matrix: &SubstitutionMatrix,
) -> Result<PairAlignment, AlignmentError> {
    let table = align(
        s,
        t,
        matrix,
        Objective::Maximize,
        Modes::VALUE | Modes::TRACEBACK,
    )?;
    traceback(&table, s, t)
}
