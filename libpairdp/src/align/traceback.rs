use super::structs::{AlignmentTable, PairAlignment, Trace, TraceStep};
use super::AlignmentError;
use crate::structs::Sequence;

/// Recover one optimal path through a table filled with `Modes::TRACEBACK`.
///
/// The walk starts at (m, n) and follows one tag per cell until it reaches
/// (0, 0). Where a cell carries several tied tags, the first one in
/// `TraceStep::PRIORITY` order is followed. The returned trace is ordered
/// from (0, 0) to (m, n).
pub fn trace_path(table: &AlignmentTable) -> Result<Trace, AlignmentError> {
    if !table.has_traceback() {
        return Err(AlignmentError::TracebackNotRecorded);
    }

    let mut s_idx = table.s_length;
    let mut t_idx = table.t_length;
    let mut trace: Trace = Vec::with_capacity(s_idx + t_idx);

    while s_idx > 0 || t_idx > 0 {
        let step = TraceStep::from_tags(table.get_tags(s_idx, t_idx));

        match step {
            Some(TraceStep::Diagonal) if s_idx > 0 && t_idx > 0 => {
                s_idx -= 1;
                t_idx -= 1;
            }
            Some(TraceStep::Up) if s_idx > 0 => {
                s_idx -= 1;
            }
            Some(TraceStep::Left) if t_idx > 0 => {
                t_idx -= 1;
            }
            // an untagged cell, or a tag that would step off the table
            _ => return Err(AlignmentError::BrokenTraceback { s_idx, t_idx }),
        }

        // the match guards guarantee the step is some
        if let Some(step) = step {
            trace.push(step);
        }
    }

    // the steps were collected from (m, n) back to (0, 0)
    trace.reverse();

    Ok(trace)
}

/// Reconstruct one optimal alignment of `s` and `t` from their table.
pub fn traceback(
    table: &AlignmentTable,
    s: &Sequence,
    t: &Sequence,
) -> Result<PairAlignment, AlignmentError> {
    if table.s_length != s.length || table.t_length != t.length {
        return Err(AlignmentError::DimensionMismatch {
            table_s: table.s_length,
            table_t: table.t_length,
            s: s.length,
            t: t.length,
        });
    }

    let trace = trace_path(table)?;

    Ok(PairAlignment::from_trace(table.score(), trace, s, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{align, Modes, Objective, SubstitutionMatrix, UnitCost};
    use assert2::{check, let_assert};

    fn seq(bytes: &[u8]) -> Sequence {
        Sequence::from_utf8(bytes).expect("test sequences are valid")
    }

    fn trace_edit(s: &[u8], t: &[u8], modes: Modes) -> anyhow::Result<PairAlignment> {
        let (s, t) = (seq(s), seq(t));
        let table = align(&s, &t, &UnitCost, Objective::Minimize, modes)?;
        Ok(traceback(&table, &s, &t)?)
    }

    #[test]
    fn test_identical_sequences_are_all_diagonal() -> anyhow::Result<()> {
        let alignment = trace_edit(b"PLEASANTLY", b"PLEASANTLY", Modes::TRACEBACK)?;
        check!(alignment.score == 0);
        check!(alignment.trace.iter().all(|&s| s == TraceStep::Diagonal));
        check!(alignment.s_aligned == "PLEASANTLY");
        check!(alignment.t_aligned == "PLEASANTLY");
        Ok(())
    }

    #[test]
    fn test_pretty_prttein() -> anyhow::Result<()> {
        let alignment = trace_edit(b"PRETTY", b"PRTTEIN", Modes::TRACEBACK)?;
        check!(alignment.score == 4);
        check!(alignment.s_aligned.len() == alignment.t_aligned.len());
        check!(alignment.ungapped() == ("PRETTY".to_string(), "PRTTEIN".to_string()));

        // the alignment's own cost must equal the optimal value
        let cost: i64 = alignment
            .s_aligned
            .bytes()
            .zip(alignment.t_aligned.bytes())
            .map(|(a, b)| if a == b { 0 } else { 1 })
            .sum();
        check!(cost == 4);
        Ok(())
    }

    #[test]
    fn test_tie_break_prefers_diagonal_then_up() -> anyhow::Result<()> {
        // A vs AA: matching the first A and inserting the second ties
        // with inserting the first and matching the second
        let alignment = trace_edit(b"A", b"AA", Modes::TRACEBACK)?;
        check!(alignment.s_aligned == "-A");
        check!(alignment.t_aligned == "AA");

        // AA vs A: deleting either A ties
        let alignment = trace_edit(b"AA", b"A", Modes::TRACEBACK)?;
        check!(alignment.s_aligned == "AA");
        check!(alignment.t_aligned == "-A");
        Ok(())
    }

    #[test]
    fn test_counting_does_not_change_the_traced_alignment() -> anyhow::Result<()> {
        let cases: [(&[u8], &[u8]); 4] = [
            (b"PLEASANTLY", b"MEANLY"),
            (b"ABAB", b"BABA"),
            (b"GATTACA", b"GCATGC"),
            (b"A", b"AA"),
        ];
        for (s, t) in cases {
            let single = trace_edit(s, t, Modes::TRACEBACK)?;
            let with_counts = trace_edit(s, t, Modes::TRACEBACK | Modes::COUNT)?;
            check!(single == with_counts);
        }
        Ok(())
    }

    #[test]
    fn test_empty_sides() -> anyhow::Result<()> {
        let alignment = trace_edit(b"ABC", b"", Modes::TRACEBACK)?;
        check!(alignment.s_aligned == "ABC");
        check!(alignment.t_aligned == "---");
        check!(alignment.score == 3);

        let alignment = trace_edit(b"", b"AB", Modes::TRACEBACK)?;
        check!(alignment.s_aligned == "--");
        check!(alignment.t_aligned == "AB");

        let alignment = trace_edit(b"", b"", Modes::TRACEBACK)?;
        check!(alignment.length() == 0);
        check!(alignment.score == 0);
        Ok(())
    }

    #[test]
    fn test_global_alignment_traceback() -> anyhow::Result<()> {
        let blosum = SubstitutionMatrix::blosum62(5)?;
        let (s, t) = (seq(b"PLEASANTLY"), seq(b"MEANLY"));
        let table = align(&s, &t, &blosum, Objective::Maximize, Modes::TRACEBACK)?;
        let alignment = traceback(&table, &s, &t)?;

        check!(alignment.score == 8);

        // rescoring the alignment column by column gives the optimal score
        let rescored: i64 = alignment
            .s_aligned
            .bytes()
            .zip(alignment.t_aligned.bytes())
            .map(|(a, b)| match blosum.score(a, b) {
                Some(score) => score,
                None => -blosum.gap_penalty(),
            })
            .sum();
        check!(rescored == 8);
        Ok(())
    }

    #[test]
    fn test_errors() -> anyhow::Result<()> {
        let (s, t) = (seq(b"ACGT"), seq(b"AGT"));

        let table = align(&s, &t, &UnitCost, Objective::Minimize, Modes::VALUE)?;
        let_assert!(Err(err) = traceback(&table, &s, &t));
        check!(err == AlignmentError::TracebackNotRecorded);

        let table = align(&s, &t, &UnitCost, Objective::Minimize, Modes::TRACEBACK)?;
        let_assert!(Err(err) = traceback(&table, &t, &s));
        check!(
            err == AlignmentError::DimensionMismatch {
                table_s: 4,
                table_t: 3,
                s: 3,
                t: 4
            }
        );

        let mut broken = table.clone();
        broken.set_tags(4, 3, TraceStep::TAG_NONE);
        let_assert!(Err(err) = trace_path(&broken));
        check!(err == AlignmentError::BrokenTraceback { s_idx: 4, t_idx: 3 });

        let mut broken = table;
        broken.set_tags(0, 3, TraceStep::TAG_UP);
        broken.set_tags(1, 3, TraceStep::TAG_UP);
        broken.set_tags(2, 3, TraceStep::TAG_UP);
        broken.set_tags(3, 3, TraceStep::TAG_UP);
        broken.set_tags(4, 3, TraceStep::TAG_UP);
        let_assert!(Err(err) = trace_path(&broken));
        check!(err == AlignmentError::BrokenTraceback { s_idx: 0, t_idx: 3 });
        Ok(())
    }
}
