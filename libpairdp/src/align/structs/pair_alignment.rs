use std::fmt::{Display, Formatter};

use serde::Serialize;

use super::{Trace, TraceStep};
use crate::alphabet::{GAP, UTF8_PIPE, UTF8_SPACE};
use crate::structs::Sequence;

/// One optimal global alignment of two sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairAlignment {
    /// The optimal value of the table the alignment was traced from
    pub score: i64,
    /// The display for `s`, with gaps
    pub s_aligned: String,
    /// The display for `t`, with gaps
    pub t_aligned: String,
    /// The steps that produced the alignment, from (0, 0) to (m, n)
    #[serde(skip)]
    pub trace: Trace,
}

impl PairAlignment {
    /// Lay out two sequences along a trace.
    ///
    /// The trace must consume exactly `s.length` residues of `s` and
    /// `t.length` residues of `t`.
    pub(crate) fn from_trace(score: i64, trace: Trace, s: &Sequence, t: &Sequence) -> Self {
        let mut s_aligned = String::with_capacity(trace.len());
        let mut t_aligned = String::with_capacity(trace.len());
        // residue 1 is at index 1
        let mut s_idx = 0;
        let mut t_idx = 0;

        for step in trace.iter() {
            match step {
                TraceStep::Diagonal => {
                    s_idx += 1;
                    t_idx += 1;
                    s_aligned.push(char::from(s.utf8_bytes[s_idx]));
                    t_aligned.push(char::from(t.utf8_bytes[t_idx]));
                }
                TraceStep::Up => {
                    s_idx += 1;
                    s_aligned.push(char::from(s.utf8_bytes[s_idx]));
                    t_aligned.push(char::from(GAP));
                }
                TraceStep::Left => {
                    t_idx += 1;
                    s_aligned.push(char::from(GAP));
                    t_aligned.push(char::from(t.utf8_bytes[t_idx]));
                }
            }
        }
        debug_assert_eq!(s_idx, s.length);
        debug_assert_eq!(t_idx, t.length);

        Self {
            score,
            s_aligned,
            t_aligned,
            trace,
        }
    }

    /// The number of columns in the alignment
    pub fn length(&self) -> usize {
        self.trace.len()
    }

    /// The line placed between the aligned sequences: a pipe for each
    /// identical residue pair and a space everywhere else.
    pub fn middle_string(&self) -> String {
        self.s_aligned
            .bytes()
            .zip(self.t_aligned.bytes())
            .map(|(a, b)| {
                if a == b && a != GAP {
                    char::from(UTF8_PIPE)
                } else {
                    char::from(UTF8_SPACE)
                }
            })
            .collect()
    }

    /// The aligned sequences with their gaps removed.
    pub fn ungapped(&self) -> (String, String) {
        let strip = |aligned: &str| aligned.chars().filter(|&c| c != char::from(GAP)).collect();
        (strip(&self.s_aligned), strip(&self.t_aligned))
    }

    /// The number of columns that pair two identical residues.
    pub fn identities(&self) -> usize {
        self.middle_string()
            .bytes()
            .filter(|&b| b == UTF8_PIPE)
            .count()
    }

    pub fn trace_string(&self) -> String {
        self.trace.iter().map(|step| step.as_char()).collect()
    }
}

impl Display for PairAlignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.s_aligned)?;
        writeln!(f, "{}", self.middle_string())?;
        write!(f, "{}", self.t_aligned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_trace() -> anyhow::Result<()> {
        let s = Sequence::from_utf8(b"PRETTY")?;
        let t = Sequence::from_utf8(b"PRTTEIN")?;

        use TraceStep::*;
        let trace = vec![Diagonal, Diagonal, Diagonal, Diagonal, Left, Diagonal, Diagonal];
        let alignment = PairAlignment::from_trace(4, trace, &s, &t);

        assert_eq!(alignment.s_aligned, "PRET-TY");
        assert_eq!(alignment.t_aligned, "PRTTEIN");
        assert_eq!(alignment.length(), 7);
        assert_eq!(alignment.middle_string(), "|| |   ");
        assert_eq!(alignment.identities(), 3);
        assert_eq!(alignment.trace_string(), "DDDDLDD");
        assert_eq!(
            alignment.ungapped(),
            ("PRETTY".to_string(), "PRTTEIN".to_string())
        );
        assert_eq!(format!("{alignment}"), "PRET-TY\n|| |   \nPRTTEIN");
        Ok(())
    }

    #[test]
    fn test_serialize_skips_trace() -> anyhow::Result<()> {
        let s = Sequence::from_utf8(b"A")?;
        let t = Sequence::from_utf8(b"")?;
        let alignment = PairAlignment::from_trace(1, vec![TraceStep::Up], &s, &t);
        let json = serde_json::to_string(&alignment)?;
        assert_eq!(json, r#"{"score":1,"s_aligned":"A","t_aligned":"-"}"#);
        Ok(())
    }
}
