use std::io::Write;
use std::ops::BitOr;

use anyhow::Result;

use super::TraceStep;
use crate::align::AlignmentError;

/// The set of companion data an alignment table carries alongside its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modes(u8);

impl Modes {
    /// Optimal values only; this is always implied
    pub const VALUE: Modes = Modes(0b001);
    /// A traceback tag per cell
    pub const TRACEBACK: Modes = Modes(0b010);
    /// A count of optimal paths per cell, modulo `COUNT_MODULUS`
    pub const COUNT: Modes = Modes(0b100);

    #[inline]
    pub fn contains(self, other: Modes) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for Modes {
    fn default() -> Self {
        Modes::VALUE
    }
}

impl BitOr for Modes {
    type Output = Modes;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modes(self.0 | rhs.0)
    }
}

/// The dynamic programming grid for aligning `s` (rows) against `t` (columns).
///
/// Cell (i, j) holds the optimal value of aligning the first i residues of `s`
/// with the first j residues of `t`.
#[derive(Debug, Clone)]
pub struct AlignmentTable {
    pub s_length: usize,
    pub t_length: usize,
    pub modes: Modes,
    /// The optimal values as a flat, row-major vector
    //
    // the data is stored in the following pattern:
    //     [
    //         v_(0, 0), v_(0, 1), ..., v_(0, N),
    //         v_(1, 0), v_(1, 1), ..., v_(1, N),
    //         ...
    //         v_(M, 0), v_(M, 1), ..., v_(M, N),
    //     ]
    //
    // where:
    //
    //     M: <s_length>
    //     N: <t_length>
    //
    values: Vec<i64>,
    /// TraceStep tag bits, laid out like `values`; empty without Modes::TRACEBACK
    tags: Vec<u8>,
    /// Path counts, laid out like `values`; empty without Modes::COUNT
    counts: Vec<u32>,
}

impl AlignmentTable {
    pub fn new(s_length: usize, t_length: usize, modes: Modes) -> Result<Self, AlignmentError> {
        let rows = s_length + 1;
        let cols = t_length + 1;
        let num_cells = rows
            .checked_mul(cols)
            .ok_or(AlignmentError::TableTooLarge { rows, cols })?;

        let companion_length = |mode: Modes| {
            if modes.contains(mode) {
                num_cells
            } else {
                0
            }
        };

        Ok(Self {
            s_length,
            t_length,
            modes,
            values: vec![0; num_cells],
            tags: vec![TraceStep::TAG_NONE; companion_length(Modes::TRACEBACK)],
            counts: vec![0; companion_length(Modes::COUNT)],
        })
    }

    #[inline]
    fn idx(&self, s_idx: usize, t_idx: usize) -> usize {
        debug_assert!(s_idx <= self.s_length);
        debug_assert!(t_idx <= self.t_length);
        s_idx * (self.t_length + 1) + t_idx
    }

    pub fn has_traceback(&self) -> bool {
        self.modes.contains(Modes::TRACEBACK)
    }

    pub fn has_counts(&self) -> bool {
        self.modes.contains(Modes::COUNT)
    }

    #[inline]
    pub fn get_value(&self, s_idx: usize, t_idx: usize) -> i64 {
        self.values[self.idx(s_idx, t_idx)]
    }

    #[inline]
    pub fn set_value(&mut self, s_idx: usize, t_idx: usize, value: i64) {
        let idx = self.idx(s_idx, t_idx);
        self.values[idx] = value;
    }

    #[inline]
    pub fn get_tags(&self, s_idx: usize, t_idx: usize) -> u8 {
        debug_assert!(self.has_traceback());
        self.tags[self.idx(s_idx, t_idx)]
    }

    #[inline]
    pub fn set_tags(&mut self, s_idx: usize, t_idx: usize, tags: u8) {
        debug_assert!(self.has_traceback());
        let idx = self.idx(s_idx, t_idx);
        self.tags[idx] = tags;
    }

    #[inline]
    pub fn get_count(&self, s_idx: usize, t_idx: usize) -> u32 {
        debug_assert!(self.has_counts());
        self.counts[self.idx(s_idx, t_idx)]
    }

    #[inline]
    pub fn set_count(&mut self, s_idx: usize, t_idx: usize, count: u32) {
        debug_assert!(self.has_counts());
        let idx = self.idx(s_idx, t_idx);
        self.counts[idx] = count;
    }

    /// The optimal value of aligning all of `s` with all of `t`.
    pub fn score(&self) -> i64 {
        self.get_value(self.s_length, self.t_length)
    }

    /// The number of optimal alignments, if counts were recorded.
    pub fn count(&self) -> Option<u32> {
        self.has_counts()
            .then(|| self.get_count(self.s_length, self.t_length))
    }

    /// Write the table in a human readable grid.
    ///
    /// Each row of values is followed by a row of traceback tags and
    /// a row of counts when the table carries them.
    pub fn dump(&self, out: &mut impl Write) -> Result<()> {
        let s_idx_width = self.s_length.to_string().len();
        let value_width = self
            .values
            .iter()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1);
        let count_width = self
            .counts
            .iter()
            .map(|c| c.to_string().len())
            .max()
            .unwrap_or(1);
        // 3 fits a cell tagged with every step
        let column_width = value_width
            .max(count_width)
            .max(self.t_length.to_string().len())
            .max(3)
            + 1;

        // write the t indices
        write!(out, "{}", " ".repeat(s_idx_width + 3))?;
        for t_idx in 0..=self.t_length {
            write!(out, "{:>w$}", t_idx, w = column_width)?;
        }
        writeln!(out)?;

        for s_idx in 0..=self.s_length {
            write!(out, "{:w$} V ", s_idx, w = s_idx_width)?;
            for t_idx in 0..=self.t_length {
                write!(out, "{:>w$}", self.get_value(s_idx, t_idx), w = column_width)?;
            }
            writeln!(out)?;

            if self.has_traceback() {
                write!(out, "{:w$} T ", s_idx, w = s_idx_width)?;
                for t_idx in 0..=self.t_length {
                    let tags = self.get_tags(s_idx, t_idx);
                    let label: String = TraceStep::PRIORITY
                        .iter()
                        .filter(|step| tags & step.tag() != 0)
                        .map(|step| step.as_char())
                        .collect();
                    let label = if label.is_empty() { "*".to_string() } else { label };
                    write!(out, "{:>w$}", label, w = column_width)?;
                }
                writeln!(out)?;
            }

            if self.has_counts() {
                write!(out, "{:w$} C ", s_idx, w = s_idx_width)?;
                for t_idx in 0..=self.t_length {
                    write!(out, "{:>w$}", self.get_count(s_idx, t_idx), w = column_width)?;
                }
                writeln!(out)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes() {
        let modes = Modes::VALUE | Modes::COUNT;
        assert!(modes.contains(Modes::VALUE));
        assert!(modes.contains(Modes::COUNT));
        assert!(!modes.contains(Modes::TRACEBACK));
        assert!(!modes.contains(Modes::TRACEBACK | Modes::COUNT));
        assert_eq!(Modes::default(), Modes::VALUE);
    }

    #[test]
    fn test_alignment_table_cells() -> anyhow::Result<()> {
        let mut table = AlignmentTable::new(3, 5, Modes::VALUE | Modes::TRACEBACK | Modes::COUNT)?;

        (0..=3).for_each(|row| {
            (0..=5).for_each(|col| {
                table.set_value(row, col, (row * 10 + col) as i64);
                table.set_count(row, col, (row + col) as u32);
                table.set_tags(row, col, TraceStep::TAG_UP);
            });
        });

        (0..=3).for_each(|row| {
            (0..=5).for_each(|col| {
                assert_eq!(table.get_value(row, col), (row * 10 + col) as i64);
                assert_eq!(table.get_count(row, col), (row + col) as u32);
                assert_eq!(table.get_tags(row, col), TraceStep::TAG_UP);
            });
        });

        assert_eq!(table.score(), 35);
        assert_eq!(table.count(), Some(8));
        Ok(())
    }

    #[test]
    fn test_companions_follow_modes() -> anyhow::Result<()> {
        let table = AlignmentTable::new(4, 2, Modes::VALUE)?;
        assert!(!table.has_traceback());
        assert!(!table.has_counts());
        assert_eq!(table.count(), None);
        assert_eq!(table.values.len(), 15);
        assert!(table.tags.is_empty());
        assert!(table.counts.is_empty());
        Ok(())
    }

    #[test]
    fn test_table_too_large() {
        let result = AlignmentTable::new(usize::MAX - 1, 2, Modes::VALUE);
        assert_eq!(
            result.err(),
            Some(AlignmentError::TableTooLarge {
                rows: usize::MAX,
                cols: 3
            })
        );
    }

    #[test]
    fn test_dump() -> anyhow::Result<()> {
        let mut table = AlignmentTable::new(1, 1, Modes::VALUE | Modes::TRACEBACK)?;
        table.set_value(0, 1, 1);
        table.set_value(1, 0, 1);
        table.set_tags(0, 1, TraceStep::TAG_LEFT);
        table.set_tags(1, 0, TraceStep::TAG_UP);
        table.set_tags(1, 1, TraceStep::TAG_DIAGONAL);

        let mut out: Vec<u8> = vec![];
        table.dump(&mut out)?;
        let text = String::from_utf8(out)?;

        assert_eq!(text, concat!(
                "       0   1\n",
                "0 V    0   1\n",
                "0 T    *   L\n",
                "1 V    1   0\n",
                "1 T    U   D\n",
            ));
        Ok(())
    }
}
