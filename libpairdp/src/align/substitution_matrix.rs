use std::fmt::{Debug, Formatter};
use std::path::Path;

use anyhow::Context;
use thiserror::Error;

use super::{AlignmentError, CostModel};
use crate::alphabet::{AMINO_ALPHABET, UTF8_TO_AMINO_IDX};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionMatrixError {
    #[error("substitution matrix has no header line")]
    Empty,
    #[error("substitution matrix symbol is not a single character: {0}")]
    BadSymbol(String),
    #[error("substitution matrix symbol appears twice: {0}")]
    DuplicateSymbol(char),
    #[error("substitution matrix row {symbol} has {found} scores, expected {expected}")]
    RowLength {
        symbol: char,
        expected: usize,
        found: usize,
    },
    #[error("substitution matrix row {found} is out of order, expected {expected}")]
    RowOrder { expected: char, found: char },
    #[error("substitution matrix has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },
    #[error("substitution matrix score is not an integer: {0}")]
    BadScore(String),
    #[error("substitution matrix is not symmetric at ({a}, {b})")]
    Asymmetric { a: char, b: char },
    #[error("gap penalty must not be negative: {0}")]
    NegativeGapPenalty(i64),
    #[error("gap penalty is larger than {max}: {0}", max = SubstitutionMatrix::MAX_MAGNITUDE)]
    GapPenaltyTooLarge(i64),
    #[error("substitution matrix score is outside ±{max}: {0}", max = SubstitutionMatrix::MAX_MAGNITUDE)]
    ScoreTooLarge(i64),
}

/// The standard BLOSUM62 scores, indexed in the order of `AMINO_ALPHABET`.
#[rustfmt::skip]
const BLOSUM62_SCORES: [[i64; 20]; 20] = [
    //A   C   D   E   F   G   H   I   K   L   M   N   P   Q   R   S   T   V   W   Y
    [ 4,  0, -2, -1, -2,  0, -2, -1, -1, -1, -1, -2, -1, -1, -1,  1,  0,  0, -3, -2], // A
    [ 0,  9, -3, -4, -2, -3, -3, -1, -3, -1, -1, -3, -3, -3, -3, -1, -1, -1, -2, -2], // C
    [-2, -3,  6,  2, -3, -1, -1, -4, -1, -4, -3,  1, -1,  0, -2,  0, -1, -3, -4, -3], // D
    [-1, -4,  2,  5, -3, -2,  0, -3,  1, -3, -2,  0, -1,  2,  0,  0, -1, -2, -3, -2], // E
    [-2, -2, -3, -3,  6, -3, -1,  0, -3,  0,  0, -3, -4, -3, -3, -2, -2, -1,  1,  3], // F
    [ 0, -3, -1, -2, -3,  6, -2, -4, -2, -4, -3,  0, -2, -2, -2,  0, -2, -3, -2, -3], // G
    [-2, -3, -1,  0, -1, -2,  8, -3, -1, -3, -2,  1, -2,  0,  0, -1, -2, -3, -2,  2], // H
    [-1, -1, -4, -3,  0, -4, -3,  4, -3,  2,  1, -3, -3, -3, -3, -2, -1,  3, -3, -1], // I
    [-1, -3, -1,  1, -3, -2, -1, -3,  5, -2, -1,  0, -1,  1,  2,  0, -1, -2, -3, -2], // K
    [-1, -1, -4, -3,  0, -4, -3,  2, -2,  4,  2, -3, -3, -2, -2, -2, -1,  1, -2, -1], // L
    [-1, -1, -3, -2,  0, -3, -2,  1, -1,  2,  5, -2, -2,  0, -1, -1, -1,  1, -1, -1], // M
    [-2, -3,  1,  0, -3,  0,  1, -3,  0, -3, -2,  6, -2,  0,  0,  1,  0, -3, -4, -2], // N
    [-1, -3, -1, -1, -4, -2, -2, -3, -1, -3, -2, -2,  7, -1, -2, -1, -1, -2, -4, -3], // P
    [-1, -3,  0,  2, -3, -2,  0, -3,  1, -2,  0,  0, -1,  5,  1,  0, -1, -2, -2, -1], // Q
    [-1, -3, -2,  0, -3, -2,  0, -3,  2, -2, -1,  0, -2,  1,  5, -1, -1, -3, -3, -2], // R
    [ 1, -1,  0,  0, -2,  0, -1, -2,  0, -2, -1,  1, -1,  0, -1,  4,  1, -1, -3, -2], // S
    [ 0, -1, -1, -1, -2, -2, -2, -1, -1, -1, -1,  0, -1, -1, -1,  1,  5,  0, -2, -2], // T
    [ 0, -1, -3, -2, -1, -3, -3,  3, -2,  1,  1, -3, -2, -2, -3, -1,  0,  4, -3, -1], // V
    [-3, -2, -4, -3,  1, -2, -2, -3, -3, -2, -1, -4, -4, -2, -3, -3, -2, -3, 11,  2], // W
    [-2, -2, -3, -2,  3, -3,  2, -1, -2, -1, -1, -2, -3, -1, -2, -2, -2, -1,  2,  7], // Y
];

/// A symmetric table of residue pair scores with a linear gap penalty.
#[derive(Clone, PartialEq, Eq)]
pub struct SubstitutionMatrix {
    /// The residues in row/column order
    symbols: Vec<u8>,
    /// Maps a UTF8 byte to its row/column, if it has one
    symbol_indices: [Option<usize>; 256],
    /// Row-major scores, symbols.len() x symbols.len()
    scores: Vec<i64>,
    /// The positive penalty subtracted for each gap step
    gap_penalty: i64,
}

impl SubstitutionMatrix {
    pub const DEFAULT_GAP_PENALTY: i64 = 5;
    /// Bound on the magnitude of every score and of the gap penalty
    pub const MAX_MAGNITUDE: i64 = i32::MAX as i64;

    pub fn blosum62(gap_penalty: i64) -> Result<Self, SubstitutionMatrixError> {
        check_gap_penalty(gap_penalty)?;

        let symbols: Vec<u8> = AMINO_ALPHABET.iter().map(|s| s.as_bytes()[0]).collect();

        let mut symbol_indices = [None; 256];
        // the amino map covers both upper and lower case
        for (&byte, &idx) in UTF8_TO_AMINO_IDX.entries() {
            symbol_indices[byte as usize] = Some(idx as usize);
        }

        let scores = BLOSUM62_SCORES.iter().flatten().copied().collect();

        Ok(Self {
            symbols,
            symbol_indices,
            scores,
            gap_penalty,
        })
    }

    /// Parse a matrix from the whitespace separated table format:
    ///
    /// ```text
    ///    A  C  D
    /// A  4  0 -2
    /// C  0  9 -3
    /// D -2 -3  6
    /// ```
    ///
    /// Rows must follow the header order, and the table must be symmetric.
    /// Lines that are empty or start with `#` are skipped.
    pub fn parse(text: &str, gap_penalty: i64) -> Result<Self, SubstitutionMatrixError> {
        check_gap_penalty(gap_penalty)?;

        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'));

        let header = lines.next().ok_or(SubstitutionMatrixError::Empty)?;
        let symbols = header
            .split_whitespace()
            .map(parse_symbol)
            .collect::<Result<Vec<u8>, _>>()?;

        let mut symbol_indices: [Option<usize>; 256] = [None; 256];
        for (idx, &symbol) in symbols.iter().enumerate() {
            if symbol_indices[symbol as usize].is_some() {
                return Err(SubstitutionMatrixError::DuplicateSymbol(char::from(symbol)));
            }
            symbol_indices[symbol as usize] = Some(idx);
        }

        let mut scores: Vec<i64> = Vec::with_capacity(symbols.len() * symbols.len());
        let mut row_count = 0;

        for line in lines {
            let mut tokens = line.split_whitespace();
            // the filter above guarantees at least one token
            let row_symbol = match tokens.next() {
                Some(token) => parse_symbol(token)?,
                None => continue,
            };

            let expected = match symbols.get(row_count) {
                Some(&symbol) => symbol,
                None => {
                    return Err(SubstitutionMatrixError::RowCount {
                        expected: symbols.len(),
                        found: row_count + 1,
                    })
                }
            };

            if row_symbol != expected {
                return Err(SubstitutionMatrixError::RowOrder {
                    expected: char::from(expected),
                    found: char::from(row_symbol),
                });
            }

            let row = tokens
                .map(|token| {
                    let score = token
                        .parse::<i64>()
                        .map_err(|_| SubstitutionMatrixError::BadScore(token.to_string()))?;
                    if score.abs() > Self::MAX_MAGNITUDE {
                        return Err(SubstitutionMatrixError::ScoreTooLarge(score));
                    }
                    Ok(score)
                })
                .collect::<Result<Vec<i64>, _>>()?;

            if row.len() != symbols.len() {
                return Err(SubstitutionMatrixError::RowLength {
                    symbol: char::from(row_symbol),
                    expected: symbols.len(),
                    found: row.len(),
                });
            }

            scores.extend(row);
            row_count += 1;
        }

        if row_count != symbols.len() {
            return Err(SubstitutionMatrixError::RowCount {
                expected: symbols.len(),
                found: row_count,
            });
        }

        let size = symbols.len();
        for row in 0..size {
            for col in (row + 1)..size {
                if scores[row * size + col] != scores[col * size + row] {
                    return Err(SubstitutionMatrixError::Asymmetric {
                        a: char::from(symbols[row]),
                        b: char::from(symbols[col]),
                    });
                }
            }
        }

        // a table written in one case also answers for the other,
        // unless the other case has its own row
        for &symbol in symbols.iter() {
            let other = if symbol.is_ascii_uppercase() {
                symbol.to_ascii_lowercase()
            } else {
                symbol.to_ascii_uppercase()
            };
            if symbol_indices[other as usize].is_none() {
                symbol_indices[other as usize] = symbol_indices[symbol as usize];
            }
        }

        Ok(Self {
            symbols,
            symbol_indices,
            scores,
            gap_penalty,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P, gap_penalty: i64) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "failed to read substitution matrix: {}",
                path.as_ref().to_string_lossy()
            )
        })?;

        Self::parse(&text, gap_penalty).with_context(|| {
            format!(
                "failed to parse substitution matrix: {}",
                path.as_ref().to_string_lossy()
            )
        })
    }

    /// Returns a copy of this matrix that uses a different gap penalty.
    pub fn with_gap_penalty(&self, gap_penalty: i64) -> Result<Self, SubstitutionMatrixError> {
        check_gap_penalty(gap_penalty)?;
        Ok(Self {
            gap_penalty,
            ..self.clone()
        })
    }

    pub fn gap_penalty(&self) -> i64 {
        self.gap_penalty
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    #[inline]
    pub fn score(&self, a: u8, b: u8) -> Option<i64> {
        let row = self.symbol_indices[a as usize]?;
        let col = self.symbol_indices[b as usize]?;
        Some(self.scores[row * self.symbols.len() + col])
    }
}

impl CostModel for SubstitutionMatrix {
    #[inline]
    fn substitution(&self, a: u8, b: u8) -> i64 {
        // every pair is checked by validate() before the table fill
        self.score(a, b).unwrap_or_default()
    }

    #[inline]
    fn gap(&self) -> i64 {
        self.gap_penalty
    }

    fn validate(&self, s: &[u8], t: &[u8]) -> Result<(), AlignmentError> {
        let s_symbols = distinct_bytes(s);
        let t_symbols = distinct_bytes(t);

        for &a in s_symbols.iter() {
            for &b in t_symbols.iter() {
                if self.score(a, b).is_none() {
                    return Err(AlignmentError::MissingScore {
                        a: char::from(a),
                        b: char::from(b),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Debug for SubstitutionMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "  ")?;
        for &symbol in self.symbols.iter() {
            write!(f, "{:>4}", char::from(symbol))?;
        }
        writeln!(f)?;

        for (row, &symbol) in self.symbols.iter().enumerate() {
            write!(f, "{} ", char::from(symbol))?;
            for col in 0..self.symbols.len() {
                write!(f, "{:>4}", self.scores[row * self.symbols.len() + col])?;
            }
            writeln!(f)?;
        }
        write!(f, "gap penalty: {}", self.gap_penalty)
    }
}

fn check_gap_penalty(gap_penalty: i64) -> Result<(), SubstitutionMatrixError> {
    if gap_penalty < 0 {
        Err(SubstitutionMatrixError::NegativeGapPenalty(gap_penalty))
    } else if gap_penalty > SubstitutionMatrix::MAX_MAGNITUDE {
        Err(SubstitutionMatrixError::GapPenaltyTooLarge(gap_penalty))
    } else {
        Ok(())
    }
}

fn parse_symbol(token: &str) -> Result<u8, SubstitutionMatrixError> {
    match token.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(SubstitutionMatrixError::BadSymbol(token.to_string())),
    }
}

fn distinct_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut seen = [false; 256];
    bytes.iter().for_each(|&b| seen[b as usize] = true);
    (0..=255u8).filter(|&b| seen[b as usize]).collect()
}
