use thiserror::Error;

/// The ways a single alignment request can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("no substitution score for symbol pair: ({a}, {b})")]
    MissingScore { a: char, b: char },
    #[error("alignment table with {rows} x {cols} cells is too large to allocate")]
    TableTooLarge { rows: usize, cols: usize },
    #[error("alignment table was filled without traceback tags")]
    TracebackNotRecorded,
    #[error("alignment table is {table_s} x {table_t}, but sequences are {s} x {t}")]
    DimensionMismatch {
        table_s: usize,
        table_t: usize,
        s: usize,
        t: usize,
    },
    #[error("broken traceback at cell ({s_idx}, {t_idx})")]
    BrokenTraceback { s_idx: usize, t_idx: usize },
    #[error("alignment value leaves the i64 range at cell ({s_idx}, {t_idx})")]
    ValueOverflow { s_idx: usize, t_idx: usize },
}
