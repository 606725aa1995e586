mod alignment_table;
pub use alignment_table::{AlignmentTable, Modes};

mod pair_alignment;
pub use pair_alignment::PairAlignment;

mod trace;
pub use trace::{Trace, TraceStep};
