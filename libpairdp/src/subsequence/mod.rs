//! Sequence problems that are solved by small dynamic programs of their own,
//! independent of the alignment engine.

mod lcs;
pub use lcs::longest_common_subsequence;

mod lis;
pub use lis::{longest_decreasing_subsequence, longest_increasing_subsequence};

mod indices;
pub use indices::subsequence_indices;
