pub mod sequence;
pub use sequence::{EmptySequenceError, Sequence, SequenceCountError, UnknownUtf8SequenceByteError};
