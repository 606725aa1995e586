use serde::Serialize;

/// One step of a path through an alignment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TraceStep {
    /// Consume one residue from each sequence
    Diagonal,
    /// Consume one residue from `s` only (a gap in `t`)
    Up,
    /// Consume one residue from `t` only (a gap in `s`)
    Left,
}

/// A path through an alignment table, ordered from (0, 0) to (m, n).
pub type Trace = Vec<TraceStep>;

impl TraceStep {
    pub const TAG_NONE: u8 = 0b000;
    pub const TAG_DIAGONAL: u8 = 0b001;
    pub const TAG_UP: u8 = 0b010;
    pub const TAG_LEFT: u8 = 0b100;

    /// The order in which tied steps are resolved into a single step.
    pub const PRIORITY: [TraceStep; 3] = [TraceStep::Diagonal, TraceStep::Up, TraceStep::Left];

    #[inline]
    pub fn tag(self) -> u8 {
        match self {
            TraceStep::Diagonal => Self::TAG_DIAGONAL,
            TraceStep::Up => Self::TAG_UP,
            TraceStep::Left => Self::TAG_LEFT,
        }
    }

    /// Resolve a set of tied steps into the single step that traceback follows.
    #[inline]
    pub fn from_tags(tags: u8) -> Option<TraceStep> {
        Self::PRIORITY
            .into_iter()
            .find(|step| tags & step.tag() != 0)
    }

    pub fn as_char(self) -> char {
        match self {
            TraceStep::Diagonal => 'D',
            TraceStep::Up => 'U',
            TraceStep::Left => 'L',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tags_priority() {
        let all = TraceStep::TAG_DIAGONAL | TraceStep::TAG_UP | TraceStep::TAG_LEFT;
        assert_eq!(TraceStep::from_tags(all), Some(TraceStep::Diagonal));
        assert_eq!(
            TraceStep::from_tags(TraceStep::TAG_UP | TraceStep::TAG_LEFT),
            Some(TraceStep::Up)
        );
        assert_eq!(
            TraceStep::from_tags(TraceStep::TAG_LEFT),
            Some(TraceStep::Left)
        );
        assert_eq!(TraceStep::from_tags(TraceStep::TAG_NONE), None);
    }

    #[test]
    fn test_tags_are_distinct_bits() {
        let tags: Vec<u8> = TraceStep::PRIORITY.iter().map(|s| s.tag()).collect();
        assert_eq!(tags.iter().fold(0, |acc, t| acc | t), 0b111);
        tags.iter().for_each(|t| assert_eq!(t.count_ones(), 1));
    }
}
