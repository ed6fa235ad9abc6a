//! Qualitative relations between two temporal extents.
//!
//! An extent is a closed span `[start, end]`; an instant is the degenerate
//! span `[start, start]`. [`relate`] places every pair of spans into exactly
//! one of thirteen relations, and swapping the arguments always yields the
//! [`TemporalRelation::inverse`] of the original answer.
//!
//! Touching spans (`A.end == B.start`) are reported as `precedes` and
//! `follows`; spans with a gap between them are `before` and `after`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalRelation {
    Equivalent,
    Before,
    After,
    Precedes,
    Follows,
    Starts,
    Started,
    Finishes,
    Finished,
    During,
    Contains,
    Overlaps,
    Overlapped,
}

impl TemporalRelation {
    pub const ALL: [TemporalRelation; 13] = [
        TemporalRelation::Equivalent,
        TemporalRelation::Before,
        TemporalRelation::After,
        TemporalRelation::Precedes,
        TemporalRelation::Follows,
        TemporalRelation::Starts,
        TemporalRelation::Started,
        TemporalRelation::Finishes,
        TemporalRelation::Finished,
        TemporalRelation::During,
        TemporalRelation::Contains,
        TemporalRelation::Overlaps,
        TemporalRelation::Overlapped,
    ];

    /// The relation of B to A, given this relation of A to B.
    pub fn inverse(self) -> TemporalRelation {
        use TemporalRelation::*;
        match self {
            Equivalent => Equivalent,
            Before => After,
            After => Before,
            Precedes => Follows,
            Follows => Precedes,
            Starts => Started,
            Started => Starts,
            Finishes => Finished,
            Finished => Finishes,
            During => Contains,
            Contains => During,
            Overlaps => Overlapped,
            Overlapped => Overlaps,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use TemporalRelation::*;
        match self {
            Equivalent => "equivalent",
            Before => "before",
            After => "after",
            Precedes => "precedes",
            Follows => "follows",
            Starts => "starts",
            Started => "started",
            Finishes => "finishes",
            Finished => "finished",
            During => "during",
            Contains => "contains",
            Overlaps => "overlaps",
            Overlapped => "overlapped",
        }
    }
}

impl fmt::Display for TemporalRelation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies span `a` against span `b`. Both spans must satisfy
/// `start <= end` and be totally ordered (no NaN).
pub fn relate<T: PartialOrd>(a: (T, T), b: (T, T)) -> TemporalRelation {
    use TemporalRelation::*;
    let (a_start, a_end) = a;
    let (b_start, b_end) = b;
    if a_start == b_start && a_end == b_end {
        Equivalent
    } else if a_start == b_start {
        if a_end < b_end { Starts } else { Started }
    } else if a_end == b_end {
        if a_start > b_start { Finishes } else { Finished }
    } else if a_end == b_start {
        Precedes
    } else if a_start == b_end {
        Follows
    } else if a_end < b_start {
        Before
    } else if a_start > b_end {
        After
    } else if a_start > b_start && a_end < b_end {
        During
    } else if a_start < b_start && a_end > b_end {
        Contains
    } else if a_start < b_start {
        Overlaps
    } else {
        Overlapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TemporalRelation::*;

    #[test]
    fn inverse_is_an_involution() {
        for relation in TemporalRelation::ALL {
            assert_eq!(relation.inverse().inverse(), relation);
        }
    }

    #[test]
    fn every_relation_is_reachable() {
        let cases = [
            ((0, 1), (2, 3), Before),
            ((2, 3), (0, 1), After),
            ((0, 1), (1, 2), Precedes),
            ((1, 2), (0, 1), Follows),
            ((0, 1), (0, 2), Starts),
            ((0, 2), (0, 1), Started),
            ((1, 2), (0, 2), Finishes),
            ((0, 2), (1, 2), Finished),
            ((1, 2), (0, 3), During),
            ((0, 3), (1, 2), Contains),
            ((0, 2), (1, 3), Overlaps),
            ((1, 3), (0, 2), Overlapped),
            ((0, 1), (0, 1), Equivalent),
        ];
        for (a, b, expected) in cases {
            assert_eq!(relate(a, b), expected, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn instants_relate_to_intervals() {
        assert_eq!(relate((0, 0), (0, 2)), Starts);
        assert_eq!(relate((2, 2), (0, 2)), Finishes);
        assert_eq!(relate((1, 1), (0, 2)), During);
        assert_eq!(relate((3, 3), (0, 2)), After);
        assert_eq!(relate((1, 1), (1, 1)), Equivalent);
        assert_eq!(relate((1, 1), (2, 2)), Before);
    }

    #[test]
    fn display_uses_relation_names() {
        for relation in TemporalRelation::ALL {
            assert_eq!(relation.to_string(), relation.as_str());
        }
    }
}
