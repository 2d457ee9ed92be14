use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Segment number of the bullseye.
pub const BULL: u8 = 25;
/// Highest numbered segment on the board.
pub const MAX_SEGMENT: u8 = 20;
/// Darts a player throws per turn.
pub const DARTS_PER_TURN: u8 = 3;

/// A single dart landing, validated at construction.
///
/// The score is derived once and stored so sealed turn records stay
/// self-contained when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dart {
    /// Board segment hit: 1-20 or 25 for the bull.
    pub segment: u8,
    /// Ring multiplier: 1 single, 2 double, 3 triple.
    pub multiplier: u8,
    /// Points scored by this dart.
    pub score: i32,
}

impl Dart {
    /// Validate a board hit and compute its score.
    ///
    /// The bull only exists as a single (25) or double (50); a triple
    /// bull is rejected along with out-of-range segments and
    /// multipliers.
    pub fn new(segment: u8, multiplier: u8) -> Result<Self, EngineError> {
        let segment_ok = (1..=MAX_SEGMENT).contains(&segment) || segment == BULL;
        let multiplier_ok = (1..=3).contains(&multiplier) && !(segment == BULL && multiplier == 3);

        if !segment_ok || !multiplier_ok {
            return Err(EngineError::InvalidThrow {
                segment,
                multiplier,
            });
        }

        Ok(Self {
            segment,
            multiplier,
            score: score_for(segment, multiplier),
        })
    }

    /// Whether the dart landed in the double ring (or the inner bull).
    pub fn is_double(&self) -> bool {
        self.multiplier == 2
    }

    /// Whether the dart landed in the triple ring.
    pub fn is_triple(&self) -> bool {
        self.multiplier == 3
    }

    /// Whether the dart hit the bull, single or double.
    pub fn is_bull(&self) -> bool {
        self.segment == BULL
    }
}

/// Points for a hit: `segment * multiplier`, except the bull which is
/// worth 25 as a single and 50 as a double.
fn score_for(segment: u8, multiplier: u8) -> i32 {
    if segment == BULL {
        if multiplier == 2 { 50 } else { 25 }
    } else {
        i32::from(segment) * i32::from(multiplier)
    }
}
