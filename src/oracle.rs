//! Yes/no oracle answered by a six-sided die.

use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OracleAnswer {
    NoAnd,
    No,
    NoBut,
    YesBut,
    Yes,
    YesAnd,
}

/// Die faces 1 through 6, in order.
const FACES: [OracleAnswer; 6] = [
    OracleAnswer::NoAnd,
    OracleAnswer::No,
    OracleAnswer::NoBut,
    OracleAnswer::YesBut,
    OracleAnswer::Yes,
    OracleAnswer::YesAnd,
];

impl OracleAnswer {
    /// Answer for a d6 face; `None` outside 1..=6.
    pub fn from_roll(roll: u8) -> Option<Self> {
        let index = usize::from(roll).checked_sub(1)?;
        FACES.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OracleAnswer::NoAnd => "No, and",
            OracleAnswer::No => "No",
            OracleAnswer::NoBut => "No, but",
            OracleAnswer::YesBut => "Yes, but",
            OracleAnswer::Yes => "Yes",
            OracleAnswer::YesAnd => "Yes, and",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(
            self,
            OracleAnswer::YesBut | OracleAnswer::Yes | OracleAnswer::YesAnd
        )
    }
}

impl fmt::Display for OracleAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializes as `{"response": "<answer>"}`, the body the browser client reads.
impl Serialize for OracleAnswer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("OracleAnswer", 1)?;
        state.serialize_field("response", self.as_str())?;
        state.end()
    }
}

/// Roll the die and answer.
pub fn consult<R: Rng + ?Sized>(rng: &mut R) -> OracleAnswer {
    FACES[rng.gen_range(0..FACES.len())]
}
