//! Typed results returned by the pipeline facade.

use serde::{Deserialize, Serialize};

/// A generated non-player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcProfile {
    pub character_name: String,
    pub physical_description: String,
    pub personality: String,
}

impl NpcProfile {
    /// `(character_name, physical_description, personality)`
    pub fn into_parts(self) -> (String, String, String) {
        (
            self.character_name,
            self.physical_description,
            self.personality,
        )
    }
}

/// A generated place. `place_name` is always the caller's value.
///
/// Serialized in camelCase, the shape the browser client reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceProfile {
    pub place_name: String,
    pub long_description: String,
    pub secrets: String,
}

impl PlaceProfile {
    /// `(place_name, long_description, secrets)`
    pub fn into_parts(self) -> (String, String, String) {
        (self.place_name, self.long_description, self.secrets)
    }
}
