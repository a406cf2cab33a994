//! Template catalog: maps a [`RequestType`] to its prompt template and schema.
//!
//! Templates carry `{placeholder}` tokens that the prompt assembler fills in:
//!
//! | Placeholder | Source |
//! |-------------|--------|
//! | `{system_context}` | `general_system_context` configuration |
//! | `{world_context}` | `general_world_context` configuration |
//! | `{seed_text}` | caller-supplied seed (e.g. a short place description) |
//! | `{format_directive}` | derived from the request type's [`SchemaSpec`] |
//!
//! Adding a request type means adding one template and one schema entry here.

pub mod schema;

pub use schema::{SchemaSpec, CHARACTER_SCHEMA, PLACE_SCHEMA};

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of narrative content requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    MeetCharacter,
    DiscoverPlace,
    LocationOverview,
    /// Reserved, no template yet.
    CityOverview,
    /// Reserved, no template yet.
    RandomEncounter,
}

impl RequestType {
    pub const ALL: [RequestType; 5] = [
        RequestType::MeetCharacter,
        RequestType::DiscoverPlace,
        RequestType::LocationOverview,
        RequestType::CityOverview,
        RequestType::RandomEncounter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::MeetCharacter => "meet_character",
            RequestType::DiscoverPlace => "discover_place",
            RequestType::LocationOverview => "location_overview",
            RequestType::CityOverview => "city_overview",
            RequestType::RandomEncounter => "random_encounter",
        }
    }

    pub fn is_implemented(&self) -> bool {
        !matches!(
            self,
            RequestType::CityOverview | RequestType::RandomEncounter
        )
    }

    /// Required fields of the backend reply for this request type.
    pub fn schema(&self) -> Result<SchemaSpec> {
        match self {
            RequestType::MeetCharacter => Ok(CHARACTER_SCHEMA),
            RequestType::DiscoverPlace | RequestType::LocationOverview => Ok(PLACE_SCHEMA),
            RequestType::CityOverview | RequestType::RandomEncounter => {
                Err(Error::unsupported_request_type(self.as_str()))
            }
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RequestType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::unsupported_request_type(s))
    }
}

/// System/user message pair with unresolved placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub request_type: RequestType,
    pub system: &'static str,
    pub user: &'static str,
}

impl Template {
    pub fn needs_seed_text(&self) -> bool {
        self.system.contains("{seed_text}") || self.user.contains("{seed_text}")
    }
}

const NARRATOR_SYSTEM: &str = "{system_context}";

const MEET_CHARACTER_USER: &str = concat!(
    "Using the following general context of the world: {world_context}, ",
    "Please describe a new NPC character in this world. This person is likely a normal person ",
    "of average looks and wit, not a hero or heroic character.\n\n",
    "Include a detailed physical description, noting any clothes or unusual items they may be carrying. ",
    "All descriptions must be of visible or noticeable things, not insider knowledge. ",
    "Additionally, provide a description of their personality, tendencies, and outlook on the world.\n\n",
    "{format_directive}"
);

// The two place templates must stay parallel; only the scale framing differs.
macro_rules! place_template {
    ($scale:literal) => {
        concat!(
            "Using the following general context of the world: {world_context}, ",
            "Please describe a place the characters have just come upon. ",
            $scale,
            " The players know it only as: {seed_text}\n\n",
            "Write a long description of what a newcomer notices on arrival: sights, sounds, smells, ",
            "notable features and anyone present. All of it must be visible or noticeable, not insider knowledge. ",
            "Separately, describe the secrets of the place: hidden features, concealed motives or buried history ",
            "that only the game master should know.\n\n",
            "{format_directive}"
        )
    };
}

const DISCOVER_PLACE_USER: &str = place_template!(
    "It is a small area, such as a single building, a room, a camp or a clearing, that can be explored on foot within minutes."
);

const LOCATION_OVERVIEW_USER: &str = place_template!(
    "It is a large area, such as a town, a district, a forest or a valley, that takes hours or days to explore; give an overview of the whole region."
);

/// Look up the template for a request type.
pub fn template(request_type: RequestType) -> Result<Template> {
    let user = match request_type {
        RequestType::MeetCharacter => MEET_CHARACTER_USER,
        RequestType::DiscoverPlace => DISCOVER_PLACE_USER,
        RequestType::LocationOverview => LOCATION_OVERVIEW_USER,
        RequestType::CityOverview | RequestType::RandomEncounter => {
            return Err(Error::unsupported_request_type(request_type.as_str()))
        }
    };
    Ok(Template {
        request_type,
        system: NARRATOR_SYSTEM,
        user,
    })
}
