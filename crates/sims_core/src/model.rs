use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::demographics::{Age, Gender};

/// The five personality sliders, passed through from the trait vector
/// unmodified.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    pub nice: i16,
    pub active: i16,
    pub playful: i16,
    pub outgoing: i16,
    pub neat: i16,
}

/// Topic affinities on a common 0-1000 scale.
///
/// The fifteen topics merge two historical groups: eight base-game entries
/// stored contiguously in the trait vector and seven expansion entries
/// scattered through it. The groups are normalized independently during
/// decoding because a single record can mix the coarse 0-10 and fine 0-1000
/// encodings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interests {
    pub exercise: i16,
    pub food: i16,
    pub parties: i16,
    pub style: i16,
    pub hollywood: i16,
    pub travel: i16,
    pub violence: i16,
    pub politics: i16,
    pub sixties: i16,
    pub weather: i16,
    pub sports: i16,
    pub music: i16,
    pub outdoors: i16,
    pub technology: i16,
    pub romance: i16,
}

impl Interests {
    pub const TOPIC_COUNT: usize = 15;

    /// Topic names in scoring order.
    pub const TOPIC_NAMES: [&'static str; Self::TOPIC_COUNT] = [
        "exercise",
        "food",
        "parties",
        "style",
        "hollywood",
        "technology",
        "romance",
        "travel",
        "violence",
        "politics",
        "sixties",
        "weather",
        "sports",
        "music",
        "outdoors",
    ];

    /// Values aligned with [`Self::TOPIC_NAMES`].
    pub fn topic_values(&self) -> [i16; Self::TOPIC_COUNT] {
        [
            self.exercise,
            self.food,
            self.parties,
            self.style,
            self.hollywood,
            self.technology,
            self.romance,
            self.travel,
            self.violence,
            self.politics,
            self.sixties,
            self.weather,
            self.sports,
            self.music,
            self.outdoors,
        ]
    }
}

/// Directional relationship edge. Lives in the owning sim's relationship
/// map, keyed by the target sim's local id.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Short-term score, -100 to 100.
    pub daily: i32,
    pub is_friend: bool,
    /// Long-term score, -100 to 100.
    pub lifetime: i32,
}

/// One decoded roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sim {
    /// Local id within the roster chunk; relationship edges and the service
    /// API address sims by this.
    pub id: i16,
    /// Global identifier, stable across the main container and the
    /// per-character files.
    pub guid: u32,
    pub name: String,
    pub age: Age,
    pub gender: Gender,
    /// Raw family number from the trait vector until the orchestrator
    /// re-homes it to the owning family's container id; 0 means unassigned.
    pub family_id: i32,
    /// Zodiac sign index, display only.
    pub zodiac: i16,
    pub personality: Personality,
    pub interests: Interests,
    pub relationships: BTreeMap<i32, Relationship>,
}

/// One decoded family definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    /// Container chunk id; the join key to the family-name string table.
    pub chunk_id: u16,
    pub family_number: i32,
    /// Empty until a string-table chunk sharing the container id resolves it.
    pub name: String,
    pub house_number: i32,
    pub budget: i32,
    pub member_guids: Vec<u32>,
}

/// Display name and optional raw portrait extracted from one character file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInfo {
    pub name: String,
    pub portrait: Option<Vec<u8>>,
}
