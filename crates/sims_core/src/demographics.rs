use std::fmt;

use serde::{Deserialize, Serialize};

/// Age band derived from the trait vector's age entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Age {
    Child,
    Adult,
}

impl Age {
    /// Raw ages below this value are children.
    pub const ADULT_MIN_RAW: i16 = 18;

    pub fn from_raw(raw: i16) -> Self {
        if raw < Self::ADULT_MIN_RAW {
            Self::Child
        } else {
            Self::Adult
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Child => "child",
            Self::Adult => "adult",
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// The trait vector marks female with this sentinel; every other value
    /// decodes as male.
    pub const FEMALE_RAW: i16 = 1;

    pub fn from_raw(raw: i16) -> Self {
        if raw == Self::FEMALE_RAW {
            Self::Female
        } else {
            Self::Male
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
