use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LevelError {
    #[error("invalid difficulty level value: {0}")]
    InvalidLevel(u8),
}

//
// ─── DIFFICULTY LEVEL ─────────────────────────────────────────────────────────
//

/// Four ordered difficulty levels, aligned with the academic quality scale.
///
/// - `Level1`: basic recall
/// - `Level2`: understanding regularities
/// - `Level3`: experiments and inference
/// - `Level4`: synthesis and inquiry
///
/// Levels only ever move one step at a time; see [`DifficultyLevel::step_up`]
/// and [`DifficultyLevel::step_down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DifficultyLevel {
    #[default]
    Level1,
    Level2,
    Level3,
    Level4,
}

impl DifficultyLevel {
    pub const MIN: Self = Self::Level1;
    pub const MAX: Self = Self::Level4;
    pub const ALL: [Self; 4] = [Self::Level1, Self::Level2, Self::Level3, Self::Level4];

    /// Converts a numeric level (1-4) to a `DifficultyLevel`.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::InvalidLevel` if the value is not in the range 1-4.
    pub fn from_u8(value: u8) -> Result<Self, LevelError> {
        match value {
            1 => Ok(Self::Level1),
            2 => Ok(Self::Level2),
            3 => Ok(Self::Level3),
            4 => Ok(Self::Level4),
            _ => Err(LevelError::InvalidLevel(value)),
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        match self {
            Self::Level1 => 1,
            Self::Level2 => 2,
            Self::Level3 => 3,
            Self::Level4 => 4,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Level1 => "Basic",
            Self::Level2 => "Elementary",
            Self::Level3 => "Intermediate",
            Self::Level4 => "Advanced",
        }
    }

    /// Next level up, saturating at `Level4`.
    #[must_use]
    pub fn step_up(self) -> Self {
        match self {
            Self::Level1 => Self::Level2,
            Self::Level2 => Self::Level3,
            Self::Level3 | Self::Level4 => Self::Level4,
        }
    }

    /// Next level down, saturating at `Level1`.
    #[must_use]
    pub fn step_down(self) -> Self {
        match self {
            Self::Level1 | Self::Level2 => Self::Level1,
            Self::Level3 => Self::Level2,
            Self::Level4 => Self::Level3,
        }
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self == Self::MAX
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self == Self::MIN
    }
}

impl TryFrom<u8> for DifficultyLevel {
    type Error = LevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value)
    }
}

impl From<DifficultyLevel> for u8 {
    fn from(level: DifficultyLevel) -> Self {
        level.value()
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{} {}", self.value(), self.label())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
