use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
    Display, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoodLevel {
    #[strum(to_string = "Very Bad")]
    VeryBad = 1,
    #[strum(to_string = "Bad")]
    Bad = 2,
    #[default]
    #[strum(to_string = "Neutral")]
    Neutral = 3,
    #[strum(to_string = "Good")]
    Good = 4,
    #[strum(to_string = "Very Good")]
    VeryGood = 5,
    #[strum(to_string = "Excellent")]
    Excellent = 6,
}

impl MoodLevel {
    /// Unknown values map to [`MoodLevel::Neutral`].
    pub fn from_value(value: i32) -> Self {
        match value {
            1 => Self::VeryBad,
            2 => Self::Bad,
            4 => Self::Good,
            5 => Self::VeryGood,
            6 => Self::Excellent,
            _ => Self::Neutral,
        }
    }

    pub fn value(self) -> i32 {
        self as i32
    }
}
