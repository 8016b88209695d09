use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CyclePhase {
    Menstruation,
    Follicular,
    Ovulation,
    Luteal,
    #[strum(to_string = "PMS")]
    Pms,
    #[default]
    None,
}

impl CyclePhase {
    /// Case-insensitive lookup by variant name. Unknown names fall back to
    /// [`CyclePhase::Luteal`].
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::iter()
            .find(|phase| phase.to_string().eq_ignore_ascii_case(name))
            .unwrap_or(Self::Luteal)
    }
}
