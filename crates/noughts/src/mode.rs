//! Opponent mode selection.

use serde::{Deserialize, Serialize};

/// Who sits across the board from the human at the keyboard.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Opponent {
    /// Two humans share the keyboard.
    Human,
    /// The computer plays one mark.
    #[default]
    Computer,
}

impl Opponent {
    /// Returns display name.
    pub fn name(&self) -> &str {
        match self {
            Opponent::Human => "Human vs Human",
            Opponent::Computer => "Human vs Computer",
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Opponent::Human => Opponent::Computer,
            Opponent::Computer => Opponent::Human,
        }
    }
}
