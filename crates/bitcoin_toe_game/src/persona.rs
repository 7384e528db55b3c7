//! The two playable personas and what their victories predict.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Identity the human plays as. The computer plays the other one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter, strum::Display,
)]
pub enum Persona {
    /// Contract code 1.
    #[strum(to_string = "Donald Trump")]
    DonaldTrump,
    /// Contract code 2.
    #[strum(to_string = "Kamala Harris")]
    KamalaHarris,
}

/// Which way a persona's win says the BTC price will move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum PriceOutlook {
    /// Price goes up.
    Increase,
    /// Price goes down.
    Decrease,
}

impl Persona {
    /// Persona played by the computer when the human picks `self`.
    pub fn opponent(self) -> Self {
        match self {
            Persona::DonaldTrump => Persona::KamalaHarris,
            Persona::KamalaHarris => Persona::DonaldTrump,
        }
    }

    /// Integer code sent to the contract's `create_game` entry function.
    pub fn code(self) -> u8 {
        match self {
            Persona::DonaldTrump => 1,
            Persona::KamalaHarris => 2,
        }
    }

    /// Price movement announced when this persona wins.
    pub fn outlook(self) -> PriceOutlook {
        match self {
            Persona::KamalaHarris => PriceOutlook::Decrease,
            Persona::DonaldTrump => PriceOutlook::Increase,
        }
    }

    /// Parses a display name or a short alias, case-insensitive.
    #[instrument]
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim().to_lowercase();
        <Persona as strum::IntoEnumIterator>::iter().find(|persona| {
            let full = persona.to_string().to_lowercase();
            full == needle || full.split(' ').any(|part| part == needle)
        })
    }
}
