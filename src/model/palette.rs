//! Fixed color palette for intervals

use serde::{Deserialize, Serialize};

/// One palette entry with its background and matching text color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub id: &'static str,
    pub name: &'static str,
    pub bg: &'static str,
    pub text: &'static str,
}

/// Color tag of an interval.
///
/// Serialized as the palette id (`"light-gray"`). Unknown ids read back as
/// the first palette entry so stored timers never fail to load over a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IntervalColor {
    #[default]
    Red,
    Maroon,
    Orange,
    Yellow,
    Gold,
    Green,
    Teal,
    Blue,
    Navy,
    Purple,
    Pink,
    White,
    LightGray,
    DarkGray,
    Black,
}

impl IntervalColor {
    /// Every color in palette order
    pub const ALL: [IntervalColor; 15] = [
        IntervalColor::Red,
        IntervalColor::Maroon,
        IntervalColor::Orange,
        IntervalColor::Yellow,
        IntervalColor::Gold,
        IntervalColor::Green,
        IntervalColor::Teal,
        IntervalColor::Blue,
        IntervalColor::Navy,
        IntervalColor::Purple,
        IntervalColor::Pink,
        IntervalColor::White,
        IntervalColor::LightGray,
        IntervalColor::DarkGray,
        IntervalColor::Black,
    ];

    pub fn swatch(self) -> Swatch {
        let (id, name, bg, text) = match self {
            IntervalColor::Red => ("red", "Red", "#FF0000", "#FFFFFF"),
            IntervalColor::Maroon => ("maroon", "Maroon", "#800000", "#FFFFFF"),
            IntervalColor::Orange => ("orange", "Orange", "#FFA500", "#000000"),
            IntervalColor::Yellow => ("yellow", "Yellow", "#FFFF00", "#000000"),
            IntervalColor::Gold => ("gold", "Gold", "#FFD700", "#000000"),
            IntervalColor::Green => ("green", "Green", "#008000", "#FFFFFF"),
            IntervalColor::Teal => ("teal", "Teal", "#008080", "#FFFFFF"),
            IntervalColor::Blue => ("blue", "Blue", "#0000FF", "#FFFFFF"),
            IntervalColor::Navy => ("navy", "Navy", "#000080", "#FFFFFF"),
            IntervalColor::Purple => ("purple", "Purple", "#800080", "#FFFFFF"),
            IntervalColor::Pink => ("pink", "Pink", "#FFC0CB", "#000000"),
            IntervalColor::White => ("white", "White", "#FFFFFF", "#000000"),
            IntervalColor::LightGray => ("light-gray", "Light Gray", "#D3D3D3", "#000000"),
            IntervalColor::DarkGray => ("dark-gray", "Dark Gray", "#4A4A4A", "#FFFFFF"),
            IntervalColor::Black => ("black", "Black", "#000000", "#FFFFFF"),
        };
        Swatch { id, name, bg, text }
    }

    pub fn id(self) -> &'static str {
        self.swatch().id
    }

    /// Look up a palette id. `gray` is the tag older timers were saved with.
    ///
    /// Older releases read `gray` back as red; it maps to light gray on purpose.
    pub fn from_id(id: &str) -> Option<Self> {
        if id == "gray" {
            return Some(IntervalColor::LightGray);
        }
        Self::ALL.into_iter().find(|color| color.id() == id)
    }
}

impl From<String> for IntervalColor {
    fn from(id: String) -> Self {
        Self::from_id(&id).unwrap_or_default()
    }
}

impl From<IntervalColor> for String {
    fn from(color: IntervalColor) -> Self {
        color.id().to_string()
    }
}

/// The whole palette, in display order
pub fn palette() -> Vec<Swatch> {
    IntervalColor::ALL.iter().map(|color| color.swatch()).collect()
}
