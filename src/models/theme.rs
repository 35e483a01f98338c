//! Theme Models
//!
//! The fixed palette table. Only the selected id is persisted.

use serde::{Deserialize, Serialize};

/// Identifier of a colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    Nebula,
    Ocean,
    Forest,
    Sunset,
    #[default]
    Amber,
}

impl ThemeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Nebula => "nebula",
            ThemeId::Ocean => "ocean",
            ThemeId::Forest => "forest",
            ThemeId::Sunset => "sunset",
            ThemeId::Amber => "amber",
        }
    }

    /// Palette entry for this id
    pub fn theme(&self) -> &'static Theme {
        // THEMES holds exactly one entry per variant, in declaration order
        &THEMES[*self as usize]
    }
}

impl std::fmt::Display for ThemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for ThemeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        THEMES
            .iter()
            .find(|t| t.id.as_str() == needle)
            .map(|t| t.id)
            .ok_or_else(|| format!("Unknown theme: {}", s))
    }
}

/// RGB triplet
pub type Rgb = (u8, u8, u8);

/// A named palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: ThemeId,
    pub name: &'static str,
    pub primary: Rgb,
    pub secondary: Rgb,
}

/// All available themes
pub static THEMES: [Theme; 5] = [
    Theme {
        id: ThemeId::Nebula,
        name: "Dark Nebula",
        primary: (99, 102, 241),
        secondary: (168, 85, 247),
    },
    Theme {
        id: ThemeId::Ocean,
        name: "Ocean Deep",
        primary: (6, 182, 212),
        secondary: (59, 130, 246),
    },
    Theme {
        id: ThemeId::Forest,
        name: "Forest Canopy",
        primary: (16, 185, 129),
        secondary: (132, 204, 22),
    },
    Theme {
        id: ThemeId::Sunset,
        name: "Sunset Glow",
        primary: (249, 115, 22),
        secondary: (236, 72, 153),
    },
    Theme {
        id: ThemeId::Amber,
        name: "Warm Ember",
        primary: (234, 179, 8),
        secondary: (239, 68, 68),
    },
];
