//! # Scene Identifiers
//!
//! The closed set of scenes known at build time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a loadable scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SceneId {
    /// Main menu; the usual permanent base.
    Main = 0,
    /// In-game world.
    Gameplay = 1,
    /// Inventory overlay.
    Inventory = 2,
    /// Settings screen.
    Settings = 3,
    /// Credits roll.
    Credits = 4,
}

impl SceneId {
    /// Every scene, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Main,
        Self::Gameplay,
        Self::Inventory,
        Self::Settings,
        Self::Credits,
    ];

    /// Stable lowercase name, matching the config spelling.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Gameplay => "gameplay",
            Self::Inventory => "inventory",
            Self::Settings => "settings",
            Self::Credits => "credits",
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
