//! Games shown in the library and their installed copies

use serde::{Deserialize, Serialize};

use crate::platform::Platform;
use crate::store::GameId;

/// A game the user can see in the library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    /// Store page
    #[serde(default)]
    pub url: String,
    /// Platforms builds exist for. Empty means every platform.
    #[serde(default)]
    pub platforms: Vec<Platform>,
    /// Whether the user may download it (owned or free)
    #[serde(default)]
    pub may_download: bool,
    #[serde(default)]
    pub can_be_bought: bool,
    /// Brand colour as `#rrggbb`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_color: Option<String>,
}

impl Game {
    /// Whether a build exists for the given platform
    pub fn supports(&self, platform: Platform) -> bool {
        self.platforms.is_empty() || self.platforms.contains(&platform)
    }
}

/// An installed copy of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cave {
    pub id: String,
    pub game_id: GameId,
}

impl Cave {
    /// Cave created when a download of `game_id` completes
    pub fn for_game(game_id: GameId) -> Self {
        Self {
            id: format!("cave-{}", game_id),
            game_id,
        }
    }
}
