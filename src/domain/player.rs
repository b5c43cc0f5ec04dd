//! Roster entry for an NFL player.

use serde::{Deserialize, Serialize};

use super::id::PlayerId;

fn default_status() -> String {
    "ACTIVE".to_string()
}

/// A player profile as published on a team roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub jersey_number: Option<u32>,
    #[serde(default = "default_status")]
    pub status: String,
}

impl Player {
    /// Create an active player with only the required fields.
    pub fn new(player_id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            name: name.into(),
            first_name: None,
            last_name: None,
            position: None,
            team: None,
            jersey_number: None,
            status: default_status(),
        }
    }
}
