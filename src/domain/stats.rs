//! Per-week player statistics snapshot.

use serde::{Deserialize, Serialize};

use super::id::PlayerId;

/// A player's stat line for one week, as observed in a single poll.
///
/// Snapshots are never mutated after construction; the next poll produces
/// a fresh value that supersedes this one. Every counter defaults to zero so
/// partial rows from the data source still form a complete snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub player_name: String,
    pub season: i32,
    pub week: u32,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub position: Option<String>,

    // Passing
    #[serde(default)]
    pub passing_yards: i32,
    #[serde(default)]
    pub passing_tds: u32,
    #[serde(default)]
    pub interceptions: u32,
    #[serde(default)]
    pub passing_attempts: u32,
    #[serde(default)]
    pub passing_completions: u32,

    // Rushing
    #[serde(default)]
    pub rushing_yards: i32,
    #[serde(default)]
    pub rushing_tds: u32,
    #[serde(default)]
    pub rushing_attempts: u32,

    // Receiving
    #[serde(default)]
    pub receptions: u32,
    #[serde(default)]
    pub receiving_yards: i32,
    #[serde(default)]
    pub receiving_tds: u32,
    #[serde(default)]
    pub targets: u32,

    // Misc
    #[serde(default)]
    pub two_point_conversions: u32,
    #[serde(default)]
    pub fumbles_lost: u32,

    // Kicking
    #[serde(default)]
    pub fg_made_0_19: u32,
    #[serde(default)]
    pub fg_made_20_29: u32,
    #[serde(default)]
    pub fg_made_30_39: u32,
    #[serde(default)]
    pub fg_made_40_49: u32,
    #[serde(default)]
    pub fg_made_50_plus: u32,
    #[serde(default)]
    pub pat_made: u32,
}

impl PlayerStats {
    /// Create an empty stat line for a player in a given week.
    pub fn new(
        player_id: impl Into<PlayerId>,
        player_name: impl Into<String>,
        season: i32,
        week: u32,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            player_name: player_name.into(),
            season,
            week,
            team: None,
            position: None,
            passing_yards: 0,
            passing_tds: 0,
            interceptions: 0,
            passing_attempts: 0,
            passing_completions: 0,
            rushing_yards: 0,
            rushing_tds: 0,
            rushing_attempts: 0,
            receptions: 0,
            receiving_yards: 0,
            receiving_tds: 0,
            targets: 0,
            two_point_conversions: 0,
            fumbles_lost: 0,
            fg_made_0_19: 0,
            fg_made_20_29: 0,
            fg_made_30_39: 0,
            fg_made_40_49: 0,
            fg_made_50_plus: 0,
            pat_made: 0,
        }
    }

    /// Whether the fields that drive live updates differ from `other`.
    ///
    /// Only the core counters are compared; team, position, attempts and
    /// kicking splits may change without producing a delta.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.passing_yards != other.passing_yards
            || self.rushing_yards != other.rushing_yards
            || self.receiving_yards != other.receiving_yards
            || self.passing_tds != other.passing_tds
            || self.rushing_tds != other.rushing_tds
            || self.receiving_tds != other.receiving_tds
            || self.receptions != other.receptions
            || self.interceptions != other.interceptions
            || self.fumbles_lost != other.fumbles_lost
    }

    /// Total field goals made across all distance buckets.
    #[must_use]
    pub fn field_goals_made(&self) -> u32 {
        self.fg_made_0_19
            + self.fg_made_20_29
            + self.fg_made_30_39
            + self.fg_made_40_49
            + self.fg_made_50_plus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_default_to_zero() {
        let stats = PlayerStats::new("12345", "Test Player", 2024, 1);
        assert_eq!(stats.passing_yards, 0);
        assert_eq!(stats.interceptions, 0);
        assert_eq!(stats.fumbles_lost, 0);
        assert_eq!(stats.field_goals_made(), 0);
        assert!(stats.team.is_none());
    }

    #[test]
    fn missing_counters_deserialize_as_zero() {
        let stats: PlayerStats = serde_json::from_str(
            r#"{"player_id":"1","player_name":"A","season":2024,"week":3,"rushing_yards":40}"#,
        )
        .unwrap();
        assert_eq!(stats.rushing_yards, 40);
        assert_eq!(stats.receptions, 0);
    }

    #[test]
    fn differs_ignores_team_and_position() {
        let a = PlayerStats::new("1", "A", 2024, 1);
        let mut b = a.clone();
        b.team = Some("KC".into());
        b.position = Some("QB".into());
        b.passing_attempts = 30;
        assert!(!a.differs_from(&b));
    }

    #[test]
    fn differs_on_each_compared_field() {
        let base = PlayerStats::new("1", "A", 2024, 1);
        let mutations: Vec<fn(&mut PlayerStats)> = vec![
            |s| s.passing_yards = 1,
            |s| s.rushing_yards = 1,
            |s| s.receiving_yards = 1,
            |s| s.passing_tds = 1,
            |s| s.rushing_tds = 1,
            |s| s.receiving_tds = 1,
            |s| s.receptions = 1,
            |s| s.interceptions = 1,
            |s| s.fumbles_lost = 1,
        ];
        for mutate in mutations {
            let mut changed = base.clone();
            mutate(&mut changed);
            assert!(base.differs_from(&changed));
        }
    }
}
