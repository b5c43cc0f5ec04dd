//! Fantasy scoring for player stat lines.
//!
//! All arithmetic runs on [`Decimal`] so that per-yard rates such as 0.04
//! accumulate without binary floating-point drift. Totals are rounded to
//! two places with midpoint-away-from-zero (round half up).

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::stats::PlayerStats;

/// Scoring rule set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringFormat {
    #[default]
    Standard,
    Ppr,
    HalfPpr,
}

impl ScoringFormat {
    /// Points awarded per reception under this format.
    #[must_use]
    pub fn reception_bonus(self) -> Decimal {
        match self {
            Self::Standard => Decimal::ZERO,
            Self::Ppr => Decimal::ONE,
            Self::HalfPpr => Decimal::new(5, 1),
        }
    }
}

impl fmt::Display for ScoringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Ppr => f.write_str("ppr"),
            Self::HalfPpr => f.write_str("half_ppr"),
        }
    }
}

/// Per-unit scoring rates.
///
/// Field goals from 0 to 39 yards share one rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringRules {
    pub passing_yard: Decimal,
    pub passing_td: Decimal,
    pub interception: Decimal,
    pub rushing_yard: Decimal,
    pub rushing_td: Decimal,
    pub receiving_yard: Decimal,
    pub receiving_td: Decimal,
    pub two_point_conversion: Decimal,
    pub fumble_lost: Decimal,
    pub fg_short: Decimal,
    pub fg_40_49: Decimal,
    pub fg_50_plus: Decimal,
    pub extra_point: Decimal,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            passing_yard: Decimal::new(4, 2), // 1 per 25 yards
            passing_td: Decimal::from(4),
            interception: Decimal::from(-2),
            rushing_yard: Decimal::new(1, 1), // 1 per 10 yards
            rushing_td: Decimal::from(6),
            receiving_yard: Decimal::new(1, 1),
            receiving_td: Decimal::from(6),
            two_point_conversion: Decimal::from(2),
            fumble_lost: Decimal::from(-2),
            fg_short: Decimal::from(3),
            fg_40_49: Decimal::from(4),
            fg_50_plus: Decimal::from(5),
            extra_point: Decimal::ONE,
        }
    }
}

/// Points by scoring category for one stat line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub passing: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rushing: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub receiving: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub kicking: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub misc: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub reception_bonus: Decimal,
}

impl ScoreBreakdown {
    /// Unrounded sum of all categories.
    #[must_use]
    pub fn raw_total(&self) -> Decimal {
        self.passing + self.rushing + self.receiving + self.kicking + self.misc + self.reception_bonus
    }

    /// Total rounded to two places, round half up.
    #[must_use]
    pub fn total(&self) -> Decimal {
        round_points(self.raw_total())
    }
}

/// Totals under all three formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FantasyPoints {
    #[serde(with = "rust_decimal::serde::float")]
    pub standard: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub ppr: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub half_ppr: Decimal,
}

impl FantasyPoints {
    /// Total for a single format.
    #[must_use]
    pub fn for_format(&self, format: ScoringFormat) -> Decimal {
        match format {
            ScoringFormat::Standard => self.standard,
            ScoringFormat::Ppr => self.ppr,
            ScoringFormat::HalfPpr => self.half_ppr,
        }
    }
}

fn round_points(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Deterministic fantasy scorer.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    rules: ScoringRules,
}

impl Scorer {
    #[must_use]
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Points by category under `format`.
    #[must_use]
    pub fn breakdown(&self, stats: &PlayerStats, format: ScoringFormat) -> ScoreBreakdown {
        let r = &self.rules;
        let passing = Decimal::from(stats.passing_yards) * r.passing_yard
            + Decimal::from(stats.passing_tds) * r.passing_td
            + Decimal::from(stats.interceptions) * r.interception;
        let rushing = Decimal::from(stats.rushing_yards) * r.rushing_yard
            + Decimal::from(stats.rushing_tds) * r.rushing_td;
        let receiving = Decimal::from(stats.receiving_yards) * r.receiving_yard
            + Decimal::from(stats.receiving_tds) * r.receiving_td;
        let short_fgs = Decimal::from(stats.fg_made_0_19)
            + Decimal::from(stats.fg_made_20_29)
            + Decimal::from(stats.fg_made_30_39);
        let kicking = short_fgs * r.fg_short
            + Decimal::from(stats.fg_made_40_49) * r.fg_40_49
            + Decimal::from(stats.fg_made_50_plus) * r.fg_50_plus
            + Decimal::from(stats.pat_made) * r.extra_point;
        let misc = Decimal::from(stats.two_point_conversions) * r.two_point_conversion
            + Decimal::from(stats.fumbles_lost) * r.fumble_lost;
        let reception_bonus = Decimal::from(stats.receptions) * format.reception_bonus();

        ScoreBreakdown {
            passing,
            rushing,
            receiving,
            kicking,
            misc,
            reception_bonus,
        }
    }

    /// Rounded total under `format`.
    #[must_use]
    pub fn score(&self, stats: &PlayerStats, format: ScoringFormat) -> Decimal {
        self.breakdown(stats, format).total()
    }

    /// Rounded totals under every format.
    #[must_use]
    pub fn score_all(&self, stats: &PlayerStats) -> FantasyPoints {
        FantasyPoints {
            standard: self.score(stats, ScoringFormat::Standard),
            ppr: self.score(stats, ScoringFormat::Ppr),
            half_ppr: self.score(stats, ScoringFormat::HalfPpr),
        }
    }
}
