use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

const DEFAULT_MULTIPLIER: f64 = 0.8;
const DEFAULT_MIN_ROUNDS: u32 = 2;
const DEFAULT_MIN_ROUNDS_AVG: u32 = 5;
const DEFAULT_MAX_ROUNDS_AVG: u32 = 8;
const DEFAULT_POINTS: [u32; 10] = [10, 9, 8, 7, 6, 5, 4, 3, 2, 1];

/// Per-league handicap and points configuration.
///
/// `league_points[i]` is awarded to rank `i + 1`; the last entry doubles as
/// the attendance points for contestants who did not finish the required
/// rounds and for ranks past the end of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSettings {
    pub handicap_multiplier: f64,
    pub handicap_min_rounds: u32,
    pub handicap_min_rounds_avg: u32,
    pub handicap_max_rounds_avg: u32,
    pub league_points: Vec<u32>,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            handicap_multiplier: DEFAULT_MULTIPLIER,
            handicap_min_rounds: DEFAULT_MIN_ROUNDS,
            handicap_min_rounds_avg: DEFAULT_MIN_ROUNDS_AVG,
            handicap_max_rounds_avg: DEFAULT_MAX_ROUNDS_AVG,
            league_points: DEFAULT_POINTS.to_vec(),
        }
    }
}

impl LeagueSettings {
    /// Build settings from stored columns, rejecting anything malformed.
    pub fn from_columns(
        handicap_multiplier: f64,
        handicap_min_rounds: i64,
        handicap_min_rounds_avg: i64,
        handicap_max_rounds_avg: i64,
        league_points: &str,
    ) -> Result<Self, ConfigError> {
        let settings = Self {
            handicap_multiplier,
            handicap_min_rounds: positive("handicap_min_rounds", handicap_min_rounds)?,
            handicap_min_rounds_avg: positive("handicap_min_rounds_avg", handicap_min_rounds_avg)?,
            handicap_max_rounds_avg: positive("handicap_max_rounds_avg", handicap_max_rounds_avg)?,
            league_points: parse_points(league_points)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.handicap_multiplier.is_finite() || self.handicap_multiplier <= 0.0 {
            return Err(ConfigError::InvalidMultiplier(self.handicap_multiplier));
        }
        positive("handicap_min_rounds", self.handicap_min_rounds as i64)?;
        positive("handicap_min_rounds_avg", self.handicap_min_rounds_avg as i64)?;
        if self.handicap_min_rounds_avg >= self.handicap_max_rounds_avg {
            return Err(ConfigError::AverageWindow {
                min: self.handicap_min_rounds_avg,
                max: self.handicap_max_rounds_avg,
            });
        }
        if self.league_points.is_empty() {
            return Err(ConfigError::EmptyPointsTable);
        }
        Ok(())
    }

    /// Points for a 1-based rank, clamped to the last table entry.
    /// An empty table, rejected by `validate`, awards nothing.
    pub fn points_for_rank(&self, rank: usize) -> u32 {
        let index = rank.saturating_sub(1).min(self.league_points.len().saturating_sub(1));
        self.league_points.get(index).copied().unwrap_or(0)
    }

    pub fn minimum_points(&self) -> u32 {
        self.league_points.last().copied().unwrap_or(0)
    }

    /// Comma-separated form used for storage
    pub fn points_column(&self) -> String {
        self.league_points
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

pub fn parse_points(raw: &str) -> Result<Vec<u32>, ConfigError> {
    let points = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidPointsEntry(entry.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if points.is_empty() {
        return Err(ConfigError::EmptyPointsTable);
    }
    Ok(points)
}

fn positive(name: &'static str, value: i64) -> Result<u32, ConfigError> {
    if value < 1 || value > u32::MAX as i64 {
        return Err(ConfigError::NonPositiveRounds { name, value });
    }
    Ok(value as u32)
}
