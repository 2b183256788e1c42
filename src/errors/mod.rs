use thiserror::Error;

/// Rejected league configuration. Raised when a league is loaded, never
/// while results are being computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("handicap_multiplier must be a finite positive number, got {0}")]
    InvalidMultiplier(f64),
    #[error("{name} must be at least 1, got {value}")]
    NonPositiveRounds { name: &'static str, value: i64 },
    #[error(
        "handicap_min_rounds_avg ({min}) must be lower than handicap_max_rounds_avg ({max})"
    )]
    AverageWindow { min: u32, max: u32 },
    #[error("league_points table is empty")]
    EmptyPointsTable,
    #[error("league_points entry {0:?} is not a non-negative integer")]
    InvalidPointsEntry(String),
}

/// An entity the engine needs is missing from the data store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("league {0} not found")]
    League(i64),
    #[error("event {0} not found")]
    Event(i64),
    #[error("card {0} not found")]
    Card(i64),
    #[error("layout {0} not found")]
    Layout(i64),
    #[error("contestant {0} not found")]
    Contestant(i64),
    #[error("player {0} not found")]
    Player(i64),
}

/// Add context to data-access errors
pub fn fetch_context(entity: &str, id: i64) -> String {
    format!("Failed to fetch {} {}", entity, id)
}

/// Add context to cache errors
pub fn cache_context(operation: &str, key: &str) -> String {
    format!("Failed to {} cache for key: {}", operation, key)
}

/// True when the error chain bottoms out in a missing entity
pub fn is_not_found(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| cause.downcast_ref::<LookupError>().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context as _;

    #[test]
    fn test_not_found_survives_context() {
        let result: anyhow::Result<()> =
            Err(LookupError::Layout(7)).context(fetch_context("card", 3));
        let error = result.unwrap_err();

        assert!(is_not_found(&error));
        assert_eq!(error.to_string(), "Failed to fetch card 3");
    }

    #[test]
    fn test_other_errors_are_not_lookups() {
        let error = anyhow::anyhow!("disk full");
        assert!(!is_not_found(&error));
    }
}
