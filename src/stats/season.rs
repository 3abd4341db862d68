use chrono::{DateTime, Datelike, Utc};

use crate::shared::AppError;

/// Season scope for statistics queries. `All` reads the cached aggregates;
/// `Year` recomputes on the fly from a filtered history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Season {
    #[default]
    All,
    Year(i32),
}

impl Season {
    /// Parses an optional query-string value. Absent and `"all"` both mean
    /// no filtering; anything else must be a calendar year.
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value {
            None => Ok(Season::All),
            Some(raw) if raw.eq_ignore_ascii_case("all") => Ok(Season::All),
            Some(raw) => raw
                .parse::<i32>()
                .map(Season::Year)
                .map_err(|_| AppError::Validation(format!("Invalid season: {}", raw))),
        }
    }

    pub fn contains(&self, played_at: DateTime<Utc>) -> bool {
        match self {
            Season::All => true,
            Season::Year(year) => played_at.year() == *year,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Season::All)
    }
}

/// Restricts a participation history to entries whose parent game falls in
/// the season, keyed by the supplied timestamp accessor.
pub fn filter_by_season<T>(
    items: Vec<T>,
    season: Season,
    played_at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    if season.is_all() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| season.contains(played_at(item)))
        .collect()
}
