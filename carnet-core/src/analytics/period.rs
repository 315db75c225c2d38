//! Period filtering
//!
//! Restricts the visit set to a calendar year (or all time) and derives the
//! induced restaurant set: with a year selected, only restaurants with at
//! least one visit that year participate in restaurant-keyed statistics.

use crate::snapshot::Snapshot;
use crate::types::{Restaurant, Visit};
use chrono::Datelike;
use std::collections::HashSet;
use std::fmt;

/// The year-based filter window applied before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// Full history
    All,
    /// One calendar year
    Year(i32),
}

impl Period {
    /// Does this visit fall inside the period?
    pub fn contains(&self, visit: &Visit) -> bool {
        match self {
            Period::All => true,
            Period::Year(year) => visit.visited_at.year() == *year,
        }
    }

    /// Fall back to `All` when the selected year has no visits left.
    ///
    /// The host UI resets the selector when the last visit of a year is
    /// deleted; this mirrors that rule for callers that hold a stale
    /// selection. The engine itself tolerates a zero-match year and simply
    /// returns empty aggregates.
    pub fn resolve(self, available_years: &[i32]) -> Period {
        match self {
            Period::Year(year) if !available_years.contains(&year) => Period::All,
            other => other,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::All => write!(f, "all"),
            Period::Year(year) => write!(f, "{}", year),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Period::All),
            other => other
                .parse::<i32>()
                .map(Period::Year)
                .map_err(|_| format!("invalid period: {} (expected \"all\" or a year)", other)),
        }
    }
}

/// Years that have at least one visit, newest first.
pub fn available_years(visits: &[Visit]) -> Vec<i32> {
    let mut years: Vec<i32> = visits
        .iter()
        .map(|v| v.visited_at.year())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years
}

/// The filtered view the aggregator runs over.
///
/// Both collections preserve snapshot order; downstream tie-breaking relies
/// on it.
#[derive(Debug)]
pub struct PeriodData<'a> {
    pub period: Period,
    pub restaurants: Vec<&'a Restaurant>,
    pub visits: Vec<&'a Visit>,
}

/// Apply the period to a snapshot.
pub fn filter(snapshot: &Snapshot, period: Period) -> PeriodData<'_> {
    let visits: Vec<&Visit> = snapshot
        .visits
        .iter()
        .filter(|v| period.contains(v))
        .collect();

    let restaurants: Vec<&Restaurant> = match period {
        Period::All => snapshot.restaurants.iter().collect(),
        Period::Year(_) => {
            let visited: HashSet<&str> = visits.iter().map(|v| v.restaurant_id.as_str()).collect();
            snapshot
                .restaurants
                .iter()
                .filter(|r| visited.contains(r.id.as_str()))
                .collect()
        }
    };

    PeriodData {
        period,
        restaurants,
        visits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn visit(id: &str, restaurant_id: &str, year: i32) -> Visit {
        Visit {
            id: id.to_string(),
            restaurant_id: restaurant_id.to_string(),
            price_eur: None,
            covers: 1,
            visited_at: Utc.with_ymd_and_hms(year, 6, 15, 12, 0, 0).unwrap(),
        }
    }

    fn restaurant(id: &str) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: id.to_string(),
            city: None,
            country: None,
            rating: None,
            tags: vec![],
            created_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_period_parse_and_display() {
        assert_eq!("all".parse::<Period>().unwrap(), Period::All);
        assert_eq!("2024".parse::<Period>().unwrap(), Period::Year(2024));
        assert!("later".parse::<Period>().is_err());
        assert_eq!(Period::Year(2024).to_string(), "2024");
        assert_eq!(Period::All.to_string(), "all");
    }

    #[test]
    fn test_available_years_sorted_descending() {
        let visits = vec![
            visit("v1", "r1", 2022),
            visit("v2", "r1", 2024),
            visit("v3", "r1", 2023),
            visit("v4", "r1", 2024),
        ];
        assert_eq!(available_years(&visits), vec![2024, 2023, 2022]);
    }

    #[test]
    fn test_resolve_falls_back_to_all() {
        let years = vec![2024, 2023];
        assert_eq!(Period::Year(2022).resolve(&years), Period::All);
        assert_eq!(Period::Year(2024).resolve(&years), Period::Year(2024));
        assert_eq!(Period::All.resolve(&years), Period::All);
    }

    #[test]
    fn test_year_filter_induces_restaurant_set() {
        let snapshot = Snapshot {
            restaurants: vec![restaurant("r1"), restaurant("r2")],
            visits: vec![visit("v1", "r1", 2024), visit("v2", "r2", 2023)],
        };

        let data = filter(&snapshot, Period::Year(2024));
        assert_eq!(data.visits.len(), 1);
        assert_eq!(data.restaurants.len(), 1);
        assert_eq!(data.restaurants[0].id, "r1");

        let all = filter(&snapshot, Period::All);
        assert_eq!(all.visits.len(), 2);
        assert_eq!(all.restaurants.len(), 2);
    }

    #[test]
    fn test_zero_match_year_yields_empty_view() {
        let snapshot = Snapshot {
            restaurants: vec![restaurant("r1")],
            visits: vec![visit("v1", "r1", 2024)],
        };
        let data = filter(&snapshot, Period::Year(2019));
        assert!(data.visits.is_empty());
        assert!(data.restaurants.is_empty());
    }
}
