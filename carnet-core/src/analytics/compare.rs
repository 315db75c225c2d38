//! Year-over-year comparison
//!
//! Re-runs the aggregator's spend/visit totals for the year preceding the
//! selected one and reports percentage deltas. A previous year without any
//! visit reports "no data" instead of a delta.

use super::aggregate::aggregate;
use super::period::{filter, Period};
use crate::snapshot::Snapshot;
use serde::Serialize;

/// Direction indicator derived from a delta's sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn from_delta(delta_pct: i64) -> Self {
        match delta_pct {
            d if d > 0 => Trend::Up,
            d if d < 0 => Trend::Down,
            _ => Trend::Flat,
        }
    }
}

/// Percentage deltas against the previous year.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonDeltas {
    /// Spend change in percent; `None` when the previous year's spend was
    /// zero (visits without any known price)
    pub spent_delta_pct: Option<i64>,
    /// Visit count change in percent
    pub visit_delta_pct: Option<i64>,
    pub previous_spent: f64,
    pub previous_visit_count: usize,
}

/// Comparison of a selected year against the year before it.
#[derive(Debug, Clone, Serialize)]
pub struct YearComparison {
    pub year: i32,
    pub previous_year: i32,
    /// `None` when the previous year has no visits at all
    pub deltas: Option<ComparisonDeltas>,
}

fn delta_pct(current: f64, previous: f64) -> Option<i64> {
    if previous <= 0.0 {
        return None;
    }
    Some((((current - previous) / previous) * 100.0).round() as i64)
}

/// Compare the selected year's totals against the year before.
///
/// `current_spent` and `current_visit_count` come from the already-computed
/// statistics for the selected year; the previous year's totals are derived
/// here with the same aggregation logic.
pub fn year_over_year(
    snapshot: &Snapshot,
    year: i32,
    current_spent: f64,
    current_visit_count: usize,
) -> YearComparison {
    let previous_year = year - 1;
    let previous = aggregate(&filter(snapshot, Period::Year(previous_year)));

    if previous.visit_count == 0 {
        return YearComparison {
            year,
            previous_year,
            deltas: None,
        };
    }

    YearComparison {
        year,
        previous_year,
        deltas: Some(ComparisonDeltas {
            spent_delta_pct: delta_pct(current_spent, previous.total_spent),
            visit_delta_pct: delta_pct(current_visit_count as f64, previous.visit_count as f64),
            previous_spent: previous.total_spent,
            previous_visit_count: previous.visit_count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Restaurant, Visit};
    use chrono::{TimeZone, Utc};

    fn visit(id: &str, year: i32, price: Option<f64>) -> Visit {
        Visit {
            id: id.to_string(),
            restaurant_id: "r1".to_string(),
            price_eur: price,
            covers: 2,
            visited_at: Utc.with_ymd_and_hms(year, 5, 10, 20, 0, 0).unwrap(),
        }
    }

    fn snapshot(visits: Vec<Visit>) -> Snapshot {
        Snapshot {
            restaurants: vec![Restaurant {
                id: "r1".to_string(),
                name: "A".to_string(),
                city: None,
                country: None,
                rating: None,
                tags: vec![],
                created_at: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
            }],
            visits,
        }
    }

    #[test]
    fn test_trend_from_delta() {
        assert_eq!(Trend::from_delta(23), Trend::Up);
        assert_eq!(Trend::from_delta(-4), Trend::Down);
        assert_eq!(Trend::from_delta(0), Trend::Flat);
    }

    #[test]
    fn test_no_previous_data() {
        let snap = snapshot(vec![visit("v1", 2024, Some(30.0))]);
        let cmp = year_over_year(&snap, 2024, 30.0, 1);
        assert_eq!(cmp.previous_year, 2023);
        assert!(cmp.deltas.is_none());
    }

    #[test]
    fn test_deltas_against_previous_year() {
        let snap = snapshot(vec![
            visit("v1", 2023, Some(100.0)),
            visit("v2", 2023, Some(100.0)),
            visit("v3", 2024, Some(246.0)),
        ]);
        let cmp = year_over_year(&snap, 2024, 246.0, 1);
        let deltas = cmp.deltas.unwrap();
        assert_eq!(deltas.spent_delta_pct, Some(23));
        assert_eq!(deltas.visit_delta_pct, Some(-50));
        assert_eq!(deltas.previous_visit_count, 2);
    }

    #[test]
    fn test_zero_previous_spend_suppresses_spend_delta_only() {
        let snap = snapshot(vec![visit("v1", 2023, None), visit("v2", 2024, Some(50.0))]);
        let cmp = year_over_year(&snap, 2024, 50.0, 1);
        let deltas = cmp.deltas.unwrap();
        assert_eq!(deltas.spent_delta_pct, None);
        assert_eq!(deltas.visit_delta_pct, Some(0));
    }
}
