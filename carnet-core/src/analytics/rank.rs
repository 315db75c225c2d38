//! Ranking pass
//!
//! Extracts top-N and extremal entries from the aggregation tallies. Every
//! tie-break is explicit: tallies keep first-encounter order, extremal scans
//! use strict comparisons so the first candidate encountered wins, and the
//! public top-rated list falls back to a normalized name comparison.

use super::aggregate::{Aggregates, KeyCount};
use super::period::PeriodData;
use crate::snapshot::Snapshot;
use crate::types::{normalize_label, Restaurant, PLACEHOLDER};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// The restaurant visited most often in the period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MostVisited {
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub visit_count: u32,
}

/// The single most expensive visit in the period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriciestVisit {
    pub restaurant_name: String,
    pub price_eur: f64,
    pub visited_at: DateTime<Utc>,
}

/// A visit ranked by price per cover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerCoverVisit {
    pub restaurant_name: String,
    /// price / covers for this visit
    pub unit_price: f64,
    pub covers: i64,
    pub visited_at: DateTime<Utc>,
}

/// The (year, month) bucket with the most visits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthActivity {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub visit_count: u32,
}

/// Entry of the public top-rated list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopRated {
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub rating: f64,
    pub visit_count: u32,
}

/// Top tags by count, descending; equal counts keep first-occurrence order.
pub fn top_tags(aggregates: &Aggregates, n: usize) -> Vec<KeyCount> {
    let mut tags = aggregates.tag_tallies.clone();
    tags.sort_by(|a, b| b.count.cmp(&a.count)); // stable: ties keep input order
    tags.truncate(n);
    tags
}

/// The single highest-count key, or `None` when the tally is empty.
pub fn top_entry(tallies: &[KeyCount]) -> Option<&KeyCount> {
    let mut best: Option<&KeyCount> = None;
    for entry in tallies {
        if best.map_or(true, |b| entry.count > b.count) {
            best = Some(entry);
        }
    }
    best
}

/// Country breakdown, top N by count descending.
pub fn country_breakdown(aggregates: &Aggregates, n: usize) -> Vec<KeyCount> {
    let mut countries = aggregates.country_tallies.clone();
    countries.sort_by(|a, b| b.count.cmp(&a.count));
    countries.truncate(n);
    countries
}

fn resolve_name(names: &HashMap<&str, &str>, id: &str) -> String {
    names.get(id).copied().unwrap_or(PLACEHOLDER).to_string()
}

/// Restaurant with the highest visit count; first-encountered wins ties.
pub fn most_visited(aggregates: &Aggregates, names: &HashMap<&str, &str>) -> Option<MostVisited> {
    let mut best: Option<&super::aggregate::RestaurantTally> = None;
    for tally in &aggregates.restaurant_tallies {
        if best.map_or(true, |b| tally.visit_count > b.visit_count) {
            best = Some(tally);
        }
    }
    best.map(|tally| MostVisited {
        restaurant_id: tally.restaurant_id.clone(),
        restaurant_name: resolve_name(names, &tally.restaurant_id),
        visit_count: tally.visit_count,
    })
}

/// The visit with the maximum known price; first-encountered wins ties.
pub fn priciest_visit(data: &PeriodData<'_>, names: &HashMap<&str, &str>) -> Option<PriciestVisit> {
    let mut best: Option<PriciestVisit> = None;
    for visit in &data.visits {
        let Some(price) = visit.usable_price() else {
            continue;
        };
        if best.as_ref().map_or(true, |b| price > b.price_eur) {
            best = Some(PriciestVisit {
                restaurant_name: resolve_name(names, &visit.restaurant_id),
                price_eur: price,
                visited_at: visit.visited_at,
            });
        }
    }
    best
}

/// Best (lowest) and worst (highest) price per cover among visits with a
/// known price and at least one cover. First-encountered wins ties.
pub fn per_cover_extremes(
    data: &PeriodData<'_>,
    names: &HashMap<&str, &str>,
) -> (Option<PerCoverVisit>, Option<PerCoverVisit>) {
    let mut best: Option<PerCoverVisit> = None;
    let mut worst: Option<PerCoverVisit> = None;

    for visit in &data.visits {
        let (Some(price), Some(covers)) = (visit.usable_price(), visit.usable_covers()) else {
            continue;
        };
        let unit = price / covers as f64;
        let entry = || PerCoverVisit {
            restaurant_name: resolve_name(names, &visit.restaurant_id),
            unit_price: unit,
            covers,
            visited_at: visit.visited_at,
        };

        if best.as_ref().map_or(true, |b| unit < b.unit_price) {
            best = Some(entry());
        }
        if worst.as_ref().map_or(true, |w| unit > w.unit_price) {
            worst = Some(entry());
        }
    }

    (best, worst)
}

/// The busiest (year, month) bucket; first-encountered wins ties.
pub fn most_active_month(aggregates: &Aggregates) -> Option<MonthActivity> {
    let mut best: Option<&super::aggregate::MonthTally> = None;
    for tally in &aggregates.month_tallies {
        if best.map_or(true, |b| tally.count > b.count) {
            best = Some(tally);
        }
    }
    best.map(|tally| MonthActivity {
        year: tally.year,
        month: tally.month,
        label: tally.label(),
        visit_count: tally.count,
    })
}

/// Top-rated restaurants for the public view.
///
/// Rating descending, then period visit count descending, then normalized
/// name ascending as the final deterministic tie-break.
pub fn top_rated(data: &PeriodData<'_>, aggregates: &Aggregates, n: usize) -> Vec<TopRated> {
    let counts: HashMap<&str, u32> = aggregates
        .restaurant_tallies
        .iter()
        .map(|t| (t.restaurant_id.as_str(), t.visit_count))
        .collect();

    let mut rated: Vec<TopRated> = data
        .restaurants
        .iter()
        .filter_map(|r| {
            r.usable_rating().map(|rating| TopRated {
                restaurant_id: r.id.clone(),
                restaurant_name: r.name.clone(),
                rating,
                visit_count: counts.get(r.id.as_str()).copied().unwrap_or(0),
            })
        })
        .collect();

    rated.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| b.visit_count.cmp(&a.visit_count))
            .then_with(|| normalize_label(&a.restaurant_name).cmp(&normalize_label(&b.restaurant_name)))
    });
    rated.truncate(n);
    rated
}

/// Default restaurant list ordering shared by the list views.
///
/// Most recent last visit first; restaurants with no visit at all sort
/// after every visited one, ties broken by creation time descending.
pub fn order_restaurants(snapshot: &Snapshot) -> Vec<&Restaurant> {
    let mut last_visit: HashMap<&str, DateTime<Utc>> = HashMap::new();
    for visit in &snapshot.visits {
        last_visit
            .entry(visit.restaurant_id.as_str())
            .and_modify(|ts| *ts = (*ts).max(visit.visited_at))
            .or_insert(visit.visited_at);
    }

    let mut restaurants: Vec<&Restaurant> = snapshot.restaurants.iter().collect();
    restaurants.sort_by(|a, b| {
        match (
            last_visit.get(a.id.as_str()),
            last_visit.get(b.id.as_str()),
        ) {
            (Some(la), Some(lb)) => lb.cmp(la).then_with(|| b.created_at.cmp(&a.created_at)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.created_at.cmp(&a.created_at),
        }
    });
    restaurants
}
