//! Statistics engine
//!
//! Chains the four stages (period filter, aggregator, ranker, badge
//! classifier) into one deterministic, side-effect-free transform from a
//! snapshot and period selector to a [`StatisticsResult`]. The engine holds
//! no state; an optional [`StatsCache`] keyed on (snapshot fingerprint,
//! period) can sit in front of it as a pure optimization.

use super::aggregate::{aggregate, KeyCount};
use super::badge::{classify, Badge, BehavioralStats};
use super::period::{filter, Period};
use super::rank::{
    self, MonthActivity, MostVisited, PerCoverVisit, PriciestVisit, TopRated,
};
use crate::config::StatsConfig;
use crate::snapshot::Snapshot;
use std::collections::HashMap;

/// Fully derived statistics for one (snapshot, period) pair.
///
/// Scalar metrics, ranked entries, and breakdowns; raw numbers and strings
/// only, except the badge whose label/subtitle are fixed product strings.
/// `None` means "no data" and renders as an explicit marker downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsResult {
    pub period: Period,
    pub total_restaurants: usize,
    pub average_rating: f64,
    pub best_rating: Option<f64>,
    pub worst_rating: Option<f64>,
    pub total_spent: f64,
    pub total_covers: i64,
    pub visit_count: usize,
    pub average_per_visit: Option<f64>,
    pub average_per_cover: Option<f64>,
    pub top_tags: Vec<KeyCount>,
    pub top_city: Option<String>,
    pub top_country: Option<String>,
    pub countries: Vec<KeyCount>,
    pub most_visited: Option<MostVisited>,
    pub priciest_visit: Option<PriciestVisit>,
    pub best_per_cover: Option<PerCoverVisit>,
    pub worst_per_cover: Option<PerCoverVisit>,
    pub most_active_month: Option<MonthActivity>,
    pub top_rated: Vec<TopRated>,
    pub badge: Badge,
}

/// Compute statistics for a snapshot and period.
///
/// Pure function of its inputs: re-invoking on an identical snapshot and
/// selector yields an identical result. Malformed records degrade
/// gracefully; an empty input yields an explicit empty result.
pub fn compute(snapshot: &Snapshot, period: Period, config: &StatsConfig) -> StatisticsResult {
    let data = filter(snapshot, period);
    let aggregates = aggregate(&data);
    let names = snapshot.name_index();

    tracing::debug!(
        %period,
        restaurants = aggregates.total_restaurants,
        visits = aggregates.visit_count,
        "Computed aggregates"
    );

    let top_tags = rank::top_tags(&aggregates, config.top_tags);
    let (best_per_cover, worst_per_cover) = rank::per_cover_extremes(&data, &names);

    let badge = classify(
        &top_tags.iter().map(|t| t.key.as_str()).collect::<Vec<_>>(),
        &BehavioralStats {
            visit_count: aggregates.visit_count,
            average_rating: aggregates.average_rating,
            average_per_cover: aggregates.average_per_cover,
        },
    );

    StatisticsResult {
        period,
        total_restaurants: aggregates.total_restaurants,
        average_rating: aggregates.average_rating,
        best_rating: aggregates.best_rating,
        worst_rating: aggregates.worst_rating,
        total_spent: aggregates.total_spent,
        total_covers: aggregates.total_covers,
        visit_count: aggregates.visit_count,
        average_per_visit: aggregates.average_per_visit,
        average_per_cover: aggregates.average_per_cover,
        top_city: rank::top_entry(&aggregates.city_tallies).map(|e| e.key.clone()),
        top_country: rank::top_entry(&aggregates.country_tallies).map(|e| e.key.clone()),
        countries: rank::country_breakdown(&aggregates, config.top_countries),
        most_visited: rank::most_visited(&aggregates, &names),
        priciest_visit: rank::priciest_visit(&data, &names),
        best_per_cover,
        worst_per_cover,
        most_active_month: rank::most_active_month(&aggregates),
        top_rated: rank::top_rated(&data, &aggregates, config.top_rated),
        top_tags,
        badge,
    }
}

/// Result cache keyed on (snapshot fingerprint, period).
///
/// Never required for correctness: a hit returns exactly what a fresh
/// computation would. The host must call [`StatsCache::invalidate`] on any
/// mutation to the underlying collections (the fingerprint key makes stale
/// entries unreachable anyway, but dropping them bounds memory).
#[derive(Default)]
pub struct StatsCache {
    entries: HashMap<(String, Period), StatisticsResult>,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the cached result or compute and store it.
    pub fn get_or_compute(
        &mut self,
        snapshot: &Snapshot,
        period: Period,
        config: &StatsConfig,
    ) -> StatisticsResult {
        let key = (snapshot.fingerprint(), period);
        if let Some(hit) = self.entries.get(&key) {
            tracing::debug!(%period, "Statistics cache hit");
            return hit.clone();
        }

        tracing::debug!(%period, "Statistics cache miss, computing");
        let result = compute(snapshot, period, config);
        self.entries.insert(key, result.clone());
        result
    }

    /// Drop all cached results.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Restaurant, Visit};
    use chrono::{TimeZone, Utc};

    fn sample() -> Snapshot {
        Snapshot {
            restaurants: vec![Restaurant {
                id: "r1".to_string(),
                name: "Trattoria".to_string(),
                city: Some("Lyon".to_string()),
                country: Some("France".to_string()),
                rating: Some(18.0),
                tags: vec!["Italien".to_string()],
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            }],
            visits: vec![Visit {
                id: "v1".to_string(),
                restaurant_id: "r1".to_string(),
                price_eur: Some(30.0),
                covers: 2,
                visited_at: Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap(),
            }],
        }
    }

    #[test]
    fn test_compute_end_to_end() {
        let stats = compute(&sample(), Period::All, &StatsConfig::default());
        assert_eq!(stats.total_restaurants, 1);
        assert_eq!(stats.average_rating, 18.0);
        assert_eq!(stats.total_spent, 30.0);
        assert_eq!(stats.average_per_cover, Some(15.0));
        assert_eq!(stats.top_city.as_deref(), Some("Lyon"));
        assert_eq!(stats.badge.label, "🍕 Italien dans l’âme");
    }

    #[test]
    fn test_idempotence() {
        let snapshot = sample();
        let config = StatsConfig::default();
        let a = compute(&snapshot, Period::Year(2024), &config);
        let b = compute(&snapshot, Period::Year(2024), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_cache_hit_matches_fresh_compute() {
        let snapshot = sample();
        let config = StatsConfig::default();
        let mut cache = StatsCache::new();

        let first = cache.get_or_compute(&snapshot, Period::All, &config);
        let second = cache.get_or_compute(&snapshot, Period::All, &config);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        assert_eq!(first, compute(&snapshot, Period::All, &config));
    }

    #[test]
    fn test_cache_misses_on_changed_snapshot() {
        let config = StatsConfig::default();
        let mut cache = StatsCache::new();

        let _ = cache.get_or_compute(&sample(), Period::All, &config);

        let mut changed = sample();
        changed.visits[0].price_eur = Some(60.0);
        let stats = cache.get_or_compute(&changed, Period::All, &config);
        assert_eq!(stats.total_spent, 60.0);
        assert_eq!(cache.len(), 2);

        cache.invalidate();
        assert!(cache.is_empty());
    }
}
