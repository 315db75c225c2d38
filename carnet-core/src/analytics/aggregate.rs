//! Aggregation pass
//!
//! A single pass over the filtered restaurant and visit sets producing
//! running sums, counts, and per-key tallies. Malformed numerics contribute
//! zero and never abort the pass. All tally vectors preserve first-encounter
//! order; the ranker's tie-breaking depends on it.

use super::period::PeriodData;
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Visit count and last-visit timestamp for one restaurant.
#[derive(Debug, Clone)]
pub struct RestaurantTally {
    pub restaurant_id: String,
    pub visit_count: u32,
    pub last_visit_at: DateTime<Utc>,
}

/// Visit count for one (year, month) bucket.
#[derive(Debug, Clone)]
pub struct MonthTally {
    pub year: i32,
    pub month: u32,
    pub count: u32,
}

impl MonthTally {
    /// Human label for the bucket (e.g., "March 2024").
    pub fn label(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

/// Occurrence count for one free-text key (tag, city, country).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCount {
    pub key: String,
    pub count: u32,
}

/// Output of the aggregation pass for one period.
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    /// Count of restaurants in the period
    pub total_restaurants: usize,
    /// Mean of clamped ratings, one decimal; 0.0 for an empty set
    pub average_rating: f64,
    /// Highest usable rating, `None` when no restaurant has one
    pub best_rating: Option<f64>,
    /// Lowest usable rating
    pub worst_rating: Option<f64>,
    /// Sum of known prices, one decimal
    pub total_spent: f64,
    /// Sum of valid cover counts
    pub total_covers: i64,
    /// Count of visits in the period, price known or not
    pub visit_count: usize,
    /// total_spent / visit_count, one decimal; `None` when no visits
    pub average_per_visit: Option<f64>,
    /// Aggregate spend over aggregate covers, one decimal; `None` when no
    /// valid covers. Intentionally weighted toward higher-cover visits.
    pub average_per_cover: Option<f64>,
    /// Per-restaurant visit tallies, first-encounter order
    pub restaurant_tallies: Vec<RestaurantTally>,
    /// Per-month visit tallies, first-encounter order
    pub month_tallies: Vec<MonthTally>,
    /// Per-tag occurrence counts across restaurants (one per restaurant
    /// carrying the tag, not weighted by visits)
    pub tag_tallies: Vec<KeyCount>,
    /// Per-city occurrence counts across restaurants
    pub city_tallies: Vec<KeyCount>,
    /// Per-country occurrence counts across restaurants
    pub country_tallies: Vec<KeyCount>,
}

/// Round to one decimal.
pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// Counter that preserves first-encounter order.
#[derive(Default)]
struct OrderedCounter {
    index: HashMap<String, usize>,
    entries: Vec<KeyCount>,
}

impl OrderedCounter {
    fn bump(&mut self, key: &str) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        match self.index.get(key) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push(KeyCount {
                    key: key.to_string(),
                    count: 1,
                });
            }
        }
    }
}

/// Run the aggregation pass over a filtered period view.
pub fn aggregate(data: &PeriodData<'_>) -> Aggregates {
    let total_restaurants = data.restaurants.len();

    // Restaurant-keyed reductions
    let mut rating_sum = 0.0;
    let mut best_rating: Option<f64> = None;
    let mut worst_rating: Option<f64> = None;
    let mut tags = OrderedCounter::default();
    let mut cities = OrderedCounter::default();
    let mut countries = OrderedCounter::default();

    for restaurant in &data.restaurants {
        if let Some(rating) = restaurant.usable_rating() {
            rating_sum += rating;
            best_rating = Some(best_rating.map_or(rating, |b: f64| b.max(rating)));
            worst_rating = Some(worst_rating.map_or(rating, |w: f64| w.min(rating)));
        }
        for tag in &restaurant.tags {
            tags.bump(tag);
        }
        if let Some(city) = &restaurant.city {
            cities.bump(city);
        }
        if let Some(country) = &restaurant.country {
            countries.bump(country);
        }
    }

    let average_rating = if total_restaurants == 0 {
        0.0
    } else {
        round1(rating_sum / total_restaurants as f64)
    };

    // Visit-keyed reductions
    let mut total_spent = 0.0;
    let mut total_covers = 0i64;
    let mut restaurant_index: HashMap<&str, usize> = HashMap::new();
    let mut restaurant_tallies: Vec<RestaurantTally> = Vec::new();
    let mut month_index: HashMap<(i32, u32), usize> = HashMap::new();
    let mut month_tallies: Vec<MonthTally> = Vec::new();

    for visit in &data.visits {
        if let Some(price) = visit.usable_price() {
            total_spent += price;
        }
        if let Some(covers) = visit.usable_covers() {
            total_covers += covers;
        }

        match restaurant_index.get(visit.restaurant_id.as_str()) {
            Some(&i) => {
                let tally = &mut restaurant_tallies[i];
                tally.visit_count += 1;
                tally.last_visit_at = tally.last_visit_at.max(visit.visited_at);
            }
            None => {
                restaurant_index.insert(&visit.restaurant_id, restaurant_tallies.len());
                restaurant_tallies.push(RestaurantTally {
                    restaurant_id: visit.restaurant_id.clone(),
                    visit_count: 1,
                    last_visit_at: visit.visited_at,
                });
            }
        }

        let bucket = (visit.visited_at.year(), visit.visited_at.month());
        match month_index.get(&bucket) {
            Some(&i) => month_tallies[i].count += 1,
            None => {
                month_index.insert(bucket, month_tallies.len());
                month_tallies.push(MonthTally {
                    year: bucket.0,
                    month: bucket.1,
                    count: 1,
                });
            }
        }
    }

    let visit_count = data.visits.len();
    let average_per_visit = (visit_count > 0).then(|| round1(total_spent / visit_count as f64));
    let average_per_cover = (total_covers > 0).then(|| round1(total_spent / total_covers as f64));

    Aggregates {
        total_restaurants,
        average_rating,
        best_rating,
        worst_rating,
        total_spent: round1(total_spent),
        total_covers,
        visit_count,
        average_per_visit,
        average_per_cover,
        restaurant_tallies,
        month_tallies,
        tag_tallies: tags.entries,
        city_tallies: cities.entries,
        country_tallies: countries.entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::period::{filter, Period};
    use crate::snapshot::Snapshot;
    use crate::types::{Restaurant, Visit};
    use chrono::TimeZone;

    fn restaurant(id: &str, rating: Option<f64>, tags: &[&str], city: Option<&str>) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: format!("Resto {}", id),
            city: city.map(String::from),
            country: Some("France".to_string()),
            rating,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn visit(id: &str, restaurant_id: &str, price: Option<f64>, covers: i64, month: u32) -> Visit {
        Visit {
            id: id.to_string(),
            restaurant_id: restaurant_id.to_string(),
            price_eur: price,
            covers,
            visited_at: Utc.with_ymd_and_hms(2024, month, 10, 20, 0, 0).unwrap(),
        }
    }

    fn run(snapshot: &Snapshot) -> Aggregates {
        aggregate(&filter(snapshot, Period::All))
    }

    #[test]
    fn test_empty_snapshot_yields_zeroed_aggregates() {
        let agg = run(&Snapshot::default());
        assert_eq!(agg.total_restaurants, 0);
        assert_eq!(agg.average_rating, 0.0);
        assert_eq!(agg.best_rating, None);
        assert_eq!(agg.worst_rating, None);
        assert_eq!(agg.total_spent, 0.0);
        assert_eq!(agg.visit_count, 0);
        assert_eq!(agg.average_per_visit, None);
        assert_eq!(agg.average_per_cover, None);
    }

    #[test]
    fn test_basic_totals() {
        let snapshot = Snapshot {
            restaurants: vec![restaurant("r1", Some(18.0), &["Italien"], Some("Paris"))],
            visits: vec![visit("v1", "r1", Some(30.0), 2, 3)],
        };
        let agg = run(&snapshot);
        assert_eq!(agg.average_rating, 18.0);
        assert_eq!(agg.total_spent, 30.0);
        assert_eq!(agg.total_covers, 2);
        assert_eq!(agg.average_per_cover, Some(15.0));
        assert_eq!(agg.average_per_visit, Some(30.0));
    }

    #[test]
    fn test_null_price_counts_visit_but_not_spend() {
        let snapshot = Snapshot {
            restaurants: vec![restaurant("r1", None, &[], None)],
            visits: vec![
                visit("v1", "r1", Some(40.0), 2, 1),
                visit("v2", "r1", None, 2, 1),
            ],
        };
        let agg = run(&snapshot);
        assert_eq!(agg.visit_count, 2);
        assert_eq!(agg.total_spent, 40.0);
        // average per visit divides by all visits, priced or not
        assert_eq!(agg.average_per_visit, Some(20.0));
    }

    #[test]
    fn test_invalid_covers_excluded_from_per_cover() {
        let snapshot = Snapshot {
            restaurants: vec![restaurant("r1", None, &[], None)],
            visits: vec![
                visit("v1", "r1", Some(30.0), 0, 1),
                visit("v2", "r1", Some(30.0), 3, 1),
            ],
        };
        let agg = run(&snapshot);
        assert_eq!(agg.total_covers, 3);
        assert_eq!(agg.average_per_cover, Some(20.0));
    }

    #[test]
    fn test_malformed_rating_contributes_zero_to_average() {
        let snapshot = Snapshot {
            restaurants: vec![
                restaurant("r1", Some(16.0), &[], None),
                restaurant("r2", Some(f64::NAN), &[], None),
            ],
            visits: vec![],
        };
        let agg = run(&snapshot);
        // 16 / 2 restaurants, NaN counted as zero contribution
        assert_eq!(agg.average_rating, 8.0);
        assert_eq!(agg.best_rating, Some(16.0));
        assert_eq!(agg.worst_rating, Some(16.0));
    }

    #[test]
    fn test_tag_counts_one_per_restaurant() {
        let snapshot = Snapshot {
            restaurants: vec![
                restaurant("r1", None, &["Italien", "Romantique"], None),
                restaurant("r2", None, &["Italien", "  "], None),
            ],
            visits: vec![
                visit("v1", "r1", None, 1, 1),
                visit("v2", "r1", None, 1, 1),
            ],
        };
        let agg = run(&snapshot);
        assert_eq!(
            agg.tag_tallies,
            vec![
                KeyCount {
                    key: "Italien".to_string(),
                    count: 2
                },
                KeyCount {
                    key: "Romantique".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_restaurant_tallies_preserve_encounter_order() {
        let snapshot = Snapshot {
            restaurants: vec![
                restaurant("r1", None, &[], None),
                restaurant("r2", None, &[], None),
            ],
            visits: vec![
                visit("v1", "r2", None, 1, 1),
                visit("v2", "r1", None, 1, 2),
                visit("v3", "r2", None, 1, 3),
            ],
        };
        let agg = run(&snapshot);
        assert_eq!(agg.restaurant_tallies[0].restaurant_id, "r2");
        assert_eq!(agg.restaurant_tallies[0].visit_count, 2);
        assert_eq!(agg.restaurant_tallies[1].restaurant_id, "r1");
        assert_eq!(agg.month_tallies.len(), 3);
        assert_eq!(agg.month_tallies[0].label(), "January 2024");
    }
}
