//! Analytics module for carnet
//!
//! Derives statistics and insights from a dining snapshot:
//! - Period filtering (all-time or per-year views)
//! - Single-pass aggregation (totals, averages, tallies)
//! - Ranking (top-N lists and extremal entries)
//! - Gourmet badge classification
//! - Year-over-year comparison
//!
//! ## Pipeline
//!
//! The engine chains the passes as pure functions over an in-memory
//! snapshot; nothing here touches disk or mutates the input. See
//! [`engine`] for the orchestration and the optional result cache.

pub mod aggregate;
pub mod badge;
pub mod compare;
pub mod engine;
pub mod period;
pub mod rank;

// Engine exports
pub use engine::{compute, StatisticsResult, StatsCache};

// Existing exports
pub use aggregate::{aggregate, Aggregates, KeyCount};
pub use badge::{classify, Badge, BehavioralStats};
pub use compare::{year_over_year, ComparisonDeltas, Trend, YearComparison};
pub use period::{available_years, filter, Period, PeriodData};
pub use rank::{
    order_restaurants, MonthActivity, MostVisited, PerCoverVisit, PriciestVisit, TopRated,
};
