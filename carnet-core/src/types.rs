//! Core domain types for carnet
//!
//! These types mirror the rows the host application keeps in sync for one
//! user: the restaurants they recorded and the individual visits (one row
//! per dining occasion). The analytics engine only ever reads a snapshot of
//! both collections; it never creates or mutates them.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Restaurant** | A place the user recorded, with rating and tags |
//! | **Visit** | One dining occasion at a restaurant |
//! | **Cover** | One diner served during a visit |
//! | **Period** | The year window ("all" or a calendar year) applied before aggregation |
//! | **Badge** | A single label summarizing dominant tags or behavior |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound of the rating scale (x/20).
pub const RATING_MAX: f64 = 20.0;

/// Placeholder used wherever a name or value cannot be resolved.
pub const PLACEHOLDER: &str = "—";

/// A restaurant recorded by the user.
///
/// Identity is immutable; descriptive fields can change between snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    /// Opaque identifier, unique within one user's collection
    pub id: String,
    /// Display name
    pub name: String,
    /// City, derived upstream from a geocoded address
    #[serde(default)]
    pub city: Option<String>,
    /// Country, derived upstream from a geocoded address
    #[serde(default)]
    pub country: Option<String>,
    /// Rating on a 0..=20 scale; absent or non-finite values are tolerated
    #[serde(default)]
    pub rating: Option<f64>,
    /// Free-text labels; order only matters for display
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time, used as a stable fallback sort key
    pub created_at: DateTime<Utc>,
}

impl Restaurant {
    /// Rating clamped to the valid domain, or `None` when absent/non-finite.
    ///
    /// Averages treat an unusable rating as a zero contribution; extremes
    /// skip it entirely.
    pub fn usable_rating(&self) -> Option<f64> {
        self.rating.filter(|r| r.is_finite()).map(clamp_rating)
    }
}

/// One recorded dining occasion at a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    /// Opaque identifier
    pub id: String,
    /// Foreign reference to the restaurant; dangling references resolve to
    /// the placeholder name rather than failing
    pub restaurant_id: String,
    /// Total price in euros; `None` means "price unknown" and is excluded
    /// from spend totals but still counted toward visit counts
    #[serde(default)]
    pub price_eur: Option<f64>,
    /// Diners served; visits with covers < 1 are excluded from per-cover
    /// math but still counted
    #[serde(default)]
    pub covers: i64,
    /// When the visit happened; drives year/month bucketing
    pub visited_at: DateTime<Utc>,
}

impl Visit {
    /// Price when known and finite.
    pub fn usable_price(&self) -> Option<f64> {
        self.price_eur.filter(|p| p.is_finite())
    }

    /// Covers when usable as a divisor (>= 1).
    pub fn usable_covers(&self) -> Option<i64> {
        (self.covers >= 1).then_some(self.covers)
    }
}

/// Clamp a rating into the [0, 20] domain.
pub fn clamp_rating(v: f64) -> f64 {
    v.clamp(0.0, RATING_MAX)
}

/// Case- and accent-insensitive normalization for tag and name matching.
///
/// Folds the accented characters that occur in the product's tag
/// vocabulary (French labels), lowercases, and trims.
pub fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(fold_accent)
        .flat_map(char::to_lowercase)
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' | 'À' | 'Â' | 'Ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'î' | 'ï' | 'Î' | 'Ï' => 'i',
        'ô' | 'ö' | 'Ô' | 'Ö' => 'o',
        'ù' | 'û' | 'ü' | 'Ù' | 'Û' | 'Ü' => 'u',
        'ç' | 'Ç' => 'c',
        '’' => '\'',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn restaurant(rating: Option<f64>) -> Restaurant {
        Restaurant {
            id: "r1".to_string(),
            name: "Chez Test".to_string(),
            city: None,
            country: None,
            rating,
            tags: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_clamp_rating() {
        assert_eq!(clamp_rating(25.0), 20.0);
        assert_eq!(clamp_rating(-3.0), 0.0);
        assert_eq!(clamp_rating(14.0), 14.0);
    }

    #[test]
    fn test_usable_rating_rejects_non_finite() {
        assert_eq!(restaurant(Some(f64::NAN)).usable_rating(), None);
        assert_eq!(restaurant(Some(f64::INFINITY)).usable_rating(), None);
        assert_eq!(restaurant(None).usable_rating(), None);
        assert_eq!(restaurant(Some(22.0)).usable_rating(), Some(20.0));
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Français "), "francais");
        assert_eq!(normalize_label("Méditerranéen"), "mediterraneen");
        assert_eq!(normalize_label("ITALIEN"), "italien");
        assert_eq!(normalize_label("dans l’âme"), "dans l'ame");
    }

    #[test]
    fn test_visit_usable_fields() {
        let v = Visit {
            id: "v1".to_string(),
            restaurant_id: "r1".to_string(),
            price_eur: Some(f64::NAN),
            covers: 0,
            visited_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        };
        assert_eq!(v.usable_price(), None);
        assert_eq!(v.usable_covers(), None);

        let v = Visit {
            price_eur: Some(30.0),
            covers: 2,
            ..v
        };
        assert_eq!(v.usable_price(), Some(30.0));
        assert_eq!(v.usable_covers(), Some(2));
    }
}
