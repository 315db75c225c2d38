//! Formatting helpers shared across front ends.
//!
//! The engine returns raw numbers; these helpers are for the CLI and other
//! consumers that want a plain rendering. Anything locale-aware stays with
//! the host application.

use crate::types::PLACEHOLDER;
use chrono::{DateTime, Utc};

/// Format an amount in euros, rounded to one decimal (e.g., "30€", "15.5€").
pub fn format_eur(v: f64) -> String {
    let n = (v * 10.0).round() / 10.0;
    if n.fract() == 0.0 {
        format!("{}€", n as i64)
    } else {
        format!("{:.1}€", n)
    }
}

/// Format an optional amount in euros, or the placeholder when missing.
pub fn format_eur_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format_eur(v),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a rating out of 20 (e.g., "16/20"), or the placeholder.
pub fn format_rating(v: Option<f64>) -> String {
    match v {
        Some(v) if v.fract() == 0.0 => format!("{}/20", v as i64),
        Some(v) => format!("{:.1}/20", v),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a visit date (e.g., "Mar 01, 2024").
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%b %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(30.0), "30€");
        assert_eq!(format_eur(15.55), "15.6€");
        assert_eq!(format_eur(0.0), "0€");
    }

    #[test]
    fn test_format_eur_opt() {
        assert_eq!(format_eur_opt(None), "—");
        assert_eq!(format_eur_opt(Some(12.5)), "12.5€");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(Some(16.0)), "16/20");
        assert_eq!(format_rating(Some(14.5)), "14.5/20");
        assert_eq!(format_rating(None), "—");
    }

    #[test]
    fn test_format_date() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(format_date(ts), "Mar 01, 2024");
    }
}
