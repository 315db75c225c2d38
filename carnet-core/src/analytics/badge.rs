//! Gourmet badge classification
//!
//! Maps the top tags (and, as fallback, behavioral thresholds) to a single
//! label/subtitle pair. The cascade is an explicit ordered table consulted
//! by one lookup loop: the first rule whose tag list intersects the top
//! tags wins. Matching is case- and accent-insensitive but otherwise exact.

use crate::types::normalize_label;
use serde::Serialize;

/// A classificatory label summarizing dominant dining tags or behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub subtitle: String,
}

impl Badge {
    fn new(label: &str, subtitle: &str) -> Self {
        Self {
            label: label.to_string(),
            subtitle: subtitle.to_string(),
        }
    }
}

/// One entry of the tag cascade.
struct BadgeRule {
    /// Tag labels that trigger this rule (any match wins)
    match_tags: &'static [&'static str],
    label: &'static str,
    subtitle: &'static str,
}

/// The tag cascade, in priority order. First match wins.
///
/// Cuisine rules first, then concept/ambiance rules. Labels are fixed
/// product strings and intentionally not localized.
const BADGE_RULES: &[BadgeRule] = &[
    // Cuisine
    BadgeRule {
        match_tags: &["Japonais", "Asiatique"],
        label: "🍣 Addict d’Asie",
        subtitle: "Cuisine favorite",
    },
    BadgeRule {
        match_tags: &["Italien"],
        label: "🍕 Italien dans l’âme",
        subtitle: "Cuisine favorite",
    },
    BadgeRule {
        match_tags: &["Français"],
        label: "🥖 Tradition française",
        subtitle: "Cuisine favorite",
    },
    BadgeRule {
        match_tags: &["Indien"],
        label: "🍛 Épicé & curieux",
        subtitle: "Cuisine favorite",
    },
    BadgeRule {
        match_tags: &["Oriental", "Méditerranéen"],
        label: "🫒 Soleil en bouche",
        subtitle: "Cuisine favorite",
    },
    BadgeRule {
        match_tags: &["Mexicain"],
        label: "🌮 Team Mexique",
        subtitle: "Cuisine favorite",
    },
    BadgeRule {
        match_tags: &["Américain"],
        label: "🍔 US vibes",
        subtitle: "Cuisine favorite",
    },
    // Concepts / ambiance / diet
    BadgeRule {
        match_tags: &["Gastronomique"],
        label: "💎 Fine dining",
        subtitle: "Plutôt gastro",
    },
    BadgeRule {
        match_tags: &["Bistrot", "Brunch"],
        label: "☕ Bistrot lover",
        subtitle: "Confort food",
    },
    BadgeRule {
        match_tags: &["Street food", "Fast-food"],
        label: "🚀 Street-food lover",
        subtitle: "Rapide & bon",
    },
    BadgeRule {
        match_tags: &["Tapas / Partage"],
        label: "🍷 Partageur",
        subtitle: "Tapas & convivialité",
    },
    BadgeRule {
        match_tags: &["Vegan"],
        label: "🥗 Vegan mood",
        subtitle: "Green vibes",
    },
    BadgeRule {
        match_tags: &["Romantique"],
        label: "🌹 Romantique",
        subtitle: "Ambiance favorite",
    },
    BadgeRule {
        match_tags: &["Familial"],
        label: "👨‍👩‍👧‍👦 Family friendly",
        subtitle: "Ambiance favorite",
    },
];

/// Behavioral thresholds consulted when no tag rule matches.
const MIN_VISITS_FOR_BIG_EATER: usize = 30;
const MIN_AVERAGE_FOR_DEMANDING: f64 = 16.0;
const MIN_PER_COVER_FOR_BIG_SPENDER: f64 = 30.0;

/// Behavioral inputs to the fallback rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct BehavioralStats {
    pub visit_count: usize,
    pub average_rating: f64,
    pub average_per_cover: Option<f64>,
}

/// Classify the user's gourmet badge from their top tags and behavior.
pub fn classify<S: AsRef<str>>(top_tags: &[S], stats: &BehavioralStats) -> Badge {
    let normalized: Vec<String> = top_tags
        .iter()
        .map(|t| normalize_label(t.as_ref()))
        .collect();

    for rule in BADGE_RULES {
        let matched = rule
            .match_tags
            .iter()
            .any(|tag| normalized.iter().any(|t| t == &normalize_label(tag)));
        if matched {
            return Badge::new(rule.label, rule.subtitle);
        }
    }

    // Behavioral fallbacks, in order
    if stats.visit_count >= MIN_VISITS_FOR_BIG_EATER {
        return Badge::new("🔥 Gros mangeur", "Beaucoup de visites");
    }
    if stats.average_rating >= MIN_AVERAGE_FOR_DEMANDING {
        return Badge::new("⭐ Exigeant", "Notes élevées");
    }
    if stats
        .average_per_cover
        .is_some_and(|v| v >= MIN_PER_COVER_FOR_BIG_SPENDER)
    {
        return Badge::new("💸 Grand seigneur", "Panier / couvert élevé");
    }

    Badge::new("🍽️ Gourmand curieux", "Toujours en exploration")
}
