//! carnet-stats - Dining History in Review CLI
//!
//! Generate statistics summaries from a carnet JSON export.

use anyhow::{Context, Result};
use carnet_core::analytics::{
    available_years, compute, order_restaurants, year_over_year, Period, StatisticsResult, Trend,
    YearComparison,
};
use carnet_core::format::{format_date, format_eur, format_eur_opt, format_rating};
use carnet_core::{Config, Snapshot};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "carnet-stats")]
#[command(about = "Carnet stats - Your dining history in review")]
#[command(version)]
struct Args {
    /// Path to the carnet JSON export
    input: PathBuf,

    /// Year to generate statistics for (default: all time)
    #[arg(long)]
    year: Option<i32>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// List restaurants in default order instead of computing statistics
    #[arg(long)]
    list: bool,

    /// Disable comparison with the previous year
    #[arg(long)]
    no_compare: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = carnet_core::logging::init(&config.logging).ok();

    let snapshot =
        Snapshot::load_from(&args.input).context("failed to load dining history export")?;

    if args.list {
        print_list(&snapshot);
        return Ok(());
    }

    // A selected year with no remaining visits falls back to all time.
    let years = available_years(&snapshot.visits);
    let period = match args.year {
        Some(year) => Period::Year(year).resolve(&years),
        None => Period::All,
    };

    let stats = compute(&snapshot, period, &config.stats);

    let comparison = match period {
        Period::Year(year) if !args.no_compare => Some(year_over_year(
            &snapshot,
            year,
            stats.total_spent,
            stats.visit_count,
        )),
        _ => None,
    };

    match args.export.as_deref() {
        Some("json") => print_json(&stats, comparison.as_ref())?,
        Some("md") => print_markdown(&stats, comparison.as_ref()),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&stats, comparison.as_ref()),
    }

    Ok(())
}

fn period_title(period: Period) -> String {
    match period {
        Period::All => "All time".to_string(),
        Period::Year(year) => year.to_string(),
    }
}

fn format_delta(delta_pct: Option<i64>) -> String {
    match delta_pct {
        Some(d) => match Trend::from_delta(d) {
            Trend::Up => format!("↑ +{}%", d),
            Trend::Down => format!("↓ {}%", d),
            Trend::Flat => "→ 0%".to_string(),
        },
        None => "—".to_string(),
    }
}

fn print_terminal(stats: &StatisticsResult, comparison: Option<&YearComparison>) {
    let title = format!("🍽️ YOUR {} IN RESTAURANTS 🍽️", period_title(stats.period));

    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    if stats.total_restaurants == 0 && stats.visit_count == 0 {
        println!("  No dining activity found for this period.");
        println!();
        return;
    }

    println!("📊 THE NUMBERS");
    println!(
        "   Restaurants: {:<10} Visits: {}",
        stats.total_restaurants, stats.visit_count
    );
    println!(
        "   Spent:       {:<10} Covers: {}",
        format_eur(stats.total_spent),
        stats.total_covers
    );
    println!(
        "   Per visit:   {:<10} Per cover: {}",
        format_eur_opt(stats.average_per_visit),
        format_eur_opt(stats.average_per_cover)
    );
    println!(
        "   Avg rating:  {:<10} Best: {}  Worst: {}",
        format_rating(Some(stats.average_rating)),
        format_rating(stats.best_rating),
        format_rating(stats.worst_rating)
    );
    println!();

    if !stats.top_tags.is_empty() {
        println!("🏆 TOP TAGS");
        for (i, tag) in stats.top_tags.iter().enumerate() {
            let rank = match i {
                0 => "🥇".to_string(),
                1 => "🥈".to_string(),
                2 => "🥉".to_string(),
                _ => format!("{}.", i + 1),
            };
            println!("   {} {:<20} {:>4}", rank, tag.key, tag.count);
        }
        println!();
    }

    println!("📍 PLACES");
    println!("   Top city:     {}", stats.top_city.as_deref().unwrap_or("—"));
    println!(
        "   Top country:  {}",
        stats.top_country.as_deref().unwrap_or("—")
    );
    for country in &stats.countries {
        println!("   {:<14} {:>4}", country.key, country.count);
    }
    println!();

    println!("✨ HIGHLIGHTS");
    if let Some(mv) = &stats.most_visited {
        println!(
            "   Most visited:  {} ({} visits)",
            mv.restaurant_name, mv.visit_count
        );
    }
    if let Some(p) = &stats.priciest_visit {
        println!(
            "   Priciest:      {} - {} on {}",
            p.restaurant_name,
            format_eur(p.price_eur),
            format_date(p.visited_at)
        );
    }
    if let Some(b) = &stats.best_per_cover {
        println!(
            "   Best value:    {} - {}/cover",
            b.restaurant_name,
            format_eur(b.unit_price)
        );
    }
    if let Some(w) = &stats.worst_per_cover {
        println!(
            "   Splurge:       {} - {}/cover",
            w.restaurant_name,
            format_eur(w.unit_price)
        );
    }
    if let Some(m) = &stats.most_active_month {
        println!("   Busiest month: {} ({} visits)", m.label, m.visit_count);
    }
    println!();

    if !stats.top_rated.is_empty() {
        println!("⭐ TOP RATED");
        for entry in &stats.top_rated {
            println!(
                "   {:<24} {}  ({} visit{})",
                entry.restaurant_name,
                format_rating(Some(entry.rating)),
                entry.visit_count,
                if entry.visit_count == 1 { "" } else { "s" }
            );
        }
        println!();
    }

    if let Some(cmp) = comparison {
        println!("📈 VS {}", cmp.previous_year);
        match &cmp.deltas {
            Some(deltas) => println!(
                "   Spent: {}  │  Visits: {}",
                format_delta(deltas.spent_delta_pct),
                format_delta(deltas.visit_delta_pct)
            ),
            None => println!("   No data for {}.", cmp.previous_year),
        }
        println!();
    }

    println!("🎭 YOUR BADGE: {}", stats.badge.label);
    println!("   \"{}\"", stats.badge.subtitle);
    println!();
}

fn print_markdown(stats: &StatisticsResult, comparison: Option<&YearComparison>) {
    println!("# 🍽️ {} in Restaurants", period_title(stats.period));
    println!();

    if stats.total_restaurants == 0 && stats.visit_count == 0 {
        println!("*No dining activity found for this period.*");
        return;
    }

    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Restaurants | {} |", stats.total_restaurants);
    println!("| Visits | {} |", stats.visit_count);
    println!("| Total spent | {} |", format_eur(stats.total_spent));
    println!("| Covers | {} |", stats.total_covers);
    println!("| Average per visit | {} |", format_eur_opt(stats.average_per_visit));
    println!("| Average per cover | {} |", format_eur_opt(stats.average_per_cover));
    println!("| Average rating | {} |", format_rating(Some(stats.average_rating)));
    println!("| Best rating | {} |", format_rating(stats.best_rating));
    println!("| Worst rating | {} |", format_rating(stats.worst_rating));
    println!();

    if !stats.top_tags.is_empty() {
        println!("## Top Tags");
        println!();
        for (i, tag) in stats.top_tags.iter().enumerate() {
            let emoji = match i {
                0 => "🥇",
                1 => "🥈",
                2 => "🥉",
                _ => "  ",
            };
            println!("{} **{}** - {} restaurants", emoji, tag.key, tag.count);
        }
        println!();
    }

    println!("## Places");
    println!();
    println!("- **Top city:** {}", stats.top_city.as_deref().unwrap_or("—"));
    println!(
        "- **Top country:** {}",
        stats.top_country.as_deref().unwrap_or("—")
    );
    println!();

    println!("## Highlights");
    println!();
    if let Some(mv) = &stats.most_visited {
        println!(
            "- **Most visited:** {} ({} visits)",
            mv.restaurant_name, mv.visit_count
        );
    }
    if let Some(p) = &stats.priciest_visit {
        println!(
            "- **Priciest visit:** {} - {} on {}",
            p.restaurant_name,
            format_eur(p.price_eur),
            format_date(p.visited_at)
        );
    }
    if let Some(b) = &stats.best_per_cover {
        println!(
            "- **Best value:** {} - {} per cover",
            b.restaurant_name,
            format_eur(b.unit_price)
        );
    }
    if let Some(w) = &stats.worst_per_cover {
        println!(
            "- **Biggest splurge:** {} - {} per cover",
            w.restaurant_name,
            format_eur(w.unit_price)
        );
    }
    if let Some(m) = &stats.most_active_month {
        println!("- **Busiest month:** {} ({} visits)", m.label, m.visit_count);
    }
    println!();

    if !stats.top_rated.is_empty() {
        println!("## Top Rated");
        println!();
        for entry in &stats.top_rated {
            println!(
                "- **{}** - {} ({} visits)",
                entry.restaurant_name,
                format_rating(Some(entry.rating)),
                entry.visit_count
            );
        }
        println!();
    }

    if let Some(cmp) = comparison {
        println!("## Vs {}", cmp.previous_year);
        println!();
        match &cmp.deltas {
            Some(deltas) => {
                println!("| Metric | Change |");
                println!("|--------|--------|");
                println!("| Spent | {} |", format_delta(deltas.spent_delta_pct));
                println!("| Visits | {} |", format_delta(deltas.visit_delta_pct));
            }
            None => println!("*No data for {}.*", cmp.previous_year),
        }
        println!();
    }

    println!("## Your Badge");
    println!();
    println!("**{}**", stats.badge.label);
    println!();
    println!("*\"{}\"*", stats.badge.subtitle);
    println!();
    println!("---");
    println!("*Generated by carnet-stats*");
}

fn print_json(stats: &StatisticsResult, comparison: Option<&YearComparison>) -> Result<()> {
    let json = serde_json::json!({
        "period": stats.period.to_string(),
        "totals": {
            "restaurants": stats.total_restaurants,
            "visits": stats.visit_count,
            "spent_eur": stats.total_spent,
            "covers": stats.total_covers,
            "average_per_visit": stats.average_per_visit,
            "average_per_cover": stats.average_per_cover,
            "average_rating": stats.average_rating,
            "best_rating": stats.best_rating,
            "worst_rating": stats.worst_rating,
        },
        "top_tags": stats.top_tags,
        "top_city": stats.top_city,
        "top_country": stats.top_country,
        "countries": stats.countries,
        "most_visited": stats.most_visited,
        "priciest_visit": stats.priciest_visit,
        "best_per_cover": stats.best_per_cover,
        "worst_per_cover": stats.worst_per_cover,
        "most_active_month": stats.most_active_month,
        "top_rated": stats.top_rated,
        "badge": stats.badge,
        "comparison": comparison,
    });

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn print_list(snapshot: &Snapshot) {
    if snapshot.restaurants.is_empty() {
        println!("No restaurants yet.");
        return;
    }

    for restaurant in order_restaurants(snapshot) {
        let place = match (&restaurant.city, &restaurant.country) {
            (Some(city), Some(country)) => format!("{}, {}", city, country),
            (Some(city), None) => city.clone(),
            (None, Some(country)) => country.clone(),
            (None, None) => "—".to_string(),
        };
        println!(
            "{:<28} {:>8}  {}",
            restaurant.name,
            format_rating(restaurant.usable_rating()),
            place
        );
    }
}
