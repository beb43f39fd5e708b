//! Plain-text rendering of pages and detail panels

use std::fmt::Write;

use dex_catalog::{CatalogIndex, Page};
use dex_core::DetailRecord;

/// Width of a full stat bar in characters
const BAR_WIDTH: usize = 20;

/// Upper-case the first character
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "special-attack" -> "special attack"; only the first hyphen is replaced
pub fn label(name: &str) -> String {
    name.replacen('-', " ", 1)
}

/// "#4 Charmander"
pub fn title(record: &DetailRecord) -> String {
    format!("#{} {}", record.id, capitalize(&record.name))
}

pub fn render_page(page: &Page, cards: &[&DetailRecord]) -> String {
    let mut out = String::new();

    if page.total_matches == 0 {
        out.push_str("No matches.\n");
        return out;
    }

    for card in cards {
        let _ = writeln!(
            out,
            "  ID: #{:<5} {:<24} {}",
            card.id,
            capitalize(&card.name),
            card.categories.join(", ")
        );
    }
    let skipped = page.entries.len().saturating_sub(cards.len());
    if skipped > 0 {
        let _ = writeln!(out, "  ({} without details)", skipped);
    }
    let _ = writeln!(out, "{} - {} matches", page.label(), page.total_matches);
    out
}

pub fn render_detail(record: &DetailRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title(record));
    if let Some(sprite) = &record.sprite {
        let _ = writeln!(out, "  Sprite: {}", sprite);
    }
    let _ = writeln!(out, "  Height: {} m", record.height_meters());
    let _ = writeln!(out, "  Weight: {} kg", record.weight_kilograms());
    let _ = writeln!(out, "  Types: {}", record.categories.join(", "));

    let _ = writeln!(out, "  Abilities:");
    for ability in &record.abilities {
        let _ = writeln!(out, "    - {}", capitalize(&label(ability)));
    }

    let _ = writeln!(out, "  Base stats:");
    for stat in &record.stats {
        let filled = (stat.bar_fraction() * BAR_WIDTH as f32).round() as usize;
        let _ = writeln!(
            out,
            "    {:<16} {:>3} {}{}",
            capitalize(&label(&stat.name)),
            stat.value,
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled)
        );
    }
    out
}

pub fn render_filters(index: &CatalogIndex) -> String {
    let types: Vec<String> = index.category_names().iter().map(|t| capitalize(t)).collect();
    format!(
        "Types: {}\nGenerations: 1-{}\n",
        types.join(", "),
        index.group_count()
    )
}
