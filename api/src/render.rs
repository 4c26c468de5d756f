//! HTML page and JSON-LD rendering.

use chrono::{DateTime, Utc};
use common::{
    models::{DisplayEntry, PageSnapshot},
    ChainProfile,
};
use htmlescape::encode_minimal;
use num_format::{Locale, ToFormattedString};
use serde_json::json;

/// Entries listed in the schema.org block
pub const SCHEMA_ENTRIES: usize = 5;

const NOT_AVAILABLE: &str = "N/A";

/// schema.org `ItemList` describing the top of the board
pub fn schema_block(profile: &ChainProfile, cards: &[DisplayEntry]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = cards
        .iter()
        .take(SCHEMA_ENTRIES)
        .enumerate()
        .map(|(index, entry)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": entry.coin.name,
                "url": profile.coin_page_url(&entry.coin.id),
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "ItemList",
        "name": profile.title,
        "description": profile.description,
        "itemListElement": items,
    })
}

/// Full page for the current snapshot
pub fn render_page(profile: &ChainProfile, page: &PageSnapshot) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", encode_minimal(profile.title)));
    html.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n",
        encode_minimal(profile.description)
    ));
    if let Some(metadata) = &page.metadata {
        html.push_str(&metadata_script(metadata));
    }
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!("<h1>{}</h1>\n", encode_minimal(profile.title)));
    html.push_str(&format!(
        "<p class=\"update-line\">Last updated: <span id=\"update-time\">{}</span></p>\n",
        encode_minimal(&timestamp_label(page.updated_at))
    ));

    html.push_str(&format!(
        "<div id=\"loading\" style=\"display:{}\">Loading...</div>\n",
        display(page.is_loading(), "block")
    ));
    html.push_str(&format!(
        "<div id=\"error\" style=\"display:{}\">Failed to load data, please try again later.</div>\n",
        display(page.is_error(), "block")
    ));

    html.push_str(&format!(
        "<ul id=\"meme-list\" class=\"meme-list\" style=\"display:{}\">\n",
        display(page.is_content(), "grid")
    ));
    for entry in page.visible_cards() {
        html.push_str(&render_card(profile, entry));
    }
    html.push_str("</ul>\n</body>\n</html>\n");

    html
}

/// One `<li>` card
pub fn render_card(profile: &ChainProfile, entry: &DisplayEntry) -> String {
    let coin = &entry.coin;
    let (change_class, change_text) = format_change(coin.price_change_percentage_24h);

    let mut card = String::new();
    card.push_str("<li class=\"meme-item\">\n");
    card.push_str(&format!("  <div class=\"meme-rank\">#{}</div>\n", entry.rank));
    card.push_str(&format!(
        "  <img src=\"{}\" alt=\"{}\" class=\"meme-img\" loading=\"lazy\">\n",
        encode_minimal(&coin.image),
        encode_minimal(&format!(
            "{} coin {} market cap rank {}",
            profile.alt_prefix, coin.name, entry.rank
        ))
    ));
    card.push_str(&format!(
        "  <h2 class=\"meme-name\">{} ({})</h2>\n",
        encode_minimal(&coin.name),
        encode_minimal(&coin.symbol.to_uppercase())
    ));
    card.push_str("  <div class=\"meme-stats\">\n");
    card.push_str(&format!(
        "    <span>Price: ${}</span>\n",
        format_optional(coin.current_price)
    ));
    card.push_str(&format!(
        "    <span>Market cap: ${}</span>\n",
        format_optional(coin.market_cap)
    ));
    card.push_str(&format!(
        "    <span class=\"{}\">24h: {}</span>\n",
        change_class, change_text
    ));
    card.push_str("  </div>\n");

    if !entry.exchanges.is_empty() {
        card.push_str("  <div class=\"exchange-section\">\n");
        card.push_str(&format!(
            "    <div class=\"exchange-title\">{}</div>\n",
            encode_minimal(profile.exchange_heading)
        ));
        card.push_str("    <div class=\"exchanges-list\">\n");
        for exchange in &entry.exchanges {
            card.push_str(&format!(
                "      <div class=\"exchange-item\"><span class=\"exchange-type {}\">{}</span> \
                 <a href=\"{}\" target=\"_blank\" class=\"exchange-link\" rel=\"noopener noreferrer\">{}</a></div>\n",
                exchange.kind,
                exchange.kind.to_string().to_uppercase(),
                encode_minimal(&exchange.link),
                encode_minimal(&exchange.name)
            ));
        }
        card.push_str("    </div>\n  </div>\n");
    }

    card.push_str("</li>\n");
    card
}

fn metadata_script(metadata: &serde_json::Value) -> String {
    // keep "</script>" inside string values from closing the tag
    let body = metadata.to_string().replace("</", "<\\/");
    format!("<script type=\"application/ld+json\">{}</script>\n", body)
}

fn display(visible: bool, shown: &'static str) -> &'static str {
    if visible {
        shown
    } else {
        "none"
    }
}

pub fn timestamp_label(updated_at: Option<DateTime<Utc>>) -> String {
    match updated_at {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "-".to_string(),
    }
}

fn format_optional(value: Option<f64>) -> String {
    value
        .map(format_amount)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Thousands-grouped amount. Sub-unit values keep up to 8 decimals so meme
/// prices stay readable, larger values up to 3.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let digits = if value.abs() >= 1.0 { 3 } else { 8 };
    let fixed = format!("{:.*}", digits, value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let whole: u128 = match whole.parse() {
        Ok(whole) => whole,
        Err(_) => return NOT_AVAILABLE.to_string(),
    };
    let fraction = fraction.trim_end_matches('0');

    let sign = if value < 0.0 && (whole != 0 || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };
    let grouped = whole.to_formatted_string(&Locale::en);

    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, fraction)
    }
}

/// CSS class and label of a 24h change
pub fn format_change(change: Option<f64>) -> (&'static str, String) {
    match change {
        Some(value) if value >= 0.0 => ("change-positive", format!("{:.2}%", value)),
        Some(value) => ("change-negative", format!("{:.2}%", value)),
        None => ("change-unknown", NOT_AVAILABLE.to_string()),
    }
}
