//! Display formatting helpers for prices, ratings, and text.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format a price as rupees with Indian digit grouping, rounded to whole
/// rupees. `1234567` renders as `₹12,34,567`: the last three digits form one
/// group, the rest group in twos.
#[must_use]
pub fn format_price(price: Decimal) -> String {
    let rounded = price
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let digits = rounded.to_string();
    let sign = if price.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}₹{}", group_indian(&digits))
}

fn group_indian(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    if chars.len() <= 3 {
        return digits.to_owned();
    }

    let split = chars.len() - 3;
    let head = chars.get(..split).unwrap_or_default();
    let tail: String = chars.get(split..).unwrap_or_default().iter().collect();

    // Group the head in twos from the right.
    let mut groups: Vec<String> = Vec::new();
    let mut rest = head;
    while !rest.is_empty() {
        let cut = rest.len().saturating_sub(2);
        let group: String = rest.get(cut..).unwrap_or_default().iter().collect();
        groups.push(group);
        rest = rest.get(..cut).unwrap_or_default();
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// Render a 0 to 5 rating as stars, with a half star for fractional parts of
/// 0.5 and above, padded with hollow stars to five characters.
#[must_use]
pub fn format_rating(rating: f64) -> String {
    let clamped = rating.clamp(0.0, 5.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let full = clamped.floor() as usize;
    let half = clamped.fract() >= 0.5;

    let mut out = "★".repeat(full.min(5));
    if half && full < 5 {
        out.push('½');
    }
    let used = full + usize::from(half && full < 5);
    out.push_str(&"☆".repeat(5_usize.saturating_sub(used)));
    out
}

/// Truncate to at most `max_chars` characters, appending `...` when anything
/// was cut. Counts characters, not bytes, so multibyte text is never split.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
