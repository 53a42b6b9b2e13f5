// ---------------------------------------------------------------------------
// Display formatting for tiles, chart axes and the data grid
// ---------------------------------------------------------------------------

use crate::data::normalize::{LAKH, MAX_RATING, THOUSAND};

/// `"4.2 / 5.0"`, or `"no data"` for an empty view.
pub fn format_rating(mean: Option<f64>) -> String {
    match mean {
        Some(v) => format!("{v:.1} / {MAX_RATING:.1}"),
        None => "no data".to_string(),
    }
}

/// Round to an integer and group thousands: `1234567.4` → `"1,234,567"`.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Short axis label using the same units as the source data:
/// `1500` → `"1.5k"`, `250000` → `"2.5L"`.
pub fn compact_count(value: f64) -> String {
    let abs = value.abs();
    let (scaled, unit) = if abs >= LAKH {
        (value / LAKH, "L")
    } else if abs >= THOUSAND {
        (value / THOUSAND, "k")
    } else {
        return format!("{value:.0}");
    };
    let text = format!("{scaled:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}{unit}")
}

/// Shorten a category label to `max` characters, marking the cut with `…`.
pub fn truncate_label(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let kept: String = name.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
