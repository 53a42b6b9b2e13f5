use thiserror::Error;

use super::model::RawValue;

/// Multiplier for the `l` (lakh) suffix.
pub const LAKH: f64 = 100_000.0;
/// Multiplier for the `k` (thousand) suffix.
pub const THOUSAND: f64 = 1_000.0;

/// Highest valid rating.
pub const MAX_RATING: f64 = 5.0;

/// Why a field could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("empty value")]
    Empty,
    #[error("'{raw}' is not numeric")]
    NotNumeric { raw: String },
    #[error("negative value {0}")]
    Negative(f64),
    #[error("non-finite value")]
    NotFinite,
    #[error("rating {0} outside 0..=5")]
    OutOfRange(f64),
}

// ---------------------------------------------------------------------------
// Count metrics (reviews, salaries, interviews, jobs)
// ---------------------------------------------------------------------------

/// Normalize a count field, degrading every failure to `0.0`.
pub fn normalize_metric(value: &RawValue) -> f64 {
    try_normalize_metric(value).unwrap_or(0.0)
}

/// Normalize a count field such as `"1.2k"`, `"3l"` or `"12,400"`.
///
/// Text is lowercased, trimmed and stripped of commas. If it contains an
/// `l` anywhere, every `l` is removed and the rest is scaled by one lakh;
/// otherwise if it contains a `k`, the same happens with a thousand.
/// The letter check is a substring test, so `"talk"` takes the lakh branch
/// and then fails to parse.
///
/// Negative results are rejected as well, so every count stays >= 0.
pub fn try_normalize_metric(value: &RawValue) -> Result<f64, NormalizeError> {
    let v = match value {
        RawValue::Missing => return Err(NormalizeError::Empty),
        RawValue::Number(n) if *n == 0.0 => return Ok(0.0),
        RawValue::Number(n) => *n,
        RawValue::Text(s) => parse_suffixed(s)?,
    };
    check_count(v)
}

fn parse_suffixed(s: &str) -> Result<f64, NormalizeError> {
    let cleaned = s.to_lowercase().replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(NormalizeError::Empty);
    }

    let (digits, scale) = if cleaned.contains('l') {
        (cleaned.replace('l', ""), LAKH)
    } else if cleaned.contains('k') {
        (cleaned.replace('k', ""), THOUSAND)
    } else {
        (cleaned.to_string(), 1.0)
    };

    digits
        .trim()
        .parse::<f64>()
        .map(|v| v * scale)
        .map_err(|_| NormalizeError::NotNumeric { raw: s.to_string() })
}

fn check_count(v: f64) -> Result<f64, NormalizeError> {
    if !v.is_finite() {
        Err(NormalizeError::NotFinite)
    } else if v < 0.0 {
        Err(NormalizeError::Negative(v))
    } else {
        Ok(v)
    }
}

// ---------------------------------------------------------------------------
// Rating
// ---------------------------------------------------------------------------

/// Coerce a rating to a number; anything invalid becomes `None` (missing),
/// which the load pipeline later fills with `0.0`. No suffix handling.
pub fn coerce_rating(value: &RawValue) -> Option<f64> {
    try_coerce_rating(value).ok()
}

/// Parse a rating. Values outside `0..=5` are rejected rather than kept,
/// so every loaded rating lies on the scale.
pub fn try_coerce_rating(value: &RawValue) -> Result<f64, NormalizeError> {
    let v = match value {
        RawValue::Missing => return Err(NormalizeError::Empty),
        RawValue::Number(n) => *n,
        RawValue::Text(s) => {
            let t = s.trim();
            if t.is_empty() {
                return Err(NormalizeError::Empty);
            }
            t.parse::<f64>()
                .map_err(|_| NormalizeError::NotNumeric { raw: s.clone() })?
        }
    };
    if !v.is_finite() {
        Err(NormalizeError::NotFinite)
    } else if !(0.0..=MAX_RATING).contains(&v) {
        Err(NormalizeError::OutOfRange(v))
    } else {
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    #[test]
    fn suffixes_scale_the_numeric_part() {
        assert_eq!(normalize_metric(&text("1.5k")), 1500.0);
        assert_eq!(normalize_metric(&text("2l")), 200_000.0);
        assert_eq!(normalize_metric(&text(" 3.2K ")), 3200.0);
        assert_eq!(normalize_metric(&text("1.5L")), 150_000.0);
        let inexact = normalize_metric(&text("1.1L"));
        assert!((inexact - 110_000.0).abs() < 1e-6, "1.1L -> {inexact}");
        assert_eq!(normalize_metric(&text("1.5 k")), 1500.0);
    }

    #[test]
    fn suffix_grid_matches_multipliers() {
        for base in [0.0, 0.5, 1.0, 7.25, 12.0, 999.9] {
            let k = normalize_metric(&text(&format!("{base}k")));
            let l = normalize_metric(&text(&format!("{base}l")));
            assert!((k - base * THOUSAND).abs() < 1e-6, "{base}k -> {k}");
            assert!((l - base * LAKH).abs() < 1e-6, "{base}l -> {l}");
        }
    }

    #[test]
    fn commas_are_thousands_separators() {
        assert_eq!(normalize_metric(&text("12,400")), 12_400.0);
        assert_eq!(normalize_metric(&text("1,2k")), 12_000.0);
    }

    #[test]
    fn plain_numbers_parse_as_is() {
        assert_eq!(normalize_metric(&text("873")), 873.0);
        assert_eq!(normalize_metric(&RawValue::Number(42.5)), 42.5);
        assert_eq!(normalize_metric(&RawValue::Number(0.0)), 0.0);
    }

    #[test]
    fn junk_and_empty_become_zero() {
        assert_eq!(normalize_metric(&text("abc")), 0.0);
        assert_eq!(normalize_metric(&text("")), 0.0);
        assert_eq!(normalize_metric(&text("   ")), 0.0);
        assert_eq!(normalize_metric(&text("--")), 0.0);
        assert_eq!(normalize_metric(&RawValue::Missing), 0.0);
        assert_eq!(normalize_metric(&RawValue::Number(f64::NAN)), 0.0);
        assert_eq!(normalize_metric(&text("nan")), 0.0);
    }

    #[test]
    fn lakh_check_wins_over_thousand() {
        // both letters present: 'l' is checked first, the 'k' stays and breaks the parse
        assert_eq!(normalize_metric(&text("1kl")), 0.0);
        assert_eq!(
            try_normalize_metric(&text("talk")),
            Err(NormalizeError::NotNumeric {
                raw: "talk".to_string()
            })
        );
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert_eq!(
            try_normalize_metric(&text("-3")),
            Err(NormalizeError::Negative(-3.0))
        );
        assert_eq!(normalize_metric(&RawValue::Number(-1.0)), 0.0);
        assert_eq!(normalize_metric(&text("-1.5k")), 0.0);
    }

    #[test]
    fn rating_coercion_has_no_suffix_rules() {
        assert_eq!(coerce_rating(&text("4.2")), Some(4.2));
        assert_eq!(coerce_rating(&RawValue::Number(3.0)), Some(3.0));
        assert_eq!(coerce_rating(&text("4k")), None);
        assert_eq!(coerce_rating(&text("n/a")), None);
        assert_eq!(coerce_rating(&RawValue::Missing), None);
    }

    #[test]
    fn ratings_outside_the_scale_are_missing() {
        assert_eq!(
            try_coerce_rating(&RawValue::Number(7.0)),
            Err(NormalizeError::OutOfRange(7.0))
        );
        assert_eq!(coerce_rating(&RawValue::Number(-0.5)), None);
        assert_eq!(coerce_rating(&RawValue::Number(5.0)), Some(5.0));
        assert_eq!(coerce_rating(&RawValue::Number(0.0)), Some(0.0));
    }
}
