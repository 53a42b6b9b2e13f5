use std::fmt;

use super::normalize::NormalizeError;

// ---------------------------------------------------------------------------
// RawValue – a single cell as read from the source, before normalization
// ---------------------------------------------------------------------------

/// A source cell, typed the way a tabular reader would infer it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Missing,
}

impl RawValue {
    /// Infer the type of a CSV cell: empty → missing, float → number,
    /// anything else stays text.
    pub fn from_cell(s: &str) -> Self {
        if s.is_empty() {
            return RawValue::Missing;
        }
        match s.trim().parse::<f64>() {
            Ok(v) => RawValue::Number(v),
            Err(_) => RawValue::Text(s.to_string()),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => write!(f, "{s}"),
            RawValue::Number(v) => write!(f, "{v}"),
            RawValue::Missing => write!(f, "<missing>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Metric – the numeric columns of a company record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Rating,
    Reviews,
    Salaries,
    Interviews,
    Jobs,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Rating,
        Metric::Reviews,
        Metric::Salaries,
        Metric::Interviews,
        Metric::Jobs,
    ];

    /// Metrics that go through suffix normalization (everything but rating).
    pub const COUNTS: [Metric; 4] = [
        Metric::Reviews,
        Metric::Salaries,
        Metric::Interviews,
        Metric::Jobs,
    ];

    /// Column name in the source file.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Rating => "rating",
            Metric::Reviews => "reviews",
            Metric::Salaries => "salaries",
            Metric::Interviews => "interviews",
            Metric::Jobs => "jobs",
        }
    }

    /// Human-readable label for grid headers and charts.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Rating => "Rating",
            Metric::Reviews => "Reviews",
            Metric::Salaries => "Salaries Reported",
            Metric::Interviews => "Interviews",
            Metric::Jobs => "Open Jobs",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

// ---------------------------------------------------------------------------
// CompanyRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single company after cleaning. Every numeric field is populated.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    pub name: String,
    pub rating: f64,
    pub reviews: f64,
    pub salaries: f64,
    pub interviews: f64,
    pub jobs: f64,
}

impl CompanyRecord {
    /// A record with the given name and every metric set to zero.
    pub fn named(name: impl Into<String>) -> Self {
        CompanyRecord {
            name: name.into(),
            rating: 0.0,
            reviews: 0.0,
            salaries: 0.0,
            interviews: 0.0,
            jobs: 0.0,
        }
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Rating => self.rating,
            Metric::Reviews => self.reviews,
            Metric::Salaries => self.salaries,
            Metric::Interviews => self.interviews,
            Metric::Jobs => self.jobs,
        }
    }

    pub fn set_metric(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::Rating => self.rating = value,
            Metric::Reviews => self.reviews = value,
            Metric::Salaries => self.salaries = value,
            Metric::Interviews => self.interviews = value,
            Metric::Jobs => self.jobs = value,
        }
    }
}

// ---------------------------------------------------------------------------
// ParseWarning – a field that was silently zeroed during load
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ParseWarning {
    /// Zero-based data row in the source (header excluded).
    pub row: usize,
    pub metric: Metric,
    pub raw: RawValue,
    pub error: NormalizeError,
}

// ---------------------------------------------------------------------------
// CompanyDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The cleaned, deduplicated dataset. Never mutated after load.
#[derive(Debug, Clone, Default)]
pub struct CompanyDataset {
    /// Records in source order, unique by name.
    pub records: Vec<CompanyRecord>,
    /// Distinct names sorted alphabetically (for the company picker).
    pub sorted_names: Vec<String>,
    /// Fields that failed to parse and were replaced by zero.
    pub warnings: Vec<ParseWarning>,
    /// Number of rows dropped as duplicates.
    pub duplicates_dropped: usize,
}

impl CompanyDataset {
    /// Build the dataset from records that are already unique by name.
    pub fn from_records(
        records: Vec<CompanyRecord>,
        warnings: Vec<ParseWarning>,
        duplicates_dropped: usize,
    ) -> Self {
        let mut sorted_names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        sorted_names.sort();
        CompanyDataset {
            records,
            sorted_names,
            warnings,
            duplicates_dropped,
        }
    }

    /// The "no data" dataset returned when no source file exists.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
