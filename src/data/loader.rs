use std::cell::OnceCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;

use super::model::{CompanyDataset, CompanyRecord, Metric, ParseWarning, RawValue};
use super::normalize::{try_coerce_rating, try_normalize_metric};

/// Column that identifies a company.
pub const NAME_COLUMN: &str = "name";

// ---------------------------------------------------------------------------
// Source resolution
// ---------------------------------------------------------------------------

/// Where to look for the company file: a primary path and an optional fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePaths {
    pub primary: PathBuf,
    pub fallback: Option<PathBuf>,
}

impl SourcePaths {
    pub fn new(primary: impl Into<PathBuf>, fallback: Option<PathBuf>) -> Self {
        SourcePaths {
            primary: primary.into(),
            fallback,
        }
    }

    /// A single path with no fallback.
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self::new(path, None)
    }

    /// The first configured path that exists on disk.
    pub fn locate(&self) -> Option<&Path> {
        if self.primary.exists() {
            return Some(&self.primary);
        }
        match &self.fallback {
            Some(fb) if fb.exists() => {
                log::info!(
                    "{} not found, using fallback {}",
                    self.primary.display(),
                    fb.display()
                );
                Some(fb)
            }
            _ => None,
        }
    }

    /// Paths listed for the "data not found" message.
    pub fn describe(&self) -> String {
        match &self.fallback {
            Some(fb) => format!("{} or {}", self.primary.display(), fb.display()),
            None => self.primary.display().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Memoized loader
// ---------------------------------------------------------------------------

/// Loads the dataset once and hands out the cached copy afterwards.
///
/// A missing source is not an error: it yields an empty dataset, which the
/// UI reports as "data not found". Read/parse failures are errors and are
/// not cached, so a later call retries.
#[derive(Debug)]
pub struct DatasetLoader {
    sources: SourcePaths,
    cache: OnceCell<Rc<CompanyDataset>>,
}

impl DatasetLoader {
    pub fn new(sources: SourcePaths) -> Self {
        DatasetLoader {
            sources,
            cache: OnceCell::new(),
        }
    }

    pub fn sources(&self) -> &SourcePaths {
        &self.sources
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    pub fn load(&self) -> Result<Rc<CompanyDataset>> {
        if let Some(ds) = self.cache.get() {
            return Ok(Rc::clone(ds));
        }

        let dataset = match self.sources.locate() {
            Some(path) => {
                let ds = load_file(path)?;
                log::info!("Loaded {} companies from {}", ds.len(), path.display());
                ds
            }
            None => {
                log::warn!("No company data at {}", self.sources.describe());
                CompanyDataset::empty()
            }
        };

        Ok(Rc::clone(self.cache.get_or_init(|| Rc::new(dataset))))
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a company file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row; `name` required, metric columns optional
/// * `.json` – `[{ "name": "Acme", "rating": 4.1, "reviews": "1.2k", ... }, ...]`
pub fn load_file(path: &Path) -> Result<CompanyDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    Ok(clean_rows(rows))
}

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// One source row before cleaning. Absent columns are `Missing`.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub name: RawValue,
    pub rating: RawValue,
    pub reviews: RawValue,
    pub salaries: RawValue,
    pub interviews: RawValue,
    pub jobs: RawValue,
}

impl RawRow {
    fn get(&self, metric: Metric) -> &RawValue {
        match metric {
            Metric::Rating => &self.rating,
            Metric::Reviews => &self.reviews,
            Metric::Salaries => &self.salaries,
            Metric::Interviews => &self.interviews,
            Metric::Jobs => &self.jobs,
        }
    }
}

// ---------------------------------------------------------------------------
// Cleaning pipeline
// ---------------------------------------------------------------------------

/// Normalize counts, coerce rating, fill missing with zero, stringify names
/// and drop duplicate names (first occurrence wins).
pub fn clean_rows(rows: Vec<RawRow>) -> CompanyDataset {
    let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
    let mut records = Vec::with_capacity(rows.len());
    let mut warnings = Vec::new();
    let mut duplicates = 0;

    for (row_no, raw) in rows.iter().enumerate() {
        let name = name_to_string(&raw.name);
        if !seen.insert(name.clone()) {
            duplicates += 1;
            continue;
        }

        let mut record = CompanyRecord::named(name);
        for metric in Metric::ALL {
            let value = raw.get(metric);
            let parsed = match metric {
                Metric::Rating => try_coerce_rating(value),
                _ => try_normalize_metric(value),
            };
            match parsed {
                Ok(v) => record.set_metric(metric, v),
                Err(error) => {
                    // An absent cell is plain missing data, not a parse problem.
                    if *value != RawValue::Missing {
                        warnings.push(ParseWarning {
                            row: row_no,
                            metric,
                            raw: value.clone(),
                            error,
                        });
                    }
                }
            }
        }
        records.push(record);
    }

    if !warnings.is_empty() {
        log::debug!("{} fields could not be parsed and were set to 0", warnings.len());
    }

    CompanyDataset::from_records(records, warnings, duplicates)
}

/// Missing names are filled with 0 before being forced to text, so they
/// become `"0"`. Numbers print the way a float column would (`7` → `"7.0"`).
fn name_to_string(value: &RawValue) -> String {
    match value {
        RawValue::Text(s) => s.clone(),
        RawValue::Number(n) if n.is_nan() => "0".to_string(),
        RawValue::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{n:.1}"),
        RawValue::Number(n) => n.to_string(),
        RawValue::Missing => "0".to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names matched exactly.
/// `name` is required; `rating`, `reviews`, `salaries`, `interviews` and
/// `jobs` are read when present; other columns are ignored.
fn read_csv(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let position = |col: &str| headers.iter().position(|h| h == col);
    let name_idx = position(NAME_COLUMN).context("CSV missing 'name' column")?;
    let metric_idx: Vec<(Metric, Option<usize>)> = Metric::ALL
        .iter()
        .map(|&m| (m, position(m.column())))
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(RawValue::from_cell)
                .unwrap_or(RawValue::Missing)
        };

        let mut row = RawRow {
            name: csv_name(record.get(name_idx)),
            rating: RawValue::Missing,
            reviews: RawValue::Missing,
            salaries: RawValue::Missing,
            interviews: RawValue::Missing,
            jobs: RawValue::Missing,
        };
        for (metric, idx) in &metric_idx {
            let value = cell(*idx);
            match metric {
                Metric::Rating => row.rating = value,
                Metric::Reviews => row.reviews = value,
                Metric::Salaries => row.salaries = value,
                Metric::Interviews => row.interviews = value,
                Metric::Jobs => row.jobs = value,
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Names stay text even when they look numeric; only an empty cell is missing.
fn csv_name(cell: Option<&str>) -> RawValue {
    match cell {
        None | Some("") => RawValue::Missing,
        Some(s) => RawValue::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "name": "Acme", "rating": 4.1, "reviews": "1.2k", "jobs": 35 },
///   ...
/// ]
/// ```
fn read_json(path: &Path) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json_rows(&text)
}

fn parse_json_rows(text: &str) -> Result<Vec<RawRow>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    if !records.is_empty()
        && !records
            .iter()
            .any(|r| r.as_object().is_some_and(|o| o.contains_key(NAME_COLUMN)))
    {
        bail!("JSON records missing 'name' field");
    }

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            let field = |key: &str| obj.get(key).map(json_to_raw).unwrap_or(RawValue::Missing);
            Ok(RawRow {
                name: field(NAME_COLUMN),
                rating: field(Metric::Rating.column()),
                reviews: field(Metric::Reviews.column()),
                salaries: field(Metric::Salaries.column()),
                interviews: field(Metric::Interviews.column()),
                jobs: field(Metric::Jobs.column()),
            })
        })
        .collect()
}

fn json_to_raw(val: &JsonValue) -> RawValue {
    match val {
        JsonValue::String(s) => RawValue::Text(s.clone()),
        JsonValue::Number(n) => n.as_f64().map(RawValue::Number).unwrap_or(RawValue::Missing),
        JsonValue::Bool(b) => RawValue::Number(if *b { 1.0 } else { 0.0 }),
        JsonValue::Null => RawValue::Missing,
        other => RawValue::Text(other.to_string()),
    }
}
