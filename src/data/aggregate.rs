use super::model::{CompanyDataset, CompanyRecord, Metric};

// ---------------------------------------------------------------------------
// FilteredView – a borrowed subset of the dataset
// ---------------------------------------------------------------------------

/// Records that passed the filters, in source order. Never owns or mutates
/// the dataset.
#[derive(Debug, Clone, Copy)]
pub struct FilteredView<'a> {
    dataset: &'a CompanyDataset,
    indices: &'a [usize],
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a CompanyDataset, indices: &'a [usize]) -> Self {
        FilteredView { dataset, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &'a [usize] {
        self.indices
    }

    pub fn record(&self, idx: usize) -> &'a CompanyRecord {
        &self.dataset.records[idx]
    }

    pub fn records(&self) -> impl Iterator<Item = &'a CompanyRecord> + 'a {
        let (dataset, indices) = (self.dataset, self.indices);
        indices.iter().map(move |&i| &dataset.records[i])
    }

    pub fn sum(&self, metric: Metric) -> f64 {
        self.records().map(|r| r.metric(metric)).sum()
    }

    /// Mean of a metric, `None` when the view is empty.
    pub fn mean(&self, metric: Metric) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.sum(metric) / self.len() as f64)
    }
}

// ---------------------------------------------------------------------------
// KPI summary
// ---------------------------------------------------------------------------

/// Values shown on the three KPI tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean_rating: Option<f64>,
    pub total_jobs: f64,
    pub total_reviews: f64,
}

pub fn summarize(view: &FilteredView<'_>) -> Summary {
    Summary {
        count: view.len(),
        mean_rating: view.mean(Metric::Rating),
        total_jobs: view.sum(Metric::Jobs),
        total_reviews: view.sum(Metric::Reviews),
    }
}

// ---------------------------------------------------------------------------
// Top-N and data grid ordering
// ---------------------------------------------------------------------------

/// Default length of the ranked chart views.
pub const TOP_N: usize = 8;

/// A column of the data grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Metric(Metric),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current grid ordering. Defaults to rating, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for GridSort {
    fn default() -> Self {
        GridSort {
            column: SortColumn::Metric(Metric::Rating),
            direction: SortDirection::Descending,
        }
    }
}

impl GridSort {
    /// Header click: same column flips the direction, a new column starts
    /// descending for metrics and ascending for names.
    pub fn clicked(self, column: SortColumn) -> Self {
        if self.column == column {
            return GridSort {
                column,
                direction: self.direction.flipped(),
            };
        }
        let direction = match column {
            SortColumn::Name => SortDirection::Ascending,
            SortColumn::Metric(_) => SortDirection::Descending,
        };
        GridSort { column, direction }
    }
}

/// View indices ordered by `sort`. The sort is stable, so ties keep source order.
pub fn sort_indices(view: &FilteredView<'_>, sort: GridSort) -> Vec<usize> {
    let mut out = view.indices().to_vec();
    out.sort_by(|&a, &b| {
        let (ra, rb) = (view.record(a), view.record(b));
        let ord = match sort.column {
            SortColumn::Name => ra.name.cmp(&rb.name),
            SortColumn::Metric(m) => ra.metric(m).total_cmp(&rb.metric(m)),
        };
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    out
}

/// The `n` highest records by `metric`; ties keep source order.
pub fn top_n<'a>(view: &FilteredView<'a>, metric: Metric, n: usize) -> Vec<&'a CompanyRecord> {
    let sort = GridSort {
        column: SortColumn::Metric(metric),
        direction: SortDirection::Descending,
    };
    sort_indices(view, sort)
        .into_iter()
        .take(n)
        .map(|i| view.record(i))
        .collect()
}

// ---------------------------------------------------------------------------
// Rating histogram
// ---------------------------------------------------------------------------

pub const HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width bins spanning the view's min..=max of `metric`.
/// Every bin is half-open except the last, which also takes the maximum.
pub fn histogram(view: &FilteredView<'_>, metric: Metric, bins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = view.records().map(|r| r.metric(metric)).collect();
    let Some(min) = values.iter().copied().min_by(f64::total_cmp) else {
        return Vec::new();
    };
    let max = values.iter().copied().max_by(f64::total_cmp).unwrap_or(min);

    if bins == 0 {
        return Vec::new();
    }
    let range = max - min;
    if range.abs() < f64::EPSILON {
        return vec![HistogramBin {
            start: min - 0.05,
            end: max + 0.05,
            count: values.len(),
        }];
    }

    let width = range / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for v in values {
        let slot = (((v - min) / width) as usize).min(bins - 1);
        out[slot].count += 1;
    }
    out
}

pub fn rating_histogram(view: &FilteredView<'_>) -> Vec<HistogramBin> {
    histogram(view, Metric::Rating, HISTOGRAM_BINS)
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Half-open row range for a zero-based page; out-of-range pages clamp to
/// the last page.
pub fn page_bounds(total: usize, page: usize, page_size: usize) -> (usize, usize) {
    if page_size == 0 {
        return (0, total);
    }
    let page = page.min(page_count(total, page_size) - 1);
    let start = (page * page_size).min(total);
    let end = (start + page_size).min(total);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterState, filtered_indices};

    fn record(name: &str, rating: f64, jobs: f64, reviews: f64) -> CompanyRecord {
        CompanyRecord {
            rating,
            jobs,
            reviews,
            ..CompanyRecord::named(name)
        }
    }

    fn sample() -> CompanyDataset {
        CompanyDataset::from_records(
            vec![
                record("A", 4.5, 10.0, 100.0),
                record("B", 3.0, 30.0, 50.0),
                record("C", 0.0, 5.0, 0.0),
            ],
            Vec::new(),
            0,
        )
    }

    #[test]
    fn summary_over_filtered_view() {
        let ds = sample();
        let f = FilterState {
            min_rating: 3.0,
            ..Default::default()
        };
        let idx = filtered_indices(&ds, &f);
        let s = summarize(&FilteredView::new(&ds, &idx));
        assert_eq!(s.count, 2);
        assert_eq!(s.mean_rating, Some(3.75));
        assert_eq!(s.total_jobs, 40.0);
        assert_eq!(s.total_reviews, 150.0);
    }

    #[test]
    fn empty_view_has_no_mean() {
        let ds = sample();
        let s = summarize(&FilteredView::new(&ds, &[]));
        assert_eq!(s.count, 0);
        assert_eq!(s.mean_rating, None);
        assert_eq!(s.total_jobs, 0.0);
    }

    #[test]
    fn top_n_sorts_descending_and_truncates() {
        let ds = sample();
        let idx = vec![0, 1, 2];
        let view = FilteredView::new(&ds, &idx);
        let top: Vec<&str> = top_n(&view, Metric::Jobs, 2)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(top, vec!["B", "A"]);
    }

    #[test]
    fn top_n_ties_keep_source_order() {
        let ds = CompanyDataset::from_records(
            vec![
                record("first", 4.0, 0.0, 0.0),
                record("high", 5.0, 0.0, 0.0),
                record("second", 4.0, 0.0, 0.0),
                record("third", 4.0, 0.0, 0.0),
            ],
            Vec::new(),
            0,
        );
        let idx: Vec<usize> = (0..4).collect();
        let view = FilteredView::new(&ds, &idx);
        let top: Vec<&str> = top_n(&view, Metric::Rating, TOP_N)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(top, vec!["high", "first", "second", "third"]);
    }

    #[test]
    fn grid_sort_by_name_and_flip() {
        let ds = sample();
        let idx = vec![2, 0, 1];
        let view = FilteredView::new(&ds, &idx);

        let sort = GridSort::default().clicked(SortColumn::Name);
        assert_eq!(sort.direction, SortDirection::Ascending);
        assert_eq!(sort_indices(&view, sort), vec![0, 1, 2]);

        let sort = sort.clicked(SortColumn::Name);
        assert_eq!(sort_indices(&view, sort), vec![2, 1, 0]);

        assert_eq!(sort_indices(&view, GridSort::default()), vec![0, 1, 2]);
    }

    #[test]
    fn histogram_counts_every_record() {
        let ds = CompanyDataset::from_records(
            [1.0, 2.5, 2.6, 4.0, 5.0]
                .iter()
                .enumerate()
                .map(|(i, r)| record(&i.to_string(), *r, 0.0, 0.0))
                .collect(),
            Vec::new(),
            0,
        );
        let idx: Vec<usize> = (0..5).collect();
        let bins = rating_histogram(&FilteredView::new(&ds, &idx));
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[HISTOGRAM_BINS - 1].count, 1);
        assert_eq!(bins[0].start, 1.0);
        assert!((bins[HISTOGRAM_BINS - 1].end - 5.0).abs() < 1e-9);
    }

    #[test]
    fn histogram_of_identical_values_is_one_bin() {
        let ds = CompanyDataset::from_records(
            vec![record("A", 4.0, 0.0, 0.0), record("B", 4.0, 0.0, 0.0)],
            Vec::new(),
            0,
        );
        let idx = vec![0, 1];
        let bins = rating_histogram(&FilteredView::new(&ds, &idx));
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
        assert!(rating_histogram(&FilteredView::new(&ds, &[])).is_empty());
    }

    #[test]
    fn pagination_clamps() {
        assert_eq!(page_count(0, 25), 1);
        assert_eq!(page_count(50, 25), 2);
        assert_eq!(page_count(51, 25), 3);
        assert_eq!(page_bounds(51, 0, 25), (0, 25));
        assert_eq!(page_bounds(51, 2, 25), (50, 51));
        assert_eq!(page_bounds(51, 9, 25), (50, 51));
        assert_eq!(page_bounds(0, 0, 25), (0, 0));
    }
}
