use std::collections::BTreeSet;

use super::model::CompanyDataset;

// ---------------------------------------------------------------------------
// Filter predicate: rating threshold and an optional name selection
// ---------------------------------------------------------------------------

/// The two user-facing filters.
///
/// `min_rating == 0.0` lets every record through (ratings are never
/// negative after cleaning). An empty `selected_names` means "no name filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub min_rating: f64,
    pub selected_names: BTreeSet<String>,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        self.min_rating > 0.0 || !self.selected_names.is_empty()
    }

    pub fn toggle_name(&mut self, name: &str) {
        if !self.selected_names.remove(name) {
            self.selected_names.insert(name.to_string());
        }
    }
}

/// Return indices (in source order) of records that pass the filters.
///
/// A record passes when:
/// * its rating is at least `min_rating`, and
/// * `selected_names` is empty, or contains the record's name
pub fn filtered_indices(dataset: &CompanyDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.rating >= filters.min_rating)
        .filter(|(_, rec)| {
            filters.selected_names.is_empty() || filters.selected_names.contains(&rec.name)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CompanyRecord;

    fn dataset(ratings: &[(&str, f64)]) -> CompanyDataset {
        let records = ratings
            .iter()
            .map(|(name, r)| CompanyRecord {
                rating: *r,
                ..CompanyRecord::named(*name)
            })
            .collect();
        CompanyDataset::from_records(records, Vec::new(), 0)
    }

    #[test]
    fn default_filter_keeps_everything() {
        let ds = dataset(&[("A", 4.5), ("B", 3.0), ("C", 0.0)]);
        let f = FilterState::default();
        assert!(!f.is_active());
        assert_eq!(filtered_indices(&ds, &f), vec![0, 1, 2]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let ds = dataset(&[("A", 4.5), ("B", 3.0), ("C", 0.0)]);
        let f = FilterState {
            min_rating: 3.0,
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &f), vec![0, 1]);
    }

    #[test]
    fn names_restrict_after_threshold() {
        let ds = dataset(&[("A", 4.5), ("B", 3.0), ("C", 0.0)]);
        let mut f = FilterState {
            min_rating: 1.0,
            ..Default::default()
        };
        f.toggle_name("C");
        f.toggle_name("B");
        assert_eq!(filtered_indices(&ds, &f), vec![1]);

        f.toggle_name("B");
        assert!(filtered_indices(&ds, &f).is_empty());
    }

    #[test]
    fn unknown_names_match_nothing() {
        let ds = dataset(&[("A", 4.5)]);
        let mut f = FilterState::default();
        f.toggle_name("Nope");
        assert!(filtered_indices(&ds, &f).is_empty());
    }

    #[test]
    fn raising_the_threshold_never_grows_the_view() {
        let ds = dataset(&[
            ("A", 4.5),
            ("B", 3.0),
            ("C", 0.0),
            ("D", 3.9),
            ("E", 5.0),
            ("F", 2.2),
        ]);
        let mut previous = usize::MAX;
        for step in 0..=50 {
            let f = FilterState {
                min_rating: step as f64 * 0.1,
                ..Default::default()
            };
            let n = filtered_indices(&ds, &f).len();
            assert!(n <= previous, "threshold {} grew view", f.min_rating);
            previous = n;
        }
    }
}
