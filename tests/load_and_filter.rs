use std::io::Write;
use std::path::PathBuf;

use company_pulse::data::aggregate::{FilteredView, TOP_N, summarize, top_n};
use company_pulse::data::filter::{FilterState, filtered_indices};
use company_pulse::data::loader::{DatasetLoader, SourcePaths};
use company_pulse::data::model::Metric;

fn write_csv(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("companies.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn threshold_example_from_loaded_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "name,rating,reviews,salaries,interviews,jobs\n\
         Alpha,4.5,1.5k,2l,10,5\n\
         Beta,3.0,abc,,3k,1\n\
         Gamma,,900,1,1,1\n",
    );
    let loader = DatasetLoader::new(SourcePaths::single(path));
    let ds = loader.load().unwrap();

    assert_eq!(ds.records[0].reviews, 1500.0);
    assert_eq!(ds.records[0].salaries, 200_000.0);
    assert_eq!(ds.records[1].reviews, 0.0);
    assert_eq!(ds.records[2].rating, 0.0);

    let filters = FilterState {
        min_rating: 3.0,
        ..Default::default()
    };
    let idx = filtered_indices(&ds, &filters);
    let view = FilteredView::new(&ds, &idx);
    let summary = summarize(&view);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.mean_rating, Some(3.75));
    assert_eq!(summary.total_jobs, 6.0);
    assert_eq!(summary.total_reviews, 1500.0);
}

#[test]
fn bundled_sample_loads_cleanly() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/companies.csv");
    let ds = DatasetLoader::new(SourcePaths::single(path)).load().unwrap();

    // one duplicate TCS row, the first one wins
    assert_eq!(ds.duplicates_dropped, 1);
    let tcs = ds.records.iter().find(|r| r.name == "TCS").unwrap();
    assert_eq!(tcs.rating, 3.8);
    assert_eq!(tcs.interviews, 10_250.0);

    let idx: Vec<usize> = (0..ds.len()).collect();
    let view = FilteredView::new(&ds, &idx);
    let top = top_n(&view, Metric::Jobs, TOP_N);
    assert_eq!(top.len(), TOP_N);
    assert_eq!(top[0].name, "Accenture");
}
