use std::path::PathBuf;

use clap::Parser;

use crate::data::aggregate::TOP_N;
use crate::data::loader::SourcePaths;

/// Default rows per data-grid page.
pub const PAGE_SIZE: usize = 25;

/// Company ratings, reviews and hiring dashboard.
///
/// Reads a company file (`name, rating, reviews, salaries, interviews, jobs`)
/// once at startup and renders filterable KPIs, charts and a data grid.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "company-pulse", version)]
pub struct Config {
    /// Company file to load (.csv or .json)
    #[arg(long, env = "COMPANY_PULSE_DATA", default_value = "data/companies.csv")]
    pub data: PathBuf,

    /// Second location tried when the data file does not exist
    #[arg(long, env = "COMPANY_PULSE_FALLBACK")]
    pub fallback: Option<PathBuf>,

    /// Number of companies in each ranked chart
    #[arg(long, default_value_t = TOP_N)]
    pub top_n: usize,

    /// Rows per data-grid page
    #[arg(long, default_value_t = PAGE_SIZE)]
    pub page_size: usize,
}

impl Config {
    pub fn sources(&self) -> SourcePaths {
        SourcePaths::new(self.data.clone(), self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["company-pulse"]).unwrap();
        assert_eq!(cfg.top_n, 8);
        assert_eq!(cfg.page_size, 25);
        // The path defaults can be overridden from the environment.
        if std::env::var_os("COMPANY_PULSE_DATA").is_none() {
            assert_eq!(cfg.sources().primary, PathBuf::from("data/companies.csv"));
        }
        if std::env::var_os("COMPANY_PULSE_FALLBACK").is_none() {
            assert_eq!(cfg.sources().fallback, None);
        }
    }

    #[test]
    fn paths_from_flags() {
        let cfg = Config::try_parse_from([
            "company-pulse",
            "--data",
            "archive/companies.csv",
            "--fallback",
            "/srv/companies.json",
            "--top-n",
            "5",
        ])
        .unwrap();
        let sources = cfg.sources();
        assert_eq!(sources.primary, PathBuf::from("archive/companies.csv"));
        assert_eq!(sources.fallback, Some(PathBuf::from("/srv/companies.json")));
        assert_eq!(cfg.top_n, 5);
    }

    #[test]
    fn rejects_non_numeric_page_size() {
        assert!(Config::try_parse_from(["company-pulse", "--page-size", "lots"]).is_err());
    }
}
