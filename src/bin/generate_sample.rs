use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

/// Write a synthetic company file for trying out the dashboard.
#[derive(Parser)]
#[command(name = "generate_sample")]
struct Cli {
    /// Output CSV path
    #[arg(short, long, default_value = "data/companies.csv")]
    output: PathBuf,

    /// Number of rows (duplicates included)
    #[arg(short, long, default_value_t = 400)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// One CSV row, written exactly as the source sites format their counts.
#[derive(Serialize)]
struct Row {
    name: String,
    rating: String,
    reviews: String,
    salaries: String,
    interviews: String,
    jobs: String,
    industry: &'static str,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

const PREFIXES: [&str; 12] = [
    "Tata", "Indus", "Bharat", "Zenith", "Sahyadri", "Kaveri", "Nova", "Ganga", "Apex", "Vistara",
    "Orbit", "Lotus",
];
const SUFFIXES: [&str; 8] = [
    "Technologies", "Consultancy", "Infotech", "Motors", "Finserv", "Pharma", "Retail", "Labs",
];
const INDUSTRIES: [&str; 6] = ["IT Services", "BFSI", "Healthcare", "Auto", "Retail", "Telecom"];

/// Render a count the way scraped listings do: plain, comma-grouped,
/// `k`/`l` suffixed, blank or junk.
fn messy_count(rng: &mut SimpleRng, value: f64) -> String {
    match rng.below(10) {
        0 => String::new(),
        1 => "--".to_string(),
        2 | 3 if value >= 100_000.0 => format!("{:.1}L", value / 100_000.0),
        2..=5 if value >= 1_000.0 => format!("{:.1}k", value / 1_000.0),
        6 if value >= 1_000.0 => {
            let whole = value.round() as u64;
            format!("{},{:03}", whole / 1000, whole % 1000)
        }
        _ => format!("{}", value.round() as u64),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = SimpleRng::new(cli.seed);

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;

    let mut names: Vec<String> = Vec::with_capacity(cli.rows);
    for i in 0..cli.rows {
        // Roughly one row in twenty repeats an earlier company.
        let name = if i > 0 && rng.below(20) == 0 {
            rng.pick(&names).clone()
        } else {
            format!("{} {}", rng.pick(&PREFIXES), rng.pick(&SUFFIXES))
        };
        names.push(name.clone());

        // Larger employers get more of everything.
        let size = 10f64.powf(1.0 + rng.next_f64() * 4.5);
        let rating = match rng.below(25) {
            0 => String::new(),
            1 => "N/A".to_string(),
            _ => format!("{:.1}", 2.5 + rng.next_f64() * 2.4),
        };

        let row = Row {
            name,
            rating,
            reviews: messy_count(&mut rng, size),
            salaries: messy_count(&mut rng, size * 0.8),
            interviews: messy_count(&mut rng, size * 0.15),
            jobs: messy_count(&mut rng, size * 0.02),
            industry: *rng.pick(&INDUSTRIES),
        };
        writer.serialize(row).context("writing row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {} rows to {}", cli.rows, cli.output.display());
    Ok(())
}
