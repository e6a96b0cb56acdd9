//! Synthetic portfolio generator — seeded demo data.
//!
//! Produces a table that deliberately mixes cell representations
//! (native numbers, comma decimals, percent strings, yes/sim booleans)
//! so demo runs exercise the normalizer the way a real sheet export
//! does. Deterministic for a given seed.

use super::source::{SourceError, TableSource};
use crate::table::{Cell, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SECTORS: [&str; 6] = [
    "Consumer Staples",
    "Industrials",
    "Health Care",
    "Technology",
    "Utilities",
    "Energy",
];

/// Generate a synthetic portfolio table with `rows` records.
pub fn synthetic_table(rows: usize, seed: u64) -> Table {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = Table::new(
        [
            "ticker",
            "name",
            "sector",
            "price",
            "drawdown_from_52w_high",
            "pass_fcf",
            "pass_roic",
            "pass_payout",
            "pass_debt",
            "pass_interest_cover",
            "QUALITY_PASS",
            "ENTRY_PERMITTED",
            "BUY_CANDIDATE",
            "score",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    );

    for i in 0..rows {
        let ticker = format!("SYN{:03}", i + 1);
        let sector = SECTORS[rng.gen_range(0..SECTORS.len())];
        let price = rng.gen_range(5.0..500.0_f64);
        let dd_fraction = -rng.gen_range(0.0..0.60_f64);
        let score = rng.gen_range(0.0..100.0_f64);

        // Rotate representations so every run feeds the normalizer all
        // the formats it claims to handle.
        let drawdown = match i % 3 {
            0 => Cell::Number((dd_fraction * 100.0).round()), // whole percent
            1 => Cell::Text(format!("{:.2}", dd_fraction).replace('.', ",")),
            _ => Cell::Number(dd_fraction),
        };
        let flag = |rng: &mut StdRng, p: f64, style: usize| -> Cell {
            let value = rng.gen_bool(p);
            match style % 3 {
                0 => Cell::Bool(value),
                1 => Cell::Text(if value { "yes" } else { "no" }.into()),
                _ => Cell::Text(if value { "Sim" } else { "nao" }.into()),
            }
        };

        let pass_fcf = flag(&mut rng, 0.8, i);
        let pass_roic = flag(&mut rng, 0.7, i + 1);
        let pass_payout = flag(&mut rng, 0.7, i + 2);
        let pass_debt = flag(&mut rng, 0.8, i);
        let pass_interest = flag(&mut rng, 0.8, i + 1);
        let quality = flag(&mut rng, 0.85, i);
        let entry = flag(&mut rng, 0.75, i + 2);
        let candidate = flag(&mut rng, 0.4, i);

        table.push_row(vec![
            Cell::Text(ticker.clone()),
            Cell::Text(format!("{ticker} Holdings")),
            Cell::Text(sector.into()),
            Cell::Number((price * 100.0).round() / 100.0),
            drawdown,
            pass_fcf,
            pass_roic,
            pass_payout,
            pass_debt,
            pass_interest,
            quality,
            entry,
            candidate,
            Cell::Number(score.round()),
        ]);
    }

    table
}

/// `TableSource` wrapper around [`synthetic_table`].
pub struct SyntheticSource {
    rows: usize,
    seed: u64,
    name: String,
}

impl SyntheticSource {
    pub fn new(rows: usize, seed: u64) -> Self {
        Self {
            rows,
            seed,
            name: "synthetic".to_string(),
        }
    }
}

impl TableSource for SyntheticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Table, SourceError> {
        Ok(synthetic_table(self.rows, self.seed))
    }
}
