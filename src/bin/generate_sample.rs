//! Writes `sample_funding.csv`: a deliberately messy startup-funding dataset
//! for exercising the loader and cleaning pipeline. Raw header names, cities
//! in need of normalization, comma-grouped and "undisclosed" amounts, and an
//! entirely empty row.

use anyhow::{Context, Result};

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo)
    }
}

const STARTUPS: &[&str] = &[
    "Swiggy", "Byju's", "Oyo", "Zomato", "Razorpay", "Meesho", "Cred", "Udaan", "Groww",
    "ShareChat", "Dream11", "Lenskart", "Delhivery", "Pharmeasy", "Unacademy",
];

const SECTORS: &[&str] = &[
    "Consumer Internet", "Technology", "eCommerce", "Healthcare", "Finance", "Logistics",
    "EdTech",
];

// Raw spellings on purpose; cleaning folds them.
const CITIES: &[&str] = &[
    "Bangalore", "bangalore ", "Mumbai", "bombay", "New Delhi", "Gurgaon", "Noida", "Pune",
    "Chennai", "Hyderabad", "",
];

const INVESTMENT_TYPES: &[&str] = &[
    "Private Equity", "Seed Funding", "Series A", "Series B", "Debt Funding",
];

const INVESTORS: &[&str] = &[
    "Sequoia Capital", "Accel Partners", "Tiger Global", "SoftBank", "Kalaari Capital",
    "Matrix Partners", "Undisclosed Investors",
];

fn main() -> Result<()> {
    let path = "sample_funding.csv";
    let mut writer = csv::Writer::from_path(path).context("creating sample CSV")?;

    writer.write_record([
        "Sr No",
        "Date",
        "Startup Name",
        "Industry Vertical",
        "City  Location",
        "Investors Name",
        "Investment Type",
        "Amount in USD",
    ])?;

    let mut rng = SimpleRng::new(42);
    let n_rows = 200;

    for i in 1..=n_rows {
        // A handful of entirely empty rows, which cleaning drops.
        if i % 47 == 0 {
            writer.write_record(["", "", "", "", "", "", "", ""])?;
            continue;
        }

        let day = rng.range(1, 29);
        let month = rng.range(1, 13);
        let year = rng.range(2015, 2021);
        let date = format!("{day:02}/{month:02}/{year}");

        let amount = match rng.next_u64() % 10 {
            0 => "undisclosed".to_string(),
            1 => String::new(),
            _ => {
                let millions = rng.range(1, 500);
                // Comma-grouped, the way the source spreadsheets write it.
                format!("{millions},000,000")
            }
        };

        let sr_no = i.to_string();
        writer.write_record([
            sr_no.as_str(),
            date.as_str(),
            *rng.pick(STARTUPS),
            *rng.pick(SECTORS),
            *rng.pick(CITIES),
            *rng.pick(INVESTORS),
            *rng.pick(INVESTMENT_TYPES),
            amount.as_str(),
        ])?;
    }

    writer.flush()?;
    println!("wrote {n_rows} rows to {path}");
    Ok(())
}
