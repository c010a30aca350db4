//! Writes a synthetic `data.csv` with the Diwali sales layout, encoded in
//! Windows-1252 like the real export.

use anyhow::{Context, Result};
use encoding_rs::WINDOWS_1252;
use sales_dashboard::data::model::columns;

const ROWS: usize = 2000;
const OUTPUT_PATH: &str = "data.csv";

const HEADER: [&str; 15] = [
    "User_ID",
    "Cust_name",
    "Product_ID",
    columns::GENDER,
    "Age Group",
    columns::AGE,
    "Marital_Status",
    columns::STATE,
    columns::ZONE,
    columns::OCCUPATION,
    "Product_Category",
    "Orders",
    columns::AMOUNT,
    "Status",
    "unnamed1",
];

const STATES: [(&str, &str); 10] = [
    ("Maharashtra", "Western"),
    ("Gujarat", "Western"),
    ("Uttar Pradesh", "Central"),
    ("Madhya Pradesh", "Central"),
    ("Delhi", "Central"),
    ("Karnataka", "Southern"),
    ("Kerala", "Southern"),
    ("Andhra Pradesh", "Southern"),
    ("Bihar", "Eastern"),
    ("Punjab", "Northern"),
];

const OCCUPATIONS: [&str; 15] = [
    "IT Sector",
    "Healthcare",
    "Aviation",
    "Banking",
    "Govt",
    "Hospitality",
    "Media",
    "Automobile",
    "Chemical",
    "Lawyer",
    "Retail",
    "Food Processing",
    "Construction",
    "Textile",
    "Agriculture",
];

const CATEGORIES: [&str; 6] = [
    "Food",
    "Clothing & Apparel",
    "Electronics & Gadgets",
    "Footwear & Shoes",
    "Furniture",
    "Household items",
];

const NAMES: [&str; 8] = [
    "Sanskriti", "Kartik", "Bindu", "Sudevi", "Joni", "Balk", "René", "Zoë",
];

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn age_group(age: i64) -> &'static str {
    match age {
        ..=17 => "0-17",
        18..=25 => "18-25",
        26..=35 => "26-35",
        36..=45 => "36-45",
        46..=50 => "46-50",
        51..=55 => "51-55",
        _ => "55+",
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for i in 0..ROWS {
        // Roughly 70/30 female/male, the split of the real export.
        let gender = if rng.next_f64() < 0.7 { "F" } else { "M" };
        let age = rng.gauss(35.0, 11.0).round().clamp(12.0, 92.0) as i64;
        let (state, zone) = *rng.pick(&STATES);
        let amount = rng.gauss(9500.0, 5000.0).clamp(188.0, 23952.0);
        // A handful of transactions have no recorded amount.
        let amount = if i % 997 == 996 {
            String::new()
        } else {
            format!("{amount:.0}")
        };

        writer.write_record([
            (1_000_001 + i).to_string(),
            rng.pick(&NAMES).to_string(),
            format!("P{:08}", rng.next_u64() % 100_000_000),
            gender.to_string(),
            age_group(age).to_string(),
            age.to_string(),
            (rng.next_u64() % 2).to_string(),
            state.to_string(),
            zone.to_string(),
            rng.pick(&OCCUPATIONS).to_string(),
            rng.pick(&CATEGORIES).to_string(),
            (1 + rng.next_u64() % 4).to_string(),
            amount,
            String::new(),
            String::new(),
        ])?;
    }

    let bytes = writer.into_inner().context("flushing CSV buffer")?;
    let text = String::from_utf8(bytes).context("CSV buffer is not UTF-8")?;
    let (encoded, _, unmappable) = WINDOWS_1252.encode(&text);
    anyhow::ensure!(!unmappable, "sample text has characters outside Windows-1252");

    std::fs::write(OUTPUT_PATH, &encoded)
        .with_context(|| format!("writing {OUTPUT_PATH}"))?;

    println!("Wrote {ROWS} sales rows to {OUTPUT_PATH}");
    Ok(())
}
