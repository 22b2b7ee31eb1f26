//! Writes a deterministic `financials.csv` in the layout spreadsheet exports
//! produce: padded header names and currency-formatted amounts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(about = "Write a deterministic sample of financial records as CSV.")]
struct Args {
    /// Output CSV path.
    #[arg(default_value = "financials.csv")]
    output: PathBuf,
}

const SEGMENTS: [(&str, f64); 5] = [
    ("Government", 0.85),
    ("Midmarket", 1.0),
    ("Channel Partners", 0.6),
    ("Enterprise", 1.2),
    ("Small Business", 0.9),
];
const COUNTRIES: [&str; 5] = ["Canada", "Germany", "France", "Mexico", "United States of America"];
/// Product, sale price, manufacturing price.
const PRODUCTS: [(&str, f64, f64); 6] = [
    ("Carretera", 20.0, 3.0),
    ("Montana", 15.0, 5.0),
    ("Paseo", 12.0, 10.0),
    ("Velo", 125.0, 120.0),
    ("VTT", 250.0, 250.0),
    ("Amarilla", 300.0, 260.0),
];
const DISCOUNT_BANDS: [(&str, f64); 4] = [("None", 0.0), ("Low", 0.02), ("Medium", 0.07), ("High", 0.12)];
const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// `" $32,370.00 "`, `" $(4,533.75)"`, `" $-   "`.
fn money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    if cents == 0 {
        return " $-   ".to_string();
    }
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let amount = format!("{grouped}.{:02}", cents % 100);
    if value < 0.0 {
        format!(" $({amount})")
    } else {
        format!(" ${amount} ")
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record([
        "Segment", "Country", " Product ", " Discount Band ", " Units Sold ",
        " Manufacturing Price ", " Sale Price ", " Gross Sales ", " Discounts ", "  Sales ",
        " COGS ", " Profit ", "Date", "Month Number", " Month Name ", "Year",
    ])?;

    let mut rows = 0usize;
    for year in [2013, 2014] {
        for month in 1..=12u32 {
            for _ in 0..30 {
                let &(segment, price_factor) = rng.pick(&SEGMENTS);
                let country = *rng.pick(&COUNTRIES);
                let &(product, sale_price, mfg_price) = rng.pick(&PRODUCTS);
                let &(band, discount_rate) = rng.pick(&DISCOUNT_BANDS);

                let units = (200.0 + rng.next_f64() * 2800.0).round();
                let price = sale_price * price_factor;
                let gross = units * price;
                let discounts = gross * discount_rate;
                let sales = gross - discounts;
                let cogs = units * mfg_price * (0.8 + rng.next_f64() * 0.5);
                let profit = sales - cogs;

                writer.write_record([
                    segment.to_string(),
                    country.to_string(),
                    product.to_string(),
                    band.to_string(),
                    format!(" {units:.1} "),
                    money(mfg_price),
                    money(price),
                    money(gross),
                    money(discounts),
                    money(sales),
                    money(cogs),
                    money(profit),
                    format!("{:02}/01/{year}", month),
                    month.to_string(),
                    format!(" {} ", MONTH_NAMES[(month - 1) as usize]),
                    year.to_string(),
                ])?;
                rows += 1;
            }
        }
    }
    writer.flush()?;

    println!("Wrote {rows} records to {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_matches_spreadsheet_export() {
        assert_eq!(money(32370.0), " $32,370.00 ");
        assert_eq!(money(-4533.75), " $(4,533.75)");
        assert_eq!(money(0.0), " $-   ");
        assert_eq!(money(999.5), " $999.50 ");
        assert_eq!(money(1234567.891), " $1,234,567.89 ");
    }

    #[test]
    fn output_defaults_to_financials_csv() {
        let args = Args::try_parse_from(["generate_sample"]).unwrap();
        assert_eq!(args.output, PathBuf::from("financials.csv"));

        let args = Args::try_parse_from(["generate_sample", "q3.csv"]).unwrap();
        assert_eq!(args.output, PathBuf::from("q3.csv"));

        assert!(Args::try_parse_from(["generate_sample", "--help"]).is_err());
    }

    #[test]
    fn rng_is_deterministic() {
        let mut a = SimpleRng::new(7);
        let mut b = SimpleRng::new(7);
        for _ in 0..10 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }
}
