use crate::data::model::{columns, View};
use crate::error::Result;

/// Upper bound on the star glyphs shown next to the average rating.
pub const MAX_STARS: usize = 100;
pub const STAR: &str = "⭐";

// ---------------------------------------------------------------------------
// Metrics – the three metric cards
// ---------------------------------------------------------------------------

/// Scalar summaries of the filtered table.
///
/// An empty table yields zeros rather than NaN; `is_empty` tells the UI to
/// say so.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Sum of `Amount`, truncated toward zero.
    pub total_sales: i64,
    /// Mean of `Age`, one decimal.
    pub average_rating: f64,
    pub star_rating: String,
    /// Mean of `Amount`, two decimals.
    pub average_sale_by_transaction: f64,
    pub rows: usize,
    pub is_empty: bool,
}

impl Metrics {
    pub fn compute(view: &View<'_>) -> Result<Self> {
        let amounts = view.numeric(columns::AMOUNT)?;
        let ages = view.numeric(columns::AGE)?;

        let total_sales = amounts.iter().sum::<f64>().trunc() as i64;
        let average_rating = mean(&ages).map(|m| round_to(m, 1)).unwrap_or(0.0);
        let average_sale_by_transaction = mean(&amounts).map(|m| round_to(m, 2)).unwrap_or(0.0);

        Ok(Metrics {
            total_sales,
            average_rating,
            star_rating: stars(average_rating),
            average_sale_by_transaction,
            rows: view.len(),
            is_empty: view.is_empty(),
        })
    }

    pub fn total_sales_label(&self) -> String {
        format!("US $ {}", group_thousands(self.total_sales))
    }

    pub fn rating_label(&self) -> String {
        format!("{:.1} {}", self.average_rating, self.star_rating)
    }

    pub fn average_sale_label(&self) -> String {
        format!("US $ {:.2}", self.average_sale_by_transaction)
    }
}

/// `None` for an empty slice, so callers decide what "no data" means.
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// One glyph per whole point of the rating, half-way values round to even.
fn stars(rating: f64) -> String {
    let n = if rating.is_finite() {
        rating.round_ties_even().clamp(0.0, MAX_STARS as f64) as usize
    } else {
        0
    };
    STAR.repeat(n)
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
