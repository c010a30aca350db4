use std::collections::HashMap;

use super::model::{CellValue, View};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Aggregate – key → value, ordered
// ---------------------------------------------------------------------------

/// How the values of one group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimator {
    Sum,
    Mean,
}

/// A grouped numeric column: `(key, value)` pairs in a defined order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregate {
    pub entries: Vec<(CellValue, f64)>,
}

impl Aggregate {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stable sort by value, largest first. Equal values keep their order.
    pub fn sorted_desc(mut self) -> Self {
        self.entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        self
    }

    /// Keep the first `n` entries.
    pub fn top(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }

    pub fn map_values(mut self, f: impl Fn(f64) -> f64) -> Self {
        for (_, v) in &mut self.entries {
            *v = f(*v);
        }
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &CellValue> {
        self.entries.iter().map(|(k, _)| k)
    }
}

/// Accumulator for one group.
#[derive(Debug, Clone, Copy, Default)]
struct Acc {
    sum: f64,
    count: usize,
}

impl Acc {
    fn push(&mut self, v: Option<f64>) {
        if let Some(v) = v {
            self.sum += v;
            self.count += 1;
        }
    }

    fn finish(self, estimator: Estimator) -> Option<f64> {
        match estimator {
            Estimator::Sum => Some(self.sum),
            Estimator::Mean if self.count == 0 => None,
            Estimator::Mean => Some(self.sum / self.count as f64),
        }
    }
}

/// Group `value` by `key` and sum, groups in first-appearance order.
///
/// Rows with a missing key are dropped; missing values count as nothing, so
/// a group made only of missing values sums to zero.
pub fn group_sum(view: &View<'_>, key: &str, value: &str) -> Result<Aggregate> {
    let keys: Vec<&CellValue> = view.column(key)?.collect();
    let values: Vec<Option<f64>> = view.column(value)?.map(CellValue::as_f64).collect();

    let mut position: HashMap<&CellValue, usize> = HashMap::new();
    let mut groups: Vec<(CellValue, Acc)> = Vec::new();

    for (k, v) in keys.into_iter().zip(values) {
        if k.is_null() {
            continue;
        }
        let slot = *position.entry(k).or_insert_with(|| {
            groups.push((k.clone(), Acc::default()));
            groups.len() - 1
        });
        groups[slot].1.push(v);
    }

    Ok(Aggregate {
        entries: groups
            .into_iter()
            .map(|(k, acc)| (k, acc.sum))
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Pivot – two-level grouping for grouped bar charts
// ---------------------------------------------------------------------------

/// `outer × inner` table of estimates. `values[i][j]` is `None` when no row
/// has that combination.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pivot {
    pub outer: Vec<CellValue>,
    pub inner: Vec<CellValue>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl Pivot {
    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }

    pub fn get(&self, outer: usize, inner: usize) -> Option<f64> {
        self.values.get(outer)?.get(inner).copied().flatten()
    }
}

/// Group `value` by (`outer`, `inner`), both axes in first-appearance order.
pub fn group_pivot(
    view: &View<'_>,
    outer: &str,
    inner: &str,
    value: &str,
    estimator: Estimator,
) -> Result<Pivot> {
    let outer_keys: Vec<&CellValue> = view.column(outer)?.collect();
    let inner_keys: Vec<&CellValue> = view.column(inner)?.collect();
    let values: Vec<Option<f64>> = view.column(value)?.map(CellValue::as_f64).collect();

    let mut outer_pos: HashMap<&CellValue, usize> = HashMap::new();
    let mut inner_pos: HashMap<&CellValue, usize> = HashMap::new();
    let mut outer_order: Vec<CellValue> = Vec::new();
    let mut inner_order: Vec<CellValue> = Vec::new();
    let mut cells: HashMap<(usize, usize), Acc> = HashMap::new();

    for ((o, i), v) in outer_keys.into_iter().zip(inner_keys).zip(values) {
        if o.is_null() || i.is_null() {
            continue;
        }
        let oi = *outer_pos.entry(o).or_insert_with(|| {
            outer_order.push(o.clone());
            outer_order.len() - 1
        });
        let ii = *inner_pos.entry(i).or_insert_with(|| {
            inner_order.push(i.clone());
            inner_order.len() - 1
        });
        cells.entry((oi, ii)).or_default().push(v);
    }

    let values = (0..outer_order.len())
        .map(|oi| {
            (0..inner_order.len())
                .map(|ii| cells.get(&(oi, ii)).and_then(|acc| acc.finish(estimator)))
                .collect()
        })
        .collect();

    Ok(Pivot {
        outer: outer_order,
        inner: inner_order,
        values,
    })
}

// ---------------------------------------------------------------------------
// Value counts
// ---------------------------------------------------------------------------

/// Count rows per distinct value, most frequent first. Ties keep
/// first-appearance order; missing values are not counted.
pub fn value_counts(view: &View<'_>, column: &str) -> Result<Vec<(CellValue, usize)>> {
    let mut position: HashMap<&CellValue, usize> = HashMap::new();
    let mut counts: Vec<(CellValue, usize)> = Vec::new();

    for v in view.column(column)? {
        if v.is_null() {
            continue;
        }
        let slot = *position.entry(v).or_insert_with(|| {
            counts.push((v.clone(), 0));
            counts.len() - 1
        });
        counts[slot].1 += 1;
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Most bins a histogram is split into.
pub const MAX_BINS: usize = 1000;

/// One histogram bin, `[start, end)` except the last which includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Bin `values` with numpy's `"auto"` rule: the narrower of the Sturges and
/// Freedman–Diaconis widths, Sturges alone when the IQR is zero or when the
/// narrower width would need more than [`MAX_BINS`] bins.
pub fn histogram(values: &[f64]) -> Vec<Bin> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Vec::new();
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let min = sorted[0];
    let max = sorted[n - 1];
    let range = max - min;
    if range == 0.0 {
        return vec![Bin {
            start: min - 0.5,
            end: min + 0.5,
            count: n,
        }];
    }

    let sturges = range / ((n as f64).log2() + 1.0);
    let iqr = percentile(&sorted, 0.75) - percentile(&sorted, 0.25);
    let fd = 2.0 * iqr * (n as f64).powf(-1.0 / 3.0);
    let mut width = if fd > 0.0 { fd.min(sturges) } else { sturges };
    if range / width > MAX_BINS as f64 {
        // A far outlier shrinks the IQR width next to the range.
        width = sturges;
    }
    let n_bins = ((range / width).ceil() as usize).clamp(1, MAX_BINS);
    let step = range / n_bins as f64;

    let mut bins: Vec<Bin> = (0..n_bins)
        .map(|i| Bin {
            start: min + i as f64 * step,
            end: if i + 1 == n_bins { max } else { min + (i + 1) as f64 * step },
            count: 0,
        })
        .collect();

    for v in sorted {
        let idx = (((v - min) / step) as usize).min(n_bins - 1);
        bins[idx].count += 1;
    }
    bins
}

/// Linear-interpolated percentile of sorted data, `q` in `[0, 1]`.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
