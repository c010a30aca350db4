use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{DashboardError, Result};

/// Header names the dashboard reads.
pub mod columns {
    pub const STATE: &str = "State";
    pub const GENDER: &str = "Gender";
    pub const OCCUPATION: &str = "Occupation";
    pub const ZONE: &str = "Zone";
    pub const AGE: &str = "Age";
    pub const AMOUNT: &str = "Amount";
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the sales table
// ---------------------------------------------------------------------------

/// One field of a sales row, typed from its CSV text.
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

// Selector sets are `BTreeSet<CellValue>`, which needs a total order.
// Floats compare by `total_cmp` and hash by bits, so equality, ordering and
// hashing agree. Different kinds order as Null < Integer < Float < Text,
// which keeps the text "12" and the number 12 apart.

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Integer(_) => 1,
            CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(v) => v.to_bits().hash(state),
            CellValue::Text(s) => s.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Null => write!(f, "None"),
        }
    }
}

impl CellValue {
    /// Infer the type of a raw CSV field. Numbers may carry surrounding
    /// spaces; text is kept exactly as written.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        let number = s.trim();
        if let Ok(i) = number.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = number.parse::<f64>() {
            if f.is_nan() {
                return CellValue::Null;
            }
            return CellValue::Float(f);
        }
        CellValue::Text(s.to_string())
    }

    /// Numeric view of the cell; `None` for text and missing values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

static NULL: CellValue = CellValue::Null;

// ---------------------------------------------------------------------------
// Record – one sales transaction
// ---------------------------------------------------------------------------

/// One row of the sales file, aligned with [`Dataset::column_names`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub cells: Vec<CellValue>,
}

impl Record {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Cell at a column position; out-of-range reads as `Null`.
    pub fn get(&self, column: usize) -> &CellValue {
        self.cells.get(column).unwrap_or(&NULL)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed sales table with a per-column index of distinct values.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Header, in file order.
    pub column_names: Vec<String>,
    pub records: Vec<Record>,
    /// For each column (same order as `column_names`) the distinct values
    /// in order of first appearance.
    unique_values: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build the distinct-value index from the loaded rows.
    pub fn from_records(column_names: Vec<String>, records: Vec<Record>) -> Self {
        let mut unique_values = Vec::with_capacity(column_names.len());
        for col in 0..column_names.len() {
            let mut seen: HashSet<&CellValue> = HashSet::new();
            let mut ordered = Vec::new();
            for rec in &records {
                let val = rec.get(col);
                if seen.insert(val) {
                    ordered.push(val.clone());
                }
            }
            unique_values.push(ordered);
        }
        Dataset {
            column_names,
            records,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a column in the header.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.column_names
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DashboardError::ColumnNotFound(name.to_string()))
    }

    /// Distinct values of a column, first appearance first.
    pub fn unique_values(&self, name: &str) -> Result<&[CellValue]> {
        let idx = self.column_index(name)?;
        Ok(&self.unique_values[idx])
    }

    /// A view over every row.
    pub fn full_view(&self) -> View<'_> {
        View::new(self, (0..self.len()).collect::<Vec<_>>())
    }
}

// ---------------------------------------------------------------------------
// View – the dataset seen through a list of row indices
// ---------------------------------------------------------------------------

/// A read-only subset of a [`Dataset`], in dataset order.
#[derive(Debug, Clone)]
pub struct View<'a> {
    dataset: &'a Dataset,
    rows: Cow<'a, [usize]>,
}

impl<'a> View<'a> {
    pub fn new(dataset: &'a Dataset, rows: impl Into<Cow<'a, [usize]>>) -> Self {
        Self {
            dataset,
            rows: rows.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Row indices into the underlying dataset.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = &self.dataset.records;
        self.rows.iter().map(move |&i| &records[i])
    }

    /// Cells of one column, in view order.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &'a CellValue> + '_> {
        let idx = self.dataset.column_index(name)?;
        Ok(self.records().map(move |rec| rec.get(idx)))
    }

    /// Numeric cells of one column. Missing and non-numeric cells are skipped,
    /// the way a dataframe's `sum`/`mean` skip NaN.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self.column(name)?.filter_map(CellValue::as_f64).collect())
    }
}
