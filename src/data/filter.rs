use std::collections::{BTreeMap, BTreeSet};

use super::model::{columns, CellValue, Dataset};
use crate::error::Result;

/// Columns exposed as sidebar selectors, in display order.
pub const FILTER_COLUMNS: [&str; 3] = [columns::STATE, columns::GENDER, columns::OCCUPATION];

// ---------------------------------------------------------------------------
// Filter predicate: which distinct values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column_name → set of selected values.
/// A column absent from the map is unconstrained; a column present with an
/// empty set matches no rows.
pub type FilterState = BTreeMap<String, BTreeSet<CellValue>>;

/// Initialise a [`FilterState`] with every value of every selector column
/// selected. Selector columns missing from the dataset are left out; the
/// sidebar reports them.
pub fn init_filter_state(dataset: &Dataset) -> FilterState {
    FILTER_COLUMNS
        .iter()
        .filter_map(|&col| {
            let values = dataset.unique_values(col).ok()?;
            Some((col.to_string(), values.iter().cloned().collect()))
        })
        .collect()
}

/// Return indices of rows that pass all active filters, in dataset order.
///
/// A row passes a column filter when:
/// * The filter set for that column is empty → nothing selected → fails
/// * Every distinct value is selected → passes (no effective constraint)
/// * The row's value for that column is in the selected set → passes
///
/// Fails with `ColumnNotFound` if `filters` names a column the dataset lacks.
pub fn filtered_indices(dataset: &Dataset, filters: &FilterState) -> Result<Vec<usize>> {
    let mut active: Vec<(usize, &BTreeSet<CellValue>)> = Vec::with_capacity(filters.len());
    for (col, selected) in filters {
        let idx = dataset.column_index(col)?;
        if selected.is_empty() {
            // Nothing selected for this column → hide everything
            return Ok(Vec::new());
        }
        if dataset.unique_values(col)?.iter().all(|v| selected.contains(v)) {
            continue; // everything selected, no filtering needed
        }
        active.push((idx, selected));
    }

    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| active.iter().all(|(idx, selected)| selected.contains(rec.get(*idx))))
        .map(|(i, _)| i)
        .collect();
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use crate::error::DashboardError;

    fn rec(state: &str, gender: &str, occupation: &str, age: i64, amount: f64) -> Record {
        Record::new(vec![
            state.into(),
            gender.into(),
            occupation.into(),
            age.into(),
            amount.into(),
        ])
    }

    fn dataset() -> Dataset {
        Dataset::from_records(
            ["State", "Gender", "Occupation", "Age", "Amount"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec![
                rec("A", "M", "Lawyer", 30, 100.0),
                rec("B", "F", "Banking", 40, 200.0),
                rec("A", "F", "Banking", 25, 50.0),
                rec("C", "M", "Retail", 52, 75.0),
            ],
        )
    }

    fn select(filters: &mut FilterState, col: &str, values: &[&str]) {
        filters.insert(
            col.to_string(),
            values.iter().map(|&v| CellValue::from(v)).collect(),
        );
    }

    #[test]
    fn default_selection_returns_everything() {
        let ds = dataset();
        let filters = init_filter_state(&ds);
        assert_eq!(filters.len(), 3);
        assert_eq!(filtered_indices(&ds, &filters).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn every_row_satisfies_all_three_memberships() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        select(&mut filters, "State", &["A", "B"]);
        select(&mut filters, "Gender", &["F"]);
        select(&mut filters, "Occupation", &["Banking", "Retail"]);

        let rows = filtered_indices(&ds, &filters).unwrap();
        assert_eq!(rows, vec![1, 2]);
        for &i in &rows {
            let r = &ds.records[i];
            assert!(filters["State"].contains(r.get(0)));
            assert!(filters["Gender"].contains(r.get(1)));
            assert!(filters["Occupation"].contains(r.get(2)));
        }
    }

    fn subsets(values: &[CellValue]) -> Vec<BTreeSet<CellValue>> {
        (0..1u32 << values.len())
            .map(|mask| {
                values
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, v)| v.clone())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn every_selection_combination_is_a_matching_subset() {
        let ds = dataset();
        let options: Vec<Vec<BTreeSet<CellValue>>> = FILTER_COLUMNS
            .iter()
            .map(|col| subsets(ds.unique_values(col).unwrap()))
            .collect();

        let mut combinations = 0;
        for state in &options[0] {
            for gender in &options[1] {
                for occupation in &options[2] {
                    let mut filters = FilterState::new();
                    filters.insert("State".into(), state.clone());
                    filters.insert("Gender".into(), gender.clone());
                    filters.insert("Occupation".into(), occupation.clone());

                    let rows = filtered_indices(&ds, &filters).unwrap();
                    assert!(rows.windows(2).all(|w| w[0] < w[1]));
                    assert!(rows.iter().all(|&i| i < ds.len()));

                    for (i, r) in ds.records.iter().enumerate() {
                        let matches = state.contains(r.get(0))
                            && gender.contains(r.get(1))
                            && occupation.contains(r.get(2));
                        assert_eq!(rows.contains(&i), matches, "row {i} under {filters:?}");
                    }
                    combinations += 1;
                }
            }
        }
        // 3 states, 2 genders, 3 occupations
        assert_eq!(combinations, 8 * 4 * 8);
    }

    #[test]
    fn single_state_filter() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        select(&mut filters, "State", &["A"]);
        assert_eq!(filtered_indices(&ds, &filters).unwrap(), vec![0, 2]);
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let ds = dataset();
        for col in FILTER_COLUMNS {
            let mut filters = init_filter_state(&ds);
            filters.insert(col.to_string(), BTreeSet::new());
            assert!(filtered_indices(&ds, &filters).unwrap().is_empty(), "{col}");
        }
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        select(&mut filters, "State", &["C"]);
        select(&mut filters, "Gender", &["F"]);
        assert!(filtered_indices(&ds, &filters).unwrap().is_empty());
    }

    #[test]
    fn filter_on_missing_column_fails() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        select(&mut filters, "Zone", &["Western"]);
        let err = filtered_indices(&ds, &filters).unwrap_err();
        assert!(matches!(err, DashboardError::ColumnNotFound(c) if c == "Zone"));
    }

    #[test]
    fn init_skips_missing_selector_columns() {
        let ds = Dataset::from_records(
            vec!["State".into()],
            vec![Record::new(vec!["A".into()])],
        );
        let filters = init_filter_state(&ds);
        assert_eq!(filters.keys().collect::<Vec<_>>(), vec!["State"]);
    }
}
