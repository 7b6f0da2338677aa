use std::collections::BTreeSet;

use super::model::{SalaryRecord, SalaryTable};

// ---------------------------------------------------------------------------
// Selection: which values are chosen per filter dimension
// ---------------------------------------------------------------------------

/// The three sidebar multiselects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Year,
    Seniority,
    RemoteType,
}

/// Selected values per dimension.
///
/// An empty set selects nothing, so it hides every record; it never means
/// "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub years: BTreeSet<i32>,
    pub seniorities: BTreeSet<String>,
    pub remote_types: BTreeSet<String>,
}

impl Selection {
    /// Every available value selected (the default view).
    pub fn all(table: &SalaryTable) -> Self {
        Self {
            years: table.years.clone(),
            seniorities: table.seniorities.clone(),
            remote_types: table.remote_types.clone(),
        }
    }

    pub fn matches(&self, record: &SalaryRecord) -> bool {
        self.years.contains(&record.year)
            && self.seniorities.contains(&record.seniority)
            && self.remote_types.contains(&record.remote_type)
    }

    /// Select every available value of one dimension.
    pub fn select_all(&mut self, table: &SalaryTable, dimension: Dimension) {
        match dimension {
            Dimension::Year => self.years = table.years.clone(),
            Dimension::Seniority => self.seniorities = table.seniorities.clone(),
            Dimension::RemoteType => self.remote_types = table.remote_types.clone(),
        }
    }

    pub fn select_none(&mut self, dimension: Dimension) {
        match dimension {
            Dimension::Year => self.years.clear(),
            Dimension::Seniority => self.seniorities.clear(),
            Dimension::RemoteType => self.remote_types.clear(),
        }
    }
}

/// Add `value` to `set` if absent, otherwise remove it.
pub fn toggle<T: Ord + Clone>(set: &mut BTreeSet<T>, value: &T) {
    if !set.remove(value) {
        set.insert(value.clone());
    }
}

/// Return indices of records that pass all three filters, in table order.
pub fn filtered_indices(table: &SalaryTable, selection: &Selection) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn two_records() -> SalaryTable {
        SalaryTable::from_records(vec![
            record(2023, "Entry", "On-site", 50000.0),
            record(2023, "Senior", "Remote", 150000.0),
        ])
    }

    #[test]
    fn default_selection_keeps_everything() {
        let table = two_records();
        assert_eq!(filtered_indices(&table, &Selection::all(&table)), [0, 1]);
    }

    #[test]
    fn seniority_filter() {
        let table = two_records();
        let mut selection = Selection::all(&table);
        selection.seniorities = BTreeSet::from(["Senior".to_string()]);
        assert_eq!(filtered_indices(&table, &selection), [1]);
    }

    #[test]
    fn empty_dimension_hides_everything() {
        let table = two_records();
        for dimension in [Dimension::Year, Dimension::Seniority, Dimension::RemoteType] {
            let mut selection = Selection::all(&table);
            selection.select_none(dimension);
            assert!(filtered_indices(&table, &selection).is_empty(), "{dimension:?}");
            selection.select_all(&table, dimension);
            assert_eq!(filtered_indices(&table, &selection).len(), 2);
        }
    }

    #[test]
    fn filtering_is_deterministic_and_a_subset() {
        let table = SalaryTable::from_records(vec![
            record(2021, "Mid", "Hybrid", 70000.0),
            record(2022, "Entry", "On-site", 40000.0),
            record(2022, "Mid", "Remote", 90000.0),
            record(2023, "Mid", "Hybrid", 95000.0),
        ]);
        let mut selection = Selection::all(&table);
        selection.years.remove(&2021);
        selection.remote_types.remove("Remote");

        let first = filtered_indices(&table, &selection);
        let second = filtered_indices(&table, &selection);
        assert_eq!(first, second);
        assert_eq!(first, [1, 3]);
        assert!(first.iter().all(|&i| i < table.len()));
    }

    #[test]
    fn toggle_flips_membership() {
        let mut set = BTreeSet::from([2022, 2023]);
        toggle(&mut set, &2022);
        assert_eq!(set, BTreeSet::from([2023]));
        toggle(&mut set, &2024);
        assert_eq!(set, BTreeSet::from([2023, 2024]));
    }
}
