use std::collections::BTreeMap;

use super::error::AggregateError;
use super::model::{SalaryRecord, SalaryTable};

/// Number of job titles kept in the top-paying ranking.
pub const DEFAULT_TOP_TITLES: usize = 10;

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Headline numbers for the filtered records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub count: usize,
    pub mean_usd: Result<f64, AggregateError>,
    pub max_usd: Result<f64, AggregateError>,
}

impl Metrics {
    /// `count` is every filtered record; mean and max skip null salaries.
    pub fn compute(table: &SalaryTable, indices: &[usize]) -> Self {
        let salaries: Vec<f64> = indices
            .iter()
            .filter_map(|&i| table.records[i].salary_usd)
            .collect();

        let (mean_usd, max_usd) = if salaries.is_empty() {
            (Err(AggregateError::EmptyInput), Err(AggregateError::EmptyInput))
        } else {
            (
                Ok(salaries.iter().sum::<f64>() / salaries.len() as f64),
                Ok(salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
            )
        };

        Metrics {
            count: indices.len(),
            mean_usd,
            max_usd,
        }
    }
}

// ---------------------------------------------------------------------------
// Grouped means
// ---------------------------------------------------------------------------

/// Mean `salary_usd` of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean<K> {
    pub key: K,
    pub mean: f64,
}

pub type GroupedView<K> = Result<Vec<GroupMean<K>>, AggregateError>;

/// Mean salary per key, ordered by key.
///
/// Records with no key (an empty label) or a null salary belong to no group.
/// Groups left without any salary are omitted.
fn group_means<K, F>(table: &SalaryTable, indices: &[usize], key: F) -> GroupedView<K>
where
    K: Ord,
    F: Fn(&SalaryRecord) -> Option<K>,
{
    let mut sums: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for &i in indices {
        let rec = &table.records[i];
        let (Some(k), Some(usd)) = (key(rec), rec.salary_usd) else {
            continue;
        };
        let entry = sums.entry(k).or_insert((0.0, 0));
        entry.0 += usd;
        entry.1 += 1;
    }

    if sums.is_empty() {
        return Err(AggregateError::EmptyInput);
    }
    Ok(sums
        .into_iter()
        .map(|(key, (sum, n))| GroupMean {
            key,
            mean: sum / n as f64,
        })
        .collect())
}

fn label(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

// Sorts are stable, so groups with equal means stay in key order.

fn ascending_by_mean<K>(groups: &mut [GroupMean<K>]) {
    groups.sort_by(|a, b| a.mean.total_cmp(&b.mean));
}

fn descending_by_mean<K>(groups: &mut [GroupMean<K>]) {
    groups.sort_by(|a, b| b.mean.total_cmp(&a.mean));
}

/// Mean salary per seniority label, lowest first.
pub fn mean_by_seniority(table: &SalaryTable, indices: &[usize]) -> GroupedView<String> {
    let mut groups = group_means(table, indices, |r| label(&r.seniority))?;
    ascending_by_mean(&mut groups);
    Ok(groups)
}

/// Mean salary per remote type, lowest first.
pub fn mean_by_remote_type(table: &SalaryTable, indices: &[usize]) -> GroupedView<String> {
    let mut groups = group_means(table, indices, |r| label(&r.remote_type))?;
    ascending_by_mean(&mut groups);
    Ok(groups)
}

/// The `limit` best-paid job titles, highest first. Titles with equal means
/// are ranked alphabetically.
pub fn top_job_titles(table: &SalaryTable, indices: &[usize], limit: usize) -> GroupedView<String> {
    let mut groups = group_means(table, indices, |r| label(&r.job_title))?;
    descending_by_mean(&mut groups);
    groups.truncate(limit);
    Ok(groups)
}

/// Mean salary per year, oldest first.
pub fn mean_by_year(table: &SalaryTable, indices: &[usize]) -> GroupedView<i32> {
    group_means(table, indices, |r| Some(r.year))
}

// ---------------------------------------------------------------------------
// DashboardView – everything the presentation layer draws
// ---------------------------------------------------------------------------

/// All derived views for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub metrics: Metrics,
    pub by_seniority: GroupedView<String>,
    pub by_remote_type: GroupedView<String>,
    pub top_titles: GroupedView<String>,
    pub by_year: GroupedView<i32>,
}

impl DashboardView {
    pub fn compute(table: &SalaryTable, indices: &[usize], top_titles: usize) -> Self {
        DashboardView {
            metrics: Metrics::compute(table, indices),
            by_seniority: mean_by_seniority(table, indices),
            by_remote_type: mean_by_remote_type(table, indices),
            top_titles: top_job_titles(table, indices, top_titles),
            by_year: mean_by_year(table, indices),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, Selection};
    use crate::data::model::tests::record;

    fn pairs<K: Clone>(view: &GroupedView<K>) -> Vec<(K, f64)> {
        view.as_ref()
            .unwrap()
            .iter()
            .map(|g| (g.key.clone(), g.mean))
            .collect()
    }

    fn two_records() -> SalaryTable {
        SalaryTable::from_records(vec![
            record(2023, "Entry", "On-site", 50000.0),
            record(2023, "Senior", "Remote", 150000.0),
        ])
    }

    fn titled(title: &str, year: i32, usd: f64) -> SalaryRecord {
        SalaryRecord {
            job_title: title.to_string(),
            ..record(year, "Mid", "Hybrid", usd)
        }
    }

    #[test]
    fn full_selection_over_two_records() {
        let table = two_records();
        let indices = filtered_indices(&table, &Selection::all(&table));
        let view = DashboardView::compute(&table, &indices, DEFAULT_TOP_TITLES);

        assert_eq!(view.metrics.count, 2);
        assert_eq!(view.metrics.mean_usd, Ok(100000.0));
        assert_eq!(view.metrics.max_usd, Ok(150000.0));
        assert_eq!(
            pairs(&view.by_seniority),
            [("Entry".to_string(), 50000.0), ("Senior".to_string(), 150000.0)]
        );
        assert_eq!(
            pairs(&view.by_remote_type),
            [("On-site".to_string(), 50000.0), ("Remote".to_string(), 150000.0)]
        );
        assert_eq!(pairs(&view.by_year), [(2023, 100000.0)]);
    }

    #[test]
    fn senior_only_selection() {
        let table = two_records();
        let mut selection = Selection::all(&table);
        selection.seniorities.retain(|s| s == "Senior");
        let indices = filtered_indices(&table, &selection);
        let metrics = Metrics::compute(&table, &indices);

        assert_eq!(indices.len(), 1);
        assert_eq!(metrics.count, 1);
        assert_eq!(metrics.mean_usd, Ok(150000.0));
        assert_eq!(metrics.max_usd, Ok(150000.0));
    }

    #[test]
    fn empty_selection_reports_no_data() {
        let table = two_records();
        let mut selection = Selection::all(&table);
        selection.years.clear();
        let indices = filtered_indices(&table, &selection);
        let view = DashboardView::compute(&table, &indices, DEFAULT_TOP_TITLES);

        assert_eq!(view.metrics.count, 0);
        assert_eq!(view.metrics.mean_usd, Err(AggregateError::EmptyInput));
        assert_eq!(view.metrics.max_usd, Err(AggregateError::EmptyInput));
        assert_eq!(view.by_seniority, Err(AggregateError::EmptyInput));
        assert_eq!(view.by_remote_type, Err(AggregateError::EmptyInput));
        assert_eq!(view.top_titles, Err(AggregateError::EmptyInput));
        assert_eq!(view.by_year, Err(AggregateError::EmptyInput));
    }

    #[test]
    fn seniority_groups_sorted_by_mean_not_label() {
        let table = SalaryTable::from_records(vec![
            record(2022, "Executive", "Remote", 90000.0),
            record(2022, "Entry", "Remote", 120000.0),
            record(2022, "Entry", "Remote", 100000.0),
            record(2022, "Mid", "On-site", 30000.0),
        ]);
        let all: Vec<usize> = (0..table.len()).collect();
        assert_eq!(
            pairs(&mean_by_seniority(&table, &all)),
            [
                ("Mid".to_string(), 30000.0),
                ("Executive".to_string(), 90000.0),
                ("Entry".to_string(), 110000.0),
            ]
        );
        assert_eq!(
            pairs(&mean_by_remote_type(&table, &all)),
            [("On-site".to_string(), 30000.0), ("Remote".to_string(), 310000.0 / 3.0)]
        );
    }

    #[test]
    fn top_titles_are_descending_and_truncated() {
        let records: Vec<SalaryRecord> = (0..14)
            .map(|i| titled(&format!("Title {i:02}"), 2023, 1000.0 * f64::from(i)))
            .collect();
        let table = SalaryTable::from_records(records);
        let all: Vec<usize> = (0..table.len()).collect();

        let top = top_job_titles(&table, &all, DEFAULT_TOP_TITLES).unwrap();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].key, "Title 13");
        assert_eq!(top[9].key, "Title 04");
        assert!(top.windows(2).all(|w| w[0].mean >= w[1].mean));
    }

    #[test]
    fn top_titles_shorter_than_limit() {
        let table = SalaryTable::from_records(vec![
            titled("Analyst", 2023, 10.0),
            titled("Analyst", 2023, 30.0),
            titled("Engineer", 2023, 50.0),
        ]);
        let all: Vec<usize> = (0..table.len()).collect();
        assert_eq!(
            pairs(&top_job_titles(&table, &all, DEFAULT_TOP_TITLES)),
            [("Engineer".to_string(), 50.0), ("Analyst".to_string(), 20.0)]
        );
    }

    #[test]
    fn top_title_ties_rank_alphabetically() {
        let table = SalaryTable::from_records(vec![
            titled("Zeta", 2023, 100.0),
            titled("Alpha", 2023, 100.0),
            titled("Mid", 2023, 100.0),
        ]);
        let all: Vec<usize> = (0..table.len()).collect();
        let top = top_job_titles(&table, &all, 2).unwrap();
        let keys: Vec<&str> = top.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["Alpha", "Mid"]);
    }

    #[test]
    fn null_salaries_are_skipped_but_counted() {
        let table = SalaryTable::from_records(vec![
            record(2023, "Entry", "On-site", 50000.0),
            SalaryRecord {
                salary_usd: None,
                ..record(2023, "Senior", "Remote", 0.0)
            },
            record(2024, "Senior", "Hybrid", 150000.0),
        ]);
        let all: Vec<usize> = (0..table.len()).collect();
        let view = DashboardView::compute(&table, &all, DEFAULT_TOP_TITLES);

        assert_eq!(view.metrics.count, 3);
        assert_eq!(view.metrics.mean_usd, Ok(100000.0));
        assert_eq!(view.metrics.max_usd, Ok(150000.0));
        assert_eq!(
            pairs(&view.by_seniority),
            [("Entry".to_string(), 50000.0), ("Senior".to_string(), 150000.0)]
        );
        assert_eq!(
            pairs(&view.by_remote_type),
            [("On-site".to_string(), 50000.0), ("Hybrid".to_string(), 150000.0)]
        );
        assert_eq!(pairs(&view.by_year), [(2023, 50000.0), (2024, 150000.0)]);
    }

    #[test]
    fn only_null_salaries_is_no_data() {
        let table = SalaryTable::from_records(vec![SalaryRecord {
            salary_usd: None,
            ..record(2023, "Entry", "On-site", 0.0)
        }]);
        let view = DashboardView::compute(&table, &[0], DEFAULT_TOP_TITLES);
        assert_eq!(view.metrics.count, 1);
        assert_eq!(view.metrics.mean_usd, Err(AggregateError::EmptyInput));
        assert_eq!(view.metrics.max_usd, Err(AggregateError::EmptyInput));
        assert_eq!(view.by_seniority, Err(AggregateError::EmptyInput));
        assert_eq!(view.by_year, Err(AggregateError::EmptyInput));
    }

    #[test]
    fn empty_labels_form_no_group() {
        let table = SalaryTable::from_records(vec![
            record(2023, "", "", 10.0),
            record(2023, "Mid", "Remote", 30.0),
            titled("", 2023, 90.0),
        ]);
        let all: Vec<usize> = (0..table.len()).collect();
        assert_eq!(
            pairs(&mean_by_seniority(&table, &all)),
            [("Mid".to_string(), 60.0)]
        );
        assert_eq!(
            pairs(&mean_by_remote_type(&table, &all)),
            [("Remote".to_string(), 30.0), ("Hybrid".to_string(), 90.0)]
        );
        assert_eq!(
            pairs(&top_job_titles(&table, &all, DEFAULT_TOP_TITLES)),
            [("Data Engineer".to_string(), 20.0)]
        );
        assert_eq!(Metrics::compute(&table, &all).count, 3);
        assert_eq!(pairs(&mean_by_year(&table, &all)), [(2023, 130.0 / 3.0)]);
    }

    #[test]
    fn yearly_series_is_chronological() {
        let table = SalaryTable::from_records(vec![
            titled("A", 2024, 300.0),
            titled("A", 2020, 100.0),
            titled("A", 2022, 200.0),
            titled("A", 2020, 300.0),
        ]);
        let all: Vec<usize> = (0..table.len()).collect();
        assert_eq!(
            pairs(&mean_by_year(&table, &all)),
            [(2020, 200.0), (2022, 200.0), (2024, 300.0)]
        );
    }

    #[test]
    fn aggregates_only_see_filtered_rows() {
        let table = SalaryTable::from_records(vec![
            titled("A", 2022, 100.0),
            titled("B", 2023, 900.0),
        ]);
        let view = DashboardView::compute(&table, &[0], DEFAULT_TOP_TITLES);
        assert_eq!(view.metrics.max_usd, Ok(100.0));
        assert_eq!(pairs(&view.top_titles), [("A".to_string(), 100.0)]);
        assert_eq!(pairs(&view.by_year), [(2022, 100.0)]);
    }
}
