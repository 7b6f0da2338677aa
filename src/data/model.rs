use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// RawTable – the source data as fetched, before any cleaning
// ---------------------------------------------------------------------------

/// Column names expected in the source, in normalized-field order.
pub const RAW_COLUMNS: [&str; 11] = [
    "work_year",
    "experience_level",
    "employment_type",
    "job_title",
    "salary",
    "salary_currency",
    "salary_in_usd",
    "employee_residence",
    "remote_ratio",
    "company_location",
    "company_size",
];

/// A row-oriented table of untyped cells. `None` is a null cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Position of every [`RAW_COLUMNS`] entry, or the names that are missing.
    pub fn locate_columns(&self) -> Result<[usize; 11], Vec<String>> {
        let mut positions = [0usize; 11];
        let mut missing = Vec::new();
        for (slot, name) in positions.iter_mut().zip(RAW_COLUMNS) {
            match self.columns.iter().position(|c| c == name) {
                Some(idx) => *slot = idx,
                None => missing.push(name.to_string()),
            }
        }
        if missing.is_empty() {
            Ok(positions)
        } else {
            Err(missing)
        }
    }
}

// ---------------------------------------------------------------------------
// SalaryRecord – one job/salary observation after normalization
// ---------------------------------------------------------------------------

/// Salaries are `None` where the source cell was null. Categorical fields of
/// a null cell hold an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRecord {
    pub year: i32,
    pub seniority: String,
    pub contract_type: String,
    pub job_title: String,
    pub salary_local: Option<f64>,
    pub currency: String,
    pub salary_usd: Option<f64>,
    pub residence: String,
    pub remote_type: String,
    pub company_location: String,
    pub company_size: String,
}

impl SalaryRecord {
    /// Display strings for the data table, one per field.
    pub fn cells(&self) -> [String; 11] {
        [
            self.year.to_string(),
            self.seniority.clone(),
            self.contract_type.clone(),
            self.job_title.clone(),
            amount(self.salary_local),
            self.currency.clone(),
            amount(self.salary_usd),
            self.residence.clone(),
            self.remote_type.clone(),
            self.company_location.clone(),
            self.company_size.clone(),
        ]
    }
}

fn amount(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.0}")).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// SalaryTable – the complete normalized dataset
// ---------------------------------------------------------------------------

/// The normalized dataset with the distinct filter options pre-computed.
///
/// Built once and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SalaryTable {
    pub records: Vec<SalaryRecord>,
    /// Distinct years, ascending.
    pub years: BTreeSet<i32>,
    /// Distinct seniority labels, ascending.
    pub seniorities: BTreeSet<String>,
    /// Distinct remote-type labels, ascending.
    pub remote_types: BTreeSet<String>,
}

impl SalaryTable {
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut years = BTreeSet::new();
        let mut seniorities = BTreeSet::new();
        let mut remote_types = BTreeSet::new();

        for rec in &records {
            years.insert(rec.year);
            seniorities.insert(rec.seniority.clone());
            remote_types.insert(rec.remote_type.clone());
        }

        SalaryTable {
            records,
            years,
            seniorities,
            remote_types,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
