use std::collections::BTreeSet;

use super::error::LoadError;
use super::labels::Vocabulary;
use super::model::{RawTable, SalaryRecord, SalaryTable, RAW_COLUMNS};

// Indices into `RAW_COLUMNS`.
const WORK_YEAR: usize = 0;
const EXPERIENCE_LEVEL: usize = 1;
const EMPLOYMENT_TYPE: usize = 2;
const JOB_TITLE: usize = 3;
const SALARY: usize = 4;
const SALARY_CURRENCY: usize = 5;
const SALARY_IN_USD: usize = 6;
const EMPLOYEE_RESIDENCE: usize = 7;
const REMOTE_RATIO: usize = 8;
const COMPANY_LOCATION: usize = 9;
const COMPANY_SIZE: usize = 10;

/// Turn the raw source rows into the normalized salary table.
///
/// Renames the eleven source columns, drops rows whose year is null,
/// truncates the year to an integer and relabels the four categorical
/// columns with `vocabulary`. Codes without a label are kept verbatim.
/// Null salaries stay `None` and null text cells become empty strings.
pub fn normalize(raw: &RawTable, vocabulary: Vocabulary) -> Result<SalaryTable, LoadError> {
    let positions = raw
        .locate_columns()
        .map_err(|missing| LoadError::SchemaMismatch { missing })?;

    let mut records = Vec::with_capacity(raw.rows.len());
    let mut dropped = 0usize;
    let mut unmapped: BTreeSet<(&'static str, String)> = BTreeSet::new();

    for (row_no, row) in raw.rows.iter().enumerate() {
        let cell = |field: usize| row.get(positions[field]).and_then(|c| c.as_deref());
        let text = |field: usize| cell(field).unwrap_or_default().to_string();

        let Some(year_cell) = cell(WORK_YEAR) else {
            dropped += 1;
            continue;
        };
        let year = parse_year(year_cell, row_no)?;

        let seniority = text(EXPERIENCE_LEVEL);
        let contract_type = text(EMPLOYMENT_TYPE);
        let remote_ratio = text(REMOTE_RATIO);
        let company_size = text(COMPANY_SIZE);

        if !seniority.is_empty() && !vocabulary.knows_seniority(&seniority) {
            unmapped.insert((RAW_COLUMNS[EXPERIENCE_LEVEL], seniority.clone()));
        }
        if !contract_type.is_empty() && !vocabulary.knows_contract_type(&contract_type) {
            unmapped.insert((RAW_COLUMNS[EMPLOYMENT_TYPE], contract_type.clone()));
        }
        if !company_size.is_empty() && !vocabulary.knows_company_size(&company_size) {
            unmapped.insert((RAW_COLUMNS[COMPANY_SIZE], company_size.clone()));
        }

        let remote_type = vocabulary.remote_type(&remote_ratio);
        if !remote_ratio.is_empty() && remote_type == remote_ratio {
            unmapped.insert((RAW_COLUMNS[REMOTE_RATIO], remote_ratio));
        }

        records.push(SalaryRecord {
            year,
            seniority: vocabulary.seniority(&seniority),
            contract_type: vocabulary.contract_type(&contract_type),
            job_title: text(JOB_TITLE),
            salary_local: parse_salary(cell(SALARY), row_no, RAW_COLUMNS[SALARY])?,
            currency: text(SALARY_CURRENCY),
            salary_usd: parse_salary(cell(SALARY_IN_USD), row_no, RAW_COLUMNS[SALARY_IN_USD])?,
            residence: text(EMPLOYEE_RESIDENCE),
            remote_type,
            company_location: text(COMPANY_LOCATION),
            company_size: vocabulary.company_size(&company_size),
        });
    }

    if dropped > 0 {
        log::debug!("Dropped {dropped} row(s) with a null work_year");
    }
    for (column, code) in &unmapped {
        log::warn!("No label for {column} value '{code}', keeping it as is");
    }

    Ok(SalaryTable::from_records(records))
}

/// Years may arrive as `2023` or, from float-typed sources, `2023.0`.
fn parse_year(cell: &str, row: usize) -> Result<i32, LoadError> {
    let invalid = || LoadError::InvalidValue {
        row,
        column: RAW_COLUMNS[WORK_YEAR],
        value: cell.to_string(),
    };
    let value: f64 = cell.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value.abs() > f64::from(i32::MAX) {
        return Err(invalid());
    }
    Ok(value.trunc() as i32)
}

/// A null salary stays `None`; only text that is not a number is an error.
fn parse_salary(
    cell: Option<&str>,
    row: usize,
    column: &'static str,
) -> Result<Option<f64>, LoadError> {
    let Some(raw) = cell else {
        return Ok(None);
    };
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| LoadError::InvalidValue {
            row,
            column,
            value: raw.to_string(),
        })
}
