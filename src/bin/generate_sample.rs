use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const ROWS: usize = 2000;

const TITLES: &[(&str, f64)] = &[
    ("Data Analyst", 0.75),
    ("Data Engineer", 1.0),
    ("Data Scientist", 1.05),
    ("Machine Learning Engineer", 1.2),
    ("Analytics Engineer", 0.95),
    ("Research Scientist", 1.25),
    ("Data Architect", 1.15),
    ("BI Developer", 0.8),
    ("MLOps Engineer", 1.1),
    ("Head of Data", 1.45),
    ("AI Engineer", 1.3),
    ("Applied Scientist", 1.35),
];

/// `(code, weight, salary multiplier)`; `IN` has no label on purpose.
const LEVELS: &[(&str, f64, f64)] = &[
    ("EN", 0.15, 0.55),
    ("MI", 0.30, 0.8),
    ("SE", 0.45, 1.1),
    ("EX", 0.08, 1.6),
    ("IN", 0.02, 0.4),
];

const EMPLOYMENT: &[(&str, f64)] = &[("FT", 0.9), ("PT", 0.04), ("CT", 0.04), ("FL", 0.02)];
const REMOTE: &[(i64, f64)] = &[(0, 0.5), (50, 0.15), (100, 0.33), (25, 0.02)];
const SIZES: &[(&str, f64)] = &[("S", 0.1), ("M", 0.7), ("L", 0.2)];
const COUNTRIES: &[(&str, &str, f64)] = &[
    ("US", "USD", 1.0),
    ("GB", "GBP", 0.79),
    ("DE", "EUR", 0.92),
    ("BR", "BRL", 5.0),
    ("IN", "INR", 83.0),
    ("CA", "CAD", 1.36),
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

    /// Pick an index with probability proportional to `weight(item)`.
    fn weighted<'a, T>(&mut self, items: &'a [T], weight: impl Fn(&T) -> f64) -> &'a T {
        let total: f64 = items.iter().map(&weight).sum();
        let mut target = self.next_f64() * total;
        for item in items {
            target -= weight(item);
            if target <= 0.0 {
                return item;
            }
        }
        &items[items.len() - 1]
    }
}

/// One generated observation, in raw-column order.
struct Row {
    work_year: Option<i64>,
    experience_level: &'static str,
    employment_type: &'static str,
    job_title: &'static str,
    salary: i64,
    salary_currency: &'static str,
    salary_in_usd: i64,
    employee_residence: &'static str,
    remote_ratio: i64,
    company_location: &'static str,
    company_size: &'static str,
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    (0..ROWS)
        .map(|_| {
            let year = 2020 + (rng.next_u64() % 5) as i64;
            let &(title, title_factor) = rng.pick(TITLES);
            let &(level, _, level_factor) = rng.weighted(LEVELS, |l| l.1);
            let &(residence, currency, fx) = rng.pick(COUNTRIES);
            let growth = 1.0 + 0.04 * (year - 2020) as f64;

            let usd = (rng.gauss(120_000.0, 25_000.0) * title_factor * level_factor * growth)
                .max(15_000.0)
                .round() as i64;

            Row {
                // ~2% of rows lose their year, as in the public dataset dumps.
                work_year: (rng.next_f64() >= 0.02).then_some(year),
                experience_level: level,
                employment_type: rng.weighted(EMPLOYMENT, |e| e.1).0,
                job_title: title,
                salary: (usd as f64 * fx).round() as i64,
                salary_currency: currency,
                salary_in_usd: usd,
                employee_residence: residence,
                remote_ratio: rng.weighted(REMOTE, |r| r.1).0,
                company_location: if rng.next_f64() < 0.85 { residence } else { "US" },
                company_size: rng.weighted(SIZES, |s| s.1).0,
            }
        })
        .collect()
}

const COLUMNS: [&str; 11] = [
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

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(COLUMNS)?;
    for r in rows {
        writer.write_record([
            r.work_year.map(|y| y.to_string()).unwrap_or_default(),
            r.experience_level.to_string(),
            r.employment_type.to_string(),
            r.job_title.to_string(),
            r.salary.to_string(),
            r.salary_currency.to_string(),
            r.salary_in_usd.to_string(),
            r.employee_residence.to_string(),
            r.remote_ratio.to_string(),
            r.company_location.to_string(),
            r.company_size.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let text = |f: fn(&Row) -> &'static str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let int = |f: fn(&Row) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let fields: Vec<Field> = COLUMNS
        .iter()
        .map(|&name| {
            let data_type = match name {
                "work_year" => DataType::Float64,
                "salary" | "salary_in_usd" | "remote_ratio" => DataType::Int64,
                _ => DataType::Utf8,
            };
            Field::new(name, data_type, name == "work_year")
        })
        .collect();
    let schema = Arc::new(Schema::new(fields));

    // Float years with nulls, like a dataframe column that had missing values.
    let years: ArrayRef = Arc::new(Float64Array::from(
        rows.iter()
            .map(|r| r.work_year.map(|y| y as f64))
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            years,
            text(|r| r.experience_level),
            text(|r| r.employment_type),
            text(|r| r.job_title),
            int(|r| r.salary),
            text(|r| r.salary_currency),
            int(|r| r.salary_in_usd),
            text(|r| r.employee_residence),
            int(|r| r.remote_ratio),
            text(|r| r.company_location),
            text(|r| r.company_size),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);
    let missing_years = rows.iter().filter(|r| r.work_year.is_none()).count();

    write_csv(&rows, "salaries.csv")?;
    write_parquet(&rows, "salaries.parquet")?;

    println!(
        "Wrote {} salary rows ({missing_years} without a year) to salaries.csv and salaries.parquet",
        rows.len()
    );
    Ok(())
}
