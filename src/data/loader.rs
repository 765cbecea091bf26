use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Employee, EmployeeDataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the employee table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the display column names (recommended)
/// * `.json`    – `[{ "Name": "...", "Department": "...", ... }, ...]`
/// * `.parquet` – one column per field, same names as the CSV header
pub fn load_file(path: &Path) -> Result<EmployeeDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening CSV {}", path.display()))?;
            read_csv(file)?
        }
        "json" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening JSON {}", path.display()))?;
            read_json(file)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    log::debug!(
        "parsed {} rows from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the column names shown in the dashboard
/// (`Name`, `Department`, `Productivity (%)`, ...). Unknown columns are ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<EmployeeDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let employees = reader
        .deserialize::<Employee>()
        .enumerate()
        .map(|(row_no, record)| record.with_context(|| format!("CSV row {row_no}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(EmployeeDataset::from_employees(employees))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Name": "Douglas Lindsey", "Department": "Marketing", "Age": 25, ... },
///   ...
/// ]
/// ```
pub fn read_json<R: Read>(reader: R) -> Result<EmployeeDataset> {
    let employees: Vec<Employee> =
        serde_json::from_reader(reader).context("parsing JSON employee records")?;
    Ok(EmployeeDataset::from_employees(employees))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per employee field.
///
/// Numeric fields accept Int32, Int64, Float32 and Float64 columns, so files
/// written by both **Pandas** and **Polars** load without casting.
fn load_parquet(path: &Path) -> Result<EmployeeDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut employees = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        employees.extend(batch_to_employees(&batch)?);
    }

    Ok(EmployeeDataset::from_employees(employees))
}

fn batch_to_employees(batch: &RecordBatch) -> Result<Vec<Employee>> {
    let cols = EmployeeColumns::new(batch)?;
    (0..batch.num_rows())
        .map(|row| {
            cols.employee(row)
                .with_context(|| format!("Parquet row {row}"))
        })
        .collect()
}

/// The record batch columns backing each employee field.
struct EmployeeColumns<'a> {
    name: &'a Arc<dyn Array>,
    department: &'a Arc<dyn Array>,
    position: &'a Arc<dyn Array>,
    joining_date: &'a Arc<dyn Array>,
    age: &'a Arc<dyn Array>,
    productivity: &'a Arc<dyn Array>,
    satisfaction: &'a Arc<dyn Array>,
    projects: &'a Arc<dyn Array>,
    salary: &'a Arc<dyn Array>,
    feedback: &'a Arc<dyn Array>,
    gender: Option<&'a Arc<dyn Array>>,
}

impl<'a> EmployeeColumns<'a> {
    fn new(batch: &'a RecordBatch) -> Result<Self> {
        Ok(EmployeeColumns {
            name: column(batch, "Name")?,
            department: column(batch, "Department")?,
            position: column(batch, "Position")?,
            joining_date: column(batch, "Joining Date")?,
            age: column(batch, "Age")?,
            productivity: column(batch, "Productivity (%)")?,
            satisfaction: column(batch, "Satisfaction Rate (%)")?,
            projects: column(batch, "Projects Completed")?,
            salary: column(batch, "Salary")?,
            feedback: column(batch, "Feedback Score")?,
            gender: column(batch, "Gender").ok(),
        })
    }

    fn employee(&self, row: usize) -> Result<Employee> {
        Ok(Employee {
            name: string_at(self.name, row)?,
            department: string_at(self.department, row)?,
            position: string_at(self.position, row)?,
            joining_date: string_at(self.joining_date, row)?,
            age: count_at(self.age, row)?,
            productivity: f64_at(self.productivity, row)?,
            satisfaction: f64_at(self.satisfaction, row)?,
            projects_completed: count_at(self.projects, row)?,
            salary: f64_at(self.salary, row)?,
            feedback_score: f64_at(self.feedback, row)?,
            gender: match self.gender {
                Some(col) if !col.is_null(row) => Some(string_at(col, row)?),
                _ => None,
            },
        })
    }
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

// -- Parquet / Arrow helpers --

fn string_at(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in text column");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected a string column, got {other:?}"),
    }
}

fn f64_at(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    let value = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(col)?.value(row),
        DataType::Float32 => downcast::<Float32Array>(col)?.value(row) as f64,
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row) as f64,
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row) as f64,
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(value)
}

fn count_at(col: &Arc<dyn Array>, row: usize) -> Result<u32> {
    let value = f64_at(col, row)?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        bail!("{value} is not a non-negative whole number");
    }
    Ok(value as u32)
}

fn downcast<T: Array + 'static>(col: &Arc<dyn Array>) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array type {:?}", col.data_type()))
}
