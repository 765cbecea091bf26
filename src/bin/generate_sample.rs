use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::json;

use employee_dashboard::config::{DEFAULT_DATA_PATH, DEFAULT_MODEL_PATH};
use employee_dashboard::data::model::Employee;
use employee_dashboard::predictor::FEATURE_NAMES;

const FIRST_NAMES: [&str; 12] = [
    "Douglas", "Anthony", "Thomas", "Joshua", "Ashley", "Maria", "Kevin", "Laura", "Priya",
    "Daniel", "Grace", "Omar",
];
const LAST_NAMES: [&str; 10] = [
    "Lindsey", "Roberson", "Miller", "Smith", "Garcia", "Chen", "Nguyen", "Patel", "Brown",
    "Okafor",
];
const DEPARTMENTS: [&str; 5] = ["Marketing", "IT", "Sales", "HR", "Finance"];
const POSITIONS: [&str; 6] = [
    "Intern",
    "Analyst",
    "Junior Developer",
    "Senior Developer",
    "Team Lead",
    "Manager",
];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
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

    /// Uniform integer in `[lo, hi]`.
    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as u32
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_f64() * items.len() as f64) as usize]
    }
}

fn generate_employee(rng: &mut SimpleRng) -> Employee {
    let name = format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES));
    let month = rng.pick(&MONTHS);
    let year = rng.range(0, 23);

    Employee {
        name,
        department: rng.pick(&DEPARTMENTS).to_string(),
        position: rng.pick(&POSITIONS).to_string(),
        joining_date: format!("{month}-{year:02}"),
        age: rng.range(22, 60),
        productivity: rng.range(5, 100) as f64,
        satisfaction: rng.range(0, 100) as f64,
        projects_completed: rng.range(0, 25),
        salary: (rng.range(30, 120) * 1000 + rng.range(0, 999)) as f64,
        feedback_score: (10.0 + rng.next_f64() * 40.0).round() / 10.0,
        gender: Some(if rng.next_f64() < 0.5 { "Male" } else { "Female" }.to_string()),
    }
}

fn write_csv(path: &Path, employees: &[Employee]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    for emp in employees {
        writer.serialize(emp).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");
}

fn write_parquet(path: &Path, employees: &[Employee]) {
    let text = |f: fn(&Employee) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(employees.iter().map(f).collect::<Vec<_>>()))
    };
    let int = |f: fn(&Employee) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(employees.iter().map(f).collect::<Vec<_>>()))
    };
    let float = |f: fn(&Employee) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(employees.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("Name", DataType::Utf8, false),
        Field::new("Department", DataType::Utf8, false),
        Field::new("Position", DataType::Utf8, false),
        Field::new("Joining Date", DataType::Utf8, false),
        Field::new("Age", DataType::Int64, false),
        Field::new("Productivity (%)", DataType::Int64, false),
        Field::new("Satisfaction Rate (%)", DataType::Int64, false),
        Field::new("Projects Completed", DataType::Int64, false),
        Field::new("Salary", DataType::Int64, false),
        Field::new("Feedback Score", DataType::Float64, false),
        Field::new("Gender", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|e| &e.name),
            text(|e| &e.department),
            text(|e| &e.position),
            text(|e| &e.joining_date),
            int(|e| e.age as i64),
            int(|e| e.productivity as i64),
            int(|e| e.satisfaction as i64),
            int(|e| e.projects_completed as i64),
            int(|e| e.salary as i64),
            float(|e| e.feedback_score),
            text(|e| e.gender.as_deref().unwrap_or("")),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

/// A fixed linear scorer so the dashboard has something to load. Nothing is
/// fitted here.
fn write_model(path: &Path) {
    let model = json!({
        "kind": "linear",
        "feature_names": FEATURE_NAMES,
        "coefficients": [0.55, 0.25, 0.00005, 0.6, -0.05],
        "intercept": 2.0,
    });
    let text = serde_json::to_string_pretty(&model).expect("Failed to encode model");
    std::fs::write(path, text).expect("Failed to write model file");
}

fn ensure_parent(path: &Path) {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).expect("Failed to create output directory");
    }
}

/// Output root used when no directory is given on the command line. Kept
/// under `target/` so the bundled `data/` and `models/` files stay intact.
const DEFAULT_OUTPUT_DIR: &str = "target/sample";

/// Where the CSV, Parquet and model files land below `out_dir`. The layout
/// mirrors the app's defaults, so `HR_DASHBOARD_DATA` / `HR_DASHBOARD_MODEL`
/// can point straight at the results.
struct OutputPaths {
    csv: PathBuf,
    parquet: PathBuf,
    model: PathBuf,
}

impl OutputPaths {
    fn new(out_dir: &Path) -> Self {
        let csv = out_dir.join(DEFAULT_DATA_PATH);
        OutputPaths {
            parquet: csv.with_extension("parquet"),
            csv,
            model: out_dir.join(DEFAULT_MODEL_PATH),
        }
    }

    /// First positional argument, or [`DEFAULT_OUTPUT_DIR`].
    fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        let out_dir = args
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        Self::new(&out_dir)
    }
}

fn main() {
    let paths = OutputPaths::from_args(std::env::args());

    let mut rng = SimpleRng::new(42);
    let employees: Vec<Employee> = (0..200).map(|_| generate_employee(&mut rng)).collect();

    let (csv_path, parquet_path, model_path) = (&paths.csv, &paths.parquet, &paths.model);

    ensure_parent(csv_path);
    ensure_parent(model_path);

    write_csv(csv_path, &employees);
    write_parquet(parquet_path, &employees);
    write_model(model_path);

    println!(
        "Wrote {} employees to {} and {}, model to {}",
        employees.len(),
        csv_path.display(),
        parquet_path.display(),
        model_path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args<'a>(extra: &'a [&str]) -> impl Iterator<Item = String> + 'a {
        std::iter::once("generate_sample".to_string())
            .chain(extra.iter().map(|s| s.to_string()))
    }

    #[test]
    fn default_output_leaves_bundled_files_alone() {
        let paths = OutputPaths::from_args(args(&[]));
        assert_eq!(paths.csv, Path::new("target/sample/data/hr_dashboard_data.csv"));
        assert_eq!(paths.parquet, Path::new("target/sample/data/hr_dashboard_data.parquet"));
        assert_eq!(paths.model, Path::new("target/sample/models/performance_model.json"));
        assert_ne!(paths.csv, Path::new(DEFAULT_DATA_PATH));
        assert_ne!(paths.model, Path::new(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn output_dir_argument() {
        let paths = OutputPaths::from_args(args(&["/tmp/hr"]));
        assert_eq!(paths.csv, Path::new("/tmp/hr/data/hr_dashboard_data.csv"));
        assert_eq!(paths.model, Path::new("/tmp/hr/models/performance_model.json"));
    }

    #[test]
    fn generated_rows_load_back() {
        let mut rng = SimpleRng::new(7);
        let employees: Vec<Employee> = (0..20).map(|_| generate_employee(&mut rng)).collect();

        let mut buf = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buf);
            for emp in &employees {
                writer.serialize(emp).unwrap();
            }
            writer.flush().unwrap();
        }
        let ds = employee_dashboard::data::loader::read_csv(buf.as_slice()).unwrap();
        assert_eq!(ds.employees, employees);
    }
}
