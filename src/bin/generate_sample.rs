use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const TECH_ROLES: &[&str] = &[
    "Backend engineer",
    "Data analyst",
    "Frontend developer",
    "Platform engineer",
    "Engineering manager",
];
const TECH_SKILLS: &[&str] = &[
    "with Python and SQL",
    "building React dashboards",
    "who can lead a small team",
    "collaborating with stakeholders",
    "shipping Java services",
];
const OTHER_ROLES: &[&str] = &[
    "Warehouse associate",
    "Line cook",
    "Landscape gardener",
    "Delivery driver",
    "Night porter",
];
const OTHER_DUTIES: &[&str] = &[
    "for weekend shifts",
    "handling pallets and stock",
    "keeping the grounds tidy",
    "on a fixed local route",
    "in a busy kitchen",
];

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut ids: Vec<i64> = Vec::new();
    let mut texts: Vec<String> = Vec::new();
    let mut labels: Vec<Option<i64>> = Vec::new();

    for id in 1..=60i64 {
        let tech = rng.next_f64() < 0.5;
        let text = if tech {
            format!("{} {}", rng.pick(TECH_ROLES), rng.pick(TECH_SKILLS))
        } else {
            format!("{} {}", rng.pick(OTHER_ROLES), rng.pick(OTHER_DUTIES))
        };
        // Roughly a third of the rows are left unlabeled.
        let label = (rng.next_f64() < 0.65).then_some(i64::from(tech));

        ids.push(id);
        texts.push(text);
        labels.push(label);
    }

    // CSV
    let csv_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record(["id", "text", "label"])
        .expect("Failed to write CSV header");
    for ((id, text), label) in ids.iter().zip(&texts).zip(&labels) {
        let label = label.map(|l| l.to_string()).unwrap_or_default();
        writer
            .write_record([id.to_string().as_str(), text.as_str(), label.as_str()])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");

    // Parquet
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("text", DataType::Utf8, false),
        Field::new("label", DataType::Int64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(ids.clone())),
            Arc::new(StringArray::from(
                texts.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(labels.clone())),
        ],
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "sample_data.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    let labeled = labels.iter().filter(|l| l.is_some()).count();
    println!(
        "Wrote {} rows ({labeled} labeled) to {csv_path} and {parquet_path}",
        ids.len()
    );
}
