use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One launch row, serialized with the column names the dashboard expects.
#[derive(Debug, Serialize)]
struct LaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: &'static str,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: &'static str,
}

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Booster generations in flight order: (category, flights, max payload kg,
/// success probability).
const GENERATIONS: [(&str, usize, f64, f64); 5] = [
    ("v1.0", 5, 700.0, 0.2),
    ("v1.1", 15, 4500.0, 0.35),
    ("FT", 24, 7000.0, 0.7),
    ("B4", 11, 9600.0, 0.55),
    ("B5", 1, 9600.0, 1.0),
];

fn generate(rng: &mut SimpleRng) -> Vec<LaunchRow> {
    let mut rows = Vec::new();
    let mut flight_number = 1;

    for (category, flights, max_payload, success_rate) in GENERATIONS {
        for n in 0..flights {
            // Early flights carried mostly dummy payloads.
            let payload = if flight_number <= 2 {
                0.0
            } else {
                (rng.next_f64() * max_payload).round()
            };

            rows.push(LaunchRow {
                flight_number,
                launch_site: *rng.pick(&SITES),
                class: i64::from(rng.next_f64() < success_rate),
                payload_mass_kg: payload,
                booster_version: format!("F9 {category} B{:04}", 1000 + flight_number * 3 + n as i64),
                booster_version_category: category,
            });
            flight_number += 1;
        }
    }
    rows
}

fn write_csv(rows: &[LaunchRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(rows: &[LaunchRow], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.launch_site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version_category),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "spacex_launch_dash.csv")?;
    write_parquet(&rows, "spacex_launch_dash.parquet")?;

    log::info!("generated {} launches", rows.len());
    println!(
        "Wrote {} launches from {} sites to spacex_launch_dash.csv and spacex_launch_dash.parquet",
        rows.len(),
        SITES.len()
    );
    Ok(())
}
