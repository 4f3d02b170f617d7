//! Writes a synthetic `all_data.csv` with the column layout of the merged
//! Beijing multi-site air-quality dataset, for trying the dashboard out.

use std::f64::consts::PI;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Timelike};

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
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

/// Station name and a multiplier on its pollution level.
const STATIONS: [(&str, f64); 4] = [
    ("Aotizhongxin", 1.15),
    ("Changping", 0.9),
    ("Dingling", 0.75),
    ("Dongsi", 1.25),
];

const WIND_DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
const HOURS_BETWEEN_READINGS: i64 = 3;
const MISSING_RATE: f64 = 0.02;
const OUTPUT_PATH: &str = "all_data.csv";

fn cell(rng: &mut SimpleRng, value: f64) -> String {
    if rng.next_f64() < MISSING_RATE {
        String::new()
    } else {
        format!("{:.1}", value.max(0.0))
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;

    writer.write_record([
        "No", "year", "month", "day", "hour", "PM2.5", "PM10", "SO2", "NO2", "CO", "O3", "TEMP",
        "PRES", "DEWP", "RAIN", "wd", "WSPM", "station", "datetime",
    ])?;

    let start = NaiveDate::from_ymd_opt(2013, 3, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(2017, 3, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid end date")?;

    let mut rows = 0u64;
    for &(station, level) in &STATIONS {
        let mut t = start;
        while t < end {
            // Cold, dry winters with heating emissions; hot, wet summers with ozone.
            let phase = 2.0 * PI * (t.ordinal0() as f64 / 365.0);
            let winter = phase.cos();
            let temp = rng.gauss(13.0 - 15.0 * winter, 3.0);
            let dewp = rng.gauss(temp - 12.0 + 4.0 * (-winter), 2.5);
            let pres = rng.gauss(1012.0 + 12.0 * winter, 3.0);
            let wspm = rng.gauss(1.8 + 0.6 * winter, 0.8).max(0.0);
            let rain = if winter < -0.3 && rng.next_f64() < 0.12 {
                rng.gauss(2.0, 1.5).max(0.0)
            } else {
                0.0
            };

            let stagnation = 1.0 + 0.6 * winter - 0.3 * (wspm - 1.8);
            let pm25 = rng.gauss(75.0 * level * stagnation, 20.0);
            let pm10 = pm25 * rng.gauss(1.3, 0.1);
            let so2 = rng.gauss(14.0 * level * (1.0 + winter), 4.0);
            let no2 = rng.gauss(48.0 * level * (1.0 + 0.3 * winter), 10.0);
            let co = rng.gauss(1200.0 * level * stagnation, 250.0);
            let o3 = rng.gauss(60.0 - 40.0 * winter + 1.5 * (temp - 13.0), 12.0);

            rows += 1;
            writer.write_record(&[
                rows.to_string(),
                t.year().to_string(),
                t.month().to_string(),
                t.day().to_string(),
                t.hour().to_string(),
                cell(&mut rng, pm25),
                cell(&mut rng, pm10),
                cell(&mut rng, so2),
                cell(&mut rng, no2),
                cell(&mut rng, co),
                cell(&mut rng, o3),
                format!("{temp:.1}"),
                format!("{pres:.1}"),
                format!("{dewp:.1}"),
                format!("{rain:.1}"),
                WIND_DIRECTIONS[(rng.next_u64() % 8) as usize].to_string(),
                format!("{wspm:.1}"),
                station.to_string(),
                t.format("%Y-%m-%d %H:%M:%S").to_string(),
            ])?;

            t += Duration::hours(HOURS_BETWEEN_READINGS);
        }
    }

    writer.flush()?;
    println!("Wrote {rows} observations for {} stations to {OUTPUT_PATH}", STATIONS.len());
    Ok(())
}
