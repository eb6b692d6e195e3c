//! Synthetic logger output
//!
//! Building loggers sample on their own schedule and drift. The generator
//! reproduces that: a nominal interval, per-sample jitter, occasional gaps and
//! the odd unparseable timestamp.

use chrono::{NaiveDateTime, TimeDelta};
use quartergrid_core::{SampleStore, Value};

/// Deterministic pseudo-random source (LCG)
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Uniform integer in `[lo, hi]`
    pub fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }
}

/// Shape of one simulated logger
pub struct LoggerModel {
    /// Nominal spacing between readings (seconds)
    pub interval_s: i64,
    /// Maximum jitter either side of the nominal time (seconds)
    pub jitter_s: i64,
    /// Probability a reading is missing from the export
    pub gap_probability: f64,
    /// Probability a reading's timestamp failed to parse upstream
    pub bad_timestamp_probability: f64,
}

impl LoggerModel {
    /// One-minute trend log with a few seconds of drift
    pub fn trend_log() -> Self {
        Self {
            interval_s: 60,
            jitter_s: 5,
            gap_probability: 0.01,
            bad_timestamp_probability: 0.0,
        }
    }

    /// Five-minute controller log with sloppy clocks and export glitches
    pub fn zone_controller() -> Self {
        Self {
            interval_s: 300,
            jitter_s: 40,
            gap_probability: 0.05,
            bad_timestamp_probability: 0.01,
        }
    }
}

/// Generate `count` readings starting at `start`; `value_at(i)` gives reading `i`
pub fn generate<F>(
    name: &str,
    start: NaiveDateTime,
    count: usize,
    model: &LoggerModel,
    seed: u32,
    mut value_at: F,
) -> SampleStore
where
    F: FnMut(usize) -> Option<Value>,
{
    let mut rng = Lcg::new(seed);
    let mut store = SampleStore::new(name);

    for i in 0..count {
        let value = value_at(i);
        if rng.next_f64() < model.gap_probability {
            continue;
        }

        let nominal = start + TimeDelta::seconds(model.interval_s * i as i64);
        let ts = nominal + TimeDelta::seconds(rng.range(-model.jitter_s, model.jitter_s));

        if rng.next_f64() < model.bad_timestamp_probability {
            store.ingest(None, value);
        } else {
            store.ingest(Some(ts), value);
        }
    }

    store
}

/// Slowly varying analog reading, e.g. a supply air temperature
pub fn analog(base: f64) -> impl FnMut(usize) -> Option<Value> {
    move |i| Some(Value::Number(base + (i % 17) as f64 * 0.25))
}
