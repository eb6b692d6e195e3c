//! Named scenarios shared across integration tests

use quartergrid_core::{SampleSet, SampleStore, Value};

use super::at;

/// Two unsynchronised sensors around 12:15
///
/// `Sensor_A` logs exactly on the quarter hour; `Sensor_B` logs 90 seconds late.
pub fn unsynchronised_pair() -> SampleSet {
    let mut set = SampleSet::new();

    let a = set.sensor("Sensor_A");
    a.ingest(Some(at(12, 0, 0)), Some(Value::Number(190.0)));
    a.ingest(Some(at(12, 15, 0)), Some(Value::Number(200.0)));
    a.ingest(Some(at(12, 30, 0)), Some(Value::Number(210.0)));

    let b = set.sensor("Sensor_B");
    b.ingest(Some(at(12, 1, 30)), Some(Value::Number(240.0)));
    b.ingest(Some(at(12, 16, 30)), Some(Value::Number(250.0)));
    b.ingest(Some(at(12, 31, 30)), Some(Value::Number(260.0)));

    set
}

/// One reading per quarter hour, exactly aligned, starting at 12:00
pub fn aligned_series(name: &str, values: &[Option<f64>]) -> SampleStore {
    let mut store = SampleStore::new(name);
    for (i, v) in values.iter().enumerate() {
        let ts = at(12, 0, 0) + chrono::TimeDelta::minutes(15 * i as i64);
        store.ingest(Some(ts), v.map(Value::Number));
    }
    store
}

/// Status point exporting text, sitting at the same value all day
pub fn status_point(name: &str, rows: usize, text: &str) -> SampleStore {
    let mut store = SampleStore::new(name);
    for i in 0..rows {
        let ts = at(12, 0, 0) + chrono::TimeDelta::minutes(15 * i as i64);
        store.ingest(Some(ts), Some(Value::from(text)));
    }
    store
}
