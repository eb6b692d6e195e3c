//! Sample stores: raw readings per sensor before resampling
//!
//! Upstream parsing hands the engine one batch of `(timestamp, value)` pairs
//! per sensor column. Timestamps that failed to parse arrive as `None` and are
//! dropped here, so nothing downstream ever sees an invalid instant.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use quartergrid_core::{SampleSet, Value};
//!
//! let t = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(12, 15, 0);
//!
//! let mut samples = SampleSet::new();
//! let store = samples.sensor("AHU-1 Supply Temp");
//! store.ingest(t, Some(Value::Number(55.2)));
//! store.ingest(None, Some(Value::Number(55.4))); // unparseable timestamp
//!
//! assert_eq!(samples.len(), 1);
//! assert_eq!(samples.dropped_samples(), 1);
//! ```

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Reading carried by a sample or a matched cell
///
/// Status points export text ("on", "off", "alarm") while meters export
/// numbers. A missing reading is `Option::None`, never a `Value`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Numeric reading
    Number(f64),
    /// Free-form text reading
    Text(String),
}

impl Value {
    /// Numeric interpretation of the reading
    ///
    /// Text parses after trimming whitespace. NaN and infinities are not
    /// numbers for classification purposes.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => *n,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        n.is_finite().then_some(n)
    }

    /// Check if the reading is a numeric zero
    pub fn is_zero(&self) -> bool {
        self.as_number() == Some(0.0)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Single raw reading with a valid timestamp
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// When the logger recorded the reading
    pub timestamp: Timestamp,
    /// Reading, `None` for a missing marker
    pub value: Option<Value>,
}

impl Sample {
    /// Sample with NaN values normalised to missing
    pub fn new(timestamp: Timestamp, value: Option<Value>) -> Self {
        Self { timestamp, value: normalize(value) }
    }

    /// Check if the sample can satisfy a match
    ///
    /// NaN never counts, even on a sample built field by field or deserialized.
    pub fn has_value(&self) -> bool {
        !is_missing_marker(&self.value)
    }
}

/// NaN numbers are missing markers, not readings
fn is_missing_marker(value: &Option<Value>) -> bool {
    match value {
        None => true,
        Some(Value::Number(n)) => n.is_nan(),
        Some(Value::Text(_)) => false,
    }
}

fn normalize(value: Option<Value>) -> Option<Value> {
    if is_missing_marker(&value) {
        None
    } else {
        value
    }
}

/// Dense handle for a sensor, assigned in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorId(usize);

impl SensorId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Column position of the sensor in every table built from the set
    pub fn index(self) -> usize {
        self.0
    }
}

/// Raw readings for one sensor
///
/// Order is ingest order; timestamps may repeat or run backwards. The matcher
/// builds its own sorted index, so the store never reorders.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleStore {
    name: String,
    samples: Vec<Sample>,
    dropped: usize,
}

impl SampleStore {
    /// Empty store for a sensor
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            samples: Vec::new(),
            dropped: 0,
        }
    }

    /// Sensor name (unique within a [`SampleSet`])
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a parsed sample, normalising a NaN reading to missing
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(Sample::new(sample.timestamp, sample.value));
    }

    /// Add a reading whose timestamp may have failed to parse
    ///
    /// Returns `false` when the reading was dropped.
    pub fn ingest(&mut self, timestamp: Option<Timestamp>, value: Option<Value>) -> bool {
        match timestamp {
            Some(ts) => {
                self.samples.push(Sample::new(ts, value));
                true
            }
            None => {
                self.dropped += 1;
                false
            }
        }
    }

    /// Number of readings rejected for an invalid timestamp
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Readings in ingest order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of readings kept
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if no readings were kept
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Earliest and latest timestamp, including readings with missing values
    pub fn time_bounds(&self) -> Option<(Timestamp, Timestamp)> {
        let mut iter = self.samples.iter().map(|s| s.timestamp);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts))))
    }

    fn absorb(&mut self, other: SampleStore) {
        for sample in other.samples {
            self.push(sample);
        }
        self.dropped += other.dropped;
    }
}

impl<V: Into<Value>> Extend<(Option<Timestamp>, Option<V>)> for SampleStore {
    fn extend<I: IntoIterator<Item = (Option<Timestamp>, Option<V>)>>(&mut self, iter: I) {
        for (ts, value) in iter {
            self.ingest(ts, value.map(Into::into));
        }
    }
}

/// Every sensor's store, keyed by unique sensor name
///
/// Columns in resampled output follow insertion order here. Adding a store
/// under an existing name merges readings into that sensor, matching how
/// several export files covering different periods of the same point combine.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleSet {
    stores: Vec<SampleStore>,
    index: BTreeMap<String, SensorId>,
}

impl SampleSet {
    /// Empty set with no sensors
    pub fn new() -> Self {
        Self::default()
    }

    /// Store for `name`, created empty on first use
    pub fn sensor(&mut self, name: &str) -> &mut SampleStore {
        let id = match self.index.get(name).copied() {
            Some(id) => id,
            None => self.register(SampleStore::new(name)),
        };
        &mut self.stores[id.index()]
    }

    /// Add a whole store, merging with any sensor of the same name
    pub fn insert(&mut self, store: SampleStore) -> SensorId {
        match self.index.get(store.name()).copied() {
            Some(id) => {
                self.stores[id.index()].absorb(store);
                id
            }
            None => self.register(store),
        }
    }

    fn register(&mut self, store: SampleStore) -> SensorId {
        let id = SensorId::new(self.stores.len());
        self.index.insert(store.name().to_string(), id);
        self.stores.push(store);
        id
    }

    /// Look up a sensor's handle by name
    pub fn id_of(&self, name: &str) -> Option<SensorId> {
        self.index.get(name).copied()
    }

    /// Store for a handle issued by this set
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different set.
    pub fn store(&self, id: SensorId) -> &SampleStore {
        &self.stores[id.index()]
    }

    /// Iterate stores in column order
    pub fn iter(&self) -> impl Iterator<Item = (SensorId, &SampleStore)> {
        self.stores
            .iter()
            .enumerate()
            .map(|(i, store)| (SensorId::new(i), store))
    }

    /// Number of sensors
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Check if the set has no sensors
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Earliest and latest timestamp across every sensor
    pub fn time_bounds(&self) -> Option<(Timestamp, Timestamp)> {
        self.stores
            .iter()
            .filter_map(SampleStore::time_bounds)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// Readings rejected for invalid timestamps across every sensor
    pub fn dropped_samples(&self) -> usize {
        self.stores.iter().map(SampleStore::dropped).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn numeric_interpretation() {
        assert_eq!(Value::Number(4.5).as_number(), Some(4.5));
        assert_eq!(Value::from(" 12.25 ").as_number(), Some(12.25));
        assert_eq!(Value::from("off").as_number(), None);
        assert_eq!(Value::Number(f64::INFINITY).as_number(), None);

        assert!(Value::Number(0.0).is_zero());
        assert!(Value::from("0").is_zero());
        assert!(!Value::from("zero").is_zero());
    }

    #[test]
    fn nan_becomes_missing() {
        let sample = Sample::new(at(12, 0, 0), Some(Value::Number(f64::NAN)));
        assert!(!sample.has_value());

        // Literal zero is a reading, not a missing marker
        let zero = Sample::new(at(12, 0, 0), Some(Value::Number(0.0)));
        assert!(zero.has_value());
    }

    #[test]
    fn pushed_nan_becomes_missing() {
        let mut store = SampleStore::new("Chiller kW");
        store.push(Sample {
            timestamp: at(12, 0, 0),
            value: Some(Value::Number(f64::NAN)),
        });
        assert_eq!(store.samples()[0].value, None);

        // Built field by field and never normalised
        let raw = Sample {
            timestamp: at(12, 0, 0),
            value: Some(Value::Number(f64::NAN)),
        };
        assert!(!raw.has_value());
    }

    #[test]
    fn invalid_timestamps_are_dropped() {
        let mut store = SampleStore::new("Chiller kW");
        assert!(store.ingest(Some(at(12, 0, 0)), Some(Value::Number(1.0))));
        assert!(!store.ingest(None, Some(Value::Number(2.0))));

        assert_eq!(store.len(), 1);
        assert_eq!(store.dropped(), 1);
    }

    #[test]
    fn time_bounds_tolerate_disorder() {
        let mut store = SampleStore::new("RTU-3 Fan");
        store.extend([
            (Some(at(12, 10, 0)), Some(1.0)),
            (Some(at(11, 58, 0)), None),
            (Some(at(12, 3, 0)), Some(3.0)),
        ]);

        assert_eq!(store.time_bounds(), Some((at(11, 58, 0), at(12, 10, 0))));
    }

    #[test]
    fn same_name_merges() {
        let mut set = SampleSet::new();

        let mut jan = SampleStore::new("Boiler Temp");
        jan.push(Sample::new(at(1, 0, 0), Some(Value::Number(140.0))));
        let mut feb = SampleStore::new("Boiler Temp");
        feb.push(Sample::new(at(2, 0, 0), Some(Value::Number(150.0))));
        feb.ingest(None, None);

        let a = set.insert(jan);
        let b = set.insert(feb);

        assert_eq!(a, b);
        assert_eq!(set.len(), 1);
        assert_eq!(set.store(a).len(), 2);
        assert_eq!(set.dropped_samples(), 1);
    }

    #[test]
    fn ids_follow_insertion_order() {
        let mut set = SampleSet::new();
        set.sensor("Zone 2");
        set.sensor("Zone 1");
        set.sensor("Zone 2").ingest(Some(at(3, 0, 0)), None);

        assert_eq!(set.id_of("Zone 2").map(SensorId::index), Some(0));
        assert_eq!(set.id_of("Zone 1").map(SensorId::index), Some(1));
        assert_eq!(set.time_bounds(), Some((at(3, 0, 0), at(3, 0, 0))));

        let names: Vec<&str> = set.iter().map(|(_, s)| s.name()).collect();
        assert_eq!(names, ["Zone 2", "Zone 1"]);
    }
}
