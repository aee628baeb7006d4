//! Measurement table type and its completeness validation.
//!
//! A table maps every implementation variant to one observation sequence
//! per canonical key. The cross product must be fully populated for the
//! aggregate averages to mean anything, so [`MeasurementTable::validate`]
//! runs before any reduction and reports the first hole it finds.

use crate::error::DataError;
use crate::{Variant, MESSAGE_SIZES, OBSERVATIONS_PER_CELL, THREAD_COUNTS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which independent variable a table's keys index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAxis {
    MessageSize,
    ThreadCount,
}

impl KeyAxis {
    /// Canonical key ordering for this axis (ascending)
    pub fn keys(&self) -> &'static [u64] {
        match self {
            KeyAxis::MessageSize => &MESSAGE_SIZES,
            KeyAxis::ThreadCount => &THREAD_COUNTS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KeyAxis::MessageSize => "message size",
            KeyAxis::ThreadCount => "thread count",
        }
    }
}

impl fmt::Display for KeyAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fixed benchmark measurement table: variant -> key -> observations.
///
/// Observation order within a cell follows the ascending order of the
/// secondary dimension (thread counts for size-indexed tables, message
/// sizes for the thread-indexed table).
#[derive(Debug, Clone)]
pub struct MeasurementTable {
    metric: &'static str,
    unit: &'static str,
    axis: KeyAxis,
    cells: BTreeMap<Variant, BTreeMap<u64, Vec<f64>>>,
}

impl MeasurementTable {
    pub fn new(metric: &'static str, unit: &'static str, axis: KeyAxis) -> Self {
        Self {
            metric,
            unit,
            axis,
            cells: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, variant: Variant, key: u64, observations: Vec<f64>) {
        self.cells
            .entry(variant)
            .or_default()
            .insert(key, observations);
    }

    pub fn observations(&self, variant: Variant, key: u64) -> Option<&[f64]> {
        self.cells
            .get(&variant)
            .and_then(|keys| keys.get(&key))
            .map(Vec::as_slice)
    }

    pub fn metric(&self) -> &'static str {
        self.metric
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }

    pub fn axis(&self) -> KeyAxis {
        self.axis
    }

    /// Total number of observations across all cells
    pub fn experiment_count(&self) -> usize {
        self.cells
            .values()
            .flat_map(|keys| keys.values())
            .map(Vec::len)
            .sum()
    }

    /// Fail-fast completeness check: every variant has an entry for every
    /// canonical key, and every entry holds exactly
    /// [`OBSERVATIONS_PER_CELL`] observations.
    pub fn validate(&self) -> Result<(), DataError> {
        for &variant in &Variant::ALL {
            for &key in self.axis.keys() {
                let obs = self.observations(variant, key).ok_or(DataError::MissingKey {
                    metric: self.metric,
                    variant,
                    axis: self.axis,
                    key,
                })?;
                if obs.len() != OBSERVATIONS_PER_CELL {
                    return Err(DataError::WrongArity {
                        metric: self.metric,
                        variant,
                        axis: self.axis,
                        key,
                        expected: OBSERVATIONS_PER_CELL,
                        actual: obs.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_table() -> MeasurementTable {
        let mut table = MeasurementTable::new("test_metric", "units", KeyAxis::MessageSize);
        for &variant in &Variant::ALL {
            for &key in KeyAxis::MessageSize.keys() {
                table.insert(variant, key, vec![1.0, 2.0, 3.0, 4.0]);
            }
        }
        table
    }

    #[test]
    fn test_complete_table_validates() {
        assert!(full_table().validate().is_ok());
    }

    #[test]
    fn test_experiment_count() {
        assert_eq!(full_table().experiment_count(), 48);
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let mut table = MeasurementTable::new("test_metric", "units", KeyAxis::MessageSize);
        for &variant in &Variant::ALL {
            for &key in KeyAxis::MessageSize.keys() {
                if variant == Variant::OneCopy && key == 4096 {
                    continue;
                }
                table.insert(variant, key, vec![1.0, 2.0, 3.0, 4.0]);
            }
        }
        let err = table.validate().unwrap_err();
        match err {
            DataError::MissingKey { variant, key, .. } => {
                assert_eq!(variant, Variant::OneCopy);
                assert_eq!(key, 4096);
            }
            other => panic!("expected MissingKey, got {other:?}"),
        }
    }

    #[test]
    fn test_short_cell_is_rejected() {
        let mut table = full_table();
        table.insert(Variant::ZeroCopy, 65536, vec![1.0, 2.0]);
        let err = table.validate().unwrap_err();
        match err {
            DataError::WrongArity {
                expected, actual, ..
            } => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 2);
            }
            other => panic!("expected WrongArity, got {other:?}"),
        }
    }

    #[test]
    fn test_thread_axis_keys() {
        assert_eq!(KeyAxis::ThreadCount.keys(), &[1, 2, 4, 8]);
        assert_eq!(KeyAxis::MessageSize.keys(), &[512, 4096, 16384, 65536]);
    }
}
