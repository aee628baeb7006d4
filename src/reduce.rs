//! Reduction of measurement tables to one summary series per variant.
//!
//! Two reductions exist: the plain unweighted mean over a cell, and the
//! pairwise ratio-then-average used for cycles-per-byte. The ratio is
//! computed per observation before averaging; `mean(c_i / b_i)` is not
//! `mean(c_i) / mean(b_i)` and the former is the reported quantity.

use crate::dataset::MeasurementTable;
use crate::error::DataError;
use crate::{Variant, OBSERVATIONS_PER_CELL};
use serde::{Deserialize, Serialize};

/// One summary curve: (key, mean) pairs in canonical key order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub variant: Variant,
    pub points: Vec<(u64, f64)>,
}

/// Reduce a table to one mean series per variant, in display order.
pub fn mean_series(table: &MeasurementTable) -> Result<Vec<DerivedSeries>, DataError> {
    Variant::ALL
        .iter()
        .map(|&variant| {
            let points = table
                .axis()
                .keys()
                .iter()
                .map(|&key| {
                    let obs = cell(table, variant, key)?;
                    Ok((key, mean(obs)))
                })
                .collect::<Result<Vec<_>, DataError>>()?;
            Ok(DerivedSeries { variant, points })
        })
        .collect()
}

/// Reduce two paired tables to one ratio-then-average series per variant.
///
/// For each cell the pointwise ratios `numerator[i] / denominator[i]` are
/// computed first and then averaged. A zero denominator is a fatal
/// [`DataError::DivisionByZero`] rather than an Inf/NaN propagated into
/// the chart.
pub fn ratio_series(
    numerator: &MeasurementTable,
    denominator: &MeasurementTable,
) -> Result<Vec<DerivedSeries>, DataError> {
    if numerator.axis() != denominator.axis() {
        return Err(DataError::AxisMismatch {
            numerator: numerator.metric(),
            denominator: denominator.metric(),
        });
    }

    Variant::ALL
        .iter()
        .map(|&variant| {
            let points = numerator
                .axis()
                .keys()
                .iter()
                .map(|&key| {
                    let num = cell(numerator, variant, key)?;
                    let den = cell(denominator, variant, key)?;
                    let mut ratios = Vec::with_capacity(num.len());
                    for (index, (&n, &d)) in num.iter().zip(den.iter()).enumerate() {
                        if d == 0.0 {
                            return Err(DataError::DivisionByZero {
                                metric: denominator.metric(),
                                variant,
                                axis: denominator.axis(),
                                key,
                                index,
                            });
                        }
                        ratios.push(n / d);
                    }
                    Ok((key, mean(&ratios)))
                })
                .collect::<Result<Vec<_>, DataError>>()?;
            Ok(DerivedSeries { variant, points })
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn cell<'a>(
    table: &'a MeasurementTable,
    variant: Variant,
    key: u64,
) -> Result<&'a [f64], DataError> {
    let obs = table
        .observations(variant, key)
        .ok_or(DataError::MissingKey {
            metric: table.metric(),
            variant,
            axis: table.axis(),
            key,
        })?;
    if obs.len() != OBSERVATIONS_PER_CELL {
        return Err(DataError::WrongArity {
            metric: table.metric(),
            variant,
            axis: table.axis(),
            key,
            expected: OBSERVATIONS_PER_CELL,
            actual: obs.len(),
        });
    }
    Ok(obs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use crate::dataset::KeyAxis;

    const TOLERANCE: f64 = 1e-9;

    fn uniform_table(value: f64) -> MeasurementTable {
        let mut table = MeasurementTable::new("uniform", "units", KeyAxis::MessageSize);
        for &variant in &Variant::ALL {
            for &key in KeyAxis::MessageSize.keys() {
                table.insert(variant, key, vec![value; 4]);
            }
        }
        table
    }

    #[test]
    fn test_mean_of_four() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_mean_series_shape() {
        let series = mean_series(&uniform_table(3.0)).unwrap();
        assert_eq!(series.len(), 3);
        for s in &series {
            assert_eq!(s.points.len(), 4);
            assert!(s.points.iter().all(|&(_, v)| (v - 3.0).abs() < TOLERANCE));
        }
        // Canonical key order
        let keys: Vec<u64> = series[0].points.iter().map(|&(k, _)| k).collect();
        assert_eq!(keys, vec![512, 4096, 16384, 65536]);
    }

    #[test]
    fn test_mean_series_is_deterministic() {
        let table = data::throughput();
        let a = mean_series(&table).unwrap();
        let b = mean_series(&table).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_twocopy_throughput_reference_values() {
        let series = mean_series(&data::throughput()).unwrap();
        let twocopy = &series[0];
        assert_eq!(twocopy.variant, Variant::TwoCopy);
        let at_512 = twocopy.points[0].1;
        let at_65536 = twocopy.points[3].1;
        assert!((at_512 - 0.95).abs() < 1e-4, "got {at_512}");
        assert!((at_65536 - 15.4225).abs() < 1e-4, "got {at_65536}");
    }

    #[test]
    fn test_mean_series_fails_on_missing_key() {
        let mut table = MeasurementTable::new("holey", "units", KeyAxis::MessageSize);
        for &variant in &Variant::ALL {
            for &key in KeyAxis::MessageSize.keys() {
                if key == 4096 {
                    continue;
                }
                table.insert(variant, key, vec![1.0; 4]);
            }
        }
        let err = mean_series(&table).unwrap_err();
        assert!(err.to_string().contains("4096"), "{err}");
    }

    #[test]
    fn test_ratio_then_average() {
        let mut num = MeasurementTable::new("num", "units", KeyAxis::MessageSize);
        let mut den = MeasurementTable::new("den", "units", KeyAxis::MessageSize);
        for &variant in &Variant::ALL {
            for &key in KeyAxis::MessageSize.keys() {
                num.insert(variant, key, vec![10.0, 20.0, 30.0, 40.0]);
                den.insert(variant, key, vec![1.0, 2.0, 3.0, 8.0]);
            }
        }
        let series = ratio_series(&num, &den).unwrap();
        // mean(10/1, 20/2, 30/3, 40/8) = mean(10, 10, 10, 5) = 8.75
        let expected = 8.75;
        assert!((series[0].points[0].1 - expected).abs() < TOLERANCE);

        // Regression guard: the ratio of means is a different number on
        // non-uniform input, and must not be what we compute.
        let ratio_of_means = mean(&[10.0, 20.0, 30.0, 40.0]) / mean(&[1.0, 2.0, 3.0, 8.0]);
        assert!((expected - ratio_of_means).abs() > 1e-3);
    }

    #[test]
    fn test_onecopy_cycles_per_byte_reference_value() {
        let series = ratio_series(&data::cpu_cycles(), &data::total_bytes()).unwrap();
        let onecopy = &series[1];
        assert_eq!(onecopy.variant, Variant::OneCopy);

        let expected = (11809235017.0 / 1363700224.0
            + 27680433616.0 / 992754688.0
            + 51578599816.0 / 822206464.0
            + 73180988253.0 / 485127168.0)
            / 4.0;
        let got = onecopy.points[0].1;
        assert!((got - expected).abs() < TOLERANCE, "got {got}");

        // And it is not the cycles-sum over bytes-sum
        let pooled = (11809235017.0 + 27680433616.0 + 51578599816.0 + 73180988253.0)
            / (1363700224.0 + 992754688.0 + 822206464.0 + 485127168.0);
        assert!((got - pooled).abs() > 1.0);
    }

    #[test]
    fn test_zero_denominator_is_fatal() {
        let num = uniform_table(1.0);
        let mut den = uniform_table(1.0);
        den.insert(Variant::TwoCopy, 512, vec![1.0, 0.0, 1.0, 1.0]);
        let err = ratio_series(&num, &den).unwrap_err();
        match err {
            DataError::DivisionByZero { key, index, .. } => {
                assert_eq!(key, 512);
                assert_eq!(index, 1);
            }
            other => panic!("expected DivisionByZero, got {other:?}"),
        }
    }

    #[test]
    fn test_axis_mismatch_is_rejected() {
        let num = uniform_table(1.0);
        let mut den = MeasurementTable::new("den", "units", KeyAxis::ThreadCount);
        for &variant in &Variant::ALL {
            for &key in KeyAxis::ThreadCount.keys() {
                den.insert(variant, key, vec![1.0; 4]);
            }
        }
        assert!(matches!(
            ratio_series(&num, &den),
            Err(DataError::AxisMismatch { .. })
        ));
    }
}
