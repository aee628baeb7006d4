//! The recorded measurement tables, defined once and referenced by every
//! chart binary.
//!
//! Each row is `(variant, key, [observations])`. For size-indexed tables
//! the observations run over thread counts {1, 2, 4, 8} ascending; for the
//! thread-indexed latency table they run over message sizes
//! {512, 4096, 16384, 65536} ascending.

use crate::dataset::{KeyAxis, MeasurementTable};
use crate::Variant::{self, OneCopy, TwoCopy, ZeroCopy};

type Row = (Variant, u64, [f64; 4]);

/// Throughput in Gbps by message size
const THROUGHPUT_GBPS: &[Row] = &[
    (TwoCopy, 512, [1.14, 1.11, 1.10, 0.45]),
    (TwoCopy, 4096, [2.79, 2.74, 3.12, 2.42]),
    (TwoCopy, 16384, [5.13, 4.93, 4.81, 4.88]),
    (TwoCopy, 65536, [17.80, 16.37, 15.68, 11.84]),
    (OneCopy, 512, [5.44, 3.97, 3.29, 1.94]),
    (OneCopy, 4096, [8.82, 8.11, 8.26, 6.62]),
    (OneCopy, 16384, [30.61, 29.48, 22.12, 15.36]),
    (OneCopy, 65536, [66.42, 62.95, 58.63, 23.73]),
    (ZeroCopy, 512, [1.11, 1.07, 0.82, 0.52]),
    (ZeroCopy, 4096, [7.62, 7.09, 4.97, 3.30]),
    (ZeroCopy, 16384, [21.31, 22.49, 11.93, 8.53]),
    (ZeroCopy, 65536, [43.29, 42.14, 32.40, 21.42]),
];

/// Round-trip latency in microseconds by thread count
const LATENCY_US: &[Row] = &[
    (TwoCopy, 1, [3.59, 11.53, 25.39, 29.59]),
    (TwoCopy, 2, [3.65, 11.83, 26.61, 31.87]),
    (TwoCopy, 4, [3.67, 10.43, 26.64, 33.24]),
    (TwoCopy, 8, [10.22, 12.06, 29.82, 41.44]),
    (OneCopy, 1, [0.72, 3.44, 4.18, 7.85]),
    (OneCopy, 2, [1.01, 3.80, 3.90, 8.29]),
    (OneCopy, 4, [1.21, 3.93, 5.51, 8.85]),
    (OneCopy, 8, [2.34, 5.34, 9.52, 21.34]),
    (ZeroCopy, 1, [3.69, 4.45, 6.11, 12.19]),
    (ZeroCopy, 2, [3.81, 4.59, 5.76, 12.37]),
    (ZeroCopy, 4, [4.95, 6.58, 10.90, 15.99]),
    (ZeroCopy, 8, [7.53, 8.67, 15.72, 24.24]),
];

/// L1 data cache miss counts by message size (raw perf event counts)
const L1_MISSES: &[Row] = &[
    (TwoCopy, 512, [23771328.0, 31988864.0, 54179328.0, 136452096.0]),
    (TwoCopy, 4096, [44551168.0, 91164672.0, 166903808.0, 273631232.0]),
    (TwoCopy, 16384, [74483712.0, 134459392.0, 260493312.0, 561885184.0]),
    (TwoCopy, 65536, [156820480.0, 300072960.0, 656113664.0, 941666304.0]),
    (OneCopy, 512, [17920000.0, 61097984.0, 103023616.0, 182100992.0]),
    (OneCopy, 4096, [62771200.0, 117772288.0, 237477888.0, 586710016.0]),
    (OneCopy, 16384, [220381184.0, 427096064.0, 807477248.0, 1109671936.0]),
    (OneCopy, 65536, [384557056.0, 728868864.0, 1319116800.0, 1669746688.0]),
    (ZeroCopy, 512, [61038080.0, 111524864.0, 206301184.0, 293396480.0]),
    (ZeroCopy, 4096, [11679744.0, 25976832.0, 114208768.0, 328573952.0]),
    (ZeroCopy, 16384, [108863488.0, 278450176.0, 485511168.0, 472621056.0]),
    (ZeroCopy, 65536, [284319744.0, 541908992.0, 928440320.0, 728989696.0]),
];

/// Last-level cache miss counts by message size (raw perf event counts)
const LLC_MISSES: &[Row] = &[
    (TwoCopy, 512, [25976.0, 7595.0, 48480.0, 60426.0]),
    (TwoCopy, 4096, [16627.0, 31637.0, 63200.0, 341959.0]),
    (TwoCopy, 16384, [7475.0, 15220.0, 29947.0, 154512.0]),
    (TwoCopy, 65536, [34019.0, 57294.0, 536321.0, 657565.0]),
    (OneCopy, 512, [19936.0, 17820.0, 59523.0, 181891.0]),
    (OneCopy, 4096, [28669.0, 32671.0, 115625.0, 365891.0]),
    (OneCopy, 16384, [29534.0, 31218.0, 155823.0, 1044974.0]),
    (OneCopy, 65536, [14390.0, 30941.0, 397705.0, 2631778.0]),
    (ZeroCopy, 512, [12508.0, 7161.0, 24442.0, 21420.0]),
    (ZeroCopy, 4096, [69300.0, 169616.0, 315041.0, 265015.0]),
    (ZeroCopy, 16384, [117872.0, 107409.0, 190099.0, 793089.0]),
    (ZeroCopy, 65536, [14476.0, 34519.0, 410261.0, 1161740.0]),
];

/// CPU cycles consumed by message size
const CPU_CYCLES: &[Row] = &[
    (TwoCopy, 512, [13972770167.0, 28692780291.0, 54504495952.0, 81540568230.0]),
    (TwoCopy, 4096, [14927789872.0, 27973573322.0, 55917079158.0, 81560785563.0]),
    (TwoCopy, 16384, [14588386482.0, 28870177450.0, 56097193819.0, 81642950713.0]),
    (TwoCopy, 65536, [13180640500.0, 27113757114.0, 53342318579.0, 77603131070.0]),
    (OneCopy, 512, [11809235017.0, 27680433616.0, 51578599816.0, 73180988253.0]),
    (OneCopy, 4096, [14701606062.0, 28605870004.0, 55678894567.0, 81028802022.0]),
    (OneCopy, 16384, [14554223810.0, 28908480203.0, 55861261874.0, 76427318629.0]),
    (OneCopy, 65536, [14211251729.0, 27901124531.0, 54124496627.0, 71226394006.0]),
    (ZeroCopy, 512, [10594026780.0, 21221102993.0, 38753910838.0, 58185920132.0]),
    (ZeroCopy, 4096, [5407654129.0, 11434905885.0, 33417252100.0, 63604655080.0]),
    (ZeroCopy, 16384, [9885214037.0, 23495098094.0, 43376364747.0, 51076658470.0]),
    (ZeroCopy, 65536, [14686539779.0, 26415012426.0, 50977702631.0, 49914716310.0]),
];

/// Total bytes transferred by message size (pairs with [`CPU_CYCLES`])
const TOTAL_BYTES: &[Row] = &[
    (TwoCopy, 512, [285926400.0, 278128640.0, 275443200.0, 112805376.0]),
    (TwoCopy, 4096, [698077184.0, 686399488.0, 780300288.0, 606171136.0]),
    (TwoCopy, 16384, [1283325952.0, 1232699392.0, 1202814976.0, 1221083136.0]),
    (TwoCopy, 65536, [4452843520.0, 4094296064.0, 3921346560.0, 2961309696.0]),
    (OneCopy, 512, [1363700224.0, 992754688.0, 822206464.0, 485127168.0]),
    (OneCopy, 4096, [2205921280.0, 2028077056.0, 2064793600.0, 1655984128.0]),
    (OneCopy, 16384, [7654391808.0, 7372013568.0, 5535547392.0, 3851911168.0]),
    (OneCopy, 65536, [16608919552.0, 15743713280.0, 14667546624.0, 5939855360.0]),
    (ZeroCopy, 512, [276479488.0, 266907136.0, 205555712.0, 129507840.0]),
    (ZeroCopy, 4096, [1906024448.0, 1773109248.0, 1243619328.0, 825896960.0]),
    (ZeroCopy, 16384, [5329567744.0, 5625315328.0, 2983428096.0, 2134966272.0]),
    (ZeroCopy, 65536, [10826547200.0, 10538254336.0, 8103460864.0, 5373362176.0]),
];

pub fn throughput() -> MeasurementTable {
    build("throughput", "Gbps", KeyAxis::MessageSize, THROUGHPUT_GBPS)
}

pub fn latency() -> MeasurementTable {
    build("latency", "us", KeyAxis::ThreadCount, LATENCY_US)
}

pub fn l1_misses() -> MeasurementTable {
    build("l1_misses", "events", KeyAxis::MessageSize, L1_MISSES)
}

pub fn llc_misses() -> MeasurementTable {
    build("llc_misses", "events", KeyAxis::MessageSize, LLC_MISSES)
}

pub fn cpu_cycles() -> MeasurementTable {
    build("cpu_cycles", "cycles", KeyAxis::MessageSize, CPU_CYCLES)
}

pub fn total_bytes() -> MeasurementTable {
    build("total_bytes", "bytes", KeyAxis::MessageSize, TOTAL_BYTES)
}

fn build(
    metric: &'static str,
    unit: &'static str,
    axis: KeyAxis,
    rows: &[Row],
) -> MeasurementTable {
    let mut table = MeasurementTable::new(metric, unit, axis);
    for &(variant, key, obs) in rows {
        table.insert(variant, key, obs.to_vec());
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_are_complete() {
        for table in [
            throughput(),
            latency(),
            l1_misses(),
            llc_misses(),
            cpu_cycles(),
            total_bytes(),
        ] {
            table.validate().unwrap_or_else(|e| panic!("{e}"));
            assert_eq!(table.experiment_count(), 48, "{}", table.metric());
        }
    }

    #[test]
    fn test_cycles_and_bytes_pair_on_the_same_axis() {
        assert_eq!(cpu_cycles().axis(), total_bytes().axis());
    }

    #[test]
    fn test_throughput_spot_values() {
        let table = throughput();
        assert_eq!(
            table.observations(TwoCopy, 512).unwrap(),
            &[1.14, 1.11, 1.10, 0.45]
        );
        assert_eq!(
            table.observations(ZeroCopy, 65536).unwrap(),
            &[43.29, 42.14, 32.40, 21.42]
        );
    }

    #[test]
    fn test_latency_is_thread_indexed() {
        let table = latency();
        assert_eq!(table.axis(), KeyAxis::ThreadCount);
        assert_eq!(
            table.observations(OneCopy, 8).unwrap(),
            &[2.34, 5.34, 9.52, 21.34]
        );
    }
}
