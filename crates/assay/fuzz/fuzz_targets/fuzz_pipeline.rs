//! Fuzz target for type inference and the analysis pipeline.
//!
//! Fuzzed text becomes the cells of a small sensor table, which is loaded
//! and analyzed. Errors are fine; panics and disordered quartiles are not.

#![no_main]

use assay::{Assay, Dataset};
use assay::input::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    // Each fuzzed line becomes one reading, repeated across three columns.
    let mut csv = String::from("timestamp\tvalue\tlevel\tnote\n");
    for (i, line) in content.lines().take(200).enumerate() {
        let cell = line.replace(['\t', '"'], " ");
        csv.push_str(&format!(
            "2025-01-30T{:02}:{:02}:00Z\t{}\t{}\t{}\n",
            (i / 60) % 24,
            i % 60,
            cell,
            cell.len(),
            cell
        ));
    }

    let Ok(table) = Parser::new().parse_str(&csv) else {
        return;
    };
    let Ok(dataset) = Dataset::from_table(&table, "timestamp") else {
        return;
    };
    if let Ok(report) = Assay::new().run(&dataset) {
        for stats in report.summary_statistics.values() {
            assert!(stats.min <= stats.p25 && stats.p25 <= stats.median);
            assert!(stats.median <= stats.p75 && stats.p75 <= stats.max);
        }
        serde_json::to_string(&report).expect("report serializes");
    }
});
