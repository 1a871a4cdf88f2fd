#![no_main]

use chrono::FixedOffset;
use downtime_ledger::timestamp::{parse_local, parse_utc_offset};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Neither parser may panic on arbitrary text
        let _ = parse_utc_offset(input);
        if let Some(offset) = FixedOffset::east_opt(8 * 3600) {
            let _ = parse_local(input, offset);
        }
    }
});
