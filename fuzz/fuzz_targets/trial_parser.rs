#![no_main]

use evalstats::replay::{parse_trials, summarize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary JSONL must parse or fail cleanly, never panic
    if let Ok(trials) = parse_trials(data) {
        let _ = summarize(&trials);
    }
});
