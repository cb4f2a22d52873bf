#![no_main]

use invariant_text::compare::{
    ends_with, equals, index_of_range, last_index_of_range, starts_with,
};
use invariant_text::StringComparison;
use libfuzzer_sys::fuzz_target;

const MAX_INPUT_BYTES: usize = 1024;

fuzz_target!(|bytes: &[u8]| {
    let Some((&seed, rest)) = bytes.split_first() else {
        return;
    };
    let capped = &rest[..rest.len().min(MAX_INPUT_BYTES)];
    let text = String::from_utf8_lossy(capped);
    let (haystack, needle) = text.split_once('\0').unwrap_or((&text, ""));

    let start = usize::from(seed) % (haystack.len() + 1);
    let count = haystack.len() - start;
    for mode in StringComparison::ALL {
        let _ = starts_with(Some(haystack), needle, mode);
        let _ = ends_with(Some(haystack), needle, mode);
        let _ = equals(Some(haystack), Some(needle), mode);
        if let Ok(Some(found)) = index_of_range(Some(haystack), needle, start, count, mode) {
            assert!(found >= start && found <= haystack.len());
        }
        if let Ok(Some(found)) = last_index_of_range(Some(haystack), needle, haystack.len(), count, mode) {
            assert!(found <= haystack.len());
        }
    }
});
