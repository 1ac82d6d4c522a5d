//! Fuzz target for control catalog JSON parsing.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_catalog_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = cloudscore_settings::parse_catalog_json(text);
    }
});
