//! Fuzz target for asset inventory JSON parsing.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_inventory_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(assets) = cloudscore_settings::parse_inventory_json(text) {
            let mut seen = std::collections::BTreeSet::new();
            for asset in &assets {
                assert!(!asset.name.trim().is_empty());
                assert!(seen.insert(asset.identity()), "duplicate identity accepted");
            }
        }
    }
});
