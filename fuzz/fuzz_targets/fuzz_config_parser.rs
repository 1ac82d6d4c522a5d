//! Fuzz target for `cloudscore.toml` parsing and resolution.
//!
//! Goal: parsing and resolution should **never panic** on any input.
//! They may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(cfg) = cloudscore_settings::parse_config_toml(text) {
            let _ =
                cloudscore_settings::resolve_config(cfg, cloudscore_settings::Overrides::default());
        }
    }
});
