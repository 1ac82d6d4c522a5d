//! Fuzz target for scoring arithmetic.
//!
//! Arbitrary impacts, baselines, and floors must never overflow or panic, and a floor is honored.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_score
//! ```

#![no_main]

use arbitrary::Arbitrary;
use cloudscore_domain::ScorePolicy;
use cloudscore_domain::scoring::{Penalty, score_from_penalty};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    impacts: Vec<u32>,
    baseline: i64,
    floor: Option<i64>,
}

fuzz_target!(|input: Input| {
    let penalty: Penalty = input.impacts.iter().map(|&i| Penalty(u64::from(i))).sum();
    let policy = ScorePolicy {
        baseline: input.baseline,
        floor: input.floor,
    };
    let score = score_from_penalty(penalty, &policy);
    if let Some(floor) = input.floor {
        assert!(score >= floor);
    }
});
