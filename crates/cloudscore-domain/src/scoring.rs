//! Folding results into a score.
//!
//! `score = baseline - sum(impact of not_compliant results)`, optionally clamped to a floor.
//! The penalty is a plain sum, so partial penalties from any split of the results can be merged
//! in any order.

use crate::policy::ScorePolicy;
use cloudscore_types::{ComplianceResult, ComplianceStatus};
use std::iter::Sum;
use std::ops::Add;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Penalty(pub u64);

impl Penalty {
    pub fn of(result: &ComplianceResult) -> Self {
        match result.status {
            ComplianceStatus::NotCompliant => Penalty(u64::from(result.impact)),
            _ => Penalty(0),
        }
    }
}

impl Add for Penalty {
    type Output = Penalty;

    fn add(self, rhs: Penalty) -> Penalty {
        Penalty(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Penalty {
    fn sum<I: Iterator<Item = Penalty>>(iter: I) -> Penalty {
        iter.fold(Penalty::default(), Add::add)
    }
}

pub fn penalty(results: &[ComplianceResult]) -> Penalty {
    results.iter().map(Penalty::of).sum()
}

pub fn score_from_penalty(penalty: Penalty, policy: &ScorePolicy) -> i64 {
    let deducted = i64::try_from(penalty.0).unwrap_or(i64::MAX);
    let raw = policy.baseline.saturating_sub(deducted);
    match policy.floor {
        Some(floor) => raw.max(floor),
        None => raw,
    }
}

pub fn score(results: &[ComplianceResult], policy: &ScorePolicy) -> i64 {
    score_from_penalty(penalty(results), policy)
}
