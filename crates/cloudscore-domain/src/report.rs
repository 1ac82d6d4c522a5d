use crate::policy::ScorePolicy;
use crate::scoring;
use cloudscore_types::{AssetRef, AssetScore, ComplianceResult, StatusCounts};

/// Everything the engine learned about one asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetEvaluation {
    pub asset: AssetRef,
    /// Catalog order.
    pub results: Vec<ComplianceResult>,
    pub score: i64,
    pub counts: StatusCounts,
    pub cancelled: bool,
}

impl AssetEvaluation {
    pub fn new(
        asset: AssetRef,
        results: Vec<ComplianceResult>,
        policy: &ScorePolicy,
        cancelled: bool,
    ) -> Self {
        let score = scoring::score(&results, policy);
        let counts = StatusCounts::from_results(&results);
        Self {
            asset,
            results,
            score,
            counts,
            cancelled,
        }
    }

    pub fn into_asset_score(self, include_results: bool) -> AssetScore {
        AssetScore {
            asset: self.asset,
            score: self.score,
            counts: self.counts,
            cancelled: self.cancelled,
            results: if include_results {
                self.results
            } else {
                Vec::new()
            },
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DomainReport {
    /// One entry per input asset, in input order.
    pub evaluations: Vec<AssetEvaluation>,
    pub controls: u32,
    pub criteria: u32,
    pub assets_cancelled: u32,
}

