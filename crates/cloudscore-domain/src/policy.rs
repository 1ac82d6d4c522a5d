use crate::check::ProviderContext;
use cloudscore_types::ids;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScorePolicy {
    pub baseline: i64,

    /// Lowest score reported. `None` lets scores go negative.
    pub floor: Option<i64>,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            baseline: ids::DEFAULT_BASELINE,
            floor: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub scoring: ScorePolicy,

    /// Per-check wall clock budget. `None` runs checks inline without a deadline.
    pub check_timeout: Option<Duration>,

    /// Assets evaluated at once. `1` keeps the fully sequential behavior.
    pub workers: usize,

    /// Keep per-criterion results in the report.
    pub include_results: bool,

    pub provider: ProviderContext,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            scoring: ScorePolicy::default(),
            check_timeout: Some(Duration::from_millis(30_000)),
            workers: 1,
            include_results: true,
            provider: ProviderContext::default(),
        }
    }
}
