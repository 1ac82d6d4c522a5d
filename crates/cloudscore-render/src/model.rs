#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableStatus {
    Compliant,
    NotCompliant,
    NotApplicable,
    NoCheck,
}

impl RenderableStatus {
    pub fn label(self) -> &'static str {
        match self {
            RenderableStatus::Compliant => "PASS",
            RenderableStatus::NotCompliant => "FAIL",
            RenderableStatus::NotApplicable => "N/A",
            RenderableStatus::NoCheck => "NO CHECK",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderableCounts {
    pub compliant: u32,
    pub not_compliant: u32,
    pub not_applicable: u32,
    pub no_check: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableResult {
    pub control_id: String,
    pub check_id: String,
    pub description: String,
    pub status: RenderableStatus,
    pub response: String,
    pub impact: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableAsset {
    pub name: String,
    pub provider: String,
    pub kind: String,
    pub score: i64,
    pub counts: RenderableCounts,
    pub cancelled: bool,
    pub results: Vec<RenderableResult>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub profile: String,
    pub baseline: i64,
    pub score_floor: Option<i64>,
    pub controls: u32,
    pub criteria: u32,
    pub assets: Vec<RenderableAsset>,
}
