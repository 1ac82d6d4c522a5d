use cloudscore_domain::{EffectiveConfig, ScorePolicy};

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into the config file.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        "default" => Some(default_profile()),
        "floored" => Some(floored_profile()),
        "parallel" => Some(parallel_profile()),
        _ => None,
    }
}

pub const PROFILES: [&str; 3] = ["default", "floored", "parallel"];

fn default_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "default".to_string(),
        ..EffectiveConfig::default()
    }
}

fn floored_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "floored".to_string(),
        scoring: ScorePolicy {
            floor: Some(0),
            ..ScorePolicy::default()
        },
        ..EffectiveConfig::default()
    }
}

fn parallel_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "parallel".to_string(),
        workers: 4,
        ..EffectiveConfig::default()
    }
}
