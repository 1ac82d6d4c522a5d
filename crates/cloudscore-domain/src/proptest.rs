//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Score bounds and the impact invariant for every status
//! - Determinism of repeated evaluation
//! - Order independence of the score

use crate::cancel::CancelToken;
use crate::check::{CheckError, CheckOutcome, ProviderContext};
use crate::engine::{Evaluator, evaluate};
use crate::model::{Asset, Catalog, Control, Criterion};
use crate::policy::{EffectiveConfig, ScorePolicy};
use crate::registry::CheckRegistry;
use crate::test_support::{asset, sequential_config};
use cloudscore_types::ComplianceStatus;
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_status() -> impl Strategy<Value = ComplianceStatus> {
    prop_oneof![
        Just(ComplianceStatus::Compliant),
        Just(ComplianceStatus::NotCompliant),
        Just(ComplianceStatus::NotApplicable),
        Just(ComplianceStatus::NoCheck),
    ]
}

/// A criterion plus the behavior of its check: `None` means no check is registered.
fn arb_criterion() -> impl Strategy<Value = (u32, Option<(ComplianceStatus, u32)>)> {
    (0u32..60, prop::option::of((arb_status(), 0u32..200)))
}

/// Policies whose floor, when present, sits at or below the baseline.
fn arb_policy() -> impl Strategy<Value = ScorePolicy> {
    (-50i64..200)
        .prop_flat_map(|baseline| {
            (
                Just(baseline),
                prop::option::of((baseline - 300)..=baseline),
            )
        })
        .prop_map(|(baseline, floor)| ScorePolicy { baseline, floor })
}

fn arb_controls() -> impl Strategy<Value = Vec<Vec<(u32, Option<(ComplianceStatus, u32)>)>>> {
    prop::collection::vec(prop::collection::vec(arb_criterion(), 0..6), 0..5)
}

/// Build a catalog whose check ids encode the canned outcome, and a registry that serves it.
fn build(
    controls: &[Vec<(u32, Option<(ComplianceStatus, u32)>)>],
) -> (Catalog, CheckRegistry) {
    let mut registry = CheckRegistry::new();
    let mut catalog_controls = Vec::new();

    for (ci, criteria) in controls.iter().enumerate() {
        let mut built = Vec::new();
        for (ki, (impact, behavior)) in criteria.iter().enumerate() {
            let check_id = format!("check_{ci}_{ki}");
            if let Some((status, reported_impact)) = behavior {
                let outcome = CheckOutcome {
                    status: *status,
                    response: "canned".to_string(),
                    impact: *reported_impact,
                };
                registry
                    .register(
                        check_id.clone(),
                        move |_: &Asset, _: &Criterion, _: &ProviderContext| -> Result<CheckOutcome, CheckError> {
                            Ok(outcome.clone())
                        },
                    )
                    .expect("unique check ids");
            }
            built.push(Criterion {
                check_id,
                description: format!("criterion {ci}.{ki}"),
                impact: *impact,
            });
        }
        catalog_controls.push(Control {
            id: format!("control_{ci}"),
            name: None,
            description: "generated".to_string(),
            criteria: built,
        });
    }

    (
        Catalog::new(catalog_controls).expect("generated catalog is valid"),
        registry,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn score_never_exceeds_baseline(controls in arb_controls(), policy in arb_policy()) {
        let (catalog, registry) = build(&controls);
        let cfg = EffectiveConfig {
            scoring: policy,
            ..sequential_config()
        };
        let eval = Evaluator::new(&catalog, &registry, &cfg).evaluate_asset(&asset("a"), &CancelToken::new());
        prop_assert!(eval.score <= cfg.scoring.baseline);
        if let Some(floor) = cfg.scoring.floor {
            prop_assert!(eval.score >= floor);
        }
    }

    #[test]
    fn only_not_compliant_results_carry_impact(controls in arb_controls()) {
        let (catalog, registry) = build(&controls);
        let cfg = sequential_config();
        let eval = Evaluator::new(&catalog, &registry, &cfg).evaluate_asset(&asset("a"), &CancelToken::new());

        for ((_, criterion), result) in catalog.criteria().zip(&eval.results) {
            if result.status == ComplianceStatus::NotCompliant {
                prop_assert_eq!(result.impact, criterion.impact);
            } else {
                prop_assert_eq!(result.impact, 0);
            }
        }
        prop_assert_eq!(eval.results.len(), catalog.criteria_count());
    }

    #[test]
    fn evaluation_is_deterministic(controls in arb_controls()) {
        let (catalog, registry) = build(&controls);
        let cfg = sequential_config();
        let evaluator = Evaluator::new(&catalog, &registry, &cfg);
        let first = evaluator.evaluate_asset(&asset("a"), &CancelToken::new());
        let second = evaluator.evaluate_asset(&asset("a"), &CancelToken::new());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn permuting_criteria_keeps_score(controls in arb_controls(), seed in any::<u64>()) {
        let (catalog, registry) = build(&controls);
        let cfg = sequential_config();

        let permuted: Vec<Control> = catalog
            .controls()
            .iter()
            .map(|c| {
                let mut c = c.clone();
                if !c.criteria.is_empty() {
                    let len = c.criteria.len();
                    c.criteria.rotate_left((seed as usize) % len);
                    if seed % 2 == 1 {
                        c.criteria.reverse();
                    }
                }
                c
            })
            .collect();
        let permuted = Catalog::new(permuted).expect("permutation keeps validity");

        let a = Evaluator::new(&catalog, &registry, &cfg).evaluate_asset(&asset("a"), &CancelToken::new());
        let b = Evaluator::new(&permuted, &registry, &cfg).evaluate_asset(&asset("a"), &CancelToken::new());
        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn unresolved_checks_never_subtract(impacts in prop::collection::vec(0u32..500, 0..10)) {
        let criteria = impacts
            .iter()
            .enumerate()
            .map(|(i, impact)| Criterion {
                check_id: format!("missing_{i}"),
                description: "unwired".to_string(),
                impact: *impact,
            })
            .collect();
        let catalog = Catalog::new(vec![Control {
            id: "c".to_string(),
            name: None,
            description: "c".to_string(),
            criteria,
        }])
        .expect("valid");
        let registry = CheckRegistry::new();
        let cfg = sequential_config();

        let report = evaluate(&[asset("a"), asset("b")], &catalog, &registry, &cfg, &CancelToken::new());
        for eval in &report.evaluations {
            prop_assert_eq!(eval.score, cfg.scoring.baseline);
            prop_assert!(eval.results.iter().all(|r| r.status == ComplianceStatus::NoCheck && r.impact == 0));
        }
    }
}
