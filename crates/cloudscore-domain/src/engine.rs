use crate::cancel::CancelToken;
use crate::check::{Check, CheckError, CheckOutcome, ProviderContext};
use crate::fingerprint::fingerprint_for_result;
use crate::model::{Asset, Catalog, Control, Criterion};
use crate::policy::EffectiveConfig;
use crate::registry::CheckRegistry;
use crate::report::{AssetEvaluation, DomainReport};
use cloudscore_types::{ComplianceResult, ComplianceStatus, ids};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Evaluate every asset against the full catalog.
///
/// Assets are independent: with `workers > 1` they run on a dedicated pool, but each asset's
/// results are produced by a single worker and come back in input order.
pub fn evaluate(
    assets: &[Asset],
    catalog: &Catalog,
    registry: &CheckRegistry,
    cfg: &EffectiveConfig,
    cancel: &CancelToken,
) -> DomainReport {
    let evaluator = Evaluator::new(catalog, registry, cfg);

    let evaluations = if cfg.workers > 1 && assets.len() > 1 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(cfg.workers)
            .thread_name(|i| format!("cloudscore-worker-{i}"))
            .build()
        {
            Ok(pool) => pool.install(|| {
                assets
                    .par_iter()
                    .map(|asset| evaluator.evaluate_asset(asset, cancel))
                    .collect()
            }),
            Err(err) => {
                tracing::warn!(error = %err, "worker pool unavailable; evaluating sequentially");
                evaluate_sequential(&evaluator, assets, cancel)
            }
        }
    } else {
        evaluate_sequential(&evaluator, assets, cancel)
    };

    let assets_cancelled = evaluations.iter().filter(|e| e.cancelled).count() as u32;

    DomainReport {
        evaluations,
        controls: catalog.controls().len() as u32,
        criteria: catalog.criteria_count() as u32,
        assets_cancelled,
    }
}

fn evaluate_sequential(
    evaluator: &Evaluator<'_>,
    assets: &[Asset],
    cancel: &CancelToken,
) -> Vec<AssetEvaluation> {
    assets
        .iter()
        .map(|asset| evaluator.evaluate_asset(asset, cancel))
        .collect()
}

/// Walks the catalog for one asset at a time.
#[derive(Clone, Copy, Debug)]
pub struct Evaluator<'a> {
    catalog: &'a Catalog,
    registry: &'a CheckRegistry,
    cfg: &'a EffectiveConfig,
}

impl<'a> Evaluator<'a> {
    pub fn new(catalog: &'a Catalog, registry: &'a CheckRegistry, cfg: &'a EffectiveConfig) -> Self {
        Self {
            catalog,
            registry,
            cfg,
        }
    }

    pub fn evaluate_asset(&self, asset: &Asset, cancel: &CancelToken) -> AssetEvaluation {
        let span = tracing::info_span!("asset", provider = %asset.provider, name = %asset.name);
        let _enter = span.enter();

        let mut results = Vec::with_capacity(self.catalog.criteria_count());
        let mut cancelled = cancel.is_cancelled();

        if !cancelled {
            for (control, criterion) in self.catalog.criteria() {
                if cancel.is_cancelled() {
                    cancelled = true;
                    break;
                }
                results.push(self.evaluate_criterion(asset, control, criterion));
            }
        }

        let evaluation =
            AssetEvaluation::new(asset.to_ref(), results, &self.cfg.scoring, cancelled);
        if cancelled {
            tracing::warn!(
                evaluated = evaluation.results.len(),
                "evaluation cancelled before completion"
            );
        } else {
            tracing::info!(
                score = evaluation.score,
                not_compliant = evaluation.counts.not_compliant,
                "asset evaluated"
            );
        }
        evaluation
    }

    pub fn evaluate_criterion(
        &self,
        asset: &Asset,
        control: &Control,
        criterion: &Criterion,
    ) -> ComplianceResult {
        let outcome = match criterion.check_id.as_str() {
            ids::CHECK_NOT_APPLICABLE => CheckOutcome::not_applicable(ids::RESPONSE_NOT_APPLICABLE),
            ids::CHECK_TO_BE_IMPLEMENTED => no_check(ids::RESPONSE_TO_BE_IMPLEMENTED),
            id => match self.registry.resolve(id) {
                None => {
                    tracing::debug!(check_id = id, "no check registered");
                    no_check(ids::RESPONSE_NO_CHECK)
                }
                Some(check) => {
                    match invoke(check, asset, criterion, &self.cfg.provider, self.cfg.check_timeout)
                    {
                        Ok(outcome) => outcome,
                        Err(err) => {
                            tracing::warn!(check_id = id, error = %err, "check failed");
                            CheckOutcome::not_compliant(criterion, err.to_string())
                        }
                    }
                }
            },
        };

        let impact = normalized_impact(outcome.status, criterion);
        if impact != outcome.impact {
            tracing::debug!(
                check_id = %criterion.check_id,
                reported = outcome.impact,
                applied = impact,
                "check impact normalized"
            );
        }

        tracing::debug!(
            control_id = %control.id,
            check_id = %criterion.check_id,
            status = outcome.status.as_str(),
            "criterion evaluated"
        );

        ComplianceResult {
            control_id: control.id.clone(),
            check_id: criterion.check_id.clone(),
            description: criterion.description.clone(),
            status: outcome.status,
            response: outcome.response,
            impact,
            fingerprint: Some(fingerprint_for_result(
                &asset.provider,
                &asset.name,
                &control.id,
                &criterion.check_id,
            )),
        }
    }
}

fn no_check(response: &str) -> CheckOutcome {
    CheckOutcome {
        status: ComplianceStatus::NoCheck,
        response: response.to_string(),
        impact: 0,
    }
}

/// The declared impact for non-compliant results, zero for everything else.
fn normalized_impact(status: ComplianceStatus, criterion: &Criterion) -> u32 {
    match status {
        ComplianceStatus::NotCompliant => criterion.impact,
        _ => 0,
    }
}

fn invoke(
    check: &Arc<dyn Check>,
    asset: &Asset,
    criterion: &Criterion,
    ctx: &ProviderContext,
    timeout: Option<Duration>,
) -> Result<CheckOutcome, CheckError> {
    match timeout {
        Some(limit) => invoke_with_deadline(Arc::clone(check), asset, criterion, ctx, limit),
        None => invoke_inline(check.as_ref(), asset, criterion, ctx),
    }
}

fn invoke_inline(
    check: &dyn Check,
    asset: &Asset,
    criterion: &Criterion,
    ctx: &ProviderContext,
) -> Result<CheckOutcome, CheckError> {
    panic::catch_unwind(AssertUnwindSafe(|| check.evaluate(asset, criterion, ctx))).unwrap_or_else(
        |payload| {
            Err(CheckError::Panicked {
                message: panic_message(payload.as_ref()),
            })
        },
    )
}

/// Run the check on a helper thread and stop waiting once `limit` elapses.
///
/// A check that overruns keeps its thread until it returns; its result is discarded.
fn invoke_with_deadline(
    check: Arc<dyn Check>,
    asset: &Asset,
    criterion: &Criterion,
    ctx: &ProviderContext,
    limit: Duration,
) -> Result<CheckOutcome, CheckError> {
    let (tx, rx) = mpsc::sync_channel(1);
    let owned_asset = asset.clone();
    let owned_criterion = criterion.clone();
    let owned_ctx = ctx.clone();

    let spawned = thread::Builder::new()
        // Check ids come from user input and may not be valid thread names.
        .name("cloudscore-check".to_string())
        .spawn(move || {
            let outcome = invoke_inline(check.as_ref(), &owned_asset, &owned_criterion, &owned_ctx);
            // The receiver is gone when the deadline already passed.
            let _ = tx.send(outcome);
        });
    if let Err(err) = spawned {
        return Err(CheckError::provider(format!("could not start check thread: {err}")));
    }

    match rx.recv_timeout(limit) {
        Ok(outcome) => outcome,
        Err(RecvTimeoutError::Timeout) => Err(CheckError::TimedOut {
            after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }),
        Err(RecvTimeoutError::Disconnected) => Err(CheckError::Panicked {
            message: "check thread exited without a result".to_string(),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
