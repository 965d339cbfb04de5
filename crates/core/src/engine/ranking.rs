use crate::config::EngineConfig;
use crate::domain::build::Build;
use crate::domain::upgrade::{Horizon, Objective, UpgradePath, UpgradeStep};
use crate::engine::{bottleneck, compatibility, simulate, wattage};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Aggregates `steps` and scores the build they produce.
pub fn finalize_path(base: &Build, horizon: Horizon, steps: Vec<UpgradeStep>) -> UpgradePath {
    let total_cost: Decimal = steps.iter().map(|s| s.cost).sum();
    let total_estimated_fps_gain_percent: f64 =
        steps.iter().map(|s| s.estimated_fps_gain_percent).sum();

    let simulated = simulate::apply_steps(base, &steps);
    let compatibility_warnings =
        compatibility::check_compatibility(&simulated).blocking_and_warning_reasons();

    UpgradePath {
        horizon,
        total_cost,
        total_estimated_fps_gain_percent,
        final_wattage: wattage::estimate_total_wattage(&simulated),
        compatibility_warnings,
        post_upgrade_bottleneck: bottleneck::analyse(&simulated),
        steps,
    }
}

/// Whether a finalized path is worth showing at all.
pub fn is_viable(config: &EngineConfig, path: &UpgradePath) -> bool {
    let no_op = path.total_cost <= Decimal::ZERO && path.total_estimated_fps_gain_percent <= 0.0;
    if no_op {
        return false;
    }

    let keyword = config.reject_keyword.to_lowercase();
    !path
        .compatibility_warnings
        .iter()
        .any(|w| w.to_lowercase().contains(&keyword))
}

fn fps_per_dollar(path: &UpgradePath) -> f64 {
    let cost = path.total_cost.to_f64().unwrap_or(0.0);
    if cost > 0.0 {
        path.total_estimated_fps_gain_percent / cost
    } else {
        0.0
    }
}

fn future_proof_score(path: &UpgradePath) -> f64 {
    path.total_estimated_fps_gain_percent * 0.5
        + path.post_upgrade_bottleneck.cpu_score as f64 * 0.25
        + path.post_upgrade_bottleneck.gpu_score as f64 * 0.25
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Orders paths by `objective`. The sort is stable, so ties keep their input order.
pub fn rank(objective: Objective, mut paths: Vec<UpgradePath>) -> Vec<UpgradePath> {
    match objective {
        Objective::All => paths.sort_by(|a, b| {
            desc(
                a.total_estimated_fps_gain_percent,
                b.total_estimated_fps_gain_percent,
            )
        }),
        Objective::FpsPerDollar => {
            paths.retain(|p| p.total_cost > Decimal::ZERO);
            paths.sort_by(|a, b| desc(fps_per_dollar(a), fps_per_dollar(b)));
        }
        Objective::MinWattage => paths.sort_by_key(|p| p.final_wattage),
        Objective::FutureProof => {
            paths.sort_by(|a, b| desc(future_proof_score(a), future_proof_score(b)))
        }
    }
    paths
}

/// Filter, rank and truncate one horizon's paths.
pub fn select(
    config: &EngineConfig,
    objective: Objective,
    paths: Vec<UpgradePath>,
    limit: usize,
) -> Vec<UpgradePath> {
    let viable: Vec<_> = paths.into_iter().filter(|p| is_viable(config, p)).collect();
    let mut ranked = rank(objective, viable);
    ranked.truncate(limit);
    ranked
}
