//! Assembles single steps into upgrade plans over three horizons.
//!
//! Every phase works on simulated copies of the build: the short-term phase branches from each
//! of the best immediate paths and the staged phase walks forward month by month, so all
//! intermediate builds are produced with [`simulate::apply_steps`] and never shared mutably.

use crate::catalog::cache::PartCache;
use crate::catalog::PartCatalog;
use crate::config::EngineConfig;
use crate::domain::analysis::Bottleneck;
use crate::domain::build::Build;
use crate::domain::part::{Category, Part};
use crate::domain::upgrade::{Horizon, Objective, UpgradePath, UpgradeStep};
use crate::engine::candidates::{self, CandidateMap};
use crate::engine::{bottleneck, ranking, simulate, steps};
use futures::stream::{self, StreamExt, TryStreamExt};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Immediate paths the short-term phase extends.
const SHORT_TERM_BRANCHES: usize = 3;
/// Candidates tried per category when extending a branch.
const SHORT_TERM_CANDIDATES_PER_CATEGORY: usize = 3;
const STAGED_PRIMARY_CANDIDATES: usize = 2;
const STAGED_SECONDARY_CATEGORIES: usize = 2;
/// Secondary categories in preference order.
const STAGED_SECONDARY_ORDER: [Category; 4] =
    [Category::Cpu, Category::Gpu, Category::Ram, Category::Storage];

pub struct PathPlanner<'r, 'c, C: ?Sized> {
    pub cache: &'r PartCache<'c, C>,
    pub config: &'r EngineConfig,
    pub objective: Objective,
}

impl<'r, 'c, C: PartCatalog + ?Sized> PathPlanner<'r, 'c, C> {
    /// One step each, paid from `budget_now`.
    pub fn immediate(
        &self,
        build: &Build,
        candidates: &CandidateMap,
        budget_now: Decimal,
    ) -> Vec<UpgradePath> {
        let mut paths = Vec::new();
        for (category, parts) in candidates {
            for part in parts {
                let Some(step) = steps::build_step(self.config, build, *category, part) else {
                    continue;
                };
                if step.cost > budget_now {
                    continue;
                }
                paths.push(ranking::finalize_path(build, Horizon::Immediate, vec![step]));
            }
        }

        tracing::debug!(considered = paths.len(), "immediate paths assembled");
        ranking::select(self.config, self.objective, paths, self.config.immediate_limit)
    }

    /// Extends each of the best immediate paths with a second step paid from `budget_later`.
    pub async fn short_term(
        &self,
        build: &Build,
        immediate: &[UpgradePath],
        budget_later: Decimal,
    ) -> anyhow::Result<Vec<UpgradePath>> {
        let firsts = immediate.iter().take(SHORT_TERM_BRANCHES);
        let branches: Vec<Vec<UpgradePath>> = stream::iter(firsts)
            .map(|first| self.extend_branch(build, first, budget_later))
            .buffered(self.config.branch_concurrency.max(1))
            .try_collect()
            .await?;

        let paths: Vec<UpgradePath> = branches.into_iter().flatten().collect();
        tracing::debug!(considered = paths.len(), "short-term paths assembled");
        Ok(ranking::select(
            self.config,
            self.objective,
            paths,
            self.config.short_term_limit,
        ))
    }

    async fn extend_branch(
        &self,
        build: &Build,
        first: &UpgradePath,
        budget_later: Decimal,
    ) -> anyhow::Result<Vec<UpgradePath>> {
        let Some(first_step) = first.steps.first() else {
            return Ok(Vec::new());
        };
        let used = first_step.category;
        let simulated = simulate::apply_steps(build, std::slice::from_ref(first_step));
        let candidates = candidates::gather_candidates(self.cache, self.config, &simulated).await?;

        let mut out = Vec::new();
        for (category, parts) in candidates.iter().filter(|(c, _)| **c != used) {
            for part in parts.iter().take(SHORT_TERM_CANDIDATES_PER_CATEGORY) {
                let Some(second) = steps::build_step(self.config, &simulated, *category, part)
                else {
                    continue;
                };
                if second.cost > budget_later {
                    continue;
                }
                out.push(ranking::finalize_path(
                    build,
                    Horizon::ShortTerm,
                    vec![first_step.clone(), second],
                ));
            }
        }
        Ok(out)
    }

    /// Multi-month plans: fix the current bottleneck now, then fill secondary categories
    /// first-fit from `budget_later`.
    pub async fn staged(
        &self,
        build: &Build,
        candidates: &CandidateMap,
        budget_now: Decimal,
        budget_later: Decimal,
    ) -> anyhow::Result<Vec<UpgradePath>> {
        let primary = primary_category(bottleneck::analyse(build).bottleneck);
        let secondary = secondary_categories(primary, candidates);

        let Some(primary_parts) = candidates.get(&primary) else {
            tracing::debug!(%primary, "no staged plans: primary category has no candidates");
            return Ok(Vec::new());
        };

        let plans: Vec<Option<UpgradePath>> =
            stream::iter(primary_parts.iter().take(STAGED_PRIMARY_CANDIDATES))
                .map(|part| {
                    self.stage_from(build, primary, part, &secondary, budget_now, budget_later)
                })
                .buffered(self.config.branch_concurrency.max(1))
                .try_collect()
                .await?;

        let paths: Vec<UpgradePath> = plans.into_iter().flatten().collect();
        tracing::debug!(%primary, ?secondary, considered = paths.len(), "staged plans assembled");
        Ok(ranking::select(
            self.config,
            self.objective,
            paths,
            self.config.staged_limit,
        ))
    }

    async fn stage_from(
        &self,
        build: &Build,
        primary: Category,
        part: &Arc<Part>,
        secondary: &[Category],
        budget_now: Decimal,
        budget_later: Decimal,
    ) -> anyhow::Result<Option<UpgradePath>> {
        let Some(first) = steps::build_step(self.config, build, primary, part) else {
            return Ok(None);
        };
        if first.cost > budget_now {
            return Ok(None);
        }

        let mut simulated = simulate::apply_steps(build, std::slice::from_ref(&first));
        let mut plan: Vec<UpgradeStep> = vec![first];
        let mut remaining = budget_later;

        for category in secondary {
            let parts =
                candidates::gather_category(self.cache, self.config, &simulated, *category).await?;
            let pick = parts.iter().find_map(|p| {
                steps::build_step(self.config, &simulated, *category, p)
                    .filter(|s| s.cost <= remaining)
            });
            if let Some(step) = pick {
                remaining -= step.cost;
                simulated = simulate::apply_steps(&simulated, std::slice::from_ref(&step));
                plan.push(step);
            }
        }

        if plan.len() < 2 {
            return Ok(None);
        }
        Ok(Some(ranking::finalize_path(build, Horizon::Staged, plan)))
    }
}

/// The category a staged plan upgrades first, from the current verdict.
pub fn primary_category(verdict: Bottleneck) -> Category {
    match verdict {
        Bottleneck::Cpu => Category::Cpu,
        Bottleneck::Ram => Category::Ram,
        Bottleneck::Gpu | Bottleneck::Balanced | Bottleneck::Unknown => Category::Gpu,
    }
}

pub fn secondary_categories(primary: Category, candidates: &CandidateMap) -> Vec<Category> {
    STAGED_SECONDARY_ORDER
        .into_iter()
        .filter(|c| *c != primary && candidates.contains_key(c))
        .take(STAGED_SECONDARY_CATEGORIES)
        .collect()
}
