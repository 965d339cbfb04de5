use crate::catalog::cache::PartCache;
use crate::catalog::PartCatalog;
use crate::config::EngineConfig;
use crate::domain::analysis::{BottleneckAnalysis, CompatibilityCheckResult};
use crate::domain::build::{Build, BuildRecord};
use crate::domain::part::Category;
use crate::domain::upgrade::{UpgradeRecommendations, UpgradeRequest};
use anyhow::{ensure, Context};

pub mod bottleneck;
pub mod candidates;
pub mod compatibility;
pub mod paths;
pub mod ranking;
pub mod simulate;
pub mod steps;
pub mod wattage;

/// Entry point for the recommendation operations exposed to the calling layer.
///
/// The engine holds no per-request state: each call to [`UpgradeEngine::generate_upgrade_paths`]
/// opens its own [`PartCache`] and drops it when the call returns.
pub struct UpgradeEngine<C> {
    catalog: C,
    config: EngineConfig,
}

impl<C: PartCatalog> UpgradeEngine<C> {
    pub fn new(catalog: C, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn analyse_bottleneck(&self, build: &Build) -> BottleneckAnalysis {
        bottleneck::analyse(build)
    }

    pub fn check_compatibility(&self, build: &Build) -> CompatibilityCheckResult {
        compatibility::check_compatibility(build)
    }

    pub async fn generate_upgrade_paths(
        &self,
        build: &Build,
        request: &UpgradeRequest,
    ) -> anyhow::Result<UpgradeRecommendations> {
        let cache = PartCache::new(&self.catalog);
        for part in build.parts() {
            cache.insert(part.clone());
        }
        self.plan(&cache, build, request).await
    }

    /// Resolves `record` through the catalog and plans upgrades for it within one request scope.
    pub async fn generate_upgrade_paths_for_record(
        &self,
        record: &BuildRecord,
        request: &UpgradeRequest,
    ) -> anyhow::Result<UpgradeRecommendations> {
        let cache = PartCache::new(&self.catalog);
        let build = resolve_build(&cache, record).await?;
        validate_upgrade_target(&build)?;
        self.plan(&cache, &build, request).await
    }

    pub async fn resolve_build(&self, record: &BuildRecord) -> anyhow::Result<Build> {
        let cache = PartCache::new(&self.catalog);
        resolve_build(&cache, record).await
    }

    async fn plan(
        &self,
        cache: &PartCache<'_, C>,
        build: &Build,
        request: &UpgradeRequest,
    ) -> anyhow::Result<UpgradeRecommendations> {
        let current_bottleneck = bottleneck::analyse(build);
        let candidates = candidates::gather_candidates(cache, &self.config, build).await?;

        let planner = paths::PathPlanner {
            cache,
            config: &self.config,
            objective: request.objective,
        };

        let immediate_paths = planner.immediate(build, &candidates, request.budget_now);
        let short_term_paths = planner
            .short_term(build, &immediate_paths, request.budget_later)
            .await?;
        let staged_plans = planner
            .staged(build, &candidates, request.budget_now, request.budget_later)
            .await?;

        tracing::info!(
            build_id = ?build.id,
            objective = request.objective.as_str(),
            budget_now = %request.budget_now,
            budget_later = %request.budget_later,
            bottleneck = ?current_bottleneck.bottleneck,
            candidate_categories = candidates.len(),
            cached_parts = cache.len(),
            immediate = immediate_paths.len(),
            short_term = short_term_paths.len(),
            staged = staged_plans.len(),
            "upgrade paths generated"
        );

        Ok(UpgradeRecommendations {
            current_bottleneck,
            immediate_paths,
            short_term_paths,
            staged_plans,
        })
    }
}

/// Loads every part named by `record`, failing on unknown ids.
pub async fn resolve_build<C: PartCatalog + ?Sized>(
    cache: &PartCache<'_, C>,
    record: &BuildRecord,
) -> anyhow::Result<Build> {
    let mut build = Build::new(record.id, record.name.clone());
    for (category, id) in &record.parts {
        let part = cache
            .get(*category, *id)
            .await?
            .with_context(|| format!("{category} part #{id} not found in catalog"))?;
        ensure!(
            part.category() == *category,
            "part #{id} is a {}, not a {category}",
            part.category()
        );
        build = build.with_part(part);
    }
    Ok(build)
}

/// Caller-side precondition for planning upgrades.
pub fn validate_upgrade_target(build: &Build) -> anyhow::Result<()> {
    ensure!(
        build.has(Category::Cpu) || build.has(Category::Gpu),
        "build must contain at least a CPU or a GPU"
    );
    Ok(())
}
