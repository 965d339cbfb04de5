use crate::catalog::cache::PartCache;
use crate::catalog::{PartCatalog, PartFilter, PartOrder, PartQuery};
use crate::config::EngineConfig;
use crate::domain::build::Build;
use crate::domain::part::{Category, Part};
use crate::engine::wattage;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

pub type CandidateMap = BTreeMap<Category, Vec<Arc<Part>>>;

/// Categories the planner proposes replacements for, in evaluation order.
pub const UPGRADABLE: [Category; 6] = [
    Category::Cpu,
    Category::Gpu,
    Category::Ram,
    Category::Storage,
    Category::Psu,
    Category::Cooler,
];

/// Upgrade candidates for every upgradable category. Categories with nothing to offer are
/// left out of the map.
pub async fn gather_candidates<C: PartCatalog + ?Sized>(
    cache: &PartCache<'_, C>,
    config: &EngineConfig,
    build: &Build,
) -> anyhow::Result<CandidateMap> {
    let mut out = CandidateMap::new();
    for category in UPGRADABLE {
        let parts = gather_category(cache, config, build, category).await?;
        if !parts.is_empty() {
            out.insert(category, parts);
        }
    }
    Ok(out)
}

pub async fn gather_category<C: PartCatalog + ?Sized>(
    cache: &PartCache<'_, C>,
    config: &EngineConfig,
    build: &Build,
    category: Category,
) -> anyhow::Result<Vec<Arc<Part>>> {
    match candidate_query(config, build, category) {
        Some(query) => cache.query(category, &query).await,
        None => Ok(Vec::new()),
    }
}

/// The catalog query for upgrades in `category`, or `None` when the build cannot take one.
pub fn candidate_query(
    config: &EngineConfig,
    build: &Build,
    category: Category,
) -> Option<PartQuery> {
    let floor = |factor: Decimal| build.price_of(category) * factor;
    let ninety = Decimal::new(9, 1);
    let eighty = Decimal::new(8, 1);

    let mut query = match category {
        Category::Cpu => {
            let (_, board) = build.motherboard()?;
            PartQuery::new(PartOrder::CpuThroughput, true, 8)
                .filter(PartFilter::Socket(board.socket.clone()))
                .filter(PartFilter::PriceAbove(floor(ninety)))
        }
        Category::Gpu => {
            let mut q = PartQuery::new(PartOrder::GpuThroughput, true, 8)
                .filter(PartFilter::PriceAbove(floor(ninety)));
            if let Some((_, case)) = build.case() {
                q = q.filter(PartFilter::MaxGpuLengthMm(case.max_gpu_length_mm));
            }
            q
        }
        Category::Ram => {
            let (_, board) = build.motherboard()?;
            PartQuery::new(PartOrder::MemoryThroughput, true, 6)
                .filter(PartFilter::MemoryType(board.memory_type))
                .filter(PartFilter::PriceAbove(floor(eighty)))
        }
        Category::Storage => PartQuery::new(PartOrder::Capacity, true, 5)
            .filter(PartFilter::PriceAbove(floor(eighty))),
        Category::Psu => {
            let current = build.psu().map(|(_, p)| p.wattage_rating).unwrap_or(0);
            let recommended = Decimal::from(wattage::recommended_psu_wattage(build));
            if Decimal::from(current) >= recommended * config.psu_gating_factor {
                return None;
            }
            PartQuery::new(PartOrder::Price, false, 4).filter(PartFilter::PsuRatingAbove(current))
        }
        Category::Cooler => {
            let (_, cpu) = build.cpu()?;
            PartQuery::new(PartOrder::Height, true, 4)
                .filter(PartFilter::SocketOrUniversal(cpu.socket.clone()))
                .filter(PartFilter::PriceAbove(floor(eighty)))
        }
        Category::Motherboard | Category::Case | Category::CaseFan => return None,
    };

    if let Some(installed) = build.part(category) {
        query = query.filter(PartFilter::ExcludeId(installed.id));
    }
    Some(query)
}
