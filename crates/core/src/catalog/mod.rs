use crate::domain::part::{Category, MemoryType, Part, PartId};
use rust_decimal::Decimal;

pub mod cache;
pub mod memory;

/// Read access to the part catalog owned by the persistence layer.
///
/// Implementations must evaluate a [`PartQuery`] with the semantics of [`PartQuery::matches`] and
/// [`PartOrder::sort_key`]; results need not be stable across calls.
#[async_trait::async_trait]
pub trait PartCatalog: Send + Sync {
    async fn query_parts(&self, category: Category, query: &PartQuery)
        -> anyhow::Result<Vec<Part>>;

    async fn get_part(&self, category: Category, id: PartId) -> anyhow::Result<Option<Part>>;
}

#[async_trait::async_trait]
impl<T: PartCatalog + ?Sized> PartCatalog for std::sync::Arc<T> {
    async fn query_parts(
        &self,
        category: Category,
        query: &PartQuery,
    ) -> anyhow::Result<Vec<Part>> {
        (**self).query_parts(category, query).await
    }

    async fn get_part(&self, category: Category, id: PartId) -> anyhow::Result<Option<Part>> {
        (**self).get_part(category, id).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartFilter {
    ExcludeId(PartId),
    /// Strictly greater than.
    PriceAbove(Decimal),
    Socket(String),
    /// Exact socket, or a cooler declaring the universal socket.
    SocketOrUniversal(String),
    MemoryType(MemoryType),
    MaxGpuLengthMm(u32),
    /// Strictly greater than.
    PsuRatingAbove(u32),
}

impl PartFilter {
    pub fn matches(&self, part: &Part) -> bool {
        match self {
            PartFilter::ExcludeId(id) => part.id != *id,
            PartFilter::PriceAbove(floor) => part.effective_price() > *floor,
            PartFilter::Socket(socket) => socket_of(part) == Some(socket.as_str()),
            PartFilter::SocketOrUniversal(socket) => match part.cooler() {
                Some(c) => c.fits_socket(socket),
                None => socket_of(part) == Some(socket.as_str()),
            },
            PartFilter::MemoryType(t) => memory_type_of(part) == Some(*t),
            PartFilter::MaxGpuLengthMm(max) => part.gpu().is_some_and(|g| g.length_mm <= *max),
            PartFilter::PsuRatingAbove(min) => part.psu().is_some_and(|p| p.wattage_rating > *min),
        }
    }
}

fn socket_of(part: &Part) -> Option<&str> {
    if let Some(c) = part.cpu() {
        return Some(&c.socket);
    }
    if let Some(c) = part.cooler() {
        return Some(&c.socket);
    }
    part.motherboard().map(|m| m.socket.as_str())
}

fn memory_type_of(part: &Part) -> Option<MemoryType> {
    if let Some(r) = part.ram() {
        return Some(r.memory_type);
    }
    part.motherboard().map(|m| m.memory_type)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOrder {
    Price,
    /// CPU boost clock × thread count.
    CpuThroughput,
    /// GPU boost clock × VRAM.
    GpuThroughput,
    /// RAM speed × capacity.
    MemoryThroughput,
    Capacity,
    Height,
}

impl PartOrder {
    /// Parts without the ordered attribute sort as zero.
    pub fn sort_key(self, part: &Part) -> f64 {
        use rust_decimal::prelude::ToPrimitive;
        match self {
            PartOrder::Price => part.effective_price().to_f64().unwrap_or(0.0),
            PartOrder::CpuThroughput => part
                .cpu()
                .map(|c| c.boost_clock_ghz * c.thread_count as f64)
                .unwrap_or(0.0),
            PartOrder::GpuThroughput => part
                .gpu()
                .map(|g| g.boost_clock_mhz as f64 * g.memory_gb as f64)
                .unwrap_or(0.0),
            PartOrder::MemoryThroughput => part
                .ram()
                .map(|r| r.speed_mhz as f64 * r.capacity_gb as f64)
                .unwrap_or(0.0),
            PartOrder::Capacity => {
                if let Some(r) = part.ram() {
                    r.capacity_gb as f64
                } else {
                    part.storage().map(|s| s.capacity_gb as f64).unwrap_or(0.0)
                }
            }
            PartOrder::Height => part.cooler().map(|c| c.height_mm as f64).unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartQuery {
    pub filters: Vec<PartFilter>,
    pub order: PartOrder,
    pub descending: bool,
    pub limit: usize,
}

impl PartQuery {
    pub fn new(order: PartOrder, descending: bool, limit: usize) -> Self {
        Self {
            filters: Vec::new(),
            order,
            descending,
            limit,
        }
    }

    pub fn filter(mut self, filter: PartFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn matches(&self, part: &Part) -> bool {
        self.filters.iter().all(|f| f.matches(part))
    }
}
