//! Part and build builders shared by the unit tests.

use crate::catalog::{memory::InMemoryCatalog, PartCatalog, PartQuery};
use crate::domain::build::Build;
use crate::domain::part::*;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn part(id: PartId, name: String, price: i64, wattage: Option<u32>, specs: PartSpecs) -> Part {
    Part {
        id,
        name,
        manufacturer: "Test".to_string(),
        price: Decimal::from(price),
        wattage,
        product_url: None,
        image_url: None,
        specs,
    }
}

pub fn cpu(id: PartId, price: i64, socket: &str, threads: u32, boost_ghz: f64) -> Part {
    part(
        id,
        format!("CPU {id}"),
        price,
        Some(65),
        PartSpecs::Cpu(CpuSpecs {
            socket: socket.to_string(),
            core_count: threads / 2,
            thread_count: threads,
            base_clock_ghz: 3.5,
            boost_clock_ghz: boost_ghz,
            integrated_graphics: false,
        }),
    )
}

pub fn gpu(id: PartId, price: i64, memory_gb: u32, boost_mhz: u32, length_mm: u32) -> Part {
    part(
        id,
        format!("GPU {id}"),
        price,
        Some(200),
        PartSpecs::Gpu(GpuSpecs {
            chipset: format!("Chip {id}"),
            memory_gb,
            core_clock_mhz: boost_mhz.saturating_sub(200),
            boost_clock_mhz: boost_mhz,
            length_mm,
        }),
    )
}

pub fn ram(
    id: PartId,
    price: i64,
    memory_type: MemoryType,
    speed_mhz: u32,
    capacity_gb: u32,
) -> Part {
    part(
        id,
        format!("RAM {id}"),
        price,
        None,
        PartSpecs::Ram(RamSpecs {
            memory_type,
            speed_mhz,
            capacity_gb,
            modules: 2,
        }),
    )
}

pub fn storage(id: PartId, price: i64, capacity_gb: u32) -> Part {
    part(
        id,
        format!("SSD {id}"),
        price,
        None,
        PartSpecs::Storage(StorageSpecs {
            capacity_gb,
            interface: "NVMe".to_string(),
        }),
    )
}

pub fn psu(id: PartId, price: i64, wattage_rating: u32) -> Part {
    part(
        id,
        format!("PSU {id}"),
        price,
        None,
        PartSpecs::Psu(PsuSpecs {
            wattage_rating,
            efficiency_rating: Some("80+ Gold".to_string()),
            modular: true,
        }),
    )
}

pub fn cooler(id: PartId, price: i64, socket: &str, height_mm: u32) -> Part {
    part(
        id,
        format!("Cooler {id}"),
        price,
        None,
        PartSpecs::Cooler(CoolerSpecs {
            socket: socket.to_string(),
            height_mm,
            liquid: false,
        }),
    )
}

pub fn motherboard(
    id: PartId,
    price: i64,
    socket: &str,
    form_factor: FormFactor,
    memory_type: MemoryType,
    max_memory_gb: u32,
) -> Part {
    part(
        id,
        format!("Board {id}"),
        price,
        None,
        PartSpecs::Motherboard(MotherboardSpecs {
            socket: socket.to_string(),
            chipset: "B650".to_string(),
            form_factor,
            memory_type,
            max_memory_gb,
            memory_slots: 4,
        }),
    )
}

pub fn case(id: PartId, price: i64, form_factor: FormFactor, max_gpu_length_mm: u32) -> Part {
    part(
        id,
        format!("Case {id}"),
        price,
        None,
        PartSpecs::Case(CaseSpecs {
            form_factor,
            max_gpu_length_mm,
        }),
    )
}

pub fn build(parts: Vec<Part>) -> Build {
    parts
        .into_iter()
        .fold(Build::new(Some(1), "test build"), |b, p| b.with_part(Arc::new(p)))
}

/// A mid-range AM5 build: 12-thread CPU, 8 GB GPU, 16 GB DDR5, 650 W PSU.
pub fn baseline_build() -> Build {
    build(vec![
        cpu(1, 200, "AM5", 12, 4.6),
        gpu(2, 300, 8, 2000, 250),
        ram(3, 60, MemoryType::Ddr5, 4800, 16),
        storage(4, 50, 500),
        psu(5, 70, 650),
        cooler(6, 30, "AM5", 140),
        motherboard(7, 150, "AM5", FormFactor::Atx, MemoryType::Ddr5, 128),
        case(8, 80, FormFactor::Atx, 330),
    ])
}

/// Upgrade options compatible with [`baseline_build`].
pub fn baseline_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![
        cpu(1, 200, "AM5", 12, 4.6),
        cpu(11, 280, "AM5", 16, 5.3),
        cpu(12, 450, "AM5", 24, 5.6),
        cpu(13, 250, "LGA1700", 20, 5.2),
        gpu(2, 300, 8, 2000, 250),
        gpu(21, 550, 12, 2500, 300),
        gpu(22, 800, 16, 2600, 320),
        gpu(23, 900, 24, 2700, 360),
        ram(3, 60, MemoryType::Ddr5, 4800, 16),
        ram(31, 110, MemoryType::Ddr5, 6000, 32),
        ram(32, 90, MemoryType::Ddr4, 3600, 32),
        storage(4, 50, 500),
        storage(41, 90, 2000),
        psu(5, 70, 650),
        psu(51, 110, 850),
        cooler(6, 30, "AM5", 140),
        cooler(61, 60, "Unknown", 158),
        motherboard(7, 150, "AM5", FormFactor::Atx, MemoryType::Ddr5, 128),
        case(8, 80, FormFactor::Atx, 330),
    ])
}

/// Wraps a catalog and counts round-trips.
pub struct CountingCatalog<C> {
    pub inner: C,
    pub queries: AtomicUsize,
    pub lookups: AtomicUsize,
}

impl<C> CountingCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            queries: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl<C: PartCatalog> PartCatalog for CountingCatalog<C> {
    async fn query_parts(
        &self,
        category: Category,
        query: &PartQuery,
    ) -> anyhow::Result<Vec<Part>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.query_parts(category, query).await
    }

    async fn get_part(&self, category: Category, id: PartId) -> anyhow::Result<Option<Part>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_part(category, id).await
    }
}
