use crate::domain::part::{Category, Part, PartId};
use crate::engine::wattage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A set of at most one part per category.
///
/// Builds are values: every mutation-like operation returns a new `Build`, so simulated branches
/// never observe each other. Parts are shared through `Arc` and never written to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Build {
    pub id: Option<i64>,
    pub name: String,
    slots: BTreeMap<Category, Arc<Part>>,
    total_price: Decimal,
    total_wattage: u32,
}

impl Build {
    pub fn new(id: Option<i64>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns a copy of this build with `part` installed in its own category slot.
    pub fn with_part(&self, part: Arc<Part>) -> Self {
        let mut slots = self.slots.clone();
        slots.insert(part.category(), part);
        Self::from_slots(self.id, self.name.clone(), slots)
    }

    /// Returns a copy of this build with `category` emptied.
    pub fn without(&self, category: Category) -> Self {
        let mut slots = self.slots.clone();
        slots.remove(&category);
        Self::from_slots(self.id, self.name.clone(), slots)
    }

    fn from_slots(id: Option<i64>, name: String, slots: BTreeMap<Category, Arc<Part>>) -> Self {
        let mut build = Self {
            id,
            name,
            slots,
            total_price: Decimal::ZERO,
            total_wattage: 0,
        };
        build.total_price = build.slots.values().map(|p| p.effective_price()).sum();
        build.total_wattage = wattage::estimate_total_wattage(&build);
        build
    }

    pub fn part(&self, category: Category) -> Option<&Part> {
        self.slots.get(&category).map(Arc::as_ref)
    }

    pub fn shared_part(&self, category: Category) -> Option<&Arc<Part>> {
        self.slots.get(&category)
    }

    pub fn parts(&self) -> impl Iterator<Item = &Arc<Part>> {
        self.slots.values()
    }

    pub fn has(&self, category: Category) -> bool {
        self.slots.contains_key(&category)
    }

    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    pub fn total_wattage(&self) -> u32 {
        self.total_wattage
    }

    /// Price of the installed part in `category`, zero when the slot is empty.
    pub fn price_of(&self, category: Category) -> Decimal {
        self.part(category)
            .map(Part::effective_price)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn cpu(&self) -> Option<(&Part, &crate::domain::part::CpuSpecs)> {
        self.part(Category::Cpu).and_then(|p| p.cpu().map(|s| (p, s)))
    }

    pub fn gpu(&self) -> Option<(&Part, &crate::domain::part::GpuSpecs)> {
        self.part(Category::Gpu).and_then(|p| p.gpu().map(|s| (p, s)))
    }

    pub fn ram(&self) -> Option<(&Part, &crate::domain::part::RamSpecs)> {
        self.part(Category::Ram).and_then(|p| p.ram().map(|s| (p, s)))
    }

    pub fn psu(&self) -> Option<(&Part, &crate::domain::part::PsuSpecs)> {
        self.part(Category::Psu).and_then(|p| p.psu().map(|s| (p, s)))
    }

    pub fn cooler(&self) -> Option<(&Part, &crate::domain::part::CoolerSpecs)> {
        self.part(Category::Cooler)
            .and_then(|p| p.cooler().map(|s| (p, s)))
    }

    pub fn motherboard(&self) -> Option<(&Part, &crate::domain::part::MotherboardSpecs)> {
        self.part(Category::Motherboard)
            .and_then(|p| p.motherboard().map(|s| (p, s)))
    }

    pub fn case(&self) -> Option<(&Part, &crate::domain::part::CaseSpecs)> {
        self.part(Category::Case).and_then(|p| p.case().map(|s| (p, s)))
    }
}

/// Caller-side description of a stored build: which part id sits in which slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    pub parts: BTreeMap<Category, PartId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn with_part_leaves_source_untouched() {
        let base = fixtures::build(vec![fixtures::cpu(1, 200, "AM5", 12, 5.1)]);
        let next = base.with_part(Arc::new(fixtures::cpu(2, 300, "AM5", 16, 5.4)));

        assert_eq!(base.part(Category::Cpu).unwrap().id, 1);
        assert_eq!(next.part(Category::Cpu).unwrap().id, 2);
        assert_eq!(base.total_price(), Decimal::from(200));
        assert_eq!(next.total_price(), Decimal::from(300));
    }

    #[test]
    fn totals_follow_slots() {
        let build = fixtures::build(vec![
            fixtures::cpu(1, 200, "AM5", 12, 5.1),
            fixtures::gpu(2, 500, 16, 2500, 300),
        ]);
        assert_eq!(build.total_price(), Decimal::from(700));
        // 65 (cpu) + 200 (gpu) + 50 baseline
        assert_eq!(build.total_wattage(), 315);

        let no_gpu = build.without(Category::Gpu);
        assert_eq!(no_gpu.total_price(), Decimal::from(200));
        assert_eq!(no_gpu.total_wattage(), 115);
    }

    #[test]
    fn record_parses_category_keys() {
        let v = serde_json::json!({"name": "desk", "parts": {"CPU": 1, "GPU": 2}});
        let record: BuildRecord = serde_json::from_value(v).unwrap();
        assert_eq!(record.parts.get(&Category::Gpu), Some(&2));
        assert_eq!(record.id, None);
    }
}
