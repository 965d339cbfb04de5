use crate::domain::build::Build;
use crate::domain::part::Category;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Fans, RGB and board idle draw.
pub const BASELINE_OVERHEAD_W: u32 = 50;

/// Cooler ratings above this are a cooling capacity (TDP), not an electrical draw.
pub const MAX_PLAUSIBLE_COOLER_DRAW_W: u32 = 50;

/// Recommended PSU rating relative to the estimated draw (1.3).
pub fn psu_headroom_factor() -> Decimal {
    Decimal::new(13, 1)
}

pub fn estimate_total_wattage(build: &Build) -> u32 {
    let mut total = BASELINE_OVERHEAD_W;

    for category in [Category::Cpu, Category::Gpu, Category::Storage] {
        if let Some(part) = build.part(category) {
            total = total.saturating_add(part.wattage_or_zero());
        }
    }

    if let Some(cooler) = build.part(Category::Cooler) {
        let w = cooler.wattage_or_zero();
        if w > 0 && w <= MAX_PLAUSIBLE_COOLER_DRAW_W {
            total = total.saturating_add(w);
        }
    }

    total
}

pub fn recommended_psu_wattage(build: &Build) -> u32 {
    recommended_for_total(estimate_total_wattage(build))
}

pub(crate) fn recommended_for_total(total: u32) -> u32 {
    (Decimal::from(total) * psu_headroom_factor())
        .trunc()
        .to_u32()
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn empty_build_is_baseline_only() {
        let build = fixtures::build(vec![]);
        assert_eq!(estimate_total_wattage(&build), 50);
        assert_eq!(recommended_psu_wattage(&build), 65);
    }

    #[test]
    fn sums_cpu_gpu_storage() {
        let mut ssd = fixtures::storage(3, 80, 1000);
        ssd.wattage = Some(5);
        let build = fixtures::build(vec![
            fixtures::cpu(1, 200, "AM5", 12, 5.1),
            fixtures::gpu(2, 500, 16, 2500, 300),
            ssd,
        ]);
        assert_eq!(estimate_total_wattage(&build), 65 + 200 + 5 + 50);
    }

    #[test]
    fn cooler_counts_only_when_plausible_draw() {
        let mut fan_cooler = fixtures::cooler(1, 40, "AM5", 150);
        fan_cooler.wattage = Some(6);
        assert_eq!(estimate_total_wattage(&fixtures::build(vec![fan_cooler])), 56);

        let mut rated_cooler = fixtures::cooler(2, 90, "AM5", 160);
        rated_cooler.wattage = Some(250);
        assert_eq!(estimate_total_wattage(&fixtures::build(vec![rated_cooler])), 50);

        let mut edge = fixtures::cooler(3, 90, "AM5", 160);
        edge.wattage = Some(50);
        assert_eq!(estimate_total_wattage(&fixtures::build(vec![edge])), 100);
    }

    #[test]
    fn ram_and_board_are_not_counted() {
        let mut ram = fixtures::ram(1, 60, crate::domain::part::MemoryType::Ddr5, 6000, 32);
        ram.wattage = Some(10);
        assert_eq!(estimate_total_wattage(&fixtures::build(vec![ram])), 50);
    }

    #[test]
    fn malformed_wattage_saturates() {
        let mut gpu = fixtures::gpu(2, 500, 16, 2500, 300);
        gpu.wattage = Some(u32::MAX - 10);
        let build = fixtures::build(vec![fixtures::cpu(1, 200, "AM5", 12, 5.1), gpu]);
        assert_eq!(estimate_total_wattage(&build), u32::MAX);
        assert_eq!(build.total_wattage(), u32::MAX);
        assert_eq!(recommended_psu_wattage(&build), u32::MAX);
    }

    #[test]
    fn recommended_truncates() {
        assert_eq!(recommended_for_total(520), 676);
        assert_eq!(recommended_for_total(333), 432);
    }
}
