use crate::config::EngineConfig;
use crate::domain::build::Build;
use crate::domain::part::{Category, Part};
use crate::domain::upgrade::UpgradeStep;
use std::sync::Arc;

/// FPS gain credited for going from integrated graphics to any dedicated GPU.
const FIRST_GPU_GAIN: f64 = 35.0;
const FIRST_CPU_GAIN: f64 = 15.0;
const FIRST_RAM_GAIN: f64 = 8.0;

struct ReasonTemplate {
    upgrade: &'static str,
    install: &'static str,
}

/// Reason text per category. `{current}`, `{proposed}` and `{gain}` are substituted.
static REASON_TEMPLATES: [(Category, ReasonTemplate); 6] = [
    (
        Category::Cpu,
        ReasonTemplate {
            upgrade: "Upgrade CPU from {current} to {proposed} for +{gain}% FPS in CPU-bound games",
            install: "Install {proposed} as the system CPU (estimated +{gain}% FPS)",
        },
    ),
    (
        Category::Gpu,
        ReasonTemplate {
            upgrade: "Upgrade GPU from {current} to {proposed} for an estimated +{gain}% FPS",
            install: "Add a dedicated GPU ({proposed}) for +{gain}% FPS over integrated graphics",
        },
    ),
    (
        Category::Ram,
        ReasonTemplate {
            upgrade: "Upgrade RAM from {current} to {proposed} (estimated +{gain}% FPS)",
            install: "Add {proposed} memory (estimated +{gain}% FPS)",
        },
    ),
    (
        Category::Storage,
        ReasonTemplate {
            upgrade: "Upgrade storage from {current} to {proposed} for faster load times",
            install: "Add {proposed} for more space and faster load times",
        },
    ),
    (
        Category::Psu,
        ReasonTemplate {
            upgrade: "Replace {current} with {proposed} for more wattage headroom",
            install: "Install {proposed} to power the build with headroom",
        },
    ),
    (
        Category::Cooler,
        ReasonTemplate {
            upgrade: "Replace {current} with {proposed} for better thermals and boost clocks",
            install: "Install {proposed} for better thermals and sustained boost clocks",
        },
    ),
];

fn reason_template(category: Category) -> Option<&'static ReasonTemplate> {
    REASON_TEMPLATES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, t)| t)
}

pub fn reason_text(
    category: Category,
    current: Option<&Part>,
    proposed: &Part,
    gain: f64,
) -> Option<String> {
    let template = reason_template(category)?;
    let text = match current {
        Some(current) => template.upgrade.replace("{current}", &current.name),
        None => template.install.to_string(),
    };
    Some(
        text.replace("{proposed}", &proposed.name)
            .replace("{gain}", &format!("{gain:.1}")),
    )
}

/// proposed / current, neutral when the current value is degenerate.
fn ratio(proposed: f64, current: f64) -> f64 {
    if current > 0.0 {
        proposed / current
    } else {
        1.0
    }
}

fn round_gain(raw: f64) -> f64 {
    (raw.max(0.0) * 10.0).round() / 10.0
}

/// Heuristic FPS gain of installing `proposed` in place of `current`.
pub fn estimate_fps_gain(category: Category, current: Option<&Part>, proposed: &Part) -> f64 {
    let raw = match category {
        Category::Gpu => match (current.and_then(Part::gpu), proposed.gpu()) {
            (_, None) => 0.0,
            (None, Some(_)) => FIRST_GPU_GAIN,
            (Some(cur), Some(new)) => {
                (ratio(new.boost_clock_mhz as f64, cur.boost_clock_mhz as f64) - 1.0) * 40.0
                    + (ratio(new.memory_gb as f64, cur.memory_gb as f64) - 1.0) * 25.0
            }
        },
        Category::Cpu => match (current.and_then(Part::cpu), proposed.cpu()) {
            (_, None) => 0.0,
            (None, Some(_)) => FIRST_CPU_GAIN,
            (Some(cur), Some(new)) => {
                (ratio(new.boost_clock_ghz, cur.boost_clock_ghz) - 1.0) * 25.0
                    + (ratio(new.thread_count as f64, cur.thread_count as f64) - 1.0) * 15.0
            }
        },
        Category::Ram => match (current.and_then(Part::ram), proposed.ram()) {
            (_, None) => 0.0,
            (None, Some(_)) => FIRST_RAM_GAIN,
            (Some(cur), Some(new)) => {
                (ratio(new.speed_mhz as f64, cur.speed_mhz as f64) - 1.0) * 10.0
                    + (ratio(new.capacity_gb as f64, cur.capacity_gb as f64) - 1.0) * 5.0
            }
        },
        Category::Storage
        | Category::Psu
        | Category::Cooler
        | Category::Motherboard
        | Category::Case
        | Category::CaseFan => 0.0,
    };
    round_gain(raw)
}

/// A priced, justified single-category replacement, or `None` when the swap is a no-op, a
/// downgrade beyond the configured threshold, or a category the planner does not touch.
pub fn build_step(
    config: &EngineConfig,
    build: &Build,
    category: Category,
    proposed: &Arc<Part>,
) -> Option<UpgradeStep> {
    if proposed.category() != category {
        return None;
    }

    let current = build.shared_part(category);
    if current.is_some_and(|c| c.id == proposed.id) {
        return None;
    }

    let cost = proposed.effective_price() - build.price_of(category);
    if cost < -config.downgrade_threshold {
        return None;
    }

    let current_ref = current.map(Arc::as_ref);
    let gain = estimate_fps_gain(category, current_ref, proposed);
    let reason = reason_text(category, current_ref, proposed, gain)?;
    let wattage_change = i64::from(proposed.wattage_or_zero())
        - i64::from(current_ref.map(Part::wattage_or_zero).unwrap_or(0));

    Some(UpgradeStep {
        category,
        current_part: current.cloned(),
        proposed_part: proposed.clone(),
        cost,
        wattage_change,
        estimated_fps_gain_percent: gain,
        reason,
    })
}
