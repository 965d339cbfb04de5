use crate::domain::analysis::BottleneckAnalysis;
use crate::domain::part::{Category, Part};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeStep {
    pub category: Category,
    pub current_part: Option<Arc<Part>>,
    pub proposed_part: Arc<Part>,
    /// Proposed price minus current price; never below the downgrade threshold.
    pub cost: Decimal,
    pub wattage_change: i64,
    pub estimated_fps_gain_percent: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Horizon {
    Immediate,
    ShortTerm,
    Staged,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradePath {
    pub horizon: Horizon,
    pub steps: Vec<UpgradeStep>,
    pub total_cost: Decimal,
    pub total_estimated_fps_gain_percent: f64,
    pub final_wattage: u32,
    pub compatibility_warnings: Vec<String>,
    pub post_upgrade_bottleneck: BottleneckAnalysis,
}

/// Ranking criterion for candidate plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Objective {
    #[default]
    All,
    FpsPerDollar,
    MinWattage,
    FutureProof,
}

impl Objective {
    /// Unrecognised keywords rank by the default objective.
    pub fn parse(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "fps-per-dollar" => Objective::FpsPerDollar,
            "min-wattage" => Objective::MinWattage,
            "future-proof" => Objective::FutureProof,
            _ => Objective::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Objective::All => "all",
            Objective::FpsPerDollar => "fps-per-dollar",
            Objective::MinWattage => "min-wattage",
            Objective::FutureProof => "future-proof",
        }
    }
}

impl From<String> for Objective {
    fn from(s: String) -> Self {
        Objective::parse(&s)
    }
}

impl From<Objective> for String {
    fn from(o: Objective) -> Self {
        o.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRequest {
    pub budget_now: Decimal,
    pub budget_later: Decimal,
    #[serde(default)]
    pub objective: Objective,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeRecommendations {
    pub current_bottleneck: BottleneckAnalysis,
    pub immediate_paths: Vec<UpgradePath>,
    pub short_term_paths: Vec<UpgradePath>,
    pub staged_plans: Vec<UpgradePath>,
}
