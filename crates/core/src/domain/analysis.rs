use crate::domain::part::{Category, Part, PartId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bottleneck {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "RAM")]
    Ram,
    Balanced,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottleneckAnalysis {
    /// 1..=100 when a CPU is installed, 0 otherwise. Same for the other scores.
    pub cpu_score: u32,
    pub gpu_score: u32,
    pub ram_score: u32,
    pub balance_ratio: f64,
    pub bottleneck: Bottleneck,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRef {
    pub category: Category,
    pub id: PartId,
    pub name: String,
}

impl From<&Part> for PartRef {
    fn from(part: &Part) -> Self {
        Self {
            category: part.category(),
            id: part.id,
            name: part.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityIssue {
    pub severity: Severity,
    /// One or two parts involved.
    pub parts: Vec<PartRef>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompatibilityCheckResult {
    pub is_compatible: bool,
    pub errors: Vec<CompatibilityIssue>,
    pub warnings: Vec<CompatibilityIssue>,
    pub notes: Vec<CompatibilityIssue>,
}

impl CompatibilityCheckResult {
    pub(crate) fn push(&mut self, severity: Severity, parts: &[&Part], reason: String) {
        let issue = CompatibilityIssue {
            severity,
            parts: parts.iter().map(|p| PartRef::from(*p)).collect(),
            reason,
        };
        match severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Note => self.notes.push(issue),
        }
    }

    /// Reasons of every error followed by every warning.
    pub fn blocking_and_warning_reasons(&self) -> Vec<String> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .map(|i| i.reason.clone())
            .collect()
    }
}
