pub mod catalog;
pub mod domain;
pub mod engine;

#[cfg(test)]
pub(crate) mod fixtures;

pub mod config {
    use anyhow::Context;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub catalog_path: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                catalog_path: std::env::var("RIGPATH_CATALOG_PATH").ok(),
            })
        }

        pub fn require_catalog_path(&self) -> anyhow::Result<&str> {
            self.catalog_path
                .as_deref()
                .context("RIGPATH_CATALOG_PATH is required when --catalog is not given")
        }
    }

    /// Tunables of the upgrade planner.
    #[derive(Debug, Clone, PartialEq)]
    pub struct EngineConfig {
        /// A step whose cost is below the negation of this is never proposed.
        pub downgrade_threshold: Decimal,
        /// PSU candidates are offered only while the installed rating is below
        /// recommended wattage times this factor.
        pub psu_gating_factor: Decimal,
        /// Plans whose compatibility text contains this (case-insensitive) are dropped.
        pub reject_keyword: String,
        pub immediate_limit: usize,
        pub short_term_limit: usize,
        pub staged_limit: usize,
        /// Independent branches evaluated at once.
        pub branch_concurrency: usize,
    }

    impl Default for EngineConfig {
        fn default() -> Self {
            Self {
                downgrade_threshold: Decimal::from(50),
                psu_gating_factor: Decimal::new(105, 2),
                reject_keyword: "mismatch".to_string(),
                immediate_limit: 6,
                short_term_limit: 4,
                staged_limit: 3,
                branch_concurrency: 4,
            }
        }
    }

    impl EngineConfig {
        pub fn from_env() -> Self {
            let mut out = Self::default();

            if let Some(v) = env_parse::<Decimal>("RIGPATH_DOWNGRADE_THRESHOLD") {
                if v >= Decimal::ZERO {
                    out.downgrade_threshold = v;
                }
            }
            if let Some(v) = env_parse::<Decimal>("RIGPATH_PSU_GATING_FACTOR") {
                if v > Decimal::ZERO {
                    out.psu_gating_factor = v;
                }
            }
            if let Ok(s) = std::env::var("RIGPATH_REJECT_KEYWORD") {
                if !s.trim().is_empty() {
                    out.reject_keyword = s.trim().to_string();
                }
            }
            if let Some(n) = env_parse::<usize>("RIGPATH_IMMEDIATE_LIMIT") {
                out.immediate_limit = n;
            }
            if let Some(n) = env_parse::<usize>("RIGPATH_SHORT_TERM_LIMIT") {
                out.short_term_limit = n;
            }
            if let Some(n) = env_parse::<usize>("RIGPATH_STAGED_LIMIT") {
                out.staged_limit = n;
            }
            if let Some(n) = env_parse::<usize>("RIGPATH_BRANCH_CONCURRENCY") {
                out.branch_concurrency = n.max(1);
            }

            out
        }
    }

    fn env_parse<T: FromStr>(key: &str) -> Option<T> {
        std::env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
    }
}
