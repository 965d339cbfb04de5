use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rigpath_core::catalog::memory::InMemoryCatalog;
use rigpath_core::config::{EngineConfig, Settings};
use rigpath_core::domain::build::{Build, BuildRecord};
use rigpath_core::domain::upgrade::{Objective, UpgradeRecommendations, UpgradeRequest};
use rigpath_core::engine::{validate_upgrade_target, wattage, UpgradeEngine};

#[derive(Debug, Parser)]
#[command(name = "rigpath")]
struct Args {
    /// Part catalog (JSON array). Defaults to RIGPATH_CATALOG_PATH.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score the build and name its bottleneck.
    Analyse {
        #[arg(long)]
        build: PathBuf,
    },
    /// Check the build's parts against each other.
    Check {
        #[arg(long)]
        build: PathBuf,
    },
    /// Estimated draw and recommended PSU rating.
    Wattage {
        #[arg(long)]
        build: PathBuf,
    },
    /// Recommend immediate, short-term and staged upgrade paths.
    Upgrade {
        #[arg(long)]
        build: PathBuf,

        #[arg(long)]
        budget_now: Decimal,

        #[arg(long)]
        budget_later: Decimal,

        /// all | fps-per-dollar | min-wattage | future-proof
        #[arg(long, default_value = "all")]
        objective: String,
    },
}

#[derive(Debug, Serialize)]
struct WattageReport {
    estimated_total_wattage: u32,
    recommended_psu_wattage: u32,
}

#[derive(Debug, Serialize)]
struct UpgradeReport {
    generated_at: chrono::DateTime<chrono::Utc>,
    build_id: Option<i64>,
    build_name: String,
    request: UpgradeRequest,
    recommendations: UpgradeRecommendations,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(&settings, args).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %format!("{err:#}"), "rigpath command failed");
        return Err(err);
    }
    Ok(())
}

async fn run(settings: &Settings, args: Args) -> anyhow::Result<()> {
    let catalog_path = match args.catalog {
        Some(p) => p,
        None => PathBuf::from(settings.require_catalog_path()?),
    };
    let catalog = InMemoryCatalog::from_path(&catalog_path)?;
    tracing::debug!(path = %catalog_path.display(), parts = catalog.len(), "catalog loaded");

    let engine = UpgradeEngine::new(catalog, EngineConfig::from_env());

    match args.command {
        Command::Analyse { build } => {
            let build = load_build(&engine, &build).await?;
            print_json(&engine.analyse_bottleneck(&build))
        }
        Command::Check { build } => {
            let build = load_build(&engine, &build).await?;
            print_json(&engine.check_compatibility(&build))
        }
        Command::Wattage { build } => {
            let build = load_build(&engine, &build).await?;
            print_json(&WattageReport {
                estimated_total_wattage: wattage::estimate_total_wattage(&build),
                recommended_psu_wattage: wattage::recommended_psu_wattage(&build),
            })
        }
        Command::Upgrade {
            build,
            budget_now,
            budget_later,
            objective,
        } => {
            anyhow::ensure!(
                budget_now >= Decimal::ZERO && budget_later >= Decimal::ZERO,
                "budgets must be non-negative"
            );
            let record = read_record(&build)?;
            let request = UpgradeRequest {
                budget_now,
                budget_later,
                objective: Objective::parse(&objective),
            };

            let recommendations = engine
                .generate_upgrade_paths_for_record(&record, &request)
                .await?;

            print_json(&UpgradeReport {
                generated_at: chrono::Utc::now(),
                build_id: record.id,
                build_name: record.name,
                request,
                recommendations,
            })
        }
    }
}

fn read_record(path: &Path) -> anyhow::Result<BuildRecord> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read build {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid build record {}", path.display()))
}

async fn load_build(
    engine: &UpgradeEngine<InMemoryCatalog>,
    path: &Path,
) -> anyhow::Result<Build> {
    let record = read_record(path)?;
    let build = engine.resolve_build(&record).await?;
    if validate_upgrade_target(&build).is_err() {
        tracing::warn!(build = %build.name, "build has neither CPU nor GPU");
    }
    Ok(build)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upgrade_command() {
        let args = Args::try_parse_from([
            "rigpath",
            "--catalog",
            "demos/catalog.json",
            "upgrade",
            "--build",
            "demos/build.json",
            "--budget-now",
            "300",
            "--budget-later",
            "450.50",
            "--objective",
            "fps-per-dollar",
        ])
        .unwrap();

        assert_eq!(args.catalog, Some(PathBuf::from("demos/catalog.json")));
        match args.command {
            Command::Upgrade {
                budget_now,
                budget_later,
                objective,
                ..
            } => {
                assert_eq!(budget_now, Decimal::from(300));
                assert_eq!(budget_later, Decimal::new(45050, 2));
                assert_eq!(Objective::parse(&objective), Objective::FpsPerDollar);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn upgrade_requires_budgets() {
        assert!(Args::try_parse_from(["rigpath", "upgrade", "--build", "b.json"]).is_err());
    }

    #[test]
    fn reads_build_record_file() {
        let path = std::env::temp_dir().join(format!("rigpath-record-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"id": 4, "name": "desk", "parts": {"CPU": 1, "Case": 8}}"#,
        )
        .unwrap();
        let record = read_record(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(record.id, Some(4));
        assert_eq!(record.parts.len(), 2);
    }
}
