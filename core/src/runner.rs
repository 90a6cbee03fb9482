//! Run orchestration: directory policy, disk preflight, dispatch to the
//! per-use-case generators and the final `_report.json` per dataset.

use crate::config::{GeneratorConfig, UseCase};
use crate::error::{GenError, GenResult};
use crate::report::RunReport;
use crate::{customer360, fraud};
use std::fs;
use std::path::{Path, PathBuf};

/// Rough compressed on-disk footprint per customer per use case, used
/// only for the free-space preflight. Deliberately conservative.
const EST_BYTES_PER_CUSTOMER: u64 = 2_048;

pub fn run(config: &GeneratorConfig) -> GenResult<Vec<RunReport>> {
    config.validate()?;
    fs::create_dir_all(&config.output_dir)?;
    preflight_disk(config)?;

    let mut reports = Vec::new();
    if config.use_case.includes_customer360() {
        reports.push(run_customer360(config)?);
    }
    if config.use_case.includes_fraud() {
        reports.push(run_fraud(config)?);
    }
    Ok(reports)
}

fn run_customer360(config: &GeneratorConfig) -> GenResult<RunReport> {
    let dir = prepare_dataset_dir(config, "customer360")?;
    log::info!("generating customer360 dataset in {}", dir.display());

    let tables = customer360::generate(config, &dir)?;
    let report = run_report(config, UseCase::Customer360, tables, Vec::new());
    report.write(&dir)?;
    Ok(report)
}

fn run_fraud(config: &GeneratorConfig) -> GenResult<RunReport> {
    let dir = prepare_dataset_dir(config, "fraud")?;
    log::info!("generating fraud-detection dataset in {}", dir.display());

    let (tables, scenarios) = fraud::generate(config, &dir)?;
    let report = run_report(config, UseCase::FraudDetection, tables, scenarios);
    report.write(&dir)?;
    Ok(report)
}

fn run_report(
    config: &GeneratorConfig,
    use_case: UseCase,
    tables: Vec<crate::report::TableReport>,
    scenarios: Vec<crate::report::ScenarioReport>,
) -> RunReport {
    RunReport {
        use_case: use_case.as_str().to_string(),
        seed: config.seed,
        customers: config.customers,
        batch_size: config.batch_size,
        compression: config.compression.as_str().to_string(),
        reference_date: config.reference_date.format("%Y-%m-%d").to_string(),
        tables,
        scenarios,
    }
}

/// Create (or clear) one dataset directory under the output root.
/// Refuses to touch a non-empty directory unless overwrite is set.
fn prepare_dataset_dir(config: &GeneratorConfig, name: &str) -> GenResult<PathBuf> {
    let dir = config.output_dir.join(name);
    if dir.exists() {
        let occupied = fs::read_dir(&dir)?.next().is_some();
        if occupied {
            if !config.overwrite {
                return Err(GenError::Config(format!(
                    "output directory {} is not empty; pass --overwrite to replace it",
                    dir.display()
                )));
            }
            log::warn!("overwriting existing dataset in {}", dir.display());
            fs::remove_dir_all(&dir)?;
        }
    }
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn preflight_disk(config: &GeneratorConfig) -> GenResult<()> {
    let datasets = config.use_case.includes_customer360() as u64
        + config.use_case.includes_fraud() as u64;
    let needed = config.customers.saturating_mul(EST_BYTES_PER_CUSTOMER * datasets);
    let available = available_space(&config.output_dir)?;
    if available < needed {
        return Err(GenError::Resource(format!(
            "estimated output of ~{} MiB exceeds the {} MiB free under {}",
            needed / (1 << 20),
            available / (1 << 20),
            config.output_dir.display()
        )));
    }
    log::debug!(
        "disk preflight: ~{} MiB needed, {} MiB free",
        needed / (1 << 20),
        available / (1 << 20)
    );
    Ok(())
}

fn available_space(dir: &Path) -> GenResult<u64> {
    fs2::available_space(dir)
        .map_err(|e| GenError::Resource(format!("cannot stat {}: {e}", dir.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;

    fn small_config(dir: &Path) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        config.customers = 200;
        config.output_dir = dir.to_path_buf();
        config
    }

    #[test]
    fn refuses_non_empty_dataset_dir_without_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = small_config(tmp.path());
        config.use_case = UseCase::Customer360;

        let dataset = tmp.path().join("customer360");
        fs::create_dir_all(&dataset).unwrap();
        fs::write(dataset.join("stale.csv"), b"x").unwrap();

        let err = run(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn overwrite_clears_the_dataset_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = small_config(tmp.path());
        config.use_case = UseCase::Customer360;
        config.overwrite = true;

        let dataset = tmp.path().join("customer360");
        fs::create_dir_all(&dataset).unwrap();
        fs::write(dataset.join("stale.csv"), b"x").unwrap();

        run(&config).unwrap();
        assert!(!dataset.join("stale.csv").exists());
        assert!(dataset.join("_report.json").exists());
    }

    #[test]
    fn empty_existing_dataset_dir_is_fine_without_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = small_config(tmp.path());
        config.use_case = UseCase::Customer360;

        fs::create_dir_all(tmp.path().join("customer360")).unwrap();
        run(&config).unwrap();
    }
}
