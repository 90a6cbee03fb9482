//! Fraud-detection dataset generator.
//!
//! Pipeline: plan the population, run the scenario injectors against
//! the plan, then stream every table out through the batch writers.
//! Scenario claims happen before a single row is written, so entity
//! emission already knows which IDs carry forced attributes.

pub mod entities;
pub mod injectors;
pub mod plan;
pub mod records;
pub mod transactions;

use crate::config::{GeneratorConfig, ScaleProfile, ScenarioSizes};
use crate::error::GenResult;
use crate::registry::ClaimRegistry;
use crate::report::{ScenarioReport, TableReport};
use crate::rng::RngBank;
use crate::timeline::Timeline;
use crate::types::EntityIndex;
use crate::writer::BatchWriter;

use injectors::{PiiOverride, ScenarioOutcome, UsageEdge};
use plan::PopulationPlan;
use records::{
    account_id, device_id, AccountRecord, CustomerRecord, DeviceRecord, DeviceUsageRecord,
    MerchantRecord, TransactionRecord,
};
use std::collections::HashMap;
use std::path::Path;

pub fn generate(
    config: &GeneratorConfig,
    out_dir: &Path,
) -> GenResult<(Vec<TableReport>, Vec<ScenarioReport>)> {
    let timeline = Timeline::new(config.reference_date);
    let bank = RngBank::new(config.seed);
    let profile = ScaleProfile::for_customers(config.customers);

    let plan = PopulationPlan::build(config, &profile, &bank);
    let sizes = config.scenario_override.unwrap_or_else(|| {
        ScenarioSizes::derive(
            plan.fraud_customers as usize,
            plan.fraud_account_pool.len(),
            plan.fraud_merchants as usize,
            plan.suspicious_devices as usize,
        )
    });
    log::info!(
        "fraud plan: {} customers ({} flagged), {} accounts, {} devices, {} merchants, {} scenario participants",
        plan.customers,
        plan.fraud_customers,
        plan.total_accounts,
        plan.devices,
        plan.merchants,
        sizes.total_participants()
    );

    let mut registry = ClaimRegistry::new();
    let outcomes = injectors::run_all(&plan, &sizes, &timeline, &mut registry, &bank)?;

    let pii: HashMap<EntityIndex, PiiOverride> = outcomes
        .iter()
        .flat_map(|o| o.pii_overrides.iter().cloned())
        .collect();

    let mut customers_w =
        table_writer(config, out_dir, CustomerRecord::TABLE, CustomerRecord::HEADERS);
    let mut accounts_w =
        table_writer(config, out_dir, AccountRecord::TABLE, AccountRecord::HEADERS);
    let mut devices_w = table_writer(config, out_dir, DeviceRecord::TABLE, DeviceRecord::HEADERS);
    let mut merchants_w =
        table_writer(config, out_dir, MerchantRecord::TABLE, MerchantRecord::HEADERS);
    let mut usage_w =
        table_writer(config, out_dir, DeviceUsageRecord::TABLE, DeviceUsageRecord::HEADERS);
    let mut txns_w =
        table_writer(config, out_dir, TransactionRecord::TABLE, TransactionRecord::HEADERS);

    entities::emit_customers_and_accounts(
        &plan,
        &timeline,
        &bank,
        &pii,
        &mut customers_w,
        &mut accounts_w,
    )?;
    entities::emit_devices(&plan, &timeline, &bank, &mut devices_w, &mut usage_w)?;
    entities::emit_merchants(&plan, &timeline, &bank, &mut merchants_w)?;

    // Takeover-ring login edges go out after the background usage rows.
    for outcome in &outcomes {
        for edge in &outcome.device_usage {
            usage_w.write(&usage_record(edge))?;
        }
    }

    transactions::emit_transactions(&plan, config, &outcomes, &timeline, &bank, &mut txns_w)?;

    let tables = vec![
        customers_w.finish()?,
        accounts_w.finish()?,
        devices_w.finish()?,
        merchants_w.finish()?,
        usage_w.finish()?,
        txns_w.finish()?,
    ];
    let scenarios = outcomes.iter().map(scenario_report).collect();
    Ok((tables, scenarios))
}

fn usage_record(edge: &UsageEdge) -> DeviceUsageRecord {
    DeviceUsageRecord {
        device_id: device_id(edge.device),
        account_id: account_id(edge.account),
        first_login: edge.first_login,
        last_login: edge.last_login,
        login_count: edge.login_count,
        failed_attempts: edge.failed_attempts,
        is_fraudulent: true,
    }
}

fn scenario_report(outcome: &ScenarioOutcome) -> ScenarioReport {
    ScenarioReport {
        scenario: outcome.scenario.name().to_string(),
        customers: outcome.customers.len(),
        accounts: outcome.accounts.len(),
        devices: outcome.devices.len(),
        merchants: outcome.merchants.len(),
        transactions: outcome.transactions.len(),
        device_usage: outcome.device_usage.len(),
    }
}

fn table_writer(
    config: &GeneratorConfig,
    out_dir: &Path,
    table: &str,
    headers: &[&'static str],
) -> BatchWriter {
    BatchWriter::new(out_dir, table, headers, config.compression, config.batch_size)
}
