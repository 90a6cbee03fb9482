//! Referential integrity: every foreign key in every emitted row must
//! resolve against the corresponding entity table, across all batches.

mod common;

use common::{col, read_table, small_config};
use datagen_core::UseCase;
use std::collections::{HashMap, HashSet};

fn id_set(dir: &std::path::Path, table: &str, id_col: &str) -> HashSet<String> {
    let (headers, rows) = read_table(dir, table);
    let idx = col(&headers, id_col);
    rows.iter().map(|r| r[idx].to_string()).collect()
}

#[test]
fn fraud_foreign_keys_all_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = small_config(dir.path(), 500);
    config.use_case = UseCase::FraudDetection;
    datagen_core::run(&config).unwrap();

    let fraud = dir.path().join("fraud");
    let customers = id_set(&fraud, "customers", "customer_id");
    let accounts = id_set(&fraud, "accounts", "account_id");
    let devices = id_set(&fraud, "devices", "device_id");
    let merchants = id_set(&fraud, "merchants", "merchant_id");

    let (headers, rows) = read_table(&fraud, "accounts");
    let cust_col = col(&headers, "customer_id");
    for row in &rows {
        assert!(customers.contains(&row[cust_col]), "dangling customer FK");
    }

    let (headers, rows) = read_table(&fraud, "transactions");
    let from_col = col(&headers, "from_account_id");
    let to_col = col(&headers, "to_account_id");
    let merch_col = col(&headers, "merchant_id");
    let dev_col = col(&headers, "device_id");
    let mut seen_ids = HashSet::new();
    for row in &rows {
        assert!(accounts.contains(&row[from_col]), "dangling from-account");
        if !row[to_col].is_empty() {
            assert!(accounts.contains(&row[to_col]), "dangling to-account");
        }
        if !row[merch_col].is_empty() {
            assert!(merchants.contains(&row[merch_col]), "dangling merchant");
        }
        assert!(devices.contains(&row[dev_col]), "dangling device");
        assert!(seen_ids.insert(row[0].to_string()), "duplicate txn id");
    }

    let (headers, rows) = read_table(&fraud, "device_usage");
    let dev_col = col(&headers, "device_id");
    let acc_col = col(&headers, "account_id");
    for row in &rows {
        assert!(devices.contains(&row[dev_col]), "dangling usage device");
        assert!(accounts.contains(&row[acc_col]), "dangling usage account");
    }
}

#[test]
fn transaction_ip_matches_its_device() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = small_config(dir.path(), 500);
    config.use_case = UseCase::FraudDetection;
    datagen_core::run(&config).unwrap();

    let fraud = dir.path().join("fraud");
    let (headers, rows) = read_table(&fraud, "devices");
    let id_col = col(&headers, "device_id");
    let ip_col = col(&headers, "ip_address");
    let device_ips: HashMap<String, String> = rows
        .iter()
        .map(|r| (r[id_col].to_string(), r[ip_col].to_string()))
        .collect();

    let (headers, rows) = read_table(&fraud, "transactions");
    let dev_col = col(&headers, "device_id");
    let ip_col = col(&headers, "ip_address");
    for row in &rows {
        assert_eq!(
            device_ips[&row[dev_col]],
            &row[ip_col],
            "transaction ip drifted from its device"
        );
    }
}

#[test]
fn customer360_foreign_keys_all_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = small_config(dir.path(), 400);
    config.use_case = UseCase::Customer360;
    datagen_core::run(&config).unwrap();

    let c360 = dir.path().join("customer360");
    let customers = id_set(&c360, "customers", "customer_id");
    let products = id_set(&c360, "products", "product_id");

    let (headers, rows) = read_table(&c360, "transactions");
    let cust_col = col(&headers, "customer_id");
    let prod_col = col(&headers, "product_id");
    for row in &rows {
        assert!(customers.contains(&row[cust_col]), "dangling customer FK");
        assert!(products.contains(&row[prod_col]), "dangling product FK");
    }

    let (headers, rows) = read_table(&c360, "interactions");
    let cust_col = col(&headers, "customer_id");
    let prod_col = col(&headers, "product_id");
    for row in &rows {
        assert!(customers.contains(&row[cust_col]), "dangling customer FK");
        assert!(products.contains(&row[prod_col]), "dangling product FK");
    }
}

#[test]
fn laundering_cycles_are_closed_and_move_forward_in_time() {
    use datagen_core::config::{ScaleProfile, ScenarioSizes};
    use datagen_core::fraud::injectors;
    use datagen_core::fraud::plan::PopulationPlan;
    use datagen_core::registry::{ClaimRegistry, Scenario};
    use datagen_core::rng::RngBank;
    use datagen_core::timeline::Timeline;

    let config = small_config(std::path::Path::new("unused"), 2_000);
    let bank = RngBank::new(config.seed);
    let profile = ScaleProfile::for_customers(config.customers);
    let plan = PopulationPlan::build(&config, &profile, &bank);
    let sizes = ScenarioSizes::derive(
        plan.fraud_customers as usize,
        plan.fraud_account_pool.len(),
        plan.fraud_merchants as usize,
        plan.suspicious_devices as usize,
    );
    let timeline = Timeline::new(config.reference_date);
    let mut registry = ClaimRegistry::new();

    let outcomes = injectors::run_all(&plan, &sizes, &timeline, &mut registry, &bank).unwrap();
    let laundering = outcomes
        .iter()
        .find(|o| o.scenario == Scenario::MoneyLaundering)
        .unwrap();
    assert!(!laundering.transactions.is_empty());

    // Edges are emitted cycle by cycle; a new cycle starts whenever the
    // source account does not continue the previous hop's destination.
    let mut cycle_start = 0;
    let edges = &laundering.transactions;
    for i in 0..edges.len() {
        let is_last_of_cycle = edges[i].to_account == Some(edges[cycle_start].from_account);
        if i > cycle_start {
            assert_eq!(
                Some(edges[i].from_account),
                edges[i - 1].to_account,
                "broken chain inside a cycle"
            );
            assert!(
                edges[i].timestamp > edges[i - 1].timestamp,
                "cycle hop went backwards in time"
            );
            assert!(
                edges[i].amount < edges[i - 1].amount,
                "layering fee failed to shrink the amount"
            );
        }
        if is_last_of_cycle {
            let hops = i + 1 - cycle_start;
            assert!(hops >= 3, "cycle shorter than three hops");
            assert!(hops <= 8, "cycle longer than eight hops");
            cycle_start = i + 1;
        }
    }
    assert_eq!(cycle_start, edges.len(), "trailing edges outside any cycle");
}
