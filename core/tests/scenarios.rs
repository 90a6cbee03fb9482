//! Scenario-level guarantees: exact flagged-population counts, exact
//! scenario cardinalities, pairwise-disjoint participant sets, and loud
//! failure when a pool cannot cover an explicit override.

mod common;

use common::{col, read_table, small_config};
use datagen_core::config::{ScaleProfile, ScenarioSizes};
use datagen_core::fraud::injectors;
use datagen_core::fraud::plan::PopulationPlan;
use datagen_core::registry::{ClaimRegistry, EntityKind};
use datagen_core::rng::RngBank;
use datagen_core::timeline::Timeline;
use datagen_core::{GenError, UseCase};
use std::collections::HashSet;

#[test]
fn thousand_customer_run_flags_exactly_thirty() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = small_config(dir.path(), 1_000);
    config.use_case = UseCase::FraudDetection;
    let reports = datagen_core::run(&config).unwrap();

    let fraud_dir = dir.path().join("fraud");
    let (headers, rows) = read_table(&fraud_dir, "customers");
    assert_eq!(rows.len(), 1_000);
    let fraud_col = col(&headers, "is_fraudulent");
    let flagged = rows.iter().filter(|r| &r[fraud_col] == "true").count();
    assert_eq!(flagged, 30);

    // All five scenarios are present at this scale.
    let scenario_names: HashSet<&str> = reports[0]
        .scenarios
        .iter()
        .filter(|s| s.participants() > 0)
        .map(|s| s.scenario.as_str())
        .collect();
    for name in [
        "account_takeover",
        "money_laundering",
        "credit_card_fraud",
        "synthetic_identity",
        "merchant_collusion",
    ] {
        assert!(scenario_names.contains(name), "missing scenario {name}");
    }
}

#[test]
fn scenario_participants_are_pairwise_disjoint_and_exact() {
    let config = small_config(std::path::Path::new("unused"), 1_000);
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

    // Exact cardinality per scenario dimension.
    for outcome in &outcomes {
        use datagen_core::registry::Scenario::*;
        match outcome.scenario {
            AccountTakeover => {
                assert_eq!(outcome.devices.len(), sizes.takeover_hubs);
                assert_eq!(outcome.accounts.len(), sizes.takeover_accounts);
            }
            MoneyLaundering => assert_eq!(outcome.accounts.len(), sizes.laundering_accounts),
            CardFraud => {
                assert_eq!(outcome.accounts.len(), sizes.card_accounts);
                assert_eq!(outcome.merchants.len(), sizes.card_merchants);
            }
            SyntheticIdentity => {
                assert_eq!(outcome.customers.len(), sizes.synthetic_customers)
            }
            MerchantCollusion => {
                assert_eq!(outcome.customers.len(), sizes.collusion_customers);
                assert_eq!(outcome.merchants.len(), sizes.collusion_merchants);
            }
        }
    }

    // Disjointness per entity kind across scenarios.
    for (kind, pick) in [
        (
            EntityKind::Customer,
            (|o: &injectors::ScenarioOutcome| o.customers.clone())
                as fn(&injectors::ScenarioOutcome) -> Vec<u64>,
        ),
        (EntityKind::Account, |o| o.accounts.clone()),
        (EntityKind::Device, |o| o.devices.clone()),
        (EntityKind::Merchant, |o| o.merchants.clone()),
    ] {
        let mut seen = HashSet::new();
        for outcome in &outcomes {
            for id in pick(outcome) {
                assert!(
                    seen.insert(id),
                    "{:?} {id} appears in more than one scenario",
                    kind
                );
            }
        }
    }

    // Every marked account belongs to a fraud-flagged customer's range.
    let pool: HashSet<u64> = plan.fraud_account_pool.iter().copied().collect();
    for outcome in &outcomes {
        for account in &outcome.accounts {
            assert!(pool.contains(account), "marked account outside fraud pool");
        }
    }
}

#[test]
fn oversized_override_fails_loudly_with_a_config_exit() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = small_config(dir.path(), 200);
    config.use_case = UseCase::FraudDetection;
    config.scenario_override = Some(ScenarioSizes {
        takeover_accounts: 10_000,
        takeover_hubs: 5,
        ..Default::default()
    });

    let err = datagen_core::run(&config).unwrap_err();
    match &err {
        GenError::PoolExhausted { needed, .. } => assert_eq!(*needed, 10_000),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn synthetic_identity_groups_share_pii_in_the_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = small_config(dir.path(), 1_000);
    config.use_case = UseCase::FraudDetection;
    datagen_core::run(&config).unwrap();

    let fraud_dir = dir.path().join("fraud");
    let (headers, rows) = read_table(&fraud_dir, "customers");
    let ssn_col = col(&headers, "ssn_hash");
    let phone_col = col(&headers, "phone");
    let addr_col = col(&headers, "address");
    let fraud_col = col(&headers, "is_fraudulent");

    // At least one PII value is shared by two or more flagged customers.
    let mut collisions = 0;
    for idx in [ssn_col, phone_col, addr_col] {
        let mut seen = HashSet::new();
        for row in rows.iter().filter(|r| &r[fraud_col] == "true") {
            if !seen.insert(row[idx].to_string()) {
                collisions += 1;
            }
        }
    }
    assert!(collisions > 0, "no shared PII among flagged customers");
}
