//! Fraud pattern injectors.
//!
//! Each injector claims entity IDs from the shared registry and
//! returns the marked sets plus the edges that instantiate its
//! topology. INVOCATION ORDER (fixed, documented, never reordered):
//!
//!   1. Synthetic identity  (clique)  - claims customers + their accounts
//!   2. Merchant collusion  (dense)   - claims customers, accounts, merchants
//!   3. Account takeover    (star)    - claims devices + accounts
//!   4. Money laundering    (cycle)   - claims accounts
//!   5. Credit card fraud   (bipartite) - claims accounts + merchants
//!
//! Customer-claiming scenarios run first because they drag their
//! accounts with them; account-claiming scenarios then draw from what
//! remains. Reordering changes which IDs each scenario receives.

pub mod bipartite;
pub mod clique;
pub mod cycle;
pub mod dense;
pub mod star;

use crate::config::ScenarioSizes;
use crate::error::{GenError, GenResult};
use crate::registry::{ClaimRegistry, Scenario};
use crate::rng::{RngBank, StreamSlot};
use crate::timeline::Timeline;
use crate::types::{EntityIndex, Money};
use chrono::NaiveDateTime;

use super::plan::PopulationPlan;

/// A fraud transaction edge, expressed in entity indexes. Exactly one
/// of `to_account` / `merchant` is set.
#[derive(Debug, Clone)]
pub struct FraudEdge {
    pub from_account: EntityIndex,
    pub to_account: Option<EntityIndex>,
    pub merchant: Option<EntityIndex>,
    pub amount: Money,
    pub timestamp: NaiveDateTime,
    pub txn_type: &'static str,
    pub flagged: bool,
}

/// A USED_DEVICE edge produced by the takeover ring.
#[derive(Debug, Clone)]
pub struct UsageEdge {
    pub device: EntityIndex,
    pub account: EntityIndex,
    pub first_login: NaiveDateTime,
    pub last_login: NaiveDateTime,
    pub login_count: u32,
    pub failed_attempts: u32,
}

/// PII fields forced to collide inside a synthetic-identity clique.
/// Unset fields keep the factory's own draw.
#[derive(Debug, Clone, Default)]
pub struct PiiOverride {
    pub ssn_hash: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub customers: Vec<EntityIndex>,
    pub accounts: Vec<EntityIndex>,
    pub devices: Vec<EntityIndex>,
    pub merchants: Vec<EntityIndex>,
    pub transactions: Vec<FraudEdge>,
    pub device_usage: Vec<UsageEdge>,
    pub pii_overrides: Vec<(EntityIndex, PiiOverride)>,
}

impl ScenarioOutcome {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            customers: Vec::new(),
            accounts: Vec::new(),
            devices: Vec::new(),
            merchants: Vec::new(),
            transactions: Vec::new(),
            device_usage: Vec::new(),
            pii_overrides: Vec::new(),
        }
    }
}

/// Run all five injectors in the documented order.
pub fn run_all(
    plan: &PopulationPlan,
    sizes: &ScenarioSizes,
    timeline: &Timeline,
    registry: &mut ClaimRegistry,
    bank: &RngBank,
) -> GenResult<Vec<ScenarioOutcome>> {
    let outcomes = vec![
        clique::inject(
            plan,
            sizes,
            registry,
            &mut bank.for_stream(StreamSlot::SyntheticIdentity),
        )?,
        dense::inject(
            plan,
            sizes,
            timeline,
            registry,
            &mut bank.for_stream(StreamSlot::MerchantCollusion),
        )?,
        star::inject(
            plan,
            sizes,
            timeline,
            registry,
            &mut bank.for_stream(StreamSlot::TakeoverRing),
        )?,
        cycle::inject(
            plan,
            sizes,
            timeline,
            registry,
            &mut bank.for_stream(StreamSlot::LaunderingCycle),
        )?,
        bipartite::inject(
            plan,
            sizes,
            timeline,
            registry,
            &mut bank.for_stream(StreamSlot::CardFraud),
        )?,
    ];

    verify_cardinality(&outcomes, sizes)?;
    Ok(outcomes)
}

/// Every scenario must have claimed exactly its configured target.
/// A mismatch would invalidate the documented demo numbers, so it is
/// surfaced as a hard failure, never corrected.
fn verify_cardinality(outcomes: &[ScenarioOutcome], sizes: &ScenarioSizes) -> GenResult<()> {
    for outcome in outcomes {
        let checks: Vec<(&str, usize, usize)> = match outcome.scenario {
            Scenario::SyntheticIdentity => vec![(
                "customers",
                outcome.customers.len(),
                sizes.synthetic_customers,
            )],
            Scenario::MerchantCollusion => vec![
                ("customers", outcome.customers.len(), sizes.collusion_customers),
                ("merchants", outcome.merchants.len(), sizes.collusion_merchants),
            ],
            Scenario::AccountTakeover => vec![
                ("devices", outcome.devices.len(), sizes.takeover_hubs),
                ("accounts", outcome.accounts.len(), sizes.takeover_accounts),
            ],
            Scenario::MoneyLaundering => vec![(
                "accounts",
                outcome.accounts.len(),
                sizes.laundering_accounts,
            )],
            Scenario::CardFraud => vec![
                ("accounts", outcome.accounts.len(), sizes.card_accounts),
                ("merchants", outcome.merchants.len(), sizes.card_merchants),
            ],
        };
        for (dimension, actual, expected) in checks {
            if actual != expected {
                return Err(GenError::Integrity(format!(
                    "scenario '{}' marked {} {} but {} were configured",
                    outcome.scenario.name(),
                    actual,
                    dimension,
                    expected
                )));
            }
        }
    }
    Ok(())
}
