//! Merchant collusion network: a dense subgraph where every account of
//! a claimed customer set transacts with every claimed merchant inside
//! a one-week window, creating high mutual transaction density.

use super::{FraudEdge, ScenarioOutcome};
use crate::config::ScenarioSizes;
use crate::error::GenResult;
use crate::fraud::plan::PopulationPlan;
use crate::registry::{ClaimRegistry, EntityKind, Scenario};
use crate::rng::StreamRng;
use crate::timeline::Timeline;
use crate::types::{EntityIndex, Money};
use chrono::Duration;

const WINDOW_SECONDS: u64 = 7 * 86_400;

pub fn inject(
    plan: &PopulationPlan,
    sizes: &ScenarioSizes,
    timeline: &Timeline,
    registry: &mut ClaimRegistry,
    rng: &mut StreamRng,
) -> GenResult<ScenarioOutcome> {
    let mut outcome = ScenarioOutcome::new(Scenario::MerchantCollusion);
    if sizes.collusion_customers == 0 {
        return Ok(outcome);
    }

    let customer_pool: Vec<EntityIndex> = (0..plan.fraud_customers).collect();
    let customers = registry.claim_sample(
        EntityKind::Customer,
        Scenario::MerchantCollusion,
        &customer_pool,
        sizes.collusion_customers,
        rng,
    )?;
    let merchant_pool: Vec<EntityIndex> = (0..plan.fraud_merchants).collect();
    let merchants = registry.claim_sample(
        EntityKind::Merchant,
        Scenario::MerchantCollusion,
        &merchant_pool,
        sizes.collusion_merchants,
        rng,
    )?;

    // The whole component burns through one shared window.
    let window_end = timeline.sample_between(rng, 45, 14);

    for customer in &customers {
        for account in plan.accounts_of(*customer) {
            registry.claim(EntityKind::Account, account, Scenario::MerchantCollusion)?;
            outcome.accounts.push(account);
            for merchant in &merchants {
                let ts = window_end - Duration::seconds(rng.next_u64_below(WINDOW_SECONDS) as i64);
                outcome.transactions.push(FraudEdge {
                    from_account: account,
                    to_account: None,
                    merchant: Some(*merchant),
                    amount: rng.money_between(Money::from_dollars(50), Money::from_dollars(2_000)),
                    timestamp: ts,
                    txn_type: "payment",
                    flagged: rng.chance(0.5),
                });
            }
        }
    }

    outcome.customers = customers;
    outcome.merchants = merchants;
    Ok(outcome)
}
