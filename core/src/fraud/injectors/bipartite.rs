//! Credit card fraud cluster: a bipartite burst between compromised
//! accounts and colluding merchants. Every account pays every merchant
//! inside a two-week window, all edges flagged.

use super::{FraudEdge, ScenarioOutcome};
use crate::config::ScenarioSizes;
use crate::error::GenResult;
use crate::fraud::plan::PopulationPlan;
use crate::registry::{ClaimRegistry, EntityKind, Scenario};
use crate::rng::StreamRng;
use crate::timeline::Timeline;
use crate::types::{EntityIndex, Money};

pub fn inject(
    plan: &PopulationPlan,
    sizes: &ScenarioSizes,
    timeline: &Timeline,
    registry: &mut ClaimRegistry,
    rng: &mut StreamRng,
) -> GenResult<ScenarioOutcome> {
    let mut outcome = ScenarioOutcome::new(Scenario::CardFraud);
    if sizes.card_accounts == 0 {
        return Ok(outcome);
    }

    let accounts = registry.claim_sample(
        EntityKind::Account,
        Scenario::CardFraud,
        &plan.fraud_account_pool,
        sizes.card_accounts,
        rng,
    )?;
    let merchant_pool: Vec<EntityIndex> = (0..plan.fraud_merchants).collect();
    let merchants = registry.claim_sample(
        EntityKind::Merchant,
        Scenario::CardFraud,
        &merchant_pool,
        sizes.card_merchants,
        rng,
    )?;

    for account in &accounts {
        for merchant in &merchants {
            outcome.transactions.push(FraudEdge {
                from_account: *account,
                to_account: None,
                merchant: Some(*merchant),
                amount: rng.money_between(Money::from_dollars(5), Money::from_dollars(500)),
                timestamp: timeline.sample_between(rng, 21, 7),
                txn_type: "payment",
                flagged: true,
            });
        }
    }

    outcome.accounts = accounts;
    outcome.merchants = merchants;
    Ok(outcome)
}
