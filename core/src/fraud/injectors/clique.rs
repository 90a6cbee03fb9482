//! Synthetic identity fraud: cliques of customers sharing PII.
//!
//! Claimed customers are grouped 3-6 at a time; each group shares one
//! forced PII value (SSN hash, phone or address, rotating per group)
//! so every pair in the group overlaps on at least one field. Each
//! member keeps its accounts, all marked.

use super::{PiiOverride, ScenarioOutcome};
use crate::config::ScenarioSizes;
use crate::error::GenResult;
use crate::fraud::plan::PopulationPlan;
use crate::names::NamePool;
use crate::registry::{ClaimRegistry, EntityKind, Scenario};
use crate::rng::StreamRng;
use crate::types::EntityIndex;

const MIN_CLIQUE: usize = 3;
const MAX_CLIQUE: usize = 6;

pub fn inject(
    plan: &PopulationPlan,
    sizes: &ScenarioSizes,
    registry: &mut ClaimRegistry,
    rng: &mut StreamRng,
) -> GenResult<ScenarioOutcome> {
    let mut outcome = ScenarioOutcome::new(Scenario::SyntheticIdentity);
    if sizes.synthetic_customers == 0 {
        return Ok(outcome);
    }

    let customer_pool: Vec<EntityIndex> = (0..plan.fraud_customers).collect();
    let customers = registry.claim_sample(
        EntityKind::Customer,
        Scenario::SyntheticIdentity,
        &customer_pool,
        sizes.synthetic_customers,
        rng,
    )?;

    let mut idx = 0;
    let mut group_no = 0usize;
    while idx < customers.len() {
        let remaining = customers.len() - idx;
        let size = if remaining <= MAX_CLIQUE {
            remaining
        } else {
            // Shrink a draw that would strand a 1-2 customer tail.
            let drawn = rng.range_u64(MIN_CLIQUE as u64, MAX_CLIQUE as u64) as usize;
            let leftover = remaining - drawn;
            if leftover < MIN_CLIQUE {
                drawn - (MIN_CLIQUE - leftover)
            } else {
                drawn
            }
        };
        let group = &customers[idx..idx + size];
        idx += size;

        // One shared field per group, rotating so all three collision
        // kinds appear in the corpus.
        let shared = match group_no % 3 {
            0 => PiiOverride {
                ssn_hash: Some(rng.hex_string(16)),
                ..Default::default()
            },
            1 => PiiOverride {
                phone: Some(NamePool::phone(rng)),
                ..Default::default()
            },
            _ => PiiOverride {
                address: Some(NamePool::shared_fraud_address(rng).to_string()),
                ..Default::default()
            },
        };
        group_no += 1;

        for customer in group {
            outcome.pii_overrides.push((*customer, shared.clone()));
            for account in plan.accounts_of(*customer) {
                registry.claim(EntityKind::Account, account, Scenario::SyntheticIdentity)?;
                outcome.accounts.push(account);
            }
        }
    }

    outcome.customers = customers;
    Ok(outcome)
}
