//! Money laundering network: closed transfer cycles of 3-8 accounts.
//!
//! Timestamps are strictly increasing along each cycle, since downstream
//! cycle detection follows the money through time. Every hop
//! shaves a layering fee off the amount.

use super::{FraudEdge, ScenarioOutcome};
use crate::config::ScenarioSizes;
use crate::error::GenResult;
use crate::fraud::plan::PopulationPlan;
use crate::registry::{ClaimRegistry, EntityKind, Scenario};
use crate::rng::StreamRng;
use crate::timeline::Timeline;
use crate::types::{EntityIndex, Money};
use chrono::Duration;

const MIN_CYCLE: usize = 3;
const MAX_CYCLE: usize = 8;

pub fn inject(
    plan: &PopulationPlan,
    sizes: &ScenarioSizes,
    timeline: &Timeline,
    registry: &mut ClaimRegistry,
    rng: &mut StreamRng,
) -> GenResult<ScenarioOutcome> {
    let mut outcome = ScenarioOutcome::new(Scenario::MoneyLaundering);
    if sizes.laundering_accounts == 0 {
        return Ok(outcome);
    }

    let accounts = registry.claim_sample(
        EntityKind::Account,
        Scenario::MoneyLaundering,
        &plan.fraud_account_pool,
        sizes.laundering_accounts,
        rng,
    )?;

    for cycle in partition_cycles(&accounts, rng) {
        let mut amount = rng.money_between(Money::from_dollars(10_000), Money::from_dollars(100_000));
        let fee_pct = rng.range_i64(1, 5);
        let mut ts = timeline.sample_between(rng, 75, 40);

        for (i, from) in cycle.iter().enumerate() {
            let to = cycle[(i + 1) % cycle.len()];
            ts += Duration::hours(rng.range_i64(1, 72));
            outcome.transactions.push(FraudEdge {
                from_account: *from,
                to_account: Some(to),
                merchant: None,
                amount,
                timestamp: ts,
                txn_type: "transfer",
                flagged: rng.chance(0.2),
            });
            amount = amount.scale_pct(100 - fee_pct);
        }
    }

    outcome.accounts = accounts;
    Ok(outcome)
}

/// Split the claimed accounts into cycles of MIN_CYCLE..=MAX_CYCLE.
/// A draw that would strand a 1-2 account tail is shrunk so the tail
/// reaches MIN_CYCLE instead; no cycle ever exceeds MAX_CYCLE.
fn partition_cycles(accounts: &[EntityIndex], rng: &mut StreamRng) -> Vec<Vec<EntityIndex>> {
    let mut cycles = Vec::new();
    let mut idx = 0;
    while accounts.len() - idx >= MIN_CYCLE {
        let remaining = accounts.len() - idx;
        let size = if remaining <= MAX_CYCLE {
            remaining
        } else {
            let drawn = rng.range_u64(MIN_CYCLE as u64, MAX_CYCLE as u64) as usize;
            let leftover = remaining - drawn;
            if leftover < MIN_CYCLE {
                drawn - (MIN_CYCLE - leftover)
            } else {
                drawn
            }
        };
        cycles.push(accounts[idx..idx + size].to_vec());
        idx += size;
    }
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    #[test]
    fn partitions_consume_every_account_in_legal_sizes() {
        let mut rng = RngBank::new(5).for_stream(StreamSlot::LaunderingCycle);
        for n in MIN_CYCLE..60 {
            let accounts: Vec<u64> = (0..n as u64).collect();
            let cycles = partition_cycles(&accounts, &mut rng);
            let total: usize = cycles.iter().map(|c| c.len()).sum();
            assert_eq!(total, n);
            for cycle in &cycles {
                assert!(cycle.len() >= MIN_CYCLE, "undersized cycle for n={n}");
                assert!(cycle.len() <= MAX_CYCLE, "oversized cycle for n={n}");
            }
        }
    }
}
