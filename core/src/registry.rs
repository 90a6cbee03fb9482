//! Claimed-ID registry shared by the fraud injectors.
//!
//! Injectors run single-threaded in a fixed order and each receives
//! `&mut ClaimRegistry`; claiming the same ID twice for different
//! scenarios is an integrity error, never silently corrected. This
//! keeps the marked-participant sets of the five scenarios pairwise
//! disjoint by construction.

use crate::error::{GenError, GenResult};
use crate::rng::StreamRng;
use crate::types::EntityIndex;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    AccountTakeover,
    MoneyLaundering,
    CardFraud,
    SyntheticIdentity,
    MerchantCollusion,
}

impl Scenario {
    pub fn name(self) -> &'static str {
        match self {
            Scenario::AccountTakeover => "account_takeover",
            Scenario::MoneyLaundering => "money_laundering",
            Scenario::CardFraud => "credit_card_fraud",
            Scenario::SyntheticIdentity => "synthetic_identity",
            Scenario::MerchantCollusion => "merchant_collusion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Customer,
    Account,
    Device,
    Merchant,
}

impl EntityKind {
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Customer => "customer",
            EntityKind::Account => "account",
            EntityKind::Device => "device",
            EntityKind::Merchant => "merchant",
        }
    }
}

#[derive(Default)]
pub struct ClaimRegistry {
    claimed: HashMap<(EntityKind, EntityIndex), Scenario>,
}

impl ClaimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim one ID for a scenario. Claiming an ID already held by a
    /// different scenario is an integrity violation.
    pub fn claim(
        &mut self,
        kind: EntityKind,
        id: EntityIndex,
        scenario: Scenario,
    ) -> GenResult<()> {
        if let Some(holder) = self.claimed.get(&(kind, id)) {
            if *holder != scenario {
                return Err(GenError::Integrity(format!(
                    "{} {} already claimed by '{}' while '{}' tried to claim it",
                    kind.name(),
                    id,
                    holder.name(),
                    scenario.name()
                )));
            }
            return Ok(());
        }
        self.claimed.insert((kind, id), scenario);
        Ok(())
    }

    /// Sample `n` distinct unclaimed IDs from `pool` and claim them.
    /// Fails loudly when the pool cannot cover the request; silent
    /// truncation would break the documented scale guarantees.
    pub fn claim_sample(
        &mut self,
        kind: EntityKind,
        scenario: Scenario,
        pool: &[EntityIndex],
        n: usize,
        rng: &mut StreamRng,
    ) -> GenResult<Vec<EntityIndex>> {
        let mut available: Vec<EntityIndex> = pool
            .iter()
            .copied()
            .filter(|id| !self.claimed.contains_key(&(kind, *id)))
            .collect();

        if available.len() < n {
            return Err(GenError::PoolExhausted {
                scenario: scenario.name(),
                kind: kind.name(),
                needed: n,
                available: available.len(),
            });
        }

        // Partial Fisher-Yates: the first n positions end up holding a
        // uniform sample without replacement.
        for i in 0..n {
            let j = i + rng.next_u64_below((available.len() - i) as u64) as usize;
            available.swap(i, j);
        }
        available.truncate(n);

        for id in &available {
            self.claim(kind, *id, scenario)?;
        }
        Ok(available)
    }

    pub fn is_claimed(&self, kind: EntityKind, id: EntityIndex) -> bool {
        self.claimed.contains_key(&(kind, id))
    }

    pub fn holder(&self, kind: EntityKind, id: EntityIndex) -> Option<Scenario> {
        self.claimed.get(&(kind, id)).copied()
    }

    pub fn claimed_count(&self, kind: EntityKind, scenario: Scenario) -> usize {
        self.claimed
            .iter()
            .filter(|((k, _), s)| *k == kind && **s == scenario)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    fn rng() -> StreamRng {
        RngBank::new(11).for_stream(StreamSlot::TakeoverRing)
    }

    #[test]
    fn double_claim_across_scenarios_is_an_integrity_error() {
        let mut registry = ClaimRegistry::new();
        registry
            .claim(EntityKind::Account, 7, Scenario::AccountTakeover)
            .unwrap();
        let err = registry
            .claim(EntityKind::Account, 7, Scenario::MoneyLaundering)
            .unwrap_err();
        assert!(matches!(err, GenError::Integrity(_)));
    }

    #[test]
    fn reclaim_by_same_scenario_is_idempotent() {
        let mut registry = ClaimRegistry::new();
        registry
            .claim(EntityKind::Device, 3, Scenario::AccountTakeover)
            .unwrap();
        registry
            .claim(EntityKind::Device, 3, Scenario::AccountTakeover)
            .unwrap();
        assert_eq!(
            registry.claimed_count(EntityKind::Device, Scenario::AccountTakeover),
            1
        );
    }

    #[test]
    fn sample_claims_exactly_n_distinct_ids() {
        let mut registry = ClaimRegistry::new();
        let pool: Vec<u64> = (0..100).collect();
        let mut r = rng();
        let picked = registry
            .claim_sample(EntityKind::Account, Scenario::CardFraud, &pool, 40, &mut r)
            .unwrap();
        assert_eq!(picked.len(), 40);
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 40);
    }

    #[test]
    fn exhausted_pool_fails_loudly_instead_of_truncating() {
        let mut registry = ClaimRegistry::new();
        let pool: Vec<u64> = (0..10).collect();
        let mut r = rng();
        registry
            .claim_sample(EntityKind::Account, Scenario::CardFraud, &pool, 8, &mut r)
            .unwrap();
        let err = registry
            .claim_sample(
                EntityKind::Account,
                Scenario::MoneyLaundering,
                &pool,
                5,
                &mut r,
            )
            .unwrap_err();
        match err {
            GenError::PoolExhausted {
                needed, available, ..
            } => {
                assert_eq!(needed, 5);
                assert_eq!(available, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
