//! Population planning pass.
//!
//! The plan replays the per-customer account-count draws on the
//! dedicated AccountPlan stream, so account index ranges are known
//! before any row is emitted. The emission pass replays the identical
//! draws and therefore agrees byte-for-byte on ownership. This is what
//! lets the injectors claim account IDs up front without materializing
//! any entity table.

use crate::config::{GeneratorConfig, ScaleProfile};
use crate::rng::{RngBank, StreamRng, StreamSlot};
use crate::types::EntityIndex;

const FRAUD_ACCOUNT_COUNTS: &[u64] = &[1, 2, 3, 4, 5];
const FRAUD_ACCOUNT_WEIGHTS: &[f64] = &[0.20, 0.30, 0.25, 0.15, 0.10];
const NORMAL_ACCOUNT_COUNTS: &[u64] = &[1, 2, 3];
const NORMAL_ACCOUNT_WEIGHTS: &[f64] = &[0.60, 0.30, 0.10];

/// How many accounts a customer owns. Replayed verbatim by the
/// emission pass; both passes must call this with the same stream.
pub fn accounts_for_customer(is_fraud: bool, rng: &mut StreamRng) -> u64 {
    if is_fraud {
        FRAUD_ACCOUNT_COUNTS[rng.weighted_index(FRAUD_ACCOUNT_WEIGHTS)]
    } else {
        NORMAL_ACCOUNT_COUNTS[rng.weighted_index(NORMAL_ACCOUNT_WEIGHTS)]
    }
}

#[derive(Debug)]
pub struct PopulationPlan {
    pub customers: u64,
    pub fraud_customers: u64,
    pub total_accounts: u64,
    pub devices: u64,
    pub suspicious_devices: u64,
    pub merchants: u64,
    pub fraud_merchants: u64,
    pub transactions: u64,
    /// (customer index, first account index, account count) for every
    /// fraud-flagged customer, in customer order.
    pub fraud_customer_accounts: Vec<(EntityIndex, EntityIndex, u64)>,
    /// Flat list of every account index owned by a fraud customer.
    pub fraud_account_pool: Vec<EntityIndex>,
}

impl PopulationPlan {
    pub fn build(config: &GeneratorConfig, profile: &ScaleProfile, bank: &RngBank) -> Self {
        let customers = config.customers;
        let fraud_customers = ratio_count(customers, config.fraud_customer_ratio);

        let mut rng = bank.for_stream(StreamSlot::AccountPlan);
        let mut total_accounts = 0u64;
        let mut fraud_customer_accounts = Vec::with_capacity(fraud_customers as usize);
        let mut fraud_account_pool = Vec::new();

        for i in 0..customers {
            let is_fraud = i < fraud_customers;
            let count = accounts_for_customer(is_fraud, &mut rng);
            if is_fraud {
                fraud_customer_accounts.push((i, total_accounts, count));
                fraud_account_pool.extend(total_accounts..total_accounts + count);
            }
            total_accounts += count;
        }

        Self {
            customers,
            fraud_customers,
            total_accounts,
            devices: profile.devices,
            suspicious_devices: ratio_count(profile.devices, config.suspicious_device_ratio),
            merchants: profile.merchants,
            fraud_merchants: ratio_count(profile.merchants, config.fraud_merchant_ratio),
            transactions: profile.transactions,
            fraud_customer_accounts,
            fraud_account_pool,
        }
    }

    /// Account index range owned by a fraud-flagged customer.
    /// Panics if the index is not in the fraud slice; callers only
    /// reach this through claims drawn from the fraud customer pool.
    pub fn accounts_of(&self, customer: EntityIndex) -> std::ops::Range<EntityIndex> {
        let slot = self
            .fraud_customer_accounts
            .binary_search_by_key(&customer, |(c, _, _)| *c)
            .expect("customer is fraud-flagged");
        let (_, first, count) = self.fraud_customer_accounts[slot];
        first..first + count
    }
}

fn ratio_count(total: u64, ratio: f64) -> u64 {
    (total as f64 * ratio).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;

    fn plan_for(customers: u64, seed: u64) -> PopulationPlan {
        let mut config = GeneratorConfig::default();
        config.customers = customers;
        config.seed = seed;
        let profile = ScaleProfile::for_customers(customers);
        PopulationPlan::build(&config, &profile, &RngBank::new(seed))
    }

    #[test]
    fn fraud_customer_count_is_the_configured_ratio() {
        let plan = plan_for(1_000, 42);
        assert_eq!(plan.fraud_customers, 30);
    }

    #[test]
    fn plan_is_deterministic() {
        let a = plan_for(2_000, 7);
        let b = plan_for(2_000, 7);
        assert_eq!(a.total_accounts, b.total_accounts);
        assert_eq!(a.fraud_account_pool, b.fraud_account_pool);
    }

    #[test]
    fn fraud_pool_matches_per_customer_ranges() {
        let plan = plan_for(500, 3);
        let from_ranges: Vec<u64> = plan
            .fraud_customer_accounts
            .iter()
            .flat_map(|(_, first, count)| *first..*first + *count)
            .collect();
        assert_eq!(from_ranges, plan.fraud_account_pool);
        for (customer, first, count) in &plan.fraud_customer_accounts {
            let range = plan.accounts_of(*customer);
            assert_eq!(range, *first..*first + *count);
        }
    }

    #[test]
    fn zero_customers_yield_an_empty_plan() {
        let plan = plan_for(0, 1);
        assert_eq!(plan.total_accounts, 0);
        assert_eq!(plan.fraud_customers, 0);
        assert!(plan.fraud_account_pool.is_empty());
    }
}
