//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! All randomness flows through StreamRng instances derived
//! from the single master seed in the run configuration.
//!
//! Each component gets its own RNG stream, seeded deterministically
//! from (master_seed XOR stream_index). This means:
//!   - Adding a new stream never changes existing streams.
//!   - Each component's draw sequence is fully reproducible in
//!     isolation, so a planning pass can replay exactly the draws an
//!     emission pass will make.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use crate::types::Money;

/// A named, deterministic RNG for a single generator component.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream RNG from the master seed and a stable stream
    /// index. The index must never change once assigned.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll a u64 in [lo, hi] inclusive.
    pub fn range_u64(&mut self, lo: u64, hi: u64) -> u64 {
        assert!(lo <= hi, "range_u64 lo > hi");
        lo + self.next_u64_below(hi - lo + 1)
    }

    /// Roll an i64 in [lo, hi] inclusive.
    pub fn range_i64(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi, "range_i64 lo > hi");
        lo + self.next_u64_below((hi - lo + 1) as u64) as i64
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick one element of a non-empty slice, uniformly.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }

    /// Weighted categorical draw: returns the index of the chosen
    /// weight. Weights need not be normalized.
    pub fn weighted_index(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let roll = self.next_f64() * total;
        let mut cumulative = 0.0;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if roll < cumulative {
                return i;
            }
        }
        weights.len() - 1
    }

    /// Standard normal draw via Box-Muller.
    pub fn normal(&mut self, mu: f64, sigma: f64) -> f64 {
        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mu + sigma * z
    }

    /// Sample from a lognormal distribution.
    pub fn lognormal(&mut self, mu: f64, sigma: f64) -> f64 {
        self.normal(mu, sigma).exp()
    }

    /// Uniform amount in [lo, hi], cent-resolution.
    pub fn money_between(&mut self, lo: Money, hi: Money) -> Money {
        Money::from_cents(self.range_i64(lo.cents(), hi.cents()))
    }

    /// A score in [lo, hi) rounded to two decimals, stable to print.
    pub fn score_between(&mut self, lo: f64, hi: f64) -> f64 {
        let raw = lo + self.next_f64() * (hi - lo);
        (raw * 100.0).round() / 100.0
    }

    /// Lowercase hex string of `len` nibbles (fingerprints, hashes).
    pub fn hex_string(&mut self, len: usize) -> String {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        (0..len)
            .map(|_| HEX[self.next_u64_below(16) as usize] as char)
            .collect()
    }
}

/// All component RNG streams for a single run, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_stream(&self, slot: StreamSlot) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }

    /// Per-entity stream: an independent draw sequence for one
    /// (slot, entity index) pair. Lets a later pass recompute a single
    /// entity's attribute without replaying the whole entity stream.
    pub fn for_entity(&self, slot: StreamSlot, index: u64) -> StreamRng {
        let salted = self.master_seed ^ index.wrapping_mul(0xa076_1d64_78bd_642f);
        StreamRng::new(salted, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries; only append.
/// Reordering changes every component's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Customer = 0,
    AccountPlan = 1, // per-customer account-count draws, replayed by plan + emission
    Account = 2,
    Device = 3,
    Merchant = 4,
    Transaction = 5,
    Product = 6,
    C360Customer = 7,
    Interaction = 8,
    TakeoverRing = 9,
    LaunderingCycle = 10,
    CardFraud = 11,
    SyntheticIdentity = 12,
    MerchantCollusion = 13,
    FraudNoise = 14,
    DeviceIp = 15, // per-device, via for_entity
    // Add new streams here, append only.
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::AccountPlan => "account_plan",
            Self::Account => "account",
            Self::Device => "device",
            Self::Merchant => "merchant",
            Self::Transaction => "transaction",
            Self::Product => "product",
            Self::C360Customer => "c360_customer",
            Self::Interaction => "interaction",
            Self::TakeoverRing => "takeover_ring",
            Self::LaunderingCycle => "laundering_cycle",
            Self::CardFraud => "card_fraud",
            Self::SyntheticIdentity => "synthetic_identity",
            Self::MerchantCollusion => "merchant_collusion",
            Self::FraudNoise => "fraud_noise",
            Self::DeviceIp => "device_ip",
        }
    }
}
