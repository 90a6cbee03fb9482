//! Transaction synthesis for the fraud-detection domain.
//!
//! Rows go out in three blocks with one shared sequential ID space:
//! background traffic, unstructured fraud noise, then the injected
//! scenario edges. Noise tops the flagged population up to the
//! configured fraud-transaction ratio; the scenario edges always ship
//! in full even when they already exceed that ratio.

use super::entities::device_ip;
use super::injectors::ScenarioOutcome;
use super::plan::PopulationPlan;
use super::records::{account_id, device_id, merchant_id, transaction_id, TransactionRecord};
use crate::config::GeneratorConfig;
use crate::error::GenResult;
use crate::rng::{RngBank, StreamRng, StreamSlot};
use crate::timeline::Timeline;
use crate::types::Money;
use crate::writer::BatchWriter;

const BACKGROUND_TYPES: &[&str] = &["transfer", "deposit", "withdrawal", "payment"];
const BACKGROUND_TYPE_WEIGHTS: &[f64] = &[0.30, 0.20, 0.20, 0.30];

const NOISE_TYPES: &[&str] = &["transfer", "withdrawal", "payment"];
const NOISE_TYPE_WEIGHTS: &[f64] = &[0.50, 0.30, 0.20];

// Structuring-style amounts that show up in real alert queues.
const ROUND_NOISE_DOLLARS: &[i64] = &[1_000, 5_000, 10_000, 25_000, 50_000];

pub fn emit_transactions(
    plan: &PopulationPlan,
    config: &GeneratorConfig,
    outcomes: &[ScenarioOutcome],
    timeline: &Timeline,
    bank: &RngBank,
    txns_w: &mut BatchWriter,
) -> GenResult<()> {
    if plan.total_accounts == 0 || plan.devices == 0 {
        return Ok(());
    }

    let scenario_edges: u64 = outcomes.iter().map(|o| o.transactions.len() as u64).sum();
    let fraud_target = (plan.transactions as f64 * config.fraud_txn_ratio).round() as u64;
    let noise = fraud_target.saturating_sub(scenario_edges);
    let background = plan.transactions.saturating_sub(scenario_edges + noise);

    let mut index = 0u64;

    let mut rng = bank.for_stream(StreamSlot::Transaction);
    for _ in 0..background {
        let record = background_transaction(plan, bank, timeline, &mut rng, index);
        txns_w.write(&record)?;
        index += 1;
    }

    let mut noise_rng = bank.for_stream(StreamSlot::FraudNoise);
    for _ in 0..noise {
        let record = noise_transaction(plan, bank, timeline, &mut noise_rng, index);
        txns_w.write(&record)?;
        index += 1;
    }

    for outcome in outcomes {
        for edge in &outcome.transactions {
            let device = noise_rng.next_u64_below(plan.devices);
            txns_w.write(&TransactionRecord {
                transaction_id: transaction_id(index),
                from_account_id: account_id(edge.from_account),
                to_account_id: edge.to_account.map(account_id),
                amount: edge.amount,
                currency: "USD".to_string(),
                transaction_type: edge.txn_type.to_string(),
                merchant_id: edge.merchant.map(merchant_id),
                device_id: device_id(device),
                ip_address: device_ip(plan, bank, device),
                timestamp: edge.timestamp,
                is_flagged: edge.flagged,
                risk_score: noise_rng.score_between(0.75, 0.99),
                is_fraudulent: true,
            })?;
            index += 1;
        }
    }

    Ok(())
}

fn background_transaction(
    plan: &PopulationPlan,
    bank: &RngBank,
    timeline: &Timeline,
    rng: &mut StreamRng,
    index: u64,
) -> TransactionRecord {
    let from = rng.next_u64_below(plan.total_accounts);
    let txn_type = BACKGROUND_TYPES[rng.weighted_index(BACKGROUND_TYPE_WEIGHTS)];

    let to_account_id = (txn_type == "transfer").then(|| {
        // Avoid self-transfers when more than one account exists.
        let mut to = rng.next_u64_below(plan.total_accounts);
        if to == from && plan.total_accounts > 1 {
            to = (to + 1) % plan.total_accounts;
        }
        account_id(to)
    });
    let merchant_id = (txn_type == "payment" && plan.merchants > 0)
        .then(|| merchant_id(rng.next_u64_below(plan.merchants)));

    let dollars = rng.normal(500.0, 200.0).clamp(1.0, 10_000.0);
    let device = rng.next_u64_below(plan.devices);
    TransactionRecord {
        transaction_id: transaction_id(index),
        from_account_id: account_id(from),
        to_account_id,
        amount: Money::from_cents((dollars * 100.0).round() as i64),
        currency: "USD".to_string(),
        transaction_type: txn_type.to_string(),
        merchant_id,
        device_id: device_id(device),
        ip_address: device_ip(plan, bank, device),
        timestamp: timeline.sample_between(rng, 90, 0),
        is_flagged: false,
        risk_score: rng.score_between(0.10, 0.30),
        is_fraudulent: false,
    }
}

fn noise_transaction(
    plan: &PopulationPlan,
    bank: &RngBank,
    timeline: &Timeline,
    rng: &mut StreamRng,
    index: u64,
) -> TransactionRecord {
    // Noise originates from fraud-owned accounts where any exist.
    let from = if plan.fraud_account_pool.is_empty() {
        rng.next_u64_below(plan.total_accounts)
    } else {
        *rng.pick(&plan.fraud_account_pool)
    };
    let txn_type = NOISE_TYPES[rng.weighted_index(NOISE_TYPE_WEIGHTS)];

    let to_account_id =
        (txn_type == "transfer").then(|| account_id(rng.next_u64_below(plan.total_accounts)));
    let merchant_id = (txn_type == "payment" && plan.merchants > 0)
        .then(|| merchant_id(rng.next_u64_below(plan.merchants)));

    let amount = if rng.chance(0.4) {
        Money::from_dollars(*rng.pick(ROUND_NOISE_DOLLARS))
    } else {
        rng.money_between(Money::from_dollars(1_000), Money::from_dollars(50_000))
    };

    let device = rng.next_u64_below(plan.devices);
    TransactionRecord {
        transaction_id: transaction_id(index),
        from_account_id: account_id(from),
        to_account_id,
        amount,
        currency: "USD".to_string(),
        transaction_type: txn_type.to_string(),
        merchant_id,
        device_id: device_id(device),
        ip_address: device_ip(plan, bank, device),
        timestamp: timeline.sample_between(rng, 7, 0),
        is_flagged: rng.chance(0.2),
        risk_score: rng.score_between(0.70, 0.95),
        is_fraudulent: true,
    }
}
