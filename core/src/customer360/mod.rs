//! Customer 360 dataset generator.
//!
//! Products are generated first with their prices held in memory, so
//! purchase amounts can reference real catalog prices. Customers stream
//! out one at a time: the purchase rows for a customer are drawn before
//! the customer row itself, because lifetime_value is defined as the
//! exact sum of that customer's purchase amounts.

pub mod records;

use crate::config::{GeneratorConfig, ScaleProfile};
use crate::error::GenResult;
use crate::names::NamePool;
use crate::report::TableReport;
use crate::rng::{RngBank, StreamSlot};
use crate::timeline::Timeline;
use crate::types::Money;
use crate::writer::BatchWriter;

use records::{
    customer_id, interaction_id, product_id, transaction_id, C360CustomerRecord,
    InteractionRecord, ProductRecord, PurchaseRecord, INTERACTION_DEVICES,
    INTERACTION_DEVICE_WEIGHTS, INTERACTION_TYPES, INTERACTION_TYPE_WEIGHTS, PAYMENT_METHODS,
    PAYMENT_METHOD_WEIGHTS, PRODUCT_CATEGORIES, TXN_STATUSES, TXN_STATUS_WEIGHTS,
};

// Registration cohorts span three years back from the anchor.
const REGISTRATION_HORIZON_DAYS: u64 = 3 * 365;

pub fn generate(config: &GeneratorConfig, out_dir: &std::path::Path) -> GenResult<Vec<TableReport>> {
    let timeline = Timeline::new(config.reference_date);
    let bank = RngBank::new(config.seed);
    let profile = ScaleProfile::for_customers(config.customers);

    log::info!(
        "customer360 plan: {} customers, {} products, {}-{} purchases per customer",
        config.customers,
        profile.products,
        profile.txns_per_customer.0,
        profile.txns_per_customer.1
    );

    let mut products_w = BatchWriter::new(
        out_dir,
        ProductRecord::TABLE,
        ProductRecord::HEADERS,
        config.compression,
        config.batch_size,
    );
    let mut customers_w = BatchWriter::new(
        out_dir,
        C360CustomerRecord::TABLE,
        C360CustomerRecord::HEADERS,
        config.compression,
        config.batch_size,
    );
    let mut purchases_w = BatchWriter::new(
        out_dir,
        PurchaseRecord::TABLE,
        PurchaseRecord::HEADERS,
        config.compression,
        config.batch_size,
    );
    let mut interactions_w = BatchWriter::new(
        out_dir,
        InteractionRecord::TABLE,
        InteractionRecord::HEADERS,
        config.compression,
        config.batch_size,
    );

    let prices = emit_products(&profile, &bank, &mut products_w)?;
    emit_customers(
        config,
        &profile,
        &timeline,
        &bank,
        &prices,
        &mut customers_w,
        &mut purchases_w,
        &mut interactions_w,
    )?;

    Ok(vec![
        customers_w.finish()?,
        products_w.finish()?,
        purchases_w.finish()?,
        interactions_w.finish()?,
    ])
}

/// Emit the product catalog, returning every price in catalog order.
fn emit_products(
    profile: &ScaleProfile,
    bank: &RngBank,
    products_w: &mut BatchWriter,
) -> GenResult<Vec<Money>> {
    let mut rng = bank.for_stream(StreamSlot::Product);
    let mut prices = Vec::with_capacity(profile.products as usize);

    for i in 0..profile.products {
        let dollars = rng.lognormal(4.0, 1.0).clamp(2.0, 5_000.0);
        let price = Money::from_cents((dollars * 100.0).round() as i64);
        products_w.write(&ProductRecord {
            product_id: product_id(i),
            product_name: NamePool::product_name(&mut rng),
            category: rng.pick(PRODUCT_CATEGORIES).to_string(),
            brand: rng.pick(records::BRANDS).to_string(),
            price,
            is_discontinued: rng.chance(0.05),
        })?;
        prices.push(price);
    }
    Ok(prices)
}

#[allow(clippy::too_many_arguments)]
fn emit_customers(
    config: &GeneratorConfig,
    profile: &ScaleProfile,
    timeline: &Timeline,
    bank: &RngBank,
    prices: &[Money],
    customers_w: &mut BatchWriter,
    purchases_w: &mut BatchWriter,
    interactions_w: &mut BatchWriter,
) -> GenResult<()> {
    let mut rng = bank.for_stream(StreamSlot::C360Customer);
    let mut txn_rng = bank.for_stream(StreamSlot::Transaction);
    let mut int_rng = bank.for_stream(StreamSlot::Interaction);

    let mut txn_index = 0u64;
    let mut int_index = 0u64;

    for i in 0..config.customers {
        let name = NamePool::full_name(&mut rng);
        let email = NamePool::email(&mut rng, &name);
        let registration = timeline.sample_between(
            &mut rng,
            REGISTRATION_HORIZON_DAYS,
            0,
        );
        let segment = config.segments.pick(&mut rng).to_string();

        // Purchases first: lifetime_value is their exact sum.
        let mut lifetime_value = Money::from_cents(0);
        let mut purchases = Vec::new();
        if !prices.is_empty() {
            let count = txn_rng.range_u64(
                profile.txns_per_customer.0,
                profile.txns_per_customer.1,
            );
            purchases.reserve(count as usize);
            for _ in 0..count {
                let product = txn_rng.next_u64_below(prices.len() as u64);
                let quantity = txn_rng.range_u64(1, 2) as u32;
                // Promotions and price changes move the paid amount
                // around the current catalog price.
                let paid_pct = txn_rng.range_i64(90, 130);
                let amount = Money::from_cents(
                    prices[product as usize].cents() * quantity as i64,
                )
                .scale_pct(paid_pct);

                let ts = timeline
                    .sample_recency_biased(&mut txn_rng, REGISTRATION_HORIZON_DAYS)
                    .max(registration);
                lifetime_value = Money::from_cents(lifetime_value.cents() + amount.cents());
                purchases.push(PurchaseRecord {
                    transaction_id: transaction_id(txn_index),
                    customer_id: customer_id(i),
                    product_id: product_id(product),
                    quantity,
                    amount,
                    transaction_date: ts,
                    payment_method: PAYMENT_METHODS
                        [txn_rng.weighted_index(PAYMENT_METHOD_WEIGHTS)]
                    .to_string(),
                    status: TXN_STATUSES[txn_rng.weighted_index(TXN_STATUS_WEIGHTS)]
                        .to_string(),
                });
                txn_index += 1;
            }
        }

        customers_w.write(&C360CustomerRecord {
            customer_id: customer_id(i),
            name,
            email,
            phone: NamePool::phone(&mut rng),
            address: NamePool::street_address(&mut rng),
            city: NamePool::city(&mut rng).to_string(),
            state: NamePool::state(&mut rng).to_string(),
            zip_code: NamePool::zip_code(&mut rng),
            segment,
            registration_date: registration.date(),
            lifetime_value,
            is_active: rng.chance(0.90),
        })?;
        for purchase in &purchases {
            purchases_w.write(purchase)?;
        }

        if !prices.is_empty() {
            let interactions = int_rng.range_u64(
                profile.interactions_per_customer.0,
                profile.interactions_per_customer.1,
            );
            for _ in 0..interactions {
                let product = int_rng.next_u64_below(prices.len() as u64);
                let ts = timeline
                    .sample_recency_biased(&mut int_rng, REGISTRATION_HORIZON_DAYS)
                    .max(registration);
                interactions_w.write(&InteractionRecord {
                    interaction_id: interaction_id(int_index),
                    customer_id: customer_id(i),
                    product_id: product_id(product),
                    interaction_type: INTERACTION_TYPES
                        [int_rng.weighted_index(INTERACTION_TYPE_WEIGHTS)]
                    .to_string(),
                    timestamp: ts,
                    duration_seconds: int_rng.range_u64(10, 300) as u32,
                    device: INTERACTION_DEVICES
                        [int_rng.weighted_index(INTERACTION_DEVICE_WEIGHTS)]
                    .to_string(),
                })?;
                int_index += 1;
            }
        }
    }
    Ok(())
}
