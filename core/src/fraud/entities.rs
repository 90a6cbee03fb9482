//! Entity factories for the fraud-detection domain.
//!
//! Everything streams straight into the batch writers; no table is
//! ever held in memory. The account-count draws replay the AccountPlan
//! stream, so emission agrees exactly with the planning pass.

use super::injectors::PiiOverride;
use super::plan::{accounts_for_customer, PopulationPlan};
use super::records::{
    account_id, customer_id, device_id, merchant_id, AccountRecord, CustomerRecord,
    DeviceRecord, DeviceUsageRecord, MerchantRecord, MERCHANT_CATEGORIES,
};
use crate::error::{GenError, GenResult};
use crate::names::NamePool;
use crate::rng::{RngBank, StreamSlot};
use crate::timeline::Timeline;
use crate::types::{EntityIndex, Money};
use crate::writer::BatchWriter;
use chrono::Duration;
use std::collections::HashMap;

const ACCOUNT_TYPES: &[&str] = &["checking", "savings", "credit", "loan"];
const ACCOUNT_TYPE_WEIGHTS: &[f64] = &[0.40, 0.30, 0.20, 0.10];

const CUSTOMER_STATUSES: &[&str] = &["active", "suspended", "closed"];
const ACCOUNT_STATUSES: &[&str] = &["active", "frozen", "closed"];

const DEVICE_TYPES: &[&str] = &["mobile", "desktop", "tablet"];
const DEVICE_TYPE_WEIGHTS: &[f64] = &[0.60, 0.30, 0.10];
const OSES: &[&str] = &["iOS", "Android", "Windows", "macOS", "Linux"];
const OS_WEIGHTS: &[f64] = &[0.25, 0.35, 0.25, 0.10, 0.05];
const BROWSERS: &[&str] = &["Chrome", "Safari", "Firefox", "Edge", "Other"];
const BROWSER_WEIGHTS: &[f64] = &[0.50, 0.20, 0.15, 0.10, 0.05];

/// Emit customers and their accounts in one pass. The clique
/// injector's PII overrides are applied here so shared fields land in
/// the entity file itself.
pub fn emit_customers_and_accounts(
    plan: &PopulationPlan,
    timeline: &Timeline,
    bank: &RngBank,
    pii: &HashMap<EntityIndex, PiiOverride>,
    customers_w: &mut BatchWriter,
    accounts_w: &mut BatchWriter,
) -> GenResult<()> {
    let mut rng = bank.for_stream(StreamSlot::Customer);
    let mut plan_rng = bank.for_stream(StreamSlot::AccountPlan);
    let mut acct_rng = bank.for_stream(StreamSlot::Account);
    let mut account_index: EntityIndex = 0;

    for i in 0..plan.customers {
        let is_fraud = i < plan.fraud_customers;

        let name = NamePool::full_name(&mut rng);
        let email = NamePool::email(&mut rng, &name);
        let mut phone = NamePool::phone(&mut rng);
        let mut ssn_hash = rng.hex_string(16);
        let mut address = NamePool::street_address(&mut rng);
        let city = NamePool::city(&mut rng).to_string();
        let state = NamePool::state(&mut rng).to_string();
        let zip_code = NamePool::zip_code(&mut rng);
        let date_of_birth =
            timeline.end().date() - Duration::days(rng.range_i64(18 * 365, 80 * 365));

        // Recently created identities are the suspicious ones.
        let created_at = if is_fraud && rng.chance(0.6) {
            timeline.sample_between(&mut rng, 90, 0)
        } else {
            timeline.sample_between(&mut rng, 1825, 0)
        };
        let risk_score = if is_fraud {
            rng.score_between(70.0, 95.0)
        } else {
            rng.score_between(10.0, 40.0)
        };
        let status_weights: &[f64] = if is_fraud {
            &[0.50, 0.40, 0.10]
        } else {
            &[0.85, 0.10, 0.05]
        };
        let status = CUSTOMER_STATUSES[rng.weighted_index(status_weights)].to_string();

        if let Some(forced) = pii.get(&i) {
            if let Some(v) = &forced.ssn_hash {
                ssn_hash = v.clone();
            }
            if let Some(v) = &forced.phone {
                phone = v.clone();
            }
            if let Some(v) = &forced.address {
                address = v.clone();
            }
        }

        customers_w.write(&CustomerRecord {
            customer_id: customer_id(i),
            name,
            email,
            phone,
            ssn_hash,
            address,
            city,
            state,
            zip_code,
            date_of_birth,
            risk_score,
            created_at,
            status,
            is_fraudulent: is_fraud,
        })?;

        let count = accounts_for_customer(is_fraud, &mut plan_rng);
        for _ in 0..count {
            let account_type =
                ACCOUNT_TYPES[acct_rng.weighted_index(ACCOUNT_TYPE_WEIGHTS)].to_string();
            let balance = if is_fraud {
                if acct_rng.chance(0.3) {
                    acct_rng.money_between(Money::from_dollars(100_000), Money::from_dollars(1_000_000))
                } else {
                    acct_rng.money_between(Money::from_cents(0), Money::from_dollars(10_000))
                }
            } else {
                let dollars = acct_rng.lognormal(8.0, 1.5).min(2_000_000.0);
                Money::from_cents((dollars * 100.0).round() as i64)
            };
            let credit_limit = (account_type == "credit")
                .then(|| balance.scale_pct(acct_rng.range_i64(200, 500)));
            let opened_at =
                (created_at + Duration::days(acct_rng.range_i64(0, 30))).min(timeline.end());
            let status_weights: &[f64] = if is_fraud {
                &[0.60, 0.30, 0.10]
            } else {
                &[0.80, 0.15, 0.05]
            };
            accounts_w.write(&AccountRecord {
                account_id: account_id(account_index),
                customer_id: customer_id(i),
                account_type,
                balance,
                credit_limit,
                opened_at,
                status: ACCOUNT_STATUSES[acct_rng.weighted_index(status_weights)].to_string(),
                is_fraudulent: is_fraud,
            })?;
            account_index += 1;
        }
    }

    if account_index != plan.total_accounts {
        return Err(GenError::Integrity(format!(
            "account emission produced {account_index} accounts, plan expected {}",
            plan.total_accounts
        )));
    }
    Ok(())
}

/// A device's IP address, derived from its own per-entity stream so
/// transaction rows can copy it without replaying the device stream.
pub fn device_ip(plan: &PopulationPlan, bank: &RngBank, device: EntityIndex) -> String {
    let mut rng = bank.for_entity(StreamSlot::DeviceIp, device);
    if device < plan.suspicious_devices && rng.chance(0.5) {
        NamePool::suspicious_ip(&mut rng)
    } else {
        NamePool::ipv4(&mut rng)
    }
}

/// Emit devices plus their background USED_DEVICE edges (1-3 random
/// accounts each). Takeover-ring edges are appended separately.
pub fn emit_devices(
    plan: &PopulationPlan,
    timeline: &Timeline,
    bank: &RngBank,
    devices_w: &mut BatchWriter,
    usage_w: &mut BatchWriter,
) -> GenResult<()> {
    let mut rng = bank.for_stream(StreamSlot::Device);

    for i in 0..plan.devices {
        let suspicious = i < plan.suspicious_devices;

        let device_fingerprint = if suspicious && rng.chance(0.4) {
            NamePool::shared_fingerprint(&mut rng).to_string()
        } else {
            format!("fp_{}", rng.hex_string(20))
        };
        let ip_address = device_ip(plan, bank, i);
        let first_seen = timeline.sample_between(&mut rng, 730, 30);
        let last_seen = timeline.sample_between(&mut rng, 29, 0);

        devices_w.write(&DeviceRecord {
            device_id: device_id(i),
            device_fingerprint,
            device_type: DEVICE_TYPES[rng.weighted_index(DEVICE_TYPE_WEIGHTS)].to_string(),
            os: OSES[rng.weighted_index(OS_WEIGHTS)].to_string(),
            browser: BROWSERS[rng.weighted_index(BROWSER_WEIGHTS)].to_string(),
            ip_address,
            location: NamePool::location(&mut rng),
            first_seen,
            last_seen,
            is_suspicious: suspicious,
        })?;

        if plan.total_accounts > 0 {
            for _ in 0..rng.range_u64(1, 3) {
                let account = rng.next_u64_below(plan.total_accounts);
                let first_login = timeline.sample_between(&mut rng, 60, 7);
                let last_login = first_login + Duration::hours(rng.range_i64(1, 120));
                usage_w.write(&DeviceUsageRecord {
                    device_id: device_id(i),
                    account_id: account_id(account),
                    first_login,
                    last_login,
                    login_count: rng.range_u64(1, 20) as u32,
                    failed_attempts: rng.next_u64_below(4) as u32,
                    is_fraudulent: false,
                })?;
            }
        }
    }
    Ok(())
}

pub fn emit_merchants(
    plan: &PopulationPlan,
    timeline: &Timeline,
    bank: &RngBank,
    merchants_w: &mut BatchWriter,
) -> GenResult<()> {
    let mut rng = bank.for_stream(StreamSlot::Merchant);

    for i in 0..plan.merchants {
        let is_fraud = i < plan.fraud_merchants;

        let merchant_name = if is_fraud {
            NamePool::shell_merchant_name(&mut rng)
        } else {
            NamePool::company_name(&mut rng)
        };
        let address = format!(
            "{}, {}",
            NamePool::street_address(&mut rng),
            NamePool::location(&mut rng)
        );
        let registration_date =
            (timeline.end() - Duration::days(rng.range_i64(0, 3650))).date();
        let volume_last_30d = if is_fraud {
            rng.money_between(Money::from_dollars(500_000), Money::from_dollars(5_000_000))
        } else {
            let dollars = rng.lognormal(10.0, 1.5).min(10_000_000.0);
            Money::from_cents((dollars * 100.0).round() as i64)
        };
        let (risk_score, verified_p) = if is_fraud {
            (rng.score_between(70.0, 95.0), 0.20)
        } else {
            (rng.score_between(10.0, 40.0), 0.85)
        };

        merchants_w.write(&MerchantRecord {
            merchant_id: merchant_id(i),
            merchant_name,
            category: rng.pick(MERCHANT_CATEGORIES).to_string(),
            address,
            registration_date,
            volume_last_30d,
            risk_score,
            is_verified: rng.chance(verified_p),
            is_fraudulent: is_fraud,
        })?;
    }
    Ok(())
}
