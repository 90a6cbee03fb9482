//! Account takeover ring: a star of accounts around shared hub devices.
//!
//! One compromised device logging into many accounts inside a short
//! window is the signature the downstream device-ring queries look for.

use super::{ScenarioOutcome, UsageEdge};
use crate::config::ScenarioSizes;
use crate::error::GenResult;
use crate::fraud::plan::PopulationPlan;
use crate::registry::{ClaimRegistry, EntityKind, Scenario};
use crate::rng::StreamRng;
use crate::timeline::Timeline;
use crate::types::EntityIndex;
use chrono::Duration;

pub fn inject(
    plan: &PopulationPlan,
    sizes: &ScenarioSizes,
    timeline: &Timeline,
    registry: &mut ClaimRegistry,
    rng: &mut StreamRng,
) -> GenResult<ScenarioOutcome> {
    let mut outcome = ScenarioOutcome::new(Scenario::AccountTakeover);
    if sizes.takeover_accounts == 0 || sizes.takeover_hubs == 0 {
        return Ok(outcome);
    }

    let device_pool: Vec<EntityIndex> = (0..plan.suspicious_devices).collect();
    let hubs = registry.claim_sample(
        EntityKind::Device,
        Scenario::AccountTakeover,
        &device_pool,
        sizes.takeover_hubs,
        rng,
    )?;
    let accounts = registry.claim_sample(
        EntityKind::Account,
        Scenario::AccountTakeover,
        &plan.fraud_account_pool,
        sizes.takeover_accounts,
        rng,
    )?;

    // Round-robin accounts across hubs; every hub ends up with a fan
    // of USED_DEVICE edges inside the takeover window.
    for (i, account) in accounts.iter().enumerate() {
        let device = hubs[i % hubs.len()];
        let first_login = timeline.sample_between(rng, 30, 7);
        let last_login = first_login + Duration::hours(rng.range_i64(1, 144));
        outcome.device_usage.push(UsageEdge {
            device,
            account: *account,
            first_login,
            last_login,
            login_count: rng.range_u64(5, 50) as u32,
            failed_attempts: rng.next_u64_below(21) as u32,
        });
    }

    outcome.devices = hubs;
    outcome.accounts = accounts;
    Ok(outcome)
}
