//! Run configuration.
//!
//! Precedence, lowest to highest: built-in defaults, process
//! environment, `--env-file` key/value file, CLI flags. Every layer is
//! validated before any generation work starts; a bad value anywhere
//! means no output is written at all.

use crate::error::{GenError, GenResult};
use crate::rng::StreamRng;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_CUSTOMERS: u64 = 1_000_000;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_BATCH_SIZE: usize = 100_000;
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Anchor for every generated date window. A fixed date (rather than
/// "now") keeps output byte-identical across runs on different days.
pub const DEFAULT_REFERENCE_DATE: &str = "2025-12-31";

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Environment keys recognized in the process environment and in
/// `--env-file` files. Anything else in an env file draws a warning.
const KNOWN_ENV_KEYS: &[&str] = &[
    "CUSTOMER_SCALE",
    "RANDOM_SEED",
    "BATCH_FILE_SIZE",
    "DATA_OUTPUT_DIR",
    "OUTPUT_COMPRESSION",
    "USE_CASE",
    "OVERWRITE_EXISTING_DATA",
    "VERBOSE_LOGGING",
    "REFERENCE_DATE",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCase {
    Customer360,
    FraudDetection,
    Both,
}

impl UseCase {
    pub fn includes_customer360(self) -> bool {
        matches!(self, UseCase::Customer360 | UseCase::Both)
    }

    pub fn includes_fraud(self) -> bool {
        matches!(self, UseCase::FraudDetection | UseCase::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UseCase::Customer360 => "customer360",
            UseCase::FraudDetection => "fraud-detection",
            UseCase::Both => "both",
        }
    }
}

impl FromStr for UseCase {
    type Err = GenError;

    fn from_str(s: &str) -> GenResult<Self> {
        match s {
            "customer360" => Ok(UseCase::Customer360),
            "fraud-detection" => Ok(UseCase::FraudDetection),
            "both" => Ok(UseCase::Both),
            other => Err(GenError::Config(format!(
                "unknown use case '{other}' (expected customer360, fraud-detection or both)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Snappy,
    Gzip,
    Lz4,
}

impl Compression {
    pub fn extension(self) -> &'static str {
        match self {
            Compression::Snappy => "sz",
            Compression::Gzip => "gz",
            Compression::Lz4 => "lz4",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Compression::Snappy => "snappy",
            Compression::Gzip => "gzip",
            Compression::Lz4 => "lz4",
        }
    }
}

impl FromStr for Compression {
    type Err = GenError;

    fn from_str(s: &str) -> GenResult<Self> {
        match s {
            "snappy" => Ok(Compression::Snappy),
            "gzip" => Ok(Compression::Gzip),
            "lz4" => Ok(Compression::Lz4),
            other => Err(GenError::Config(format!(
                "unknown compression '{other}' (expected snappy, gzip or lz4)"
            ))),
        }
    }
}

/// A `{label: weight}` categorical distribution, validated once at
/// startup so factory code can draw from it without re-checking.
#[derive(Debug, Clone)]
pub struct WeightedCategories {
    labels: Vec<String>,
    weights: Vec<f64>,
}

impl WeightedCategories {
    pub fn new(pairs: &[(&str, f64)]) -> Self {
        Self {
            labels: pairs.iter().map(|(l, _)| l.to_string()).collect(),
            weights: pairs.iter().map(|(_, w)| *w).collect(),
        }
    }

    pub fn validate(&self, what: &str) -> GenResult<()> {
        if self.labels.is_empty() {
            return Err(GenError::Config(format!("{what}: no categories defined")));
        }
        if self.weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(GenError::Config(format!(
                "{what}: weights must be finite and non-negative"
            )));
        }
        let sum: f64 = self.weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(GenError::Config(format!(
                "{what}: weights sum to {sum}, expected 1.0"
            )));
        }
        Ok(())
    }

    pub fn pick<'a>(&'a self, rng: &mut StreamRng) -> &'a str {
        &self.labels[rng.weighted_index(&self.weights)]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Scale-dependent population targets, derived from the customer count.
#[derive(Debug, Clone, Copy)]
pub struct ScaleProfile {
    pub devices: u64,
    pub merchants: u64,
    pub transactions: u64,
    pub products: u64,
    /// Inclusive per-customer transaction count range (Customer 360).
    pub txns_per_customer: (u64, u64),
    /// Inclusive per-customer interaction count range (Customer 360).
    pub interactions_per_customer: (u64, u64),
}

impl ScaleProfile {
    pub fn for_customers(customers: u64) -> Self {
        let products = match customers {
            0 => 0,
            c if c <= 1_000_000 => 10_000,
            c if c <= 10_000_000 => 25_000,
            _ => 50_000,
        };
        let (device_div, merchant_div) = match customers {
            c if c <= 100_000 => (2, 5),
            c if c <= 1_000_000 => (4, 10),
            _ => (10, 20),
        };
        Self {
            devices: customers / device_div,
            merchants: customers / merchant_div,
            transactions: customers * 10,
            products,
            txns_per_customer: (8, 12),
            interactions_per_customer: (5, 15),
        }
    }
}

/// Resolved participant counts for the five fraud scenarios.
///
/// Defaults are derived fractions of the fraud pools with documented
/// minimums; the source material disagrees with itself on exact
/// numbers, so these are parameters, not invariants. A scenario whose
/// pool cannot cover its minimum resolves to zero participants and is
/// skipped. Explicit overrides are claimed exactly and fail loudly when
/// a pool runs short.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScenarioSizes {
    pub takeover_accounts: usize,
    pub takeover_hubs: usize,
    pub laundering_accounts: usize,
    pub card_accounts: usize,
    pub card_merchants: usize,
    pub synthetic_customers: usize,
    pub collusion_customers: usize,
    pub collusion_merchants: usize,
}

impl ScenarioSizes {
    /// Derive defaults from the actual pool sizes computed by the
    /// population plan. `fraud_accounts` is the number of accounts
    /// owned by fraud-flagged customers.
    pub fn derive(
        fraud_customers: usize,
        fraud_accounts: usize,
        fraud_merchants: usize,
        suspicious_devices: usize,
    ) -> Self {
        fn sized(min: usize, want: usize, budget: usize) -> usize {
            if budget < min {
                0
            } else {
                want.max(min).min(budget)
            }
        }

        // Customer-claiming scenarios first; they drag their accounts
        // with them, so the account budget is discounted by the worst
        // case (five accounts per fraud customer).
        let mut customer_budget = fraud_customers;
        let synthetic_customers = sized(3, fraud_customers / 5, customer_budget);
        customer_budget -= synthetic_customers;
        let mut collusion_customers = sized(4, fraud_customers / 8, customer_budget);

        let mut merchant_budget = fraud_merchants;
        let mut collusion_merchants = sized(3, fraud_merchants / 10, merchant_budget);
        merchant_budget -= collusion_merchants;
        let mut card_merchants = sized(3, fraud_merchants / 10, merchant_budget);

        // A dense component needs both sides; drop the whole scenario
        // when either pool came up short.
        if collusion_customers == 0 || collusion_merchants == 0 {
            collusion_customers = 0;
            collusion_merchants = 0;
        }

        let mut account_budget = fraud_accounts
            .saturating_sub((synthetic_customers + collusion_customers) * 5);
        let mut takeover_accounts = sized(5, fraud_accounts / 10, account_budget);
        account_budget -= takeover_accounts;
        let laundering_accounts = sized(3, fraud_accounts / 16, account_budget);
        account_budget -= laundering_accounts;
        let mut card_accounts = sized(4, fraud_accounts / 10, account_budget);

        // Same for the bipartite scenario: zero one side, zero both.
        if card_accounts == 0 || card_merchants == 0 {
            card_accounts = 0;
            card_merchants = 0;
        }

        let takeover_hubs = if suspicious_devices == 0 || takeover_accounts == 0 {
            takeover_accounts = 0;
            0
        } else {
            (takeover_accounts / 25).max(1).min(suspicious_devices)
        };

        Self {
            takeover_accounts,
            takeover_hubs,
            laundering_accounts,
            card_accounts,
            card_merchants,
            synthetic_customers,
            collusion_customers,
            collusion_merchants,
        }
    }

    /// Sum of participant counts across every marked dimension.
    pub fn total_participants(&self) -> usize {
        self.takeover_accounts
            + self.takeover_hubs
            + self.laundering_accounts
            + self.card_accounts
            + self.card_merchants
            + self.synthetic_customers
            + self.collusion_customers
            + self.collusion_merchants
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub customers: u64,
    pub seed: u64,
    pub use_case: UseCase,
    pub output_dir: PathBuf,
    pub compression: Compression,
    pub batch_size: usize,
    pub overwrite: bool,
    pub verbose: bool,
    pub reference_date: NaiveDate,

    pub segments: WeightedCategories,
    pub fraud_customer_ratio: f64,
    pub suspicious_device_ratio: f64,
    pub fraud_merchant_ratio: f64,
    pub fraud_txn_ratio: f64,

    /// When set, exact participant counts to claim; otherwise derived
    /// from the pools at plan time.
    pub scenario_override: Option<ScenarioSizes>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            customers: DEFAULT_CUSTOMERS,
            seed: DEFAULT_SEED,
            use_case: UseCase::Both,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            compression: Compression::Snappy,
            batch_size: DEFAULT_BATCH_SIZE,
            overwrite: false,
            verbose: false,
            reference_date: NaiveDate::parse_from_str(DEFAULT_REFERENCE_DATE, "%Y-%m-%d")
                .expect("default reference date is valid"),
            segments: WeightedCategories::new(&[
                ("VIP", 0.08),
                ("Premium", 0.17),
                ("Regular", 0.35),
                ("Basic", 0.25),
                ("New", 0.15),
            ]),
            fraud_customer_ratio: 0.03,
            suspicious_device_ratio: 0.10,
            fraud_merchant_ratio: 0.08,
            fraud_txn_ratio: 0.02,
            scenario_override: None,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> GenResult<()> {
        if self.batch_size == 0 {
            return Err(GenError::Config("batch size must be at least 1".into()));
        }
        self.segments.validate("customer segments")?;
        for (name, ratio) in [
            ("fraud customer ratio", self.fraud_customer_ratio),
            ("suspicious device ratio", self.suspicious_device_ratio),
            ("fraud merchant ratio", self.fraud_merchant_ratio),
            ("fraud transaction ratio", self.fraud_txn_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) || !ratio.is_finite() {
                return Err(GenError::Config(format!(
                    "{name} must be within [0, 1], got {ratio}"
                )));
            }
        }
        Ok(())
    }

    /// Resolve a full configuration from the layered sources.
    pub fn resolve(cli: &CliOverrides) -> GenResult<Self> {
        let mut env = process_env();
        if let Some(path) = &cli.env_file {
            for (key, value) in parse_env_file(path)? {
                env.insert(key, value);
            }
        }

        let mut config = GeneratorConfig::default();
        if let Some(v) = env.get("CUSTOMER_SCALE") {
            config.customers = parse_u64("CUSTOMER_SCALE", v)?;
        }
        if let Some(v) = env.get("RANDOM_SEED") {
            config.seed = parse_u64("RANDOM_SEED", v)?;
        }
        if let Some(v) = env.get("BATCH_FILE_SIZE") {
            config.batch_size = parse_u64("BATCH_FILE_SIZE", v)? as usize;
        }
        if let Some(v) = env.get("DATA_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(v);
        }
        if let Some(v) = env.get("OUTPUT_COMPRESSION") {
            config.compression = v.parse()?;
        }
        if let Some(v) = env.get("USE_CASE") {
            config.use_case = v.parse()?;
        }
        if let Some(v) = env.get("OVERWRITE_EXISTING_DATA") {
            config.overwrite = parse_bool("OVERWRITE_EXISTING_DATA", v)?;
        }
        if let Some(v) = env.get("VERBOSE_LOGGING") {
            config.verbose = parse_bool("VERBOSE_LOGGING", v)?;
        }
        if let Some(v) = env.get("REFERENCE_DATE") {
            config.reference_date = parse_date("REFERENCE_DATE", v)?;
        }

        // CLI flags win over everything.
        if let Some(customers) = cli.customers {
            config.customers = customers;
        }
        if let Some(seed) = cli.seed {
            config.seed = seed;
        }
        if let Some(batch_size) = cli.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(dir) = &cli.output_dir {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(compression) = &cli.compression {
            config.compression = compression.parse()?;
        }
        if let Some(use_case) = &cli.use_case {
            config.use_case = use_case.parse()?;
        }
        if cli.overwrite {
            config.overwrite = true;
        }
        if cli.verbose {
            config.verbose = true;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Raw CLI values, not yet validated. Collected by the binary's arg
/// parser and resolved through `GeneratorConfig::resolve`.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub customers: Option<u64>,
    pub seed: Option<u64>,
    pub batch_size: Option<usize>,
    pub output_dir: Option<String>,
    pub compression: Option<String>,
    pub use_case: Option<String>,
    pub overwrite: bool,
    pub verbose: bool,
    pub env_file: Option<PathBuf>,
}

fn process_env() -> HashMap<String, String> {
    KNOWN_ENV_KEYS
        .iter()
        .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
        .collect()
}

fn parse_env_file(path: &Path) -> GenResult<Vec<(String, String)>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        GenError::Config(format!("cannot read env file {}: {e}", path.display()))
    })?;

    let mut pairs = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once('=').ok_or_else(|| {
            GenError::Config(format!(
                "malformed line {} in {}: expected KEY=VALUE",
                lineno + 1,
                path.display()
            ))
        })?;
        let key = key.trim();
        let value = value.trim().trim_matches('"');
        if !KNOWN_ENV_KEYS.contains(&key) {
            log::warn!("ignoring unknown key '{key}' in {}", path.display());
            continue;
        }
        pairs.push((key.to_string(), value.to_string()));
    }
    Ok(pairs)
}

fn parse_u64(key: &str, value: &str) -> GenResult<u64> {
    value
        .parse()
        .map_err(|_| GenError::Config(format!("{key}: '{value}' is not a non-negative integer")))
}

fn parse_bool(key: &str, value: &str) -> GenResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(GenError::Config(format!(
            "{key}: '{value}' is not a boolean"
        ))),
    }
}

fn parse_date(key: &str, value: &str) -> GenResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| GenError::Config(format!("{key}: '{value}' is not a YYYY-MM-DD date")))
}
