//! Synthetic graph-structured dataset generator for demo environments.
//!
//! Two related datasets share one deterministic engine: a Customer 360
//! corpus (customers, products, purchases, interactions) and a fraud
//! detection corpus (customers, accounts, devices, merchants,
//! transactions, device usage) seeded with five graph-shaped fraud
//! scenarios. The same (seed, configuration) pair always produces
//! byte-identical output.

pub mod config;
pub mod customer360;
pub mod error;
pub mod fraud;
pub mod names;
pub mod registry;
pub mod report;
pub mod rng;
pub mod runner;
pub mod timeline;
pub mod types;
pub mod writer;

pub use config::{CliOverrides, Compression, GeneratorConfig, ScenarioSizes, UseCase};
pub use error::{GenError, GenResult};
pub use report::RunReport;
pub use runner::run;
