//! Machine-readable run summary, written as `_report.json` next to the
//! data files. Demo tooling checks scenario cardinalities against this
//! instead of re-scanning the corpus.

use crate::error::GenResult;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub table: String,
    pub rows: u64,
    pub batches: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub customers: usize,
    pub accounts: usize,
    pub devices: usize,
    pub merchants: usize,
    pub transactions: usize,
    pub device_usage: usize,
}

impl ScenarioReport {
    pub fn participants(&self) -> usize {
        self.customers + self.accounts + self.devices + self.merchants
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub use_case: String,
    pub seed: u64,
    pub customers: u64,
    pub batch_size: usize,
    pub compression: String,
    pub reference_date: String,
    pub tables: Vec<TableReport>,
    pub scenarios: Vec<ScenarioReport>,
}

impl RunReport {
    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == name)
    }

    pub fn write(&self, dir: &Path) -> GenResult<()> {
        let mut file = File::create(dir.join("_report.json"))?;
        let json = serde_json::to_string_pretty(self)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }
}
