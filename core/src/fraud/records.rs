//! Output row types for the fraud-detection tables.
//!
//! Field order here IS the column order in the emitted files; the
//! HEADERS constants must stay in sync with the struct fields. Column
//! name drift against the downstream store schema is the primary
//! integration failure mode, so treat renames as breaking changes.

use crate::types::{ser_date, ser_datetime, Money};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

pub fn customer_id(index: u64) -> String {
    format!("cust_{:010}", index + 1)
}

pub fn account_id(index: u64) -> String {
    format!("acc_{:010}", index + 1)
}

pub fn device_id(index: u64) -> String {
    format!("dev_{:010}", index + 1)
}

pub fn merchant_id(index: u64) -> String {
    format!("merch_{:08}", index + 1)
}

pub fn transaction_id(index: u64) -> String {
    format!("txn_{:012}", index + 1)
}

pub const MERCHANT_CATEGORIES: &[&str] = &[
    "grocery",
    "gas_station",
    "restaurant",
    "retail",
    "online",
    "pharmacy",
    "hotel",
    "airline",
    "entertainment",
    "other",
];

#[derive(Debug, Clone, Serialize)]
pub struct CustomerRecord {
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub ssn_hash: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(serialize_with = "ser_date")]
    pub date_of_birth: NaiveDate,
    pub risk_score: f64,
    #[serde(serialize_with = "ser_datetime")]
    pub created_at: NaiveDateTime,
    pub status: String,
    pub is_fraudulent: bool,
}

impl CustomerRecord {
    pub const TABLE: &'static str = "customers";
    pub const HEADERS: &'static [&'static str] = &[
        "customer_id",
        "name",
        "email",
        "phone",
        "ssn_hash",
        "address",
        "city",
        "state",
        "zip_code",
        "date_of_birth",
        "risk_score",
        "created_at",
        "status",
        "is_fraudulent",
    ];
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountRecord {
    pub account_id: String,
    pub customer_id: String,
    pub account_type: String,
    pub balance: Money,
    pub credit_limit: Option<Money>,
    #[serde(serialize_with = "ser_datetime")]
    pub opened_at: NaiveDateTime,
    pub status: String,
    pub is_fraudulent: bool,
}

impl AccountRecord {
    pub const TABLE: &'static str = "accounts";
    pub const HEADERS: &'static [&'static str] = &[
        "account_id",
        "customer_id",
        "account_type",
        "balance",
        "credit_limit",
        "opened_at",
        "status",
        "is_fraudulent",
    ];
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceRecord {
    pub device_id: String,
    pub device_fingerprint: String,
    pub device_type: String,
    pub os: String,
    pub browser: String,
    pub ip_address: String,
    pub location: String,
    #[serde(serialize_with = "ser_datetime")]
    pub first_seen: NaiveDateTime,
    #[serde(serialize_with = "ser_datetime")]
    pub last_seen: NaiveDateTime,
    pub is_suspicious: bool,
}

impl DeviceRecord {
    pub const TABLE: &'static str = "devices";
    pub const HEADERS: &'static [&'static str] = &[
        "device_id",
        "device_fingerprint",
        "device_type",
        "os",
        "browser",
        "ip_address",
        "location",
        "first_seen",
        "last_seen",
        "is_suspicious",
    ];
}

#[derive(Debug, Clone, Serialize)]
pub struct MerchantRecord {
    pub merchant_id: String,
    pub merchant_name: String,
    pub category: String,
    pub address: String,
    #[serde(serialize_with = "ser_date")]
    pub registration_date: NaiveDate,
    pub volume_last_30d: Money,
    pub risk_score: f64,
    pub is_verified: bool,
    pub is_fraudulent: bool,
}

impl MerchantRecord {
    pub const TABLE: &'static str = "merchants";
    pub const HEADERS: &'static [&'static str] = &[
        "merchant_id",
        "merchant_name",
        "category",
        "address",
        "registration_date",
        "volume_last_30d",
        "risk_score",
        "is_verified",
        "is_fraudulent",
    ];
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub from_account_id: String,
    pub to_account_id: Option<String>,
    pub amount: Money,
    pub currency: String,
    pub transaction_type: String,
    pub merchant_id: Option<String>,
    pub device_id: String,
    /// Copied from the device that carried the transaction.
    pub ip_address: String,
    #[serde(serialize_with = "ser_datetime")]
    pub timestamp: NaiveDateTime,
    pub is_flagged: bool,
    pub risk_score: f64,
    pub is_fraudulent: bool,
}

impl TransactionRecord {
    pub const TABLE: &'static str = "transactions";
    pub const HEADERS: &'static [&'static str] = &[
        "transaction_id",
        "from_account_id",
        "to_account_id",
        "amount",
        "currency",
        "transaction_type",
        "merchant_id",
        "device_id",
        "ip_address",
        "timestamp",
        "is_flagged",
        "risk_score",
        "is_fraudulent",
    ];
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceUsageRecord {
    pub device_id: String,
    pub account_id: String,
    #[serde(serialize_with = "ser_datetime")]
    pub first_login: NaiveDateTime,
    #[serde(serialize_with = "ser_datetime")]
    pub last_login: NaiveDateTime,
    pub login_count: u32,
    pub failed_attempts: u32,
    pub is_fraudulent: bool,
}

impl DeviceUsageRecord {
    pub const TABLE: &'static str = "device_usage";
    pub const HEADERS: &'static [&'static str] = &[
        "device_id",
        "account_id",
        "first_login",
        "last_login",
        "login_count",
        "failed_attempts",
        "is_fraudulent",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_formats_are_fixed_width() {
        assert_eq!(customer_id(0), "cust_0000000001");
        assert_eq!(account_id(41), "acc_0000000042");
        assert_eq!(merchant_id(0), "merch_00000001");
        assert_eq!(transaction_id(999), "txn_000000001000");
    }
}
