//! Output row types for the Customer 360 tables.
//!
//! Same contract as the fraud tables: struct field order is column
//! order, and the HEADERS constants must track the fields exactly.

use crate::types::{ser_date, ser_datetime, Money};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

pub fn customer_id(index: u64) -> String {
    format!("cust_{:010}", index + 1)
}

pub fn product_id(index: u64) -> String {
    format!("prod_{:06}", index + 1)
}

pub fn transaction_id(index: u64) -> String {
    format!("txn_{:012}", index + 1)
}

pub fn interaction_id(index: u64) -> String {
    format!("int_{:012}", index + 1)
}

pub const PRODUCT_CATEGORIES: &[&str] = &[
    "electronics",
    "home",
    "apparel",
    "beauty",
    "sports",
    "toys",
    "grocery",
    "books",
    "automotive",
    "garden",
];

pub const PAYMENT_METHODS: &[&str] = &[
    "credit_card",
    "debit_card",
    "paypal",
    "apple_pay",
    "gift_card",
    "bank_transfer",
];
pub const PAYMENT_METHOD_WEIGHTS: &[f64] = &[0.40, 0.25, 0.15, 0.10, 0.05, 0.05];

pub const TXN_STATUSES: &[&str] = &["completed", "refunded", "disputed"];
pub const TXN_STATUS_WEIGHTS: &[f64] = &[0.92, 0.05, 0.03];

pub const INTERACTION_TYPES: &[&str] = &["view", "cart", "wishlist", "review", "share"];
pub const INTERACTION_TYPE_WEIGHTS: &[f64] = &[0.45, 0.20, 0.12, 0.13, 0.10];

pub const INTERACTION_DEVICES: &[&str] = &["desktop", "mobile", "tablet"];
pub const INTERACTION_DEVICE_WEIGHTS: &[f64] = &[0.40, 0.48, 0.12];

#[derive(Debug, Clone, Serialize)]
pub struct C360CustomerRecord {
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub segment: String,
    #[serde(serialize_with = "ser_date")]
    pub registration_date: NaiveDate,
    pub lifetime_value: Money,
    pub is_active: bool,
}

impl C360CustomerRecord {
    pub const TABLE: &'static str = "customers";
    pub const HEADERS: &'static [&'static str] = &[
        "customer_id",
        "name",
        "email",
        "phone",
        "address",
        "city",
        "state",
        "zip_code",
        "segment",
        "registration_date",
        "lifetime_value",
        "is_active",
    ];
}

pub const BRANDS: &[&str] = &[
    "Northwind", "Acmeway", "Bluepeak", "Cobble & Finch", "Driftwood", "Eastlake", "Fernvale",
    "Goldcrest", "Harborline", "Ironbark", "Juniper Co", "Kestrel", "Lakeshore", "Meridian",
    "Nightjar", "Oakfield",
];

#[derive(Debug, Clone, Serialize)]
pub struct ProductRecord {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub brand: String,
    pub price: Money,
    pub is_discontinued: bool,
}

impl ProductRecord {
    pub const TABLE: &'static str = "products";
    pub const HEADERS: &'static [&'static str] = &[
        "product_id",
        "product_name",
        "category",
        "brand",
        "price",
        "is_discontinued",
    ];
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseRecord {
    pub transaction_id: String,
    pub customer_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub amount: Money,
    #[serde(serialize_with = "ser_datetime")]
    pub transaction_date: NaiveDateTime,
    pub payment_method: String,
    pub status: String,
}

impl PurchaseRecord {
    pub const TABLE: &'static str = "transactions";
    pub const HEADERS: &'static [&'static str] = &[
        "transaction_id",
        "customer_id",
        "product_id",
        "quantity",
        "amount",
        "transaction_date",
        "payment_method",
        "status",
    ];
}

/// A customer-to-product engagement edge, weaker than a purchase.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionRecord {
    pub interaction_id: String,
    pub customer_id: String,
    pub product_id: String,
    pub interaction_type: String,
    #[serde(serialize_with = "ser_datetime")]
    pub timestamp: NaiveDateTime,
    pub duration_seconds: u32,
    pub device: String,
}

impl InteractionRecord {
    pub const TABLE: &'static str = "interactions";
    pub const HEADERS: &'static [&'static str] = &[
        "interaction_id",
        "customer_id",
        "product_id",
        "interaction_type",
        "timestamp",
        "duration_seconds",
        "device",
    ];
}
