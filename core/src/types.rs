//! Shared primitive types used across the entire generator.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;

/// A zero-based entity index within one entity table. Formatted IDs
/// (`cust_0000000001`, ...) are derived from these; foreign keys are
/// valid by construction as long as the index is below the table count.
pub type EntityIndex = u64;

/// A currency amount held as integer cents. All amount arithmetic
/// happens in cents so serialized values always carry exactly two
/// decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(pub i64);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    /// Scale by an integer percentage (e.g. `pct = 97` keeps 97%).
    /// Rounds toward zero, which is what layering-fee chains expect:
    /// each hop strictly decreases.
    pub fn scale_pct(self, pct: i64) -> Self {
        Money(self.0 * pct / 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Serialize a timestamp the way the downstream bulk loader expects
/// (`YYYY-MM-DD HH:MM:SS`, no timezone suffix).
pub fn ser_datetime<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

pub fn ser_date<S: Serializer>(d: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formats_two_decimal_places() {
        assert_eq!(Money::from_cents(123456).to_string(), "1234.56");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-250).to_string(), "-2.50");
        assert_eq!(Money::from_dollars(10).to_string(), "10.00");
    }

    #[test]
    fn scale_pct_strictly_decreases_for_fee_chains() {
        let mut amount = Money::from_dollars(50_000);
        for _ in 0..8 {
            let next = amount.scale_pct(97);
            assert!(next < amount);
            amount = next;
        }
    }
}
