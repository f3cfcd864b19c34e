use chrono::{DateTime, NaiveDate, Utc};
use field_names::FieldNames;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

use crate::common::timestamp;
use crate::db::Document;

pub const CURRENCY: &str = "KWD";

/// Fixed-point KWD amount counted in fils (1/1000 KWD).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);
    const SCALE: i64 = 1000;
    /// Largest amount a single record may carry: one trillion KWD.
    pub const MAX: Amount = Amount(1_000_000_000_000 * Self::SCALE);

    pub fn from_fils(fils: i64) -> Self {
        Self(fils)
    }

    pub fn fils(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        write!(f, "{}{}.{:03}", sign, abs / scale, abs % scale)
    }
}

impl std::str::FromStr for Amount {
    type Err = String;

    /// Accepts a non-negative decimal with at most three fraction digits, up
    /// to `Amount::MAX`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err("amount is empty".to_string());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("invalid amount: {}", s));
        }
        if frac.len() > 3 {
            return Err(format!("amount has more than 3 decimals: {}", s));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| format!("amount out of range: {}", s))?
        };
        let frac: i64 = format!("{:0<3}", frac)
            .parse()
            .map_err(|_| format!("invalid amount: {}", s))?;

        whole
            .checked_mul(Self::SCALE)
            .and_then(|w| w.checked_add(frac))
            .map(Amount)
            .filter(|amount| *amount <= Self::MAX)
            .ok_or_else(|| format!("amount out of range: {}", s))
    }
}

// Totals saturate instead of wrapping; stored documents are not bound by
// `Amount::MAX`.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(self.0.saturating_neg())
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[default]
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }

    pub fn sign(&self) -> &'static str {
        match self {
            Self::In => "+",
            Self::Out => "-",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for TransactionKind {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            _ => Err(format!("invalid transaction type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FieldNames)]
#[field_names(vis = "pub")]
pub struct FinancialRecord {
    pub kind: TransactionKind,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Document for FinancialRecord {
    const COLLECTION: &'static str = "financial";

    fn fields() -> &'static [&'static str] {
        &Self::FIELDS
    }
}

impl FinancialRecord {
    /// Contribution of this record to the running balance.
    pub fn signed_amount(&self) -> Amount {
        match self.kind {
            TransactionKind::In => self.amount,
            TransactionKind::Out => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialRecordCreate {
    pub kind: TransactionKind,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FinancialSummary {
    pub income: Amount,
    pub expenses: Amount,
    pub balance: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_above_one_trillion_are_rejected() {
        assert_eq!("1000000000000".parse::<Amount>(), Ok(Amount::MAX));
        assert!("1000000000000.001".parse::<Amount>().is_err());
        assert!("9000000000000000".parse::<Amount>().is_err());
        assert!("99999999999999999999".parse::<Amount>().is_err());
    }

    #[test]
    fn arithmetic_saturates_instead_of_overflowing() {
        let huge = Amount::from_fils(i64::MAX - 1);

        assert_eq!(huge + huge, Amount::from_fils(i64::MAX));
        assert_eq!(-huge - huge, Amount::from_fils(i64::MIN));
        assert_eq!(-Amount::from_fils(i64::MIN), Amount::from_fils(i64::MAX));
    }
}
