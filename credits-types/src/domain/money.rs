//! Type-safe monetary value with embedded currency.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::DomainError;

/// Currencies the payment gateway settles in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Minor units per major unit (paise per rupee, cents per dollar).
    pub fn minor_per_major(&self) -> i64 {
        match self {
            Currency::INR | Currency::USD | Currency::EUR | Currency::GBP => 100,
        }
    }

    /// Returns the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Type-safe money representation with embedded currency.
///
/// Amount is stored in the smallest unit of the currency (paise, cents)
/// to avoid floating-point precision issues. The gateway speaks minor
/// units exclusively; the wallet's transaction history records major
/// units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    /// Creates a Money value from minor units.
    pub fn from_minor(amount: i64, currency: Currency) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::NegativeAmount);
        }
        Ok(Self { amount, currency })
    }

    /// Creates a Money value from major units (rupees, dollars).
    pub fn from_major(major: i64, currency: Currency) -> Result<Self, DomainError> {
        if major < 0 {
            return Err(DomainError::NegativeAmount);
        }
        Ok(Self {
            amount: major * currency.minor_per_major(),
            currency,
        })
    }

    /// Returns the amount in minor units.
    pub fn minor(&self) -> i64 {
        self.amount
    }

    /// Returns the amount in whole major units. Sub-unit remainders are
    /// dropped; orders created through this service are always whole-major,
    /// so the verified payment path divides back exactly.
    pub fn major(&self) -> i64 {
        self.amount / self.currency.minor_per_major()
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Checked addition - returns error if currencies don't match.
    pub fn checked_add(&self, other: Money) -> Result<Money, DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch {
                expected: self.currency,
                got: other.currency,
            });
        }
        Ok(Money {
            amount: self.amount.saturating_add(other.amount),
            currency: self.currency,
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per = self.currency.minor_per_major();
        write!(
            f,
            "{}{}.{:02}",
            self.currency.symbol(),
            self.amount / per,
            (self.amount % per).abs()
        )
    }
}
