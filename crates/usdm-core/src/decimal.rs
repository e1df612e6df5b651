//! Precision-safe decimal types and rounding for order submission.
//!
//! All arithmetic is exact via `rust_decimal`. Exchange filters publish
//! steps as decimal fractions (e.g. "0.00100000"), so every rounding
//! operation here works on the step's significant fractional digits.

use crate::error::{OrderError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rounds `value` toward zero at the granularity implied by `step`'s
/// significant fractional digits.
///
/// Never rounds up past what the caller requested. A zero step means the
/// exchange publishes no constraint and `value` passes through unchanged.
pub fn round_to_step(value: Decimal, step: Decimal) -> Result<Decimal> {
    if step.is_zero() {
        return Ok(value);
    }
    if step.is_sign_negative() {
        return Err(OrderError::Precision(format!(
            "Failed to round {value} with step size {step}: step must be non-negative."
        )));
    }
    let dp = step.normalize().scale();
    Ok(value.round_dp_with_strategy(dp, RoundingStrategy::ToZero))
}

/// Rounds `value` to nearest, ties away from zero, at the granularity
/// implied by `tick`'s significant fractional digits.
///
/// Zero tick passes `value` through unchanged.
pub fn round_to_tick(value: Decimal, tick: Decimal) -> Result<Decimal> {
    if tick.is_zero() {
        return Ok(value);
    }
    if tick.is_sign_negative() {
        return Err(OrderError::Precision(format!(
            "Failed to round {value} with tick size {tick}: tick must be non-negative."
        )));
    }
    let dp = tick.normalize().scale();
    Ok(value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
}

/// Formats a decimal for the wire: plain notation, no exponent, no
/// trailing fractional zeros.
///
/// Exchange-side parsers reject exponent notation. `1.2300` becomes
/// `"1.23"` and `45000` stays `"45000"`.
pub fn format_plain(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Order quantity with exact decimal precision.
///
/// Wraps `Decimal` to provide type safety and prevent mixing
/// quantities with prices in calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(pub Decimal);

impl Quantity {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Round down to the quantity step published by the exchange.
    #[inline]
    pub fn round_to_step(&self, step: Quantity) -> Result<Self> {
        round_to_step(self.0, step.0).map(Self)
    }

    /// Canonical wire form: plain notation, trailing zeros stripped.
    #[inline]
    pub fn to_plain_string(&self) -> String {
        format_plain(self.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Quantity {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

/// Price with exact decimal precision.
///
/// Wraps `Decimal` to provide type safety and prevent mixing
/// prices with quantities in calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Round to the nearest price tick published by the exchange.
    #[inline]
    pub fn round_to_tick(&self, tick: Price) -> Result<Self> {
        round_to_tick(self.0, tick.0).map(Self)
    }

    /// Canonical wire form: plain notation, trailing zeros stripped.
    #[inline]
    pub fn to_plain_string(&self) -> String {
        format_plain(self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}
