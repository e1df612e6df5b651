//! Rule checks for order parameters against exchange constraints.
//!
//! Structural and business violations fail with
//! [`OrderError::Validation`]; step/tick multiple violations fail with
//! [`OrderError::Precision`] so callers can tell the two apart.

use crate::error::{OrderError, Result};
use crate::market::SymbolFilters;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tolerance for the step/tick multiple checks. A remainder within this
/// distance of zero or of the step counts as a multiple.
pub const MULTIPLE_EPSILON: Decimal = dec!(0.0000000001);

/// Symbol must be non-empty and textually all-uppercase.
pub fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty() {
        return Err(OrderError::Validation(
            "Symbol must be a non-empty string.".to_string(),
        ));
    }
    let has_upper = symbol.chars().any(|c| c.is_uppercase());
    let has_lower = symbol.chars().any(|c| c.is_lowercase());
    if has_lower || !has_upper {
        return Err(OrderError::Validation(format!(
            "Symbol {symbol} is not valid. Must be uppercase."
        )));
    }
    Ok(())
}

/// Quantity must be positive, at or above the exchange minimum, and a
/// multiple of the quantity step (within [`MULTIPLE_EPSILON`]).
pub fn validate_quantity(quantity: Decimal, step_size: Decimal, min_qty: Decimal) -> Result<()> {
    if quantity <= Decimal::ZERO {
        return Err(OrderError::Validation(format!(
            "Quantity must be positive. Got: {quantity}"
        )));
    }
    if quantity < min_qty {
        return Err(OrderError::Validation(format!(
            "Quantity {quantity} is less than minimum required {min_qty}."
        )));
    }
    if step_size > Decimal::ZERO {
        let remainder = quantity % step_size;
        if remainder > MULTIPLE_EPSILON && (step_size - remainder) > MULTIPLE_EPSILON {
            return Err(OrderError::Precision(format!(
                "Quantity {quantity} is not a multiple of step size {step_size}."
            )));
        }
    }
    Ok(())
}

/// Price must be positive and a multiple of the price tick (within
/// [`MULTIPLE_EPSILON`]).
pub fn validate_price(price: Decimal, tick_size: Decimal) -> Result<()> {
    if price <= Decimal::ZERO {
        return Err(OrderError::Validation(format!(
            "Price must be positive. Got: {price}"
        )));
    }
    if tick_size > Decimal::ZERO {
        let remainder = price % tick_size;
        if remainder > MULTIPLE_EPSILON && (tick_size - remainder) > MULTIPLE_EPSILON {
            return Err(OrderError::Precision(format!(
                "Price {price} is not a valid tick size multiple of {tick_size}."
            )));
        }
    }
    Ok(())
}

/// The symbol must currently be in TRADING status.
pub fn validate_symbol_status(symbol: &str, filters: &SymbolFilters) -> Result<()> {
    if !filters.status.is_trading() {
        return Err(OrderError::Validation(format!(
            "Symbol {symbol} is currently {}, not TRADING.",
            filters.status
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Price, Quantity};
    use crate::market::SymbolStatus;

    fn filters(status: SymbolStatus) -> SymbolFilters {
        SymbolFilters {
            step_size: Quantity::new(dec!(0.001)),
            min_qty: Quantity::new(dec!(0.001)),
            tick_size: Price::new(dec!(0.01)),
            status,
        }
    }

    #[test]
    fn test_symbol_accepts_uppercase() {
        assert!(validate_symbol("BTCUSDT").is_ok());
        assert!(validate_symbol("1000SHIBUSDT").is_ok());
    }

    #[test]
    fn test_symbol_rejects_empty() {
        let err = validate_symbol("").unwrap_err();
        assert_eq!(
            err,
            OrderError::Validation("Symbol must be a non-empty string.".to_string())
        );
    }

    #[test]
    fn test_symbol_rejects_lowercase() {
        let err = validate_symbol("btc").unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
        assert!(validate_symbol("BtcUsdt").is_err());
    }

    #[test]
    fn test_symbol_rejects_digits_only() {
        assert!(validate_symbol("123").is_err());
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let err = validate_quantity(Decimal::ZERO, dec!(0.001), dec!(0.001)).unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
        assert!(validate_quantity(dec!(-1), dec!(0.001), dec!(0.001)).is_err());
    }

    #[test]
    fn test_quantity_below_minimum() {
        let err = validate_quantity(dec!(0.0001), dec!(0.001), dec!(0.001)).unwrap_err();
        assert_eq!(
            err,
            OrderError::Validation(
                "Quantity 0.0001 is less than minimum required 0.001.".to_string()
            )
        );
    }

    #[test]
    fn test_quantity_step_multiple_accepted() {
        assert!(validate_quantity(dec!(0.02), dec!(0.01), dec!(0.001)).is_ok());
        assert!(validate_quantity(dec!(5), dec!(1), dec!(1)).is_ok());
    }

    #[test]
    fn test_quantity_non_multiple_is_precision_error() {
        let err = validate_quantity(dec!(0.015), dec!(0.01), dec!(0.001)).unwrap_err();
        assert_eq!(
            err,
            OrderError::Precision(
                "Quantity 0.015 is not a multiple of step size 0.01.".to_string()
            )
        );
    }

    #[test]
    fn test_quantity_residue_within_epsilon_accepted() {
        // Residue below the tolerance on either side of a multiple.
        let just_above = dec!(0.01) + dec!(0.00000000001);
        let just_below = dec!(0.02) - dec!(0.00000000001);
        assert!(validate_quantity(just_above, dec!(0.01), dec!(0.001)).is_ok());
        assert!(validate_quantity(just_below, dec!(0.01), dec!(0.001)).is_ok());
    }

    #[test]
    fn test_quantity_zero_step_skips_multiple_check() {
        assert!(validate_quantity(dec!(0.0137), Decimal::ZERO, dec!(0.001)).is_ok());
    }

    #[test]
    fn test_price_must_be_positive() {
        let err = validate_price(Decimal::ZERO, dec!(0.01)).unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[test]
    fn test_price_non_multiple_is_precision_error() {
        let err = validate_price(dec!(45000.25), dec!(0.50)).unwrap_err();
        assert_eq!(
            err,
            OrderError::Precision(
                "Price 45000.25 is not a valid tick size multiple of 0.50.".to_string()
            )
        );
    }

    #[test]
    fn test_price_multiple_accepted() {
        assert!(validate_price(dec!(45000.50), dec!(0.50)).is_ok());
        assert!(validate_price(dec!(45000.13), dec!(0.01)).is_ok());
    }

    #[test]
    fn test_status_trading_accepted() {
        assert!(validate_symbol_status("BTCUSDT", &filters(SymbolStatus::Trading)).is_ok());
    }

    #[test]
    fn test_status_inactive_rejected_with_raw_status() {
        let err = validate_symbol_status(
            "BTCUSDT",
            &filters(SymbolStatus::Inactive("SETTLING".to_string())),
        )
        .unwrap_err();
        assert_eq!(
            err,
            OrderError::Validation("Symbol BTCUSDT is currently SETTLING, not TRADING.".to_string())
        );
    }
}
