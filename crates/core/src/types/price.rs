//! Price display helpers using decimal arithmetic.
//!
//! The ticketing API reports prices as plain numbers next to an ISO 4217
//! code that may live on the ticket type or on the shop. An absent price
//! means the ticket is free.

use rust_decimal::Decimal;

/// Label shown in place of an absent price.
pub const FREE_LABEL: &str = "Free";

/// Display symbol for a currency code.
///
/// Only EUR has a dedicated symbol; any other code is shown as-is, and a
/// missing code falls back to the euro sign.
#[must_use]
pub fn currency_symbol(currency: Option<&str>) -> &str {
    match currency {
        Some("EUR") | None => "€",
        Some(code) => code,
    }
}

/// Format a price for display (e.g., "€19.99").
///
/// Returns [`FREE_LABEL`] when the price is absent.
#[must_use]
pub fn format_price(price: Option<Decimal>, currency: Option<&str>) -> String {
    price.map_or_else(
        || FREE_LABEL.to_string(),
        |amount| format_amount(amount, currency),
    )
}

/// Format an amount that is known to exist (totals, line totals).
#[must_use]
pub fn format_amount(amount: Decimal, currency: Option<&str>) -> String {
    format!("{}{:.2}", currency_symbol(currency), amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_price_is_free() {
        assert_eq!(format_price(None, Some("EUR")), "Free");
        assert_eq!(format_price(None, None), "Free");
    }

    #[test]
    fn test_eur_uses_euro_sign() {
        assert_eq!(format_price(Some(Decimal::new(10, 0)), Some("EUR")), "€10.00");
    }

    #[test]
    fn test_other_currency_uses_code() {
        assert_eq!(
            format_price(Some(Decimal::new(1250, 2)), Some("USD")),
            "USD12.50"
        );
    }

    #[test]
    fn test_missing_currency_defaults_to_euro_sign() {
        assert_eq!(format_price(Some(Decimal::new(5, 1)), None), "€0.50");
    }

    #[test]
    fn test_zero_price_is_not_free() {
        assert_eq!(format_price(Some(Decimal::ZERO), None), "€0.00");
    }

    #[test]
    fn test_format_amount_rounds_to_cents() {
        assert_eq!(format_amount(Decimal::new(19_999, 3), Some("EUR")), "€20.00");
    }
}
