//! `--item` argument parsing.
//!
//! One line item per flag, as comma-separated `key=value` pairs:
//!
//! ```text
//! --item "name=Basic T-Shirt,sku=TSH-001,qty=10,high=0,mid=5.00,low=7.00"
//! ```
//!
//! `name`, `sku` and `qty` are required. Omitted tier prices are 0 (not
//! set). Values cannot contain commas.

use std::str::FromStr;
use wholesale_core::{LineItem, Money, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineItemArg(pub LineItem);

fn invalid(field: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn price(field: &str, raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<Money>()
        .map(|m| m.cents())
        .map_err(|e| invalid(field, e.to_string()))
}

impl FromStr for LineItemArg {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut name = None;
        let mut sku = None;
        let mut quantity = None;
        let (mut high, mut mid, mut low) = (0, 0, 0);

        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| invalid("item", format!("expected key=value, got '{}'", pair)))?;
            let value = value.trim();

            match key.trim().to_lowercase().as_str() {
                "name" => name = Some(value.to_string()),
                "sku" => sku = Some(value.to_string()),
                "qty" | "quantity" => {
                    let qty = value
                        .parse::<i64>()
                        .map_err(|_| invalid("quantity", format!("'{}' is not a whole number", value)))?;
                    quantity = Some(qty);
                }
                "high" => high = price("price_high", value)?,
                "mid" => mid = price("price_mid", value)?,
                "low" => low = price("price_low", value)?,
                other => {
                    return Err(invalid(
                        "item",
                        format!("unknown key '{}', expected name, sku, qty, high, mid, low", other),
                    ))
                }
            }
        }

        let required = |field: &str| ValidationError::Required {
            field: field.to_string(),
        };

        Ok(LineItemArg(LineItem {
            name: name.ok_or_else(|| required("name"))?,
            sku: sku.ok_or_else(|| required("sku"))?,
            quantity: quantity.ok_or_else(|| required("qty"))?,
            price_high_cents: high,
            price_mid_cents: mid,
            price_low_cents: low,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_item() {
        let LineItemArg(item) = "name=Basic T-Shirt,sku=TSH-001,qty=10,high=0,mid=5.00,low=7.00"
            .parse()
            .unwrap();

        assert_eq!(item.name, "Basic T-Shirt");
        assert_eq!(item.sku, "TSH-001");
        assert_eq!(item.quantity, 10);
        assert_eq!(item.price_high_cents, 0);
        assert_eq!(item.price_mid_cents, 500);
        assert_eq!(item.price_low_cents, 700);
    }

    #[test]
    fn test_missing_prices_default_to_zero() {
        let LineItemArg(item) = "sku=CAP-1, name=Cap, quantity=3, low=2.5".parse().unwrap();
        assert_eq!(item.price_low_cents, 250);
        assert_eq!(item.price_mid_cents, 0);
        assert_eq!(item.price_high_cents, 0);
    }

    #[test]
    fn test_required_keys() {
        let err = "sku=CAP-1,qty=3".parse::<LineItemArg>().unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!("name=Cap,sku=C,qty=two".parse::<LineItemArg>().is_err());
        assert!("name=Cap,sku=C,qty=1,mid=1.234".parse::<LineItemArg>().is_err());
        assert!("name=Cap,sku=C,qty=1,color=red".parse::<LineItemArg>().is_err());
        assert!("name=Cap,sku=C,qty".parse::<LineItemArg>().is_err());
    }
}
