//! # Validation Module
//!
//! Business rule checks applied before a sale reaches storage.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                   │
//! │  ├── Money and date formats                                            │
//! │  └── `--item key=value` syntax                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── validate_new_sale   (create)                                      │
//! │  └── validate_sale       (merged record on update)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                        │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key line item → sale (ON DELETE CASCADE)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use wholesale_core::validation::{validate_customer_name, validate_quantity};
//!
//! assert!(validate_customer_name("Ana").is_ok());
//! assert!(validate_customer_name("   ").is_err());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{LineItem, NewSale, Sale, SalePatch};
use crate::{
    MAX_CUSTOMER_NAME_LEN, MAX_LINE_ITEMS, MAX_OBSERVATIONS_LEN, MAX_PRICE_CENTS,
    MAX_PRODUCT_NAME_LEN, MAX_QUANTITY, MAX_SKU_LEN,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn required_text(value: &str, field: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a customer name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    required_text(name, "customer_name", MAX_CUSTOMER_NAME_LEN)
}

/// Validates the product name on a line item.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    required_text(name, "name", MAX_PRODUCT_NAME_LEN)
}

/// Validates a SKU.
///
/// Any printable text is accepted; SKUs are free-form labels and need not
/// be unique.
///
/// ## Example
/// ```rust
/// use wholesale_core::validation::validate_sku;
///
/// assert!(validate_sku("TSH-001").is_ok());
/// assert!(validate_sku("TSH 001 / M").is_ok());
/// assert!(validate_sku("").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    required_text(sku, "sku", MAX_SKU_LEN)
}

/// Validates the free-text observations. Empty is fine.
pub fn validate_observations(observations: &str) -> ValidationResult<()> {
    if observations.chars().count() > MAX_OBSERVATIONS_LEN {
        return Err(ValidationError::TooLong {
            field: "observations".to_string(),
            max: MAX_OBSERVATIONS_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be at least 1
/// - At most [`MAX_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a tier price in cents.
///
/// ## Rules
/// - Between 0 and [`MAX_PRICE_CENTS`]
/// - Zero means "not set" and is allowed
///
/// ## Example
/// ```rust
/// use wholesale_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents("price_mid", 500).is_ok());
/// assert!(validate_price_cents("price_high", 0).is_ok());
/// assert!(validate_price_cents("price_low", -100).is_err());
/// ```
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of one line item.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_product_name(&item.name)?;
    validate_sku(&item.sku)?;
    validate_quantity(item.quantity)?;
    validate_price_cents("price_high", item.price_high_cents)?;
    validate_price_cents("price_mid", item.price_mid_cents)?;
    validate_price_cents("price_low", item.price_low_cents)?;
    Ok(())
}

/// Validates the line item list: 1 to [`MAX_LINE_ITEMS`] entries, each valid.
///
/// Errors name the offending position, e.g. `line_items[2].sku is required`.
pub fn validate_line_items(items: &[LineItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Empty {
            field: "line_items".to_string(),
        });
    }

    if items.len() > MAX_LINE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "line_items".to_string(),
            min: 1,
            max: MAX_LINE_ITEMS as i64,
        });
    }

    for (index, item) in items.iter().enumerate() {
        validate_line_item(item).map_err(|e| e.at_line_item(index))?;
    }

    Ok(())
}

/// Validates a create payload.
pub fn validate_new_sale(sale: &NewSale) -> ValidationResult<()> {
    validate_customer_name(&sale.customer_name)?;
    validate_observations(&sale.observations)?;
    validate_line_items(&sale.line_items)?;
    Ok(())
}

/// Validates a stored or merged sale.
pub fn validate_sale(sale: &Sale) -> ValidationResult<()> {
    validate_customer_name(&sale.customer_name)?;
    validate_observations(&sale.observations)?;
    validate_line_items(&sale.line_items)?;
    Ok(())
}

/// Validates only the fields a patch sets.
///
/// The repository still validates the merged record; this lets the CLI
/// reject bad input before touching storage.
pub fn validate_sale_patch(patch: &SalePatch) -> ValidationResult<()> {
    if let Some(name) = &patch.customer_name {
        validate_customer_name(name)?;
    }
    if let Some(observations) = &patch.observations {
        validate_observations(observations)?;
    }
    if let Some(items) = &patch.line_items {
        validate_line_items(items)?;
    }
    Ok(())
}

// =============================================================================
// Identifiers
// =============================================================================

/// Validates a sale id (UUID).
///
/// ## Example
/// ```rust
/// use wholesale_core::validation::validate_sale_id;
///
/// assert!(validate_sale_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_sale_id("not-a-uuid").is_err());
/// ```
pub fn validate_sale_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

/// Lookup key for case-insensitive customer matching.
///
/// Stored next to the exact name so history queries can hit an index.
pub fn customer_key(name: &str) -> String {
    name.to_lowercase()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item() -> LineItem {
        LineItem {
            name: "Basic T-Shirt".to_string(),
            sku: "TSH-001".to_string(),
            quantity: 10,
            price_high_cents: 0,
            price_mid_cents: 500,
            price_low_cents: 700,
        }
    }

    fn new_sale(items: Vec<LineItem>) -> NewSale {
        NewSale {
            customer_name: "Ana".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            observations: String::new(),
            line_items: items,
        }
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Ana").is_ok());
        assert!(validate_customer_name("María José").is_ok());

        assert_eq!(
            validate_customer_name("  "),
            Err(ValidationError::Required {
                field: "customer_name".to_string()
            })
        );
        assert!(validate_customer_name(&"x".repeat(201)).is_err());
        // length counts characters, not bytes
        assert!(validate_customer_name(&"ñ".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(500).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents("price_mid", 0).is_ok());
        assert!(validate_price_cents("price_mid", 1).is_ok());
        assert!(validate_price_cents("price_mid", -1).is_err());
        assert!(validate_price_cents("price_mid", MAX_PRICE_CENTS).is_ok());
        assert!(validate_price_cents("price_mid", MAX_PRICE_CENTS + 1).is_err());
    }

    #[test]
    fn test_oversized_amounts_are_rejected() {
        let mut huge = item();
        huge.quantity = 100_000_000_000;
        huge.price_high_cents = 100_000_000;
        assert!(validate_new_sale(&new_sale(vec![huge])).is_err());

        let too_many = vec![item(); MAX_LINE_ITEMS + 1];
        assert!(matches!(
            validate_new_sale(&new_sale(too_many)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_largest_valid_sale_totals_exactly() {
        let mut biggest = item();
        biggest.quantity = MAX_QUANTITY;
        biggest.price_high_cents = MAX_PRICE_CENTS;

        let sale = new_sale(vec![biggest; MAX_LINE_ITEMS]);
        assert!(validate_new_sale(&sale).is_ok());

        let stored = Sale::from_new("s1", chrono::Utc::now(), sale);
        assert_eq!(
            crate::aggregate::sale_total(&stored).cents(),
            MAX_QUANTITY * MAX_PRICE_CENTS * MAX_LINE_ITEMS as i64
        );
    }

    #[test]
    fn test_validate_observations() {
        assert!(validate_observations("").is_ok());
        assert!(validate_observations(&"a".repeat(2000)).is_ok());
        assert!(validate_observations(&"a".repeat(2001)).is_err());
    }

    #[test]
    fn test_new_sale_requires_line_items() {
        assert!(validate_new_sale(&new_sale(vec![item()])).is_ok());
        assert_eq!(
            validate_new_sale(&new_sale(vec![])),
            Err(ValidationError::Empty {
                field: "line_items".to_string()
            })
        );
    }

    #[test]
    fn test_line_item_errors_name_position() {
        let mut bad = item();
        bad.sku = String::new();

        let err = validate_new_sale(&new_sale(vec![item(), bad])).unwrap_err();
        assert_eq!(err.to_string(), "line_items[1].sku is required");

        let mut negative = item();
        negative.price_low_cents = -5;
        let err = validate_line_items(&[negative]).unwrap_err();
        assert!(err.to_string().starts_with("line_items[0].price_low"));
    }

    #[test]
    fn test_validate_sale_patch_checks_present_fields_only() {
        assert!(validate_sale_patch(&SalePatch::default()).is_ok());
        assert!(validate_sale_patch(&SalePatch {
            customer_name: Some(String::new()),
            ..SalePatch::default()
        })
        .is_err());
        assert!(validate_sale_patch(&SalePatch {
            line_items: Some(vec![]),
            ..SalePatch::default()
        })
        .is_err());
    }

    #[test]
    fn test_validate_sale_id() {
        assert!(validate_sale_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_sale_id("").is_err());
        assert!(validate_sale_id("sale-1").is_err());
    }

    #[test]
    fn test_customer_key() {
        assert_eq!(customer_key("JUAN"), customer_key("juan"));
        assert_eq!(customer_key("Óscar"), "óscar");
        assert_ne!(customer_key("Juan"), customer_key("Juana"));
    }
}
