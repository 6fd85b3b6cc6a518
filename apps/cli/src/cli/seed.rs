//! Demo data for trying the ledger out.
//!
//! Output is deterministic: customers, products and quantities cycle
//! through fixed tables, dates count back from today.

use chrono::{Days, Local};
use clap::Args;
use tracing::{debug, info};

use wholesale_core::aggregate::overview;
use wholesale_core::{LineItem, NewSale};

use super::Context;
use crate::error::{AppError, AppResult};

const MAX_SEED_COUNT: usize = 500;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// Number of sales to insert
    #[arg(long, short = 'n', default_value_t = 12)]
    count: usize,
}

// "Ana Torres" and "ana torres" group apart but share a history.
const CUSTOMERS: &[&str] = &[
    "Ana Torres",
    "Distribuidora El Sol",
    "Bruno Díaz",
    "ana torres",
    "Carla Méndez",
];

/// (name, sku, high, mid, low) in cents.
const PRODUCTS: &[(&str, &str, i64, i64, i64)] = &[
    ("Basic T-Shirt", "TSH-001", 0, 500, 700),
    ("Hoodie", "HOD-010", 1800, 2100, 2500),
    ("Baseball Cap", "CAP-003", 350, 0, 600),
    ("Canvas Tote", "TOT-020", 0, 0, 450),
    ("Work Gloves", "GLV-007", 900, 1100, 0),
];

const QUANTITIES: &[i64] = &[1, 3, 6, 10, 15, 24, 2, 14, 5, 40];

fn seed_sale(index: usize, today: chrono::NaiveDate) -> NewSale {
    let item_count = 1 + index % 3;
    let line_items = (0..item_count)
        .map(|j| {
            let (name, sku, high, mid, low) = PRODUCTS[(index + j) % PRODUCTS.len()];
            LineItem {
                name: name.to_string(),
                sku: sku.to_string(),
                quantity: QUANTITIES[(index * 3 + j) % QUANTITIES.len()],
                price_high_cents: high,
                price_mid_cents: mid,
                price_low_cents: low,
            }
        })
        .collect();

    NewSale {
        customer_name: CUSTOMERS[index % CUSTOMERS.len()].to_string(),
        date: today
            .checked_sub_days(Days::new(index as u64))
            .unwrap_or(today),
        observations: if index % 4 == 0 {
            "Demo sale".to_string()
        } else {
            String::new()
        },
        line_items,
    }
}

pub(crate) async fn run(args: SeedArgs, ctx: &Context) -> AppResult<String> {
    if args.count == 0 || args.count > MAX_SEED_COUNT {
        return Err(AppError::validation(format!(
            "--count must be between 1 and {}",
            MAX_SEED_COUNT
        )));
    }

    let today = Local::now().date_naive();
    for index in (0..args.count).rev() {
        let sale = ctx.store.create(seed_sale(index, today)).await?;
        debug!(id = %sale.id, customer = %sale.customer_name, "Seeded sale");
    }
    info!(count = args.count, "Seeding complete");

    let counts = overview(&ctx.store.list().await?);
    if ctx.json {
        return Ok(serde_json::to_string_pretty(&counts)?);
    }
    Ok(format!(
        "Inserted {} demo sales. Ledger now has {}.",
        args.count,
        ctx.report.overview(&counts)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wholesale_core::validation::validate_new_sale;

    #[test]
    fn test_seed_sales_are_valid() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        for index in 0..40 {
            let sale = seed_sale(index, today);
            assert!(validate_new_sale(&sale).is_ok(), "seed sale {} is invalid", index);
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(seed_sale(7, today), seed_sale(7, today));
        assert_eq!(seed_sale(2, today).date, NaiveDate::from_ymd_opt(2026, 2, 27).unwrap());
    }
}
