//! Terminal rendering for sales, customer groups and histories.
//!
//! Every amount goes through [`Report::money`] so the configured currency
//! symbol and the two-decimal format are applied in one place.

use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Alignment, Style};
use tabled::Table;

use wholesale_core::aggregate::{sale_total_with, sale_unit_count, CustomerHistory, SalesOverview};
use wholesale_core::pricing::{applicable_price_with, line_subtotal_with};
use wholesale_core::{CustomerGroup, Money, PriceTier, PricingPolicy, Sale};

/// A sale with its derived totals, for `--json` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleView<'a> {
    #[serde(flatten)]
    pub sale: &'a Sale,
    pub total: Money,
    pub total_units: i64,
}

/// Rendering settings shared by all commands.
#[derive(Debug, Clone)]
pub struct Report {
    currency_symbol: String,
    policy: PricingPolicy,
}

impl Report {
    pub fn new(currency_symbol: impl Into<String>, policy: PricingPolicy) -> Self {
        Report {
            currency_symbol: currency_symbol.into(),
            policy,
        }
    }

    pub fn policy(&self) -> PricingPolicy {
        self.policy
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }

    pub fn sale_view<'a>(&self, sale: &'a Sale) -> SaleView<'a> {
        SaleView {
            sale,
            total: sale_total_with(sale, self.policy),
            total_units: sale_unit_count(sale),
        }
    }

    pub fn overview(&self, overview: &SalesOverview) -> String {
        format!(
            "{} {}, {} {}",
            overview.customer_count,
            plural(overview.customer_count, "customer", "customers"),
            overview.sale_count,
            plural(overview.sale_count, "sale", "sales"),
        )
    }

    /// One row per sale, in the order given.
    pub fn sales_table(&self, sales: &[Sale]) -> String {
        if sales.is_empty() {
            return "No sales recorded yet.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(["Date", "Customer", "Items", "Units", "Total", "ID"]);
        for sale in sales {
            builder.push_record([
                sale.date.to_string(),
                sale.customer_name.clone(),
                sale.line_items.len().to_string(),
                sale_unit_count(sale).to_string(),
                self.money(sale_total_with(sale, self.policy)),
                sale.id.clone(),
            ]);
        }

        finish(builder, 2..5)
    }

    /// Header fields plus a line item table with tier and applied price.
    pub fn sale_detail(&self, sale: &Sale) -> String {
        let mut out = String::new();
        out.push_str(&format!("Sale      {}\n", sale.id));
        out.push_str(&format!("Customer  {}\n", sale.customer_name));
        out.push_str(&format!("Date      {}\n", sale.date));
        if !sale.observations.is_empty() {
            out.push_str(&format!("Notes     {}\n", sale.observations));
        }
        out.push_str(&self.line_items_table(sale));
        out.push('\n');
        out.push_str(&format!(
            "Total     {}\n",
            self.money(sale_total_with(sale, self.policy))
        ));
        out
    }

    fn line_items_table(&self, sale: &Sale) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Product", "SKU", "Qty", "Tier", "Unit price", "Subtotal"]);
        for item in &sale.line_items {
            builder.push_record([
                item.name.clone(),
                item.sku.clone(),
                item.quantity.to_string(),
                PriceTier::for_quantity(item.quantity).label().to_string(),
                self.money(applicable_price_with(item, self.policy)),
                self.money(line_subtotal_with(item, self.policy)),
            ]);
        }

        finish(builder, 2..6)
    }

    /// Customer summary rows; with `expand`, each group's sales follow.
    pub fn customer_groups(&self, groups: &[CustomerGroup], expand: bool) -> String {
        if groups.is_empty() {
            return "No customers yet.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(["Customer", "Sales", "Line items", "Units", "Total"]);
        for group in groups {
            builder.push_record([
                group.customer_name.clone(),
                group.sale_count.to_string(),
                group.total_line_items.to_string(),
                group.total_units.to_string(),
                self.money(group.total_amount),
            ]);
        }

        let mut out = finish(builder, 1..5);

        if expand {
            for group in groups {
                out.push_str(&format!(
                    "\n\n== {} ({}) ==\n",
                    group.customer_name,
                    self.money(group.total_amount)
                ));
                for sale in &group.sales {
                    out.push('\n');
                    out.push_str(&self.sale_detail(sale));
                }
            }
        }

        out
    }

    /// Purchase history for one customer, newest first, with totals.
    pub fn history(&self, history: &CustomerHistory) -> String {
        if history.is_empty() {
            return format!("No sales found for \"{}\".", history.customer_name);
        }

        let mut builder = Builder::default();
        builder.push_record(["Date", "Recorded", "Items", "Units", "Total", "ID"]);
        for sale in &history.sales {
            builder.push_record([
                sale.date.to_string(),
                sale.created_at.format("%Y-%m-%d %H:%M").to_string(),
                sale.line_items.len().to_string(),
                sale_unit_count(sale).to_string(),
                self.money(sale_total_with(sale, self.policy)),
                sale.id.clone(),
            ]);
        }

        format!(
            "History for \"{}\"\n{}\n{} {}, {} units, {}",
            history.customer_name,
            finish(builder, 2..5),
            history.sale_count,
            plural(history.sale_count, "sale", "sales"),
            history.total_units,
            self.money(history.total_amount),
        )
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

fn finish(builder: Builder, numeric: std::ops::Range<usize>) -> String {
    let mut table: Table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(numeric), Alignment::right());
    table.modify(Rows::first(), Alignment::left());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use wholesale_core::aggregate::{customer_history, group_by_customer, overview};
    use wholesale_core::{LineItem, NewSale};

    fn sale(id: &str, customer: &str, items: Vec<LineItem>) -> Sale {
        Sale::from_new(
            id,
            Utc.with_ymd_and_hms(2026, 3, 1, 10, 30, 0).unwrap(),
            NewSale {
                customer_name: customer.to_string(),
                date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                observations: "leave at the back door".to_string(),
                line_items: items,
            },
        )
    }

    fn shirt(quantity: i64, mid: i64, low: i64) -> LineItem {
        LineItem {
            name: "Basic T-Shirt".to_string(),
            sku: "TSH-001".to_string(),
            quantity,
            price_high_cents: 0,
            price_mid_cents: mid,
            price_low_cents: low,
        }
    }

    #[test]
    fn test_money_uses_symbol() {
        let report = Report::new("€", PricingPolicy::Fallback);
        assert_eq!(report.money(Money::from_cents(5000)), "€50.00");
    }

    #[test]
    fn test_sale_detail_shows_tier_and_total() {
        let report = Report::new("$", PricingPolicy::Fallback);
        let out = report.sale_detail(&sale("s1", "Ana", vec![shirt(10, 500, 700)]));

        assert!(out.contains("Customer  Ana"));
        assert!(out.contains("6-14"));
        assert!(out.contains("$5.00"));
        assert!(out.contains("Total     $50.00"));
        assert!(out.contains("leave at the back door"));
    }

    #[test]
    fn test_strict_policy_changes_rendered_total() {
        let s = sale("s1", "Ana", vec![shirt(10, 0, 700)]);
        assert!(Report::new("$", PricingPolicy::Fallback)
            .sale_detail(&s)
            .contains("Total     $70.00"));
        assert!(Report::new("$", PricingPolicy::StrictBucket)
            .sale_detail(&s)
            .contains("Total     $0.00"));
    }

    #[test]
    fn test_customer_table() {
        let report = Report::new("$", PricingPolicy::Fallback);
        let sales = vec![
            sale("a", "Ana", vec![shirt(2, 0, 1000)]),
            sale("b", "Ana", vec![shirt(6, 500, 0)]),
        ];
        let out = report.customer_groups(&group_by_customer(&sales), false);
        assert!(out.contains("Ana"));
        assert!(out.contains("$50.00"));
        assert!(!out.contains("== Ana"));

        let expanded = report.customer_groups(&group_by_customer(&sales), true);
        assert!(expanded.contains("== Ana ($50.00) =="));
    }

    #[test]
    fn test_empty_outputs() {
        let report = Report::new("$", PricingPolicy::Fallback);
        assert_eq!(report.sales_table(&[]), "No sales recorded yet.");
        assert_eq!(report.customer_groups(&[], true), "No customers yet.");
        assert_eq!(
            report.history(&customer_history(&[], "Ana")),
            "No sales found for \"Ana\"."
        );
    }

    #[test]
    fn test_overview_line() {
        let report = Report::new("$", PricingPolicy::Fallback);
        let sales = vec![sale("a", "Ana", vec![shirt(1, 0, 100)])];
        assert_eq!(report.overview(&overview(&sales)), "1 customer, 1 sale");
        assert_eq!(report.overview(&overview(&[])), "0 customers, 0 sales");
    }

    #[test]
    fn test_sale_view_json() {
        let report = Report::new("$", PricingPolicy::Fallback);
        let s = sale("a", "Ana", vec![shirt(10, 500, 700)]);
        let json = serde_json::to_value(report.sale_view(&s)).unwrap();
        assert_eq!(json["customerName"], "Ana");
        assert_eq!(json["total"], 5000);
        assert_eq!(json["totalUnits"], 10);
    }
}
