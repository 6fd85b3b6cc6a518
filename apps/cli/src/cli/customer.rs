//! `customers`, `history` and `summary`.

use clap::Args;
use serde_json::json;

use wholesale_core::aggregate::{group_by_customer_with, overview, sale_total_with, sale_unit_count};
use wholesale_core::{CustomerHistory, GroupOrder, Money};

use super::Context;
use crate::error::AppResult;

#[derive(Debug, Args)]
pub(crate) struct CustomersArgs {
    /// Show each customer's sales under the summary table
    #[arg(long, short)]
    expand: bool,

    /// Order sales inside each group newest first
    #[arg(long)]
    newest_first: bool,
}

#[derive(Debug, Args)]
pub(crate) struct HistoryArgs {
    /// Customer name, matched ignoring case
    name: String,
}

pub(crate) async fn customers(args: CustomersArgs, ctx: &Context) -> AppResult<String> {
    let order = if args.newest_first {
        GroupOrder::NewestFirst
    } else {
        GroupOrder::Repository
    };

    let sales = ctx.store.list().await?;
    let groups = group_by_customer_with(&sales, order, ctx.report.policy());

    if ctx.json {
        return Ok(serde_json::to_string_pretty(&groups)?);
    }
    Ok(ctx.report.customer_groups(&groups, args.expand))
}

pub(crate) async fn history(args: HistoryArgs, ctx: &Context) -> AppResult<String> {
    let sales = ctx.store.find_by_customer(&args.name).await?;
    let history = CustomerHistory::from_sales(args.name, sales, ctx.report.policy());

    if ctx.json {
        return Ok(serde_json::to_string_pretty(&history)?);
    }
    Ok(ctx.report.history(&history))
}

pub(crate) async fn summary(ctx: &Context) -> AppResult<String> {
    let sales = ctx.store.list().await?;
    let counts = overview(&sales);
    let total: Money = sales
        .iter()
        .map(|s| sale_total_with(s, ctx.report.policy()))
        .sum();
    let units: i64 = sales.iter().map(sale_unit_count).sum();

    if ctx.json {
        return Ok(serde_json::to_string_pretty(&json!({
            "customerCount": counts.customer_count,
            "saleCount": counts.sale_count,
            "totalUnits": units,
            "totalAmount": total,
            "policy": ctx.report.policy(),
        }))?);
    }

    Ok(format!(
        "{}\n{} units sold, {} total ({} pricing)",
        ctx.report.overview(&counts),
        units,
        ctx.report.money(total),
        ctx.report.policy(),
    ))
}
