//! `add`, `list`, `edit` and `delete`.
//!
//! Writes always re-read the store before printing, so what is shown is
//! what was persisted.

use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::json;
use tracing::info;

use wholesale_core::aggregate::overview;
use wholesale_core::validation::{validate_sale_id, validate_sale_patch};
use wholesale_core::{NewSale, Sale, SalePatch};

use super::item::LineItemArg;
use super::Context;
use crate::error::{AppError, AppResult};

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Customer name
    #[arg(long, short)]
    customer: String,

    /// Sale date, YYYY-MM-DD (defaults to today)
    #[arg(long, short)]
    date: Option<NaiveDate>,

    /// Free-text notes
    #[arg(long, short, default_value = "")]
    observations: String,

    /// Line item, repeatable: "name=..,sku=..,qty=10,high=0,mid=5.00,low=7.00"
    #[arg(long = "item", short = 'i', required = true)]
    items: Vec<LineItemArg>,
}

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Print every sale with its line items
    #[arg(long)]
    detail: bool,
}

#[derive(Debug, Args)]
pub(crate) struct EditArgs {
    /// Sale id
    id: String,

    /// New customer name
    #[arg(long, short)]
    customer: Option<String>,

    /// New sale date, YYYY-MM-DD
    #[arg(long, short)]
    date: Option<NaiveDate>,

    /// New notes ("" clears them)
    #[arg(long, short)]
    observations: Option<String>,

    /// Replaces all line items when given at least once
    #[arg(long = "item", short = 'i')]
    items: Vec<LineItemArg>,
}

#[derive(Debug, Args)]
pub(crate) struct DeleteArgs {
    /// Sale id
    id: String,
}

fn into_line_items(items: Vec<LineItemArg>) -> Vec<wholesale_core::LineItem> {
    items.into_iter().map(|LineItemArg(item)| item).collect()
}

async fn fetch(ctx: &Context, id: &str) -> AppResult<Sale> {
    ctx.store
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Sale", id))
}

fn render_sale(ctx: &Context, headline: String, sale: &Sale) -> AppResult<String> {
    if ctx.json {
        return Ok(serde_json::to_string_pretty(&ctx.report.sale_view(sale))?);
    }
    Ok(format!("{}\n\n{}", headline, ctx.report.sale_detail(sale)))
}

pub(crate) async fn add(args: AddArgs, ctx: &Context) -> AppResult<String> {
    let new_sale = NewSale {
        customer_name: args.customer,
        date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        observations: args.observations,
        line_items: into_line_items(args.items),
    };

    let created = ctx.store.create(new_sale).await?;
    info!(id = %created.id, customer = %created.customer_name, "Sale recorded");

    let stored = fetch(ctx, &created.id).await?;
    render_sale(ctx, format!("Recorded sale for {}.", stored.customer_name), &stored)
}

pub(crate) async fn list(args: ListArgs, ctx: &Context) -> AppResult<String> {
    let sales = ctx.store.list().await?;
    let counts = overview(&sales);

    if ctx.json {
        let views: Vec<_> = sales.iter().map(|s| ctx.report.sale_view(s)).collect();
        return Ok(serde_json::to_string_pretty(&json!({
            "overview": counts,
            "sales": views,
        }))?);
    }

    let mut out = ctx.report.overview(&counts);
    out.push('\n');
    if args.detail && !sales.is_empty() {
        for sale in &sales {
            out.push('\n');
            out.push_str(&ctx.report.sale_detail(sale));
        }
    } else {
        out.push_str(&ctx.report.sales_table(&sales));
    }
    Ok(out)
}

pub(crate) async fn edit(args: EditArgs, ctx: &Context) -> AppResult<String> {
    let id = args.id.trim();
    validate_sale_id(id)?;

    let patch = SalePatch {
        customer_name: args.customer,
        date: args.date,
        observations: args.observations,
        line_items: (!args.items.is_empty()).then(|| into_line_items(args.items)),
    };
    if patch.is_empty() {
        return Err(AppError::validation(
            "Nothing to change; pass --customer, --date, --observations or --item",
        ));
    }
    validate_sale_patch(&patch)?;

    ctx.store.update(id, patch).await?;
    info!(id = %id, "Sale updated");

    let stored = fetch(ctx, id).await?;
    render_sale(ctx, format!("Updated sale {}.", stored.id), &stored)
}

pub(crate) async fn delete(args: DeleteArgs, ctx: &Context) -> AppResult<String> {
    let id = args.id.trim();
    validate_sale_id(id)?;

    ctx.store.delete(id).await?;
    info!(id = %id, "Sale deleted");

    let remaining = overview(&ctx.store.list().await?);
    if ctx.json {
        return Ok(serde_json::to_string_pretty(&json!({
            "deleted": id,
            "overview": remaining,
        }))?);
    }
    Ok(format!(
        "Deleted sale {}. {} remaining.",
        id,
        ctx.report.overview(&remaining)
    ))
}
