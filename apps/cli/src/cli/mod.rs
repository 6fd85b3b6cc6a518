//! Command-line surface of the `wholesale` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use wholesale_core::PricingPolicy;
use wholesale_db::{Database, DbConfig, InMemorySaleStore, SaleStore};

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::output::Report;

mod customer;
mod item;
mod sale;
mod seed;

#[derive(Debug, Parser)]
#[command(name = "wholesale", about = "Wholesale sales ledger", version, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options accepted by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Config file (defaults to config.toml in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Keep sales in memory only; nothing is saved
    #[arg(long, global = true, conflicts_with = "db")]
    pub in_memory: bool,

    /// Pricing policy: fallback or strict_bucket
    #[arg(long, global = true)]
    pub policy: Option<PricingPolicy>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalArgs {
    /// Flags win over file and environment settings.
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(path) = &self.db {
            config.database.path = Some(path.clone());
        }
        if let Some(policy) = self.policy {
            config.pricing.policy = policy;
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Record a new sale
    Add(sale::AddArgs),
    /// List all sales in the order they were recorded
    List(sale::ListArgs),
    /// Change fields of an existing sale
    Edit(sale::EditArgs),
    /// Remove a sale
    Delete(sale::DeleteArgs),
    /// Per-customer totals
    Customers(customer::CustomersArgs),
    /// One customer's purchases, newest first
    History(customer::HistoryArgs),
    /// Customer and sale counts with overall totals
    Summary,
    /// Insert demo sales
    Seed(seed::SeedArgs),
}

/// What every command needs: the store and how to render.
pub struct Context {
    pub store: Box<dyn SaleStore>,
    pub report: Report,
    pub json: bool,
}

impl Context {
    pub fn new(store: Box<dyn SaleStore>, config: &AppConfig, json: bool) -> Self {
        Context {
            store,
            report: Report::new(config.display.currency_symbol.clone(), config.pricing.policy),
            json,
        }
    }
}

impl Cli {
    /// Loads configuration, opens the store, runs the command.
    pub async fn run(self) -> AppResult<String> {
        let mut config = AppConfig::load(self.global.config.as_deref())?;
        self.global.apply_to(&mut config);
        config.validate()?;

        let store = open_store(&config, self.global.in_memory).await?;
        let ctx = Context::new(store, &config, self.global.json);

        self.execute(&ctx).await
    }

    /// Runs the parsed command against an already opened store.
    pub async fn execute(self, ctx: &Context) -> AppResult<String> {
        match self.command {
            Commands::Add(args) => sale::add(args, ctx).await,
            Commands::List(args) => sale::list(args, ctx).await,
            Commands::Edit(args) => sale::edit(args, ctx).await,
            Commands::Delete(args) => sale::delete(args, ctx).await,
            Commands::Customers(args) => customer::customers(args, ctx).await,
            Commands::History(args) => customer::history(args, ctx).await,
            Commands::Summary => customer::summary(ctx).await,
            Commands::Seed(args) => seed::run(args, ctx).await,
        }
    }
}

async fn open_store(config: &AppConfig, in_memory: bool) -> AppResult<Box<dyn SaleStore>> {
    if in_memory {
        info!("Using in-memory store; sales will not be saved");
        return Ok(Box::new(InMemorySaleStore::new()));
    }

    let path = config.database_path()?;
    let db = Database::new(
        DbConfig::new(path).max_connections(config.database.max_connections),
    )
    .await?;

    Ok(Box::new(db.sales()))
}

// =============================================================================
// Command Tests (in-memory store)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn context(policy: PricingPolicy, json: bool) -> Context {
        let mut config = AppConfig::default();
        config.pricing.policy = policy;
        Context::new(Box::new(InMemorySaleStore::new()), &config, json)
    }

    async fn exec(ctx: &Context, args: &[&str]) -> AppResult<String> {
        let argv = std::iter::once("wholesale").chain(args.iter().copied());
        Cli::try_parse_from(argv)
            .expect("arguments should parse")
            .execute(ctx)
            .await
    }

    async fn first_id(ctx: &Context) -> String {
        ctx.store.list().await.unwrap()[0].id.clone()
    }

    const SHIRT: &str = "name=Basic T-Shirt,sku=TSH-001,qty=10,high=0,mid=5.00,low=7.00";

    #[tokio::test]
    async fn test_add_prints_refetched_sale() {
        let ctx = context(PricingPolicy::Fallback, false);
        let out = exec(&ctx, &["add", "--customer", "Ana", "--date", "2026-03-01", "--item", SHIRT])
            .await
            .unwrap();

        assert!(out.contains("Recorded sale for Ana"));
        assert!(out.contains("$50.00"));
        assert_eq!(ctx.store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_requires_item() {
        let result = Cli::try_parse_from(["wholesale", "add", "--customer", "Ana"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_add_rejects_blank_customer() {
        let ctx = context(PricingPolicy::Fallback, false);
        let err = exec(&ctx, &["add", "--customer", " ", "--item", SHIRT]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(ctx.store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_shows_overview() {
        let ctx = context(PricingPolicy::Fallback, false);
        exec(&ctx, &["add", "-c", "Ana", "-i", SHIRT]).await.unwrap();
        exec(&ctx, &["add", "-c", "Bruno", "-i", SHIRT]).await.unwrap();
        exec(&ctx, &["add", "-c", "Ana", "-i", SHIRT]).await.unwrap();

        let out = exec(&ctx, &["list"]).await.unwrap();
        assert!(out.starts_with("2 customers, 3 sales"));
        assert!(out.contains("Bruno"));
    }

    #[tokio::test]
    async fn test_edit_then_list() {
        let ctx = context(PricingPolicy::Fallback, false);
        exec(&ctx, &["add", "-c", "Ana", "-i", SHIRT]).await.unwrap();
        let id = first_id(&ctx).await;

        let out = exec(
            &ctx,
            &["edit", &id, "--observations", "paid", "--item", "name=Cap,sku=CAP-1,qty=20,high=3.00"],
        )
        .await
        .unwrap();
        assert!(out.contains("$60.00"));

        let stored = ctx.store.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.observations, "paid");
        assert_eq!(stored.customer_name, "Ana");
        assert_eq!(stored.line_items.len(), 1);
    }

    #[tokio::test]
    async fn test_edit_without_changes_is_rejected() {
        let ctx = context(PricingPolicy::Fallback, false);
        exec(&ctx, &["add", "-c", "Ana", "-i", SHIRT]).await.unwrap();
        let id = first_id(&ctx).await;

        let err = exec(&ctx, &["edit", &id]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_edit_and_delete_accept_padded_id() {
        let ctx = context(PricingPolicy::Fallback, false);
        exec(&ctx, &["add", "-c", "Ana", "-i", SHIRT]).await.unwrap();
        let id = first_id(&ctx).await;
        let padded = format!("  {}  ", id);

        exec(&ctx, &["edit", &padded, "--observations", "paid"]).await.unwrap();
        assert_eq!(ctx.store.get(&id).await.unwrap().unwrap().observations, "paid");

        exec(&ctx, &["delete", &padded]).await.unwrap();
        assert!(ctx.store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let ctx = context(PricingPolicy::Fallback, false);
        let err = exec(&ctx, &["delete", "550e8400-e29b-41d4-a716-446655440000"])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_then_list() {
        let ctx = context(PricingPolicy::Fallback, false);
        exec(&ctx, &["add", "-c", "Ana", "-i", SHIRT]).await.unwrap();
        let id = first_id(&ctx).await;

        let out = exec(&ctx, &["delete", &id]).await.unwrap();
        assert!(out.contains("0 customers, 0 sales"));
        assert!(ctx.store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_customers_groups_exact_names() {
        let ctx = context(PricingPolicy::Fallback, true);
        exec(&ctx, &["add", "-c", "Ana", "-i", "name=A,sku=A,qty=2,low=10.00"]).await.unwrap();
        exec(&ctx, &["add", "-c", "Ana", "-i", "name=B,sku=B,qty=6,mid=5.00"]).await.unwrap();
        exec(&ctx, &["add", "-c", "ana", "-i", "name=C,sku=C,qty=1,high=1.00"]).await.unwrap();

        let out = exec(&ctx, &["customers"]).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        let groups = json.as_array().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0]["customerName"], "Ana");
        assert_eq!(groups[0]["saleCount"], 2);
        assert_eq!(groups[0]["totalAmount"], 5000);
        assert_eq!(groups[1]["customerName"], "ana");
    }

    #[tokio::test]
    async fn test_history_is_case_insensitive() {
        let ctx = context(PricingPolicy::Fallback, true);
        exec(&ctx, &["add", "-c", "Juan", "-i", SHIRT]).await.unwrap();
        exec(&ctx, &["add", "-c", "JUAN", "-i", SHIRT]).await.unwrap();
        exec(&ctx, &["add", "-c", "Juana", "-i", SHIRT]).await.unwrap();

        let out = exec(&ctx, &["history", "juan"]).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["saleCount"], 2);
        assert_eq!(json["totalUnits"], 20);
        assert_eq!(json["totalAmount"], 10000);
    }

    #[tokio::test]
    async fn test_strict_policy_in_summary() {
        let item = "name=A,sku=A,qty=1,low=7.00";

        let ctx = context(PricingPolicy::StrictBucket, true);
        exec(&ctx, &["add", "-c", "Ana", "-i", "name=A,sku=A,qty=10,low=7.00"]).await.unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&exec(&ctx, &["summary"]).await.unwrap()).unwrap();
        assert_eq!(json["totalAmount"], 0);

        let ctx = context(PricingPolicy::Fallback, true);
        exec(&ctx, &["add", "-c", "Ana", "-i", item]).await.unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&exec(&ctx, &["summary"]).await.unwrap()).unwrap();
        assert_eq!(json["totalAmount"], 700);
        assert_eq!(json["customerCount"], 1);
    }

    #[tokio::test]
    async fn test_seed_populates_store() {
        let ctx = context(PricingPolicy::Fallback, false);
        let out = exec(&ctx, &["seed", "--count", "8"]).await.unwrap();
        assert!(out.contains("8 sales"));
        assert_eq!(ctx.store.list().await.unwrap().len(), 8);
    }

    #[test]
    fn test_global_flags_override_config() {
        let cli = Cli::try_parse_from(["wholesale", "list", "--policy", "strict", "--db", "x.db"]).unwrap();
        let mut config = AppConfig::default();
        cli.global.apply_to(&mut config);
        assert_eq!(config.pricing.policy, PricingPolicy::StrictBucket);
        assert_eq!(config.database.path, Some(PathBuf::from("x.db")));
    }

    #[test]
    fn test_in_memory_conflicts_with_db() {
        assert!(Cli::try_parse_from(["wholesale", "list", "--in-memory", "--db", "x.db"]).is_err());
    }
}
