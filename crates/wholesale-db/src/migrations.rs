//! Schema migrations, embedded at compile time from `migrations/sqlite/`.
//!
//! | File                     | Creates                                   |
//! |--------------------------|-------------------------------------------|
//! | `001_initial_schema.sql` | `sales`, `sale_line_items`, lookup indexes |
//!
//! Applied migrations are recorded in `_sqlx_migrations`; a file that has
//! been applied anywhere must not be edited afterwards. Add `002_*.sql`
//! instead.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations. Safe to call repeatedly.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    info!(embedded = MIGRATOR.migrations.len(), "Schema up to date");
    Ok(())
}

/// Returns `(embedded, applied)` migration counts.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;

    Ok((total, usize::try_from(applied).unwrap_or(0)))
}
