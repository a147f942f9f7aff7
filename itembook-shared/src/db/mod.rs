/// Database layer for Itembook
///
/// This module provides SQLite connection pooling and schema migrations.
///
/// # Modules
///
/// - `pool`: Connection pool management with health checks
/// - `migrations`: Embedded migration runner, applied once at startup
/// - Models are in the `models` module at crate root level
///
/// # Example
///
/// ```no_run
/// use itembook_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: "sqlite://itembook.db".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
