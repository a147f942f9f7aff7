/// Health check endpoint
///
/// Reports whether the server can reach its database, how busy the pool is
/// and whether the schema migrations have been applied.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "pool": { "active": 0, "idle": 1, "total": 1 },
///   "migrations": { "applied": 2, "up_to_date": true }
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use itembook_shared::db::{migrations, pool};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// Application version
    pub version: String,

    /// `connected` or `disconnected`
    pub database: String,

    pub pool: PoolHealth,

    /// Absent when the migration table cannot be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrations: Option<MigrationHealth>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PoolHealth {
    pub active: usize,
    pub idle: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MigrationHealth {
    pub applied: usize,
    pub up_to_date: bool,
}

/// Health check handler
///
/// Always answers 200; a failing database shows up as `degraded`.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let connected = pool::health_check(&state.db).await.is_ok();

    let migrations = match migrations::get_migration_status(&state.db).await {
        Ok(status) => Some(MigrationHealth {
            applied: status.applied_migrations,
            up_to_date: status.is_up_to_date,
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read migration status");
            None
        }
    };

    let stats = pool::get_pool_stats(&state.db);
    let healthy = connected && migrations.as_ref().is_some_and(|m| m.up_to_date);

    Ok(Json(HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        pool: PoolHealth {
            active: stats.active_connections,
            idle: stats.idle_connections,
            total: stats.total_connections,
        },
        migrations,
    }))
}
