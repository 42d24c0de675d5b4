//! HTTP service over the employee store: paged reads, record creation, and
//! two competing search strategies, all instrumented with execution-time
//! metrics.
//!
//! The expected `employees` table mirrors the generated dataset: `id BIGINT
//! PRIMARY KEY`, `firstname`/`lastname`/`hostel_room`/`ssn`/`department`/
//! `designation` as text, `dob DATE`, `salary INTEGER`, `years_of_service
//! INTEGER`, with `LOWER(col)` expression indexes backing the index-assisted
//! search. Schema management belongs to the loader, not this service.

mod args;
mod employees;
mod error;
mod executor;
mod pool;
mod rows;
mod search;

pub use args::{ListingProfile, ServeArgs, StoreOpts};
pub use employees::PAGE_SIZE;
pub use error::ServerError;
pub use executor::{execute, QueryMetrics, QueryOutcome, UNINDEXED_BASELINE};
pub use pool::{build_pool, DB_PORT};

use axum::routing::get;
use axum::Router;
use deadpool_postgres::Pool;

/// Shared per-request state. The pool is the only cross-request mutable
/// state in the service.
#[derive(Clone)]
pub struct AppState {
    pub pool: Pool,
    pub profile: ListingProfile,
}

/// Build the API router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/employees",
            get(employees::list).post(employees::create),
        )
        .route("/api/search/unoptimized", get(search::unoptimized))
        .route("/api/search/optimized", get(search::optimized))
        .with_state(state)
}

/// Bind and serve until interrupted, then close the pool.
pub async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let pool = build_pool(&args.store)?;
    let state = AppState {
        pool: pool.clone(),
        profile: args.profile,
    };
    let port = args.listen_port();

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(
        "Serving employee API on http://0.0.0.0:{} ({} profile)",
        port,
        args.profile.as_str()
    );
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close();
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
