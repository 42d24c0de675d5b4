//! Process-wide PostgreSQL connection pool.

use crate::args::StoreOpts;
use deadpool_postgres::{BuildError, Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;

/// The store's fixed listening port.
pub const DB_PORT: u16 = 5432;

/// Build the shared pool.
///
/// Connections are established lazily on first checkout. Every checkout is
/// scoped: the guard returns its connection to the pool when dropped, on
/// every exit path.
pub fn build_pool(opts: &StoreOpts) -> Result<Pool, BuildError> {
    let mut config = tokio_postgres::Config::new();
    config
        .host(&opts.db_host)
        .port(DB_PORT)
        .user(&opts.db_user)
        .password(&opts.db_password)
        .dbname(&opts.db_name);

    let manager = Manager::from_config(
        config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );

    Pool::builder(manager)
        .max_size(opts.pool_size)
        .runtime(Runtime::Tokio1)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> StoreOpts {
        StoreOpts {
            db_host: "localhost".to_string(),
            db_user: "postgres".to_string(),
            db_password: "postgres".to_string(),
            db_name: "bigdata_db".to_string(),
            pool_size: 4,
        }
    }

    #[test]
    fn test_pool_builds_without_connecting() {
        let pool = build_pool(&opts()).unwrap();
        assert_eq!(pool.status().size, 0);
        assert_eq!(pool.status().max_size, 4);
    }
}
