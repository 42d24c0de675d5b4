//! CLI argument definitions for the serve command.

use clap::{Args, ValueEnum};

/// PostgreSQL connection settings. The store's port is fixed at 5432.
#[derive(Args, Clone, Debug)]
pub struct StoreOpts {
    /// Database host
    #[arg(long, default_value = "db", env = "DB_HOST")]
    pub db_host: String,

    /// Database user
    #[arg(long, default_value = "postgres", env = "DB_USER")]
    pub db_user: String,

    /// Database password
    #[arg(long, default_value = "password123", env = "DB_PASS")]
    pub db_password: String,

    /// Database name
    #[arg(long, default_value = "bigdata_db", env = "DB_NAME")]
    pub db_name: String,

    /// Connection pool size
    #[arg(long, default_value = "16")]
    pub pool_size: usize,
}

/// Direction GET /api/employees walks the id ordering.
///
/// The two profiles are separate deployments with different default ports;
/// clients must not assume one or the other.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingProfile {
    /// ORDER BY id DESC, default port 3500
    NewestFirst,
    /// ORDER BY id ASC, default port 3000
    OldestFirst,
}

impl ListingProfile {
    pub fn order_sql(&self) -> &'static str {
        match self {
            ListingProfile::NewestFirst => "DESC",
            ListingProfile::OldestFirst => "ASC",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            ListingProfile::NewestFirst => 3500,
            ListingProfile::OldestFirst => 3000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingProfile::NewestFirst => "newest-first",
            ListingProfile::OldestFirst => "oldest-first",
        }
    }
}

/// Arguments for serving the employee API.
#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub store: StoreOpts,

    /// Listen port (defaults to the profile's port)
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Listing profile for GET /api/employees
    #[arg(long, value_enum, default_value = "newest-first")]
    pub profile: ListingProfile,
}

impl ServeArgs {
    pub fn listen_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.profile.default_port())
    }
}
