//! A minimal Snowflake client authenticated with an RSA key pair.
//!
//! The crate covers one linear flow: load a private key from unencrypted PEM
//! (re-encoding it to PKCS#8 DER), assemble a [`SnowflakeConfig`], open a
//! scoped [`Connection`], execute a statement, and read the result — most
//! often just its first row.
//!
//! Example usage:
//!
//! ```rust,no_run
//! use snowflake_keypair_connector::{Credential, SnowflakeConfig, SnowflakeError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), SnowflakeError> {
//!     let config = SnowflakeConfig {
//!         credential: Credential::from_pem_file("rsa_key.p8")?,
//!         account: "ACCOUNT".into(),
//!         user: "USER".into(),
//!         database: "ANALYTICS_DB".into(),
//!         schema: "PUBLIC".into(),
//!         warehouse: "REPORTING_WH".into(),
//!         role: Some("REPORTER".into()),
//!         timeout: None,
//!     };
//!
//!     let mut conn = config.connect().await?;
//!     let result = conn
//!         .execute("SELECT country, SUM(amount - tax_amount) FROM payments GROUP BY country")
//!         .await?;
//!
//!     match result.first_row() {
//!         Some(row) => println!("first row: {:?}", row.values()),
//!         None => println!("no rows"),
//!     }
//!     conn.close();
//!     Ok(())
//! }
//! ```
//!
//! The connection is released on every exit path: dropping it is equivalent
//! to calling [`Connection::close`].

mod connection;
mod credential;
mod errors;
mod jwt;
#[cfg(test)]
#[cfg(feature = "live-tests")]
mod live_tests;
mod results;
mod transport;
mod values;
mod wire;

pub use connection::Connection;
pub use credential::{Credential, RS256KeyPair};
pub use errors::{SnowflakeError, SnowflakeResult};
pub use jwt_simple;
pub use results::{ResultSet, Row};
pub use values::{ColumnKind, Value};
pub use wire::ColumnType;

use connection::StatementContext;
use transport::HttpTransport;

/// Everything needed to reach one Snowflake database.
///
/// All identifier fields are opaque here; Snowflake validates their
/// semantics. Presence is the only local requirement, enforced by
/// construction.
#[derive(Debug, Clone)]
pub struct SnowflakeConfig {
    pub credential: Credential,
    pub account: String,
    pub user: String,
    pub database: String,
    pub schema: String,
    pub warehouse: String,
    pub role: Option<String>,
    /// Server-side statement timeout. Snowflake's own default is two days;
    /// unset, this crate asks for 30 seconds and allows the client 15 more.
    pub timeout: Option<std::time::Duration>,
}

impl SnowflakeConfig {
    /// Open a scoped connection to the configured account.
    ///
    /// Fails with [`SnowflakeError::Connection`] when the service is
    /// unreachable; in that case no statement is ever submitted.
    pub async fn connect(&self) -> SnowflakeResult<Connection> {
        let transport = HttpTransport::new(self)?;
        Connection::open(Box::new(transport), StatementContext::new(self)).await
    }

    pub(crate) fn statement_timeout_seconds(&self) -> u64 {
        self.timeout.map(|t| t.as_secs()).unwrap_or(30)
    }
}
