use crate::errors::SnowflakeResult;
use crate::results::ResultSet;
use crate::transport::Transport;
use crate::wire::WireStatement;
use crate::SnowflakeConfig;

/// Context sent alongside every statement, normalized once at connect time.
///
/// Snowflake resolves unquoted identifiers in upper case, so the identifiers
/// are upper-cased here the way an interactive session would.
#[derive(Debug, Clone)]
pub(crate) struct StatementContext {
    database: String,
    schema: String,
    warehouse: String,
    role: Option<String>,
    timeout_seconds: u64,
}

impl StatementContext {
    pub fn new(config: &SnowflakeConfig) -> StatementContext {
        StatementContext {
            database: config.database.to_ascii_uppercase(),
            schema: config.schema.to_ascii_uppercase(),
            warehouse: config.warehouse.to_ascii_uppercase(),
            role: config.role.as_ref().map(|role| role.to_ascii_uppercase()),
            timeout_seconds: config.statement_timeout_seconds(),
        }
    }

    fn statement(&self, sql: &str) -> WireStatement {
        WireStatement {
            statement: sql.to_owned(),
            timeout: Some(self.timeout_seconds),
            database: self.database.clone(),
            schema: self.schema.clone(),
            warehouse: self.warehouse.clone(),
            role: self.role.clone(),
        }
    }
}

/// A scoped connection to Snowflake.
///
/// Obtained from [`SnowflakeConfig::connect`]. The connection is released
/// exactly once on every exit path: explicitly through [`Connection::close`],
/// or on drop if the scope unwinds first.
#[derive(Debug)]
pub struct Connection {
    transport: Box<dyn Transport>,
    context: StatementContext,
    released: bool,
}

impl Connection {
    pub(crate) async fn open(
        transport: Box<dyn Transport>,
        context: StatementContext,
    ) -> SnowflakeResult<Connection> {
        transport.open().await?;
        Ok(Connection {
            transport,
            context,
            released: false,
        })
    }

    /// Execute one literal SQL statement and decode its result set.
    ///
    /// Single attempt, no retries. `&mut self` keeps one statement in
    /// flight at a time.
    pub async fn execute(&mut self, sql: &str) -> SnowflakeResult<ResultSet> {
        let statement = self.context.statement(sql);
        let response = self.transport.execute(&statement).await?;
        ResultSet::from_wire(response)
    }

    /// Release the connection now instead of at end of scope.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.transport.close();
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.release();
    }
}
