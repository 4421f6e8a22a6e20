use futures::future::BoxFuture;

use crate::errors::{SnowflakeError, SnowflakeResult};
use crate::wire::{WireQueryResponse, WireResult, WireStatement};
use crate::{jwt, SnowflakeConfig};

/// The seam between a [`Connection`](crate::Connection) and the network.
///
/// Object-safe on purpose: tests substitute a double to observe opens,
/// statement submissions, and releases.
pub(crate) trait Transport: std::fmt::Debug + Send + Sync {
    /// Probe the service before first use.
    fn open(&self) -> BoxFuture<'_, SnowflakeResult<()>>;

    /// Submit one statement body and return the decoded response.
    fn execute<'a>(
        &'a self,
        statement: &'a WireStatement,
    ) -> BoxFuture<'a, SnowflakeResult<WireQueryResponse>>;

    /// Release underlying resources. Called exactly once per connection.
    fn close(&mut self);
}

/// Production transport: the SQL API v2 over HTTPS with a key-pair JWT.
#[derive(Debug)]
pub(crate) struct HttpTransport {
    host: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the authenticated client for one connection.
    ///
    /// The token is minted here, once; it comfortably outlives the
    /// single-statement lifetime of a connection.
    pub fn new(config: &SnowflakeConfig) -> SnowflakeResult<HttpTransport> {
        use reqwest::header::*;
        let token = jwt::authorization_token(
            &config.credential,
            &config.account.to_ascii_uppercase(),
            &config.user.to_ascii_uppercase(),
        )?;

        let mut headers = HeaderMap::with_capacity(5);
        headers.append(CONTENT_TYPE, "application/json".parse()?);
        headers.append(AUTHORIZATION, format!("Bearer {token}").parse()?);
        headers.append(
            "X-Snowflake-Authorization-Token-Type",
            "KEYPAIR_JWT".parse()?,
        );
        headers.append(ACCEPT, "application/json".parse()?);
        headers.append(
            USER_AGENT,
            concat!(env!("CARGO_PKG_NAME"), '/', env!("CARGO_PKG_VERSION")).parse()?,
        );

        let statement_timeout = config.statement_timeout_seconds();
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(statement_timeout + 15))
            .build()?;
        Ok(HttpTransport {
            host: format!(
                "https://{}.snowflakecomputing.com",
                config.account.to_ascii_lowercase(),
            ),
            client,
        })
    }
}

impl Transport for HttpTransport {
    fn open(&self) -> BoxFuture<'_, SnowflakeResult<()>> {
        Box::pin(async move {
            // Any HTTP response proves the service is reachable; the status
            // itself does not matter. Authentication is judged per statement.
            self.client
                .get(&self.host)
                .send()
                .await
                .map_err(|e| SnowflakeError::Connection(e.to_string()))?;
            log::debug!("connected to {}", self.host);
            Ok(())
        })
    }

    fn execute<'a>(
        &'a self,
        statement: &'a WireStatement,
    ) -> BoxFuture<'a, SnowflakeResult<WireQueryResponse>> {
        Box::pin(async move {
            let request_id = uuid::Uuid::new_v4();
            log::debug!("submitting statement {request_id}: {}", statement.statement);
            self.client
                .post(format!(
                    "{}/api/v2/statements?nullable=true&requestId={}",
                    self.host, request_id
                ))
                .json(statement)
                .send()
                .await?
                .json::<WireResult<WireQueryResponse>>()
                .await?
                .into_result()
        })
    }

    fn close(&mut self) {
        log::debug!("closing connection to {}", self.host);
    }
}
