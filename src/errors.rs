#[derive(thiserror::Error, Debug)]
pub enum SnowflakeError {
    /// Key file missing, unreadable, malformed, or encrypted.
    #[error("credential error: {0}")]
    Credential(String),
    /// The parsed key could not be serialized to PKCS#8 DER.
    #[error("credential encoding error: {0}")]
    Encoding(String),
    /// The service host could not be reached when opening the connection.
    #[error("connection error: {0}")]
    Connection(String),
    /// The statement was rejected by the service.
    #[error("Snowflake server error: {code}: {message}")]
    Query { code: String, message: String },
    #[error(transparent)]
    Token(#[from] jwt_simple::Error),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("unsupported result type: {0}")]
    Unsupported(&'static str),
    /// A result cell did not parse as its declared column type.
    #[error("malformed result cell: {0}")]
    Malformed(String),
    #[error(transparent)]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
}

pub type SnowflakeResult<T> = Result<T, SnowflakeError>;
