use std::{fmt, io};

/// Crate-wide `Result` type using [`UndersoundsError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, UndersoundsError>;

/// Top-level error type for undersounds operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum UndersoundsError {
    /// Configuration errors.
    Config(ConfigError),

    /// Connection-related errors.
    Connection(ConnectionError),

    /// Collection selection errors.
    Selection(SelectionError),

    /// Export pipeline errors.
    Export(ExportError),

    /// Catalog HTTP client errors.
    Client(ClientError),

    /// I/O errors.
    Io(io::Error),

    /// MongoDB driver errors.
    MongoDb(mongodb::error::Error),

    /// HTTP transport errors.
    Http(reqwest::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    MissingEnv(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Failed to establish a connection.
    ConnectionFailed(String),

    /// Invalid connection URI.
    InvalidUri(String),

    /// Not currently connected to MongoDB.
    NotConnected,
}

/// Selection-specific errors.
#[derive(Debug)]
pub enum SelectionError {
    /// The database holds no collections with data.
    NoCollections,

    /// Reading from standard input failed.
    InputFailed(String),
}

/// Export-pipeline errors.
#[derive(Debug)]
pub enum ExportError {
    /// The external export utility could not be started.
    UtilityUnavailable(String),

    /// The external export utility reported a failure.
    UtilityFailed { collection: String, detail: String },

    /// Reading, assembling or writing an artifact failed.
    ArtifactFailed { collection: String, detail: String },
}

/// Catalog HTTP client errors.
#[derive(Debug)]
pub enum ClientError {
    /// Server responded with a non-success status.
    UnexpectedStatus { status: u16, url: String },

    /// Server reported an application-level error.
    Api(String),

    /// Response body did not have the expected shape.
    UnexpectedShape(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for UndersoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndersoundsError::Config(e) => write!(f, "Configuration error: {e}"),
            UndersoundsError::Connection(e) => write!(f, "Connection error: {e}"),
            UndersoundsError::Selection(e) => write!(f, "Selection error: {e}"),
            UndersoundsError::Export(e) => write!(f, "Export error: {e}"),
            UndersoundsError::Client(e) => write!(f, "Client error: {e}"),
            UndersoundsError::Io(e) => write!(f, "I/O error: {e}"),
            UndersoundsError::MongoDb(e) => write!(f, "MongoDB error: {e}"),
            UndersoundsError::Http(e) => write!(f, "HTTP error: {e}"),
            UndersoundsError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingEnv(var) => {
                write!(f, "Environment variable {var} is not set")
            }
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectionFailed(msg) => write!(f, "Failed to connect: {msg}"),
            ConnectionError::InvalidUri(uri) => write!(f, "Invalid connection URI: {uri}"),
            ConnectionError::NotConnected => write!(f, "Not connected to MongoDB"),
        }
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NoCollections => {
                write!(f, "No collections with data were found in the database")
            }
            SelectionError::InputFailed(msg) => write!(f, "Failed to read input: {msg}"),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::UtilityUnavailable(msg) => {
                write!(f, "Could not start mongoexport: {msg}")
            }
            ExportError::UtilityFailed { collection, detail } => {
                write!(f, "mongoexport failed for collection '{collection}': {detail}")
            }
            ExportError::ArtifactFailed { collection, detail } => {
                write!(f, "Failed to build artifact for collection '{collection}': {detail}")
            }
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::UnexpectedStatus { status, url } => {
                write!(f, "Unexpected HTTP status {status} from {url}")
            }
            ClientError::Api(msg) => write!(f, "Server error: {msg}"),
            ClientError::UnexpectedShape(msg) => {
                write!(f, "Unexpected response shape: {msg}")
            }
        }
    }
}

impl std::error::Error for UndersoundsError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for ConnectionError {}
impl std::error::Error for SelectionError {}
impl std::error::Error for ExportError {}
impl std::error::Error for ClientError {}

/* ========================= Conversions to UndersoundsError ========================= */

impl From<io::Error> for UndersoundsError {
    fn from(err: io::Error) -> Self {
        UndersoundsError::Io(err)
    }
}

impl From<mongodb::error::Error> for UndersoundsError {
    fn from(err: mongodb::error::Error) -> Self {
        UndersoundsError::MongoDb(err)
    }
}

impl From<reqwest::Error> for UndersoundsError {
    fn from(err: reqwest::Error) -> Self {
        UndersoundsError::Http(err)
    }
}

impl From<ConfigError> for UndersoundsError {
    fn from(err: ConfigError) -> Self {
        UndersoundsError::Config(err)
    }
}

impl From<ConnectionError> for UndersoundsError {
    fn from(err: ConnectionError) -> Self {
        UndersoundsError::Connection(err)
    }
}

impl From<SelectionError> for UndersoundsError {
    fn from(err: SelectionError) -> Self {
        UndersoundsError::Selection(err)
    }
}

impl From<ExportError> for UndersoundsError {
    fn from(err: ExportError) -> Self {
        UndersoundsError::Export(err)
    }
}

impl From<ClientError> for UndersoundsError {
    fn from(err: ClientError) -> Self {
        UndersoundsError::Client(err)
    }
}

impl From<String> for UndersoundsError {
    fn from(msg: String) -> Self {
        UndersoundsError::Generic(msg)
    }
}

impl From<&str> for UndersoundsError {
    fn from(msg: &str) -> Self {
        UndersoundsError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_config_error() {
        let err = UndersoundsError::from(ConfigError::MissingEnv("MONGO_URI".into()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Environment variable MONGO_URI is not set"
        );
    }

    #[test]
    fn test_display_export_error() {
        let err = ExportError::UtilityFailed {
            collection: "albums".into(),
            detail: "exit status 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "mongoexport failed for collection 'albums': exit status 1"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: UndersoundsError = io_err.into();
        assert!(matches!(err, UndersoundsError::Io(_)));
    }
}
