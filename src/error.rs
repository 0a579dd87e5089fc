use std::path::PathBuf;

/// Problems with an inbound frame or one of its fields.
///
/// None of these are fatal: the session logs them and skips the offending
/// field, applying whatever else the frame carried.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid message format: {0}")]
    InvalidFrame(#[from] serde_json::Error),

    #[error("unknown event: {0}")]
    UnknownEvent(String),

    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("invalid piece on {square}: {reason}")]
    InvalidPiece { square: String, reason: String },

    #[error("unrecognised board string: {reason}")]
    BoardString { reason: String },

    #[error("malformed field {field}: {reason}")]
    MalformedField { field: &'static str, reason: String },
}

/// Failures pushing an outbound frame onto the channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("channel closed")]
    Closed,

    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
