use tagflow_core::CoreError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("mqtt client error: {0}")]
    Client(#[from] rumqttc::ClientError),

    #[error("mqtt connection error: {0}")]
    Connection(#[from] rumqttc::ConnectionError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(CoreError::Config(_)) => 2,
            Self::Core(CoreError::Io { .. } | CoreError::Csv(_)) => 10,
            Self::Core(_) => 3,
            Self::Serialization(_) => 4,
            Self::Client(_) | Self::Connection(_) => 6,
            Self::Io(_) => 10,
        }
    }
}
