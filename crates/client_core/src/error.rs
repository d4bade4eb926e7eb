use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The backend answered with `success: false`.
    #[error("request rejected by server: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("server reported success without a company record")]
    MissingRecord,
}

impl GatewayError {
    pub fn rejected(message: Option<String>) -> Self {
        Self::Rejected { message }
    }

    /// Everything except a logical rejection is reported with the fixed
    /// fallback message rather than server text.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid server url '{0}'")]
    InvalidServerUrl(String),
}
