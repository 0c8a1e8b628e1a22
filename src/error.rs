use std::fmt;

#[derive(Debug)]
pub enum DiffusionError {
    ConfigError(String),
    RequestError(String),
    TransportError(String),
    ProviderError(String),
    ParseError(String),
    NoImageError(String),
    Cancelled,
}

impl fmt::Display for DiffusionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffusionError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            DiffusionError::RequestError(msg) => write!(f, "Request error: {}", msg),
            DiffusionError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            DiffusionError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            DiffusionError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DiffusionError::NoImageError(msg) => write!(f, "No image in response: {}", msg),
            DiffusionError::Cancelled => write!(f, "Generation cancelled"),
        }
    }
}

impl std::error::Error for DiffusionError {}

pub type Result<T> = std::result::Result<T, DiffusionError>;
