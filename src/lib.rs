pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod sdapi;

pub use config::DiffusionConfig;
pub use error::{DiffusionError, Result};
pub use models::{
    AtomKind, ImageGenerationRequest, ImageGenerationResponse, ProviderResponse,
};
pub use prompt::{build_prompt, PromptParts};
pub use sdapi::{cancel_pair, CancelHandle, CancelToken, ImageClient, SdApiClient};
