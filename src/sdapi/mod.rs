pub mod cancel;
pub mod image_client;
pub mod transport;

use crate::{config::DiffusionConfig, error::Result};
use std::sync::Arc;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use image_client::ImageClient;
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};

#[derive(Clone)]
pub struct SdApiClient {
    image_client: ImageClient,
}

impl SdApiClient {
    pub fn new(config: DiffusionConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(Self {
            image_client: ImageClient::new(transport, config),
        })
    }

    /// Client backed by a custom transport, mainly for tests and proxies.
    pub fn with_transport(config: DiffusionConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            image_client: ImageClient::new(transport, config),
        }
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
