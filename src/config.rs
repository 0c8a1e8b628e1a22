use std::env;

pub const DEFAULT_BASE_URL: &str = "https://stablediffusionapi.com/api/v3";
pub const DEFAULT_MODEL_ID: &str = "midjourney";
pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 512;
pub const DEFAULT_SAMPLES: u32 = 1;
pub const DEFAULT_POLL_ATTEMPTS: u32 = 6;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct DiffusionConfig {
    pub api_key: Option<String>,
    pub api_key_header: Option<String>,
    pub base_url: Option<String>,
    pub text2img_url: Option<String>,
    pub img2img_url: Option<String>,
    pub model_id: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub samples: Option<u32>,
    pub poll_attempts: Option<u32>,
    pub poll_interval_ms: Option<u64>,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        DiffusionConfig {
            api_key: None,
            api_key_header: None,
            base_url: None,
            text2img_url: None,
            img2img_url: None,
            model_id: None,
            width: None,
            height: None,
            samples: None,
            poll_attempts: None,
            poll_interval_ms: None,
        }
    }
}

impl DiffusionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("SDAPI_KEY").ok();
        let api_key_header = env::var("SDAPI_KEY_HEADER").ok();
        let base_url = env::var("SDAPI_BASE_URL").ok();
        let text2img_url = env::var("SDAPI_TEXT2IMG_URL").ok();
        let img2img_url = env::var("SDAPI_IMG2IMG_URL").ok();
        let model_id = env::var("SDAPI_MODEL_ID").ok();
        let width = env::var("SDAPI_WIDTH").ok().and_then(|s| s.parse().ok());
        let height = env::var("SDAPI_HEIGHT").ok().and_then(|s| s.parse().ok());
        let samples = env::var("SDAPI_SAMPLES").ok().and_then(|s| s.parse().ok());
        let poll_attempts = env::var("SDAPI_POLL_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse().ok());
        let poll_interval_ms = env::var("SDAPI_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok());

        DiffusionConfig {
            api_key,
            api_key_header,
            base_url,
            text2img_url,
            img2img_url,
            model_id,
            width,
            height,
            samples,
            poll_attempts,
            poll_interval_ms,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_key_header(mut self, header: impl Into<String>) -> Self {
        self.api_key_header = Some(header.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_text2img_url(mut self, url: impl Into<String>) -> Self {
        self.text2img_url = Some(url.into());
        self
    }

    pub fn with_img2img_url(mut self, url: impl Into<String>) -> Self {
        self.img2img_url = Some(url.into());
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = Some(samples);
        self
    }

    pub fn with_poll_budget(mut self, attempts: u32, interval_ms: u64) -> Self {
        self.poll_attempts = Some(attempts);
        self.poll_interval_ms = Some(interval_ms);
        self
    }

    /// Resolved text-to-image endpoint. An explicit override wins over the
    /// base URL joined with the provider's conventional path.
    pub fn text2img_endpoint(&self) -> String {
        match &self.text2img_url {
            Some(url) => url.clone(),
            None => format!("{}/text2img", self.base()),
        }
    }

    /// Resolved image-to-image endpoint.
    pub fn img2img_endpoint(&self) -> String {
        match &self.img2img_url {
            Some(url) => url.clone(),
            None => format!("{}/img2img", self.base()),
        }
    }

    fn base(&self) -> &str {
        self.base_url
            .as_deref()
            .map(|b| b.trim_end_matches('/'))
            .unwrap_or(DEFAULT_BASE_URL)
    }
}
