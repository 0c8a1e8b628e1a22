use crate::{
    config::{
        DiffusionConfig, DEFAULT_HEIGHT, DEFAULT_MODEL_ID, DEFAULT_POLL_ATTEMPTS,
        DEFAULT_POLL_INTERVAL_MS, DEFAULT_SAMPLES, DEFAULT_WIDTH,
    },
    error::{DiffusionError, Result},
    models::{
        normalize_image_ref, ImageGenerationRequest, ImageGenerationResponse, ProviderResponse,
    },
    prompt,
    sdapi::cancel::CancelToken,
    sdapi::transport::HttpTransport,
};
use rand::Rng;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub const INFERENCE_STEPS: u32 = 20;
const SEED_SPAN: u64 = 10_000_000;
const SNIPPET_LEN: usize = 400;

#[derive(Clone)]
pub struct ImageClient {
    transport: Arc<dyn HttpTransport>,
    config: DiffusionConfig,
}

impl ImageClient {
    pub fn new(transport: Arc<dyn HttpTransport>, config: DiffusionConfig) -> Self {
        Self { transport, config }
    }

    pub fn supported_models() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("midjourney", "Midjourney Diffusion", "community"),
            ("sdxl", "Stable Diffusion XL", "stability"),
            ("anything-v5", "Anything V5", "community"),
            ("realistic-vision-v51", "Realistic Vision V5.1", "community"),
        ]
    }

    pub async fn generate(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse> {
        self.generate_with_cancel(request, &CancelToken::never())
            .await
    }

    /// One generation: a single POST to the text2img or img2img endpoint,
    /// followed by a bounded polling sequence when the provider answers with
    /// a processing status and a fetch-result URL.
    pub async fn generate_with_cancel(
        &self,
        request: ImageGenerationRequest,
        token: &CancelToken,
    ) -> Result<ImageGenerationResponse> {
        if token.is_cancelled() {
            return Err(DiffusionError::Cancelled);
        }

        let parts = prompt::build_prompt(
            request.atom,
            &request.subject,
            request.wavelength,
            request.amplitude,
        );
        let seed = rand::thread_rng().gen_range(0..SEED_SPAN);
        let model_id = request
            .model_id
            .as_deref()
            .or(self.config.model_id.as_deref())
            .unwrap_or(DEFAULT_MODEL_ID)
            .to_string();

        let mut payload = json!({
            "model_id": model_id,
            "prompt": parts.prompt,
            "negative_prompt": parts.negative_prompt,
            "width": request.width.or(self.config.width).unwrap_or(DEFAULT_WIDTH),
            "height": request.height.or(self.config.height).unwrap_or(DEFAULT_HEIGHT),
            "num_inference_steps": INFERENCE_STEPS,
            "samples": self.config.samples.unwrap_or(DEFAULT_SAMPLES),
            "seed": seed,
            "key": self.config.api_key.clone().unwrap_or_default(),
        });

        let endpoint = match &request.init_image {
            Some(init) => {
                payload["init_image"] = json!([normalize_image_ref(init)]);
                self.config.img2img_endpoint()
            }
            None => self.config.text2img_endpoint(),
        };

        log::info!("Generating image with model: {}", model_id);
        log::debug!("Prompt: {}", parts.prompt);

        let response = self
            .transport
            .post_json(&endpoint, &self.request_headers(), &payload)
            .await?;
        if !response.is_success() {
            return Err(DiffusionError::TransportError(format!(
                "generation request failed with HTTP {}: {}",
                response.status, response.body
            )));
        }

        let value: Value = serde_json::from_str(&response.body).map_err(|_| {
            DiffusionError::ParseError(format!(
                "invalid JSON in generation response: {}",
                snippet(&response.body)
            ))
        })?;

        let parsed = ProviderResponse::from_value(&value);
        if let ProviderResponse::Error { message, detail } = &parsed {
            return Err(provider_error(message, detail.as_deref()));
        }

        let image = match parsed.image_ref() {
            Some(reference) => reference.to_string(),
            None => match &parsed {
                ProviderResponse::Processing {
                    fetch_url: Some(url),
                    request_id,
                } => {
                    log::info!("Generation queued, polling {}", url);
                    self.poll_for_result(url, request_id.as_ref(), token)
                        .await?
                }
                _ => return Err(DiffusionError::NoImageError(snippet(&response.body))),
            },
        };

        Ok(ImageGenerationResponse {
            image: normalize_image_ref(&image),
            model: model_id,
        })
    }

    /// Bounded poll against the fetch-result URL. Attempts run strictly in
    /// sequence with a fixed delay; a terminal status without an image stops
    /// the loop early instead of burning the remaining budget.
    async fn poll_for_result(
        &self,
        fetch_url: &str,
        request_id: Option<&Value>,
        token: &CancelToken,
    ) -> Result<String> {
        let attempts = self.config.poll_attempts.unwrap_or(DEFAULT_POLL_ATTEMPTS);
        let interval = Duration::from_millis(
            self.config
                .poll_interval_ms
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        );
        let url = self.poll_url(fetch_url);
        let headers = self.request_headers();

        let mut body = json!({});
        if let Some(key) = &self.config.api_key {
            body["key"] = json!(key);
        }
        if let Some(id) = request_id {
            body["request_id"] = id.clone();
        }

        let mut last_body = String::new();
        for attempt in 1..=attempts {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = token.cancelled() => return Err(DiffusionError::Cancelled),
            }

            log::debug!("Polling for result, attempt {}/{}", attempt, attempts);
            let response = self.transport.post_json(&url, &headers, &body).await?;
            if !response.is_success() {
                return Err(DiffusionError::TransportError(format!(
                    "poll request failed with HTTP {}: {}",
                    response.status, response.body
                )));
            }

            let value: Value = serde_json::from_str(&response.body).map_err(|_| {
                DiffusionError::ParseError(format!(
                    "invalid JSON in poll response: {}",
                    response.body
                ))
            })?;
            last_body = response.body;

            let parsed = ProviderResponse::from_value(&value);
            if let ProviderResponse::Error { message, detail } = &parsed {
                return Err(provider_error(message, detail.as_deref()));
            }
            if let Some(reference) = parsed.image_ref() {
                log::info!("Image ready after {} poll attempt(s)", attempt);
                return Ok(reference.to_string());
            }
            if !parsed.is_processing() {
                // Terminal status without an image; more polling cannot help.
                break;
            }
        }

        Err(DiffusionError::NoImageError(snippet(&last_body)))
    }

    /// Fetch the bytes behind a generated image URL.
    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("Downloading generated image from {}", url);
        self.transport.get_bytes(url).await
    }

    fn request_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if let Some((name, value)) = self.credential_header() {
            headers.push((name, value));
        }
        headers
    }

    /// Credential header, sent only when both a header name and a key are
    /// configured. An `Authorization` header name (any casing) gets the
    /// conventional Bearer prefix.
    fn credential_header(&self) -> Option<(String, String)> {
        let name = self.config.api_key_header.as_deref()?.trim();
        if name.is_empty() {
            return None;
        }
        let key = self.config.api_key.as_deref()?;
        let value = if name.eq_ignore_ascii_case("authorization") {
            format!("Bearer {}", key)
        } else {
            key.to_string()
        };
        Some((name.to_string(), value))
    }

    fn poll_url(&self, fetch_url: &str) -> String {
        match self.config.api_key.as_deref() {
            Some(key) if !fetch_url.contains("key=") => {
                let separator = if fetch_url.contains('?') { '&' } else { '?' };
                format!("{}{}key={}", fetch_url, separator, key)
            }
            _ => fetch_url.to_string(),
        }
    }
}

fn provider_error(message: &str, detail: Option<&str>) -> DiffusionError {
    match detail {
        Some(detail) => DiffusionError::ProviderError(format!("{} ({})", message, detail)),
        None => DiffusionError::ProviderError(message.to_string()),
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_LEN).collect()
}
