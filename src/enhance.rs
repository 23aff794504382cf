//! Optional remote enhancement of the input image.
//!
//! The remote service is an external collaborator behind the
//! [`EnhancementProvider`] trait: the dispatcher offers it the raw encoded
//! input and uses whatever comes back, falling through to the local filters
//! on `None` or on any error. The default provider is [`Unavailable`]; the
//! HTTP-backed [`HfEnhancer`] is only constructed when a credential is
//! configured. No failure on this path is ever fatal and nothing is retried.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::pipeline::Mode;

const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/Gustavosta/MagicPrompt-Stable-Diffusion";

const PENCIL_PROMPT: &str = "Convert this image to a detailed pencil sketch with clear lines";
const ART_PROMPT: &str =
    "Transform this image into an artistic pencil drawing with shading and texture";

/// Soft failures of the remote path; recovered by the dispatcher.
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("enhancement request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("enhancement service returned status {0}")]
    Status(u16),
}

/// A collaborator that may return an enhanced, encoded rendition of the
/// input image.
///
/// `Ok(None)` means the provider declined (disabled, unavailable); an error
/// means it tried and failed. Callers treat both the same way.
pub trait EnhancementProvider {
    fn enhance(&self, image: &[u8], mode: Mode) -> Result<Option<Vec<u8>>, EnhanceError>;
}

/// Default provider: remote enhancement is switched off.
pub struct Unavailable;

impl EnhancementProvider for Unavailable {
    fn enhance(&self, _image: &[u8], _mode: Mode) -> Result<Option<Vec<u8>>, EnhanceError> {
        Ok(None)
    }
}

#[derive(Serialize)]
struct EnhanceRequest<'a> {
    inputs: EnhanceInputs<'a>,
}

#[derive(Serialize)]
struct EnhanceInputs<'a> {
    image: String,
    prompt: &'a str,
}

/// Hugging Face inference provider.
///
/// Sends the base64-encoded input with a per-mode prompt and a bearer
/// token; the response body is expected to be an encoded image.
pub struct HfEnhancer {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: String,
}

impl HfEnhancer {
    pub fn new(token: String, timeout: Duration) -> Result<Self, EnhanceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(HfEnhancer {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token,
        })
    }

    /// Override the service endpoint (used by tests and self-hosted setups).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl EnhancementProvider for HfEnhancer {
    fn enhance(&self, image: &[u8], mode: Mode) -> Result<Option<Vec<u8>>, EnhanceError> {
        let prompt = match mode {
            Mode::Pencil => PENCIL_PROMPT,
            Mode::Art => ART_PROMPT,
        };
        let request = EnhanceRequest {
            inputs: EnhanceInputs {
                image: BASE64.encode(image),
                prompt,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnhanceError::Status(status.as_u16()));
        }

        let bytes = response.bytes()?;
        Ok(Some(bytes.to_vec()))
    }
}

/// Build the provider implied by the configuration: HTTP-backed when a
/// credential is present, otherwise disabled.
pub fn provider_from_config(config: &Config) -> Box<dyn EnhancementProvider> {
    match &config.api_token {
        Some(token) => match HfEnhancer::new(token.clone(), config.remote_timeout) {
            Ok(enhancer) => Box::new(enhancer),
            Err(err) => {
                log::warn!("remote enhancement unavailable: {err}");
                Box::new(Unavailable)
            }
        },
        None => {
            log::debug!("no API token configured, remote enhancement disabled");
            Box::new(Unavailable)
        }
    }
}
