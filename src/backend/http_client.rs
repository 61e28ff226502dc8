use super::traits::GenerationService;
use crate::{
    config::{AppConfig, EndpointConfig},
    error::{Result, RsketchError},
    models::{BackendImageResponse, GenerationRequest, GenerationResponse, HealthStatus},
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::time::{Duration, Instant};

#[derive(Deserialize)]
struct TunnelUrlResponse {
    ngrok_url: Option<String>,
}

#[derive(Deserialize)]
struct TestResponse {
    message: Option<String>,
}

/// `reqwest`-backed client for the tunnelled backend.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: EndpointConfig,
    request_timeout: Duration,
    probe_timeout: Duration,
}

impl HttpBackend {
    pub fn new(endpoint: EndpointConfig, config: &AppConfig) -> Result<Self> {
        endpoint.ensure_present()?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RsketchError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            request_timeout: config.request_timeout(),
            probe_timeout: config.probe_timeout(),
        })
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }
}

pub(crate) fn decode_image_response(body: BackendImageResponse) -> Result<Vec<u8>> {
    if body.status != "success" {
        return Err(RsketchError::ResponseError(format!(
            "backend reported status '{}': {}",
            body.status,
            body.message.unwrap_or_else(|| "no message".into())
        )));
    }

    let encoded = body
        .image
        .ok_or_else(|| RsketchError::ResponseError("No image in response".into()))?;

    STANDARD
        .decode(encoded.trim())
        .map_err(|e| RsketchError::ResponseError(format!("image is not valid base64: {}", e)))
}

#[async_trait]
impl GenerationService for HttpBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let url = self.endpoint.generate_url();
        log::info!(
            "Generating {} {} image via {}",
            request.subject_scope,
            request.art_style,
            url
        );
        log::debug!("Positive prompt: {}", request.prompt);
        log::debug!("Negative prompt: {}", request.negative_prompt);

        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RsketchError::ResponseError(format!(
                "backend returned {}: {}",
                status, text
            )));
        }

        let body: BackendImageResponse = response
            .json()
            .await
            .map_err(|e| RsketchError::ResponseError(e.to_string()))?;
        let image_bytes = decode_image_response(body)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        log::info!("Image received ({} bytes) in {}ms", image_bytes.len(), elapsed_ms);

        Ok(GenerationResponse {
            image_bytes,
            elapsed_ms,
        })
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        let url = self.endpoint.test_url();
        log::debug!("Probing {}", url);

        let response = match self.client.get(&url).timeout(self.probe_timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Backend unreachable at {}: {}", url, e);
                return Ok(HealthStatus {
                    reachable: false,
                    status_code: 0,
                    message: Some(e.to_string()),
                });
            }
        };

        let status_code = response.status().as_u16();
        let reachable = response.status().is_success();
        let message = if reachable {
            response
                .json::<TestResponse>()
                .await
                .ok()
                .and_then(|body| body.message)
        } else {
            None
        };

        Ok(HealthStatus {
            reachable,
            status_code,
            message,
        })
    }

    async fn fetch_tunnel_url(&self) -> Result<Option<String>> {
        let url = self.endpoint.tunnel_url_endpoint();
        log::info!("Fetching tunnel URL from {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            log::warn!("Backend returned status {}", response.status());
            return Ok(None);
        }

        let body: TunnelUrlResponse = response
            .json()
            .await
            .map_err(|e| RsketchError::ResponseError(e.to_string()))?;
        Ok(body.ngrok_url.filter(|u| !u.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success() {
        let body = BackendImageResponse {
            status: "success".into(),
            image: Some("aGVsbG8=".into()),
            message: None,
        };
        assert_eq!(decode_image_response(body).unwrap(), b"hello");
    }

    #[test]
    fn test_decode_error_status() {
        let body = BackendImageResponse {
            status: "error".into(),
            image: None,
            message: Some("pipeline not loaded".into()),
        };
        let err = decode_image_response(body).unwrap_err();
        assert!(err.to_string().contains("pipeline not loaded"));
    }

    #[test]
    fn test_decode_missing_or_bad_image() {
        let missing = BackendImageResponse {
            status: "success".into(),
            image: None,
            message: None,
        };
        assert!(decode_image_response(missing).is_err());

        let garbage = BackendImageResponse {
            status: "success".into(),
            image: Some("%%%".into()),
            message: None,
        };
        assert!(decode_image_response(garbage).is_err());
    }

    #[test]
    fn test_new_rejects_empty_endpoint() {
        let result = HttpBackend::new(EndpointConfig::new(""), &AppConfig::default());
        assert!(result.is_err());
    }
}
