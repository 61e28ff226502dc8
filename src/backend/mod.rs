pub mod http_client;
pub mod traits;

use crate::{
    config::{AppConfig, EndpointConfig},
    endpoint::{validate_base_url, EndpointConfigStore},
    error::Result,
    models::{
        ArtStyle, GenerationParameters, GenerationRequest, GenerationResponse, HealthStatus,
        ParameterPreset, SubjectScope,
    },
    prompt::PromptComposer,
};
use std::sync::Arc;

pub use http_client::HttpBackend;
pub use traits::GenerationService;

/// A sketch plus the user's wording, before any prompt engineering.
#[derive(Debug, Clone)]
pub struct SketchJob {
    pub prompt: String,
    pub negative_prompt: String,
    pub subject_scope: SubjectScope,
    pub art_style: ArtStyle,
    pub preset: ParameterPreset,
    pub image_bytes: Vec<u8>,
}

impl SketchJob {
    pub fn new(prompt: impl Into<String>, image_bytes: Vec<u8>) -> Self {
        Self {
            prompt: prompt.into(),
            negative_prompt: String::new(),
            subject_scope: SubjectScope::default(),
            art_style: ArtStyle::default(),
            preset: ParameterPreset::Default,
            image_bytes,
        }
    }

    pub fn with_negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = negative_prompt.into();
        self
    }

    pub fn with_subject_scope(mut self, scope: SubjectScope) -> Self {
        self.subject_scope = scope;
        self
    }

    pub fn with_art_style(mut self, style: ArtStyle) -> Self {
        self.art_style = style;
        self
    }

    pub fn with_preset(mut self, preset: ParameterPreset) -> Self {
        self.preset = preset;
        self
    }
}

/// Ties a composer to a generation service reached through one endpoint.
#[derive(Clone)]
pub struct BackendClient {
    endpoint: EndpointConfig,
    composer: PromptComposer,
    service: Arc<dyn GenerationService>,
}

impl BackendClient {
    pub fn new(endpoint: EndpointConfig, config: &AppConfig) -> Result<Self> {
        let service = HttpBackend::new(endpoint.clone(), config)?;
        Ok(Self::with_service(endpoint, Arc::new(service)))
    }

    pub fn with_service(endpoint: EndpointConfig, service: Arc<dyn GenerationService>) -> Self {
        Self {
            endpoint,
            composer: PromptComposer::default(),
            service,
        }
    }

    pub fn with_composer(mut self, composer: PromptComposer) -> Self {
        self.composer = composer;
        self
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    pub fn composer(&self) -> &PromptComposer {
        &self.composer
    }

    pub fn build_request(&self, job: &SketchJob) -> GenerationRequest {
        let composed = self.composer.compose(
            &job.prompt,
            &job.negative_prompt,
            job.subject_scope,
            job.art_style,
        );

        GenerationRequest::new(job.prompt.clone())
            .with_subject_scope(job.subject_scope)
            .with_art_style(job.art_style)
            .with_parameters(GenerationParameters::preset(
                job.art_style,
                job.subject_scope,
                job.preset,
            ))
            .with_image_bytes(&job.image_bytes)
            .with_composed(composed)
    }

    pub async fn generate(&self, job: &SketchJob) -> Result<GenerationResponse> {
        let request = self.build_request(job);
        self.service.generate(&request).await
    }

    pub async fn health_check(&self) -> Result<HealthStatus> {
        self.service.health_check().await
    }

    /// Asks the running backend for its current tunnel URL and stores it.
    /// Returns the stored URL, or `None` when the backend had nothing usable.
    pub async fn refresh_endpoint(&self, store: &EndpointConfigStore) -> Result<Option<String>> {
        let Some(candidate) = self.service.fetch_tunnel_url().await? else {
            log::warn!("Backend did not report a tunnel URL");
            return Ok(None);
        };

        match validate_base_url(&candidate) {
            Ok(url) => {
                store.set(&url)?;
                Ok(Some(url))
            }
            Err(e) => {
                log::warn!("Ignoring tunnel URL from backend: {}", e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RsketchError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::tempdir;

    struct FakeService {
        seen: Mutex<Vec<GenerationRequest>>,
        tunnel_url: Option<String>,
    }

    impl FakeService {
        fn new(tunnel_url: Option<&str>) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                tunnel_url: tunnel_url.map(String::from),
            }
        }
    }

    #[async_trait]
    impl GenerationService for FakeService {
        async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(GenerationResponse {
                image_bytes: vec![1, 2, 3],
                elapsed_ms: 5,
            })
        }

        async fn health_check(&self) -> Result<HealthStatus> {
            Err(RsketchError::RequestError("offline".into()))
        }

        async fn fetch_tunnel_url(&self) -> Result<Option<String>> {
            Ok(self.tunnel_url.clone())
        }
    }

    fn client(service: Arc<FakeService>) -> BackendClient {
        BackendClient::with_service(EndpointConfig::new("https://old.example.com"), service)
    }

    #[tokio::test]
    async fn test_generate_sends_composed_prompt() {
        let service = Arc::new(FakeService::new(None));
        let client = client(service.clone());

        let job = SketchJob::new("boy running", b"sketch".to_vec())
            .with_subject_scope(SubjectScope::FullBody)
            .with_art_style(ArtStyle::Realistic)
            .with_preset(ParameterPreset::Balanced);
        let response = client.generate(&job).await.unwrap();
        assert_eq!(response.image_bytes, vec![1, 2, 3]);

        let seen = service.seen.lock().unwrap();
        let sent = &seen[0];
        assert!(sent.prompt.starts_with("realistic full body portrait of one person"));
        assert!(sent.prompt.ends_with("boy running"));
        assert!(sent.negative_prompt.contains("multiple people"));
        assert_eq!(sent.controlnet_conditioning_scale, 0.7);
        assert_eq!(sent.guidance_scale, 7.5);
        assert_eq!(sent.image_data, "c2tldGNo");
    }

    #[tokio::test]
    async fn test_refresh_endpoint_stores_valid_url() {
        let dir = tempdir().unwrap();
        let store = EndpointConfigStore::new(dir.path().join("endpoint.json"));
        let client = client(Arc::new(FakeService::new(Some("https://new.example.com"))));

        let updated = client.refresh_endpoint(&store).await.unwrap();
        assert_eq!(updated.as_deref(), Some("https://new.example.com"));
        assert_eq!(store.get().unwrap(), "https://new.example.com");
    }

    #[tokio::test]
    async fn test_refresh_endpoint_ignores_bad_url() {
        let dir = tempdir().unwrap();
        let store = EndpointConfigStore::new(dir.path().join("endpoint.json"));
        store.set("https://old.example.com").unwrap();
        let client = client(Arc::new(FakeService::new(Some("garbage"))));

        assert_eq!(client.refresh_endpoint(&store).await.unwrap(), None);
        assert_eq!(store.get().unwrap(), "https://old.example.com");
    }

    #[tokio::test]
    async fn test_health_check_propagates_errors() {
        let client = client(Arc::new(FakeService::new(None)));
        assert!(client.health_check().await.is_err());
    }
}
