use crate::{
    error::Result,
    models::{GenerationRequest, GenerationResponse, HealthStatus},
};
use async_trait::async_trait;

/// The remote ControlNet service as seen from this crate.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;

    async fn health_check(&self) -> Result<HealthStatus>;

    /// Asks the backend which public tunnel URL it is currently served on.
    async fn fetch_tunnel_url(&self) -> Result<Option<String>>;
}
