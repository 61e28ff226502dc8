pub mod backend;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod logger;
pub mod models;
pub mod prompt;

pub use backend::{BackendClient, GenerationService, HttpBackend, SketchJob};
pub use config::{AppConfig, EndpointConfig};
pub use endpoint::{EndpointConfigStore, EndpointValidation};
pub use error::{Result, RsketchError};
pub use models::*;
pub use prompt::{compose, detect_gender, detect_theme_style, PromptComposer};
