use super::common::{ArtStyle, ComposedPrompt, SubjectScope};
use super::parameters::GenerationParameters;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// Payload posted to the backend's `/generate` route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: String,
    #[serde(default)]
    pub image_data: String, // Base64 encoded sketch
    pub num_inference_steps: u32,
    pub control_type: String,
    pub subject_scope: SubjectScope,
    pub art_style: ArtStyle,
    pub controlnet_conditioning_scale: f32,
    pub guidance_scale: f32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        let subject_scope = SubjectScope::default();
        let art_style = ArtStyle::default();
        let params = GenerationParameters::defaults_for(art_style, subject_scope);

        Self {
            prompt: prompt.into(),
            negative_prompt: String::new(),
            image_data: String::new(),
            num_inference_steps: params.num_inference_steps,
            control_type: params.control_type,
            subject_scope,
            art_style,
            controlnet_conditioning_scale: params.controlnet_conditioning_scale,
            guidance_scale: params.guidance_scale,
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

    pub fn with_image_bytes(mut self, bytes: &[u8]) -> Self {
        self.image_data = STANDARD.encode(bytes);
        self
    }

    pub fn with_parameters(mut self, params: GenerationParameters) -> Self {
        self.num_inference_steps = params.num_inference_steps;
        self.control_type = params.control_type;
        self.controlnet_conditioning_scale = params.controlnet_conditioning_scale;
        self.guidance_scale = params.guidance_scale;
        self
    }

    /// Replaces the prompt pair, leaving every other field untouched.
    pub fn with_composed(mut self, composed: ComposedPrompt) -> Self {
        self.prompt = composed.positive;
        self.negative_prompt = composed.negative;
        self
    }
}

#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub image_bytes: Vec<u8>,
    pub elapsed_ms: u64,
}

/// Raw JSON body returned by the backend.
#[derive(Debug, Serialize, Deserialize)]
pub struct BackendImageResponse {
    pub status: String,
    pub image: Option<String>,
    #[serde(default, alias = "error")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub reachable: bool,
    pub status_code: u16,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_wire_fields() {
        let request = GenerationRequest::new("boy running")
            .with_subject_scope(SubjectScope::FullBody)
            .with_art_style(ArtStyle::Realistic)
            .with_image_bytes(b"png")
            .with_parameters(GenerationParameters::defaults_for(
                ArtStyle::Realistic,
                SubjectScope::FullBody,
            ));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["prompt"], "boy running");
        assert_eq!(json["negative_prompt"], "");
        assert_eq!(json["image_data"], "cG5n");
        assert_eq!(json["subject_scope"], "full_body");
        assert_eq!(json["art_style"], "realistic");
        assert_eq!(json["control_type"], "scribble");
        assert_eq!(json["num_inference_steps"], 30);
    }

    #[test]
    fn test_with_composed_keeps_parameters() {
        let request = GenerationRequest::new("cat").with_composed(ComposedPrompt {
            positive: "pos".into(),
            negative: "neg".into(),
        });
        assert_eq!(request.prompt, "pos");
        assert_eq!(request.negative_prompt, "neg");
        assert_eq!(request.num_inference_steps, 30);
    }

    #[test]
    fn test_backend_response_error_alias() {
        let body = r#"{"status":"error","image":null,"error":"CUDA out of memory"}"#;
        let parsed: BackendImageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status, "error");
        assert_eq!(parsed.message.as_deref(), Some("CUDA out of memory"));
    }
}
