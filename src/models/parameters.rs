use super::common::{ArtStyle, SubjectScope};
use crate::error::RsketchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CONTROL_TYPE: &str = "scribble";

/// Named tuning presets. `Default` follows the sketch closely, `Creative`
/// loosens the ControlNet grip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterPreset {
    Default,
    Balanced,
    Creative,
}

impl ParameterPreset {
    pub const ALL: [ParameterPreset; 3] = [
        ParameterPreset::Default,
        ParameterPreset::Balanced,
        ParameterPreset::Creative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterPreset::Default => "default",
            ParameterPreset::Balanced => "balanced",
            ParameterPreset::Creative => "creative",
        }
    }
}

impl FromStr for ParameterPreset {
    type Err = RsketchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(ParameterPreset::Default),
            "balanced" => Ok(ParameterPreset::Balanced),
            "creative" => Ok(ParameterPreset::Creative),
            other => Err(RsketchError::ConfigError(format!(
                "unknown preset '{}', expected default, balanced or creative",
                other
            ))),
        }
    }
}

impl fmt::Display for ParameterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub controlnet_conditioning_scale: f32,
    pub guidance_scale: f32,
    pub num_inference_steps: u32,
    pub control_type: String,
}

impl GenerationParameters {
    fn scribble(controlnet_conditioning_scale: f32, guidance_scale: f32, steps: u32) -> Self {
        Self {
            controlnet_conditioning_scale,
            guidance_scale,
            num_inference_steps: steps,
            control_type: DEFAULT_CONTROL_TYPE.to_string(),
        }
    }

    pub fn preset(style: ArtStyle, scope: SubjectScope, preset: ParameterPreset) -> Self {
        use ParameterPreset as P;

        match (style, scope, preset) {
            (ArtStyle::Realistic, SubjectScope::Face, P::Default) => Self::scribble(0.95, 6.5, 30),
            (ArtStyle::Realistic, SubjectScope::Face, P::Balanced) => Self::scribble(0.9, 6.0, 30),
            (ArtStyle::Realistic, SubjectScope::Face, P::Creative) => Self::scribble(0.8, 7.0, 30),
            (ArtStyle::Realistic, SubjectScope::FullBody, P::Default) => {
                Self::scribble(0.6, 8.0, 30)
            }
            (ArtStyle::Realistic, SubjectScope::FullBody, P::Balanced) => {
                Self::scribble(0.7, 7.5, 30)
            }
            (ArtStyle::Realistic, SubjectScope::FullBody, P::Creative) => {
                Self::scribble(0.8, 7.0, 30)
            }
            // Cartoon uses the same table for both scopes
            (ArtStyle::Cartoon, _, P::Default) => Self::scribble(0.95, 7.0, 32),
            (ArtStyle::Cartoon, _, P::Balanced) => Self::scribble(0.9, 6.5, 34),
            (ArtStyle::Cartoon, _, P::Creative) => Self::scribble(0.8, 6.0, 36),
        }
    }

    pub fn defaults_for(style: ArtStyle, scope: SubjectScope) -> Self {
        Self::preset(style, scope, ParameterPreset::Default)
    }
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self::defaults_for(ArtStyle::default(), SubjectScope::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetEntry {
    pub art_style: ArtStyle,
    pub subject_scope: SubjectScope,
    pub preset: ParameterPreset,
    pub parameters: GenerationParameters,
}

/// Static description of what the generation request accepts, for
/// diagnostic tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParametersInfo {
    pub subject_scopes: Vec<SubjectScope>,
    pub art_styles: Vec<ArtStyle>,
    pub presets: Vec<ParameterPreset>,
    pub defaults: GenerationParameters,
    pub preset_table: Vec<PresetEntry>,
}

impl ParametersInfo {
    pub fn current() -> Self {
        let mut preset_table = Vec::new();
        for art_style in ArtStyle::ALL {
            for subject_scope in SubjectScope::ALL {
                for preset in ParameterPreset::ALL {
                    preset_table.push(PresetEntry {
                        art_style,
                        subject_scope,
                        preset,
                        parameters: GenerationParameters::preset(art_style, subject_scope, preset),
                    });
                }
            }
        }

        Self {
            subject_scopes: SubjectScope::ALL.to_vec(),
            art_styles: ArtStyle::ALL.to_vec(),
            presets: ParameterPreset::ALL.to_vec(),
            defaults: GenerationParameters::default(),
            preset_table,
        }
    }
}
