use super::gender::GenderMarkers;
use crate::models::{ArtStyle, ComposedPrompt, GenderHint, GenerationRequest, SubjectScope};

const SEPARATOR: &str = ", ";

/// One clothing phrase per gender hint. The three are chosen independently
/// even when their wording happens to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClothingPhrases {
    pub male: String,
    pub female: String,
    pub neutral: String,
}

impl ClothingPhrases {
    pub fn select(&self, hint: GenderHint) -> &str {
        match hint {
            GenderHint::Male => &self.male,
            GenderHint::Female => &self.female,
            GenderHint::Neutral => &self.neutral,
        }
    }

    fn realistic() -> Self {
        Self {
            male: "wearing proper shirt and pants, fully clothed, decent attire".into(),
            female: "wearing proper shirt and pants or a modest dress, fully clothed, decent attire"
                .into(),
            neutral: "wearing proper shirt and pants, fully clothed, decent attire".into(),
        }
    }

    fn stylized() -> Self {
        Self {
            male: "wearing colorful shirt and pants, fully clothed outfit".into(),
            female: "wearing colorful dress or shirt and pants, fully clothed outfit".into(),
            neutral: "wearing colorful casual outfit, fully clothed".into(),
        }
    }
}

/// Template text for every scope/style cell plus the negative bases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    pub face_realistic: String,
    pub face_stylized: String,
    /// `{clothing}` is replaced by the selected clothing phrase.
    pub full_body_realistic: String,
    pub full_body_stylized: String,
    pub realistic_clothing: ClothingPhrases,
    pub stylized_clothing: ClothingPhrases,
    pub face_negative: String,
    pub full_body_negative: String,
}

pub const CLOTHING_SLOT: &str = "{clothing}";

impl Default for PromptTemplates {
    fn default() -> Self {
        let face_negative = "deformed, distorted, disfigured, bad anatomy, bad proportions, \
extra limbs, extra heads, multiple faces, split face, mutated hands, blurry, out of focus, \
low quality, glitch, anatomical error";

        Self {
            face_realistic: "realistic portrait of one person, single face, detailed facial \
features, natural skin texture, professional studio lighting, sharp focus, proper anatomy, \
symmetrical face"
                .into(),
            face_stylized: "anime style portrait of one person, single face, vibrant colors, \
stylized features, clean lines, detailed illustration, proper anatomy"
                .into(),
            full_body_realistic: "realistic full body portrait of one person, single figure, \
{clothing}, natural pose, correct human anatomy, professional photography, sharp focus"
                .into(),
            full_body_stylized: "anime style full body portrait of one person, single figure, \
{clothing}, vibrant colors, stylized features, clean lines, dynamic pose, detailed illustration"
                .into(),
            realistic_clothing: ClothingPhrases::realistic(),
            stylized_clothing: ClothingPhrases::stylized(),
            face_negative: face_negative.into(),
            full_body_negative: format!(
                "{face_negative}, extra bodies, multiple people, crowd, nude, naked, nsfw, \
revealing clothes, exposed skin, inappropriate clothing"
            ),
        }
    }
}

/// Turns a user prompt into the positive/negative pair the ControlNet
/// backend expects. Pure: no I/O, never fails.
#[derive(Debug, Clone, Default)]
pub struct PromptComposer {
    templates: PromptTemplates,
    markers: GenderMarkers,
}

impl PromptComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(mut self, templates: PromptTemplates) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_markers(mut self, markers: GenderMarkers) -> Self {
        self.markers = markers;
        self
    }

    pub fn templates(&self) -> &PromptTemplates {
        &self.templates
    }

    pub fn detect_gender(&self, prompt: &str) -> GenderHint {
        self.markers.detect(prompt)
    }

    pub fn compose(
        &self,
        prompt: &str,
        negative_prompt: &str,
        subject_scope: SubjectScope,
        art_style: ArtStyle,
    ) -> ComposedPrompt {
        let positive = self.positive(prompt, subject_scope, art_style);
        let negative = self.negative(negative_prompt, subject_scope);

        log::debug!(
            "Composed {} {} prompt ({} chars positive, {} chars negative)",
            subject_scope,
            art_style,
            positive.len(),
            negative.len()
        );

        ComposedPrompt { positive, negative }
    }

    /// Same as [`compose`](Self::compose) but takes raw strings for the enum
    /// fields; unknown values fall back to `full_body` / `cartoon`.
    pub fn compose_lenient(
        &self,
        prompt: &str,
        negative_prompt: &str,
        subject_scope: &str,
        art_style: &str,
    ) -> ComposedPrompt {
        self.compose(
            prompt,
            negative_prompt,
            SubjectScope::parse_lenient(subject_scope),
            ArtStyle::parse_lenient(art_style),
        )
    }

    /// Rewrites the prompt pair of a request in place of the raw user text.
    pub fn apply(&self, request: GenerationRequest) -> GenerationRequest {
        let composed = self.compose(
            &request.prompt,
            &request.negative_prompt,
            request.subject_scope,
            request.art_style,
        );
        request.with_composed(composed)
    }

    fn positive(&self, prompt: &str, scope: SubjectScope, style: ArtStyle) -> String {
        let t = &self.templates;

        let template = match (scope, style) {
            (SubjectScope::Face, ArtStyle::Realistic) => t.face_realistic.clone(),
            (SubjectScope::Face, ArtStyle::Cartoon) => t.face_stylized.clone(),
            (SubjectScope::FullBody, ArtStyle::Realistic) => {
                let hint = self.markers.detect(prompt);
                t.full_body_realistic
                    .replace(CLOTHING_SLOT, t.realistic_clothing.select(hint))
            }
            (SubjectScope::FullBody, ArtStyle::Cartoon) => {
                let hint = self.markers.detect(prompt);
                t.full_body_stylized
                    .replace(CLOTHING_SLOT, t.stylized_clothing.select(hint))
            }
        };

        if prompt.is_empty() {
            template
        } else {
            format!("{template}{SEPARATOR}{prompt}")
        }
    }

    fn negative(&self, negative_prompt: &str, scope: SubjectScope) -> String {
        let base = match scope {
            SubjectScope::Face => &self.templates.face_negative,
            SubjectScope::FullBody => &self.templates.full_body_negative,
        };

        if negative_prompt.is_empty() {
            base.clone()
        } else {
            format!("{base}{SEPARATOR}{negative_prompt}")
        }
    }
}

/// Composes with the stock templates and marker sets.
pub fn compose(
    prompt: &str,
    negative_prompt: &str,
    subject_scope: SubjectScope,
    art_style: ArtStyle,
) -> ComposedPrompt {
    PromptComposer::default().compose(prompt, negative_prompt, subject_scope, art_style)
}
