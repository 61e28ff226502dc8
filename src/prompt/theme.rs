//! Keyword-based style guess for named themes ("Pixar 3D animation",
//! "Professional headshot", ...).

use crate::models::ArtStyle;

const CARTOON_KEYWORDS: &[&str] = &[
    "cartoon",
    "anime",
    "animation",
    "disney",
    "pixar",
    "ghibli",
    "manga",
    "comic",
    "pop art",
    "watercolor",
    "impressionist",
    "van gogh",
    "cyborg",
    "robot",
    "steampunk",
    "cyberpunk",
    "fantasy",
    "sci-fi",
    "digital art",
];

/// Any theme without a cartoon keyword ("Professional headshot",
/// "Vintage film", unknown names) is realistic.
pub fn detect_theme_style(theme: &str) -> ArtStyle {
    let lowered = theme.to_lowercase();

    if CARTOON_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        ArtStyle::Cartoon
    } else {
        ArtStyle::Realistic
    }
}
