pub mod composer;
pub mod gender;
pub mod theme;

pub use composer::{compose, ClothingPhrases, PromptComposer, PromptTemplates};
pub use gender::{detect_gender, GenderMarkers};
pub use theme::detect_theme_style;
