use crate::models::GenderHint;

pub const MALE_MARKERS: &[&str] = &["boy", "man", "male", "guy", "gentleman", "sir"];
pub const FEMALE_MARKERS: &[&str] = &["girl", "woman", "female", "lady", "miss"];

/// Marker word sets used to guess a [`GenderHint`] from raw prompt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderMarkers {
    pub male: Vec<String>,
    pub female: Vec<String>,
}

impl Default for GenderMarkers {
    fn default() -> Self {
        Self {
            male: MALE_MARKERS.iter().map(|s| s.to_string()).collect(),
            female: FEMALE_MARKERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GenderMarkers {
    pub fn new(male: Vec<String>, female: Vec<String>) -> Self {
        Self {
            male: male.into_iter().map(|m| m.to_lowercase()).collect(),
            female: female.into_iter().map(|m| m.to_lowercase()).collect(),
        }
    }

    /// Case-insensitive substring scan. Female markers are blanked out before
    /// the male scan so "woman" and "female" do not also read as "man"/"male".
    pub fn detect(&self, prompt: &str) -> GenderHint {
        let lowered = prompt.to_lowercase();

        let female = self
            .female
            .iter()
            .any(|m| !m.is_empty() && lowered.contains(m.as_str()));

        let mut residue = lowered;
        for marker in self.female.iter().filter(|m| !m.is_empty()) {
            residue = residue.replace(marker.as_str(), " ");
        }
        let male = self
            .male
            .iter()
            .any(|m| !m.is_empty() && residue.contains(m.as_str()));

        match (male, female) {
            (true, false) => GenderHint::Male,
            (false, true) => GenderHint::Female,
            _ => GenderHint::Neutral,
        }
    }
}

pub fn detect_gender(prompt: &str) -> GenderHint {
    GenderMarkers::default().detect(prompt)
}
