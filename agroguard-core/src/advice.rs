//! Care recommendations keyed by class label
//!
//! Labels without a specific entry (healthy classes, `"Unknown"`, labels
//! from custom tables) get the healthy-plant message.

/// Shown for any label without a disease-specific recommendation
pub const HEALTHY_ADVICE: &str = "Plant looks healthy. Continue regular care.";

const ADVICE: [(&str, &str); 6] = [
    ("Anthracnose", "Recommendation: treat with fungicide, reduce humidity"),
    ("Bacterial Wilt", "Recommendation: remove affected plants, improve drainage"),
    (
        "Belly Rot",
        "Recommendation: keep fruit off the soil, treat with an antifungal agent",
    ),
    ("Downy Mildew", "Recommendation: reduce humidity, improve ventilation"),
    (
        "Gummy Stem Blight",
        "Recommendation: treat with fungicide, remove affected parts",
    ),
    ("Pythium Fruit Rot", "Recommendation: improve drainage, treat the soil"),
];

/// Recommendation text for a class label
pub fn recommendation(class_name: &str) -> &'static str {
    ADVICE
        .iter()
        .find(|(label, _)| *label == class_name)
        .map(|(_, text)| *text)
        .unwrap_or(HEALTHY_ADVICE)
}

/// True if the label has a disease-specific recommendation
pub fn is_disease(class_name: &str) -> bool {
    ADVICE.iter().any(|(label, _)| *label == class_name)
}
