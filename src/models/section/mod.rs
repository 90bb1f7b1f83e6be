//! Section model for grouping timeline entries.
//!
//! Sections are the fixed classification buckets of the health timeline
//! (Symptoms, Medications, ...). Each one has a display label and a color
//! token; the mapping is static configuration rather than per-entry state.

use serde::{Deserialize, Serialize};

/// One of the seven fixed timeline sections.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SectionType {
    #[default]
    Symptom,
    Medication,
    Supplement,
    Diet,
    BodyComposition,
    Fitness,
    Misc,
}

/// Display order of the sections, top to bottom.
pub const SECTION_ORDER: [SectionType; 7] = [
    SectionType::Symptom,
    SectionType::Medication,
    SectionType::Supplement,
    SectionType::Diet,
    SectionType::BodyComposition,
    SectionType::Fitness,
    SectionType::Misc,
];

impl SectionType {
    /// Human readable label shown in the section column.
    pub fn label(&self) -> &'static str {
        match self {
            SectionType::Symptom => "Symptoms",
            SectionType::Medication => "Medications",
            SectionType::Supplement => "Supplements",
            SectionType::Diet => "Diet",
            SectionType::BodyComposition => "Body Composition",
            SectionType::Fitness => "Fitness",
            SectionType::Misc => "Misc",
        }
    }

    /// Named color token for the section.
    pub fn color_token(&self) -> &'static str {
        match self {
            SectionType::Symptom => "red",
            SectionType::Medication => "blue",
            SectionType::Supplement => "green",
            SectionType::Diet => "orange",
            SectionType::BodyComposition => "violet",
            SectionType::Fitness => "teal",
            SectionType::Misc => "gray",
        }
    }

    /// Hex color for the token, e.g. `#FA5252`.
    pub fn color_hex(&self) -> &'static str {
        match self.color_token() {
            "red" => "#FA5252",
            "blue" => "#228BE6",
            "green" => "#40C057",
            "orange" => "#FD7E14",
            "violet" => "#7950F2",
            "teal" => "#12B886",
            _ => "#868E96",
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
