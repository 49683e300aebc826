//! Waste categories and label mapping
//!
//! `Category` is the closed three-valued enum every submission must carry.
//! Raw detector labels ("bottle", "banana", ...) are mapped to a category and
//! a normalized waste kind via an exact lookup table, then substring rules,
//! then a default.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Waste category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dry,
    Wet,
    Hazardous,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dry => "dry",
            Self::Wet => "wet",
            Self::Hazardous => "hazardous",
        }
    }

    /// Case-insensitive parse. Anything outside the three values is a
    /// data-integrity violation and returns `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dry" => Some(Self::Dry),
            "wet" => Some(Self::Wet),
            "hazardous" => Some(Self::Hazardous),
            _ => None,
        }
    }

    pub const ALL: [Category; 3] = [Self::Dry, Self::Wet, Self::Hazardous];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a classification came from.
///
/// `Synthetic` results are random stand-ins produced when the detection
/// endpoint is unavailable; downstream logic must be able to tell them apart
/// from real detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    Remote,
    Synthetic,
}

impl ClassificationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Synthetic => "synthetic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "remote" => Some(Self::Remote),
            "synthetic" => Some(Self::Synthetic),
            _ => None,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic)
    }
}

/// Result of classifying one image
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Classification {
    /// Normalized waste kind, e.g. `plastic_bottle`
    pub label: String,
    /// Raw detector class that produced the label
    pub detected_object: String,
    pub category: Category,
    /// Detector confidence in [0, 1]
    pub confidence: f64,
    pub source: ClassificationSource,
}

/// Exact label → (category, kind) table
const LABEL_TABLE: &[(&str, Category, &str)] = &[
    ("bottle", Category::Dry, "plastic_bottle"),
    ("can", Category::Dry, "metal_can"),
    ("plastic", Category::Dry, "plastic"),
    ("paper", Category::Dry, "paper"),
    ("cardboard", Category::Dry, "cardboard"),
    ("glass", Category::Dry, "glass"),
    ("metal", Category::Dry, "metal"),
    ("food", Category::Wet, "organic"),
    ("organic", Category::Wet, "organic"),
    ("banana", Category::Wet, "organic"),
    ("apple", Category::Wet, "organic"),
    ("battery", Category::Hazardous, "battery"),
    ("electronic", Category::Hazardous, "electronic"),
];

/// Map a raw detector class to `(category, waste kind)`.
///
/// Exact table lookup first, then substring rules for common objects,
/// then the dry/general default.
pub fn map_label(detected: &str) -> (Category, &'static str) {
    let class = detected.to_ascii_lowercase();

    for (label, category, kind) in LABEL_TABLE {
        if class == *label {
            return (*category, kind);
        }
    }

    if class.contains("bottle") || class.contains("plastic") {
        return (Category::Dry, "plastic_bottle");
    }
    if class.contains("can") || class.contains("metal") {
        return (Category::Dry, "metal_can");
    }
    if class.contains("paper") || class.contains("book") {
        return (Category::Dry, "paper");
    }
    if class.contains("food") || class.contains("fruit") {
        return (Category::Wet, "organic");
    }

    (Category::Dry, "general")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Category::parse("DRY"), Some(Category::Dry));
        assert_eq!(Category::parse("Wet"), Some(Category::Wet));
        assert_eq!(Category::parse("hazardous"), Some(Category::Hazardous));
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!(Category::parse("recyclable"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn exact_table_lookup() {
        assert_eq!(map_label("banana"), (Category::Wet, "organic"));
        assert_eq!(map_label("battery"), (Category::Hazardous, "battery"));
        assert_eq!(map_label("cardboard"), (Category::Dry, "cardboard"));
    }

    #[test]
    fn fuzzy_rules_match_substrings() {
        assert_eq!(map_label("water bottle"), (Category::Dry, "plastic_bottle"));
        assert_eq!(map_label("tin can"), (Category::Dry, "metal_can"));
        assert_eq!(map_label("notebook"), (Category::Dry, "paper"));
        assert_eq!(map_label("fruit peel"), (Category::Wet, "organic"));
    }

    #[test]
    fn unknown_labels_default_to_dry_general() {
        assert_eq!(map_label("umbrella"), (Category::Dry, "general"));
    }
}
