//! Marker appearance shared by every segment of a store.

use serde::{Deserialize, Serialize};

/// Size of the drawn point markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MarkerSize {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    #[serde(rename = "XL")]
    ExtraLarge,
    #[serde(rename = "XXL")]
    ExtraExtraLarge,
    #[serde(rename = "XXXL")]
    Huge,
}

impl MarkerSize {
    /// Get the display name for this size.
    pub fn name(&self) -> &'static str {
        match self {
            MarkerSize::Tiny => "Tiny",
            MarkerSize::Small => "Small",
            MarkerSize::Medium => "Medium",
            MarkerSize::Large => "Large",
            MarkerSize::ExtraLarge => "XL",
            MarkerSize::ExtraExtraLarge => "XXL",
            MarkerSize::Huge => "XXXL",
        }
    }

    /// Get all sizes from smallest to largest.
    pub fn all() -> &'static [MarkerSize] {
        &[
            MarkerSize::Tiny,
            MarkerSize::Small,
            MarkerSize::Medium,
            MarkerSize::Large,
            MarkerSize::ExtraLarge,
            MarkerSize::ExtraExtraLarge,
            MarkerSize::Huge,
        ]
    }

    /// Look a size up by its display name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|size| size.name().eq_ignore_ascii_case(name))
    }
}

/// Shape of the drawn point markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MarkerShape {
    Hybrid,
    Cross,
    #[default]
    Dot,
    Circle,
}

impl MarkerShape {
    /// Get the display name for this shape.
    pub fn name(&self) -> &'static str {
        match self {
            MarkerShape::Hybrid => "Hybrid",
            MarkerShape::Cross => "Cross",
            MarkerShape::Dot => "Dot",
            MarkerShape::Circle => "Circle",
        }
    }

    /// Get all shapes.
    pub fn all() -> &'static [MarkerShape] {
        &[
            MarkerShape::Hybrid,
            MarkerShape::Cross,
            MarkerShape::Dot,
            MarkerShape::Circle,
        ]
    }

    /// Look a shape up by its display name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|shape| shape.name().eq_ignore_ascii_case(name))
    }
}

/// How markers are drawn: size, shape and whether group numbers are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    #[serde(default)]
    pub size: MarkerSize,
    #[serde(default)]
    pub shape: MarkerShape,
    #[serde(default = "default_show_labels")]
    pub show_labels: bool,
}

fn default_show_labels() -> bool {
    true
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: MarkerSize::default(),
            shape: MarkerShape::default(),
            show_labels: default_show_labels(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = MarkerStyle::default();
        assert_eq!(style.size, MarkerSize::Medium);
        assert_eq!(style.shape, MarkerShape::Dot);
        assert!(style.show_labels);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(MarkerSize::from_name("xxl"), Some(MarkerSize::ExtraExtraLarge));
        assert_eq!(MarkerShape::from_name("Circle"), Some(MarkerShape::Circle));
        assert_eq!(MarkerShape::from_name("square"), None);
    }

    #[test]
    fn test_partial_style_uses_defaults() {
        let style: MarkerStyle = serde_json::from_str(r#"{"size": "XL"}"#).unwrap();
        assert_eq!(style.size, MarkerSize::ExtraLarge);
        assert_eq!(style.shape, MarkerShape::Dot);
        assert!(style.show_labels);
    }
}
