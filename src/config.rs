//! Layout constants for the answer sheet.
//!
//! All coordinates are PDF points with the origin at the bottom-left corner
//! of the page. Any subset of the fields can be overridden from a JSON file.

use crate::error::{Result, SheetError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A4 dimensions in points
pub const A4_WIDTH_PT: f32 = 595.2756;
pub const A4_HEIGHT_PT: f32 = 841.8898;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,

    /// Vertical distance between consecutive questions in a column
    pub bubble_spacing: f32,
    /// Horizontal distance between bubbles of the same question
    pub horizontal_spacing: f32,
    pub column_spacing: f32,
    pub bubble_size: f32,
    /// Distance from the question number to the first bubble
    pub bubble_offset: f32,

    pub font_size: f32,
    pub label_font_size: f32,
    pub header_font_size: f32,

    /// Header offsets, measured from the top margin
    pub group_label_offset: f32,
    pub name_field_gap: f32,
    pub grid_start_gap: f32,

    pub marker_size: f32,
    pub marker_offset_x: f32,
    pub marker_offset_y: f32,

    /// A first-column, first-row question below this height starts a new page
    pub low_water_mark: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH_PT,
            page_height: A4_HEIGHT_PT,
            margin: 50.0,
            bubble_spacing: 21.0,
            horizontal_spacing: 18.0,
            column_spacing: 130.0,
            bubble_size: 15.0,
            bubble_offset: 35.0,
            font_size: 12.0,
            label_font_size: 10.0,
            header_font_size: 12.0,
            group_label_offset: 150.0,
            name_field_gap: 20.0,
            grid_start_gap: 60.0,
            marker_size: 80.0,
            marker_offset_x: 435.0,
            marker_offset_y: 45.0,
            low_water_mark: 100.0,
        }
    }
}

impl LayoutConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SheetError::LayoutFileError(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| SheetError::LayoutFileError(format!("Invalid JSON: {}", e)))
    }

    /// Rejects dimensions that cannot produce a printable page.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("bubble_size", self.bubble_size),
            ("font_size", self.font_size),
            ("label_font_size", self.label_font_size),
            ("header_font_size", self.header_font_size),
            ("marker_size", self.marker_size),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(SheetError::config(field, format!("must be positive, got {}", value)));
            }
        }

        let non_negative = [
            ("margin", self.margin),
            ("bubble_spacing", self.bubble_spacing),
            ("horizontal_spacing", self.horizontal_spacing),
            ("column_spacing", self.column_spacing),
            ("bubble_offset", self.bubble_offset),
            ("group_label_offset", self.group_label_offset),
            ("name_field_gap", self.name_field_gap),
            ("grid_start_gap", self.grid_start_gap),
            ("marker_offset_x", self.marker_offset_x),
            ("marker_offset_y", self.marker_offset_y),
            ("low_water_mark", self.low_water_mark),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(SheetError::config(field, format!("must not be negative, got {}", value)));
            }
        }
        Ok(())
    }

    /// Baseline of the header row.
    pub fn header_y(&self) -> f32 {
        self.page_height - self.margin
    }

    /// Baseline of the first question row on the first page.
    pub fn grid_start_y(&self) -> f32 {
        self.header_y() - self.grid_start_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_printed_layout() {
        let config = LayoutConfig::default();
        assert_eq!(config.margin, 50.0);
        assert_eq!(config.bubble_spacing, 21.0);
        assert_eq!(config.horizontal_spacing, 18.0);
        assert_eq!(config.column_spacing, 130.0);
        assert_eq!(config.bubble_size, 15.0);
        assert_eq!(config.font_size, 12.0);
        assert!((config.grid_start_y() - (A4_HEIGHT_PT - 110.0)).abs() < 1e-3);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{ "margin": 36.0, "column_spacing": 110.0 }"#).unwrap();
        assert_eq!(config.margin, 36.0);
        assert_eq!(config.column_spacing, 110.0);
        assert_eq!(config.bubble_spacing, 21.0);
        assert_eq!(config.page_height, A4_HEIGHT_PT);
    }

    #[test]
    fn validate_rejects_zero_bubble() {
        let config = LayoutConfig {
            bubble_size: 0.0,
            ..Default::default()
        };
        match config.validate() {
            Err(SheetError::ConfigError { field, .. }) => assert_eq!(field, "bubble_size"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn validate_rejects_negative_spacing() {
        let config: LayoutConfig = serde_json::from_str(r#"{ "margin": -200.0 }"#).unwrap();
        match config.validate() {
            Err(SheetError::ConfigError { field, .. }) => assert_eq!(field, "margin"),
            other => panic!("unexpected result: {:?}", other),
        }

        let config = LayoutConfig {
            column_spacing: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_file_is_layout_error() {
        let err = LayoutConfig::from_json_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, SheetError::LayoutFileError(_)));
    }
}
