//! Visual style of one point-of-interest category on the overlay map.

use serde::Serialize;

use super::{color::Color, enums::IconShape};

/// How markers of one category (waypoints, quests, …) are drawn.
///
/// A `None` colour means "do not draw this part".  The drawing code checks
/// the `can_draw_*` helpers instead of inspecting fields itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointOfInterestRendering {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<Color>,
    pub icon_shape: IconShape,
    pub icon_size: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_color: Option<Color>,
    pub line_thickness: f32,
    pub arrow_head_size: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_color: Option<Color>,
    pub label_font: String,
    pub label_font_size: i32,
}

impl PointOfInterestRendering {
    pub fn can_draw_icon(&self) -> bool {
        self.icon_shape != IconShape::None && self.icon_size > 0 && visible(self.icon_color)
    }

    pub fn can_draw_line(&self) -> bool {
        self.line_thickness > 0.0 && visible(self.line_color)
    }

    /// Arrow heads are drawn at the end of the line, so they need one.
    pub fn can_draw_arrow_head(&self) -> bool {
        self.can_draw_line() && self.arrow_head_size > 0
    }

    pub fn can_draw_label(&self) -> bool {
        !self.label_font.trim().is_empty() && self.label_font_size > 0 && visible(self.label_color)
    }
}

fn visible(color: Option<Color>) -> bool {
    color.is_some_and(|c| !c.is_transparent())
}
