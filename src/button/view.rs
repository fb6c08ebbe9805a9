//! Published button state

use serde::{Deserialize, Serialize};

use super::{
    display::{ColourCategory, DerivedDisplay},
    palette::{ButtonColours, Palette},
};

/// Everything the control needs to render the ready button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonView {
    pub text: String,
    pub category: ColourCategory,
    pub colours: ButtonColours,
    /// Tooltip override, `None` to keep the control's default
    pub tooltip: Option<String>,
    /// Whole seconds left on the active countdown
    pub countdown_remaining_seconds: Option<u64>,
}

impl ButtonView {
    pub fn new(display: DerivedDisplay, palette: &Palette) -> Self {
        Self {
            colours: palette.resolve(display.colour),
            text: display.text,
            category: display.colour,
            tooltip: None,
            countdown_remaining_seconds: None,
        }
    }

    /// Tooltip to show given the control's default tooltip
    pub fn tooltip_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.tooltip.as_deref().unwrap_or(default)
    }
}

impl Default for ButtonView {
    fn default() -> Self {
        Self::new(super::display::derive(None, None, None, false), &Palette::default())
    }
}
