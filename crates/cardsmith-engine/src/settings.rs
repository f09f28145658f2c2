use serde::{Deserialize, Serialize};

/// Lookup keys for the template's insertion points, by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub title: String,
    pub backtext: String,
    pub photo: String,
    pub background: String,
    pub level: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            title: "#title".to_string(),
            backtext: "#backtext".to_string(),
            photo: "#photo".to_string(),
            background: "#background".to_string(),
            level: "#level".to_string(),
        }
    }
}

/// Colours applied while binding a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStyle {
    /// Fill of the title text.
    pub title_color: String,
    /// Fill of bold runs in the back text.
    pub bold_color: String,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            title_color: "#FFFFFF".to_string(),
            bold_color: "#FFBF00".to_string(),
        }
    }
}

/// Layout parameters not carried by the template itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Width of the back text region unless the container overrides it.
    pub max_width: f64,
    /// Font size used when the container has no `font-size`.
    pub default_font_size: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            max_width: 144.0,
            default_font_size: 12.0,
        }
    }
}
