use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_BACKGROUND: &str = "#FFFFFF";

/// Rendering engine themes. `White` is built into the engine, every other
/// theme needs its script asset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    White,
    Dark,
    Chalk,
    Essos,
    Infographic,
    Macarons,
    PurplePassion,
    Roma,
    Romantic,
    Shine,
    Vintage,
    Walden,
    Westeros,
    Wonderland,
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::White => "white",
            Theme::Dark => "dark",
            Theme::Chalk => "chalk",
            Theme::Essos => "essos",
            Theme::Infographic => "infographic",
            Theme::Macarons => "macarons",
            Theme::PurplePassion => "purple-passion",
            Theme::Roma => "roma",
            Theme::Romantic => "romantic",
            Theme::Shine => "shine",
            Theme::Vintage => "vintage",
            Theme::Walden => "walden",
            Theme::Westeros => "westeros",
            Theme::Wonderland => "wonderland",
        }
    }

    pub fn page_background(&self) -> &'static str {
        match self {
            Theme::Vintage => "#FEF8EF",
            Theme::Dark => "#100C2A",
            Theme::Chalk => "#293441",
            Theme::PurplePassion => "#5B5C6E",
            Theme::Romantic => "#F0E8CD",
            _ => DEFAULT_PAGE_BACKGROUND,
        }
    }

    pub(crate) fn asset(&self) -> Option<String> {
        match self {
            Theme::White => None,
            theme => Some(format!("themes/{}.js", theme.name())),
        }
    }
}

/// Pixel geometry, colors and fonts shared by the layout planner, the
/// option synthesizer and every plugin of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub slider_height: i32,
    /// vertical gap between stacked panes
    pub gap: i32,
    pub event_height: i32,
    /// distance from the bottom of the price pane's units to the event strip
    pub event_offset: i32,
    pub up_color: String,
    pub down_color: String,
    pub opacity_heavy: f64,
    pub opacity_med: f64,
    pub label_font_size: u32,
    pub label_font_height: i32,
    /// fraction added below the minimum and above the maximum of a y axis
    pub axis_padding: f64,
    pub palette: Vec<String>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            left: 80,
            right: 40,
            top: 20,
            slider_height: 85,
            gap: 20,
            event_height: 10,
            event_offset: 30,
            up_color: "#26A69A".to_string(),
            down_color: "#EF5350".to_string(),
            opacity_heavy: 0.9,
            opacity_med: 0.6,
            label_font_size: 11,
            label_font_height: 15,
            axis_padding: 0.01,
            palette: [
                "#2962FF", "#FF6D00", "#AB47BC", "#00897B", "#F9A825", "#6D4C41", "#EC407A",
                "#546E7A",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl ChartStyle {
    /// Palette entry for `index`, cycling past the end.
    pub fn color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return &self.up_color;
        }
        &self.palette[index % self.palette.len()]
    }
}
