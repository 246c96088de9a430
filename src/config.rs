use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    indicator::Indicator,
    theme::{ChartStyle, Theme},
};

pub const DEFAULT_ASSETS_HOST: &str = "https://go-echarts.github.io/go-echarts-assets/assets/";

/// Sizes and HTML content of the page regions around the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub chart_width: i32,
    pub chart_height: i32,
    pub top_height: i32,
    pub bottom_height: i32,
    pub left_width: i32,
    pub right_width: i32,
    pub top_content: String,
    pub bottom_content: String,
    pub left_content: String,
    pub right_content: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            chart_width: 1200,
            chart_height: 800,
            top_height: 0,
            bottom_height: 0,
            left_width: 0,
            right_width: 0,
            top_content: String::new(),
            bottom_content: String::new(),
            left_content: String::new(),
            right_content: String::new(),
        }
    }
}

/// The plain, serializable part of a [`Config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    /// decimal places of prices in labels and the tooltip
    pub precision: u32,
    pub draggable: bool,
    /// tooltip width at which event descriptions wrap, 0 keeps them on one line
    pub event_desc_wrap_width: u32,
    pub assets_host: String,
    pub layout: PageLayout,
    pub style: ChartStyle,
    /// scripts embedded verbatim after the chart
    pub js_funcs: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            precision: 2,
            draggable: false,
            event_desc_wrap_width: 0,
            assets_host: DEFAULT_ASSETS_HOST.to_string(),
            layout: PageLayout::default(),
            style: ChartStyle::default(),
            js_funcs: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct Config {
    pub(crate) settings: Settings,
    pub(crate) overlays: Vec<Box<dyn Indicator>>,
    pub(crate) indicators: Vec<Box<dyn Indicator>>,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn from_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |plugins: &[Box<dyn Indicator>]| -> Vec<String> {
            plugins.iter().map(|p| p.name().to_string()).collect()
        };
        f.debug_struct("Config")
            .field("settings", &self.settings)
            .field("overlays", &names(&self.overlays))
            .field("indicators", &names(&self.indicators))
            .finish()
    }
}

#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn settings(mut self, settings: Settings) -> Self {
        self.config.settings = settings;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.settings.theme = theme;
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.config.settings.precision = precision;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.config.settings.draggable = draggable;
        self
    }

    pub fn event_desc_wrap_width(mut self, width: u32) -> Self {
        self.config.settings.event_desc_wrap_width = width;
        self
    }

    pub fn assets_host(mut self, host: impl Into<String>) -> Self {
        self.config.settings.assets_host = host.into();
        self
    }

    pub fn chart_size(mut self, width: i32, height: i32) -> Self {
        self.config.settings.layout.chart_width = width;
        self.config.settings.layout.chart_height = height;
        self
    }

    pub fn top(mut self, height: i32, content: impl Into<String>) -> Self {
        self.config.settings.layout.top_height = height;
        self.config.settings.layout.top_content = content.into();
        self
    }

    pub fn bottom(mut self, height: i32, content: impl Into<String>) -> Self {
        self.config.settings.layout.bottom_height = height;
        self.config.settings.layout.bottom_content = content.into();
        self
    }

    pub fn left(mut self, width: i32, content: impl Into<String>) -> Self {
        self.config.settings.layout.left_width = width;
        self.config.settings.layout.left_content = content.into();
        self
    }

    pub fn right(mut self, width: i32, content: impl Into<String>) -> Self {
        self.config.settings.layout.right_width = width;
        self.config.settings.layout.right_content = content.into();
        self
    }

    pub fn style(mut self, style: ChartStyle) -> Self {
        self.config.settings.style = style;
        self
    }

    pub fn add_overlay(mut self, overlay: impl Indicator + 'static) -> Self {
        self.config.overlays.push(Box::new(overlay));
        self
    }

    pub fn add_indicator(mut self, indicator: impl Indicator + 'static) -> Self {
        self.config.indicators.push(Box::new(indicator));
        self
    }

    pub fn add_js_func(mut self, script: impl Into<String>) -> Self {
        self.config.settings.js_funcs.push(script.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
