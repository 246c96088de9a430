use serde::{Deserialize, Serialize};

use crate::options::{ItemStyle, MarkLabel, MarkPointItem};

const MARKER_SYMBOL: &str = "roundRect";
const MARKER_FONT_SIZE: u32 = 10;

/// Marker styling of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventMark {
    /// width, height
    pub symbol_size: [u32; 2],
    pub label: String,
    pub label_color: String,
    pub color: String,
}

impl EventMark {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            symbol_size: [8 + 8 * label.chars().count() as u32, 14],
            label,
            label_color: "#FFFFFF".to_string(),
            color: color.into(),
        }
    }

    pub fn symbol_size(mut self, width: u32, height: u32) -> Self {
        self.symbol_size = [width, height];
        self
    }

    pub fn label_color(mut self, color: impl Into<String>) -> Self {
        self.label_color = color.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Buy,
    Sell,
    Long,
    Short,
    CloseLong,
    CloseShort,
    Custom(EventMark),
}

impl EventKind {
    /// Marker of this kind. Only `Custom` carries its own styling.
    pub fn mark(&self) -> EventMark {
        match self {
            EventKind::Buy => EventMark::new("B", "#26A69A"),
            EventKind::Sell => EventMark::new("S", "#EF5350"),
            EventKind::Long => EventMark::new("L", "#2962FF"),
            EventKind::Short => EventMark::new("S", "#FF6D00"),
            EventKind::CloseLong => EventMark::new("CL", "#78909C"),
            EventKind::CloseShort => EventMark::new("CS", "#8D6E63"),
            EventKind::Custom(mark) => mark.clone(),
        }
    }
}

/// A marker attached to the candle with the same label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    pub label: String,
    pub kind: EventKind,
    pub description: Option<String>,
}

impl Event {
    pub fn new(label: impl Into<String>, kind: EventKind) -> Self {
        Self {
            label: label.into(),
            kind,
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn marker(&self) -> MarkPointItem {
        let mark = self.kind.mark();
        MarkPointItem {
            symbol: MARKER_SYMBOL.to_string(),
            symbol_size: mark.symbol_size,
            coord: (self.label.clone(), 0.0),
            label: MarkLabel {
                show: true,
                formatter: mark.label,
                color: mark.label_color,
                font_size: MARKER_FONT_SIZE,
            },
            item_style: ItemStyle {
                color: Some(mark.color),
                ..Default::default()
            },
        }
    }
}
