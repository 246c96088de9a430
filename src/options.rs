//! Option records consumed by the rendering engine. Field names follow the
//! engine's camelCase option keys; unset options are omitted from the output.

use serde::Serialize;

use crate::callback::JsFunc;

pub(crate) fn px(value: i32) -> String {
    format!("{}px", value)
}

/// The complete option object of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: Vec<Title>,
    pub tooltip: Tooltip,
    pub axis_pointer: AxisPointer,
    pub grid: Vec<Grid>,
    pub x_axis: Vec<XAxis>,
    pub y_axis: Vec<YAxis>,
    pub data_zoom: Vec<DataZoom>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub text: String,
    pub left: String,
    pub top: String,
    pub text_style: TextStyle,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub left: String,
    pub top: String,
    pub width: String,
    pub height: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Toggle {
    pub show: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabel {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_min_label: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_max_label: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<JsFunc>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XAxis {
    pub show: bool,
    pub grid_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_tick: Option<Toggle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_label: Option<AxisLabel>,
    pub data: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxis {
    pub show: bool,
    pub grid_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_area: Option<Toggle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_line: Option<Toggle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_label: Option<AxisLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<JsFunc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<JsFunc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub show: bool,
    pub trigger: String,
    pub trigger_on: String,
    pub position: JsFunc,
    pub formatter: JsFunc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisPointer {
    #[serde(rename = "type")]
    pub kind: String,
    pub snap: bool,
    pub link: Vec<AxisPointerLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisPointerLink {
    pub x_axis_index: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataZoom {
    #[serde(rename = "type")]
    pub kind: String,
    pub start: f64,
    pub end: f64,
    pub x_axis_index: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    Candlestick,
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataPoint {
    Value(Option<f64>),
    /// open, close, low, high
    Kline([f64; 4]),
    Styled {
        value: f64,
        #[serde(rename = "itemStyle")]
        item_style: ItemStyle,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color0: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color0: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkLine {
    pub symbol: [&'static str; 2],
    pub line_style: LineStyle,
    pub data: Vec<MarkLineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkLineItem {
    pub name: String,
    pub y_axis: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkPoint {
    pub data: Vec<MarkPointItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPointItem {
    pub symbol: String,
    pub symbol_size: [u32; 2],
    /// category label on the x axis and value on the y axis
    pub coord: (String, f64),
    pub label: MarkLabel,
    pub item_style: ItemStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkLabel {
    pub show: bool,
    pub formatter: String,
    pub color: String,
    pub font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeriesType,
    pub x_axis_index: usize,
    pub y_axis_index: usize,
    pub data: Vec<DataPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_style: Option<ItemStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_line: Option<MarkLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_point: Option<MarkPoint>,
}

impl Series {
    pub fn new(
        name: impl Into<String>,
        kind: SeriesType,
        pane: usize,
        data: Vec<DataPoint>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            x_axis_index: pane,
            y_axis_index: pane,
            data,
            bar_width: None,
            symbol: None,
            item_style: None,
            line_style: None,
            mark_line: None,
            mark_point: None,
        }
    }

    /// A symbol-less line with one point per value; `None` leaves a gap.
    pub fn line(name: impl Into<String>, values: &[Option<f64>], pane: usize) -> Self {
        let data = values.iter().copied().map(DataPoint::Value).collect();
        Self {
            symbol: Some("none".to_string()),
            ..Self::new(name, SeriesType::Line, pane, data)
        }
    }

    pub fn bar_width(mut self, width: &str) -> Self {
        self.bar_width = Some(width.to_string());
        self
    }

    pub fn item_style(mut self, style: ItemStyle) -> Self {
        self.item_style = Some(style);
        self
    }

    pub fn line_style(mut self, style: LineStyle) -> Self {
        self.line_style = Some(style);
        self
    }

    pub fn mark_line(mut self, mark_line: MarkLine) -> Self {
        self.mark_line = Some(mark_line);
        self
    }

    pub fn mark_point(mut self, mark_point: MarkPoint) -> Self {
        self.mark_point = Some(mark_point);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{DataPoint, ItemStyle, Series, SeriesType};

    #[test]
    fn line_gaps_are_null() {
        let series = Series::line("MA5", &[None, Some(1.5)], 0);
        assert_eq!(
            serde_json::to_value(&series).unwrap(),
            json!({
                "name": "MA5",
                "type": "line",
                "xAxisIndex": 0,
                "yAxisIndex": 0,
                "data": [null, 1.5],
                "symbol": "none",
            })
        );
    }

    #[test]
    fn styled_bar_point() {
        let series = Series::new(
            "Vol",
            SeriesType::Bar,
            3,
            vec![DataPoint::Styled {
                value: 12.0,
                item_style: ItemStyle {
                    color: Some("#EF5350".to_string()),
                    ..Default::default()
                },
            }],
        )
        .bar_width("60%");
        let value = serde_json::to_value(&series).unwrap();
        assert_eq!(value["data"], json!([{ "value": 12.0, "itemStyle": { "color": "#EF5350" } }]));
        assert_eq!(value["barWidth"], "60%");
    }
}
