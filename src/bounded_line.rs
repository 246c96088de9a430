use crate::{
    callback::{constant, label_formatter, JsFunc},
    indicator::{Indicator, Ohlcv},
    options::{LineStyle, MarkLine, MarkLineItem, Series},
    ta,
    theme::ChartStyle,
};

/// A line on a fixed y range with horizontal lower/upper threshold lines.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedLine {
    name: String,
    values: Vec<f64>,
    min: f64,
    max: f64,
    lower_marker: f64,
    upper_marker: f64,
}

impl BoundedLine {
    pub fn new(
        name: impl Into<String>,
        values: Vec<f64>,
        min: f64,
        max: f64,
        lower_marker: f64,
        upper_marker: f64,
    ) -> Self {
        Self {
            name: name.into(),
            values,
            min,
            max,
            lower_marker,
            upper_marker,
        }
    }
}

impl Indicator for BoundedLine {
    fn name(&self) -> &str {
        &self.name
    }

    fn y_axis_label(&self) -> Option<JsFunc> {
        Some(label_formatter(0))
    }

    fn y_axis_min(&self) -> Option<JsFunc> {
        Some(constant(self.min))
    }

    fn y_axis_max(&self) -> Option<JsFunc> {
        Some(constant(self.max))
    }

    fn render(
        &self,
        _: &Ohlcv,
        pane: usize,
        color_index: usize,
        style: &ChartStyle,
    ) -> Vec<Series> {
        let values: Vec<_> = self.values.iter().copied().map(Some).collect();
        vec![bounded_series(
            &self.name,
            &values,
            (self.lower_marker, self.upper_marker),
            pane,
            color_index,
            style,
        )]
    }
}

/// Relative strength index of the closes on a 0..100 axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Rsi {
    name: String,
    period: usize,
    lower_marker: f64,
    upper_marker: f64,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self::with_markers(period, 30.0, 70.0)
    }

    pub fn with_markers(period: usize, lower_marker: f64, upper_marker: f64) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
            lower_marker,
            upper_marker,
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn y_axis_label(&self) -> Option<JsFunc> {
        Some(label_formatter(0))
    }

    fn y_axis_min(&self) -> Option<JsFunc> {
        Some(constant(0.0))
    }

    fn y_axis_max(&self) -> Option<JsFunc> {
        Some(constant(100.0))
    }

    fn render(
        &self,
        data: &Ohlcv,
        pane: usize,
        color_index: usize,
        style: &ChartStyle,
    ) -> Vec<Series> {
        vec![bounded_series(
            &self.name,
            &ta::rsi(&data.closes, self.period),
            (self.lower_marker, self.upper_marker),
            pane,
            color_index,
            style,
        )]
    }
}

fn bounded_series(
    name: &str,
    values: &[Option<f64>],
    (lower, upper): (f64, f64),
    pane: usize,
    color_index: usize,
    style: &ChartStyle,
) -> Series {
    Series::line(name, values, pane)
        .line_style(LineStyle {
            color: Some(style.color(color_index).to_string()),
            opacity: Some(style.opacity_med),
            ..Default::default()
        })
        .mark_line(MarkLine {
            symbol: ["none", "none"],
            line_style: LineStyle {
                color: Some(style.down_color.clone()),
                opacity: Some(style.opacity_med),
                ..Default::default()
            },
            data: vec![
                MarkLineItem {
                    name: "lower_bound".to_string(),
                    y_axis: lower,
                },
                MarkLineItem {
                    name: "upper_bound".to_string(),
                    y_axis: upper,
                },
            ],
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{BoundedLine, Rsi};
    use crate::{
        indicator::{Indicator, Ohlcv},
        theme::ChartStyle,
    };

    #[test]
    fn bounded_line_axis() {
        let line = BoundedLine::new("KDJ", vec![10.0, 90.0], 0.0, 100.0, 20.0, 80.0);
        assert_eq!(line.y_axis_min().unwrap().as_str(), "function (value) { return 0; }");
        assert_eq!(line.y_axis_max().unwrap().as_str(), "function (value) { return 100; }");
        assert!(line.y_axis_label().unwrap().as_str().contains("toFixed(0)"));
        assert_eq!(line.color_count(), 1);
    }

    #[test]
    fn bounded_line_series() {
        let style = ChartStyle::default();
        let line = BoundedLine::new("KDJ", vec![10.0, 90.0], 0.0, 100.0, 20.0, 80.0);
        let series = line.render(&Ohlcv::default(), 3, 0, &style);
        assert_eq!(series.len(), 1);

        let value = serde_json::to_value(&series[0]).unwrap();
        assert_eq!(value["xAxisIndex"], 3);
        assert_eq!(value["yAxisIndex"], 3);
        assert_eq!(value["data"], json!([10.0, 90.0]));
        assert_eq!(value["lineStyle"]["color"], style.palette[0].as_str());
        assert_eq!(
            value["markLine"]["data"],
            json!([
                { "name": "lower_bound", "yAxis": 20.0 },
                { "name": "upper_bound", "yAxis": 80.0 },
            ])
        );
    }

    #[test]
    fn rsi_warms_up() {
        let data = Ohlcv {
            closes: vec![1.0, 2.0, 3.0, 4.0],
            ..Default::default()
        };
        let series = Rsi::new(2).render(&data, 2, 0, &ChartStyle::default());
        let value = serde_json::to_value(&series[0]).unwrap();
        assert_eq!(value["name"], "RSI(2)");
        assert_eq!(value["data"], json!([null, null, 100.0, 100.0]));
    }
}
