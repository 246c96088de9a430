//! Plugins meant for the price pane.

use crate::{
    indicator::{title, title_width, Indicator, Ohlcv},
    options::{LineStyle, Series, Title},
    ta,
    theme::ChartStyle,
};

fn styled_line(
    name: &str,
    values: &[Option<f64>],
    pane: usize,
    color_index: usize,
    style: &ChartStyle,
) -> Series {
    Series::line(name, values, pane).line_style(LineStyle {
        color: Some(style.color(color_index).to_string()),
        opacity: Some(style.opacity_med),
        ..Default::default()
    })
}

/// Arbitrary caller-supplied values, one slot per candle.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    name: String,
    values: Vec<Option<f64>>,
}

impl Line {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

impl Indicator for Line {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(
        &self,
        _: &Ohlcv,
        pane: usize,
        color_index: usize,
        style: &ChartStyle,
    ) -> Vec<Series> {
        vec![styled_line(&self.name, &self.values, pane, color_index, style)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Average {
    Simple,
    Exponential,
}

/// Moving averages of the closes, one line and one palette entry per period.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverage {
    name: String,
    average: Average,
    periods: Vec<usize>,
}

impl MovingAverage {
    pub fn new(average: Average, periods: &[usize]) -> Self {
        let name = match average {
            Average::Simple => "SMA",
            Average::Exponential => "EMA",
        };
        Self {
            name: name.to_string(),
            average,
            periods: periods.to_vec(),
        }
    }

    pub fn sma(periods: &[usize]) -> Self {
        Self::new(Average::Simple, periods)
    }

    pub fn ema(periods: &[usize]) -> Self {
        Self::new(Average::Exponential, periods)
    }

    fn line_name(&self, period: usize) -> String {
        format!("{}{}", self.name, period)
    }
}

impl Indicator for MovingAverage {
    fn name(&self) -> &str {
        &self.name
    }

    fn color_count(&self) -> usize {
        self.periods.len()
    }

    /// One title per period, side by side.
    fn titles(&self, top: i32, left: i32, color_index: usize, style: &ChartStyle) -> Vec<Title> {
        let mut left = left;
        self.periods
            .iter()
            .enumerate()
            .map(|(i, &period)| {
                let text = self.line_name(period);
                let item = title(&text, top, left, Some(style.color(color_index + i)), style);
                left += title_width(&text, style);
                item
            })
            .collect()
    }

    fn render(
        &self,
        data: &Ohlcv,
        pane: usize,
        color_index: usize,
        style: &ChartStyle,
    ) -> Vec<Series> {
        self.periods
            .iter()
            .enumerate()
            .map(|(i, &period)| {
                let values = match self.average {
                    Average::Simple => ta::sma(&data.closes, period),
                    Average::Exponential => ta::ema(&data.closes, period),
                };
                styled_line(&self.line_name(period), &values, pane, color_index + i, style)
            })
            .collect()
    }
}

/// Middle, upper and lower Bollinger bands of the closes.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    name: String,
    period: usize,
    width: f64,
}

impl BollingerBands {
    pub fn new(period: usize, width: f64) -> Self {
        Self {
            name: format!("BOLL({},{})", period, width),
            period,
            width,
        }
    }
}

impl Indicator for BollingerBands {
    fn name(&self) -> &str {
        &self.name
    }

    fn color_count(&self) -> usize {
        3
    }

    fn render(
        &self,
        data: &Ohlcv,
        pane: usize,
        color_index: usize,
        style: &ChartStyle,
    ) -> Vec<Series> {
        let middle = ta::sma(&data.closes, self.period);
        let deviation = ta::std_dev(&data.closes, self.period);
        let band = |sign: f64| -> Vec<Option<f64>> {
            middle
                .iter()
                .zip(&deviation)
                .map(|(&m, &d)| Some(m? + sign * self.width * d?))
                .collect()
        };

        vec![
            styled_line("MID", &middle, pane, color_index, style),
            styled_line("UPPER", &band(1.0), pane, color_index + 1, style),
            styled_line("LOWER", &band(-1.0), pane, color_index + 2, style),
        ]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{BollingerBands, Line, MovingAverage};
    use crate::{
        indicator::{Indicator, Ohlcv},
        theme::ChartStyle,
    };

    fn closes(values: &[f64]) -> Ohlcv {
        Ohlcv {
            closes: values.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn moving_average_lines() {
        let style = ChartStyle::default();
        let ma = MovingAverage::sma(&[2, 3]);
        assert_eq!(ma.color_count(), 2);

        let series = ma.render(&closes(&[1.0, 2.0, 3.0]), 0, 1, &style);
        let names: Vec<_> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["SMA2", "SMA3"]);
        assert!(series.iter().all(|s| s.x_axis_index == 0 && s.y_axis_index == 0));

        let value = serde_json::to_value(&series).unwrap();
        assert_eq!(value[0]["data"], json!([null, 1.5, 2.5]));
        assert_eq!(value[1]["data"], json!([null, null, 2.0]));
        assert_eq!(value[0]["lineStyle"]["color"], style.color(1));
        assert_eq!(value[1]["lineStyle"]["color"], style.color(2));
    }

    #[test]
    fn moving_average_titles_side_by_side() {
        let style = ChartStyle::default();
        let titles = MovingAverage::ema(&[5, 10]).titles(15, 85, 2, &style);
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].text, "EMA5");
        assert_eq!(titles[0].left, "85px");
        // 4 chars * 11 * 2 / 3 + 10
        assert_eq!(titles[1].left, "124px");
        assert_eq!(titles[1].top, "15px");
        assert_eq!(titles[1].text_style.color.as_deref(), Some(style.color(3)));
    }

    #[test]
    fn bollinger_bands() {
        let style = ChartStyle::default();
        let bands = BollingerBands::new(2, 2.0);
        assert_eq!(bands.name(), "BOLL(2,2)");

        let series = bands.render(&closes(&[1.0, 3.0, 3.0]), 0, 0, &style);
        let value = serde_json::to_value(&series).unwrap();
        assert_eq!(value[0]["data"], json!([null, 2.0, 3.0]));
        assert_eq!(value[1]["data"], json!([null, 4.0, 3.0]));
        assert_eq!(value[2]["data"], json!([null, 0.0, 3.0]));
    }

    #[test]
    fn plain_line_keeps_gaps() {
        let line = Line::new("signal", vec![Some(1.0), None]);
        let series = line.render(&Ohlcv::default(), 0, 0, &ChartStyle::default());
        assert_eq!(serde_json::to_value(&series[0]).unwrap()["data"], json!([1.0, null]));
    }
}
