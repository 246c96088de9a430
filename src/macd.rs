use crate::{
    indicator::{Indicator, Ohlcv},
    options::{DataPoint, ItemStyle, LineStyle, Series, SeriesType},
    ta,
    theme::ChartStyle,
};

/// Moving average convergence/divergence of the closes: the fast/slow EMA
/// difference, its signal EMA and their difference as a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    name: String,
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            name: format!("MACD({},{},{})", fast, slow, signal),
            fast,
            slow,
            signal,
        }
    }

    fn compute(&self, closes: &[f64]) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
        let fast = ta::ema(closes, self.fast);
        let slow = ta::ema(closes, self.slow);
        let macd: Vec<_> = fast
            .into_iter()
            .zip(slow)
            .map(|(f, s)| Some(f? - s?))
            .collect();
        let signal = ta::ema_from(&macd, self.signal);
        (macd, signal)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn color_count(&self) -> usize {
        2
    }

    fn render(
        &self,
        data: &Ohlcv,
        pane: usize,
        color_index: usize,
        style: &ChartStyle,
    ) -> Vec<Series> {
        let (macd, signal) = self.compute(&data.closes);

        let histogram = macd
            .iter()
            .zip(&signal)
            .map(|(&m, &s)| match (m, s) {
                (Some(m), Some(s)) => {
                    let color = if m >= s {
                        &style.up_color
                    } else {
                        &style.down_color
                    };
                    DataPoint::Styled {
                        value: m - s,
                        item_style: ItemStyle {
                            color: Some(color.clone()),
                            opacity: Some(style.opacity_med),
                            ..Default::default()
                        },
                    }
                }
                _ => DataPoint::Value(None),
            })
            .collect();

        let line = |name: &str, values: &[Option<f64>], color_index: usize| {
            Series::line(name, values, pane).line_style(LineStyle {
                color: Some(style.color(color_index).to_string()),
                opacity: Some(style.opacity_heavy),
                ..Default::default()
            })
        };

        vec![
            line("MACD", &macd, color_index),
            line("SIGNAL", &signal, color_index + 1),
            Series::new("HIST", SeriesType::Bar, pane, histogram).bar_width("60%"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::Macd;
    use crate::{
        indicator::{Indicator, Ohlcv},
        options::{DataPoint, Series, SeriesType},
        theme::ChartStyle,
    };

    fn values(series: &Series) -> Vec<Option<f64>> {
        series
            .data
            .iter()
            .map(|p| match p {
                DataPoint::Value(v) => *v,
                DataPoint::Styled { value, .. } => Some(*value),
                DataPoint::Kline(_) => None,
            })
            .collect()
    }

    fn assert_close(actual: &[Option<f64>], expected: &[Option<f64>]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            match (a, e) {
                (Some(a), Some(e)) => assert!((a - e).abs() < 1e-9, "{a} != {e}"),
                (a, e) => assert_eq!(a, e),
            }
        }
    }

    #[test]
    fn macd_series() {
        let style = ChartStyle::default();
        let data = Ohlcv {
            closes: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            ..Default::default()
        };
        let series = Macd::new(1, 2, 2).render(&data, 4, 0, &style);
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|s| s.x_axis_index == 4 && s.y_axis_index == 4));

        // ema(1) is the close itself, ema(2) trails it by half a step
        assert_close(&values(&series[0]), &[None, Some(0.5), Some(0.5), Some(0.5), Some(0.5)]);
        assert_close(&values(&series[1]), &[None, None, Some(0.5), Some(0.5), Some(0.5)]);

        assert_eq!(series[2].kind, SeriesType::Bar);
        assert_close(&values(&series[2]), &[None, None, Some(0.0), Some(0.0), Some(0.0)]);
    }

    #[test]
    fn histogram_colors() {
        let style = ChartStyle::default();
        let data = Ohlcv {
            closes: vec![1.0, 2.0, 4.0, 8.0, 4.0, 1.0],
            ..Default::default()
        };
        let series = Macd::new(1, 2, 2).render(&data, 2, 0, &style);
        let colors: Vec<_> = series[2]
            .data
            .iter()
            .filter_map(|p| match p {
                DataPoint::Styled { item_style, .. } => item_style.color.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[1], style.up_color);
        assert_eq!(colors[3], style.down_color);
    }

    #[test]
    fn default_periods() {
        assert_eq!(Macd::default().name(), "MACD(12,26,9)");
        assert_eq!(Macd::default().color_count(), 2);
    }
}
