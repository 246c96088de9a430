use itertools::Itertools;

use crate::{
    callback::JsFunc,
    candle::Candle,
    options::{px, Series, TextStyle, Title},
    theme::ChartStyle,
};

/// Column view of the candles of one chart build.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Ohlcv {
    pub opens: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub closes: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl Ohlcv {
    pub fn from_candles(candles: &[Candle]) -> Self {
        let (opens, highs, lows, closes, volumes) = candles
            .iter()
            .map(|c| (c.open(), c.high(), c.low(), c.close(), c.volume()))
            .multiunzip();

        Self {
            opens,
            highs,
            lows,
            closes,
            volumes,
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

/// A plugin drawing series either on the price pane (as an overlay) or on a
/// pane of its own (as an indicator).
///
/// Implementations must be pure: the same input always yields the same
/// series and titles.
pub trait Indicator: Send + Sync {
    fn name(&self) -> &str;

    /// Label formatter of the indicator's y axis. `None` falls back to the
    /// chart precision.
    fn y_axis_label(&self) -> Option<JsFunc> {
        None
    }

    fn y_axis_min(&self) -> Option<JsFunc> {
        None
    }

    fn y_axis_max(&self) -> Option<JsFunc> {
        None
    }

    /// Number of palette entries consumed, starting at the color index
    /// passed to [`Indicator::titles`] and [`Indicator::render`].
    fn color_count(&self) -> usize {
        1
    }

    fn titles(&self, top: i32, left: i32, color_index: usize, style: &ChartStyle) -> Vec<Title> {
        vec![title(self.name(), top, left, Some(style.color(color_index)), style)]
    }

    fn render(
        &self,
        data: &Ohlcv,
        pane: usize,
        color_index: usize,
        style: &ChartStyle,
    ) -> Vec<Series>;
}

pub(crate) fn title(
    text: &str,
    top: i32,
    left: i32,
    color: Option<&str>,
    style: &ChartStyle,
) -> Title {
    Title {
        text: text.to_string(),
        left: px(left),
        top: px(top),
        text_style: TextStyle {
            color: color.map(String::from),
            font_size: Some(style.label_font_size),
        },
    }
}

/// Approximate pixel width of a title, used to lay out titles side by side.
pub(crate) fn title_width(text: &str, style: &ChartStyle) -> i32 {
    text.chars().count() as i32 * style.label_font_size as i32 * 2 / 3 + 10
}

#[cfg(test)]
mod tests {
    use super::{title, Ohlcv};
    use crate::{candle::Candle, theme::ChartStyle};

    #[test]
    fn columns_follow_input_order() {
        let candles = vec![
            Candle::new("a", 1.0, 4.0, 0.5, 2.0, 100.0).unwrap(),
            Candle::new("b", 2.0, 5.0, 1.5, 3.0, 200.0).unwrap(),
        ];
        let data = Ohlcv::from_candles(&candles);
        assert_eq!(data.opens, vec![1.0, 2.0]);
        assert_eq!(data.highs, vec![4.0, 5.0]);
        assert_eq!(data.lows, vec![0.5, 1.5]);
        assert_eq!(data.closes, vec![2.0, 3.0]);
        assert_eq!(data.volumes, vec![100.0, 200.0]);
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn uncolored_title() {
        let style = ChartStyle::default();
        let title = title("Vol", 95, 85, None, &style);
        assert_eq!(title.left, "85px");
        assert_eq!(title.top, "95px");
        assert_eq!(title.text_style.color, None);
        assert_eq!(title.text_style.font_size, Some(11));
    }
}
