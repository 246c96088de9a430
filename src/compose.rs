use std::collections::{BTreeMap, HashMap};

use crate::{
    candle::{Candle, CandleType},
    error::{Error, Result},
    event::Event,
    indicator::{Indicator, Ohlcv},
    options::{DataPoint, ItemStyle, MarkPoint, Series, SeriesType},
    theme::ChartStyle,
};

pub const PRICE_PANE: usize = 0;
pub const EVENT_PANE: usize = 1;
/// Pane of the first indicator; later indicators and the volume follow.
pub const FIRST_INDICATOR_PANE: usize = 2;

const BAR_WIDTH: &str = "60%";

/// Series of one chart build in draw order, with the x categories they share.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub x_axis: Vec<String>,
    pub series: Vec<Series>,
    /// label to descriptions of its events, for the tooltip
    pub event_descriptions: BTreeMap<String, String>,
}

/// Builds the kline, overlay, event, indicator and volume series in that
/// order. Fails before building anything when two candles share a label.
pub fn compose(
    candles: &[Candle],
    events: &[Event],
    overlays: &[Box<dyn Indicator>],
    indicators: &[Box<dyn Indicator>],
    style: &ChartStyle,
) -> Result<Composition> {
    let mut lookup = HashMap::with_capacity(candles.len());
    for candle in candles {
        if lookup.insert(candle.label(), candle).is_some() {
            return Err(Error::DuplicateLabel(candle.label().to_string()));
        }
    }

    let x_axis: Vec<String> = candles.iter().map(|c| c.label().to_string()).collect();
    let data = Ohlcv::from_candles(candles);

    let mut series = Vec::with_capacity(overlays.len() + indicators.len() + 3);
    series.push(kline_series(candles, style));

    let mut color_index = 0;
    for overlay in overlays {
        series.extend(overlay.render(&data, PRICE_PANE, color_index, style));
        color_index += overlay.color_count();
    }

    let known: Vec<&Event> = events
        .iter()
        .filter(|e| {
            let known = lookup.contains_key(e.label.as_str());
            if !known {
                tracing::debug!(label = %e.label, "skipping event without candle");
            }
            known
        })
        .collect();
    series.push(event_series(&known));

    for (i, indicator) in indicators.iter().enumerate() {
        series.extend(indicator.render(&data, FIRST_INDICATOR_PANE + i, 0, style));
    }

    series.push(volume_series(
        candles,
        FIRST_INDICATOR_PANE + indicators.len(),
        style,
    ));

    tracing::debug!(
        candles = candles.len(),
        events = known.len(),
        series = series.len(),
        "composed chart series"
    );

    Ok(Composition {
        x_axis,
        series,
        event_descriptions: event_descriptions(&known),
    })
}

fn kline_series(candles: &[Candle], style: &ChartStyle) -> Series {
    let data = candles
        .iter()
        .map(|c| DataPoint::Kline([c.open(), c.close(), c.low(), c.high()]))
        .collect();

    Series::new("kline", SeriesType::Candlestick, PRICE_PANE, data)
        .bar_width(BAR_WIDTH)
        .item_style(ItemStyle {
            color: Some(style.up_color.clone()),
            color0: Some(style.down_color.clone()),
            border_color: Some(style.up_color.clone()),
            border_color0: Some(style.down_color.clone()),
            opacity: Some(style.opacity_heavy),
        })
}

fn event_series(events: &[&Event]) -> Series {
    Series::new("events", SeriesType::Bar, EVENT_PANE, Vec::new())
        .bar_width(BAR_WIDTH)
        .mark_point(MarkPoint {
            data: events.iter().map(|e| e.marker()).collect(),
        })
}

fn volume_series(candles: &[Candle], pane: usize, style: &ChartStyle) -> Series {
    let data = candles
        .iter()
        .map(|c| {
            let color = match c.candle_type() {
                CandleType::Bullish => &style.up_color,
                CandleType::Bearish => &style.down_color,
            };
            DataPoint::Styled {
                value: c.volume(),
                item_style: ItemStyle {
                    color: Some(color.clone()),
                    opacity: Some(style.opacity_heavy),
                    ..Default::default()
                },
            }
        })
        .collect();

    Series::new("Vol", SeriesType::Bar, pane, data).bar_width(BAR_WIDTH)
}

fn event_descriptions(events: &[&Event]) -> BTreeMap<String, String> {
    let mut descriptions: BTreeMap<String, String> = BTreeMap::new();
    for event in events {
        let Some(description) = &event.description else {
            continue;
        };
        descriptions
            .entry(event.label.clone())
            .and_modify(|acc| {
                acc.push_str("<br/>");
                acc.push_str(description);
            })
            .or_insert_with(|| description.clone());
    }
    descriptions
}
