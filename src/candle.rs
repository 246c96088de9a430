use core::fmt;

use chrono::{NaiveDateTime, TimeZone};
use ordered_float::OrderedFloat;

use crate::Float;

const LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleType {
    Bearish,
    Bullish,
}

/// One OHLCV observation. The label is the category shown on the x axis and
/// must be unique within a chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candle {
    pub(crate) label: String,
    pub(crate) open: Float,
    pub(crate) high: Float,
    pub(crate) low: Float,
    pub(crate) close: Float,
    pub(crate) volume: Float,
}

impl Candle {
    pub fn new(
        label: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Option<Self> {
        if high >= low {
            Some(Self {
                label: label.into(),
                open: OrderedFloat::from(open),
                high: OrderedFloat::from(high),
                low: OrderedFloat::from(low),
                close: OrderedFloat::from(close),
                volume: OrderedFloat::from(volume),
            })
        } else {
            None
        }
    }

    /// Builds a candle labelled with `timestamp` (unix millis) rendered in
    /// `tz` as `YYYY-mm-dd HH:MM`.
    pub fn with_timestamp<Tz: TimeZone>(
        timestamp: i64,
        tz: &Tz,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Option<Self>
    where
        Tz::Offset: fmt::Display,
    {
        let naive = NaiveDateTime::from_timestamp_millis(timestamp)?;
        let label = tz.from_utc_datetime(&naive).format(LABEL_FORMAT).to_string();
        Self::new(label, open, high, low, close, volume)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn open(&self) -> f64 {
        self.open.into_inner()
    }

    pub fn high(&self) -> f64 {
        self.high.into_inner()
    }

    pub fn low(&self) -> f64 {
        self.low.into_inner()
    }

    pub fn close(&self) -> f64 {
        self.close.into_inner()
    }

    pub fn volume(&self) -> f64 {
        self.volume.into_inner()
    }

    pub fn candle_type(&self) -> CandleType {
        if self.open <= self.close {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }
}
