use ordered_float::OrderedFloat;

mod axis;
mod bounded_line;
mod callback;
mod candle;
mod chart;
mod compose;
mod config;
mod error;
mod event;
mod indicator;
mod layout;
mod macd;
pub mod options;
mod overlay;
mod page;
mod ta;
mod theme;

pub use bounded_line::{BoundedLine, Rsi};
pub use callback::{constant, label_formatter, JsFunc};
pub use candle::{Candle, CandleType};
pub use chart::TaChart;
pub use compose::{compose, Composition};
pub use config::{Config, ConfigBuilder, PageLayout, Settings, DEFAULT_ASSETS_HOST};
pub use error::{Error, Result};
pub use event::{Event, EventKind, EventMark};
pub use indicator::{Indicator, Ohlcv};
pub use layout::{GridLayout, LayoutPlanner};
pub use macd::Macd;
pub use options::ChartSpec;
pub use overlay::{Average, BollingerBands, Line, MovingAverage};
pub use page::Page;
pub use theme::{ChartStyle, Theme};

pub(crate) type Float = OrderedFloat<f64>;
