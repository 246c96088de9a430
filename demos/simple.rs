use std::error::Error;

use chrono::Utc;

use tachart::{
    BollingerBands, Candle, Config, Event, EventKind, Macd, MovingAverage, Rsi, TaChart, Theme,
};

fn candles() -> Vec<Candle> {
    [
        (1703656020000, 42366.00, 42391.10, 42366.00, 42391.10, 18.2),
        (1703656080000, 42391.10, 42420.00, 42391.09, 42419.99, 21.4),
        (1703656140000, 42420.00, 42429.02, 42414.12, 42429.02, 9.7),
        (1703656200000, 42429.01, 42441.49, 42424.52, 42426.01, 12.1),
        (1703656260000, 42426.01, 42426.01, 42414.36, 42417.98, 8.8),
        (1703656320000, 42417.99, 42441.10, 42415.00, 42441.10, 15.0),
        (1703656380000, 42441.09, 42448.07, 42440.00, 42441.24, 6.3),
        (1703656440000, 42441.24, 42448.07, 42441.23, 42446.62, 7.9),
        (1703656500000, 42446.61, 42449.99, 42432.00, 42432.00, 11.6),
        (1703656560000, 42432.00, 42432.01, 42411.10, 42413.33, 19.5),
        (1703656620000, 42413.33, 42441.67, 42406.01, 42436.01, 14.2),
        (1703656680000, 42436.01, 42436.01, 42425.58, 42427.64, 5.4),
        (1703656740000, 42427.64, 42458.24, 42427.63, 42454.27, 17.3),
        (1703656800000, 42454.28, 42461.65, 42453.04, 42458.83, 10.0),
        (1703656860000, 42458.83, 42470.01, 42458.83, 42470.01, 13.8),
        (1703656920000, 42470.01, 42485.00, 42470.00, 42474.71, 16.1),
    ]
    .iter()
    .filter_map(|&(ts, o, h, l, c, v)| Candle::with_timestamp(ts, &Utc, o, h, l, c, v))
    .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    let candles = candles();
    let events = vec![
        Event::new(candles[4].label(), EventKind::Long).description("breakout above 42420"),
        Event::new(candles[9].label(), EventKind::CloseLong).description("stop hit"),
        Event::new(candles[10].label(), EventKind::Buy),
    ];

    let config = Config::builder()
        .theme(Theme::Vintage)
        .draggable(true)
        .event_desc_wrap_width(200)
        .top(40, "<h2>BTC/USDT 1m</h2>")
        .add_overlay(MovingAverage::sma(&[3, 5]))
        .add_overlay(BollingerBands::new(5, 2.0))
        .add_indicator(Rsi::new(6))
        .add_indicator(Macd::new(3, 6, 3))
        .build();

    TaChart::new(config).gen_static(&candles, &events, "tachart.html")?;
    println!("wrote tachart.html");
    Ok(())
}
