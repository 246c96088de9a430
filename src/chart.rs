use std::{fs, io::Write, path::Path};

use crate::{
    axis::AxisSynthesizer,
    callback::Callbacks,
    candle::Candle,
    compose::compose,
    config::Config,
    error::Result,
    event::Event,
    indicator::title,
    layout::{GridLayout, LayoutPlanner},
    options::{
        px, AxisPointer, AxisPointerLink, ChartSpec, DataZoom, Grid, Title, Tooltip, XAxis,
        YAxis,
    },
    page::Page,
};

const TITLE_OFFSET: i32 = 5;

/// A configured candlestick chart. Everything that does not depend on the
/// candles is computed once here; [`TaChart::build`] only adds the series.
pub struct TaChart {
    config: Config,
    callbacks: Callbacks,
    titles: Vec<Title>,
    grids: Vec<Grid>,
    x_axes: Vec<XAxis>,
    y_axes: Vec<YAxis>,
    data_zoom: Vec<DataZoom>,
}

impl TaChart {
    pub fn new(config: Config) -> Self {
        let settings = &config.settings;
        let style = &settings.style;

        let layouts = LayoutPlanner::new(style).plan(
            settings.layout.chart_width,
            settings.layout.chart_height,
            config.indicators.len(),
        );

        let callbacks = Callbacks::new(settings.precision, settings.event_desc_wrap_width, style);
        let (x_axes, y_axes) = AxisSynthesizer::new(&callbacks).synthesize(&config.indicators);

        let titles = titles(&config, &layouts);
        let grids = layouts
            .iter()
            .map(|l| Grid {
                left: px(l.left),
                top: px(l.top),
                width: px(l.width),
                height: px(l.height),
            })
            .collect();

        let axis_indices: Vec<usize> = (0..x_axes.len()).collect();
        let mut data_zoom = vec![DataZoom {
            kind: "slider".to_string(),
            start: 50.0,
            end: 100.0,
            x_axis_index: axis_indices.clone(),
        }];
        if settings.draggable {
            data_zoom.push(DataZoom {
                kind: "inside".to_string(),
                start: 50.0,
                end: 100.0,
                x_axis_index: axis_indices,
            });
        }

        Self {
            config,
            callbacks,
            titles,
            grids,
            x_axes,
            y_axes,
            data_zoom,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Assembles the option object for `candles` and `events`.
    pub fn build(&self, candles: &[Candle], events: &[Event]) -> Result<ChartSpec> {
        let composition = compose(
            candles,
            events,
            &self.config.overlays,
            &self.config.indicators,
            &self.config.settings.style,
        )?;

        let x_axis = self
            .x_axes
            .iter()
            .map(|axis| XAxis {
                data: composition.x_axis.clone(),
                ..axis.clone()
            })
            .collect();

        Ok(ChartSpec {
            title: self.titles.clone(),
            tooltip: Tooltip {
                show: true,
                trigger: "axis".to_string(),
                trigger_on: "mousemove|click".to_string(),
                position: self.callbacks.tooltip_position(),
                formatter: self
                    .callbacks
                    .tooltip_formatter(&composition.event_descriptions)?,
            },
            axis_pointer: AxisPointer {
                kind: "line".to_string(),
                snap: true,
                link: vec![AxisPointerLink {
                    x_axis_index: "all".to_string(),
                }],
            },
            grid: self.grids.clone(),
            x_axis,
            y_axis: self.y_axes.clone(),
            data_zoom: self.data_zoom.clone(),
            series: composition.series,
        })
    }

    fn page(&self, candles: &[Candle], events: &[Event]) -> Result<Page> {
        let spec = self.build(candles, events)?;
        let settings = &self.config.settings;

        let page = Page::new(settings.assets_host.as_str())
            .layout(settings.layout.clone())
            .background_color(settings.theme.page_background())
            .add_chart(
                &spec,
                settings.theme,
                settings.layout.chart_width,
                settings.layout.chart_height,
            )?
            .add_scripts(settings.js_funcs.iter().cloned());
        Ok(page)
    }

    /// Writes the HTML page to `writer`. Nothing is written when the chart
    /// cannot be built.
    pub fn render<W: Write>(&self, candles: &[Candle], events: &[Event], writer: W) -> Result<()> {
        self.page(candles, events)?.render(writer)
    }

    /// Writes the HTML page to `path`. The file is only created once the page
    /// has been rendered.
    pub fn gen_static(
        &self,
        candles: &[Candle],
        events: &[Event],
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let mut html = Vec::new();
        self.render(candles, events, &mut html)?;
        fs::write(path, html)?;
        Ok(())
    }
}

fn titles(config: &Config, layouts: &[GridLayout]) -> Vec<Title> {
    let style = &config.settings.style;
    let mut titles = Vec::new();

    let price = &layouts[0];
    let mut top = price.top - TITLE_OFFSET;
    let mut color_index = 0;
    for overlay in &config.overlays {
        titles.extend(overlay.titles(top, price.left + TITLE_OFFSET, color_index, style));
        top += style.label_font_height;
        color_index += overlay.color_count();
    }

    let names = config
        .indicators
        .iter()
        .map(|i| i.name())
        .chain(std::iter::once("Vol"));
    for (name, layout) in names.zip(&layouts[2..]) {
        titles.push(title(
            name,
            layout.top - TITLE_OFFSET,
            layout.left + TITLE_OFFSET,
            None,
            style,
        ));
    }

    titles
}

#[cfg(test)]
pub(crate) mod tests {
    use super::TaChart;
    use crate::{
        candle::Candle,
        config::Config,
        error::Error,
        event::{Event, EventKind},
        options::ChartSpec,
        overlay::{BollingerBands, MovingAverage},
        Macd, Rsi,
    };

    pub(crate) fn candles() -> Vec<Candle> {
        [
            (42366.00, 42391.10, 42366.00, 42391.10, 12.5),
            (42391.10, 42420.00, 42391.09, 42419.99, 8.0),
            (42420.00, 42429.02, 42414.12, 42429.02, 3.25),
            (42429.01, 42441.49, 42424.52, 42426.01, 7.75),
            (42426.01, 42426.01, 42414.36, 42417.98, 4.0),
        ]
        .iter()
        .enumerate()
        .map(|(i, &(o, h, l, c, v))| Candle::new(format!("10:0{i}"), o, h, l, c, v).unwrap())
        .collect()
    }

    pub(crate) fn sample_spec() -> ChartSpec {
        TaChart::new(Config::default()).build(&candles(), &[]).unwrap()
    }

    #[test]
    fn grids_follow_layout() {
        let spec = sample_spec();
        assert_eq!(spec.grid.len(), 3);
        assert_eq!(spec.grid[0].top, "20px");
        assert_eq!(spec.grid[0].left, "80px");
        assert_eq!(spec.grid[0].width, "1080px");
        assert_eq!(spec.grid[0].height, "432px");
        assert_eq!(spec.grid[2].top, "502px");
        assert_eq!(spec.grid[2].height, "211px");
    }

    #[test]
    fn every_x_axis_carries_the_labels() {
        let spec = sample_spec();
        let labels: Vec<_> = candles().iter().map(|c| c.label().to_string()).collect();
        assert_eq!(spec.x_axis.len(), spec.y_axis.len());
        assert!(spec.x_axis.iter().all(|x| x.data == labels));
    }

    #[test]
    fn zoom_and_pointer() {
        let spec = sample_spec();
        assert_eq!(spec.data_zoom.len(), 1);
        assert_eq!(spec.data_zoom[0].kind, "slider");
        assert_eq!(spec.data_zoom[0].x_axis_index, vec![0, 1, 2]);
        assert_eq!(spec.axis_pointer.link[0].x_axis_index, "all");

        let draggable = TaChart::new(Config::builder().draggable(true).build())
            .build(&candles(), &[])
            .unwrap();
        assert_eq!(draggable.data_zoom.len(), 2);
        assert_eq!(draggable.data_zoom[1].kind, "inside");
        assert_eq!(draggable.data_zoom[1].x_axis_index, vec![0, 1, 2]);
    }

    #[test]
    fn titles() {
        let config = Config::builder()
            .add_overlay(MovingAverage::sma(&[5]))
            .add_overlay(BollingerBands::new(20, 2.0))
            .add_indicator(Rsi::new(14))
            .add_indicator(Macd::default())
            .build();
        let palette = config.settings().style.palette.clone();
        let spec = TaChart::new(config).build(&candles(), &[]).unwrap();

        let texts: Vec<_> = spec.title.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["SMA5", "BOLL(20,2)", "RSI(14)", "MACD(12,26,9)", "Vol"]);

        assert_eq!(spec.title[0].top, "15px");
        assert_eq!(spec.title[0].left, "85px");
        assert_eq!(spec.title[1].top, "30px");
        assert_eq!(spec.title[0].text_style.color.as_ref(), Some(&palette[0]));
        assert_eq!(spec.title[1].text_style.color.as_ref(), Some(&palette[1]));

        for (title, grid) in spec.title[2..].iter().zip(&spec.grid[2..]) {
            let top: i32 = grid.top.trim_end_matches("px").parse().unwrap();
            assert_eq!(title.top, format!("{}px", top - 5));
            assert!(title.text_style.color.is_none());
        }
    }

    #[test]
    fn tooltip_lists_event_descriptions() {
        let events = vec![Event::new("10:02", EventKind::Buy).description("entry </script>")];
        let spec = TaChart::new(Config::default())
            .build(&candles(), &events)
            .unwrap();
        let formatter = spec.tooltip.formatter.as_str();
        assert!(formatter.contains(r#""10:02":"entry </script>""#));
        assert_eq!(spec.tooltip.trigger_on, "mousemove|click");
    }

    #[test]
    fn render_is_deterministic() {
        let chart = TaChart::new(
            Config::builder()
                .add_overlay(MovingAverage::ema(&[2, 3]))
                .add_indicator(Rsi::new(2))
                .build(),
        );
        let events = vec![
            Event::new("10:01", EventKind::Long).description("a"),
            Event::new("10:03", EventKind::CloseLong).description("b"),
        ];

        let mut first = Vec::new();
        let mut second = Vec::new();
        chart.render(&candles(), &events, &mut first).unwrap();
        chart.render(&candles(), &events, &mut second).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_label_writes_nothing() {
        let mut candles = candles();
        candles.push(candles[0].clone());

        let mut out = Vec::new();
        let result = TaChart::new(Config::default()).render(&candles, &[], &mut out);
        assert!(matches!(result, Err(Error::DuplicateLabel(label)) if label == "10:00"));
        assert!(out.is_empty());
    }

    #[test]
    fn labels_resembling_callbacks_stay_text() {
        let candles: Vec<_> = ["a", "__f__", "__f__alert(1)__f__", "__tachart_fn_0_0"]
            .iter()
            .map(|&label| Candle::new(label, 1.0, 2.0, 0.5, 1.5, 10.0).unwrap())
            .collect();
        let events = vec![Event::new("__f__", EventKind::Buy)];

        let mut out = Vec::new();
        TaChart::new(Config::default())
            .render(&candles, &events, &mut out)
            .unwrap();
        let html = String::from_utf8(out).unwrap();

        assert!(html.contains(r#"["a","__f__","__f__alert(1)__f__","__tachart_fn_0_0"]"#));
        assert!(!html.contains(",alert(1)"));
        assert!(html.contains("function (value)"));
    }

    #[test]
    fn chart_is_shareable() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<TaChart>();
    }
}
