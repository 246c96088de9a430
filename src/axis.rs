use crate::{
    callback::{label_formatter, Callbacks, JsFunc},
    compose::{EVENT_PANE, FIRST_INDICATOR_PANE, PRICE_PANE},
    indicator::Indicator,
    options::{AxisLabel, Toggle, XAxis, YAxis},
};

const X_SPLIT_NUMBER: u32 = 20;
const INDICATOR_Y_SPLIT_NUMBER: u32 = 2;

/// Builds the x/y axis pair of every pane, index `i` of both lists belonging
/// to grid `i`. Category data is left empty and filled per build.
pub(crate) struct AxisSynthesizer<'a> {
    callbacks: &'a Callbacks,
}

impl<'a> AxisSynthesizer<'a> {
    pub fn new(callbacks: &'a Callbacks) -> Self {
        Self { callbacks }
    }

    pub fn synthesize(&self, indicators: &[Box<dyn Indicator>]) -> (Vec<XAxis>, Vec<YAxis>) {
        let mut x_axes = vec![self.price_x(), hidden_x(EVENT_PANE)];
        let mut y_axes = vec![self.price_y(), hidden_y(EVENT_PANE)];

        for (i, indicator) in indicators.iter().enumerate() {
            let pane = FIRST_INDICATOR_PANE + i;
            x_axes.push(indicator_x(pane));
            y_axes.push(self.indicator_y(pane, indicator.as_ref()));
            tracing::trace!(pane, indicator = indicator.name(), "synthesized indicator axes");
        }

        let volume = FIRST_INDICATOR_PANE + indicators.len();
        x_axes.push(indicator_x(volume));
        y_axes.push(self.volume_y(volume));

        (x_axes, y_axes)
    }

    fn price_x(&self) -> XAxis {
        XAxis {
            show: true,
            grid_index: PRICE_PANE,
            split_number: Some(X_SPLIT_NUMBER),
            ..Default::default()
        }
    }

    fn price_y(&self) -> YAxis {
        YAxis {
            show: true,
            grid_index: PRICE_PANE,
            scale: Some(true),
            split_area: Some(Toggle { show: true }),
            axis_label: Some(bounded_label(self.callbacks.y_label())),
            min: Some(self.callbacks.y_min()),
            max: Some(self.callbacks.y_max()),
            ..Default::default()
        }
    }

    fn indicator_y(&self, pane: usize, indicator: &dyn Indicator) -> YAxis {
        let label = indicator
            .y_axis_label()
            .unwrap_or_else(|| self.callbacks.y_label());
        let min = indicator
            .y_axis_min()
            .unwrap_or_else(|| self.callbacks.y_min());
        let max = indicator
            .y_axis_max()
            .unwrap_or_else(|| self.callbacks.y_max());

        YAxis {
            min: Some(min),
            max: Some(max),
            ..split_y(pane, label)
        }
    }

    fn volume_y(&self, pane: usize) -> YAxis {
        YAxis {
            min: Some(JsFunc::new("0")),
            max: Some(self.callbacks.y_max()),
            ..split_y(pane, label_formatter(0))
        }
    }
}

fn bounded_label(formatter: JsFunc) -> AxisLabel {
    AxisLabel {
        show: true,
        show_min_label: Some(true),
        show_max_label: Some(true),
        formatter: Some(formatter),
    }
}

fn split_y(pane: usize, formatter: JsFunc) -> YAxis {
    YAxis {
        show: true,
        grid_index: pane,
        scale: Some(true),
        split_number: Some(INDICATOR_Y_SPLIT_NUMBER),
        split_line: Some(Toggle { show: true }),
        axis_label: Some(bounded_label(formatter)),
        ..Default::default()
    }
}

fn hidden_x(pane: usize) -> XAxis {
    XAxis {
        show: false,
        grid_index: pane,
        ..Default::default()
    }
}

fn hidden_y(pane: usize) -> YAxis {
    YAxis {
        show: false,
        grid_index: pane,
        ..Default::default()
    }
}

fn indicator_x(pane: usize) -> XAxis {
    XAxis {
        show: true,
        grid_index: pane,
        split_number: Some(X_SPLIT_NUMBER),
        axis_tick: Some(Toggle { show: false }),
        axis_label: Some(AxisLabel {
            show: false,
            ..Default::default()
        }),
        ..Default::default()
    }
}
