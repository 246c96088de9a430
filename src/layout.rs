use crate::theme::ChartStyle;

/// Pixel rectangle of one pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
}

impl GridLayout {
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

/// Number of panes that exist regardless of indicators: price, event, volume.
pub const FIXED_PANES: usize = 3;

pub struct LayoutPlanner<'a> {
    style: &'a ChartStyle,
}

impl<'a> LayoutPlanner<'a> {
    pub fn new(style: &'a ChartStyle) -> Self {
        Self { style }
    }

    /// Plans the vertical stack:
    ///
    /// ```text
    /// ----------------------------------------
    ///   candlestick + overlays           2 units
    ///   events (tail of the above)
    /// ----------------------------------------
    ///   indicator                        1 unit
    ///   ...
    ///   indicator                        1 unit
    /// ----------------------------------------
    ///   volume                           1 unit
    /// ----------------------------------------
    ///   slider
    /// ```
    ///
    /// Non-positive sizes produce degenerate rectangles.
    pub fn plan(&self, width: i32, height: i32, num_indicators: usize) -> Vec<GridLayout> {
        let s = self.style;
        let units = (num_indicators + FIXED_PANES) as i32;
        let unit = (height - s.slider_height - s.top) / units;
        let pane_width = width - s.left - s.right;

        let mut layouts = Vec::with_capacity(num_indicators + FIXED_PANES);
        // candlestick + overlay
        layouts.push(GridLayout {
            top: s.top,
            left: s.left,
            width: pane_width,
            height: unit * 2 - s.event_offset,
        });
        // event
        layouts.push(GridLayout {
            top: s.top + unit * 2 - s.event_offset,
            left: s.left,
            width: pane_width,
            height: s.event_height,
        });
        // indicators, then volume
        let mut top = s.top + unit * 2;
        for _ in 0..=num_indicators {
            layouts.push(GridLayout {
                top: top + s.gap,
                left: s.left,
                width: pane_width,
                height: unit - s.gap,
            });
            top += unit;
        }

        tracing::debug!(unit, panes = layouts.len(), "planned chart layout");
        layouts
    }
}
