//! Callback snippets evaluated by the rendering engine at draw time.
//!
//! The snippets are opaque text: templates carry `__NAME__` placeholders that
//! are substituted when a chart is built, and the result is handed to the
//! engine as a function literal inside the option object.

use std::{cell::RefCell, collections::BTreeMap};

use serde::{Serialize, Serializer};

use crate::{
    error::{Error, Result},
    theme::ChartStyle,
};

const PLACEHOLDER: &str = "__tachart_fn";

const DECIMAL_PLACES: &str = "__DECIMAL_PLACES__";
const LOWER_FACTOR: &str = "__LOWER_FACTOR__";
const UPPER_FACTOR: &str = "__UPPER_FACTOR__";
const EVENT_MAP: &str = "__EVENT_MAP__";
const WRAP_DESC: &str = "__WRAP_DESC__";
const WRAP_WIDTH: &str = "__WRAP_WIDTH__";

const TOOLTIP_POSITION: &str = r#"function (pos, params, el, elRect, size) {
    var obj = { top: 10 };
    obj[pos[0] > size.viewSize[0] / 2 ? 'left' : 'right'] = 30;
    return obj;
}"#;

const TOOLTIP_FORMATTER_TPL: &str = r#"function (params) {
    var events = __EVENT_MAP__;
    var fmt = function (v) {
        return v == null || isNaN(v) ? '-' : Number(v).toFixed(__DECIMAL_PLACES__);
    };
    var text = function (sz, txt) {
        return '<span style="display:inline-block;line-height:' + (sz + 2) + 'px;font-size:' + sz + 'px;">' + txt + '</span>';
    };
    var wrap = function (sz, txt, width) {
        return '<span style="display:inline-block;width:' + width + 'px;word-break:break-word;word-wrap:break-word;white-space:pre-wrap;line-height:' + (sz + 2) + 'px;font-size:' + sz + 'px;">' + txt + '</span>';
    };
    var badge = function (sz, sign, color, txt) {
        return '<span style="display:inline;line-height:' + (sz + 2) + 'px;font-size:' + sz + 'px;"><span style="display:inline-block;border-radius:3px;padding:1px 4px;margin-right:10px;background-color:' + color + ';">' + sign + '</span>' + txt + '</span>';
    };

    params.sort(function (a, b) { return a.seriesIndex - b.seriesIndex; });
    var kline = params[0];
    var ret = '<b style="font-size:14px;">' + kline.axisValueLabel + '</b>  [' + kline.dataIndex + ']<br/>';
    ['O', 'C', 'L', 'H'].forEach(function (sign, i) {
        ret += badge(13, sign, kline.color, fmt(kline.value[i + 1])) + '<br/>';
    });
    for (var i = 1; i < params.length; i++) {
        var p = params[i];
        ret += badge(13, p.seriesName, p.color, fmt(p.value)) + '<br/>';
    }

    var desc = events[kline.axisValueLabel];
    if (desc) {
        ret += '<hr>' + (__WRAP_DESC__ ? wrap(13, desc, __WRAP_WIDTH__) : text(13, desc));
    }
    return ret;
}"#;

const MIN_ROUND_TPL: &str = r#"function (value) {
    return (value.min * __LOWER_FACTOR__).toFixed(__DECIMAL_PLACES__);
}"#;

const MAX_ROUND_TPL: &str = r#"function (value) {
    return (value.max * __UPPER_FACTOR__).toFixed(__DECIMAL_PLACES__);
}"#;

const LABEL_FORMATTER_TPL: &str = r#"function (value) {
    return value.toFixed(__DECIMAL_PLACES__);
}"#;

/// A JavaScript expression, usually a function literal, emitted unquoted by
/// [`encode`]. Any other serializer sees the plain source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsFunc(String);

impl JsFunc {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

struct Captured {
    nonce: u32,
    bodies: Vec<String>,
}

thread_local! {
    /// Callbacks met by the [`encode`] running on this thread.
    static CAPTURED: RefCell<Option<Captured>> = const { RefCell::new(None) };
}

fn placeholder_prefix(nonce: u32) -> String {
    format!("{PLACEHOLDER}_{nonce}_")
}

impl Serialize for JsFunc {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let placeholder = CAPTURED.with(|captured| {
            captured.borrow_mut().as_mut().map(|c| {
                c.bodies.push(self.0.clone());
                format!("{}{}", placeholder_prefix(c.nonce), c.bodies.len() - 1)
            })
        });
        serializer.serialize_str(placeholder.as_deref().unwrap_or(&self.0))
    }
}

/// Encodes `value` as JSON with every [`JsFunc`] spliced in as raw script.
///
/// Callbacks are written as numbered placeholders first. The nonce in the
/// placeholder is bumped until no other string of `value` contains it.
pub(crate) fn encode<T: Serialize>(value: &T) -> Result<String> {
    let mut nonce = 0;
    loop {
        CAPTURED.with(|c| {
            *c.borrow_mut() = Some(Captured {
                nonce,
                bodies: Vec::new(),
            })
        });
        let encoded = serde_json::to_string(value);
        let bodies = CAPTURED
            .with(|c| c.borrow_mut().take())
            .map(|c| c.bodies)
            .unwrap_or_default();
        let encoded = encoded?;

        let prefix = placeholder_prefix(nonce);
        if encoded.matches(&prefix).count() == bodies.len() {
            return splice(&encoded, &prefix, &bodies);
        }
        tracing::trace!(nonce, "callback placeholder found in chart text");
        nonce += 1;
    }
}

fn splice(encoded: &str, prefix: &str, bodies: &[String]) -> Result<String> {
    let capacity = encoded.len() + bodies.iter().map(String::len).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    let mut rest = encoded;
    for (i, body) in bodies.iter().enumerate() {
        let token = format!("\"{prefix}{i}\"");
        let start = rest
            .find(&token)
            .ok_or_else(|| Error::InvalidCallback(token.clone()))?;
        out.push_str(&rest[..start]);
        out.push_str(body);
        rest = &rest[start + token.len()..];
    }
    out.push_str(rest);

    Ok(out)
}

fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |acc, &(key, value)| acc.replace(key, value))
}

/// Label formatter rounding axis values to `decimal_places`.
pub fn label_formatter(decimal_places: u32) -> JsFunc {
    let decimal_places = decimal_places.to_string();
    JsFunc(substitute(
        LABEL_FORMATTER_TPL,
        &[(DECIMAL_PLACES, decimal_places.as_str())],
    ))
}

/// A callback returning a fixed value, e.g. a y axis bound.
pub fn constant(value: f64) -> JsFunc {
    let literal = if value.is_finite() {
        value.to_string()
    } else if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    };
    JsFunc(format!("function (value) {{ return {}; }}", literal))
}

/// Callback snippets specialised for one chart's precision and padding.
#[derive(Debug, Clone, PartialEq)]
pub struct Callbacks {
    decimal_places: u32,
    lower_factor: f64,
    upper_factor: f64,
    wrap_width: u32,
}

impl Callbacks {
    pub fn new(decimal_places: u32, wrap_width: u32, style: &ChartStyle) -> Self {
        Self {
            decimal_places,
            lower_factor: 1.0 - style.axis_padding,
            upper_factor: 1.0 + style.axis_padding,
            wrap_width,
        }
    }

    pub fn y_min(&self) -> JsFunc {
        let factor = self.lower_factor.to_string();
        let decimal_places = self.decimal_places.to_string();
        JsFunc(substitute(
            MIN_ROUND_TPL,
            &[
                (LOWER_FACTOR, factor.as_str()),
                (DECIMAL_PLACES, decimal_places.as_str()),
            ],
        ))
    }

    pub fn y_max(&self) -> JsFunc {
        let factor = self.upper_factor.to_string();
        let decimal_places = self.decimal_places.to_string();
        JsFunc(substitute(
            MAX_ROUND_TPL,
            &[
                (UPPER_FACTOR, factor.as_str()),
                (DECIMAL_PLACES, decimal_places.as_str()),
            ],
        ))
    }

    pub fn y_label(&self) -> JsFunc {
        label_formatter(self.decimal_places)
    }

    pub fn tooltip_position(&self) -> JsFunc {
        JsFunc(TOOLTIP_POSITION.to_string())
    }

    /// Tooltip formatter with `events` (label to description) embedded.
    pub fn tooltip_formatter(&self, events: &BTreeMap<String, String>) -> Result<JsFunc> {
        let event_map = serde_json::to_string(events)?;
        let (wrap, width) = match self.wrap_width {
            0 => ("false", "0".to_string()),
            width => ("true", width.to_string()),
        };

        let decimal_places = self.decimal_places.to_string();

        // descriptions are caller text, substitute them last
        Ok(JsFunc(substitute(
            TOOLTIP_FORMATTER_TPL,
            &[
                (DECIMAL_PLACES, decimal_places.as_str()),
                (WRAP_DESC, wrap),
                (WRAP_WIDTH, width.as_str()),
                (EVENT_MAP, event_map.as_str()),
            ],
        )))
    }
}
