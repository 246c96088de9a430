//! Series math for the bundled overlays and indicators. Every function
//! returns one slot per input value; slots without enough history are `None`.

pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let mut sum = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            sum += v;
            if i >= period {
                sum -= values[i - period];
            }
            (i + 1 >= period).then(|| sum / period as f64)
        })
        .collect()
}

/// Exponential moving average seeded with the simple average of the first
/// `period` values.
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut result = vec![None; period - 1];
    let mut prev = values[..period].iter().sum::<f64>() / period as f64;
    result.push(Some(prev));
    for v in &values[period..] {
        prev = alpha * v + (1.0 - alpha) * prev;
        result.push(Some(prev));
    }
    result
}

/// [`ema`] over a series with leading gaps.
pub fn ema_from(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let skip = values.iter().take_while(|v| v.is_none()).count();
    let defined: Vec<f64> = values[skip..].iter().map(|v| v.unwrap_or(f64::NAN)).collect();

    let mut result = vec![None; skip];
    result.extend(ema(&defined, period));
    result
}

/// Population standard deviation over a sliding window.
pub fn std_dev(values: &[f64], period: usize) -> Vec<Option<f64>> {
    sma(values, period)
        .into_iter()
        .enumerate()
        .map(|(i, mean)| {
            mean.map(|mean| {
                let window = &values[i + 1 - period..=i];
                let var = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
                var.sqrt()
            })
        })
        .collect()
}

/// Relative strength index with Wilder smoothing.
pub fn rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() <= period {
        return result;
    }

    let change = |i: usize| values[i] - values[i - 1];
    let (mut gain, mut loss) = (1..=period).fold((0.0, 0.0), |(g, l), i| {
        let c = change(i);
        (g + c.max(0.0), l + (-c).max(0.0))
    });
    gain /= period as f64;
    loss /= period as f64;

    let strength = |gain: f64, loss: f64| {
        if loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + gain / loss)
        }
    };

    result[period] = Some(strength(gain, loss));
    for i in period + 1..values.len() {
        let c = change(i);
        gain = (gain * (period - 1) as f64 + c.max(0.0)) / period as f64;
        loss = (loss * (period - 1) as f64 + (-c).max(0.0)) / period as f64;
        result[i] = Some(strength(gain, loss));
    }
    result
}
