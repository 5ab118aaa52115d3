use std::fmt;
use std::sync::Arc;

use crate::error::{AxisError, AxisResult};

/// Formats one tick value into label text.
///
/// `None` (or an empty string) renders as an empty label.
pub type TickLabelFormatterFn = Arc<dyn Fn(f64) -> Option<String> + Send + Sync + 'static>;

/// Tick count used by [`LinearScale::ticks`] when the caller does not request one.
pub const DEFAULT_TICK_COUNT: usize = 10;
/// Minimum pixel distance between natural ticks when flexible ticks are requested.
pub const FLEX_TICK_MIN_SPACING_PX: f64 = 40.0;

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Bidirectional mapping between domain values and pixel coordinates.
///
/// The chart container owns scales; axes only read them.
pub trait AxisScale {
    fn apply(&self, value: f64) -> f64;

    fn invert(&self, pixel: f64) -> f64;

    /// Domain endpoints in scale order.
    fn domain(&self) -> (f64, f64);

    /// Pixel range endpoints in scale order.
    fn range(&self) -> (f64, f64);

    /// Natural tick suggestion. `flexible` allows returning more or fewer
    /// ticks than requested when that reads better.
    ///
    /// Scales without a natural tick function return `None`.
    fn ticks(&self, _count: Option<usize>, _flexible: bool) -> Option<Vec<f64>> {
        None
    }

    /// Native label formatter matching the natural ticks.
    fn tick_format(&self, _count: Option<usize>) -> Option<TickLabelFormatterFn> {
        None
    }
}

/// Continuous linear scale with "nice" 1/2/5 tick steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// Degenerate (zero-length) domains and ranges are accepted; they map to
    /// the midpoint of the other side.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> AxisResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(AxisError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(AxisError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn with_range(self, range_start: f64, range_end: f64) -> Self {
        Self {
            range_start,
            range_end,
            ..self
        }
    }

    fn effective_tick_count(&self, count: Option<usize>, flexible: bool) -> usize {
        let requested = count.unwrap_or(DEFAULT_TICK_COUNT);
        if !flexible {
            return requested;
        }
        let span_px = (self.range_end - self.range_start).abs();
        let spacing_cap = (span_px / FLEX_TICK_MIN_SPACING_PX).floor() as usize;
        requested.min(spacing_cap.max(2))
    }
}

impl AxisScale for LinearScale {
    fn apply(&self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    fn invert(&self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (pixel - self.range_start) / span
        };
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    fn ticks(&self, count: Option<usize>, flexible: bool) -> Option<Vec<f64>> {
        let count = self.effective_tick_count(count, flexible);
        Some(nice_ticks(self.domain_start, self.domain_end, count))
    }

    fn tick_format(&self, count: Option<usize>) -> Option<TickLabelFormatterFn> {
        let count = count.unwrap_or(DEFAULT_TICK_COUNT);
        let precision = tick_step(self.domain_start, self.domain_end, count)
            .map(precision_for_step)
            .unwrap_or(0);
        Some(Arc::new(move |value: f64| {
            Some(format!("{value:.prec$}", prec = usize::from(precision)))
        }))
    }
}

impl fmt::Display for LinearScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "linear[{}, {}] -> [{}, {}]",
            self.domain_start, self.domain_end, self.range_start, self.range_end
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct TickSpan {
    first: i64,
    last: i64,
    // Negative values encode a fractional step as `1 / -increment`.
    increment: f64,
}

fn tick_span(start: f64, stop: f64, count: f64) -> TickSpan {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut first, mut last, increment) = if power < 0.0 {
        let increment = 10f64.powf(-power) / factor;
        let mut first = (start * increment).round();
        let mut last = (stop * increment).round();
        if first / increment < start {
            first += 1.0;
        }
        if last / increment > stop {
            last -= 1.0;
        }
        (first, last, -increment)
    } else {
        let increment = 10f64.powf(power) * factor;
        let mut first = (start / increment).round();
        let mut last = (stop / increment).round();
        if first * increment < start {
            first += 1.0;
        }
        if last * increment > stop {
            last -= 1.0;
        }
        (first, last, increment)
    };

    if last < first && (0.5..2.0).contains(&count) {
        return tick_span(start, stop, count * 2.0);
    }
    if !first.is_finite() || !last.is_finite() {
        first = 0.0;
        last = -1.0;
    }
    TickSpan {
        first: first as i64,
        last: last as i64,
        increment,
    }
}

/// Nice, evenly stepped ticks covering `[start, stop]` in domain order.
pub(crate) fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let span = if reverse {
        tick_span(stop, start, count as f64)
    } else {
        tick_span(start, stop, count as f64)
    };
    if span.last < span.first {
        return Vec::new();
    }

    let value_at = |index: i64| {
        if span.increment < 0.0 {
            index as f64 / -span.increment
        } else {
            index as f64 * span.increment
        }
    };
    let n = span.last - span.first + 1;
    (0..n)
        .map(|i| {
            if reverse {
                value_at(span.last - i)
            } else {
                value_at(span.first + i)
            }
        })
        .collect()
}

fn tick_step(start: f64, stop: f64, count: usize) -> Option<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() || start == stop {
        return None;
    }
    let (low, high) = if stop < start {
        (stop, start)
    } else {
        (start, stop)
    };
    let span = tick_span(low, high, count as f64);
    let step = if span.increment < 0.0 {
        1.0 / -span.increment
    } else {
        span.increment
    };
    (step.is_finite() && step > 0.0).then_some(step)
}

fn precision_for_step(step: f64) -> u8 {
    let digits = -step.log10().floor();
    if digits <= 0.0 {
        0
    } else {
        digits.min(12.0) as u8
    }
}
