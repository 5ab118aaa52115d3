use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::core::AxisScale;

/// Computes tick values from the scale domain `(min, max)`.
pub type TickValuesFn = Arc<dyn Fn((f64, f64)) -> Vec<f64> + Send + Sync + 'static>;
/// Computes interval ticks from `(min, max, interval_count)`.
pub type TickIntervalFn = Arc<dyn Fn(f64, f64, usize) -> Vec<f64> + Send + Sync + 'static>;

#[derive(Clone)]
pub enum TickValues {
    Explicit(Vec<f64>),
    Function(TickValuesFn),
}

impl fmt::Debug for TickValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(values) => f.debug_tuple("Explicit").field(values).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

#[derive(Clone)]
pub struct TickInterval {
    pub count: usize,
    pub function: Option<TickIntervalFn>,
}

impl fmt::Debug for TickInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickInterval")
            .field("count", &self.count)
            .field("has_function", &self.function.is_some())
            .finish()
    }
}

/// Tick-value policy. When several sources are set, the first match in
/// this order wins: explicit values or value function, interval, natural
/// scale ticks, domain endpoints.
#[derive(Debug, Clone, Default)]
pub struct TickPolicy {
    pub values: Option<TickValues>,
    pub interval: Option<TickInterval>,
    /// Requested count for natural ticks and the scale formatter.
    pub count: Option<usize>,
}

/// Which policy branch produced a tick sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSource {
    Explicit,
    ValueFunction,
    Interval,
    IntervalFunction,
    Natural,
    DomainFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTicks {
    pub values: Vec<f64>,
    pub source: TickSource,
}

/// Produces tick values for `scale` under `policy`.
///
/// Output order is generation order; nothing is sorted or deduplicated.
#[must_use]
pub fn generate_tick_values(
    scale: &dyn AxisScale,
    policy: &TickPolicy,
    flexible: bool,
) -> GeneratedTicks {
    match &policy.values {
        Some(TickValues::Explicit(values)) => {
            return GeneratedTicks {
                values: values.clone(),
                source: TickSource::Explicit,
            };
        }
        Some(TickValues::Function(function)) => {
            return GeneratedTicks {
                values: function(scale.domain()),
                source: TickSource::ValueFunction,
            };
        }
        None => {}
    }

    if let Some(interval) = &policy.interval {
        let (min, max) = scale.domain();
        if let Some(function) = &interval.function {
            return GeneratedTicks {
                values: function(min, max, interval.count),
                source: TickSource::IntervalFunction,
            };
        }
        return GeneratedTicks {
            values: evenly_spaced_ticks(min, max, interval.count),
            source: TickSource::Interval,
        };
    }

    if let Some(values) = scale.ticks(policy.count, flexible) {
        return GeneratedTicks {
            values,
            source: TickSource::Natural,
        };
    }

    let (min, max) = scale.domain();
    let values = if min == max { vec![min] } else { vec![min, max] };
    GeneratedTicks {
        values,
        source: TickSource::DomainFallback,
    }
}

/// `count` values `min, min + step, ...` with `step = (max - min) / count`,
/// exclusive of `max`. Degenerate inputs yield no ticks.
#[must_use]
pub fn evenly_spaced_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() || min == max {
        if count > 0 {
            warn!(min, max, count, "degenerate domain for interval ticks");
        }
        return Vec::new();
    }

    let step = (max - min) / count as f64;
    (0..count).map(|index| min + index as f64 * step).collect()
}
