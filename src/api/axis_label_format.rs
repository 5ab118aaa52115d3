use std::sync::Arc;

use chrono::DateTime;
use chrono::format::{Item, StrftimeItems};

use crate::core::{AxisScale, TickLabelFormatterFn};
use crate::error::{AxisError, AxisResult};

use super::AxisStyle;

/// Formats values with a fixed number of decimals.
#[must_use]
pub fn fixed_decimals_formatter(precision: u8) -> TickLabelFormatterFn {
    Arc::new(move |value: f64| {
        value
            .is_finite()
            .then(|| format!("{value:.prec$}", prec = usize::from(precision)))
    })
}

/// Formats unix-second timestamps in UTC with a `strftime` pattern.
///
/// Out-of-range timestamps render as empty labels.
pub fn utc_timestamp_formatter(pattern: impl Into<String>) -> AxisResult<TickLabelFormatterFn> {
    let pattern: String = pattern.into();
    if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
        return Err(AxisError::InvalidConfig(format!(
            "invalid timestamp pattern `{pattern}`"
        )));
    }

    Ok(Arc::new(move |seconds: f64| {
        if !seconds.is_finite() {
            return None;
        }
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * 1_000_000_000.0).round().min(999_999_999.0) as u32;
        DateTime::from_timestamp(whole as i64, nanos)
            .map(|time| time.format(&pattern).to_string())
    }))
}

/// Explicit formatter, else the scale's native formatter, else raw value text.
#[must_use]
pub fn resolve_tick_formatter(style: &AxisStyle, scale: &dyn AxisScale) -> TickLabelFormatterFn {
    if let Some(format) = &style.tick_format {
        return Arc::clone(format);
    }
    scale
        .tick_format(style.ticks.count)
        .unwrap_or_else(|| Arc::new(|value: f64| Some(default_label_text(value))))
}

/// Label text for one tick; a formatter yielding nothing renders as "".
#[must_use]
pub fn format_tick_label(format: &TickLabelFormatterFn, value: f64) -> String {
    format(value).unwrap_or_default()
}

pub(super) fn default_label_text(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0".
        return "0".to_owned();
    }
    format!("{value}")
}
