use crate::core::AxisScale;
use crate::error::{AxisError, AxisResult};
use crate::render::TextAlign;

use super::{AxisOrientation, AxisStyle, format_tick_label, resolve_tick_formatter};

/// Baseline shift of horizontal labels below the domain line, in em.
const HORIZONTAL_LABEL_DY_EM: f64 = 0.71;
/// Baseline shift that vertically centers labels of vertical axes, in em.
const VERTICAL_LABEL_DY_EM: f64 = 0.32;

/// Screen-space geometry of one tick in axis-local coordinates.
///
/// `(x1, y1)` lies on the domain line, `(x2, y2)` is the outer end of the
/// tick mark and `(label_x, label_y)` is the label anchor before `label_dy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSpec {
    pub value: f64,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub label_x: f64,
    pub label_y: f64,
}

/// Planned ticks plus the text metadata shared by all labels of the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLayout {
    pub orientation: AxisOrientation,
    pub ticks: Vec<TickSpec>,
    /// One entry per tick, already formatted.
    pub labels: Vec<String>,
    pub text_align: TextAlign,
    /// Extra vertical offset applied to every label anchor when drawing.
    pub label_dy: f64,
    pub tick_spacing: f64,
}

impl TickLayout {
    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Pairs each tick with its label text.
    pub fn iter(&self) -> impl Iterator<Item = (&TickSpec, &str)> {
        self.ticks
            .iter()
            .zip(self.labels.iter().map(String::as_str))
    }
}

/// Maps tick values to pixel geometry for the style's orientation.
///
/// Pixel positions are rounded to whole pixels. A value the scale maps to
/// a non-finite pixel is rejected.
pub fn plan_tick_layout(
    values: &[f64],
    scale: &dyn AxisScale,
    style: &AxisStyle,
) -> AxisResult<TickLayout> {
    let appearance = &style.appearance;
    let orientation = appearance.orientation;
    let sign = orientation.sign();
    let tick_spacing = appearance.tick_spacing();
    let inner = sign * appearance.inner_tick_size;
    let label_offset = sign * tick_spacing;

    let mut ticks = Vec::with_capacity(values.len());
    for &value in values {
        let pixel = scale.apply(value).round();
        if !pixel.is_finite() {
            return Err(AxisError::InvalidData(format!(
                "tick value {value} maps to a non-finite pixel"
            )));
        }

        let tick = if orientation.is_horizontal() {
            TickSpec {
                value,
                x1: pixel,
                y1: 0.0,
                x2: pixel,
                y2: inner,
                label_x: pixel,
                label_y: label_offset,
            }
        } else {
            TickSpec {
                value,
                x1: 0.0,
                y1: pixel,
                x2: inner,
                y2: pixel,
                label_x: label_offset,
                label_y: pixel,
            }
        };
        ticks.push(tick);
    }

    let format = resolve_tick_formatter(style, scale);
    let labels = values
        .iter()
        .map(|&value| format_tick_label(&format, value))
        .collect();

    let (text_align, label_dy) = match orientation {
        AxisOrientation::Top => (TextAlign::Center, 0.0),
        AxisOrientation::Bottom => (
            TextAlign::Center,
            appearance.font_size * HORIZONTAL_LABEL_DY_EM,
        ),
        AxisOrientation::Left => (TextAlign::End, appearance.font_size * VERTICAL_LABEL_DY_EM),
        AxisOrientation::Right => (
            TextAlign::Start,
            appearance.font_size * VERTICAL_LABEL_DY_EM,
        ),
    };

    Ok(TickLayout {
        orientation,
        ticks,
        labels,
        text_align,
        label_dy,
        tick_spacing,
    })
}
