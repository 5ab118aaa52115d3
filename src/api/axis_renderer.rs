use tracing::{debug, trace};

use crate::core::{AxisScale, AxisThickness};
use crate::error::AxisResult;
use crate::render::{DrawingSurface, LinePrimitive, PathPrimitive, StrokeStyle, TextPrimitive};

use super::{
    AxisOrientation, AxisStyle, LabelExtent, LabelMeasurementCache, RelaxationParams, StyleKey,
    ThicknessProtocol, TickLayout, collision_resolution_applies, generate_tick_values,
    plan_tick_layout, resolve_tick_collisions,
};

/// Upward thickness report emitted after a draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThicknessReport {
    /// Earlier single-value protocol.
    Scalar(f64),
    Dimensions(AxisThickness),
}

impl ThicknessReport {
    /// Reads the report as a thickness. A scalar is the dimension that
    /// pushes the plot away from the axis: width for vertical axes, height
    /// for horizontal ones.
    #[must_use]
    pub fn thickness_for(self, orientation: AxisOrientation) -> AxisThickness {
        match self {
            Self::Dimensions(thickness) => thickness,
            Self::Scalar(value) if orientation.is_horizontal() => AxisThickness::new(0.0, value),
            Self::Scalar(value) => AxisThickness::new(value, 0.0),
        }
    }
}

/// Mutable per-axis state carried between draws.
#[derive(Debug, Default)]
pub struct AxisLayoutState {
    labels: LabelMeasurementCache,
    reported: Option<ThicknessReport>,
    draws: u64,
}

impl AxisLayoutState {
    #[must_use]
    pub fn labels(&self) -> &LabelMeasurementCache {
        &self.labels
    }

    /// Report emitted by the most recent draw.
    #[must_use]
    pub fn reported(&self) -> Option<ThicknessReport> {
        self.reported
    }

    #[must_use]
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisDrawOutput {
    /// Planned ticks after collision resolution; `None` when ticks are hidden.
    pub layout: Option<TickLayout>,
    pub report: Option<ThicknessReport>,
    pub moved_ticks: usize,
}

/// Band hosts hit-test to start an axis-zoom gesture, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomCaptureRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub inverted: bool,
}

/// Draws one axis and reports the space it needs.
#[derive(Debug)]
pub struct AxisRenderer {
    style: AxisStyle,
    relaxation: RelaxationParams,
    state: AxisLayoutState,
}

impl AxisRenderer {
    pub fn new(style: AxisStyle) -> AxisResult<Self> {
        style.validate()?;
        Ok(Self {
            style,
            relaxation: RelaxationParams::default(),
            state: AxisLayoutState::default(),
        })
    }

    pub fn with_relaxation(mut self, relaxation: RelaxationParams) -> AxisResult<Self> {
        relaxation.validate()?;
        self.relaxation = relaxation;
        Ok(self)
    }

    #[must_use]
    pub fn style(&self) -> &AxisStyle {
        &self.style
    }

    /// Replaces the style. Cached measurements survive unless a field of
    /// the measurement style key changed.
    pub fn set_style(&mut self, style: AxisStyle) -> AxisResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    pub fn set_transform(&mut self, x: f64, y: f64) -> AxisResult<()> {
        let mut appearance = self.style.appearance.clone();
        appearance.transform = (x, y);
        appearance.validate()?;
        self.style.appearance = appearance;
        Ok(())
    }

    pub fn set_range(&mut self, range: Option<(f64, f64)>) -> AxisResult<()> {
        let mut appearance = self.style.appearance.clone();
        appearance.range = range;
        appearance.validate()?;
        self.style.appearance = appearance;
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> &AxisLayoutState {
        &self.state
    }

    /// Runs one draw cycle against `surface`.
    ///
    /// The surface transform is restored even when drawing fails.
    pub fn draw<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        scale: &dyn AxisScale,
    ) -> AxisResult<AxisDrawOutput> {
        let (dx, dy) = self.style.appearance.transform;
        surface.save()?;
        surface.translate(dx, dy);
        let drawn = self.draw_local(surface, scale);
        let restored = surface.restore();
        let output = drawn?;
        restored?;

        self.state.draws = self.state.draws.saturating_add(1);
        self.state.reported = output.report;
        Ok(output)
    }

    /// Axis-zoom capture band, or `None` when zoom is disabled.
    ///
    /// The band depth is the last reported thickness on the axis side, or
    /// `font_size + tick_spacing` before any report.
    #[must_use]
    pub fn zoom_capture_bounds(&self, scale: &dyn AxisScale) -> Option<ZoomCaptureRegion> {
        let appearance = &self.style.appearance;
        if !appearance.zoom.enabled {
            return None;
        }

        let orientation = appearance.orientation;
        let (r0, r1) = appearance.range.unwrap_or_else(|| scale.range());
        let (tx, ty) = appearance.transform;
        let depth = self
            .state
            .reported
            .map(|report| {
                let thickness = report.thickness_for(orientation);
                if orientation.is_horizontal() {
                    thickness.height
                } else {
                    thickness.width
                }
            })
            .filter(|depth| *depth > 0.0)
            .unwrap_or(appearance.font_size + appearance.tick_spacing());
        let outward = if orientation.sign() < 0.0 { -depth } else { 0.0 };

        let region = if orientation.is_horizontal() {
            ZoomCaptureRegion {
                x: tx + r0.min(r1),
                y: ty + outward,
                width: (r1 - r0).abs(),
                height: depth,
                inverted: appearance.zoom.inverted,
            }
        } else {
            ZoomCaptureRegion {
                x: tx + outward,
                y: ty + r0.min(r1),
                width: depth,
                height: (r1 - r0).abs(),
                inverted: appearance.zoom.inverted,
            }
        };
        Some(region)
    }

    fn draw_local<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        scale: &dyn AxisScale,
    ) -> AxisResult<AxisDrawOutput> {
        let appearance = &self.style.appearance;
        if appearance.show_domain {
            let range = appearance.range.unwrap_or_else(|| scale.range());
            surface.stroke_path(&domain_path(&self.style, range))?;
        }
        if !appearance.show_ticks {
            return Ok(AxisDrawOutput {
                layout: None,
                report: None,
                moved_ticks: 0,
            });
        }

        let generated = generate_tick_values(scale, &self.style.ticks, appearance.flex_ticks);
        let mut layout = plan_tick_layout(&generated.values, scale, &self.style)?;
        let moved_ticks = if collision_resolution_applies(appearance) {
            resolve_tick_collisions(&mut layout, self.relaxation)
        } else {
            0
        };

        let tick_stroke = StrokeStyle {
            color: appearance
                .tick_stroke
                .with_opacity(appearance.tick_stroke_opacity),
            width: appearance.tick_stroke_width,
            dash: appearance.tick_stroke_dash,
        };
        for tick in &layout.ticks {
            surface.stroke_line(&LinePrimitive::new(
                tick.x1,
                tick.y1,
                tick.x2,
                tick.y2,
                tick_stroke,
            ))?;
        }

        let measure = appearance.show_tick_labels && self.needs_measurement();
        let mut extents = Vec::new();
        if appearance.show_tick_labels {
            let font = appearance.font();
            let fill = appearance.label_fill();
            let key = StyleKey::from_appearance(appearance);
            let cache = self.state.labels.get(&key);
            let horizontal = appearance.orientation.is_horizontal();

            for (tick, label) in layout.iter() {
                surface.fill_text(&TextPrimitive::new(
                    label,
                    tick.label_x,
                    tick.label_y + layout.label_dy,
                    font.clone(),
                    fill,
                    layout.text_align,
                ))?;

                if measure {
                    let extent = cache.get_or_measure(label, |text| {
                        let text_extent = surface.measure_text(text, &font)?;
                        Ok(LabelExtent {
                            width: text_extent.width
                                + if horizontal { 0.0 } else { layout.tick_spacing },
                            height: text_extent.height
                                + if horizontal { layout.tick_spacing } else { 0.0 },
                        })
                    })?;
                    extents.push(extent);
                }
            }
        }

        let report = self.thickness_report(&extents);
        debug!(
            orientation = %appearance.orientation,
            ticks = layout.len(),
            source = ?generated.source,
            moved_ticks,
            measured = extents.len(),
            "axis drawn"
        );
        if let Some(report) = report {
            trace!(orientation = %appearance.orientation, ?report, "axis thickness reported");
        }

        Ok(AxisDrawOutput {
            layout: Some(layout),
            report,
            moved_ticks,
        })
    }

    fn needs_measurement(&self) -> bool {
        match self.style.thickness_protocol {
            ThicknessProtocol::None => false,
            ThicknessProtocol::Dimensions => true,
            ThicknessProtocol::LegacyScalar => !self.style.orientation().is_horizontal(),
        }
    }

    fn thickness_report(&self, extents: &[LabelExtent]) -> Option<ThicknessReport> {
        let appearance = &self.style.appearance;
        match self.style.thickness_protocol {
            ThicknessProtocol::None => None,
            ThicknessProtocol::Dimensions => {
                let thickness = extents.iter().fold(AxisThickness::ZERO, |acc, extent| {
                    acc.max(AxisThickness::new(extent.width, extent.height))
                });
                Some(ThicknessReport::Dimensions(thickness))
            }
            ThicknessProtocol::LegacyScalar if appearance.orientation.is_horizontal() => Some(
                ThicknessReport::Scalar(appearance.font_size + appearance.tick_spacing()),
            ),
            ThicknessProtocol::LegacyScalar => Some(ThicknessReport::Scalar(
                extents
                    .iter()
                    .fold(0.0_f64, |acc, extent| acc.max(extent.width)),
            )),
        }
    }
}

/// Domain line with an outer-tick stub at each end of `range`.
fn domain_path(style: &AxisStyle, range: (f64, f64)) -> PathPrimitive {
    let appearance = &style.appearance;
    let outer = appearance.orientation.sign() * appearance.outer_tick_size;
    let (first, last) = range;
    let stroke = StrokeStyle::solid(
        appearance.stroke.with_opacity(appearance.stroke_opacity),
        appearance.stroke_width,
    );

    if appearance.orientation.is_horizontal() {
        PathPrimitive::new(
            [(first, outer), (first, 0.0), (last, 0.0), (last, outer)],
            stroke,
        )
    } else {
        PathPrimitive::new(
            [(outer, first), (0.0, first), (0.0, last), (outer, last)],
            stroke,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ThicknessReport;
    use crate::api::AxisOrientation;
    use crate::core::AxisThickness;

    #[test]
    fn scalar_reports_map_to_the_axis_side_dimension() {
        let report = ThicknessReport::Scalar(30.0);
        assert_eq!(
            report.thickness_for(AxisOrientation::Left),
            AxisThickness::new(30.0, 0.0)
        );
        assert_eq!(
            report.thickness_for(AxisOrientation::Bottom),
            AxisThickness::new(0.0, 30.0)
        );
    }
}
