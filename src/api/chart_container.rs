use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{AxisScale, ChartMargins, LinearScale, Viewport};
use crate::error::{AxisError, AxisResult};
use crate::render::DrawingSurface;

use super::{AutoMarginCoordinator, AxisRenderer, AxisSide, AxisStyle, ThicknessReport};

/// Plot rectangle inside the margins, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Outcome of one render pass over every axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPass {
    /// Margins after applying this pass's reports.
    pub margins: ChartMargins,
    /// Plot area the pass was drawn with.
    pub plot: PlotArea,
    pub grew: bool,
    pub reports: Vec<(AxisSide, ThicknessReport)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConvergence {
    pub passes: usize,
    pub converged: bool,
    pub margins: ChartMargins,
}

/// Chart container that sizes its margins around up to four axes.
///
/// Each render pass draws every axis with the current margins and then
/// feeds their thickness reports to an [`AutoMarginCoordinator`]; the next
/// pass uses the grown margins.
#[derive(Debug)]
pub struct AxisChart {
    viewport: Viewport,
    x_domain: (f64, f64),
    y_domain: (f64, f64),
    axes: IndexMap<AxisSide, AxisRenderer>,
    margins: AutoMarginCoordinator,
}

impl AxisChart {
    pub fn new(viewport: Viewport, x_domain: (f64, f64), y_domain: (f64, f64)) -> AxisResult<Self> {
        if !viewport.is_valid() {
            return Err(AxisError::InvalidPlotArea {
                width: f64::from(viewport.width),
                height: f64::from(viewport.height),
            });
        }
        validate_domain("x", x_domain)?;
        validate_domain("y", y_domain)?;
        Ok(Self {
            viewport,
            x_domain,
            y_domain,
            axes: IndexMap::new(),
            margins: AutoMarginCoordinator::default(),
        })
    }

    pub fn with_base_padding(mut self, base_padding_px: f64) -> AxisResult<Self> {
        self.margins = AutoMarginCoordinator::new(base_padding_px)?;
        Ok(self)
    }

    /// Installs or restyles the axis on `side`. Restyling keeps the
    /// axis's cached label measurements while its measurement style holds.
    pub fn set_axis(&mut self, side: AxisSide, style: AxisStyle) -> AxisResult<()> {
        if style.orientation().is_horizontal() != side.is_horizontal() {
            return Err(AxisError::InvalidConfig(format!(
                "`{}` axis cannot be attached to the {side} side",
                style.orientation()
            )));
        }
        match self.axes.get_mut(&side) {
            Some(axis) => axis.set_style(style),
            None => {
                self.axes.insert(side, AxisRenderer::new(style)?);
                Ok(())
            }
        }
    }

    pub fn remove_axis(&mut self, side: AxisSide) -> Option<AxisRenderer> {
        self.axes.shift_remove(&side)
    }

    #[must_use]
    pub fn axis(&self, side: AxisSide) -> Option<&AxisRenderer> {
        self.axes.get(&side)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resizing starts a new convergence sequence.
    pub fn set_viewport(&mut self, viewport: Viewport) -> AxisResult<()> {
        if !viewport.is_valid() {
            return Err(AxisError::InvalidPlotArea {
                width: f64::from(viewport.width),
                height: f64::from(viewport.height),
            });
        }
        self.viewport = viewport;
        self.margins.reset();
        Ok(())
    }

    /// Margins keep growing across domain changes; they never shrink.
    pub fn set_domains(&mut self, x_domain: (f64, f64), y_domain: (f64, f64)) -> AxisResult<()> {
        validate_domain("x", x_domain)?;
        validate_domain("y", y_domain)?;
        self.x_domain = x_domain;
        self.y_domain = y_domain;
        Ok(())
    }

    #[must_use]
    pub fn margins(&self) -> ChartMargins {
        self.margins.margins()
    }

    #[must_use]
    pub fn margin_coordinator(&self) -> &AutoMarginCoordinator {
        &self.margins
    }

    pub fn plot_area(&self) -> AxisResult<PlotArea> {
        let margins = self.margins.margins();
        let width = f64::from(self.viewport.width) - margins.left - margins.right;
        let height = f64::from(self.viewport.height) - margins.top - margins.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(AxisError::InvalidPlotArea { width, height });
        }
        Ok(PlotArea {
            x: margins.left,
            y: margins.top,
            width,
            height,
        })
    }

    pub fn x_scale(&self, plot: PlotArea) -> AxisResult<LinearScale> {
        LinearScale::new(self.x_domain, (0.0, plot.width))
    }

    /// Pixel y grows downwards, so the range runs from the bottom edge up.
    pub fn y_scale(&self, plot: PlotArea) -> AxisResult<LinearScale> {
        LinearScale::new(self.y_domain, (plot.height, 0.0))
    }

    /// Clears `surface`, draws every axis with the current margins, then
    /// applies all thickness reports.
    pub fn render_pass<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> AxisResult<LayoutPass> {
        surface.clear()?;
        let plot = self.plot_area()?;
        let x_scale = self.x_scale(plot)?;
        let y_scale = self.y_scale(plot)?;

        let mut reports = Vec::with_capacity(self.axes.len());
        for (side, axis) in &mut self.axes {
            let (x, y) = match side {
                AxisSide::Left | AxisSide::Top => (plot.x, plot.y),
                AxisSide::Right => (plot.x + plot.width, plot.y),
                AxisSide::Bottom => (plot.x, plot.y + plot.height),
            };
            axis.set_transform(x, y)?;
            let scale: &dyn AxisScale = if side.is_horizontal() {
                &x_scale
            } else {
                &y_scale
            };
            if let Some(report) = axis.draw(surface, scale)?.report {
                reports.push((*side, report));
            }
        }

        let mut grew = false;
        for (side, report) in &reports {
            grew |= self.margins.report(*side, *report);
        }

        Ok(LayoutPass {
            margins: self.margins.margins(),
            plot,
            grew,
            reports,
        })
    }

    /// Repeats render passes until no side grows or `max_passes` is spent.
    pub fn render_until_stable<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        max_passes: usize,
    ) -> AxisResult<LayoutConvergence> {
        if max_passes == 0 {
            return Err(AxisError::InvalidConfig(
                "layout convergence needs at least one pass".to_owned(),
            ));
        }

        for passes in 1..=max_passes {
            let pass = self.render_pass(surface)?;
            if !pass.grew {
                debug!(passes, margins = ?pass.margins, "axis layout converged");
                return Ok(LayoutConvergence {
                    passes,
                    converged: true,
                    margins: pass.margins,
                });
            }
        }

        let margins = self.margins.margins();
        warn!(max_passes, ?margins, "axis layout did not converge");
        Ok(LayoutConvergence {
            passes: max_passes,
            converged: false,
            margins,
        })
    }
}

fn validate_domain(name: &str, domain: (f64, f64)) -> AxisResult<()> {
    if !domain.0.is_finite() || !domain.1.is_finite() {
        return Err(AxisError::InvalidData(format!("{name} domain must be finite")));
    }
    Ok(())
}
