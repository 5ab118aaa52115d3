mod frame;
mod primitives;
mod recording_surface;

pub use frame::RenderFrame;
pub use primitives::{
    Color, FontSpec, FontStyle, FontWeight, LinePrimitive, PathPrimitive, RectPrimitive,
    StrokeDash, StrokeStyle, TextAlign, TextBaseline, TextExtent, TextPrimitive,
};
pub use recording_surface::{RecordingSurface, estimate_text_width_px};

use crate::error::AxisResult;

/// Imperative canvas contract implemented by drawing backends.
///
/// Axes draw in local coordinates after `translate`; backends own the
/// transform stack. `measure_text` must report the pixel extent of `text`
/// under `font` without drawing it.
pub trait DrawingSurface {
    fn save(&mut self) -> AxisResult<()>;

    fn restore(&mut self) -> AxisResult<()>;

    fn translate(&mut self, dx: f64, dy: f64);

    fn stroke_line(&mut self, line: &LinePrimitive) -> AxisResult<()>;

    fn stroke_path(&mut self, path: &PathPrimitive) -> AxisResult<()>;

    fn fill_rect(&mut self, rect: &RectPrimitive) -> AxisResult<()>;

    fn fill_text(&mut self, text: &TextPrimitive) -> AxisResult<()>;

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> AxisResult<TextExtent>;

    /// Resets the surface before a new full redraw.
    fn clear(&mut self) -> AxisResult<()> {
        Ok(())
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoSurface;
