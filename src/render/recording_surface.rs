use crate::error::{AxisError, AxisResult};
use crate::render::{
    DrawingSurface, FontSpec, LinePrimitive, PathPrimitive, RectPrimitive, RenderFrame,
    TextExtent, TextPrimitive,
};

/// Headless surface used by tests and layout-only hosts.
///
/// Every primitive is validated and recorded in absolute coordinates. Text is
/// measured with a deterministic per-glyph estimate so layouts are
/// reproducible without a font backend.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    frame: RenderFrame,
    offset: (f64, f64),
    saved_offsets: Vec<(f64, f64)>,
    measure_calls: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    #[must_use]
    pub fn into_frame(self) -> RenderFrame {
        self.frame
    }

    /// Number of `measure_text` calls since creation.
    #[must_use]
    pub fn measure_calls(&self) -> usize {
        self.measure_calls
    }

    #[must_use]
    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }
}

impl DrawingSurface for RecordingSurface {
    fn save(&mut self) -> AxisResult<()> {
        self.saved_offsets.push(self.offset);
        Ok(())
    }

    fn restore(&mut self) -> AxisResult<()> {
        self.offset = self.saved_offsets.pop().ok_or_else(|| {
            AxisError::Backend("restore called without a matching save".to_owned())
        })?;
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    fn stroke_line(&mut self, line: &LinePrimitive) -> AxisResult<()> {
        line.validate()?;
        self.frame
            .lines
            .push(line.translated(self.offset.0, self.offset.1));
        Ok(())
    }

    fn stroke_path(&mut self, path: &PathPrimitive) -> AxisResult<()> {
        path.validate()?;
        self.frame
            .paths
            .push(path.translated(self.offset.0, self.offset.1));
        Ok(())
    }

    fn fill_rect(&mut self, rect: &RectPrimitive) -> AxisResult<()> {
        rect.validate()?;
        self.frame
            .rects
            .push(rect.translated(self.offset.0, self.offset.1));
        Ok(())
    }

    fn fill_text(&mut self, text: &TextPrimitive) -> AxisResult<()> {
        text.validate()?;
        self.frame
            .texts
            .push(text.translated(self.offset.0, self.offset.1));
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> AxisResult<TextExtent> {
        font.validate()?;
        self.measure_calls += 1;
        Ok(TextExtent {
            width: estimate_text_width_px(text, font.size_px),
            height: font.size_px,
        })
    }

    fn clear(&mut self) -> AxisResult<()> {
        self.frame.clear();
        self.offset = (0.0, 0.0);
        self.saved_offsets.clear();
        Ok(())
    }
}

/// Deterministic, backend-independent width estimate for one line of text.
#[must_use]
pub fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    units * font_size_px
}
