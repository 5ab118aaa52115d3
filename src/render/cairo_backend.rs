use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{AxisError, AxisResult};
use crate::render::{
    Color, DrawingSurface, FontSpec, FontStyle, FontWeight, LinePrimitive, PathPrimitive,
    RectPrimitive, StrokeStyle, TextAlign, TextBaseline, TextExtent, TextPrimitive,
};

/// Cairo + Pango + PangoCairo drawing surface.
///
/// Works either on an owned offscreen image surface (`new_image`) or on an
/// external Cairo context, e.g. a GTK `DrawingArea` draw callback
/// (`from_context`).
#[derive(Debug)]
pub struct CairoSurface {
    context: Context,
    image: Option<ImageSurface>,
    clear_color: Color,
}

impl CairoSurface {
    pub fn new_image(width: i32, height: i32) -> AxisResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(AxisError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let image = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&image)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self {
            context,
            image: Some(image),
            clear_color: Color::rgb(1.0, 1.0, 1.0),
        })
    }

    #[must_use]
    pub fn from_context(context: Context) -> Self {
        Self {
            context,
            image: None,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
        }
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn set_clear_color(&mut self, color: Color) -> AxisResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    /// Writes the owned image surface as PNG.
    pub fn write_png<W: std::io::Write>(&self, out: &mut W) -> AxisResult<()> {
        let image = self.image.as_ref().ok_or_else(|| {
            AxisError::Backend("surface wraps an external context, not an image".to_owned())
        })?;
        image
            .write_to_png(out)
            .map_err(|err| AxisError::Backend(format!("failed to write png: {err}")))
    }

    fn apply_stroke(&self, stroke: StrokeStyle) {
        apply_color(&self.context, stroke.color);
        self.context.set_line_width(stroke.width);
        self.context.set_dash(stroke.dash.dash_array(), 0.0);
    }

    fn layout_for(&self, text: &str, font: &FontSpec) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.context);
        layout.set_font_description(Some(&font_description(font)));
        layout.set_text(text);
        layout
    }
}

impl DrawingSurface for CairoSurface {
    fn save(&mut self) -> AxisResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))
    }

    fn restore(&mut self) -> AxisResult<()> {
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.context.translate(dx, dy);
    }

    fn stroke_line(&mut self, line: &LinePrimitive) -> AxisResult<()> {
        line.validate()?;
        self.apply_stroke(line.stroke);
        self.context.move_to(line.x1, line.y1);
        self.context.line_to(line.x2, line.y2);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))
    }

    fn stroke_path(&mut self, path: &PathPrimitive) -> AxisResult<()> {
        path.validate()?;
        self.apply_stroke(path.stroke);
        let mut points = path.points.iter();
        if let Some((x, y)) = points.next() {
            self.context.move_to(*x, *y);
        }
        for (x, y) in points {
            self.context.line_to(*x, *y);
        }
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))
    }

    fn fill_rect(&mut self, rect: &RectPrimitive) -> AxisResult<()> {
        rect.validate()?;
        apply_color(&self.context, rect.fill_color);
        self.context
            .rectangle(rect.x, rect.y, rect.width, rect.height);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }

    fn fill_text(&mut self, text: &TextPrimitive) -> AxisResult<()> {
        text.validate()?;
        if text.text.is_empty() {
            return Ok(());
        }

        let layout = self.layout_for(&text.text, &text.font);
        let (width, height) = layout.pixel_size();
        let width = f64::from(width);
        let height = f64::from(height);
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

        let x = match text.align {
            TextAlign::Start => text.x,
            TextAlign::Center => text.x - width / 2.0,
            TextAlign::End => text.x - width,
        };
        let y = match text.baseline {
            TextBaseline::Alphabetic => text.y - baseline,
            TextBaseline::Top => text.y,
            TextBaseline::Middle => text.y - height / 2.0,
            TextBaseline::Bottom => text.y - height,
        };

        apply_color(&self.context, text.color);
        self.context.move_to(x, y);
        pangocairo::functions::show_layout(&self.context, &layout);
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> AxisResult<TextExtent> {
        font.validate()?;
        let layout = self.layout_for(text, font);
        let (width, height) = layout.pixel_size();
        Ok(TextExtent {
            width: f64::from(width),
            height: f64::from(height),
        })
    }

    fn clear(&mut self) -> AxisResult<()> {
        self.clear_color.validate()?;
        self.context.save().map_err(|err| map_backend_error("failed to save context", err))?;
        self.context.identity_matrix();
        apply_color(&self.context, self.clear_color);
        self.context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))
    }
}

fn font_description(font: &FontSpec) -> FontDescription {
    let mut description = FontDescription::new();
    description.set_family(&font.family);
    description.set_absolute_size(font.size_px * f64::from(pango::SCALE));
    description.set_weight(pango_weight(font.weight));
    description.set_style(match font.style {
        FontStyle::Normal => pango::Style::Normal,
        FontStyle::Italic => pango::Style::Italic,
        FontStyle::Oblique => pango::Style::Oblique,
    });
    description
}

fn pango_weight(weight: FontWeight) -> pango::Weight {
    match weight.0 {
        0..=149 => pango::Weight::Thin,
        150..=249 => pango::Weight::Ultralight,
        250..=349 => pango::Weight::Light,
        350..=449 => pango::Weight::Normal,
        450..=549 => pango::Weight::Medium,
        550..=649 => pango::Weight::Semibold,
        650..=749 => pango::Weight::Bold,
        750..=849 => pango::Weight::Ultrabold,
        _ => pango::Weight::Heavy,
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> AxisError {
    AxisError::Backend(format!("{prefix}: {err}"))
}
