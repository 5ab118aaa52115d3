use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{AxisError, AxisResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> AxisResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let expanded: String = match digits.len() {
            _ if !digits.is_ascii() => {
                return Err(AxisError::InvalidConfig(format!(
                    "color `{hex}` is not valid hex"
                )));
            }
            3 => digits.chars().flat_map(|ch| [ch, ch]).collect(),
            6 | 8 => digits.to_owned(),
            _ => {
                return Err(AxisError::InvalidConfig(format!(
                    "color `{hex}` must be #rgb, #rrggbb or #rrggbbaa"
                )));
            }
        };
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&expanded[range], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|_| AxisError::InvalidConfig(format!("color `{hex}` is not valid hex")))
        };
        let alpha = if expanded.len() == 8 {
            channel(6..8)?
        } else {
            1.0
        };
        Ok(Self::rgba(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            alpha,
        ))
    }

    /// Same color with alpha multiplied by `opacity`, like canvas `hexToRGBA`.
    #[must_use]
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            alpha: (self.alpha * opacity).clamp(0.0, 1.0),
            ..self
        }
    }

    /// `#rrggbbaa` form, stable across runs.
    #[must_use]
    pub fn to_hex_rgba(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue),
            byte(self.alpha)
        )
    }

    pub fn validate(self) -> AxisResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(AxisError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Fixed set of stroke dash styles used by axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrokeDash {
    #[default]
    Solid,
    ShortDash,
    ShortDot,
    ShortDashDot,
    ShortDashDotDot,
    Dot,
    Dash,
    LongDash,
    DashDot,
    LongDashDot,
    LongDashDotDot,
}

impl StrokeDash {
    pub const ALL: [Self; 11] = [
        Self::Solid,
        Self::ShortDash,
        Self::ShortDot,
        Self::ShortDashDot,
        Self::ShortDashDotDot,
        Self::Dot,
        Self::Dash,
        Self::LongDash,
        Self::DashDot,
        Self::LongDashDot,
        Self::LongDashDotDot,
    ];

    /// Dash array in pixels; empty means a solid line.
    #[must_use]
    pub fn dash_array(self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::ShortDash => &[6.0, 2.0],
            Self::ShortDot => &[2.0, 2.0],
            Self::ShortDashDot => &[6.0, 2.0, 2.0, 2.0],
            Self::ShortDashDotDot => &[6.0, 2.0, 2.0, 2.0, 2.0, 2.0],
            Self::Dot => &[2.0, 6.0],
            Self::Dash => &[8.0, 6.0],
            Self::LongDash => &[16.0, 6.0],
            Self::DashDot => &[8.0, 6.0, 2.0, 6.0],
            Self::LongDashDot => &[16.0, 6.0, 2.0, 6.0],
            Self::LongDashDotDot => &[16.0, 6.0, 2.0, 6.0, 2.0, 6.0],
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Solid => "Solid",
            Self::ShortDash => "ShortDash",
            Self::ShortDot => "ShortDot",
            Self::ShortDashDot => "ShortDashDot",
            Self::ShortDashDotDot => "ShortDashDotDot",
            Self::Dot => "Dot",
            Self::Dash => "Dash",
            Self::LongDash => "LongDash",
            Self::DashDot => "DashDot",
            Self::LongDashDot => "LongDashDot",
            Self::LongDashDotDot => "LongDashDotDot",
        }
    }
}

impl FromStr for StrokeDash {
    type Err = AxisError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dash| dash.name() == value)
            .ok_or_else(|| AxisError::InvalidConfig(format!("unknown stroke dash `{value}`")))
    }
}

/// Stroke settings shared by lines and paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub dash: StrokeDash,
}

impl StrokeStyle {
    #[must_use]
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: StrokeDash::Solid,
        }
    }

    pub fn validate(self) -> AxisResult<()> {
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(AxisError::InvalidData(
                "stroke width must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: StrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke: StrokeStyle) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke,
        }
    }

    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
            ..self
        }
    }

    pub fn validate(self) -> AxisResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(AxisError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        self.stroke.validate()
    }
}

/// Open polyline, e.g. the domain line with its outer-tick stubs.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub points: SmallVec<[(f64, f64); 4]>,
    pub stroke: StrokeStyle,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>, stroke: StrokeStyle) -> Self {
        Self {
            points: points.into_iter().collect(),
            stroke,
        }
    }

    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            points: self.points.iter().map(|(x, y)| (x + dx, y + dy)).collect(),
            stroke: self.stroke,
        }
    }

    pub fn validate(&self) -> AxisResult<()> {
        if self.points.len() < 2 {
            return Err(AxisError::InvalidData(
                "path needs at least two points".to_owned(),
            ));
        }
        if self
            .points
            .iter()
            .any(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(AxisError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        self.stroke.validate()
    }
}

/// Filled rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
        }
    }

    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub fn validate(self) -> AxisResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(AxisError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(AxisError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// CSS-style font weight (`400` normal, `700` bold).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: Self = Self(400);
    pub const BOLD: Self = Self(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Font used for label drawing and measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f64,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f64, weight: FontWeight) -> Self {
        Self {
            family: family.into(),
            size_px,
            weight,
            style: FontStyle::Normal,
        }
    }

    /// Canvas `ctx.font` string, e.g. `400 12px Helvetica`.
    #[must_use]
    pub fn css_font(&self) -> String {
        let style = match self.style {
            FontStyle::Normal => "",
            FontStyle::Italic => "italic ",
            FontStyle::Oblique => "oblique ",
        };
        format!("{style}{} {}px {}", self.weight, self.size_px, self.family)
    }

    pub fn validate(&self) -> AxisResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(AxisError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Start,
    Center,
    End,
}

/// Vertical reference of `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Top,
    Middle,
    Bottom,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontSpec,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font: FontSpec,
        color: Color,
        align: TextAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font,
            color,
            align,
            baseline: TextBaseline::Alphabetic,
        }
    }

    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        }
    }

    /// Empty text is allowed: a formatter may legitimately yield no label.
    pub fn validate(&self) -> AxisResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(AxisError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        self.font.validate()?;
        self.color.validate()
    }
}

/// Measured size of one line of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}
