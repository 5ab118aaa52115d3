use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::TickLabelFormatterFn;
use crate::error::{AxisError, AxisResult};
use crate::render::{Color, FontSpec, FontWeight, StrokeDash};

use super::{TickIntervalFn, TickPolicy, TickValues, TickValuesFn};

pub const DEFAULT_AXIS_FONT_FAMILY: &str = "Helvetica Neue, Helvetica, Arial, sans-serif";

/// Side of the domain line that ticks and labels grow towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AxisOrientation {
    Left,
    Right,
    Top,
    Bottom,
}

impl AxisOrientation {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// `-1` for `top`/`left`, `+1` for `bottom`/`right`.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Top | Self::Left => -1.0,
            Self::Bottom | Self::Right => 1.0,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for AxisOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AxisOrientation {
    type Err = AxisError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(AxisError::InvalidOrientation(other.to_owned())),
        }
    }
}

impl TryFrom<String> for AxisOrientation {
    type Error = AxisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AxisOrientation> for String {
    fn from(value: AxisOrientation) -> Self {
        value.as_str().to_owned()
    }
}

/// Axis-zoom capture settings. Gesture handling belongs to the host; the
/// axis only exposes where the capture band is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisZoomConfig {
    pub enabled: bool,
    pub inverted: bool,
}

impl Default for AxisZoomConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            inverted: false,
        }
    }
}

/// Which upward thickness report an axis emits after each draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThicknessProtocol {
    /// No measurement and no report.
    #[default]
    None,
    /// `{width, height}` pair. Width carries the tick spacing on vertical
    /// axes, height carries it on horizontal axes.
    Dimensions,
    /// Earlier single-value protocol: vertical axes report the widest label
    /// plus tick spacing, horizontal axes report `font_size + tick_spacing`
    /// without measuring.
    LegacyScalar,
}

/// Serializable visual configuration of one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisAppearance {
    pub orientation: AxisOrientation,
    pub inner_tick_size: f64,
    pub outer_tick_size: f64,
    pub tick_padding: f64,
    #[serde(with = "color_hex")]
    pub stroke: Color,
    pub stroke_opacity: f64,
    pub stroke_width: f64,
    #[serde(with = "color_hex")]
    pub tick_stroke: Color,
    pub tick_stroke_opacity: f64,
    pub tick_stroke_width: f64,
    pub tick_stroke_dash: StrokeDash,
    /// Falls back to `tick_stroke` when absent.
    #[serde(with = "option_color_hex")]
    pub tick_label_fill: Option<Color>,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub show_domain: bool,
    pub show_ticks: bool,
    pub show_tick_labels: bool,
    pub flex_ticks: bool,
    /// Origin of the axis in surface coordinates.
    pub transform: (f64, f64),
    /// Domain-line extent; the scale range is used when absent.
    pub range: Option<(f64, f64)>,
    pub zoom: AxisZoomConfig,
}

impl Default for AxisAppearance {
    fn default() -> Self {
        Self::for_orientation(AxisOrientation::Bottom)
    }
}

impl AxisAppearance {
    #[must_use]
    pub fn for_orientation(orientation: AxisOrientation) -> Self {
        Self {
            orientation,
            inner_tick_size: 5.0,
            outer_tick_size: 0.0,
            tick_padding: 6.0,
            stroke: Color::BLACK,
            stroke_opacity: 1.0,
            stroke_width: 1.0,
            tick_stroke: Color::BLACK,
            tick_stroke_opacity: 1.0,
            tick_stroke_width: 1.0,
            tick_stroke_dash: StrokeDash::Solid,
            tick_label_fill: None,
            font_family: DEFAULT_AXIS_FONT_FAMILY.to_owned(),
            font_size: 12.0,
            font_weight: FontWeight::NORMAL,
            show_domain: true,
            show_ticks: true,
            show_tick_labels: true,
            flex_ticks: false,
            transform: (0.0, 0.0),
            range: None,
            zoom: AxisZoomConfig::default(),
        }
    }

    #[must_use]
    pub fn font(&self) -> FontSpec {
        FontSpec::new(self.font_family.clone(), self.font_size, self.font_weight)
    }

    #[must_use]
    pub fn label_fill(&self) -> Color {
        self.tick_label_fill.unwrap_or(self.tick_stroke)
    }

    /// Distance from the domain line to the label anchor.
    #[must_use]
    pub fn tick_spacing(&self) -> f64 {
        self.inner_tick_size.max(0.0) + self.tick_padding
    }

    pub fn validate(&self) -> AxisResult<()> {
        for (name, value) in [
            ("inner_tick_size", self.inner_tick_size),
            ("outer_tick_size", self.outer_tick_size),
            ("tick_padding", self.tick_padding),
            ("transform.x", self.transform.0),
            ("transform.y", self.transform.1),
        ] {
            if !value.is_finite() {
                return Err(AxisError::InvalidConfig(format!("`{name}` must be finite")));
            }
        }
        for (name, value) in [
            ("stroke_width", self.stroke_width),
            ("tick_stroke_width", self.tick_stroke_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AxisError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("stroke_opacity", self.stroke_opacity),
            ("tick_stroke_opacity", self.tick_stroke_opacity),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(AxisError::InvalidConfig(format!(
                    "`{name}` must be in [0, 1]"
                )));
            }
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(AxisError::InvalidConfig(
                "`font_size` must be finite and > 0".to_owned(),
            ));
        }
        if let Some((start, end)) = self.range {
            if !start.is_finite() || !end.is_finite() {
                return Err(AxisError::InvalidConfig("`range` must be finite".to_owned()));
            }
        }
        self.stroke.validate()?;
        self.tick_stroke.validate()?;
        self.label_fill().validate()
    }
}

/// Complete per-render axis configuration: the serializable appearance plus
/// tick policy, formatter hook and thickness protocol.
#[derive(Clone, Default)]
pub struct AxisStyle {
    pub appearance: AxisAppearance,
    pub ticks: TickPolicy,
    pub tick_format: Option<TickLabelFormatterFn>,
    pub thickness_protocol: ThicknessProtocol,
}

impl fmt::Debug for AxisStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisStyle")
            .field("appearance", &self.appearance)
            .field("ticks", &self.ticks)
            .field("has_tick_format", &self.tick_format.is_some())
            .field("thickness_protocol", &self.thickness_protocol)
            .finish()
    }
}

impl AxisStyle {
    #[must_use]
    pub fn new(orientation: AxisOrientation) -> Self {
        Self {
            appearance: AxisAppearance::for_orientation(orientation),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.appearance.orientation
    }

    #[must_use]
    pub fn with_appearance(mut self, appearance: AxisAppearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Explicit tick values, used verbatim.
    #[must_use]
    pub fn with_tick_values(mut self, values: Vec<f64>) -> Self {
        self.ticks.values = Some(TickValues::Explicit(values));
        self
    }

    /// Tick values computed from the scale domain `(min, max)`.
    #[must_use]
    pub fn with_tick_values_fn(
        mut self,
        function: impl Fn((f64, f64)) -> Vec<f64> + Send + Sync + 'static,
    ) -> Self {
        let function: TickValuesFn = std::sync::Arc::new(function);
        self.ticks.values = Some(TickValues::Function(function));
        self
    }

    /// Evenly spaced ticks: `count` intervals starting at the domain minimum.
    #[must_use]
    pub fn with_tick_interval(mut self, count: usize) -> Self {
        self.ticks.interval = Some(super::TickInterval {
            count,
            function: None,
        });
        self
    }

    /// Interval ticks delegated to `function(min, max, count)`.
    #[must_use]
    pub fn with_tick_interval_fn(
        mut self,
        count: usize,
        function: impl Fn(f64, f64, usize) -> Vec<f64> + Send + Sync + 'static,
    ) -> Self {
        let function: TickIntervalFn = std::sync::Arc::new(function);
        self.ticks.interval = Some(super::TickInterval {
            count,
            function: Some(function),
        });
        self
    }

    /// Requested count forwarded to the scale's natural ticks and formatter.
    #[must_use]
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.ticks.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_flex_ticks(mut self, flex_ticks: bool) -> Self {
        self.appearance.flex_ticks = flex_ticks;
        self
    }

    #[must_use]
    pub fn with_tick_format(
        mut self,
        format: impl Fn(f64) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.tick_format = Some(std::sync::Arc::new(format));
        self
    }

    #[must_use]
    pub fn with_thickness_protocol(mut self, protocol: ThicknessProtocol) -> Self {
        self.thickness_protocol = protocol;
        self
    }

    pub fn validate(&self) -> AxisResult<()> {
        self.appearance.validate()
    }
}

mod color_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::render::Color;

    pub(super) fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex_rgba())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

mod option_color_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::render::Color;

    pub(super) fn serialize<S: Serializer>(
        color: &Option<Color>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match color {
            Some(color) => serializer.serialize_some(&color.to_hex_rgba()),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Color>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| Color::from_hex(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisAppearance, AxisOrientation};
    use crate::AxisError;

    #[test]
    fn orientation_parsing_fails_fast_on_unknown_values() {
        assert_eq!(
            "left".parse::<AxisOrientation>().expect("known"),
            AxisOrientation::Left
        );
        let err = "center".parse::<AxisOrientation>().expect_err("unknown orientation");
        assert!(matches!(err, AxisError::InvalidOrientation(value) if value == "center"));
    }

    #[test]
    fn tick_spacing_ignores_negative_inner_ticks() {
        let mut appearance = AxisAppearance::default();
        appearance.inner_tick_size = -4.0;
        appearance.tick_padding = 3.0;
        assert_eq!(appearance.tick_spacing(), 3.0);
    }

    #[test]
    fn validation_rejects_non_positive_font_size() {
        let mut appearance = AxisAppearance::default();
        appearance.font_size = 0.0;
        assert!(appearance.validate().is_err());
    }
}
