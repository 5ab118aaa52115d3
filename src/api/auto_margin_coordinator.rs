use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{AxisThickness, ChartMargins};
use crate::error::{AxisError, AxisResult};

use super::{AxisOrientation, ThicknessReport};

/// Padding added to every side on top of the reported axis thickness.
pub const DEFAULT_BASE_PADDING_PX: f64 = 20.0;

/// Side of the plot area an axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl AxisSide {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Top => 2,
            Self::Bottom => 3,
        }
    }
}

impl From<AxisSide> for AxisOrientation {
    fn from(side: AxisSide) -> Self {
        match side {
            AxisSide::Left => Self::Left,
            AxisSide::Right => Self::Right,
            AxisSide::Top => Self::Top,
            AxisSide::Bottom => Self::Bottom,
        }
    }
}

impl fmt::Display for AxisSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(AxisOrientation::from(*self).as_str())
    }
}

/// Accumulates the largest thickness reported per side and derives the
/// container margins from it.
///
/// Stored thickness never decreases until [`AutoMarginCoordinator::reset`],
/// so a shrinking report cannot make margins oscillate.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoMarginCoordinator {
    thickness: [AxisThickness; 4],
    base_padding_px: f64,
    growth_events: u64,
}

impl Default for AutoMarginCoordinator {
    fn default() -> Self {
        Self {
            thickness: [AxisThickness::ZERO; 4],
            base_padding_px: DEFAULT_BASE_PADDING_PX,
            growth_events: 0,
        }
    }
}

impl AutoMarginCoordinator {
    pub fn new(base_padding_px: f64) -> AxisResult<Self> {
        if !base_padding_px.is_finite() || base_padding_px < 0.0 {
            return Err(AxisError::InvalidConfig(
                "margin base padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            base_padding_px,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn base_padding_px(&self) -> f64 {
        self.base_padding_px
    }

    /// Applies one axis report. Returns `true` when the side grew.
    pub fn report(&mut self, side: AxisSide, report: ThicknessReport) -> bool {
        self.report_thickness(side, report.thickness_for(side.into()))
    }

    /// Non-finite or negative reports are ignored.
    pub fn report_thickness(&mut self, side: AxisSide, thickness: AxisThickness) -> bool {
        if !thickness.is_finite() || thickness.width < 0.0 || thickness.height < 0.0 {
            warn!(%side, ?thickness, "ignoring invalid axis thickness report");
            return false;
        }

        let stored = &mut self.thickness[side.index()];
        if !thickness.exceeds(*stored) {
            return false;
        }
        let grown = stored.max(thickness);
        debug!(
            %side,
            from_width = stored.width,
            from_height = stored.height,
            to_width = grown.width,
            to_height = grown.height,
            "axis margin grew"
        );
        *stored = grown;
        self.growth_events = self.growth_events.saturating_add(1);
        true
    }

    #[must_use]
    pub fn thickness(&self, side: AxisSide) -> AxisThickness {
        self.thickness[side.index()]
    }

    /// Accumulated thickness along the side's outward direction.
    #[must_use]
    pub fn side_extent(&self, side: AxisSide) -> f64 {
        let thickness = self.thickness(side);
        if side.is_horizontal() {
            thickness.height
        } else {
            thickness.width
        }
    }

    #[must_use]
    pub fn margins(&self) -> ChartMargins {
        let margin = |side| self.side_extent(side) + self.base_padding_px;
        ChartMargins {
            left: margin(AxisSide::Left),
            right: margin(AxisSide::Right),
            top: margin(AxisSide::Top),
            bottom: margin(AxisSide::Bottom),
        }
    }

    #[must_use]
    pub fn growth_events(&self) -> u64 {
        self.growth_events
    }

    /// Starts a new convergence sequence from zero thickness.
    pub fn reset(&mut self) {
        self.thickness = [AxisThickness::ZERO; 4];
        self.growth_events = 0;
    }
}
