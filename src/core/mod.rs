pub mod scale;
pub mod types;

pub use scale::{
    AxisScale, DEFAULT_TICK_COUNT, FLEX_TICK_MIN_SPACING_PX, LinearScale, TickLabelFormatterFn,
};
pub use types::{AxisThickness, ChartMargins, Viewport};
