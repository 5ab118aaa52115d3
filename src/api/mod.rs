mod auto_margin_coordinator;
mod axis_collision_resolver;
mod axis_config;
mod axis_label_format;
mod axis_label_measurement_cache;
mod axis_renderer;
mod axis_tick_generator;
mod axis_tick_layout_planner;
mod chart_container;
mod json_contract;

pub use auto_margin_coordinator::{AutoMarginCoordinator, AxisSide, DEFAULT_BASE_PADDING_PX};
pub use axis_collision_resolver::{
    COLLISION_ITERATIONS, COLLISION_MIN_SEPARATION_PX, COLLISION_SETTLE_EPSILON_PX,
    RelaxationParams, collision_resolution_applies, relax_positions, resolve_tick_collisions,
};
pub use axis_config::{
    AxisAppearance, AxisOrientation, AxisStyle, AxisZoomConfig, DEFAULT_AXIS_FONT_FAMILY,
    ThicknessProtocol,
};
pub use axis_label_format::{
    fixed_decimals_formatter, format_tick_label, resolve_tick_formatter, utc_timestamp_formatter,
};
pub use axis_label_measurement_cache::{
    LabelExtent, LabelMeasurementCache, MeasurementCache, MeasurementCacheStats, StyleKey,
};
pub use axis_renderer::{
    AxisDrawOutput, AxisLayoutState, AxisRenderer, ThicknessReport, ZoomCaptureRegion,
};
pub use axis_tick_generator::{
    GeneratedTicks, TickInterval, TickIntervalFn, TickPolicy, TickSource, TickValues,
    TickValuesFn, evenly_spaced_ticks, generate_tick_values,
};
pub use axis_tick_layout_planner::{TickLayout, TickSpec, plan_tick_layout};
pub use chart_container::{AxisChart, LayoutConvergence, LayoutPass, PlotArea};
pub use json_contract::{AXIS_APPEARANCE_JSON_SCHEMA_V1, AxisAppearanceJsonContractV1};
