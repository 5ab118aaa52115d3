//! chart-axis: axis tick-layout engine for canvas financial charts.
//!
//! The crate computes tick values, screen-space tick geometry, collision-free
//! label placement and measured axis thickness, and feeds that thickness back
//! into a chart container whose margins grow until the layout is stable.
//! Drawing goes through the [`render::DrawingSurface`] trait so layout stays
//! independent from any particular canvas backend.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{AutoMarginCoordinator, AxisChart, AxisRenderer, AxisStyle};
pub use error::{AxisError, AxisResult};
