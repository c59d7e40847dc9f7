//! Coordinate system for the chart surface.
//!
//! - [`ChartScaling`]: aspect between the time and price axes, plus linear/log price mode
//! - [`CoordinateConverter`]: scene <-> timestamp/price
//! - [`Viewport`]: view pixels <-> scene under scroll and zoom
//!
//! # Example
//!
//! ```ignore
//! use cycle_charter::coords::{ChartScaling, CoordinateConverter, Viewport};
//!
//! let conv = CoordinateConverter::utc(ChartScaling::default())?;
//! let viewport = Viewport::from_scaling(conv.scaling(), 1920.0, 1080.0);
//!
//! // Mouse position to chart values
//! let scene = viewport.view_to_scene(ViewPos::new(960.0, 540.0));
//! let (when, price) = conv.scene_pos_to_domain(scene)?;
//! ```

mod converter;
mod scaling;
mod viewport;

pub use converter::CoordinateConverter;
pub use scaling::ChartScaling;
pub use viewport::Viewport;
