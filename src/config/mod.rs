//! Configuration module for the charting kernel.

mod chart;
mod persistence;
mod types;

pub use chart::{CHART, ChartConfig};
pub use persistence::{PERSISTENCE, document_filename};
pub use types::{FontDescription, Price, PriceLike, PriceScaleMode, Rgba};
