//! Groundwork - a three-stage data workflow with city-map rendering
//!
//! This library provides the core functionality for a small "access, assess,
//! address" data workflow: loading a CSV table, checking its quality, and
//! visualising a place by fetching OpenStreetMap street networks, building
//! footprints, and points of interest for a bounding box and compositing
//! them into a single map figure.

pub mod config;
pub mod coord;
pub mod dataset;
pub mod features;
pub mod map;
pub mod provider;
pub mod render;
pub mod telemetry;

pub use coord::{bbox_around, BoundingBox, CoordError};
pub use features::{MapLayers, TagFilter, TagSelector};
pub use map::{plot_city_map, MapRequest};

/// Library version, taken from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty(), "Version should not be empty");
    }
}
