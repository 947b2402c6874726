//! City-map pipeline: bounding box, fetch, render.
//!
//! The "address" stage of the workflow. Control flow is strictly linear:
//! compute the bounding box, fetch the four feature layers, composite them
//! into a figure. [`plot_city_map`] is the catch-all boundary: any failure
//! along the way is reported as a single diagnostic and converted into an
//! absent result.

use std::fmt::Display;

use tiny_skia::Pixmap;
use tracing::{error, info};

use crate::coord::{bbox_around, BoundingBox};
use crate::features::{MapLayers, TagFilter};
use crate::provider::{HttpClient, NominatimClient, OverpassClient, ProviderError};
use crate::render::{render_map, MapStyle, RenderConfig};

/// Default bounding-box edge length in kilometres.
pub const DEFAULT_BOX_SIZE_KM: f64 = 2.0;

/// A request to visualise the surroundings of a coordinate.
#[derive(Debug, Clone)]
pub struct MapRequest {
    /// Name of the place, resolved to a boundary polygon and used to name
    /// the figure.
    pub place_name: String,

    /// Latitude of the centre point in degrees.
    pub latitude: f64,

    /// Longitude of the centre point in degrees.
    pub longitude: f64,

    /// Edge length of the bounding box in kilometres.
    pub box_size_km: f64,

    /// Point-of-interest categories to include; `None` selects the default
    /// eight-category filter.
    pub tags: Option<TagFilter>,
}

impl MapRequest {
    /// Creates a request with the default box size and tag filter.
    pub fn new(place_name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            place_name: place_name.into(),
            latitude,
            longitude,
            box_size_km: DEFAULT_BOX_SIZE_KM,
            tags: None,
        }
    }

    /// Set the bounding-box edge length.
    pub fn with_box_size_km(mut self, box_size_km: f64) -> Self {
        self.box_size_km = box_size_km;
        self
    }

    /// Set the point-of-interest tag filter.
    pub fn with_tags(mut self, tags: TagFilter) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// Fetches the four feature layers for a request, in order: street
/// network, place boundary, buildings, points of interest.
///
/// The first failure aborts the fetch; there are no partial results and no
/// retries.
pub fn fetch_map_layers<C: HttpClient>(
    overpass: &OverpassClient<C>,
    nominatim: &NominatimClient<C>,
    bbox: &BoundingBox,
    request: &MapRequest,
) -> Result<MapLayers, ProviderError> {
    let streets = overpass.street_network(bbox)?;
    let boundary = nominatim.boundary(&request.place_name)?;
    let buildings = overpass.buildings(bbox)?;

    let tags = request.tags.clone().unwrap_or_default();
    let pois = overpass.pois(bbox, &tags)?;

    Ok(MapLayers {
        boundary,
        streets,
        buildings,
        pois,
    })
}

/// Runs the whole pipeline and swallows failures at this boundary.
///
/// On success returns the rendered figure. On any failure - bad
/// coordinates, provider errors, rendering errors - logs one diagnostic
/// naming the place, the coordinate, and the box size, then returns `None`.
/// Never panics and never propagates the error further.
pub fn plot_city_map<C: HttpClient>(
    overpass: &OverpassClient<C>,
    nominatim: &NominatimClient<C>,
    request: &MapRequest,
    config: &RenderConfig,
    style: &MapStyle,
) -> Option<Pixmap> {
    let bbox = match bbox_around(request.latitude, request.longitude, request.box_size_km) {
        Ok(bbox) => bbox,
        Err(e) => {
            error!("{}", failure_diagnostic(request, &e));
            return None;
        }
    };

    info!(
        place = %request.place_name,
        bbox = %bbox,
        "fetching map layers"
    );

    let layers = match fetch_map_layers(overpass, nominatim, &bbox, request) {
        Ok(layers) => layers,
        Err(e) => {
            error!("{}", failure_diagnostic(request, &e));
            return None;
        }
    };

    match render_map(&layers, &bbox, config, style) {
        Ok(pixmap) => Some(pixmap),
        Err(e) => {
            error!("{}", failure_diagnostic(request, &e));
            None
        }
    }
}

/// One-line diagnostic naming the place, coordinate, and box size.
fn failure_diagnostic(request: &MapRequest, error: &dyn Display) -> String {
    format!(
        "could not plot map for {} at ({}, {}) with box size {} km: {}",
        request.place_name, request.latitude, request.longitude, request.box_size_km, error
    )
}
