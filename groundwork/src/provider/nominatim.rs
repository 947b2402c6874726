//! Nominatim geocoding client.
//!
//! Resolves a free-text place name to its administrative boundary polygon
//! via the Nominatim search API with `polygon_geojson` output.

use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use tracing::debug;

use crate::features::PlaceBoundary;
use crate::provider::{HttpClient, ProviderError};

/// Default public Nominatim endpoint.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim geocoding client.
///
/// Generic over [`HttpClient`] so tests can substitute canned responses.
pub struct NominatimClient<C: HttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: HttpClient> NominatimClient<C> {
    /// Creates a client against the default public endpoint.
    pub fn new(http_client: C) -> Self {
        Self {
            http_client,
            base_url: DEFAULT_NOMINATIM_URL.to_string(),
        }
    }

    /// Set the endpoint URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Resolves a place name to its boundary.
    ///
    /// Takes the first search result. Places that geocode to a point or a
    /// line rather than an area yield a boundary with no polygons.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::PlaceNotFound` when the search comes back
    /// empty, and the usual HTTP/decode errors otherwise.
    pub fn boundary(&self, place_name: &str) -> Result<PlaceBoundary, ProviderError> {
        let url = format!("{}/search", self.base_url);
        debug!(url = %url, place = place_name, "geocoding place");

        let body = self.http_client.get(
            &url,
            &[
                ("q", place_name),
                ("format", "jsonv2"),
                ("limit", "1"),
                ("polygon_geojson", "1"),
            ],
        )?;

        let places: Vec<NominatimPlace> =
            serde_json::from_slice(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::PlaceNotFound(place_name.to_string()))?;

        let polygons = match place.geojson {
            Some(geometry) => geometry.into_polygons()?,
            None => MultiPolygon::new(Vec::new()),
        };

        Ok(PlaceBoundary {
            display_name: place.display_name,
            polygons,
        })
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    #[serde(default)]
    geojson: Option<GeoJsonGeometry>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonGeometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: serde_json::Value,
}

/// A GeoJSON position pair, `[longitude, latitude]`.
type GeoJsonRing = Vec<[f64; 2]>;

impl GeoJsonGeometry {
    /// Converts the geometry to polygons.
    ///
    /// Non-areal geometries (points, lines) produce an empty collection.
    fn into_polygons(self) -> Result<MultiPolygon<f64>, ProviderError> {
        match self.kind.as_str() {
            "Polygon" => {
                let rings: Vec<GeoJsonRing> = serde_json::from_value(self.coordinates)
                    .map_err(|e| ProviderError::Decode(e.to_string()))?;
                Ok(MultiPolygon::new(vec![polygon_from_rings(rings)]))
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<GeoJsonRing>> = serde_json::from_value(self.coordinates)
                    .map_err(|e| ProviderError::Decode(e.to_string()))?;
                Ok(MultiPolygon::new(
                    polygons.into_iter().map(polygon_from_rings).collect(),
                ))
            }
            _ => Ok(MultiPolygon::new(Vec::new())),
        }
    }
}

fn polygon_from_rings(rings: Vec<GeoJsonRing>) -> Polygon<f64> {
    let mut rings = rings.into_iter().map(|ring| {
        LineString::new(
            ring.into_iter()
                .map(|[lon, lat]| Coord { x: lon, y: lat })
                .collect(),
        )
    });

    let exterior = rings.next().unwrap_or_else(|| LineString::new(Vec::new()));
    Polygon::new(exterior, rings.collect())
}
