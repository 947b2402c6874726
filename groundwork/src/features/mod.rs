//! Geographic feature model
//!
//! Types shared between the geo-data fetcher and the renderer: tag filters
//! for selecting point-of-interest categories, and the feature collections
//! a fetched map is made of. Coordinates are WGS84 with `x = longitude` and
//! `y = latitude`; tags mirror OpenStreetMap's free-form key/value pairs.

use std::collections::{BTreeMap, HashMap};

use geo_types::{Coord, LineString, MultiPolygon, Point, Polygon};

/// Feature categories retrieved when the caller supplies no tag filter.
pub const DEFAULT_POI_CATEGORIES: [&str; 8] = [
    "amenity", "buildings", "historic", "leisure", "shop", "tourism", "religion", "memorial",
];

/// Selects which values of a tag key qualify a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSelector {
    /// Any value qualifies; the key only has to be present.
    Any,
    /// Only this exact value qualifies.
    Value(String),
}

/// Mapping from feature-category key to a value selector.
///
/// Keys are kept ordered so queries generated from a filter are
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    selectors: BTreeMap<String, TagSelector>,
}

impl TagFilter {
    /// Creates a filter with no categories.
    pub fn empty() -> Self {
        Self {
            selectors: BTreeMap::new(),
        }
    }

    /// Adds a category to the filter.
    pub fn with_tag(mut self, key: impl Into<String>, selector: TagSelector) -> Self {
        self.selectors.insert(key.into(), selector);
        self
    }

    /// Returns true if no categories are selected.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Number of selected categories.
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Iterates over `(key, selector)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagSelector)> {
        self.selectors.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if the tag set satisfies any selector in the filter.
    pub fn matches(&self, tags: &HashMap<String, String>) -> bool {
        self.selectors.iter().any(|(key, selector)| {
            match (tags.get(key), selector) {
                (Some(_), TagSelector::Any) => true,
                (Some(value), TagSelector::Value(wanted)) => value == wanted,
                (None, _) => false,
            }
        })
    }
}

impl Default for TagFilter {
    /// The fixed eight-category filter used when a caller supplies none.
    fn default() -> Self {
        let mut filter = Self::empty();
        for key in DEFAULT_POI_CATEGORIES {
            filter = filter.with_tag(key, TagSelector::Any);
        }
        filter
    }
}

/// Drivable street network inside a bounding box.
///
/// Nodes are the way vertices; edges are the way geometries. Both are kept
/// only for drawing, no connectivity is derived.
#[derive(Debug, Clone, Default)]
pub struct StreetNetwork {
    pub nodes: Vec<Coord<f64>>,
    pub edges: Vec<LineString<f64>>,
}

impl StreetNetwork {
    /// Returns true if the network has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// A building footprint.
#[derive(Debug, Clone)]
pub struct Building {
    pub id: i64,
    pub footprint: Polygon<f64>,
}

/// A tagged point of interest.
#[derive(Debug, Clone)]
pub struct Poi {
    pub id: i64,
    pub location: Point<f64>,
    pub tags: HashMap<String, String>,
}

/// Administrative boundary of a named place.
///
/// `polygons` may be empty when the geocoder resolves the place to a point
/// rather than an area; the renderer then draws no background fill.
#[derive(Debug, Clone)]
pub struct PlaceBoundary {
    pub display_name: String,
    pub polygons: MultiPolygon<f64>,
}

/// The four feature collections composited into one map figure.
#[derive(Debug, Clone)]
pub struct MapLayers {
    pub boundary: PlaceBoundary,
    pub streets: StreetNetwork,
    pub buildings: Vec<Building>,
    pub pois: Vec<Poi>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_filter_has_eight_categories() {
        let filter = TagFilter::default();
        assert_eq!(filter.len(), 8);
        for key in DEFAULT_POI_CATEGORIES {
            assert!(
                filter.iter().any(|(k, _)| k == key),
                "Default filter should include '{}'",
                key
            );
        }
    }

    #[test]
    fn test_any_selector_matches_key_presence() {
        let filter = TagFilter::empty().with_tag("amenity", TagSelector::Any);
        assert!(filter.matches(&tags(&[("amenity", "cafe")])));
        assert!(filter.matches(&tags(&[("amenity", "school")])));
        assert!(!filter.matches(&tags(&[("shop", "bakery")])));
    }

    #[test]
    fn test_value_selector_matches_exact_value() {
        let filter =
            TagFilter::empty().with_tag("religion", TagSelector::Value("buddhist".to_string()));
        assert!(filter.matches(&tags(&[("religion", "buddhist")])));
        assert!(!filter.matches(&tags(&[("religion", "christian")])));
    }

    #[test]
    fn test_empty_filter_matches_nothing() {
        let filter = TagFilter::empty();
        assert!(filter.is_empty());
        assert!(!filter.matches(&tags(&[("amenity", "cafe")])));
    }

    #[test]
    fn test_filter_iteration_is_key_ordered() {
        let filter = TagFilter::empty()
            .with_tag("shop", TagSelector::Any)
            .with_tag("amenity", TagSelector::Any)
            .with_tag("historic", TagSelector::Any);
        let keys: Vec<&str> = filter.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["amenity", "historic", "shop"]);
    }

    #[test]
    fn test_street_network_emptiness_tracks_edges() {
        let mut network = StreetNetwork::default();
        assert!(network.is_empty());

        network.edges.push(LineString::new(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
        ]));
        assert!(!network.is_empty());
    }
}
