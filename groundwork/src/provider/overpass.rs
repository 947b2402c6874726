//! Overpass API client.
//!
//! Fetches the drivable street network, building footprints, and tagged
//! point-of-interest features for a bounding box from an Overpass API
//! endpoint. Queries are sent as Overpass QL over form-encoded POST and
//! answered as JSON element lists.
//!
//! # Element assembly
//!
//! Overpass returns flat node/way lists; ways reference nodes by id. The
//! client resolves references into concrete geometries: ways become
//! polylines, closed `building` ways become polygons, and matching ways in
//! a POI query are reduced to their centroid point.

use std::collections::{HashMap, HashSet};

use geo_types::{Coord, LineString, Point, Polygon};
use serde::Deserialize;
use tracing::debug;

use crate::coord::BoundingBox;
use crate::features::{Building, Poi, StreetNetwork, TagFilter, TagSelector};
use crate::provider::{HttpClient, ProviderError};

/// Default public Overpass API endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Default server-side query timeout in seconds.
const DEFAULT_QUERY_TIMEOUT_SECS: u32 = 60;

/// Highway classes excluded from the drivable street network.
///
/// Matches the usual "drive" selection: footpaths, cycleways, service ways
/// and under-construction roads are left out.
const NON_DRIVABLE_HIGHWAYS: &str = "abandoned|bridleway|bus_guideway|busway|construction|\
corridor|cycleway|elevator|escalator|footway|path|pedestrian|planned|platform|proposed|\
raceway|razed|service|steps|track";

/// Overpass API client.
///
/// Generic over [`HttpClient`] so tests can substitute canned responses.
pub struct OverpassClient<C: HttpClient> {
    http_client: C,
    base_url: String,
    query_timeout_secs: u32,
}

impl<C: HttpClient> OverpassClient<C> {
    /// Creates a client against the default public endpoint.
    pub fn new(http_client: C) -> Self {
        Self {
            http_client,
            base_url: DEFAULT_OVERPASS_URL.to_string(),
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }

    /// Set the endpoint URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the server-side query timeout.
    pub fn with_query_timeout_secs(mut self, secs: u32) -> Self {
        self.query_timeout_secs = secs;
        self
    }

    /// Fetches the drivable street network inside the bounding box.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Empty` if the area contains no drivable
    /// ways, and the usual HTTP/decode errors otherwise.
    pub fn street_network(&self, bbox: &BoundingBox) -> Result<StreetNetwork, ProviderError> {
        let query = drive_network_query(bbox, self.query_timeout_secs);
        let elements = self.run_query(&query)?;
        let network = assemble_street_network(&elements);

        if network.is_empty() {
            return Err(ProviderError::Empty("street network"));
        }

        debug!(
            nodes = network.nodes.len(),
            edges = network.edges.len(),
            "assembled street network"
        );
        Ok(network)
    }

    /// Fetches building footprints inside the bounding box.
    ///
    /// Open (unclosed) building ways are skipped. An area without buildings
    /// yields an empty vector, not an error.
    pub fn buildings(&self, bbox: &BoundingBox) -> Result<Vec<Building>, ProviderError> {
        let query = buildings_query(bbox, self.query_timeout_secs);
        let elements = self.run_query(&query)?;
        let buildings = assemble_buildings(&elements);

        debug!(count = buildings.len(), "assembled building footprints");
        Ok(buildings)
    }

    /// Fetches features matching the tag filter inside the bounding box.
    ///
    /// Matching nodes become points directly; matching ways are reduced to
    /// their centroid. An empty filter or an area without matches yields an
    /// empty vector, not an error.
    pub fn pois(&self, bbox: &BoundingBox, filter: &TagFilter) -> Result<Vec<Poi>, ProviderError> {
        if filter.is_empty() {
            return Ok(Vec::new());
        }

        let query = poi_query(bbox, filter, self.query_timeout_secs);
        let elements = self.run_query(&query)?;
        let pois = assemble_pois(&elements, filter);

        debug!(count = pois.len(), "assembled points of interest");
        Ok(pois)
    }

    fn run_query(&self, query: &str) -> Result<Vec<OverpassElement>, ProviderError> {
        debug!(url = %self.base_url, "sending Overpass query");
        let body = self
            .http_client
            .post_form(&self.base_url, &[("data", query)])?;

        let response: OverpassResponse =
            serde_json::from_slice(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;
        Ok(response.elements)
    }
}

/// Formats a bounding box as the Overpass `(south,west,north,east)` clause.
fn bbox_clause(bbox: &BoundingBox) -> String {
    format!("({},{},{},{})", bbox.south, bbox.west, bbox.north, bbox.east)
}

/// Builds the Overpass QL query for the drivable street network.
fn drive_network_query(bbox: &BoundingBox, timeout_secs: u32) -> String {
    format!(
        "[out:json][timeout:{timeout}];\n\
         way[\"highway\"][\"area\"!~\"yes\"][\"highway\"!~\"^({excluded})$\"]{bbox};\n\
         (._;>;);\n\
         out body;",
        timeout = timeout_secs,
        excluded = NON_DRIVABLE_HIGHWAYS,
        bbox = bbox_clause(bbox),
    )
}

/// Builds the Overpass QL query for building footprints.
fn buildings_query(bbox: &BoundingBox, timeout_secs: u32) -> String {
    format!(
        "[out:json][timeout:{timeout}];\n\
         way[\"building\"]{bbox};\n\
         (._;>;);\n\
         out body;",
        timeout = timeout_secs,
        bbox = bbox_clause(bbox),
    )
}

/// Builds the Overpass QL query for features matching a tag filter.
fn poi_query(bbox: &BoundingBox, filter: &TagFilter, timeout_secs: u32) -> String {
    let bbox = bbox_clause(bbox);
    let mut union = String::new();
    for (key, selector) in filter.iter() {
        let tag_clause = match selector {
            TagSelector::Any => format!("[\"{}\"]", key),
            TagSelector::Value(value) => format!("[\"{}\"=\"{}\"]", key, value),
        };
        union.push_str(&format!(
            "node{clause}{bbox};way{clause}{bbox};",
            clause = tag_clause,
            bbox = bbox
        ));
    }

    format!(
        "[out:json][timeout:{timeout}];\n\
         ({union});\n\
         (._;>;);\n\
         out body;",
        timeout = timeout_secs,
        union = union,
    )
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OverpassElement {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    // Multipolygon relations are not resolved; their member ways still
    // arrive as plain ways.
    Relation {
        #[allow(dead_code)]
        id: i64,
    },
}

/// Index of node id to coordinate for resolving way references.
fn node_index(elements: &[OverpassElement]) -> HashMap<i64, Coord<f64>> {
    elements
        .iter()
        .filter_map(|element| match element {
            OverpassElement::Node { id, lat, lon, .. } => {
                Some((*id, Coord { x: *lon, y: *lat }))
            }
            _ => None,
        })
        .collect()
}

/// Resolves a way's node references into coordinates, skipping missing ids.
fn way_coords(nodes: &[i64], index: &HashMap<i64, Coord<f64>>) -> Vec<Coord<f64>> {
    nodes.iter().filter_map(|id| index.get(id).copied()).collect()
}

fn assemble_street_network(elements: &[OverpassElement]) -> StreetNetwork {
    let index = node_index(elements);
    let mut network = StreetNetwork::default();
    let mut used_nodes: HashSet<i64> = HashSet::new();

    for element in elements {
        if let OverpassElement::Way { nodes, tags, .. } = element {
            if !tags.contains_key("highway") {
                continue;
            }
            let coords = way_coords(nodes, &index);
            if coords.len() < 2 {
                continue;
            }
            network.edges.push(LineString::new(coords));
            used_nodes.extend(nodes.iter().copied());
        }
    }

    network.nodes = used_nodes
        .into_iter()
        .filter_map(|id| index.get(&id).copied())
        .collect();
    network
}

fn assemble_buildings(elements: &[OverpassElement]) -> Vec<Building> {
    let index = node_index(elements);
    let mut buildings = Vec::new();

    for element in elements {
        if let OverpassElement::Way { id, nodes, tags } = element {
            if !tags.contains_key("building") {
                continue;
            }
            // A closed ring repeats its first node last and needs at least
            // three distinct corners.
            if nodes.len() < 4 || nodes.first() != nodes.last() {
                continue;
            }
            let coords = way_coords(nodes, &index);
            if coords.len() < 4 {
                continue;
            }
            buildings.push(Building {
                id: *id,
                footprint: Polygon::new(LineString::new(coords), Vec::new()),
            });
        }
    }

    buildings
}

fn assemble_pois(elements: &[OverpassElement], filter: &TagFilter) -> Vec<Poi> {
    let index = node_index(elements);
    let mut pois = Vec::new();

    for element in elements {
        match element {
            OverpassElement::Node { id, lat, lon, tags } if filter.matches(tags) => {
                pois.push(Poi {
                    id: *id,
                    location: Point::new(*lon, *lat),
                    tags: tags.clone(),
                });
            }
            OverpassElement::Way { id, nodes, tags } if filter.matches(tags) => {
                if let Some(location) = centroid(&way_coords(nodes, &index)) {
                    pois.push(Poi {
                        id: *id,
                        location,
                        tags: tags.clone(),
                    });
                }
            }
            _ => {}
        }
    }

    pois
}

/// Mean of the coordinates, dropping the closing duplicate of a ring.
fn centroid(coords: &[Coord<f64>]) -> Option<Point<f64>> {
    let ring = match coords {
        [] => return None,
        [rest @ .., last] if rest.first() == Some(last) => rest,
        all => all,
    };
    if ring.is_empty() {
        return None;
    }

    let n = ring.len() as f64;
    let (sum_x, sum_y) = ring
        .iter()
        .fold((0.0, 0.0), |(x, y), c| (x + c.x, y + c.y));
    Some(Point::new(sum_x / n, sum_y / n))
}
