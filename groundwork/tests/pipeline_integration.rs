//! End-to-end pipeline test: bounding box, fetch, render against canned
//! provider responses.

use std::collections::VecDeque;
use std::sync::Mutex;

use groundwork::coord::bbox_around;
use groundwork::map::{fetch_map_layers, plot_city_map, MapRequest};
use groundwork::provider::{HttpClient, NominatimClient, OverpassClient, ProviderError};
use groundwork::render::{render_map, MapStyle, RenderConfig};

/// Answers requests from a queue, in order.
struct ScriptedClient {
    responses: Mutex<VecDeque<Result<Vec<u8>, ProviderError>>>,
}

impl ScriptedClient {
    fn new(responses: Vec<Result<Vec<u8>, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }

    fn next(&self) -> Result<Vec<u8>, ProviderError> {
        self.responses
            .lock()
            .expect("response queue poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Http("no scripted response left".into())))
    }
}

impl HttpClient for ScriptedClient {
    fn get(&self, _url: &str, _query: &[(&str, &str)]) -> Result<Vec<u8>, ProviderError> {
        self.next()
    }

    fn post_form(&self, _url: &str, _form: &[(&str, &str)]) -> Result<Vec<u8>, ProviderError> {
        self.next()
    }
}

fn street_json() -> Vec<u8> {
    br#"{
        "elements": [
            {"type": "node", "id": 1, "lat": 52.200, "lon": 0.108},
            {"type": "node", "id": 2, "lat": 52.205, "lon": 0.113},
            {"type": "node", "id": 3, "lat": 52.210, "lon": 0.118},
            {"type": "way", "id": 10, "nodes": [1, 2, 3],
             "tags": {"highway": "primary", "name": "Hills Road"}},
            {"type": "way", "id": 11, "nodes": [2, 3],
             "tags": {"highway": "residential"}}
        ]
    }"#
    .to_vec()
}

fn boundary_json() -> Vec<u8> {
    br#"[{
        "place_id": 5,
        "display_name": "Cambridge, Cambridgeshire, England, United Kingdom",
        "lat": "52.2054",
        "lon": "0.1132",
        "geojson": {
            "type": "Polygon",
            "coordinates": [[[0.05, 52.15], [0.18, 52.15], [0.18, 52.25],
                             [0.05, 52.25], [0.05, 52.15]]]
        }
    }]"#
    .to_vec()
}

fn buildings_json() -> Vec<u8> {
    br#"{
        "elements": [
            {"type": "node", "id": 100, "lat": 52.2050, "lon": 0.1120},
            {"type": "node", "id": 101, "lat": 52.2050, "lon": 0.1125},
            {"type": "node", "id": 102, "lat": 52.2055, "lon": 0.1125},
            {"type": "node", "id": 103, "lat": 52.2055, "lon": 0.1120},
            {"type": "way", "id": 110, "nodes": [100, 101, 102, 103, 100],
             "tags": {"building": "college"}}
        ]
    }"#
    .to_vec()
}

fn pois_json() -> Vec<u8> {
    br#"{
        "elements": [
            {"type": "node", "id": 200, "lat": 52.2060, "lon": 0.1140,
             "tags": {"amenity": "cafe", "name": "Fitzbillies"}},
            {"type": "node", "id": 201, "lat": 52.2045, "lon": 0.1128,
             "tags": {"tourism": "museum"}}
        ]
    }"#
    .to_vec()
}

fn scripted_happy_path() -> ScriptedClient {
    ScriptedClient::new(vec![
        Ok(street_json()),
        Ok(boundary_json()),
        Ok(buildings_json()),
        Ok(pois_json()),
    ])
}

#[test]
fn fetch_and_render_full_pipeline() {
    let client = scripted_happy_path();
    let overpass = OverpassClient::new(&client);
    let nominatim = NominatimClient::new(&client);

    let request = MapRequest::new("Cambridge", 52.2054, 0.1132);
    let bbox = bbox_around(request.latitude, request.longitude, request.box_size_km).unwrap();

    let layers = fetch_map_layers(&overpass, &nominatim, &bbox, &request).unwrap();
    assert_eq!(layers.streets.edges.len(), 2);
    assert_eq!(layers.streets.nodes.len(), 3);
    assert_eq!(layers.buildings.len(), 1);
    assert_eq!(layers.pois.len(), 2);
    assert!(layers.boundary.display_name.starts_with("Cambridge"));

    let config = RenderConfig {
        width: 200,
        height: 200,
    };
    let figure = render_map(&layers, &bbox, &config, &MapStyle::default()).unwrap();
    assert_eq!(figure.width(), 200);
    assert_eq!(figure.height(), 200);
}

#[test]
fn plot_returns_figure_on_success() {
    let client = scripted_happy_path();
    let overpass = OverpassClient::new(&client);
    let nominatim = NominatimClient::new(&client);

    let request = MapRequest::new("Cambridge", 52.2054, 0.1132);
    let figure = plot_city_map(
        &overpass,
        &nominatim,
        &request,
        &RenderConfig {
            width: 64,
            height: 64,
        },
        &MapStyle::default(),
    );
    assert!(figure.is_some());
}

#[test]
fn plot_swallows_mid_pipeline_failure() {
    // Street fetch succeeds, geocoding fails
    let client = ScriptedClient::new(vec![
        Ok(street_json()),
        Err(ProviderError::Http("connection reset".into())),
    ]);
    let overpass = OverpassClient::new(&client);
    let nominatim = NominatimClient::new(&client);

    let request = MapRequest::new("Cambridge", 52.2054, 0.1132);
    let figure = plot_city_map(
        &overpass,
        &nominatim,
        &request,
        &RenderConfig::default(),
        &MapStyle::default(),
    );
    assert!(figure.is_none());
}

#[test]
fn plot_swallows_unknown_place() {
    let client = ScriptedClient::new(vec![
        Ok(street_json()),
        Ok(b"[]".to_vec()),
    ]);
    let overpass = OverpassClient::new(&client);
    let nominatim = NominatimClient::new(&client);

    let request = MapRequest::new("Atlantis", 52.2054, 0.1132);
    let figure = plot_city_map(
        &overpass,
        &nominatim,
        &request,
        &RenderConfig::default(),
        &MapStyle::default(),
    );
    assert!(figure.is_none());
}
