//! Geographic data provider abstraction
//!
//! This module provides the clients used to fetch map data from external
//! services: Overpass for street networks, buildings, and tagged features,
//! and Nominatim for resolving place names to boundary polygons. Both are
//! generic over an [`HttpClient`] trait so tests run against canned
//! responses instead of the network.

mod http;
mod nominatim;
mod overpass;
mod types;

pub use http::{HttpClient, ReqwestClient};
pub use nominatim::{NominatimClient, DEFAULT_NOMINATIM_URL};
pub use overpass::{OverpassClient, DEFAULT_OVERPASS_URL};
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::{MockHttpClient, SequencedHttpClient};
