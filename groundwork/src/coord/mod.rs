//! Bounding-box construction
//!
//! Converts a centre coordinate and a box edge length in kilometres into a
//! west/south/east/north bounding box in degrees, the unit spatial queries
//! are scoped by.

mod types;

pub use types::{
    BoundingBox, CoordError, KM_PER_DEGREE_LAT, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON,
};

/// Computes the bounding box centred on a coordinate.
///
/// One degree of latitude spans about 111 km everywhere; one degree of
/// longitude spans 111 km times the cosine of the latitude, so the
/// longitude extent is widened accordingly to keep the box square on the
/// ground.
///
/// # Arguments
///
/// * `latitude` - Centre latitude in degrees (-85.0 to 85.0)
/// * `longitude` - Centre longitude in degrees (-180.0 to 180.0)
/// * `box_size_km` - Edge length of the box in kilometres
///
/// # Returns
///
/// A `Result` containing the bounding box, or an error if the centre is
/// out of range or the box would cross a pole or the antimeridian.
pub fn bbox_around(
    latitude: f64,
    longitude: f64,
    box_size_km: f64,
) -> Result<BoundingBox, CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&latitude) {
        return Err(CoordError::InvalidLatitude(latitude));
    }
    if !(MIN_LON..=MAX_LON).contains(&longitude) {
        return Err(CoordError::InvalidLongitude(longitude));
    }
    if !box_size_km.is_finite() || box_size_km <= 0.0 {
        return Err(CoordError::InvalidBoxSize(box_size_km));
    }

    let lat_degree_size = box_size_km / KM_PER_DEGREE_LAT;
    let lon_degree_size = box_size_km / (KM_PER_DEGREE_LAT * latitude.to_radians().cos());

    let bbox = BoundingBox {
        west: longitude - lon_degree_size / 2.0,
        south: latitude - lat_degree_size / 2.0,
        east: longitude + lon_degree_size / 2.0,
        north: latitude + lat_degree_size / 2.0,
    };

    if bbox.south < -90.0 || bbox.north > 90.0 || bbox.west < MIN_LON || bbox.east > MAX_LON {
        return Err(CoordError::OutOfBounds(bbox));
    }

    Ok(bbox)
}
