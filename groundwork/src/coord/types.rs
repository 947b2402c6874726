//! Bounding-box type and validation errors.

use std::fmt;

/// Kilometres spanned by one degree of latitude, roughly constant everywhere.
pub const KM_PER_DEGREE_LAT: f64 = 111.0;

/// Minimum latitude accepted for a box centre.
///
/// Beyond this the cosine correction for longitude degrees degenerates and
/// boxes stop being meaningful.
pub const MIN_LAT: f64 = -85.0;

/// Maximum latitude accepted for a box centre.
pub const MAX_LAT: f64 = 85.0;

/// Minimum longitude accepted for a box centre.
pub const MIN_LON: f64 = -180.0;

/// Maximum longitude accepted for a box centre.
pub const MAX_LON: f64 = 180.0;

/// Rectangular region in geographic coordinates, in degrees.
///
/// Invariant: `west < east` and `south < north`. [`bbox_around`] only
/// produces boxes that satisfy it and stay inside the valid
/// latitude/longitude ranges.
///
/// [`bbox_around`]: crate::coord::bbox_around
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Western edge in degrees of longitude.
    pub west: f64,
    /// Southern edge in degrees of latitude.
    pub south: f64,
    /// Eastern edge in degrees of longitude.
    pub east: f64,
    /// Northern edge in degrees of latitude.
    pub north: f64,
}

impl BoundingBox {
    /// Width of the box in degrees of longitude.
    pub fn width_deg(&self) -> f64 {
        self.east - self.west
    }

    /// Height of the box in degrees of latitude.
    pub fn height_deg(&self) -> f64 {
        self.north - self.south
    }

    /// Centre of the box as `(latitude, longitude)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Returns true if the coordinate lies inside the box (edges inclusive).
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.south
            && latitude <= self.north
            && longitude >= self.west
            && longitude <= self.east
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.west, self.south, self.east, self.north
        )
    }
}

/// Errors from bounding-box construction.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude outside the accepted range.
    InvalidLatitude(f64),

    /// Longitude outside the accepted range.
    InvalidLongitude(f64),

    /// Box size is zero, negative, or not finite.
    InvalidBoxSize(f64),

    /// The requested box would extend past a pole or the antimeridian.
    OutOfBounds(BoundingBox),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(f, "invalid latitude {} (expected {} to {})", lat, MIN_LAT, MAX_LAT)
            }
            CoordError::InvalidLongitude(lon) => {
                write!(f, "invalid longitude {} (expected {} to {})", lon, MIN_LON, MAX_LON)
            }
            CoordError::InvalidBoxSize(km) => {
                write!(f, "invalid box size {} km (expected a positive finite value)", km)
            }
            CoordError::OutOfBounds(bbox) => {
                write!(f, "bounding box {} extends past a pole or the antimeridian", bbox)
            }
        }
    }
}

impl std::error::Error for CoordError {}
