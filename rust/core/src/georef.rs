// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local Cartesian frame for WGS84 coordinates
//!
//! Equirectangular approximation around an origin: longitude and latitude
//! offsets are scaled to meters using the Earth's circumference, altitude is
//! taken relative to the origin altitude. Accurate enough for a neighborhood
//! of a few kilometers, which is what a single download covers.

/// Equatorial circumference in meters
pub const EARTH_CIRCUMFERENCE_EQUATORIAL: f64 = 40075.017e3;
/// Polar (meridional) circumference in meters
pub const EARTH_CIRCUMFERENCE_POLAR: f64 = 40007.863e3;
/// Meters per degree of latitude
pub const METERS_PER_LAT_DEG: f64 = EARTH_CIRCUMFERENCE_POLAR / 360.0;

/// East/north/up frame anchored at a WGS84 origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub origin_latitude: f64,
    pub origin_longitude: f64,
    pub origin_altitude: f64,
    meters_per_lng_deg: f64,
}

impl LocalFrame {
    /// Create a frame anchored at the given origin (degrees, meters)
    pub fn new(origin_latitude: f64, origin_longitude: f64, origin_altitude: f64) -> Self {
        let meters_per_lng_deg =
            origin_latitude.to_radians().cos() * EARTH_CIRCUMFERENCE_EQUATORIAL / 360.0;
        Self {
            origin_latitude,
            origin_longitude,
            origin_altitude,
            meters_per_lng_deg,
        }
    }

    /// Meters per degree of longitude at the origin latitude
    #[inline]
    pub fn meters_per_lng_deg(&self) -> f64 {
        self.meters_per_lng_deg
    }

    /// Convert geodetic coordinates to local (east, north, up) meters
    #[inline]
    pub fn to_local(&self, latitude: f64, longitude: f64, altitude: f64) -> (f64, f64, f64) {
        let x = self.meters_per_lng_deg * (longitude - self.origin_longitude);
        let y = METERS_PER_LAT_DEG * (latitude - self.origin_latitude);
        let z = altitude - self.origin_altitude;
        (x, y, z)
    }

    /// Convert GML `(longitude, latitude, altitude)` tuples to local meters
    pub fn tuples_to_local(&self, tuples: &[[f64; 3]]) -> Vec<[f64; 3]> {
        tuples
            .iter()
            .map(|&[lng, lat, alt]| {
                let (x, y, z) = self.to_local(lat, lng, alt);
                [x, y, z]
            })
            .collect()
    }
}
