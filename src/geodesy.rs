/// Distance and projection helpers.
///
/// `distance` mirrors the flat-earth approximation common in GPX tooling:
/// short hops are measured on a locally scaled lat/lon grid (with the
/// elevation difference folded in), long hops fall back to haversine.

use crate::constants::{DEG_TO_M, EARTH_RADIUS_M, HAVERSINE_THRESHOLD_DEG, ONE_DEGREE_M};

/// A raw GPS fix as it appears in the file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, elevation: Option<f64>) -> Self {
        Self { latitude, longitude, elevation }
    }

    /// Same fix with the elevation dropped.
    pub fn flat(self) -> Self {
        Self { elevation: None, ..self }
    }
}

/// Fixed origin of the local planar frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceCenter {
    pub lon_mean: f64,
    pub lat_mean: f64,
}

impl ReferenceCenter {
    pub fn new(lon_mean: f64, lat_mean: f64) -> Self {
        Self { lon_mean, lat_mean }
    }

    /// Center of a point-less reference file; every projection through it is NaN.
    pub fn undefined() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    pub fn is_defined(&self) -> bool {
        !self.lon_mean.is_nan() && !self.lat_mean.is_nan()
    }

    /// Arithmetic mean of the given (longitude, latitude) pairs.
    /// `None` when there is nothing to average.
    pub fn from_coordinates<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (count, lon_sum, lat_sum) = coordinates
            .into_iter()
            .fold((0usize, 0.0, 0.0), |(n, lon, lat), (x, y)| (n + 1, lon + x, lat + y));

        if count == 0 {
            return None;
        }

        Some(Self::new(lon_sum / count as f64, lat_sum / count as f64))
    }

    /// Equirectangular projection into meters around this center.
    /// Only accurate for small extents.
    pub fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        let x = (longitude - self.lon_mean) * DEG_TO_M * self.lat_mean.to_radians().cos();
        let y = (latitude - self.lat_mean) * DEG_TO_M;
        (x, y)
    }
}

/// Great-circle distance in meters, elevation ignored.
pub fn haversine_distance(from: &Location, to: &Location) -> f64 {
    let d_lat = (from.latitude - to.latitude).to_radians();
    let d_lon = (from.longitude - to.longitude).to_radians();
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Distance in meters between two consecutive fixes.
pub fn distance(from: &Location, to: &Location) -> f64 {
    let d_lat = from.latitude - to.latitude;
    let d_lon = from.longitude - to.longitude;

    if d_lat.abs() > HAVERSINE_THRESHOLD_DEG || d_lon.abs() > HAVERSINE_THRESHOLD_DEG {
        return haversine_distance(from, to);
    }

    let coef = from.latitude.to_radians().cos();
    let y = d_lon * coef;
    let distance_2d = (d_lat * d_lat + y * y).sqrt() * ONE_DEGREE_M;

    match (from.elevation, to.elevation) {
        (Some(e1), Some(e2)) if e1 != e2 => {
            (distance_2d.powi(2) + (e1 - e2).powi(2)).sqrt()
        }
        _ => distance_2d,
    }
}
