/// Earth geometry
pub const EARTH_CIRCUMFERENCE_M: f64 = 40_075_000.0;
pub const DEG_TO_M: f64 = EARTH_CIRCUMFERENCE_M / 360.0;

/// Point-to-point distance (same constants the GPX tooling uses)
pub const ONE_DEGREE_M: f64 = 1000.0 * 10000.8 / 90.0;
pub const EARTH_RADIUS_M: f64 = 6378.137 * 1000.0;
pub const HAVERSINE_THRESHOLD_DEG: f64 = 0.2;

/// Above this lon/lat extent the local projection is no longer accurate
pub const LOCAL_RANGE_LIMIT_DEG: f64 = 0.25;

/// Garmin heart-rate extension
pub const TRACKPOINT_EXTENSION_NS: &str = "http://www.garmin.com/xmlschemas/TrackPointExtension/v1";
pub const HEART_RATE_ELEMENT: &str = "hr";

/// Table columns
pub const BASE_COLUMNS: [&str; 9] = [
    "track", "segment", "point",
    "latitude", "longitude", "elevation",
    "time", "speed", "distance",
];
pub const HEART_RATE_COLUMN: &str = "heart_rate";
pub const METRIC_COLUMNS: [&str; 4] = ["pace", "total_distance", "x", "y"];

/// File discovery
pub const GPX_EXTENSION: &str = "gpx";
