/// Metric enrichment: pace, cumulative distance and local x/y.

use geo::{BoundingRect, MultiPoint, Point};
use log::warn;

use crate::constants::LOCAL_RANGE_LIMIT_DEG;
use crate::geodesy::ReferenceCenter;
use crate::table::{EnrichedRecord, EnrichedTable, PointRecord, PointTable};

/// m/s to min/km. Undefined for missing, NaN or zero speed.
pub fn speed_to_pace(speed: Option<f64>) -> Option<f64> {
    match speed {
        Some(s) if !s.is_nan() && s != 0.0 => Some(1000.0 / (s * 60.0)),
        _ => None,
    }
}

/// Longitude and latitude extent (max - min) of the rows, in degrees.
pub fn coordinate_extent(records: &[PointRecord]) -> (f64, f64) {
    let points: MultiPoint<f64> = records
        .iter()
        .map(|r| Point::new(r.longitude, r.latitude))
        .collect::<Vec<_>>()
        .into();

    points
        .bounding_rect()
        .map_or((0.0, 0.0), |rect| (rect.width(), rect.height()))
}

/// Add pace, total distance and projected coordinates to a flattened table.
///
/// Logs a warning when the table spans more than the local projection can
/// represent; the table is still produced.
pub fn enrich(table: PointTable, center: &ReferenceCenter) -> EnrichedTable {
    let (lon_range, lat_range) = coordinate_extent(&table.records);
    let local_range_exceeded = lon_range > LOCAL_RANGE_LIMIT_DEG || lat_range > LOCAL_RANGE_LIMIT_DEG;
    if local_range_exceeded {
        warn!(
            "Lon/lat range {:.3}/{:.3} deg larger than {} deg, inaccurate conversion to meter scale",
            lon_range, lat_range, LOCAL_RANGE_LIMIT_DEG
        );
    }

    let records = table
        .records
        .into_iter()
        .scan(0.0, |total, record| {
            *total += record.distance;
            let (x, y) = center.project(record.longitude, record.latitude);
            Some(EnrichedRecord {
                pace: speed_to_pace(record.speed),
                total_distance: *total,
                x,
                y,
                record,
            })
        })
        .collect();

    EnrichedTable {
        records,
        heart_rate: table.heart_rate,
        track_count: table.track_count,
        local_range_exceeded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEG_TO_M;

    fn row(track: usize, point: usize, lat: f64, lon: f64, speed: Option<f64>, distance: f64) -> PointRecord {
        PointRecord {
            track,
            segment: 0,
            point,
            latitude: lat,
            longitude: lon,
            elevation: None,
            time: None,
            speed,
            distance,
            heart_rate: None,
        }
    }

    #[test]
    fn test_pace_conversion() {
        assert_eq!(speed_to_pace(None), None);
        assert_eq!(speed_to_pace(Some(0.0)), None);
        assert_eq!(speed_to_pace(Some(f64::NAN)), None);
        let pace = speed_to_pace(Some(1000.0 / 300.0)).unwrap();
        assert!((pace - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_total_distance_runs_across_tracks() {
        let table = PointTable {
            records: vec![
                row(0, 0, 0.0, 0.0, None, 0.0),
                row(0, 1, 0.0, 0.001, Some(2.0), 111.0),
                row(1, 0, 0.0, 0.002, Some(0.0), 0.0),
                row(1, 1, 0.0, 0.003, Some(4.0), 50.0),
            ],
            heart_rate: false,
            track_count: 2,
        };

        let enriched = enrich(table, &ReferenceCenter::new(0.0, 0.0));
        let totals: Vec<f64> = enriched.records.iter().map(|r| r.total_distance).collect();
        let paces: Vec<Option<f64>> = enriched.records.iter().map(|r| r.pace).collect();

        assert_eq!(totals, vec![0.0, 111.0, 111.0, 161.0]);
        assert_eq!(paces[0], None);
        assert_eq!(paces[2], None);
        assert!((paces[1].unwrap() - 1000.0 / 120.0).abs() < 1e-12);
        assert_eq!(enriched.track_count, 2);
        assert!(!enriched.exceeds_local_range());
    }

    #[test]
    fn test_projection_uses_given_center() {
        let table = PointTable {
            records: vec![row(0, 0, 0.0, 0.0, None, 0.0), row(0, 1, 0.0, 0.002, None, 1.0)],
            ..Default::default()
        };

        let enriched = enrich(table, &ReferenceCenter::new(0.001, 0.0));

        assert!((enriched.records[0].x + 0.001 * DEG_TO_M).abs() < 1e-6);
        assert!((enriched.records[1].x - 0.001 * DEG_TO_M).abs() < 1e-6);
        assert_eq!(enriched.records[1].y, 0.0);
    }

    #[test]
    fn test_large_extent_is_flagged_not_fatal() {
        let table = PointTable {
            records: vec![row(0, 0, 45.0, 7.0, None, 0.0), row(0, 1, 45.3, 7.0, None, 1.0)],
            ..Default::default()
        };

        let enriched = enrich(table, &ReferenceCenter::new(7.0, 45.15));

        assert!(enriched.exceeds_local_range());
        assert_eq!(enriched.len(), 2);
    }

    #[test]
    fn test_extent_of_empty_table() {
        assert_eq!(coordinate_extent(&[]), (0.0, 0.0));
    }
}
