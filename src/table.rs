/// Tabular model shared by every stage.
///
/// Each stage produces a new table value; nothing downstream edits an
/// upstream table in place.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::constants::{BASE_COLUMNS, HEART_RATE_COLUMN, METRIC_COLUMNS};
use crate::geodesy::ReferenceCenter;

/// One flattened track point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    pub track: usize,
    pub segment: usize,
    pub point: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub time: Option<DateTime<Utc>>,
    pub speed: Option<f64>,
    pub distance: f64,
    pub heart_rate: Option<String>,
}

/// A point record with the derived motion metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: PointRecord,
    pub pace: Option<f64>,
    pub total_distance: f64,
    pub x: f64,
    pub y: f64,
}

fn column_names(heart_rate: bool, metrics: bool) -> Vec<&'static str> {
    let mut columns = BASE_COLUMNS.to_vec();
    if heart_rate {
        columns.push(HEART_RATE_COLUMN);
    }
    if metrics {
        columns.extend(METRIC_COLUMNS);
    }
    columns
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointTable {
    pub records: Vec<PointRecord>,
    pub heart_rate: bool,
    /// Tracks present in the source file, including ones without points.
    pub track_count: usize,
}

impl PointTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn columns(&self) -> Vec<&'static str> {
        column_names(self.heart_rate, false)
    }

    pub fn track_ids(&self) -> BTreeSet<usize> {
        self.records.iter().map(|r| r.track).collect()
    }

    /// Mean longitude/latitude over all rows.
    pub fn reference_center(&self) -> Option<ReferenceCenter> {
        ReferenceCenter::from_coordinates(self.records.iter().map(|r| (r.longitude, r.latitude)))
    }

    /// Concatenate tables in the given order.
    pub fn concat(tables: Vec<PointTable>, heart_rate: bool) -> PointTable {
        let track_count = tables.iter().map(|t| t.track_count).sum();
        let records = tables.into_iter().flat_map(|t| t.records).collect();
        PointTable { records, heart_rate, track_count }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnrichedTable {
    pub records: Vec<EnrichedRecord>,
    pub heart_rate: bool,
    pub track_count: usize,
    /// Set when the lon/lat extent was too large for the local projection.
    pub local_range_exceeded: bool,
}

impl EnrichedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn columns(&self) -> Vec<&'static str> {
        column_names(self.heart_rate, true)
    }

    pub fn track_ids(&self) -> BTreeSet<usize> {
        self.records.iter().map(|r| r.record.track).collect()
    }

    pub fn exceeds_local_range(&self) -> bool {
        self.local_range_exceeded
    }

    pub fn concat(tables: Vec<EnrichedTable>, heart_rate: bool) -> EnrichedTable {
        let track_count = tables.iter().map(|t| t.track_count).sum();
        let local_range_exceeded = tables.iter().any(|t| t.local_range_exceeded);
        let records = tables.into_iter().flat_map(|t| t.records).collect();
        EnrichedTable { records, heart_rate, track_count, local_range_exceeded }
    }
}

/// Result of a merge run: plain flattened rows, or rows with metrics.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackTable {
    Flat(PointTable),
    Enriched(EnrichedTable),
}

impl TrackTable {
    pub fn len(&self) -> usize {
        match self {
            TrackTable::Flat(t) => t.len(),
            TrackTable::Enriched(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn columns(&self) -> Vec<&'static str> {
        match self {
            TrackTable::Flat(t) => t.columns(),
            TrackTable::Enriched(t) => t.columns(),
        }
    }

    pub fn track_ids(&self) -> BTreeSet<usize> {
        match self {
            TrackTable::Flat(t) => t.track_ids(),
            TrackTable::Enriched(t) => t.track_ids(),
        }
    }

    /// Base columns of every row, in table order.
    pub fn point_records(&self) -> Vec<&PointRecord> {
        match self {
            TrackTable::Flat(t) => t.records.iter().collect(),
            TrackTable::Enriched(t) => t.records.iter().map(|r| &r.record).collect(),
        }
    }

    pub fn as_enriched(&self) -> Option<&EnrichedTable> {
        match self {
            TrackTable::Enriched(t) => Some(t),
            TrackTable::Flat(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(track: usize, point: usize) -> PointRecord {
        PointRecord {
            track,
            segment: 0,
            point,
            latitude: 10.0 + point as f64,
            longitude: 20.0 + point as f64,
            elevation: None,
            time: None,
            speed: None,
            distance: 0.0,
            heart_rate: None,
        }
    }

    #[test]
    fn test_column_order() {
        let flat = PointTable { heart_rate: true, ..Default::default() };
        assert_eq!(
            flat.columns(),
            vec![
                "track", "segment", "point", "latitude", "longitude", "elevation",
                "time", "speed", "distance", "heart_rate",
            ]
        );

        let enriched = EnrichedTable::default();
        assert_eq!(
            enriched.columns()[8..].to_vec(),
            vec!["distance", "pace", "total_distance", "x", "y"]
        );
    }

    #[test]
    fn test_concat_preserves_order() {
        let a = PointTable { records: vec![record(0, 0), record(0, 1)], heart_rate: false, track_count: 1 };
        let b = PointTable { records: vec![record(1, 0)], heart_rate: false, track_count: 2 };

        let combined = PointTable::concat(vec![a, b], false);
        let order: Vec<(usize, usize)> = combined.records.iter().map(|r| (r.track, r.point)).collect();

        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0)]);
        assert_eq!(combined.track_count, 3);
        assert_eq!(combined.track_ids().into_iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_reference_center_of_rows() {
        let table = PointTable { records: vec![record(0, 0), record(0, 2)], ..Default::default() };
        assert_eq!(table.reference_center(), Some(ReferenceCenter::new(21.0, 11.0)));
        assert_eq!(PointTable::default().reference_center(), None);
    }
}
