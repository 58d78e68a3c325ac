/// Track flattening.
///
/// Turns the nested tracks -> segments -> points structure of one GPX file
/// into a flat, ordered table of point records with per-hop distances.

use std::path::Path;

use gpx::{Gpx, TrackSegment};
use log::debug;

use crate::error::{Result, TabulateError};
use crate::geodesy::{distance, Location};
use crate::gpx_source::{load_gpx, location, segment_speed, timestamp};
use crate::heart_rate::read_heart_rates;
use crate::table::{PointRecord, PointTable};

/// Distance from the previous point of the same segment, for every point.
/// The first point of a segment is always 0.
fn segment_distances(segment: &TrackSegment) -> impl Iterator<Item = f64> + '_ {
    segment.points.iter().scan(None::<Location>, |previous, waypoint| {
        let current = location(waypoint);
        let hop = previous.map_or(0.0, |prev| distance(&prev, &current));
        *previous = Some(current);
        Some(hop)
    })
}

/// Flatten a parsed file.
///
/// # Arguments
/// * `gpx` - Parsed GPX document
/// * `heart_rates` - Heart-rate values in document order, `None` to skip the column
/// * `track_id_offset` - Added to every local track index
pub fn flatten(
    gpx: &Gpx,
    heart_rates: Option<&[Option<String>]>,
    track_id_offset: usize,
) -> Result<PointTable> {
    let mut records = Vec::new();

    for (track_id, track) in gpx.tracks.iter().enumerate() {
        for (segment_id, segment) in track.segments.iter().enumerate() {
            let points = &segment.points;
            for ((point_id, waypoint), hop) in points.iter().enumerate().zip(segment_distances(segment)) {
                let here = location(waypoint);
                records.push(PointRecord {
                    track: track_id + track_id_offset,
                    segment: segment_id,
                    point: point_id,
                    latitude: here.latitude,
                    longitude: here.longitude,
                    elevation: here.elevation,
                    time: timestamp(waypoint),
                    speed: segment_speed(points, point_id),
                    distance: hop,
                    heart_rate: None,
                });
            }
        }
    }

    if let Some(values) = heart_rates {
        if values.len() != records.len() {
            return Err(TabulateError::Consistency {
                heart_rates: values.len(),
                points: records.len(),
            });
        }
        for (record, value) in records.iter_mut().zip(values) {
            record.heart_rate = value.clone();
        }
    }

    Ok(PointTable {
        records,
        heart_rate: heart_rates.is_some(),
        track_count: gpx.tracks.len(),
    })
}

/// Read `path` and flatten it.
pub fn flatten_file(path: &Path, include_heart_rate: bool, track_id_offset: usize) -> Result<PointTable> {
    let gpx = load_gpx(path)?;
    let heart_rates = if include_heart_rate {
        Some(read_heart_rates(path)?)
    } else {
        None
    };

    let table = flatten(&gpx, heart_rates.as_deref(), track_id_offset)?;
    debug!(
        "{}: {} points in {} tracks, first track id {}",
        path.display(),
        table.len(),
        table.track_count,
        track_id_offset
    );
    Ok(table)
}
