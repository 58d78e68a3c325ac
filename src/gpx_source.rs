/// GPX input adapter.
///
/// Wraps the `gpx` crate and exposes the per-point accessors the flattener
/// relies on: location, timestamp and the segment speed estimate.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use gpx::{read, Gpx, Waypoint};

use crate::error::Result;
use crate::geodesy::{distance, Location};

/// Parse a GPX file from disk.
pub fn load_gpx(path: &Path) -> Result<Gpx> {
    let file = File::open(path)?;
    parse_gpx(BufReader::new(file))
}

/// Parse GPX from any reader.
pub fn parse_gpx<R: Read>(reader: R) -> Result<Gpx> {
    Ok(read(reader)?)
}

pub fn location(waypoint: &Waypoint) -> Location {
    let point = waypoint.point();
    Location::new(point.y(), point.x(), waypoint.elevation)
}

/// Timestamp of a waypoint as UTC; `None` when absent or unrepresentable.
pub fn timestamp(waypoint: &Waypoint) -> Option<DateTime<Utc>> {
    let formatted = waypoint.time.as_ref()?.format().ok()?;
    formatted.parse::<DateTime<Utc>>().ok()
}

/// Speed in m/s between a point and one of its neighbours.
///
/// Undefined when either timestamp is missing or both are identical.
fn speed_between(point: &Waypoint, neighbour: &Waypoint) -> Option<f64> {
    let t1 = timestamp(point)?;
    let t2 = timestamp(neighbour)?;
    let seconds = (t1 - t2).num_milliseconds().abs() as f64 / 1000.0;
    if seconds == 0.0 {
        return None;
    }

    let from = location(point);
    let to = location(neighbour);
    let mut length = distance(&from, &to);
    if length == 0.0 {
        length = distance(&from.flat(), &to.flat());
    }

    Some(length / seconds)
}

/// Instantaneous speed at `index`, from the previous and next point of the
/// same segment.
///
/// Both speeds are averaged when both are non-zero. Otherwise a non-zero
/// speed towards the previous point wins, and the speed towards the next
/// point is returned as-is, so a stationary point gets `Some(0.0)`.
pub fn segment_speed(points: &[Waypoint], index: usize) -> Option<f64> {
    let point = points.get(index)?;

    let previous = index
        .checked_sub(1)
        .and_then(|i| points.get(i))
        .and_then(|neighbour| speed_between(point, neighbour));
    let next = points
        .get(index + 1)
        .and_then(|neighbour| speed_between(point, neighbour));

    match (previous, next) {
        (Some(p), Some(n)) if p != 0.0 && n != 0.0 => Some((p + n) / 2.0),
        (Some(p), _) if p != 0.0 => Some(p),
        _ => next,
    }
}
