/// CSV output of a track table.
///
/// Undefined values (missing elevation, time, speed, pace, heart rate) are
/// written as empty cells.

use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::error::Result;
use crate::table::{PointRecord, TrackTable};

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn base_row(record: &PointRecord, heart_rate: bool) -> Vec<String> {
    let mut row = vec![
        record.track.to_string(),
        record.segment.to_string(),
        record.point.to_string(),
        record.latitude.to_string(),
        record.longitude.to_string(),
        optional(record.elevation),
        record.time.map(|t| t.to_rfc3339()).unwrap_or_default(),
        optional(record.speed),
        record.distance.to_string(),
    ];
    if heart_rate {
        row.push(record.heart_rate.clone().unwrap_or_default());
    }
    row
}

pub fn write_csv<W: Write>(table: &TrackTable, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(table.columns())?;

    match table {
        TrackTable::Flat(flat) => {
            for record in &flat.records {
                wtr.write_record(base_row(record, flat.heart_rate))?;
            }
        }
        TrackTable::Enriched(enriched) => {
            for record in &enriched.records {
                let mut row = base_row(&record.record, enriched.heart_rate);
                row.push(optional(record.pace));
                row.push(record.total_distance.to_string());
                row.push(record.x.to_string());
                row.push(record.y.to_string());
                wtr.write_record(&row)?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(table: &TrackTable, output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path)?;
    write_csv(table, std::io::BufWriter::new(file))
}
