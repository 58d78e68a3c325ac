/// Multi-file merge.
///
/// Files are processed one after another. Track ids are shifted so they
/// stay unique over the whole run, and every file is projected around the
/// center of the first file.

use std::path::Path;

use log::{debug, info, warn};

use crate::enricher::enrich;
use crate::error::{Result, TabulateError};
use crate::flattener::flatten_file;
use crate::geodesy::ReferenceCenter;
use crate::table::{EnrichedTable, PointTable, TrackTable};

/// State of one merge run.
#[derive(Debug)]
pub struct MergeRun {
    with_enrichment: bool,
    with_heart_rate: bool,
    track_id_offset: usize,
    center: Option<ReferenceCenter>,
    flat: Vec<PointTable>,
    enriched: Vec<EnrichedTable>,
}

impl MergeRun {
    pub fn new(with_enrichment: bool, with_heart_rate: bool) -> Self {
        Self {
            with_enrichment,
            with_heart_rate,
            track_id_offset: 0,
            center: None,
            flat: Vec::new(),
            enriched: Vec::new(),
        }
    }

    /// Track id given to the first track of the next file.
    pub fn track_id_offset(&self) -> usize {
        self.track_id_offset
    }

    /// Center fixed by the first file, once one has been added.
    pub fn reference_center(&self) -> Option<ReferenceCenter> {
        self.center
    }

    pub fn files_added(&self) -> usize {
        self.flat.len() + self.enriched.len()
    }

    /// Add the next file's flattened table, which must have been flattened
    /// with `track_id_offset()`.
    ///
    /// A first file without points leaves the reference center undefined:
    /// a warning is logged and every x/y of the run is NaN.
    pub fn push(&mut self, path: &Path, table: PointTable) {
        self.track_id_offset += table.track_count;

        if self.files_added() == 0 {
            let center = match table.reference_center() {
                Some(center) => {
                    debug!(
                        "Reference center from {}: lon {:.6}, lat {:.6}",
                        path.display(),
                        center.lon_mean,
                        center.lat_mean
                    );
                    center
                }
                None => {
                    warn!("{} has no track points, x/y will be undefined", path.display());
                    ReferenceCenter::undefined()
                }
            };
            self.center = Some(center);
        }

        info!("{}: {} points, {} tracks", path.display(), table.len(), table.track_count);

        if !self.with_enrichment {
            self.flat.push(table);
            return;
        }

        let center = self.center.unwrap_or_else(ReferenceCenter::undefined);
        self.enriched.push(enrich(table, &center));
    }

    /// Concatenate everything added so far, in order.
    pub fn finish(self) -> TrackTable {
        if self.with_enrichment {
            TrackTable::Enriched(EnrichedTable::concat(self.enriched, self.with_heart_rate))
        } else {
            TrackTable::Flat(PointTable::concat(self.flat, self.with_heart_rate))
        }
    }
}

/// Flatten, optionally enrich, and concatenate `files` in order.
///
/// The first failing file aborts the run; the error names that file.
pub fn merge<P: AsRef<Path>>(files: &[P], with_enrichment: bool, with_heart_rate: bool) -> Result<TrackTable> {
    if files.is_empty() {
        return Err(TabulateError::NoInputFiles);
    }

    let mut run = MergeRun::new(with_enrichment, with_heart_rate);
    for file in files {
        let path = file.as_ref();
        let table = flatten_file(path, with_heart_rate, run.track_id_offset())
            .map_err(|e| e.in_file(path))?;
        run.push(path, table);
    }

    let combined = run.finish();
    info!("Merged {} files into {} rows", files.len(), combined.len());
    Ok(combined)
}
