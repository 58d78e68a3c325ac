//! GPX track tabulation.
//!
//! Flattens the tracks -> segments -> points structure of GPX files into a
//! single table and derives per-point distance, cumulative distance, pace and
//! local x/y coordinates. Several files can be merged into one table with
//! unique track ids and a shared projection origin.
//!
//! Usage:
//! ```no_run
//! let table = gpx_tabulator::merge(&["morning.gpx", "evening.gpx"], true, true).unwrap();
//! println!("{} rows", table.len());
//! ```

pub mod config;
pub mod constants;
pub mod csv_export;
pub mod enricher;
pub mod error;
pub mod flattener;
pub mod geodesy;
pub mod gpx_source;
pub mod heart_rate;
pub mod merger;
pub mod table;

pub use config::TabulatorConfig;
pub use error::{Result, TabulateError};
pub use geodesy::ReferenceCenter;
pub use merger::{merge, MergeRun};
pub use table::{EnrichedRecord, EnrichedTable, PointRecord, PointTable, TrackTable};
