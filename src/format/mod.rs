//! Marker file import/export.
//!
//! Marker files are the only persisted state of a counting session: one JSON
//! document per image listing every placed point and the group it belongs to.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use syncytia::format::{ImportOptions, MarkersFormat};
//!
//! let store = MarkersFormat.import(path, &ImportOptions::default())?;
//! MarkersFormat.export(&store, other_path)?;
//! ```

mod error;
mod markers;

#[cfg(test)]
mod tests;

pub use error::FormatError;
pub use markers::{ExportResult, ImportOptions, MarkerEntry, MarkersDocument, MarkersFormat};
