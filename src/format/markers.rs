//! Marker JSON format.
//!
//! ```json
//! { "format": "markers",
//!   "data": [ { "idx": 0, "position": [12, 34] }, { "idx": 3, "position": [5.5, 6] } ] }
//! ```
//!
//! `idx` 0 is a single cell, `idx >= 1` the syncytium with that group id.
//! Entries are written single cells first, then segment by segment; the
//! sentinel points of the segments are never written.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{DEFAULT_SEGMENT_CAPACITY, MARKERS_FORMAT_TAG, MAX_GROUP_ID};
use crate::format::error::FormatError;
use crate::model::{AnnotationStore, MarkerStyle, Point};

/// A whole marker file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkersDocument {
    /// Always "markers".
    pub format: String,
    /// One entry per placed point.
    pub data: Vec<MarkerEntry>,
}

/// One placed point and the group it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerEntry {
    /// Group id (0 = single cell).
    pub idx: usize,
    /// Point coordinates as `[x, y]`.
    pub position: Point,
}

impl MarkerEntry {
    pub fn new(idx: usize, position: Point) -> Self {
        Self { idx, position }
    }
}

impl Default for MarkersDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkersDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            format: MARKERS_FORMAT_TAG.to_string(),
            data: Vec::new(),
        }
    }

    /// Encode every user point of `store`.
    pub fn encode(store: &AnnotationStore) -> Self {
        let data = store
            .grouped_points()
            .map(|(idx, point)| MarkerEntry::new(idx, point.clone()))
            .collect();
        Self {
            format: MARKERS_FORMAT_TAG.to_string(),
            data,
        }
    }

    /// Parse and validate a document.
    ///
    /// Invalid JSON is a [`FormatError::Parse`]; a missing or different
    /// `format` tag is a [`FormatError::WrongFormat`]; anything else that does
    /// not fit the schema, including a group id above [`MAX_GROUP_ID`], is a
    /// [`FormatError::InvalidEntry`].
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        let value: Value = serde_json::from_str(json)?;

        match value.get("format") {
            Some(Value::String(tag)) if tag == MARKERS_FORMAT_TAG => {}
            Some(Value::String(tag)) => return Err(FormatError::wrong_format(Some(tag.clone()))),
            Some(other) => return Err(FormatError::wrong_format(Some(other.to_string()))),
            None => return Err(FormatError::wrong_format(None)),
        }

        let document: Self =
            serde_json::from_value(value).map_err(|e| FormatError::invalid_entry(e.to_string()))?;

        if let Some(entry) = document.data.iter().find(|e| e.idx > MAX_GROUP_ID) {
            return Err(FormatError::invalid_entry(format!(
                "group id {} is above the limit of {}",
                entry.idx, MAX_GROUP_ID
            )));
        }

        Ok(document)
    }

    /// Serialize the document as compact JSON.
    pub fn to_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rebuild a store by replaying every entry in order.
    ///
    /// The returned store has `group_count` one past the largest `idx` and
    /// group 0 active. Entries on the sentinel position are dropped.
    pub fn decode(&self, options: &ImportOptions) -> AnnotationStore {
        let mut store = AnnotationStore::with_capacity(options.capacity).with_style(options.style);
        for entry in &self.data {
            store.set_active_group(entry.idx);
            store.add_point(entry.position.clone());
        }
        store.set_active_group(0);
        store
    }

    /// Number of distinct groups with at least one entry, single cells excluded.
    pub fn syncytia_count(&self) -> usize {
        let mut ids: Vec<usize> = self.data.iter().map(|e| e.idx).filter(|&i| i > 0).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}

/// Options for import operations.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Segment capacity of the rebuilt store.
    pub capacity: usize,
    /// Marker style carried over to the rebuilt store.
    pub style: MarkerStyle,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_SEGMENT_CAPACITY,
            style: MarkerStyle::default(),
        }
    }
}

impl ImportOptions {
    /// Create new import options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segment capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the marker style.
    pub fn style(mut self, style: MarkerStyle) -> Self {
        self.style = style;
        self
    }

    /// Capacity and style of an existing store, so a reload looks the same.
    pub fn matching(store: &AnnotationStore) -> Self {
        Self {
            capacity: store.capacity(),
            style: store.style(),
        }
    }
}

/// Result of an export operation.
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Number of points written.
    pub markers_exported: usize,
    /// Number of syncytia (groups >= 1) with at least one point.
    pub syncytia_exported: usize,
    /// Files created during export.
    pub files_created: Vec<PathBuf>,
}

/// Reader and writer for marker files.
pub struct MarkersFormat;

impl MarkersFormat {
    pub fn display_name(&self) -> &'static str {
        "Syncytia markers (JSON)"
    }

    pub fn extensions(&self) -> &[&'static str] {
        &["json"]
    }

    /// Write `store` to `path`.
    ///
    /// The whole document is built in memory before the file is touched.
    pub fn export(&self, store: &AnnotationStore, path: &Path) -> Result<ExportResult, FormatError> {
        log::info!("Exporting markers to {:?}", path);

        let (bytes, mut result) = self.export_to_bytes(store)?;
        std::fs::write(path, &bytes)?;
        result.files_created = vec![path.to_path_buf()];

        log::info!(
            "Exported {} markers in {} syncytia",
            result.markers_exported,
            result.syncytia_exported
        );

        Ok(result)
    }

    /// Serialize `store` without writing anything.
    pub fn export_to_bytes(
        &self,
        store: &AnnotationStore,
    ) -> Result<(Vec<u8>, ExportResult), FormatError> {
        let document = MarkersDocument::encode(store);
        let json = document.to_json()?;

        Ok((
            json.into_bytes(),
            ExportResult {
                markers_exported: document.data.len(),
                syncytia_exported: document.syncytia_count(),
                files_created: Vec::new(),
            },
        ))
    }

    /// Read a store from `path`.
    ///
    /// Nothing outside the returned store is touched, so a failed import
    /// leaves the caller's current store as it was.
    pub fn import(&self, path: &Path, options: &ImportOptions) -> Result<AnnotationStore, FormatError> {
        log::info!("Importing markers from {:?}", path);

        let json = std::fs::read_to_string(path)?;
        let store = self.import_from_str(&json, options)?;

        log::info!(
            "Imported {} markers in {} groups",
            store.total_points(),
            store.group_count()
        );

        Ok(store)
    }

    /// Read a store from a JSON string.
    pub fn import_from_str(
        &self,
        json: &str,
        options: &ImportOptions,
    ) -> Result<AnnotationStore, FormatError> {
        let document = MarkersDocument::from_json(json)?;
        Ok(document.decode(options))
    }
}
