//! Offline summary of many marker files.
//!
//! Every file contributes its single cells to the size-1 bucket and one count
//! per syncytium to the bucket of that syncytium's size. From the resulting
//! distribution come the number of single cells, the number of nuclei in
//! syncytia, and the fusion index (nuclei gained relative to one nucleus per
//! group).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::constants::MARKERS_FILE_SUFFIX;
use crate::format::{FormatError, MarkersDocument};
use crate::table::ResultsTable;

/// Accumulates group sizes across marker documents.
#[derive(Debug, Clone)]
pub struct SummaryReducer {
    /// group size -> number of groups of that size
    histogram: BTreeMap<usize, u64>,
    files_read: usize,
    skipped: Vec<SkippedFile>,
}

/// A file that did not contribute to the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

impl Default for SummaryReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryReducer {
    pub fn new() -> Self {
        Self {
            histogram: BTreeMap::from([(1, 0)]),
            files_read: 0,
            skipped: Vec::new(),
        }
    }

    /// Add the groups of one document.
    pub fn add_document(&mut self, document: &MarkersDocument) {
        let mut groups: BTreeMap<usize, u64> = BTreeMap::new();
        for entry in &document.data {
            *groups.entry(entry.idx).or_default() += 1;
        }

        let single_cells = groups.remove(&0).unwrap_or(0);
        *self.histogram.entry(1).or_default() += single_cells;
        for size in groups.into_values() {
            *self.histogram.entry(size as usize).or_default() += 1;
        }
        self.files_read += 1;
    }

    /// Validate and add one JSON document.
    pub fn add_json(&mut self, json: &str) -> Result<(), FormatError> {
        let document = MarkersDocument::from_json(json)?;
        self.add_document(&document);
        Ok(())
    }

    /// Read and add one file; unreadable or invalid files are recorded as skipped.
    pub fn add_file(&mut self, path: &Path) -> bool {
        let result = std::fs::read_to_string(path)
            .map_err(FormatError::from)
            .and_then(|json| self.add_json(&json));
        match result {
            Ok(()) => {
                log::debug!("Summarized {:?}", path);
                true
            }
            Err(e) => {
                log::warn!("Skipping {:?}: {}", path, e);
                self.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    pub fn files_read(&self) -> usize {
        self.files_read
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Largest group size seen (at least 1).
    pub fn max_size(&self) -> usize {
        self.histogram.keys().copied().max().unwrap_or(1)
    }

    /// Number of groups of exactly `size` nuclei (single cells count as size 1).
    pub fn groups_of_size(&self, size: usize) -> u64 {
        self.histogram.get(&size).copied().unwrap_or(0)
    }

    /// `(size, groups)` for every size from 1 to the largest seen.
    pub fn distribution(&self) -> Vec<(usize, u64)> {
        (1..=self.max_size())
            .map(|size| (size, self.groups_of_size(size)))
            .collect()
    }

    /// Total nuclei in the size-1 bucket.
    pub fn single_cells(&self) -> u64 {
        self.groups_of_size(1)
    }

    /// Total nuclei in groups of two or more.
    pub fn nuclei_in_syncytia(&self) -> u64 {
        self.histogram
            .iter()
            .filter(|&(&size, _)| size > 1)
            .map(|(&size, &groups)| size as u64 * groups)
            .sum()
    }

    /// Sum of `size - 1` over every group.
    pub fn fusion_index(&self) -> u64 {
        self.histogram
            .iter()
            .map(|(&size, &groups)| (size as u64 - 1) * groups)
            .sum()
    }

    /// "Histogram" table: `nuclei` and `counts` for every size.
    pub fn histogram_table(&self) -> ResultsTable {
        let mut table = ResultsTable::new("Histogram", &["nuclei", "counts"]);
        for (size, groups) in self.distribution() {
            table.add_row(None, vec![size as u64, groups]);
        }
        table
    }

    /// "Short summary" table: single cells, nuclei in syncytia, fusion index.
    pub fn short_table(&self) -> ResultsTable {
        let mut table = ResultsTable::new("Short summary", &["Count"]);
        table.add_row(Some("Single cells".to_string()), vec![self.single_cells()]);
        table.add_row(
            Some("Nuclei in syncytia".to_string()),
            vec![self.nuclei_in_syncytia()],
        );
        table.add_row(Some("Fusion index".to_string()), vec![self.fusion_index()]);
        table
    }
}

/// True if `path` names a marker file (`*_markers.json`).
pub fn is_markers_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(MARKERS_FILE_SUFFIX))
}

/// Marker files directly inside `folder`, sorted by name.
pub fn markers_files(folder: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(folder)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_markers_file(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Summarize every marker file directly inside `folder`.
pub fn summarize_folder(folder: &Path) -> std::io::Result<SummaryReducer> {
    let files = markers_files(folder)?;
    log::info!("Summarizing {} marker files in {:?}", files.len(), folder);

    let mut reducer = SummaryReducer::new();
    for path in &files {
        reducer.add_file(path);
    }

    log::info!(
        "Summarized {} files ({} skipped): {} single cells, {} nuclei in syncytia, fusion index {}",
        reducer.files_read(),
        reducer.skipped().len(),
        reducer.single_cells(),
        reducer.nuclei_in_syncytia(),
        reducer.fusion_index()
    );
    Ok(reducer)
}
