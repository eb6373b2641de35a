//! Derived count views and results tables.
//!
//! Both the polled count panel and the results table are recomputed from the
//! store every time they are needed, so they can never drift from
//! `group_count`.

use std::fmt;
use std::io;
use std::path::Path;

use crate::constants::SINGLE_CELLS_LABEL;
use crate::model::AnnotationStore;

/// One line of the count panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    pub group: usize,
    pub label: String,
    pub count: usize,
}

/// Panel label of a group: "Single cells" or "Syncytium {g}".
pub fn group_label(group: usize) -> String {
    if group == 0 {
        SINGLE_CELLS_LABEL.to_string()
    } else {
        format!("Syncytium {}", group)
    }
}

/// Every group in `[0, group_count)` with its count, zero counts included.
pub fn panel_rows(store: &AnnotationStore) -> Vec<CountRow> {
    (0..store.group_count())
        .map(|group| CountRow {
            group,
            label: group_label(group),
            count: store.nuclei_count(group),
        })
        .collect()
}

/// (label, count) pairs for the results sink.
///
/// Single cells always come first; syncytia follow in ascending group order,
/// only when they hold at least one point, labelled `Syncytium {g - 1}`.
pub fn result_pairs(store: &AnnotationStore) -> Vec<(String, usize)> {
    let mut pairs = vec![(SINGLE_CELLS_LABEL.to_string(), store.nuclei_count(0))];
    pairs.extend((1..store.group_count()).filter_map(|group| {
        let count = store.nuclei_count(group);
        (count > 0).then(|| (format!("Syncytium {}", group - 1), count))
    }));
    pairs
}

/// The per-image results table ("SyncytiaCount").
pub fn results_table(store: &AnnotationStore) -> ResultsTable {
    let mut table = ResultsTable::new("SyncytiaCount", &["Count"]);
    for (label, count) in result_pairs(store) {
        table.add_row(Some(label), vec![count as u64]);
    }
    table
}

/// A titled table of labelled integer rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsTable {
    title: String,
    headings: Vec<String>,
    rows: Vec<TableRow>,
}

/// One row of a [`ResultsTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub label: Option<String>,
    pub values: Vec<u64>,
}

impl ResultsTable {
    pub fn new(title: impl Into<String>, headings: &[&str]) -> Self {
        Self {
            title: title.into(),
            headings: headings.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn headings(&self) -> &[String] {
        &self.headings
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn add_row(&mut self, label: Option<String>, values: Vec<u64>) {
        self.rows.push(TableRow { label, values });
    }

    fn has_labels(&self) -> bool {
        self.rows.iter().any(|r| r.label.is_some())
    }

    /// First value of the row labelled `label`.
    pub fn value(&self, label: &str) -> Option<u64> {
        self.rows
            .iter()
            .find(|r| r.label.as_deref() == Some(label))
            .and_then(|r| r.values.first().copied())
    }

    /// Write a header record and one record per row.
    ///
    /// A `Label` column comes first when any row is labelled.
    pub fn write_csv<W: io::Write>(&self, writer: &mut csv::Writer<W>) -> csv::Result<()> {
        let labels = self.has_labels();
        let mut header: Vec<&str> = Vec::new();
        if labels {
            header.push("Label");
        }
        header.extend(self.headings.iter().map(String::as_str));
        writer.write_record(&header)?;

        for row in &self.rows {
            let mut record: Vec<String> = Vec::new();
            if labels {
                record.push(row.label.clone().unwrap_or_default());
            }
            record.extend(row.values.iter().map(u64::to_string));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Render as CSV text.
    pub fn to_csv(&self) -> csv::Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        self.write_csv(&mut writer)?;
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write the table as a CSV file at `path`.
    pub fn save_csv(&self, path: &Path) -> csv::Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        self.write_csv(&mut writer)
    }
}

impl fmt::Display for ResultsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self
            .rows
            .iter()
            .filter_map(|r| r.label.as_ref().map(String::len))
            .max()
            .unwrap_or(0);
        let value_width = self
            .headings
            .iter()
            .map(String::len)
            .chain(self.rows.iter().flat_map(|r| r.values.iter().map(|v| v.to_string().len())))
            .max()
            .unwrap_or(0);

        writeln!(f, "{}", self.title)?;
        if label_width > 0 {
            write!(f, "{:label_width$}", "")?;
        }
        for heading in &self.headings {
            write!(f, "  {:>value_width$}", heading)?;
        }
        writeln!(f)?;
        for row in &self.rows {
            if label_width > 0 {
                write!(f, "{:label_width$}", row.label.as_deref().unwrap_or_default())?;
            }
            for value in &row.values {
                write!(f, "  {:>value_width$}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Receives finished tables for display or export.
pub trait ResultsSink {
    fn show_table(&self, table: &ResultsTable);
}
