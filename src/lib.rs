//! Syncytia Counter
//!
//! Counting of nuclei in single cells and in syncytia (multinucleated cells)
//! on microscopy images. Points are grouped by syncytium id, persisted as
//! JSON marker files, and many marker files can be summarized into a size
//! distribution and a fusion index.

pub mod config;
pub mod constants;
pub mod format;
pub mod model;
pub mod session;
pub mod state;
pub mod summary;
pub mod table;

#[cfg(feature = "dialogs")]
pub mod native;
