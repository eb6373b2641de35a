//! Global constants for the syncytia counter

/// Default number of group ids handled by one segment.
pub const DEFAULT_SEGMENT_CAPACITY: usize = 100;

/// Largest group id the store accepts, from a file or from the user.
pub const MAX_GROUP_ID: usize = 100_000;

/// Where the sentinel point of every grouped segment sits, outside any image.
pub const SENTINEL_POSITION: (i64, i64) = (-10, -10);

/// Value of the top-level `format` field of a marker file.
pub const MARKERS_FORMAT_TAG: &str = "markers";

/// Suffix of marker file names, both when suggesting a save name and when
/// scanning a folder for the summary.
pub const MARKERS_FILE_SUFFIX: &str = "_markers.json";

/// Save name suggested when no image is linked.
pub const DEFAULT_MARKERS_FILENAME: &str = "untitled_markers.json";

/// Delay before the count poller's first refresh, in milliseconds.
pub const DEFAULT_POLL_INITIAL_DELAY_MS: u64 = 1000;

/// Fixed delay between two count poller refreshes, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Label of group 0 in count panels and results tables.
pub const SINGLE_CELLS_LABEL: &str = "Single cells";
