//! Interactive counting session.
//!
//! A [`Session`] is driven by discrete user actions on a single owner thread.
//! It routes them to the shared store, talks to the outer surface through the
//! [`Dialogs`], [`PointTool`] and [`ResultsSink`] collaborators, and is the
//! boundary where load/save failures become user-visible messages.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{DEFAULT_MARKERS_FILENAME, MARKERS_FILE_SUFFIX, MAX_GROUP_ID};
use crate::format::{FormatError, ImportOptions, MarkersFormat};
use crate::model::{AnnotationStore, MarkerStyle, Point, Slot};
use crate::state::{Annotations, CountPoller, CountSink, PollSchedule, SharedAnnotations};
use crate::table::{CountRow, ResultsSink, ResultsTable, panel_rows, results_table};

/// Modal dialogs and file pickers of the outer surface.
pub trait Dialogs {
    /// Ask a yes/no question; true means proceed.
    fn confirm(&self, title: &str, message: &str) -> bool;
    /// Pick a marker file to open, or None if cancelled.
    fn choose_open_path(&self) -> Option<PathBuf>;
    /// Pick where to save, starting from `suggested_name`, or None if cancelled.
    fn choose_save_path(&self, suggested_name: &str) -> Option<PathBuf>;
    /// Show an informational or error message.
    fn show_message(&self, title: &str, message: &str);
}

/// The externally owned point-placement tool.
pub trait PointTool {
    /// Points placed from now on belong to `group`, stored at `slot`.
    fn set_target(&self, group: usize, slot: Slot);
}

/// Result of [`Session::load`].
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded { path: PathBuf, markers: usize },
    Cancelled,
    Failed(FormatError),
}

/// Result of [`Session::save`].
#[derive(Debug)]
pub enum SaveOutcome {
    Saved { path: PathBuf, markers: usize },
    /// Nothing to save; nothing was written.
    Empty,
    Cancelled,
    Failed(FormatError),
}

const UNSAVED_TITLE: &str = "WARNING";

/// One counting session over one linked image.
pub struct Session {
    annotations: SharedAnnotations,
    dialogs: Box<dyn Dialogs>,
    tool: Box<dyn PointTool>,
    results: Box<dyn ResultsSink>,
    image_title: Option<String>,
    last_folder: Option<PathBuf>,
    poller: Option<CountPoller>,
}

impl Session {
    /// Start a session on `store`, whose current content counts as saved.
    pub fn new(
        store: AnnotationStore,
        dialogs: Box<dyn Dialogs>,
        tool: Box<dyn PointTool>,
        results: Box<dyn ResultsSink>,
    ) -> Self {
        let session = Self {
            annotations: SharedAnnotations::new(Annotations::new(store)),
            dialogs,
            tool,
            results,
            image_title: None,
            last_folder: None,
            poller: None,
        };
        session.notify_tool();
        session
    }

    /// Shared handle to the store, for overlays and pollers.
    pub fn annotations(&self) -> SharedAnnotations {
        self.annotations.clone()
    }

    fn notify_tool(&self) {
        let (group, slot) = self.annotations.with(|a| (a.store.active_group(), a.store.active_slot()));
        self.tool.set_target(group, slot);
    }

    // ========================================================================
    // Linked image
    // ========================================================================

    pub fn link_image(&mut self, title: impl Into<String>) {
        let title = title.into();
        log::info!("Linked image '{}'", title);
        self.image_title = Some(title);
    }

    pub fn unlink_image(&mut self) {
        if let Some(title) = self.image_title.take() {
            log::info!("Unlinked image '{}'", title);
        }
    }

    pub fn image_title(&self) -> Option<&str> {
        self.image_title.as_deref()
    }

    /// `<image title without extension>_markers.json`.
    pub fn suggested_filename(&self) -> String {
        match &self.image_title {
            Some(title) => {
                let stem = Path::new(title)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or(title);
                format!("{}{}", stem, MARKERS_FILE_SUFFIX)
            }
            None => DEFAULT_MARKERS_FILENAME.to_string(),
        }
    }

    /// Folder of the last file loaded or saved.
    pub fn last_folder(&self) -> Option<&Path> {
        self.last_folder.as_deref()
    }

    pub fn set_last_folder(&mut self, folder: Option<PathBuf>) {
        self.last_folder = folder;
    }

    fn remember_folder(&mut self, path: &Path) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.last_folder = Some(parent.to_path_buf());
        }
    }

    // ========================================================================
    // Groups and points
    // ========================================================================

    /// Make `group` receive the next placed points.
    ///
    /// Returns false, and tells the user, if `group` is above [`MAX_GROUP_ID`].
    pub fn select_group(&mut self, group: usize) -> bool {
        let Some(slot) = self.annotations.with(|a| a.store.set_active_group(group)) else {
            self.dialogs.show_message(
                "Select group",
                &format!("Group {} is above the limit of {}", group, MAX_GROUP_ID),
            );
            return false;
        };
        log::debug!("Selected group {} ({:?})", group, slot);
        self.tool.set_target(group, slot);
        true
    }

    /// Select the next unused group id and return it.
    pub fn add_group(&mut self) -> Option<usize> {
        let group = self.group_count();
        if !self.select_group(group) {
            return None;
        }
        log::info!("Added syncytium {}", group);
        Some(group)
    }

    pub fn active_group(&self) -> usize {
        self.annotations.lock().store.active_group()
    }

    /// A point reported back by the placement tool.
    ///
    /// Returns false if the store refused the point.
    pub fn place_point(&mut self, point: Point) -> bool {
        self.annotations.with(|a| a.store.add_point(point))
    }

    /// Remove every point of `group`; returns how many were removed.
    pub fn clear_group(&mut self, group: usize) -> usize {
        self.annotations.with(|a| a.store.clear_group(group))
    }

    pub fn clear_active_group(&mut self) -> usize {
        let group = self.active_group();
        self.clear_group(group)
    }

    /// Drop every marker, after confirmation if there are unsaved edits.
    ///
    /// Returns false if the user declined.
    pub fn clear_all(&mut self) -> bool {
        if !self.is_saved()
            && !self
                .dialogs
                .confirm(UNSAVED_TITLE, "CLEAR ALL SYNCYTIA? Unsaved markers will be lost.")
        {
            log::debug!("Clear all declined");
            return false;
        }
        self.annotations.with(|a| a.store.clear_all());
        self.notify_tool();
        true
    }

    /// Apply a new marker style to every segment.
    pub fn update_markers(&mut self, style: MarkerStyle) {
        self.annotations.with(|a| a.store.update_markers(style));
        log::debug!("Marker style now {:?}", style);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_saved(&self) -> bool {
        self.annotations.lock().is_saved()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.lock().store.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.annotations.lock().store.group_count()
    }

    pub fn nuclei_count(&self, group: usize) -> usize {
        self.annotations.lock().store.nuclei_count(group)
    }

    /// Current rows of the count panel.
    pub fn panel_rows(&self) -> Vec<CountRow> {
        panel_rows(&self.annotations.lock().store)
    }

    pub fn results_table(&self) -> ResultsTable {
        results_table(&self.annotations.lock().store)
    }

    /// Hand the results table to the results sink.
    pub fn show_results(&self) {
        let table = self.results_table();
        self.results.show_table(&table);
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Replace the store with a marker file chosen by the user.
    ///
    /// Unsaved edits are only discarded after confirmation.
    pub fn load(&mut self) -> LoadOutcome {
        if !self.confirm_discard() {
            return LoadOutcome::Cancelled;
        }
        let Some(path) = self.dialogs.choose_open_path() else {
            return LoadOutcome::Cancelled;
        };
        self.load_from(&path)
    }

    /// Like [`Session::load`] with the file already chosen.
    pub fn load_path(&mut self, path: &Path) -> LoadOutcome {
        if !self.confirm_discard() {
            return LoadOutcome::Cancelled;
        }
        self.load_from(path)
    }

    fn confirm_discard(&self) -> bool {
        self.is_saved()
            || self
                .dialogs
                .confirm(UNSAVED_TITLE, "THIS WILL CLEAR EXISTING MARKERS")
    }

    /// Replace the store with the content of `path`.
    ///
    /// On any failure the current store is left untouched and the error is
    /// shown to the user.
    pub fn load_from(&mut self, path: &Path) -> LoadOutcome {
        let options = ImportOptions::matching(&self.annotations.lock().store);
        match MarkersFormat.import(path, &options) {
            Ok(store) => {
                let markers = store.total_points();
                self.annotations.with(|a| a.replace(store));
                self.remember_folder(path);
                self.notify_tool();
                LoadOutcome::Loaded {
                    path: path.to_path_buf(),
                    markers,
                }
            }
            Err(e) => {
                log::warn!("Loading {:?} failed: {}", path, e);
                self.dialogs
                    .show_message("Load failed", &format!("Could not load {}: {}", path.display(), e));
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Save to a path chosen by the user.
    pub fn save(&mut self) -> SaveOutcome {
        if self.is_empty() {
            self.dialogs
                .show_message("Save markers", "There are no markers, nothing to save");
            return SaveOutcome::Empty;
        }
        let suggested = self.suggested_filename();
        let Some(path) = self.dialogs.choose_save_path(&suggested) else {
            return SaveOutcome::Cancelled;
        };
        self.save_to(&path)
    }

    /// Save to `path`. The saved state is only updated if the write succeeds.
    pub fn save_to(&mut self, path: &Path) -> SaveOutcome {
        let result = self.annotations.with(|a| {
            if a.store.is_empty() {
                return Ok(None);
            }
            let exported = MarkersFormat.export(&a.store, path)?;
            a.mark_saved();
            Ok::<_, FormatError>(Some(exported.markers_exported))
        });

        match result {
            Ok(Some(markers)) => {
                self.remember_folder(path);
                SaveOutcome::Saved {
                    path: path.to_path_buf(),
                    markers,
                }
            }
            Ok(None) => {
                self.dialogs
                    .show_message("Save markers", "There are no markers, nothing to save");
                SaveOutcome::Empty
            }
            Err(e) => {
                log::warn!("Saving {:?} failed: {}", path, e);
                self.dialogs
                    .show_message("Save failed", &format!("Could not save {}: {}", path.display(), e));
                SaveOutcome::Failed(e)
            }
        }
    }

    // ========================================================================
    // Polling and shutdown
    // ========================================================================

    /// Start refreshing `sink` with the per-group counts.
    pub fn start_polling(
        &mut self,
        sink: Arc<dyn CountSink>,
        schedule: PollSchedule,
    ) -> Result<(), String> {
        if self.poller.is_some() {
            log::debug!("Count poller already running");
            return Ok(());
        }
        self.poller = Some(CountPoller::spawn(self.annotations.clone(), sink, schedule)?);
        Ok(())
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(CountPoller::is_running)
    }

    /// Close the session, after confirmation if there are unsaved edits.
    ///
    /// Stops the poller (waiting for its current pass) and unlinks the image.
    /// Returns false if the user chose to stay.
    pub fn close(&mut self) -> bool {
        if !self.is_saved()
            && !self
                .dialogs
                .confirm(UNSAVED_TITLE, "MARKERS ARE NOT SAVED! EXIT WITHOUT SAVING?")
        {
            return false;
        }
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
        self.unlink_image();
        log::info!("Session closed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CountPanel;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// What the fake collaborators were asked and what they answer.
    #[derive(Default)]
    struct Script {
        confirms: VecDeque<bool>,
        open_paths: VecDeque<Option<PathBuf>>,
        save_paths: VecDeque<Option<PathBuf>>,
        questions: Vec<String>,
        messages: Vec<String>,
        suggested: Vec<String>,
        targets: Vec<(usize, Slot)>,
        tables: Vec<ResultsTable>,
    }

    #[derive(Clone, Default)]
    struct Fake(Rc<RefCell<Script>>);

    impl Dialogs for Fake {
        fn confirm(&self, _title: &str, message: &str) -> bool {
            let mut script = self.0.borrow_mut();
            script.questions.push(message.to_string());
            script.confirms.pop_front().unwrap_or(false)
        }

        fn choose_open_path(&self) -> Option<PathBuf> {
            self.0.borrow_mut().open_paths.pop_front().flatten()
        }

        fn choose_save_path(&self, suggested_name: &str) -> Option<PathBuf> {
            let mut script = self.0.borrow_mut();
            script.suggested.push(suggested_name.to_string());
            script.save_paths.pop_front().flatten()
        }

        fn show_message(&self, _title: &str, message: &str) {
            self.0.borrow_mut().messages.push(message.to_string());
        }
    }

    impl PointTool for Fake {
        fn set_target(&self, group: usize, slot: Slot) {
            self.0.borrow_mut().targets.push((group, slot));
        }
    }

    impl ResultsSink for Fake {
        fn show_table(&self, table: &ResultsTable) {
            self.0.borrow_mut().tables.push(table.clone());
        }
    }

    fn session() -> (Session, Fake) {
        let fake = Fake::default();
        let session = Session::new(
            AnnotationStore::with_capacity(10),
            Box::new(fake.clone()),
            Box::new(fake.clone()),
            Box::new(fake.clone()),
        );
        (session, fake)
    }

    fn place(session: &mut Session, group: usize, points: &[(i64, i64)]) {
        session.select_group(group);
        for &(x, y) in points {
            session.place_point(Point::new(x, y));
        }
    }

    #[test]
    fn test_tool_follows_selection() {
        let (mut session, fake) = session();
        session.select_group(12);
        let targets = fake.0.borrow().targets.clone();
        assert_eq!(
            targets,
            vec![
                (0, Slot::SingleCells),
                (12, Slot::Grouped { segment: 1, tag: 1 }),
            ]
        );
    }

    #[test]
    fn test_add_group_picks_next_unused() {
        let (mut session, _fake) = session();
        assert_eq!(session.add_group(), Some(1));
        session.place_point(Point::new(1, 1));
        assert_eq!(session.add_group(), Some(2));
        assert_eq!(session.group_count(), 3);
        assert_eq!(session.active_group(), 2);
    }

    #[test]
    fn test_save_then_edit_then_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cells_markers.json");
        let (mut session, fake) = session();
        session.link_image("cells.tif");
        place(&mut session, 1, &[(12, 34), (56, 78)]);
        assert!(!session.is_saved());

        fake.0.borrow_mut().save_paths.push_back(Some(path.clone()));
        assert!(matches!(session.save(), SaveOutcome::Saved { markers: 2, .. }));
        assert!(session.is_saved());
        assert_eq!(fake.0.borrow().suggested, vec!["cells_markers.json".to_string()]);
        assert_eq!(session.last_folder(), Some(dir.path()));

        session.place_point(Point::new(1, 2));
        assert!(!session.is_saved());

        assert!(matches!(session.save_to(&path), SaveOutcome::Saved { markers: 3, .. }));
        assert!(session.is_saved());
    }

    #[test]
    fn test_save_empty_store_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty_markers.json");
        let (mut session, fake) = session();
        session.select_group(3);

        assert!(matches!(session.save(), SaveOutcome::Empty));
        assert!(matches!(session.save_to(&path), SaveOutcome::Empty));
        assert!(!path.exists());
        assert!(fake.0.borrow().suggested.is_empty());
        assert_eq!(fake.0.borrow().messages.len(), 2);
    }

    #[test]
    fn test_save_cancelled() {
        let (mut session, fake) = session();
        place(&mut session, 0, &[(1, 1)]);
        fake.0.borrow_mut().save_paths.push_back(None);
        assert!(matches!(session.save(), SaveOutcome::Cancelled));
        assert!(!session.is_saved());
        assert_eq!(fake.0.borrow().suggested, vec!["untitled_markers.json".to_string()]);
    }

    #[test]
    fn test_failed_save_keeps_unsaved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("x_markers.json");
        let (mut session, fake) = session();
        place(&mut session, 2, &[(1, 1)]);

        assert!(matches!(
            session.save_to(&path),
            SaveOutcome::Failed(FormatError::Io(_))
        ));
        assert!(!session.is_saved());
        assert_eq!(fake.0.borrow().messages.len(), 1);
    }

    #[test]
    fn test_load_replaces_store_when_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a_markers.json");
        std::fs::write(
            &path,
            r#"{"format":"markers","data":[{"idx":0,"position":[1,1]},{"idx":3,"position":[2,2]}]}"#,
        )
        .unwrap();

        let (mut session, fake) = session();
        fake.0.borrow_mut().open_paths.push_back(Some(path.clone()));
        assert!(matches!(session.load(), LoadOutcome::Loaded { markers: 2, .. }));
        assert!(fake.0.borrow().questions.is_empty());

        assert_eq!(session.nuclei_count(0), 1);
        assert_eq!(session.nuclei_count(3), 1);
        assert_eq!(session.group_count(), 4);
        assert!(session.is_saved());
        assert_eq!(session.active_group(), 0);
    }

    #[test]
    fn test_load_over_unsaved_edits_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a_markers.json");
        std::fs::write(&path, r#"{"format":"markers","data":[]}"#).unwrap();

        let (mut session, fake) = session();
        place(&mut session, 1, &[(5, 5)]);

        fake.0.borrow_mut().confirms.push_back(false);
        assert!(matches!(session.load(), LoadOutcome::Cancelled));
        assert_eq!(session.nuclei_count(1), 1);

        {
            let mut script = fake.0.borrow_mut();
            script.confirms.push_back(true);
            script.open_paths.push_back(Some(path));
        }
        assert!(matches!(session.load(), LoadOutcome::Loaded { markers: 0, .. }));
        assert_eq!(session.nuclei_count(1), 0);
        assert_eq!(fake.0.borrow().questions.len(), 2);
    }

    #[test]
    fn test_failed_load_keeps_previous_store() {
        let dir = tempfile::tempdir().unwrap();
        let wrong = dir.path().join("wrong_markers.json");
        let broken = dir.path().join("broken_markers.json");
        std::fs::write(&wrong, r#"{"format":"rois","data":[]}"#).unwrap();
        std::fs::write(&broken, "{{{").unwrap();

        let (mut session, fake) = session();
        place(&mut session, 4, &[(1, 1), (2, 2)]);
        let saved_before = session.is_saved();

        assert!(matches!(
            session.load_from(&wrong),
            LoadOutcome::Failed(FormatError::WrongFormat { .. })
        ));
        assert!(matches!(
            session.load_from(&broken),
            LoadOutcome::Failed(FormatError::Parse(_))
        ));
        assert!(matches!(
            session.load_from(&dir.path().join("absent.json")),
            LoadOutcome::Failed(FormatError::Io(_))
        ));

        assert_eq!(session.nuclei_count(4), 2);
        assert_eq!(session.group_count(), 5);
        assert_eq!(session.is_saved(), saved_before);
        assert_eq!(fake.0.borrow().messages.len(), 3);
    }

    #[test]
    fn test_load_with_group_id_above_limit_keeps_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge_markers.json");
        std::fs::write(
            &path,
            format!(
                r#"{{"format":"markers","data":[{{"idx":{},"position":[1,1]}}]}}"#,
                usize::MAX
            ),
        )
        .unwrap();

        let (mut session, fake) = session();
        place(&mut session, 2, &[(1, 1)]);

        assert!(matches!(
            session.load_from(&path),
            LoadOutcome::Failed(FormatError::InvalidEntry { .. })
        ));
        assert_eq!(session.nuclei_count(2), 1);
        assert_eq!(session.group_count(), 3);
        assert_eq!(session.annotations().lock().store.segments().len(), 1);
        assert_eq!(fake.0.borrow().messages.len(), 1);
    }

    #[test]
    fn test_select_group_above_limit_is_reported() {
        let (mut session, fake) = session();
        session.select_group(4);
        assert!(!session.select_group(MAX_GROUP_ID + 1));
        assert_eq!(session.active_group(), 4);
        assert_eq!(session.group_count(), 5);
        assert_eq!(fake.0.borrow().messages.len(), 1);
        assert_eq!(fake.0.borrow().targets.last(), Some(&(4, Slot::Grouped { segment: 0, tag: 3 })));
    }

    #[test]
    fn test_place_point_on_sentinel_position_is_refused() {
        let (mut session, _fake) = session();
        session.select_group(1);
        assert!(!session.place_point(Point::new(-10, -10)));
        assert!(session.place_point(Point::new(3, 3)));
        assert_eq!(session.nuclei_count(1), 1);
    }

    #[test]
    fn test_clear_all_confirmation() {
        let (mut session, fake) = session();
        place(&mut session, 2, &[(1, 1)]);

        fake.0.borrow_mut().confirms.push_back(false);
        assert!(!session.clear_all());
        assert_eq!(session.nuclei_count(2), 1);

        fake.0.borrow_mut().confirms.push_back(true);
        assert!(session.clear_all());
        assert!(session.is_empty());
        assert_eq!(session.group_count(), 1);
        assert_eq!(session.active_group(), 0);
    }

    #[test]
    fn test_clear_all_when_saved_asks_nothing() {
        let (mut session, fake) = session();
        assert!(session.clear_all());
        assert!(fake.0.borrow().questions.is_empty());
    }

    #[test]
    fn test_clear_all_keeps_style() {
        let (mut session, fake) = session();
        let style = MarkerStyle {
            show_labels: false,
            ..MarkerStyle::default()
        };
        session.update_markers(style);
        place(&mut session, 1, &[(1, 1)]);
        fake.0.borrow_mut().confirms.push_back(true);
        session.clear_all();
        assert_eq!(session.annotations().lock().store.style(), style);
    }

    #[test]
    fn test_clear_empty_group_leaves_saved_state() {
        let (mut session, _fake) = session();
        assert!(session.is_saved());
        assert_eq!(session.clear_group(7), 0);
        assert!(session.is_saved());
    }

    #[test]
    fn test_clear_active_group() {
        let (mut session, _fake) = session();
        place(&mut session, 3, &[(1, 1), (2, 2)]);
        place(&mut session, 5, &[(3, 3)]);
        assert_eq!(session.clear_active_group(), 1);
        assert_eq!(session.nuclei_count(3), 2);
        assert_eq!(session.group_count(), 6);
    }

    #[test]
    fn test_results_go_to_sink() {
        let (mut session, fake) = session();
        place(&mut session, 0, &[(1, 1)]);
        place(&mut session, 2, &[(2, 2), (3, 3)]);
        session.show_results();

        let tables = fake.0.borrow().tables.clone();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].value("Single cells"), Some(1));
        assert_eq!(tables[0].value("Syncytium 1"), Some(2));
    }

    #[test]
    fn test_close_with_unsaved_edits() {
        let (mut session, fake) = session();
        session.link_image("img.png");
        place(&mut session, 1, &[(1, 1)]);

        fake.0.borrow_mut().confirms.push_back(false);
        assert!(!session.close());
        assert_eq!(session.image_title(), Some("img.png"));

        fake.0.borrow_mut().confirms.push_back(true);
        assert!(session.close());
        assert_eq!(session.image_title(), None);
    }

    #[test]
    fn test_close_stops_poller() {
        let (mut session, _fake) = session();
        let panel = Arc::new(CountPanel::new());
        session
            .start_polling(panel.clone(), PollSchedule::from_millis(0, 1))
            .unwrap();
        assert!(session.is_polling());

        assert!(session.close());
        assert!(!session.is_polling());
        let refreshes = panel.refreshes();
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(panel.refreshes(), refreshes);
    }

    #[test]
    fn test_suggested_filename() {
        let (mut session, _fake) = session();
        assert_eq!(session.suggested_filename(), "untitled_markers.json");
        session.link_image("experiment 3.tif");
        assert_eq!(session.suggested_filename(), "experiment 3_markers.json");
        session.link_image("plain");
        assert_eq!(session.suggested_filename(), "plain_markers.json");
    }
}
