//! Native message boxes and file pickers.

use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::format::MarkersFormat;
use crate::session::Dialogs;

/// [`Dialogs`] backed by the platform's native dialogs.
#[derive(Debug, Default)]
pub struct NativeDialogs {
    /// Folder the file pickers open in
    start_folder: Option<PathBuf>,
}

impl NativeDialogs {
    pub fn new(start_folder: Option<PathBuf>) -> Self {
        Self { start_folder }
    }

    fn file_dialog(&self) -> FileDialog {
        let format = MarkersFormat;
        let dialog = FileDialog::new().add_filter(format.display_name(), format.extensions());
        match &self.start_folder {
            Some(folder) => dialog.set_directory(folder),
            None => dialog,
        }
    }

    /// Pick a folder of marker files.
    pub fn pick_folder(&self) -> Option<PathBuf> {
        let dialog = FileDialog::new().set_title("Folder with marker files");
        let dialog = match &self.start_folder {
            Some(folder) => dialog.set_directory(folder),
            None => dialog,
        };
        dialog.pick_folder()
    }
}

impl Dialogs for NativeDialogs {
    fn confirm(&self, title: &str, message: &str) -> bool {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::OkCancel)
            .show();
        matches!(result, MessageDialogResult::Ok | MessageDialogResult::Yes)
    }

    fn choose_open_path(&self) -> Option<PathBuf> {
        self.file_dialog().set_title("Load markers").pick_file()
    }

    fn choose_save_path(&self, suggested_name: &str) -> Option<PathBuf> {
        self.file_dialog()
            .set_title("Save markers")
            .set_file_name(suggested_name)
            .save_file()
    }

    fn show_message(&self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
