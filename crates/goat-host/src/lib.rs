//! Headless, in-memory implementation of the host services.
//!
//! Drives plug-ins without a running editor: images and drawables live in
//! memory, dialogs answer from a script, and every side effect the host
//! would show to a user is recorded for inspection.

mod dialog;
mod display;
mod drawable;
mod image;
mod launcher;

pub use dialog::{OpenedDialog, ScriptedDialog};
pub use display::MemoryDisplay;
pub use drawable::{MemoryDrawable, UndoStep};
pub use image::MemoryImage;
pub use launcher::RecordingLauncher;

use anyhow::Result;
use goat_core::{DialogHandle, DialogResponse, DialogSpec, Host};

/// A [`Host`] assembled from the in-memory services.
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub display: MemoryDisplay,
    pub dialogs: ScriptedDialog,
    pub launcher: RecordingLauncher,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose dialogs answer with `responses`, in order.
    pub fn with_responses(responses: impl IntoIterator<Item = DialogResponse>) -> Self {
        Self {
            dialogs: ScriptedDialog::new(responses),
            ..Self::default()
        }
    }
}

impl Host for MemoryHost {
    fn displays_flush(&mut self) {
        self.display.flush();
    }

    fn open_dialog(&mut self, spec: &DialogSpec) -> Result<DialogHandle> {
        self.dialogs.open(spec)
    }

    fn run_dialog(&mut self, dialog: DialogHandle) -> Result<DialogResponse> {
        self.dialogs.run(dialog)
    }

    fn close_dialog(&mut self, dialog: DialogHandle) {
        self.dialogs.close(dialog);
    }

    fn show_uri(&mut self, uri: &str) -> Result<()> {
        self.launcher.launch(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_routes_to_services() {
        let mut host = MemoryHost::with_responses([DialogResponse::Ok]);
        let spec = DialogSpec {
            title: "About".into(),
            role: "about".into(),
            help_id: "about".into(),
            message: String::new(),
            buttons: Vec::new(),
            default_response: None,
        };

        let handle = host.open_dialog(&spec).unwrap();
        assert_eq!(host.run_dialog(handle).unwrap(), DialogResponse::Ok);
        host.close_dialog(handle);
        host.show_uri("https://example.org").unwrap();
        host.displays_flush();

        assert!(!host.dialogs.is_open(handle));
        assert_eq!(host.launcher.shown(), ["https://example.org".to_string()]);
        assert_eq!(host.display.flushes(), 1);
    }
}
