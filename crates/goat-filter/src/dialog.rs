//! Modal "about this exercise" dialog.
//!
//! The dialog loop is a small state machine:
//!
//! ```text
//!                 Source (open URI)
//!                   +-----+
//!                   v     |
//!   open --> AwaitingChoice --OK--> Proceed
//!                   |
//!                   +--Cancel/Close--> Cancel
//! ```
//!
//! Only `Proceed` and `Cancel` end the loop; the dialog is closed on exit
//! either way.

use anyhow::Result;
use goat_core::{DialogHandle, DialogResponse, DialogSpec, Host};
use tracing::{debug, warn};

/// Dialog loop states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    AwaitingChoice,
    Proceed,
    Cancel,
}

impl DialogState {
    /// Transition on a user response.
    pub fn next(self, response: DialogResponse) -> DialogState {
        if self.is_terminal() {
            return self;
        }
        match response {
            DialogResponse::Ok => DialogState::Proceed,
            DialogResponse::Cancel | DialogResponse::Close | DialogResponse::DeleteEvent => {
                DialogState::Cancel
            }
            DialogResponse::Apply | DialogResponse::Help => DialogState::AwaitingChoice,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != DialogState::AwaitingChoice
    }
}

/// Informational dialog with a link to the plug-in's source code.
#[derive(Debug, Clone)]
pub struct AboutDialog {
    pub spec: DialogSpec,
    /// Opened when the user picks "Source".
    pub source_uri: String,
}

impl AboutDialog {
    /// Dialog with the `_Source`, `_Cancel` and `_OK` buttons, OK as default.
    pub fn new(title: &str, role: &str, help_id: &str, message: &str, source_uri: &str) -> Self {
        let mut spec = DialogSpec {
            title: title.to_string(),
            role: role.to_string(),
            help_id: help_id.to_string(),
            message: message.to_string(),
            buttons: Vec::new(),
            default_response: Some(DialogResponse::Ok),
        };
        spec.add_button("_Source", DialogResponse::Apply)
            .add_button("_Cancel", DialogResponse::Cancel)
            .add_button("_OK", DialogResponse::Ok);
        Self {
            spec,
            source_uri: source_uri.to_string(),
        }
    }

    /// Show the dialog and block until the user proceeds or cancels.
    ///
    /// Returns [`DialogState::Proceed`] or [`DialogState::Cancel`].
    pub fn run(&self, host: &mut dyn Host) -> Result<DialogState> {
        let handle = host.open_dialog(&self.spec)?;
        let outcome = self.run_loop(host, handle);
        host.close_dialog(handle);
        outcome
    }

    fn run_loop(&self, host: &mut dyn Host, handle: DialogHandle) -> Result<DialogState> {
        let mut state = DialogState::AwaitingChoice;
        while !state.is_terminal() {
            let response = host.run_dialog(handle)?;
            debug!(?response, "dialog response");

            if response == DialogResponse::Apply {
                if let Err(err) = host.show_uri(&self.source_uri) {
                    warn!(uri = %self.source_uri, "failed to launch URI: {err:#}");
                }
            }
            state = state.next(response);
        }
        Ok(state)
    }
}
