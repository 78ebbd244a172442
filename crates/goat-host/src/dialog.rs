use std::collections::VecDeque;

use anyhow::{anyhow, bail, Result};
use goat_core::{DialogHandle, DialogResponse, DialogSpec};

/// A dialog that was shown, with the responses it handed out.
#[derive(Debug, Clone)]
pub struct OpenedDialog {
    pub handle: DialogHandle,
    pub spec: DialogSpec,
    pub responses: Vec<DialogResponse>,
    pub open: bool,
}

/// Modal dialogs answered from a queue of canned responses.
///
/// Running a dialog when the queue is empty is an error, which stands in
/// for a host that cannot show dialogs at all.
#[derive(Debug, Default)]
pub struct ScriptedDialog {
    script: VecDeque<DialogResponse>,
    dialogs: Vec<OpenedDialog>,
}

impl ScriptedDialog {
    pub fn new(responses: impl IntoIterator<Item = DialogResponse>) -> Self {
        Self {
            script: responses.into_iter().collect(),
            dialogs: Vec::new(),
        }
    }

    pub fn open(&mut self, spec: &DialogSpec) -> Result<DialogHandle> {
        let handle = DialogHandle(self.dialogs.len() as u32 + 1);
        self.dialogs.push(OpenedDialog {
            handle,
            spec: spec.clone(),
            responses: Vec::new(),
            open: true,
        });
        tracing::debug!(title = %spec.title, ?handle, "dialog opened");
        Ok(handle)
    }

    pub fn run(&mut self, handle: DialogHandle) -> Result<DialogResponse> {
        let dialog = self
            .dialogs
            .iter_mut()
            .find(|d| d.handle == handle)
            .ok_or_else(|| anyhow!("unknown dialog {handle:?}"))?;
        if !dialog.open {
            bail!("dialog {handle:?} is closed");
        }
        let response = self
            .script
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted response left for dialog {handle:?}"))?;
        dialog.responses.push(response);
        Ok(response)
    }

    pub fn close(&mut self, handle: DialogHandle) {
        if let Some(dialog) = self.dialogs.iter_mut().find(|d| d.handle == handle) {
            dialog.open = false;
        }
    }

    pub fn is_open(&self, handle: DialogHandle) -> bool {
        self.dialogs.iter().any(|d| d.handle == handle && d.open)
    }

    /// Every dialog opened so far.
    pub fn opened(&self) -> &[OpenedDialog] {
        &self.dialogs
    }

    /// Scripted responses not consumed yet.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> DialogSpec {
        DialogSpec {
            title: "t".into(),
            role: "r".into(),
            help_id: "h".into(),
            message: String::new(),
            buttons: Vec::new(),
            default_response: None,
        }
    }

    #[test]
    fn responses_are_consumed_in_order() {
        let mut dialogs = ScriptedDialog::new([DialogResponse::Apply, DialogResponse::Ok]);
        let handle = dialogs.open(&spec()).unwrap();
        assert_eq!(dialogs.run(handle).unwrap(), DialogResponse::Apply);
        assert_eq!(dialogs.run(handle).unwrap(), DialogResponse::Ok);
        assert!(dialogs.run(handle).is_err());
        assert_eq!(
            dialogs.opened()[0].responses,
            vec![DialogResponse::Apply, DialogResponse::Ok]
        );
    }

    #[test]
    fn closed_dialogs_cannot_run() {
        let mut dialogs = ScriptedDialog::new([DialogResponse::Ok]);
        let handle = dialogs.open(&spec()).unwrap();
        dialogs.close(handle);
        assert!(!dialogs.is_open(handle));
        assert!(dialogs.run(handle).is_err());
        assert_eq!(dialogs.remaining(), 1);
    }
}
