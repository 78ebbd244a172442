use anyhow::{bail, Result};

/// Records URIs instead of opening them.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    shown: Vec<String>,
    fail: bool,
}

impl RecordingLauncher {
    /// Launcher whose every launch fails, as when no viewer is installed.
    pub fn failing() -> Self {
        Self {
            shown: Vec::new(),
            fail: true,
        }
    }

    pub fn launch(&mut self, uri: &str) -> Result<()> {
        if self.fail {
            bail!("no application available to open {uri}");
        }
        self.shown.push(uri.to_string());
        Ok(())
    }

    /// URIs launched so far, in order.
    pub fn shown(&self) -> &[String] {
        &self.shown
    }
}
