//! Procedure descriptors handed to the host at query time.

use anyhow::{bail, Result};

use crate::parameters::ParamSpec;
use crate::protocol::{self, ProcedureType};

/// Who wrote a procedure and when.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    pub authors: String,
    pub copyright: String,
    pub date: String,
}

/// Which image states enable the procedure's menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sensitivity(pub u32);

impl Sensitivity {
    /// Exactly one drawable selected.
    pub const DRAWABLE: Sensitivity = Sensitivity(protocol::SENSITIVE_DRAWABLE);
    pub const DRAWABLES: Sensitivity = Sensitivity(protocol::SENSITIVE_DRAWABLES);
    pub const NO_DRAWABLES: Sensitivity = Sensitivity(protocol::SENSITIVE_NO_DRAWABLES);
    pub const NO_IMAGE: Sensitivity = Sensitivity(protocol::SENSITIVE_NO_IMAGE);

    pub fn contains(&self, other: Sensitivity) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether a selection of `count` drawables enables the entry.
    pub fn accepts_drawables(&self, count: usize) -> bool {
        match count {
            0 => self.contains(Self::NO_DRAWABLES),
            1 => self.contains(Self::DRAWABLE),
            _ => self.contains(Self::DRAWABLES),
        }
    }
}

impl std::ops::BitOr for Sensitivity {
    type Output = Sensitivity;

    fn bitor(self, rhs: Sensitivity) -> Sensitivity {
        Sensitivity(self.0 | rhs.0)
    }
}

/// Everything the host needs to list, place and document a procedure.
#[derive(Debug, Clone)]
pub struct ProcedureInfo {
    /// Canonical identifier, e.g. `plug-in-goat-exercise-rust`.
    pub name: String,
    pub proc_type: ProcedureType,
    /// Menu label, with an optional `_` mnemonic.
    pub menu_label: String,
    /// Menu path the entry is placed under, e.g. `<Image>/Filters`.
    pub menu_path: Option<String>,
    pub icon_name: Option<String>,
    /// One-line description.
    pub blurb: String,
    pub help: String,
    pub help_id: String,
    pub attribution: Attribution,
    /// Image types the procedure works on, `*` for all.
    pub image_types: String,
    pub sensitivity: Sensitivity,
    /// Ordered argument schema.
    pub params: Vec<ParamSpec>,
}

impl ProcedureInfo {
    /// Check the descriptor before it is handed to the host.
    pub fn validate(&self) -> Result<()> {
        if !is_canonical_identifier(&self.name) {
            bail!(
                "procedure name '{}' is not a canonical identifier \
                 (lowercase letters, digits and '-', starting with a letter)",
                self.name
            );
        }
        if self.menu_label.is_empty() && self.menu_path.is_some() {
            bail!("procedure '{}' has a menu path but no menu label", self.name);
        }
        let mut seen = std::collections::HashSet::new();
        for spec in &self.params {
            if !seen.insert(spec.name.as_str()) {
                bail!(
                    "procedure '{}' declares argument '{}' twice",
                    self.name,
                    spec.name
                );
            }
            spec.validate()?;
        }
        Ok(())
    }

    /// Menu label with mnemonic markers removed.
    pub fn display_label(&self) -> String {
        self.menu_label.replace('_', "")
    }
}

/// Lowercase ASCII letters, digits and `-`, starting with a letter.
pub fn is_canonical_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
