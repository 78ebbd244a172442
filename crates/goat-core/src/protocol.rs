//! Numeric constants and enums shared with the host.
//!
//! Values match the host's wire protocol so they can be passed through
//! unchanged.

#![allow(dead_code)]

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

// =====================================================================
// Run modes
// =====================================================================

/// How a procedure was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum RunMode {
    /// Started from the UI; dialogs may be shown.
    Interactive = 0,
    /// Scripted call with every argument supplied.
    NonInteractive = 1,
    /// Repeat with the previous run's values, no UI.
    WithLastVals = 2,
}

impl RunMode {
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::from_u32(raw)
    }

    pub fn to_raw(self) -> u32 {
        self.to_u32().unwrap_or_default()
    }

    pub fn is_interactive(self) -> bool {
        self == RunMode::Interactive
    }
}

// =====================================================================
// Status codes
// =====================================================================

/// Outcome of a procedure run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum PdbStatus {
    ExecutionError = 0,
    CallingError = 1,
    PassThrough = 2,
    Success = 3,
    Cancel = 4,
}

impl PdbStatus {
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::from_u32(raw)
    }

    pub fn to_raw(self) -> u32 {
        self.to_u32().unwrap_or_default()
    }
}

// =====================================================================
// Dialog responses
// =====================================================================

/// Responses a modal dialog can return. Values follow the toolkit's
/// stock response ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum DialogResponse {
    /// The window was closed by the window manager.
    DeleteEvent = -4,
    Ok = -5,
    Cancel = -6,
    Close = -7,
    /// Bound to the "Source" button.
    Apply = -10,
    Help = -11,
}

impl DialogResponse {
    pub fn from_raw(raw: i32) -> Option<Self> {
        Self::from_i32(raw)
    }

    pub fn to_raw(self) -> i32 {
        self.to_i32().unwrap_or_default()
    }
}

// =====================================================================
// Procedure types
// =====================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum ProcedureType {
    Internal = 0,
    Plugin = 1,
    Extension = 2,
    Temporary = 3,
}

// =====================================================================
// Parameter types
// =====================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum ParamType {
    RunMode = 0,
    Image = 1,
    Drawables = 2,
    Boolean = 3,
    Int = 4,
    Double = 5,
    String = 6,
}

impl ParamType {
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::from_u32(raw)
    }
}

// =====================================================================
// Menu sensitivity flags
// =====================================================================

pub const SENSITIVE_DRAWABLE: u32 = 1 << 0;
pub const SENSITIVE_DRAWABLES: u32 = 1 << 1;
pub const SENSITIVE_NO_DRAWABLES: u32 = 1 << 2;
pub const SENSITIVE_NO_IMAGE: u32 = 1 << 3;

// =====================================================================
// Error reporting
// =====================================================================

/// Error domain attached to failures reported by plug-ins.
pub const PLUG_IN_ERROR_DOMAIN: &str = "goat-plug-in-error";

pub const PLUG_IN_FAILED: i32 = 0;
