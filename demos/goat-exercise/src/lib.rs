//! Goat exercise plug-in.
//!
//! Demonstrates the whole plug-in flow: one registered procedure, an
//! optional about dialog, and the selection inverted through a
//! `buffer-source -> invert -> write-buffer` graph.

use goat_core::{
    Attribution, ParamSpec, Plugin, ProcedureInfo, ProcedureType, RunContext, RunResult,
    Sensitivity,
};
use goat_filter::{run_filter, AboutDialog, FilterPlugin};
use goat_graph::ops;

pub const PROCEDURE: &str = "plug-in-goat-exercise-rust";

/// Where the "Source" button points.
pub const SOURCE_URI: &str = concat!("file://", env!("CARGO_MANIFEST_DIR"), "/src/lib.rs");

const ABOUT: &str = "This plug-in is an exercise in 'Rust' to demo plug-in creation.\n\
                     Check out the source code by clicking the \"Source\" button.";

#[derive(Debug, Default)]
pub struct GoatExercise;

impl FilterPlugin for GoatExercise {
    fn operation(&self) -> &'static str {
        ops::INVERT
    }

    fn dialog(&self, procedure: &str) -> Option<AboutDialog> {
        Some(AboutDialog::new(
            "Exercise a goat (Rust)",
            procedure,
            procedure,
            ABOUT,
            SOURCE_URI,
        ))
    }
}

impl Plugin for GoatExercise {
    fn list_ids(&self) -> Vec<&'static str> {
        vec![PROCEDURE]
    }

    fn describe(&self, id: &str) -> Option<ProcedureInfo> {
        if id != PROCEDURE {
            return None;
        }
        Some(ProcedureInfo {
            name: PROCEDURE.to_string(),
            proc_type: ProcedureType::Plugin,
            menu_label: "Exercise a goat (Rust)".to_string(),
            menu_path: Some("<Image>/Filters/Development/Goat exercises".to_string()),
            icon_name: Some("gimp-wilber".to_string()),
            blurb: "Exercise a goat in the Rust language".to_string(),
            help: "Takes a goat for a walk in Rust".to_string(),
            help_id: PROCEDURE.to_string(),
            attribution: Attribution {
                authors: "Jehan".to_string(),
                copyright: "Jehan".to_string(),
                date: "2019".to_string(),
            },
            image_types: "*".to_string(),
            sensitivity: Sensitivity::DRAWABLE,
            params: ParamSpec::standard_filter_args(),
        })
    }

    fn run(&mut self, id: &str, ctx: RunContext<'_>) -> RunResult {
        run_filter(&*self, id, ctx)
    }
}

goat_core::plugin_main!(GoatExercise);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_only_its_procedure() {
        let plugin = GoatExercise;
        let info = plugin.describe(PROCEDURE).unwrap();
        info.validate().unwrap();
        assert_eq!(info.display_label(), "Exercise a goat (Rust)");
        assert!(info.sensitivity.accepts_drawables(1));
        assert!(!info.sensitivity.accepts_drawables(2));
        assert!(plugin.describe("plug-in-goat-exercise-c").is_none());
    }

    #[test]
    fn dialog_offers_source() {
        let dialog = GoatExercise.dialog(PROCEDURE).unwrap();
        assert_eq!(dialog.source_uri, SOURCE_URI);
        assert!(dialog.spec.message.contains("\"Source\""));
    }
}
