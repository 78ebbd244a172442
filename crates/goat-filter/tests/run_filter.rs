use anyhow::Result;
use goat_core::{
    DialogResponse, Drawable, ImageId, PdbStatus, ProcedureConfig, RunContext, RunMode, RunResult,
};
use goat_filter::{render_operation, run_filter, AboutDialog, FilterPlugin};
use goat_graph::{ops, Graph, NodeId, PixelFormat, Rect};
use goat_host::{MemoryDrawable, MemoryHost, RecordingLauncher};

const PROC: &str = "plug-in-test-negate";

struct Negate {
    with_dialog: bool,
}

impl FilterPlugin for Negate {
    fn operation(&self) -> &'static str {
        ops::INVERT
    }

    fn dialog(&self, procedure: &str) -> Option<AboutDialog> {
        self.with_dialog.then(|| {
            AboutDialog::new(
                "Negate",
                procedure,
                procedure,
                "Inverts the selection.",
                "https://example.org/negate.rs",
            )
        })
    }
}

/// Sets a property the invert operation does not have.
struct Misconfigured;

impl FilterPlugin for Misconfigured {
    fn operation(&self) -> &'static str {
        ops::INVERT
    }

    fn dialog(&self, _procedure: &str) -> Option<AboutDialog> {
        None
    }

    fn configure(&self, graph: &mut Graph, node: NodeId, _config: &ProcedureConfig) -> Result<()> {
        graph.set_property(node, "radius", 3.0)
    }
}

fn gray_ramp(id: u32) -> MemoryDrawable {
    MemoryDrawable::from_pixels(id, 4, 2, PixelFormat::Y8, (0..8).collect()).unwrap()
}

fn run<'a>(
    filter: &dyn FilterPlugin,
    run_mode: RunMode,
    drawables: Vec<&'a mut dyn Drawable>,
    host: &'a mut MemoryHost,
) -> RunResult {
    let ctx = RunContext {
        run_mode,
        image: ImageId(1),
        drawables,
        config: ProcedureConfig::new(),
        host,
    };
    run_filter(filter, PROC, ctx)
}

#[test]
fn non_interactive_run_skips_the_dialog() {
    let mut layer = gray_ramp(1);
    let mut host = MemoryHost::new();
    let result = run(
        &Negate { with_dialog: true },
        RunMode::NonInteractive,
        vec![&mut layer],
        &mut host,
    );

    assert!(result.is_success());
    assert!(host.dialogs.opened().is_empty());
    assert_eq!(layer.pixels(), (248..=255).rev().collect::<Vec<u8>>());
    assert_eq!(layer.updates(), [Rect::new(0, 0, 4, 2)]);
    assert_eq!(host.display.flushes(), 1);
}

#[test]
fn with_last_vals_runs_headless() {
    let mut layer = gray_ramp(1);
    let mut host = MemoryHost::new();
    let result = run(
        &Negate { with_dialog: true },
        RunMode::WithLastVals,
        vec![&mut layer],
        &mut host,
    );
    assert!(result.is_success());
    assert!(host.dialogs.opened().is_empty());
}

#[test]
fn drawable_count_must_be_one() {
    let mut host = MemoryHost::new();
    let result = run(&Negate { with_dialog: false }, RunMode::NonInteractive, Vec::new(), &mut host);
    assert_eq!(result.status, PdbStatus::CallingError);
    assert_eq!(
        result.message(),
        Some("Procedure 'plug-in-test-negate' only works with one drawable.")
    );

    let (mut a, mut b) = (gray_ramp(1), gray_ramp(2));
    let result = run(
        &Negate { with_dialog: false },
        RunMode::NonInteractive,
        vec![&mut a, &mut b],
        &mut host,
    );
    assert_eq!(result.status, PdbStatus::CallingError);
    assert_eq!(a.pixels(), (0..8).collect::<Vec<u8>>());
    assert_eq!(host.display.flushes(), 0);
}

#[test]
fn count_is_checked_before_the_dialog() {
    let mut host = MemoryHost::with_responses([DialogResponse::Ok]);
    let result = run(&Negate { with_dialog: true }, RunMode::Interactive, Vec::new(), &mut host);
    assert_eq!(result.status, PdbStatus::CallingError);
    assert!(host.dialogs.opened().is_empty());
}

#[test]
fn source_then_ok_processes() {
    let mut layer = gray_ramp(1);
    let mut host = MemoryHost::with_responses([DialogResponse::Apply, DialogResponse::Ok]);
    let result = run(
        &Negate { with_dialog: true },
        RunMode::Interactive,
        vec![&mut layer],
        &mut host,
    );

    assert!(result.is_success());
    assert_eq!(host.launcher.shown(), ["https://example.org/negate.rs".to_string()]);
    let dialog = &host.dialogs.opened()[0];
    assert_eq!(dialog.responses, vec![DialogResponse::Apply, DialogResponse::Ok]);
    assert!(!dialog.open);
    assert_eq!(layer.pixels()[0], 255);
}

#[test]
fn failed_source_launch_keeps_the_dialog_open() {
    let mut layer = gray_ramp(1);
    let mut host = MemoryHost {
        launcher: RecordingLauncher::failing(),
        ..MemoryHost::with_responses([DialogResponse::Apply, DialogResponse::Ok])
    };
    let result = run(
        &Negate { with_dialog: true },
        RunMode::Interactive,
        vec![&mut layer],
        &mut host,
    );

    assert!(result.is_success());
    assert!(host.launcher.shown().is_empty());
    assert_eq!(
        host.dialogs.opened()[0].responses,
        vec![DialogResponse::Apply, DialogResponse::Ok]
    );
    assert_eq!(layer.pixels()[0], 255);
}

#[test]
fn dialog_failure_is_reported_without_processing() {
    let mut layer = gray_ramp(1);
    // No scripted responses: running the dialog fails.
    let mut host = MemoryHost::new();
    let result = run(
        &Negate { with_dialog: true },
        RunMode::Interactive,
        vec![&mut layer],
        &mut host,
    );

    assert_eq!(result.status, PdbStatus::CallingError);
    assert!(result.message().unwrap().starts_with("Procedure 'plug-in-test-negate'"));
    assert!(!host.dialogs.opened()[0].open);
    assert_eq!(layer.pixels(), (0..8).collect::<Vec<u8>>());
}

#[test]
fn empty_selection_is_a_calling_error() {
    let mut layer = gray_ramp(1).with_selection(Rect::new(10, 10, 3, 3));
    let mut host = MemoryHost::new();
    let result = run(
        &Negate { with_dialog: false },
        RunMode::NonInteractive,
        vec![&mut layer],
        &mut host,
    );

    assert_eq!(result.status, PdbStatus::CallingError);
    assert_eq!(
        result.message(),
        Some("Procedure 'plug-in-test-negate': no pixels to process in the selected area.")
    );
    assert_eq!(layer.pixels(), (0..8).collect::<Vec<u8>>());
    assert!(layer.updates().is_empty());
    assert_eq!(host.display.flushes(), 0);
}

#[test]
fn shadow_failure_leaves_the_drawable_alone() {
    let mut layer = gray_ramp(1);
    layer.refuse_shadow_buffers();
    let mut host = MemoryHost::new();
    let result = run(
        &Negate { with_dialog: false },
        RunMode::NonInteractive,
        vec![&mut layer],
        &mut host,
    );

    assert_eq!(result.status, PdbStatus::CallingError);
    assert!(result.message().unwrap().contains("shadow"));
    assert_eq!(layer.pixels(), (0..8).collect::<Vec<u8>>());
    assert_eq!(layer.undo_depth(), 0);
    assert_eq!(host.display.flushes(), 0);
}

#[test]
fn configure_errors_are_reported() {
    let mut layer = gray_ramp(1);
    let mut host = MemoryHost::new();
    let result = run(&Misconfigured, RunMode::NonInteractive, vec![&mut layer], &mut host);

    assert_eq!(result.status, PdbStatus::CallingError);
    assert!(result.message().unwrap().contains("configuring goat:invert"));
    assert_eq!(layer.pixels(), (0..8).collect::<Vec<u8>>());
}

#[test]
fn executor_walks_the_roi_in_chunks() {
    let pixels = vec![10; 300 * 2 * 3];
    let mut layer = MemoryDrawable::from_pixels(7, 300, 2, PixelFormat::Rgb8, pixels).unwrap();
    let roi = Rect::new(0, 0, 300, 2);

    let report = render_operation(&mut layer, roi, ops::INVERT, |_, _| Ok(())).unwrap();
    assert!(goat_graph::is_initialized());

    assert_eq!(report.roi, roi);
    assert_eq!(report.stats.chunks, 3);
    assert_eq!(report.stats.pixels, 600);
    assert_eq!(report.flushed_tiles, 3);
    assert!(layer.pixels().iter().all(|&v| v == 245));
    assert_eq!(layer.shadow_flushes_at_merge(), [1]);
}

#[test]
fn executor_rejects_unknown_operations() {
    let mut layer = gray_ramp(1);
    let err = render_operation(&mut layer, Rect::new(0, 0, 4, 2), "goat:sharpen", |_, _| Ok(()))
        .unwrap_err();
    assert!(format!("{err:#}").contains("goat:sharpen"));
    assert_eq!(layer.pixels(), (0..8).collect::<Vec<u8>>());
}
