//! Host protocol for goat plug-ins.
//!
//! - [`Plugin`] is the trait plug-in types implement: list procedure names,
//!   describe each one, run one by name.
//! - [`ProcedureInfo`] and [`ParamSpec`] describe a procedure to the host.
//! - [`RunContext`] carries the run mode, image, drawables, config and host
//!   services into a run; [`RunResult`] carries the outcome back.
//! - [`Drawable`] and [`Host`] are the host-side services a run may use.
//! - [`plugin_main!`] generates the query/run entry points for a plug-in
//!   type.

pub mod handler;
pub mod host;
pub mod info;
pub mod log;
pub mod parameters;
pub mod protocol;
pub mod result;

pub use handler::{Plugin, Registry, RunContext};
pub use host::{
    DialogButton, DialogHandle, DialogSpec, Drawable, DrawableId, FlushedShadow, Host, ImageId,
    ShadowBuffer,
};
pub use info::{Attribution, ProcedureInfo, Sensitivity};
pub use parameters::{ArgValue, ParamSpec, ProcedureConfig};
pub use protocol::{DialogResponse, PdbStatus, ProcedureType, RunMode};
pub use result::{ErrorPayload, RunResult};

#[doc(hidden)]
pub use anyhow;

/// Generate `plugin_query` and `plugin_run` entry points for a plug-in type.
///
/// The type must implement [`Plugin`] and [`Default`].
///
/// ```rust,ignore
/// goat_core::plugin_main!(GoatExercise);
/// ```
#[macro_export]
macro_rules! plugin_main {
    ($plugin:ty) => {
        /// Descriptors of every procedure this plug-in provides.
        pub fn plugin_query() -> $crate::anyhow::Result<::std::vec::Vec<$crate::ProcedureInfo>> {
            $crate::log::init_logging();
            $crate::handler::query(<$plugin as ::std::default::Default>::default())
        }

        /// Run procedure `name` on a fresh plug-in instance.
        pub fn plugin_run(name: &str, ctx: $crate::RunContext<'_>) -> $crate::RunResult {
            $crate::log::init_logging();
            $crate::handler::run_once(<$plugin as ::std::default::Default>::default(), name, ctx)
        }
    };
}
