//! The [`Plugin`] contract and the [`Registry`] that binds procedure names
//! to plug-ins.
//!
//! A plug-in lists its procedure names once, describes each on demand and
//! runs them by name. The registry enumerates and validates the descriptors
//! at registration time, checks each call's config against the schema, and
//! dispatches.

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Result};
use tracing::{info, warn};

use crate::host::{Drawable, Host, ImageId};
use crate::info::ProcedureInfo;
use crate::parameters::ProcedureConfig;
use crate::protocol::{PdbStatus, RunMode};
use crate::result::RunResult;

/// Everything a run callback receives.
pub struct RunContext<'a> {
    pub run_mode: RunMode,
    pub image: ImageId,
    /// Drawables selected when the procedure was invoked.
    pub drawables: Vec<&'a mut dyn Drawable>,
    /// Non-standard arguments, already resolved against the schema when the
    /// call comes through a [`Registry`].
    pub config: ProcedureConfig,
    pub host: &'a mut dyn Host,
}

/// Capability contract every plug-in implements.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct MyPlugin;
///
/// impl Plugin for MyPlugin {
///     fn list_ids(&self) -> Vec<&'static str> {
///         vec!["plug-in-my-filter"]
///     }
///
///     fn describe(&self, id: &str) -> Option<ProcedureInfo> {
///         (id == "plug-in-my-filter").then(|| ProcedureInfo { /* ... */ })
///     }
///
///     fn run(&mut self, id: &str, ctx: RunContext<'_>) -> RunResult {
///         RunResult::success()
///     }
/// }
///
/// goat_core::plugin_main!(MyPlugin);
/// ```
pub trait Plugin {
    /// Names of the procedures this plug-in provides.
    fn list_ids(&self) -> Vec<&'static str>;

    /// Descriptor for `id`, `None` if the plug-in does not provide it.
    fn describe(&self, id: &str) -> Option<ProcedureInfo>;

    /// Run procedure `id`.
    fn run(&mut self, id: &str, ctx: RunContext<'_>) -> RunResult;
}

struct Registered {
    plugin: usize,
    info: ProcedureInfo,
}

/// Procedure table: name -> descriptor and owning plug-in.
#[derive(Default)]
pub struct Registry {
    plugins: Vec<Box<dyn Plugin>>,
    procedures: BTreeMap<String, Registered>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerate and validate `plugin`'s procedures, then take ownership of
    /// it. Nothing is registered if any descriptor is rejected.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> Result<Vec<String>> {
        let mut infos: Vec<ProcedureInfo> = Vec::new();
        for id in plugin.list_ids() {
            let info = plugin
                .describe(id)
                .ok_or_else(|| anyhow!("plug-in lists '{id}' but does not describe it"))?;
            if info.name != id {
                bail!("procedure '{id}' describes itself as '{}'", info.name);
            }
            info.validate()?;
            if self.procedures.contains_key(id) || infos.iter().any(|i| i.name == id) {
                bail!("procedure '{id}' is already registered");
            }
            infos.push(info);
        }

        let index = self.plugins.len();
        self.plugins.push(plugin);

        let names: Vec<String> = infos.iter().map(|i| i.name.clone()).collect();
        for info in infos {
            info!(procedure = %info.name, menu = ?info.menu_path, "registered procedure");
            self.procedures.insert(
                info.name.clone(),
                Registered {
                    plugin: index,
                    info,
                },
            );
        }
        Ok(names)
    }

    pub fn procedure(&self, name: &str) -> Option<&ProcedureInfo> {
        self.procedures.get(name).map(|r| &r.info)
    }

    /// All descriptors, sorted by name.
    pub fn procedures(&self) -> impl Iterator<Item = &ProcedureInfo> {
        self.procedures.values().map(|r| &r.info)
    }

    /// Validate the call's config and dispatch to the owning plug-in.
    pub fn run(&mut self, name: &str, mut ctx: RunContext<'_>) -> RunResult {
        let Some(registered) = self.procedures.get(name) else {
            warn!(procedure = name, "no such procedure");
            return RunResult::calling_error(format!("Procedure '{name}' not found"));
        };

        match ctx.config.resolve(&registered.info.params) {
            Ok(config) => ctx.config = config,
            Err(err) => {
                warn!(procedure = name, "rejected arguments: {err:#}");
                return RunResult::calling_error(format!("Procedure '{name}': {err:#}"));
            }
        }

        info!(
            procedure = name,
            run_mode = ?ctx.run_mode,
            image = %ctx.image,
            drawables = ctx.drawables.len(),
            "running"
        );

        let plugin = registered.plugin;
        let result = self.plugins[plugin].run(name, ctx);

        match result.status {
            PdbStatus::Success | PdbStatus::Cancel | PdbStatus::PassThrough => {
                info!(procedure = name, status = ?result.status, "finished");
            }
            PdbStatus::CallingError | PdbStatus::ExecutionError => {
                warn!(
                    procedure = name,
                    status = ?result.status,
                    message = result.message().unwrap_or_default(),
                    "failed"
                );
            }
        }
        result
    }
}

/// Descriptors of every procedure `plugin` provides, validated.
pub fn query<P: Plugin + 'static>(plugin: P) -> Result<Vec<ProcedureInfo>> {
    let mut registry = Registry::new();
    registry.register(Box::new(plugin))?;
    Ok(registry.procedures().cloned().collect())
}

/// Register `plugin` in a fresh registry and run `name` once.
pub fn run_once<P: Plugin + 'static>(plugin: P, name: &str, ctx: RunContext<'_>) -> RunResult {
    let mut registry = Registry::new();
    if let Err(err) = registry.register(Box::new(plugin)) {
        return RunResult::execution_error(&err);
    }
    registry.run(name, ctx)
}
