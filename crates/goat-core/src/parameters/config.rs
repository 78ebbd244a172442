use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Result};

use crate::host::{DrawableId, ImageId};
use crate::protocol::{ParamType, RunMode};

use super::ParamSpec;

/// A single argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    RunMode(RunMode),
    Image(ImageId),
    Drawables(Vec<DrawableId>),
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
}

impl ArgValue {
    pub fn param_type(&self) -> ParamType {
        match self {
            ArgValue::RunMode(_) => ParamType::RunMode,
            ArgValue::Image(_) => ParamType::Image,
            ArgValue::Drawables(_) => ParamType::Drawables,
            ArgValue::Bool(_) => ParamType::Boolean,
            ArgValue::Int(_) => ParamType::Int,
            ArgValue::Double(_) => ParamType::Double,
            ArgValue::Str(_) => ParamType::String,
        }
    }

    /// Numeric view used for bounds checks.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Int(v) => Some(*v as f64),
            ArgValue::Double(v) => Some(*v),
            _ => None,
        }
    }
}

/// Named arguments for one run, keyed by [`ParamSpec::name`].
///
/// The run mode, image and drawables travel in the run call itself; the
/// config carries everything else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcedureConfig {
    values: BTreeMap<String, ArgValue>,
}

impl ProcedureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: &str, value: ArgValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: ArgValue) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        match self.require(key)? {
            ArgValue::Bool(v) => Ok(*v),
            other => bail!("argument '{key}' is {:?}, not a boolean", other.param_type()),
        }
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        match self.require(key)? {
            ArgValue::Int(v) => Ok(*v),
            other => bail!("argument '{key}' is {:?}, not an int", other.param_type()),
        }
    }

    pub fn get_double(&self, key: &str) -> Result<f64> {
        match self.require(key)? {
            ArgValue::Double(v) => Ok(*v),
            other => bail!("argument '{key}' is {:?}, not a double", other.param_type()),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<&str> {
        match self.require(key)? {
            ArgValue::Str(v) => Ok(v),
            other => bail!("argument '{key}' is {:?}, not a string", other.param_type()),
        }
    }

    fn require(&self, key: &str) -> Result<&ArgValue> {
        self.values
            .get(key)
            .ok_or_else(|| anyhow!("missing argument '{key}'"))
    }

    /// Check against `specs` and fill in defaults.
    ///
    /// Standard arguments (run mode, image, drawables) are skipped. Unknown
    /// keys, type or range mismatches and missing arguments without a
    /// default are errors.
    pub fn resolve(&self, specs: &[ParamSpec]) -> Result<ProcedureConfig> {
        let extra: Vec<&ParamSpec> = specs.iter().filter(|s| !s.is_standard()).collect();

        for key in self.values.keys() {
            if !extra.iter().any(|s| &s.name == key) {
                bail!("unknown argument '{key}'");
            }
        }

        let mut resolved = ProcedureConfig::new();
        for spec in extra {
            let value = match (self.values.get(&spec.name), &spec.default) {
                (Some(value), _) => value.clone(),
                (None, Some(default)) => default.clone(),
                (None, None) => bail!("missing argument '{}'", spec.name),
            };
            spec.check(&value)?;
            resolved.values.insert(spec.name.clone(), value);
        }
        Ok(resolved)
    }
}
