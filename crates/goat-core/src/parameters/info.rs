use anyhow::{bail, Result};

use crate::protocol::{ParamType, RunMode};

use super::ArgValue;

/// Declaration of one procedure argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Key in the [`ProcedureConfig`](super::ProcedureConfig).
    pub name: String,
    /// Short label for UIs.
    pub nick: String,
    pub blurb: String,
    pub param_type: ParamType,
    pub default: Option<ArgValue>,
    /// Inclusive bounds for numeric arguments.
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ParamSpec {
    fn new(name: &str, nick: &str, blurb: &str, param_type: ParamType) -> Self {
        Self {
            name: name.to_string(),
            nick: nick.to_string(),
            blurb: blurb.to_string(),
            param_type,
            default: None,
            min: None,
            max: None,
        }
    }

    pub fn run_mode(name: &str, nick: &str, blurb: &str) -> Self {
        let mut spec = Self::new(name, nick, blurb, ParamType::RunMode);
        spec.default = Some(ArgValue::RunMode(RunMode::Interactive));
        spec
    }

    pub fn image(name: &str, nick: &str, blurb: &str) -> Self {
        Self::new(name, nick, blurb, ParamType::Image)
    }

    pub fn drawables(name: &str, nick: &str, blurb: &str) -> Self {
        Self::new(name, nick, blurb, ParamType::Drawables)
    }

    pub fn boolean(name: &str, nick: &str, blurb: &str, default: bool) -> Self {
        let mut spec = Self::new(name, nick, blurb, ParamType::Boolean);
        spec.default = Some(ArgValue::Bool(default));
        spec
    }

    pub fn int(name: &str, nick: &str, blurb: &str, min: i64, max: i64, default: i64) -> Self {
        let mut spec = Self::new(name, nick, blurb, ParamType::Int);
        spec.min = Some(min as f64);
        spec.max = Some(max as f64);
        spec.default = Some(ArgValue::Int(default));
        spec
    }

    pub fn double(name: &str, nick: &str, blurb: &str, min: f64, max: f64, default: f64) -> Self {
        let mut spec = Self::new(name, nick, blurb, ParamType::Double);
        spec.min = Some(min);
        spec.max = Some(max);
        spec.default = Some(ArgValue::Double(default));
        spec
    }

    pub fn string(name: &str, nick: &str, blurb: &str, default: &str) -> Self {
        let mut spec = Self::new(name, nick, blurb, ParamType::String);
        spec.default = Some(ArgValue::Str(default.to_string()));
        spec
    }

    /// `run-mode`, `image`, `drawables`: the leading arguments of every
    /// image filter.
    pub fn standard_filter_args() -> Vec<ParamSpec> {
        vec![
            Self::run_mode("run-mode", "Run mode", "The run mode"),
            Self::image("image", "Image", "The input image"),
            Self::drawables("drawables", "Drawables", "The input drawables"),
        ]
    }

    /// Arguments carried outside the config object, in the run call itself.
    pub fn is_standard(&self) -> bool {
        matches!(
            self.param_type,
            ParamType::RunMode | ParamType::Image | ParamType::Drawables
        )
    }

    /// Check `value` against type and bounds.
    pub fn check(&self, value: &ArgValue) -> Result<()> {
        if value.param_type() != self.param_type {
            bail!(
                "argument '{}' expects {:?}, got {:?}",
                self.name,
                self.param_type,
                value.param_type()
            );
        }
        if let Some(v) = value.as_f64() {
            if v.is_nan() {
                bail!("argument '{}' is NaN", self.name);
            }
            if let Some(min) = self.min.filter(|min| v < *min) {
                bail!("argument '{}' = {v} is below the minimum {min}", self.name);
            }
            if let Some(max) = self.max.filter(|max| v > *max) {
                bail!("argument '{}' = {v} is above the maximum {max}", self.name);
            }
        }
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            bail!("argument with an empty name");
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                bail!("argument '{}' has min {min} above max {max}", self.name);
            }
        }
        if let Some(default) = &self.default {
            self.check(default)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_args_are_recognised() {
        let args = ParamSpec::standard_filter_args();
        assert_eq!(args.len(), 3);
        assert!(args.iter().all(ParamSpec::is_standard));
        assert!(!ParamSpec::boolean("flag", "Flag", "", false).is_standard());
    }

    #[test]
    fn check_types_and_bounds() {
        let spec = ParamSpec::int("count", "Count", "", 1, 10, 5);
        assert!(spec.check(&ArgValue::Int(10)).is_ok());
        assert!(spec.check(&ArgValue::Int(11)).is_err());
        assert!(spec.check(&ArgValue::Int(0)).is_err());
        assert!(spec.check(&ArgValue::Double(3.0)).is_err());
    }

    #[test]
    fn doubles_reject_ints_and_nan() {
        let spec = ParamSpec::double("amount", "Amount", "", 0.0, 1.0, 0.5);
        assert!(spec.check(&ArgValue::Double(1.0)).is_ok());
        assert!(spec.check(&ArgValue::Int(1)).is_err());
        assert!(spec.check(&ArgValue::Double(f64::NAN)).is_err());

        let unbounded = ParamSpec {
            min: None,
            max: None,
            ..spec
        };
        assert!(unbounded.check(&ArgValue::Double(f64::NAN)).is_err());
    }

    #[test]
    fn validate_catches_bad_defaults() {
        let mut spec = ParamSpec::double("amount", "Amount", "", 0.0, 1.0, 0.5);
        assert!(spec.validate().is_ok());
        spec.default = Some(ArgValue::Double(2.0));
        assert!(spec.validate().is_err());
    }
}
