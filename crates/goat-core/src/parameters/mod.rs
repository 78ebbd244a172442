//! Argument schemas and the named configuration object passed to runs.
//! Use [`ParamSpec`]'s constructors for the common argument kinds.

mod config;
mod info;
pub use config::*;
pub use info::*;
