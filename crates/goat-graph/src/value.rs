//! Property values for node configuration.

use anyhow::{bail, Result};

use crate::buffer::PixelBuffer;

/// A value assigned to a node property with [`Graph::set_property`](crate::Graph::set_property).
#[derive(Debug, Clone)]
pub enum Value {
    Buffer(PixelBuffer),
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Buffer(_) => "buffer",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Str(_) => "string",
        }
    }

    pub fn into_buffer(self, key: &str) -> Result<PixelBuffer> {
        match self {
            Value::Buffer(buffer) => Ok(buffer),
            other => bail!("property '{key}' expects a buffer, got {}", other.type_name()),
        }
    }
}

impl From<PixelBuffer> for Value {
    fn from(buffer: PixelBuffer) -> Self {
        Value::Buffer(buffer)
    }
}

impl From<&PixelBuffer> for Value {
    fn from(buffer: &PixelBuffer) -> Self {
        Value::Buffer(buffer.clone())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}
