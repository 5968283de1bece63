use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field value attached to a metric point.
///
/// Numbers and booleans render bare; text runs through the same delimiter
/// escaping as tag values, so a field value cannot break the line shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Append the rendered value to `out`.
    pub(crate) fn write_to(&self, out: &mut String) {
        match self {
            FieldValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            FieldValue::Int(v) => {
                let mut buf = itoa::Buffer::new();
                out.push_str(buf.format(*v));
            }
            FieldValue::UInt(v) => {
                let mut buf = itoa::Buffer::new();
                out.push_str(buf.format(*v));
            }
            FieldValue::Float(v) => {
                use fmt::Write;
                let _ = write!(out, "{v}");
            }
            FieldValue::Text(s) => out.push_str(&crate::line::escape_component(s)),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = String::new();
        self.write_to(&mut rendered);
        f.write_str(&rendered)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v.into())
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::UInt(v.into())
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::UInt(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Float(v.into())
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}
