use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Value stored in the metadata side table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetaValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl MetaValue {
    fn type_name(&self) -> &'static str {
        match self {
            MetaValue::Int(_) => "int",
            MetaValue::Float(_) => "float",
            MetaValue::Str(_) => "string",
        }
    }

    pub fn as_int(&self) -> Result<i64, Error> {
        match self {
            MetaValue::Int(value) => Ok(*value),
            other => Err(Error::MetaValueType("int", other.type_name())),
        }
    }

    /// Reads the value as a float. Integer values are widened.
    pub fn as_float(&self) -> Result<f64, Error> {
        match self {
            MetaValue::Float(value) => Ok(*value),
            MetaValue::Int(value) => Ok(*value as f64),
            other => Err(Error::MetaValueType("float", other.type_name())),
        }
    }

    pub fn as_str(&self) -> Result<&str, Error> {
        match self {
            MetaValue::Str(value) => Ok(value),
            other => Err(Error::MetaValueType("string", other.type_name())),
        }
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Int(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Float(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Str(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Str(value)
    }
}

/// Key/value side table for auxiliary attributes of a result.
///
/// Keys are small opaque identifiers handed out by the surrounding system;
/// this table only stores them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaInfo {
    values: BTreeMap<u32, MetaValue>,
}

impl MetaInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// All keys present in the table, in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.keys().copied()
    }

    pub fn get(&self, key: u32) -> Option<&MetaValue> {
        self.values.get(&key)
    }

    /// Sets or overwrites the value under `key`.
    pub fn set(&mut self, key: u32, value: impl Into<MetaValue>) {
        self.values.insert(key, value.into());
    }

    pub fn contains(&self, key: u32) -> bool {
        self.values.contains_key(&key)
    }

    pub fn remove(&mut self, key: u32) -> Option<MetaValue> {
        self.values.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
