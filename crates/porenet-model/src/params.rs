//! Caller-supplied model parameters.

use indexmap::IndexMap;
use porenet_core::{Array, ModelError};

/// A single bound parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// Floating-point scalar.
    Float(f64),
    /// Integer scalar.
    Int(i64),
    /// Boolean flag.
    Bool(bool),
    /// Free text, typically the key of a property to read
    /// (e.g. `"pore.temperature"`).
    Text(String),
    /// Literal per-element data.
    Array(Array),
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Array> for ParamValue {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

/// Named parameters bound to a model at registration, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    values: IndexMap<String, ParamValue>,
}

impl Params {
    /// No parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameters are bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn require(&self, name: &str) -> Result<&ParamValue, ModelError> {
        self.get(name).ok_or_else(|| ModelError::MissingParam {
            name: name.to_string(),
        })
    }

    /// A required float. Integers are widened.
    pub fn float(&self, name: &str) -> Result<f64, ModelError> {
        match self.require(name)? {
            ParamValue::Float(v) => Ok(*v),
            ParamValue::Int(v) => Ok(*v as f64),
            _ => Err(ModelError::ParamType {
                name: name.to_string(),
                expected: "a number",
            }),
        }
    }

    /// A float, or `default` when absent.
    pub fn float_or(&self, name: &str, default: f64) -> Result<f64, ModelError> {
        match self.get(name) {
            None => Ok(default),
            Some(_) => self.float(name),
        }
    }

    /// A required integer.
    pub fn int(&self, name: &str) -> Result<i64, ModelError> {
        match self.require(name)? {
            ParamValue::Int(v) => Ok(*v),
            _ => Err(ModelError::ParamType {
                name: name.to_string(),
                expected: "an integer",
            }),
        }
    }

    /// A required boolean flag.
    pub fn flag(&self, name: &str) -> Result<bool, ModelError> {
        match self.require(name)? {
            ParamValue::Bool(v) => Ok(*v),
            _ => Err(ModelError::ParamType {
                name: name.to_string(),
                expected: "a boolean",
            }),
        }
    }

    /// A required text value.
    pub fn text(&self, name: &str) -> Result<&str, ModelError> {
        match self.require(name)? {
            ParamValue::Text(v) => Ok(v),
            _ => Err(ModelError::ParamType {
                name: name.to_string(),
                expected: "text",
            }),
        }
    }

    /// A required literal array.
    pub fn array(&self, name: &str) -> Result<&Array, ModelError> {
        match self.require(name)? {
            ParamValue::Array(v) => Ok(v),
            _ => Err(ModelError::ParamType {
                name: name.to_string(),
                expected: "an array",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        let p = Params::new()
            .with("D", 2.5)
            .with("n", 3_i64)
            .with("temperature", "pore.temperature")
            .with("flag", true);
        assert_eq!(p.float("D").unwrap(), 2.5);
        assert_eq!(p.float("n").unwrap(), 3.0);
        assert_eq!(p.int("n").unwrap(), 3);
        assert_eq!(p.text("temperature").unwrap(), "pore.temperature");
        assert!(p.flag("flag").unwrap());
        assert_eq!(p.float_or("missing", 1.0).unwrap(), 1.0);
    }

    #[test]
    fn missing_and_mistyped() {
        let p = Params::new().with("name", "x");
        assert_eq!(
            p.float("D"),
            Err(ModelError::MissingParam { name: "D".into() })
        );
        assert_eq!(
            p.float("name"),
            Err(ModelError::ParamType {
                name: "name".into(),
                expected: "a number",
            })
        );
        assert!(p.float_or("name", 0.0).is_err());
    }

    #[test]
    fn insertion_order_preserved() {
        let p = Params::new().with("b", 1.0).with("a", 2.0).with("b", 3.0);
        let names: Vec<&str> = p.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(p.float("b").unwrap(), 3.0);
    }
}
