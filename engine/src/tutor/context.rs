use std::{collections::BTreeMap, fmt};

use crate::errors::CriterionError;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    // booleans read as 0/1 so that bit-valued keys compare either way
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Bool(b) => Some(*b as i64),
            _ => None,
        }
    }
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(n) => Some(*n != 0),
            _ => None,
        }
    }
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
    pub fn loosely_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loosely_eq(y))
            }
            (a, b) => match (a.as_int(), b.as_int()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", *b as u8),
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
        }
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

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

/// Values an experiment's simulation exposes to step criteria on one
/// render pass.
///
/// Strict accessors (`int`, `flag`, `text`) fail with a [`CriterionError`]
/// when a key is absent or has the wrong shape, which lets criteria use `?`.
/// The tutor treats such failures as "not satisfied". The `*_or` accessors
/// and [`ContextSnapshot::is`] never fail and read missing keys as a default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextSnapshot {
    values: BTreeMap<String, Value>,
}

impl ContextSnapshot {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn require(&self, key: &str) -> Result<&Value, CriterionError> {
        self.values
            .get(key)
            .ok_or_else(|| CriterionError::MissingKey(key.to_string()))
    }
    pub fn int(&self, key: &str) -> Result<i64, CriterionError> {
        self.require(key)?
            .as_int()
            .ok_or_else(|| CriterionError::TypeMismatch {
                key: key.to_string(),
                expected: "integer",
            })
    }
    pub fn flag(&self, key: &str) -> Result<bool, CriterionError> {
        self.require(key)?
            .as_bool()
            .ok_or_else(|| CriterionError::TypeMismatch {
                key: key.to_string(),
                expected: "boolean",
            })
    }
    pub fn text(&self, key: &str) -> Result<&str, CriterionError> {
        self.require(key)?
            .as_text()
            .ok_or_else(|| CriterionError::TypeMismatch {
                key: key.to_string(),
                expected: "string",
            })
    }
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        self.int(key).unwrap_or(default)
    }
    pub fn flag_or(&self, key: &str, default: bool) -> bool {
        self.flag(key).unwrap_or(default)
    }
    // false when the key is absent
    pub fn is(&self, key: &str, expected: impl Into<Value>) -> bool {
        let expected = expected.into();
        self.values
            .get(key)
            .map(|v| v.loosely_eq(&expected))
            .unwrap_or(false)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ContextSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        ContextSnapshot {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_accessors_report_missing_and_mismatched_keys() {
        let ctx = ContextSnapshot::new().with("gate", "AND").with("a", 1);
        assert_eq!(ctx.int("a"), Ok(1));
        assert_eq!(ctx.text("gate"), Ok("AND"));
        assert_eq!(
            ctx.int("b"),
            Err(CriterionError::MissingKey("b".to_string()))
        );
        assert_eq!(
            ctx.int("gate"),
            Err(CriterionError::TypeMismatch {
                key: "gate".to_string(),
                expected: "integer"
            })
        );
    }

    #[test]
    fn defaults_for_missing_keys() {
        let ctx = ContextSnapshot::new();
        assert_eq!(ctx.int_or("count", 0), 0);
        assert!(!ctx.flag_or("q", false));
        assert!(!ctx.is("gate", "AND"));
        assert!(ctx.is_empty());
    }

    #[test]
    fn bits_compare_loosely() {
        let ctx = ContextSnapshot::new().with("q", true).with("out", 0);
        assert!(ctx.is("q", 1));
        assert!(ctx.is("q", true));
        assert!(ctx.is("out", false));
        assert!(!ctx.is("out", "0"));
        assert_eq!(ctx.flag("out"), Ok(false));
    }

    #[test]
    fn lists_and_display() {
        let ctx: ContextSnapshot = vec![("bits", Value::from(vec![1, 0, 1]))]
            .into_iter()
            .collect();
        assert!(ctx.is("bits", vec![true, false, true]));
        assert_eq!(ctx.get("bits").unwrap().to_string(), "[1, 0, 1]");
        assert_eq!(ctx.len(), 1);
    }
}
