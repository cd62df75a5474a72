//! Bound parameter values and the parameter map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameter map of a compiled query, keyed by placeholder name (without the `:`).
pub type Params = BTreeMap<String, Value>;

/// SQL parameter values.
///
/// Client-supplied filter and search values are always bound as [`Value::String`];
/// the other variants exist for trusted `additional_params` declared with the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum Value {
    /// SQL `NULL`.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    String(String),
}

impl Value {
    /// Returns the text content if this is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Translate a client pattern into a `LIKE` operand.
///
/// Every `*` becomes the SQL wildcard `%` and the whole value is wrapped in `%...%`,
/// so `a*sd` matches `%a%sd%`.
#[must_use]
pub fn like_pattern(raw: &str) -> String {
    format!("%{}%", raw.replace('*', "%"))
}

/// Collects bound parameters during a single compilation.
///
/// Synthesized keys are never reused: [`Binder::bind`] appends a `_<n>` suffix when
/// the requested key is already taken.
#[derive(Debug, Default)]
pub(crate) struct Binder {
    params: Params,
}

impl Binder {
    /// Bind `value` under `base` (or the first free `base_<n>`) and return the key used.
    pub(crate) fn bind(&mut self, base: String, value: Value) -> String {
        let mut key = base.clone();
        let mut suffix = 1usize;
        while self.params.contains_key(&key) {
            key = format!("{base}_{suffix}");
            suffix += 1;
        }
        self.params.insert(key.clone(), value);
        key
    }

    /// Bind `value` under a fixed key shared by several placeholders.
    pub(crate) fn bind_shared(&mut self, key: &str, value: Value) {
        self.params.insert(key.to_string(), value);
    }

    /// Merge trusted parameters, overwriting synthesized keys of the same name.
    pub(crate) fn extend_trusted(&mut self, params: &Params) {
        for (key, value) in params {
            self.params.insert(key.clone(), value.clone());
        }
    }

    pub(crate) fn into_params(self) -> Params {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_translates_wildcards() {
        assert_eq!(like_pattern("a*sd"), "%a%sd%");
        assert_eq!(like_pattern("hallo*test"), "%hallo%test%");
        assert_eq!(like_pattern("plain"), "%plain%");
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("**"), "%%%%");
    }

    #[test]
    fn test_binder_keeps_first_free_key() {
        let mut binder = Binder::default();
        assert_eq!(binder.bind("a10".into(), "x".into()), "a10");
        assert_eq!(binder.bind("a10".into(), "y".into()), "a10_1");
        assert_eq!(binder.bind("a10".into(), "z".into()), "a10_2");

        let params = binder.into_params();
        assert_eq!(params.len(), 3);
        assert_eq!(params["a10"], Value::from("x"));
        assert_eq!(params["a10_1"], Value::from("y"));
        assert_eq!(params["a10_2"], Value::from("z"));
    }

    #[test]
    fn test_binder_trusted_params_win() {
        let mut binder = Binder::default();
        binder.bind("name0".into(), "client".into());
        binder.bind_shared("__search", "%x%".into());

        let mut trusted = Params::new();
        trusted.insert("name0".into(), Value::Int(7));
        trusted.insert("tenant".into(), Value::Int(3));
        binder.extend_trusted(&trusted);

        let params = binder.into_params();
        assert_eq!(params["name0"], Value::Int(7));
        assert_eq!(params["tenant"], Value::Int(3));
        assert_eq!(params["__search"], Value::from("%x%"));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from("a"), Value::String("a".into()));
        assert_eq!(Value::from(3_i32), Value::Int(3));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(2_i64)), Value::Int(2));
        assert_eq!(Value::from("a").as_str(), Some("a"));
        assert_eq!(Value::Int(1).as_str(), None);
    }

    #[test]
    fn test_value_serializes_untagged() {
        let json = serde_json::to_string(&Value::from("x")).unwrap();
        assert_eq!(json, r#""x""#);
        let json = serde_json::to_string(&Value::Null).unwrap();
        assert_eq!(json, "null");

        let parsed: Value = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, Value::Int(12));
        let parsed: Value = serde_json::from_str("1.5").unwrap();
        assert_eq!(parsed, Value::Float(1.5));
        let parsed: Value = serde_json::from_str("false").unwrap();
        assert_eq!(parsed, Value::Bool(false));
    }
}
