//! Query-string construction
//!
//! List filters are plain `Serialize` structs; absent (`None`/null) fields
//! never reach the wire. Array values become repeated keys.

use crate::domain::errors::ApiError;
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

/// Ordered list of query pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Appends a pair when `value` is present
    pub fn with_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Builds parameters from any value serializing to a flat JSON object
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encoding`] if the value is not an object or
    /// contains nested objects.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        let json = serde_json::to_value(value).map_err(|e| ApiError::Encoding(e.to_string()))?;

        let map = match json {
            Value::Null => return Ok(Self::new()),
            Value::Object(map) => map,
            other => {
                return Err(ApiError::Encoding(format!(
                    "query parameters must be an object, got {other}"
                )))
            }
        };

        let mut params = Self::new();
        for (key, value) in map {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        if let Some(text) = scalar_to_string(&key, item)? {
                            params.pairs.push((key.clone(), text));
                        }
                    }
                }
                scalar => {
                    if let Some(text) = scalar_to_string(&key, scalar)? {
                        params.pairs.push((key, text));
                    }
                }
            }
        }

        Ok(params)
    }

    /// True when no pair is present
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pairs in the order they were added
    ///
    /// Pairs built by [`QueryParams::from_serialize`] come sorted by field
    /// name, since they are read back from a `serde_json` map.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// URL-encoded `k=v&k2=v2` form, without the leading `?`
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

fn scalar_to_string(key: &str, value: Value) -> Result<Option<String>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ApiError::Encoding(format!(
            "query parameter '{key}' cannot hold a nested value"
        ))),
    }
}
