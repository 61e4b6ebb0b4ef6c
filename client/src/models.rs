use std::{collections::BTreeMap, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{FieldParseError, SubmitError},
    utils::render_value,
};

/// Name/value pairs collected from the form at submission time.
///
/// Serializes as a flat JSON object of strings. Inserting a name twice keeps the
/// later value, the same as building an object from repeated form entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses a line of whitespace separated `NAME=VALUE` pairs.
    pub fn parse_line(line: &str) -> Result<Self, FieldParseError> {
        line.split_whitespace()
            .map(str::parse::<Field>)
            .collect()
    }
}

impl FromIterator<Field> for FormFields {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut fields = FormFields::new();
        for field in iter {
            fields.insert(field.name, field.value);
        }
        fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FormFields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

/// A single `NAME=VALUE` pair. The value is kept verbatim and may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl FromStr for Field {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok(Field {
                name: name.to_string(),
                value: value.to_string(),
            }),
            _ => Err(FieldParseError(s.to_string())),
        }
    }
}

/// Body of a JSON response from the prediction endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub prediction: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl PredictionResponse {
    /// A usable prediction wins over an `error` field when both are present.
    pub fn into_prediction(self) -> Result<String, SubmitError> {
        if let Some(prediction) = self.prediction.as_ref().and_then(render_value) {
            return Ok(prediction);
        }

        Err(SubmitError::Semantic(self.error.as_ref().and_then(render_value)))
    }
}
