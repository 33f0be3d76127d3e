use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::common::entities::app_errors::CoreError;

const NUTRIENTS_KEY: &str = "Nutrients";
const NOTES_KEY: &str = "Notes";

/// Aggregate entry the refinement prompt asks the delegate to append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateJudgment {
    /// `overall safety: yes/no`, by majority of nutrient verdicts.
    OverallSafety,
    /// `overall rating: 0..100`.
    OverallRating,
}

impl AggregateJudgment {
    pub fn key(&self) -> &'static str {
        match self {
            AggregateJudgment::OverallSafety => "overall safety",
            AggregateJudgment::OverallRating => "overall rating",
        }
    }
}

impl fmt::Display for AggregateJudgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Delegate-produced assessment. Only the `Nutrients` object is enforced;
/// everything else is read leniently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Assessment {
    document: Map<String, Value>,
}

impl Assessment {
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        let Value::Object(document) = value else {
            return Err(CoreError::MalformedDelegateResponse(
                "expected a JSON object".to_string(),
            ));
        };

        let assessment = Self { document };
        if assessment.nutrients().is_none() {
            return Err(CoreError::MalformedDelegateResponse(format!(
                "missing \"{}\" object",
                NUTRIENTS_KEY
            )));
        }

        Ok(assessment)
    }

    pub fn nutrients(&self) -> Option<&Map<String, Value>> {
        find_key(&self.document, NUTRIENTS_KEY).and_then(Value::as_object)
    }

    pub fn notes(&self) -> Vec<String> {
        match find_key(&self.document, NOTES_KEY) {
            Some(Value::Array(notes)) => notes.iter().map(value_to_text).collect(),
            Some(Value::String(note)) => vec![note.clone()],
            Some(Value::Object(notes)) => notes
                .iter()
                .map(|(k, v)| format!("{}: {}", k, value_to_text(v)))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Looks for the aggregate entry at the top level, then inside `Nutrients`
    /// where some delegates append it.
    pub fn aggregate(&self, judgment: AggregateJudgment) -> Option<&Value> {
        find_key(&self.document, judgment.key())
            .or_else(|| self.nutrients().and_then(|n| find_key(n, judgment.key())))
    }

    pub fn overall_safety(&self) -> Option<bool> {
        match self.aggregate(AggregateJudgment::OverallSafety)? {
            Value::Bool(safe) => Some(*safe),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" | "safe" | "true" => Some(true),
                "no" | "unsafe" | "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn overall_rating(&self) -> Option<f64> {
        match self.aggregate(AggregateJudgment::OverallRating)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => leading_number(s),
            _ => None,
        }
    }

    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.document).unwrap_or_else(|_| self.to_string())
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.document.clone()))
    }
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .to_ascii_lowercase()
        .replace(['_', '-'], " ")
}

fn find_key<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    let wanted = normalize_key(key);
    map.get(key).or_else(|| {
        map.iter()
            .find(|(k, _)| normalize_key(k) == wanted)
            .map(|(_, v)| v)
    })
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)").expect("leading number pattern"));

pub(crate) fn leading_number(text: &str) -> Option<f64> {
    LEADING_NUMBER
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
