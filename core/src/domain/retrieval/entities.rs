use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::entities::app_errors::CoreError;

/// Patient data the retrieval query and the prompts are built from.
///
/// Rendered as a flat `key:value` list joined by commas, so no value may
/// contain `,` or `:`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub age: u32,
    /// Kilograms.
    pub weight: f32,
    /// Centimetres.
    pub height: Option<f32>,
    pub gender: String,
    pub conditions: Vec<String>,
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self {
            age: 65,
            weight: 70.0,
            height: None,
            gender: "male".to_string(),
            conditions: vec!["Diabetic".to_string()],
        }
    }
}

impl PatientProfile {
    pub fn new(
        age: u32,
        weight: f32,
        height: Option<f32>,
        gender: String,
        conditions: Vec<String>,
    ) -> Result<Self, CoreError> {
        let profile = Self {
            age,
            weight,
            height,
            gender,
            conditions,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(CoreError::Invalid("weight must be a positive number".to_string()));
        }
        if let Some(height) = self.height {
            if !height.is_finite() || height <= 0.0 {
                return Err(CoreError::Invalid("height must be a positive number".to_string()));
            }
        }
        validate_value("gender", &self.gender)?;
        if self.conditions.is_empty() {
            return Err(CoreError::Invalid("at least one condition is required".to_string()));
        }
        for condition in &self.conditions {
            validate_value("condition", condition)?;
        }
        Ok(())
    }

    /// The flat string handed to the embedding model and the prompts.
    pub fn to_query_string(&self) -> String {
        let mut pairs = vec![
            format!("age:{}", self.age),
            format!("weight:{}", self.weight),
        ];
        if let Some(height) = self.height {
            pairs.push(format!("height:{}", height));
        }
        pairs.push(format!("gender:{}", self.gender));
        pairs.push(format!("condition:{}", self.conditions.join("/")));
        pairs.join(",")
    }
}

fn validate_value(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Invalid(format!("{} must not be empty", field)));
    }
    if value.contains(',') || value.contains(':') {
        return Err(CoreError::Invalid(format!(
            "{} must not contain ',' or ':'",
            field
        )));
    }
    Ok(())
}

pub(crate) fn parse_number<T: FromStr>(field: &str, value: &str) -> Result<T, CoreError> {
    value
        .trim()
        .parse()
        .map_err(|_| CoreError::Invalid(format!("{} must be a number, got '{}'", field, value)))
}

impl fmt::Display for PatientProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl FromStr for PatientProfile {
    type Err = CoreError;

    /// Parses `age:65,weight:70,gender:male,condition:Diabetic`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut age = None;
        let mut weight = None;
        let mut height = None;
        let mut gender = None;
        let mut conditions = Vec::new();

        for pair in s.split(',').filter(|p| !p.trim().is_empty()) {
            let (key, value) = pair.split_once(':').ok_or_else(|| {
                CoreError::Invalid(format!("profile entry '{}' is not key:value", pair))
            })?;
            let value = value.trim();
            match key.trim() {
                "age" => age = Some(parse_number("age", value)?),
                "weight" => weight = Some(parse_number("weight", value)?),
                "height" => height = Some(parse_number("height", value)?),
                "gender" => gender = Some(value.to_string()),
                "condition" => conditions.extend(
                    value
                        .split('/')
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(str::to_string),
                ),
                other => {
                    return Err(CoreError::Invalid(format!(
                        "unknown profile key '{}'",
                        other
                    )));
                }
            }
        }

        let missing = |field: &str| CoreError::Invalid(format!("profile is missing {}", field));

        PatientProfile::new(
            age.ok_or_else(|| missing("age"))?,
            weight.ok_or_else(|| missing("weight"))?,
            height,
            gender.ok_or_else(|| missing("gender"))?,
            conditions,
        )
    }
}

/// One similarity match from the vector index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub text: String,
    pub source: Option<String>,
    pub score: f32,
}

/// Matches in the order the index returned them (descending score).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievedContext {
    pub documents: Vec<RetrievedDocument>,
}

impl RetrievedContext {
    pub fn new(documents: Vec<RetrievedDocument>) -> Self {
        Self { documents }
    }

    pub fn joined_text(&self) -> String {
        self.documents
            .iter()
            .map(|d| d.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn sources(&self) -> Vec<&str> {
        self.documents
            .iter()
            .filter_map(|d| d.source.as_deref())
            .collect()
    }
}
