use crate::domain::{
    common::entities::app_errors::CoreError,
    retrieval::entities::{PatientProfile, parse_number},
};

/// Per-request profile fields as received; anything left out falls back to
/// the configured default profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientProfileOverrides {
    pub age: Option<String>,
    pub weight: Option<String>,
    pub height: Option<String>,
    pub gender: Option<String>,
    pub conditions: Vec<String>,
}

impl PatientProfileOverrides {
    pub fn apply(self, base: &PatientProfile) -> Result<PatientProfile, CoreError> {
        let mut profile = base.clone();

        if let Some(age) = self.age {
            profile.age = parse_number("age", &age)?;
        }
        if let Some(weight) = self.weight {
            profile.weight = parse_number("weight", &weight)?;
        }
        if let Some(height) = self.height {
            profile.height = Some(parse_number("height", &height)?);
        }
        if let Some(gender) = self.gender {
            profile.gender = gender.trim().to_string();
        }
        if !self.conditions.is_empty() {
            profile.conditions = self
                .conditions
                .into_iter()
                .map(|c| c.trim().to_string())
                .collect();
        }

        profile.validate()?;
        Ok(profile)
    }
}
