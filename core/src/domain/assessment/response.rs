use serde_json::Value;
use tracing::debug;

use crate::domain::{
    assessment::entities::Assessment, common::entities::app_errors::CoreError,
};

/// Pulls the assessment object out of a chat completion.
///
/// Delegates wrap the JSON in code fences or a sentence of preamble; every
/// `{` is tried in turn and the first object carrying `Nutrients` wins.
/// Text after the object is ignored.
pub fn parse_assessment(raw: &str) -> Result<Assessment, CoreError> {
    let mut last_error = None;

    for (start, _) in raw.match_indices('{') {
        let mut stream = serde_json::Deserializer::from_str(&raw[start..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value)) => match Assessment::from_value(value) {
                Ok(assessment) => return Ok(assessment),
                Err(e) => last_error = Some(e),
            },
            Some(Err(e)) => debug!(offset = start, error = %e, "Not a JSON value"),
            None => {}
        }
    }

    Err(last_error.unwrap_or_else(|| {
        CoreError::MalformedDelegateResponse("no JSON object in response".to_string())
    }))
}
