use serde_json::Value;

use crate::{errors::Error, review::types::ReviewSnapshot, Result};

/// Check the response shape and extract the submissions and server time.
pub fn validate(payload: &Value) -> Result<ReviewSnapshot> {
    tracing::debug!("validating review api response");

    let Some(map) = payload.as_object() else {
        return Err(rejected("not a mapping"));
    };
    let Some(homeworks) = map.get("homeworks") else {
        return Err(rejected("missing homeworks"));
    };
    let Some(current_date) = map.get("current_date") else {
        return Err(rejected("missing current_date"));
    };
    let Some(homeworks) = homeworks.as_array() else {
        return Err(rejected("homeworks not a list"));
    };
    let Some(current_date) = current_date.as_i64() else {
        return Err(rejected("current_date not an integer"));
    };

    Ok(ReviewSnapshot {
        homeworks: homeworks.clone(),
        current_date,
    })
}

fn rejected(reason: &str) -> Error {
    tracing::error!("review api response rejected: {reason}");
    Error::schema(reason)
}
