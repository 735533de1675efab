use serde_json::Value;
use std::fmt::Display;
use thiserror::Error;

use crate::client::{ApiResponse, ClientError};
use crate::graphql::envelope::describe;

/// Why a step did not pass
#[derive(Error, Debug)]
pub enum StepFailure {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{message}: expected {expected}, got {actual}")]
    Assertion {
        message: String,
        expected: String,
        actual: String,
    },
}

impl StepFailure {
    pub fn assertion(message: &str, expected: impl Display, actual: impl Display) -> Self {
        StepFailure::Assertion {
            message: message.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

pub fn assert_equals<T: PartialEq + Display>(message: &str, expected: T, actual: T) -> Result<(), StepFailure> {
    if expected == actual {
        Ok(())
    } else {
        Err(StepFailure::assertion(message, expected, actual))
    }
}

/// Body length exactly as received
pub fn assert_body_len(response: &ApiResponse, expected: usize) -> Result<(), StepFailure> {
    assert_equals("body length", expected, response.body_len())
}

pub fn assert_status(response: &ApiResponse, expected: u16) -> Result<(), StepFailure> {
    assert_equals("status code", expected, response.status)
}

/// Body must not decode to a JSON object or array
pub fn assert_not_structured(response: &ApiResponse) -> Result<(), StepFailure> {
    if response.is_structured() {
        let actual = response.json().map(describe).unwrap_or_default();
        return Err(StepFailure::assertion("body", "no structured body", actual));
    }
    Ok(())
}

pub fn assert_object(message: &str, value: &Value) -> Result<(), StepFailure> {
    if value.is_object() {
        Ok(())
    } else {
        Err(StepFailure::assertion(message, "object", describe(value)))
    }
}
