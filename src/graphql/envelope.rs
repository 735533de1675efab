use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::error::ClientError;

/// Checked GraphQL response: `data` is an object and there is no `errors` key
#[derive(Debug, Clone)]
pub struct Envelope {
    data: serde_json::Map<String, Value>,
}

impl Envelope {
    pub fn check(body: &Value) -> Result<Self, ClientError> {
        let object = body.as_object().ok_or_else(|| ClientError::UnexpectedShape {
            expected: "JSON object".to_string(),
            actual: describe(body),
        })?;

        if let Some(errors) = object.get("errors") {
            return Err(ClientError::GraphQL {
                messages: error_messages(errors),
            });
        }

        match object.get("data") {
            Some(Value::Object(data)) => Ok(Self { data: data.clone() }),
            Some(other) => Err(ClientError::UnexpectedShape {
                expected: "`data` object".to_string(),
                actual: describe(other),
            }),
            None => Err(ClientError::UnexpectedShape {
                expected: "`data` key".to_string(),
                actual: "missing".to_string(),
            }),
        }
    }

    /// Raw result of `field`
    pub fn field(&self, field: &str) -> Result<&Value, ClientError> {
        self.data.get(field).ok_or_else(|| ClientError::UnexpectedShape {
            expected: format!("`data.{}`", field),
            actual: "missing".to_string(),
        })
    }

    pub fn decode<T: DeserializeOwned>(&self, field: &str) -> Result<T, ClientError> {
        let value = self.field(field)?.clone();
        serde_json::from_value(value).map_err(|e| ClientError::Decode {
            field: field.to_string(),
            message: e.to_string(),
        })
    }
}

fn error_messages(errors: &Value) -> Vec<String> {
    match errors {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| item.to_string())
            })
            .collect(),
        other => vec![other.to_string()],
    }
}

/// Short type name used in shape mismatch messages
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_accepts_data_object() {
        let env = Envelope::check(&json!({"data": {"storageGetFile": {"_id": "f1"}}})).unwrap();
        assert_eq!(env.field("storageGetFile").unwrap()["_id"], "f1");
        assert!(env.field("storageListFiles").is_err());
    }

    #[test]
    fn test_check_rejects_errors_even_with_data() {
        let err = Envelope::check(&json!({
            "data": {},
            "errors": [{"message": "Bucket not found"}, {"code": 404}]
        }))
        .unwrap_err();
        match err {
            ClientError::GraphQL { messages } => {
                assert_eq!(messages[0], "Bucket not found");
                assert!(messages[1].contains("404"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_rejects_missing_or_scalar_data() {
        assert!(matches!(
            Envelope::check(&json!({})),
            Err(ClientError::UnexpectedShape { .. })
        ));
        assert!(matches!(
            Envelope::check(&json!({"data": null})),
            Err(ClientError::UnexpectedShape { .. })
        ));
        assert!(matches!(
            Envelope::check(&json!([1, 2])),
            Err(ClientError::UnexpectedShape { .. })
        ));
    }
}
