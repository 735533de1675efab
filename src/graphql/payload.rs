use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

use super::queries::Operation;
use crate::client::error::ClientError;

/// Plain JSON request body
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLPayload {
    pub query: String,
    pub variables: Map<String, Value>,
}

impl GraphQLPayload {
    pub fn new(operation: Operation) -> Self {
        Self {
            query: operation.document(),
            variables: Map::new(),
        }
    }

    pub fn var<T: Serialize>(mut self, name: &str, value: T) -> Result<Self, ClientError> {
        let value = serde_json::to_value(value)
            .map_err(|e| ClientError::InvalidRequest(format!("Variable `{}` is not serializable: {}", name, e)))?;
        self.variables.insert(name.to_string(), value);
        Ok(self)
    }

    pub fn to_value(&self) -> Value {
        json!({ "query": self.query, "variables": self.variables })
    }
}

/// File attached to a multipart upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
}

impl UploadFile {
    /// Builds the attachment, guessing the mime type from the extension when none is given
    pub fn from_path(path: impl AsRef<Path>, mime_type: Option<&str>) -> Self {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.bin".to_string());
        let mime_type = match mime_type {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => mime_guess::from_path(&path)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };
        Self { path, file_name, mime_type }
    }
}

/// Multipart upload following the `operations` + `map` + numbered file part layout
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    pub payload: GraphQLPayload,
    pub variable: String,
    pub file: UploadFile,
}

/// Form field name of the single file part
pub const FILE_PART: &str = "0";

impl MultipartUpload {
    /// `payload` must not carry the file yet; `variable` is set to null in `operations`
    pub fn new(mut payload: GraphQLPayload, variable: &str, file: UploadFile) -> Self {
        payload.variables.insert(variable.to_string(), Value::Null);
        Self {
            payload,
            variable: variable.to_string(),
            file,
        }
    }

    pub fn operations(&self) -> String {
        self.payload.to_value().to_string()
    }

    pub fn map(&self) -> String {
        json!({ FILE_PART: [format!("variables.{}", self.variable)] }).to_string()
    }
}
