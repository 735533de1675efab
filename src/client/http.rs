use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::ClientError;
use crate::graphql::payload::{MultipartUpload, FILE_PART};
use crate::utils::network::RetryPolicy;

/// Request body kinds the storage endpoint accepts
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(Value),
    Multipart(MultipartUpload),
    Empty,
}

/// Decoded view of a response body
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Bytes,
    Empty,
}

/// Status, lower-cased headers and body of one call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: ResponseBody,
    raw: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, headers: HashMap<String, String>, raw: Vec<u8>) -> Self {
        let is_json = headers
            .get("content-type")
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false);

        let body = if raw.is_empty() {
            ResponseBody::Empty
        } else if is_json {
            match serde_json::from_slice::<Value>(&raw) {
                Ok(value) => ResponseBody::Json(value),
                Err(e) => {
                    warn!("Response declared JSON but did not parse: {}", e);
                    ResponseBody::Bytes
                }
            }
        } else {
            ResponseBody::Bytes
        };

        Self { status, headers, body, raw }
    }

    /// Length of the body exactly as it came off the wire
    pub fn body_len(&self) -> usize {
        self.raw.len()
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Body bytes as received, whatever the content type
    pub fn bytes(&self) -> &[u8] {
        &self.raw
    }

    /// True when the body decoded to a JSON object or array
    pub fn is_structured(&self) -> bool {
        matches!(&self.body, ResponseBody::Json(Value::Object(_)) | ResponseBody::Json(Value::Array(_)))
    }

    /// True when the body is a GraphQL envelope carrying `errors`
    pub fn is_error_envelope(&self) -> bool {
        matches!(&self.body, ResponseBody::Json(Value::Object(map)) if map.contains_key("errors"))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Thin HTTP transport over reqwest with transport-level retries
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    endpoint: String,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn new(endpoint: &str, timeout: Duration, retry: RetryPolicy) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            retry,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues one call; content type is derived from the body kind
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        headers: &[(String, String)],
        body: RequestBody,
    ) -> Result<ApiResponse, ClientError> {
        let url = format!("{}{}", self.endpoint, path);

        // Read the upload once; every attempt gets a fresh form
        let upload = match &body {
            RequestBody::Multipart(upload) => {
                let bytes = tokio::fs::read(&upload.file.path)
                    .await
                    .map_err(|source| ClientError::Resource {
                        path: upload.file.path.display().to_string(),
                        source,
                    })?;
                Some((upload, bytes))
            }
            _ => None,
        };

        debug!("{} {} ({} headers)", method, url, headers.len());

        let response = self
            .retry
            .retry(
                || {
                    let mut request = self.client.request(method.clone(), &url);
                    for (name, value) in headers {
                        if name.eq_ignore_ascii_case("content-type") {
                            continue;
                        }
                        request = request.header(name.as_str(), value.as_str());
                    }
                    let request = match (&body, &upload) {
                        (RequestBody::Json(value), _) => Ok(request.json(value)),
                        (RequestBody::Multipart(_), Some((upload, bytes))) => {
                            build_form(upload, bytes.clone()).map(|form| request.multipart(form))
                        }
                        _ => Ok(request),
                    };
                    let url = url.clone();
                    async move {
                        request?
                            .send()
                            .await
                            .map_err(|e| ClientError::from_reqwest(&url, e))
                    }
                },
                ClientError::is_retryable,
            )
            .await?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_ascii_lowercase(), v.to_string())))
            .collect();
        let raw = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(&url, e))?
            .to_vec();

        debug!("{} {} -> {} ({} bytes)", method, url, status, raw.len());
        Ok(ApiResponse::new(status, headers, raw))
    }
}

fn build_form(upload: &MultipartUpload, bytes: Vec<u8>) -> Result<Form, ClientError> {
    let part = Part::bytes(bytes)
        .file_name(upload.file.file_name.clone())
        .mime_str(&upload.file.mime_type)
        .map_err(|e| ClientError::InvalidRequest(format!("Invalid mime type {}: {}", upload.file.mime_type, e)))?;

    Ok(Form::new()
        .text("operations", upload.operations())
        .text("map", upload.map())
        .part(FILE_PART, part))
}
