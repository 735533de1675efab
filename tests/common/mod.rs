#![allow(dead_code)]

//! In-process stand-in for the storage `/graphql` endpoint.
//!
//! It records every request and answers with the shapes the real server
//! returns: JSON envelopes for metadata, raw bytes for previews/downloads,
//! and an empty 204 for deletes.

use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use storage_e2e::client::HttpClient;
use storage_e2e::config::Config;
use storage_e2e::models::project::{ProjectScope, Side};
use storage_e2e::storage::StorageApi;
use storage_e2e::utils::network::RetryPolicy;

pub const PROJECT: &str = "test-project";
pub const API_KEY: &str = "test-key";
pub const SESSION: &str = "test-session";
pub const PREVIEW_SIZE: usize = 46719;
pub const DOWNLOAD_SIZE: usize = 47218;

/// Multipart file part as received
#[derive(Debug, Clone)]
pub struct ReceivedFile {
    pub part: String,
    pub file_name: String,
    pub content_type: String,
    pub len: usize,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub field: String,
    pub headers: HashMap<String, String>,
    pub variables: Value,
    pub map: Option<Value>,
    pub file: Option<ReceivedFile>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct StubState {
    pub requests: Vec<RecordedRequest>,
    buckets: HashMap<String, Value>,
    files: BTreeMap<String, (Value, Vec<u8>)>,
    next_id: u32,
    /// Fields answered with a GraphQL error
    pub failing: HashSet<String>,
    /// Overrides the bucket name echoed back
    pub bucket_name_override: Option<String>,
    /// Extra bytes appended to view payloads
    pub view_suffix: Vec<u8>,
    /// Inverts the last byte of view payloads, keeping their length
    pub view_flip: bool,
}

type Shared = Arc<Mutex<StubState>>;

pub struct StubServer {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl StubServer {
    pub async fn spawn() -> Self {
        let state: Shared = Arc::new(Mutex::new(StubState::default()));
        let app = Router::new()
            .route("/v1/graphql", post(graphql))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn fail(&self, field: &str) {
        self.state.lock().unwrap().failing.insert(field.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request(&self, field: &str) -> Option<RecordedRequest> {
        self.requests().into_iter().find(|r| r.field == field)
    }

    pub fn file_count(&self) -> usize {
        self.state.lock().unwrap().files.len()
    }

    pub fn api(&self, side: Side) -> StorageApi {
        let http = HttpClient::new(
            &self.endpoint(),
            std::time::Duration::from_secs(5),
            RetryPolicy { attempts: 1, base_delay_ms: 1 },
        )
        .unwrap();
        StorageApi::new(http, ProjectScope::new(PROJECT, API_KEY, side))
    }

    /// Config text pointing at this server; the upload resource lives next to it
    pub fn config_toml(&self, side: &str) -> String {
        format!(
            r#"[server]
endpoint = "{}"
timeout_secs = 5

[project]
id = "{}"
api_key = "{}"

[side]
mode = "{}"
session = "{}"

[retry]
attempts = 1
base_delay_ms = 1
"#,
            self.endpoint(),
            PROJECT,
            API_KEY,
            side,
            SESSION
        )
    }

    /// Writes `config.toml` and `resources/logo.png` into `dir`
    pub fn write_workspace(&self, dir: &Path, side: &str) -> PathBuf {
        write_logo(dir);
        let path = dir.join("config.toml");
        std::fs::write(&path, self.config_toml(side)).unwrap();
        path
    }

    pub fn config(&self, dir: &Path, side: &str) -> Config {
        let path = self.write_workspace(dir, side);
        Config::load_from_file(path.to_str().unwrap()).unwrap()
    }
}

/// PNG-signed payload of the download size under `dir/resources/logo.png`
pub fn write_logo(dir: &Path) -> PathBuf {
    let resources = dir.join("resources");
    std::fs::create_dir_all(&resources).unwrap();
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend((0..DOWNLOAD_SIZE - 8).map(|i| (i % 251) as u8));
    let path = resources.join("logo.png");
    std::fs::write(&path, bytes).unwrap();
    path
}

const FIELDS: [&str; 9] = [
    "storageGetFilePreview",
    "storageGetFileDownload",
    "storageGetFileView",
    "storageCreateBucket",
    "storageCreateFile",
    "storageListFiles",
    "storageGetFile",
    "storageUpdateFile",
    "storageDeleteFile",
];

fn field_of(query: &str) -> String {
    FIELDS
        .iter()
        .find(|f| query.contains(&format!("{}(", f)))
        .map(|f| f.to_string())
        .unwrap_or_default()
}

fn errors(message: &str) -> Response {
    Json(json!({ "errors": [{ "message": message }] })).into_response()
}

fn data(field: &str, value: Value) -> Response {
    Json(json!({ "data": { field: value } })).into_response()
}

fn binary(content_type: &str, bytes: Vec<u8>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(bytes))
        .unwrap()
}

async fn graphql(State(state): State<Shared>, req: Request) -> Response {
    let headers: HashMap<String, String> = collect_headers(req.headers());
    let is_multipart = headers
        .get("content-type")
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let (operations, map, file) = if is_multipart {
        match read_multipart(req).await {
            Ok(parts) => parts,
            Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
        }
    } else {
        let body = match Bytes::from_request(req, &()).await {
            Ok(body) => body,
            Err(_) => return (StatusCode::BAD_REQUEST, "unreadable body").into_response(),
        };
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => (value, None, None),
            Err(_) => return (StatusCode::BAD_REQUEST, "invalid json").into_response(),
        }
    };

    let query = operations["query"].as_str().unwrap_or_default().to_string();
    let variables = operations["variables"].clone();
    let field = field_of(&query);

    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        field: field.clone(),
        headers: headers.clone(),
        variables: variables.clone(),
        map,
        file: file.as_ref().map(|(f, _)| f.clone()),
    });

    if headers.get("x-appwrite-project").map(String::as_str) != Some(PROJECT) {
        return errors("Project not found");
    }
    if state.failing.contains(&field) {
        return errors(&format!("{} is failing", field));
    }

    let var = |name: &str| variables[name].as_str().unwrap_or_default().to_string();

    match field.as_str() {
        "storageCreateBucket" => {
            if headers.get("x-appwrite-key").map(String::as_str) != Some(API_KEY) {
                return errors("Unauthorized");
            }
            let name = state.bucket_name_override.clone().unwrap_or_else(|| var("name"));
            let bucket = json!({
                "_id": var("bucketId"),
                "_permissions": variables["permissions"],
                "name": name,
                "fileSecurity": variables["fileSecurity"],
                "enabled": true,
                "maximumFileSize": 30000000
            });
            state.buckets.insert(var("bucketId"), bucket.clone());
            data(&field, bucket)
        }
        "storageCreateFile" => {
            let bucket_id = var("bucketId");
            if !state.buckets.contains_key(&bucket_id) {
                return errors("Bucket not found");
            }
            let Some((received, bytes)) = file else {
                return errors("File not provided");
            };
            let mut file_id = var("fileId");
            if file_id == "unique()" {
                state.next_id += 1;
                file_id = format!("file{:04}", state.next_id);
            }
            let record = json!({
                "_id": file_id,
                "bucketId": bucket_id,
                "_permissions": variables["permissions"],
                "name": received.file_name,
                "signature": "stub",
                "mimeType": received.content_type,
                "sizeOriginal": bytes.len(),
                "chunksTotal": 1,
                "chunksUploaded": 1
            });
            state.files.insert(file_id, (record.clone(), bytes));
            data(&field, record)
        }
        "storageListFiles" => {
            let bucket_id = var("bucketId");
            let files: Vec<Value> = state
                .files
                .values()
                .filter(|(record, _)| record["bucketId"] == bucket_id.as_str())
                .map(|(record, _)| record.clone())
                .collect();
            data(&field, json!({ "total": files.len(), "files": files }))
        }
        "storageGetFile" => match state.files.get(&var("fileId")) {
            Some((record, _)) => data(&field, record.clone()),
            None => errors("File not found"),
        },
        "storageGetFilePreview" => {
            if !state.files.contains_key(&var("fileId")) {
                return errors("File not found");
            }
            binary("image/png", vec![7u8; PREVIEW_SIZE])
        }
        "storageGetFileDownload" | "storageGetFileView" => {
            let is_view = field == "storageGetFileView";
            let suffix = if is_view { state.view_suffix.clone() } else { Vec::new() };
            let flip = is_view && state.view_flip;
            match state.files.get(&var("fileId")) {
                Some((record, bytes)) => {
                    let mut payload = bytes.clone();
                    payload.extend(suffix);
                    if let (true, Some(last)) = (flip, payload.last_mut()) {
                        *last = !*last;
                    }
                    binary(record["mimeType"].as_str().unwrap_or("application/octet-stream"), payload)
                }
                None => errors("File not found"),
            }
        }
        "storageUpdateFile" => match state.files.get_mut(&var("fileId")) {
            Some((record, _)) => {
                record["_permissions"] = variables["permissions"].clone();
                data(&field, record.clone())
            }
            None => errors("File not found"),
        },
        "storageDeleteFile" => match state.files.remove(&var("fileId")) {
            Some(_) => StatusCode::NO_CONTENT.into_response(),
            None => errors("File not found"),
        },
        _ => errors("Unknown operation"),
    }
}

fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
        .collect()
}

type MultipartParts = (Value, Option<Value>, Option<(ReceivedFile, Vec<u8>)>);

async fn read_multipart(req: Request) -> Result<MultipartParts, String> {
    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|e| e.to_string())?;

    let mut operations = None;
    let mut map = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "operations" | "map" => {
                let text = field.text().await.map_err(|e| e.to_string())?;
                let value: Value = serde_json::from_str(&text).map_err(|e| e.to_string())?;
                if name == "operations" {
                    operations = Some(value);
                } else {
                    map = Some(value);
                }
            }
            _ => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| e.to_string())?.to_vec();
                file = Some((
                    ReceivedFile { part: name, file_name, content_type, len: bytes.len() },
                    bytes,
                ));
            }
        }
    }

    let operations = operations.ok_or_else(|| "missing operations part".to_string())?;
    Ok((operations, map, file))
}
