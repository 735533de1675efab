use reqwest::Method;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use crate::client::{ApiResponse, ClientError, HttpClient, RequestBody};
use crate::graphql::{Envelope, GraphQLPayload, MultipartUpload, Operation, UploadFile, GRAPHQL_PATH};
use crate::models::permission::{Id, Permission};
use crate::models::project::ProjectScope;
use crate::models::storage::{Bucket, FileList, StoredFile};

/// Parameters for `storageCreateBucket`
#[derive(Debug, Clone)]
pub struct NewBucket {
    pub bucket_id: Id,
    pub name: String,
    pub file_security: bool,
    pub permissions: Vec<Permission>,
}

/// Parameters for `storageCreateFile`
#[derive(Debug, Clone)]
pub struct NewFile<'a> {
    pub bucket_id: &'a str,
    pub file_id: Id,
    pub path: &'a Path,
    pub mime_type: Option<&'a str>,
    pub file_security: bool,
    pub permissions: Vec<Permission>,
}

/// Typed access to the storage operations exposed over GraphQL
#[derive(Debug, Clone)]
pub struct StorageApi {
    http: HttpClient,
    scope: ProjectScope,
}

impl StorageApi {
    pub fn new(http: HttpClient, scope: ProjectScope) -> Self {
        Self { http, scope }
    }

    pub fn scope(&self) -> &ProjectScope {
        &self.scope
    }

    /// Creates a bucket; always authenticated with the project API key
    pub async fn create_bucket(&self, bucket: &NewBucket) -> Result<Bucket, ClientError> {
        info!("Creating bucket {} ({})", bucket.bucket_id, bucket.name);
        let payload = GraphQLPayload::new(Operation::CreateBucket)
            .var("bucketId", &bucket.bucket_id)?
            .var("name", &bucket.name)?
            .var("fileSecurity", bucket.file_security)?
            .var("permissions", &bucket.permissions)?;

        let response = self.post_json(payload, &self.scope.key_headers()).await?;
        Envelope::check(&json_body(&response)?)?.decode(Operation::CreateBucket.field())
    }

    /// Uploads a file with the multipart `operations`/`map` convention
    pub async fn create_file(&self, file: &NewFile<'_>) -> Result<StoredFile, ClientError> {
        info!("Uploading {} into bucket {}", file.path.display(), file.bucket_id);
        let payload = GraphQLPayload::new(Operation::CreateFile)
            .var("bucketId", file.bucket_id)?
            .var("fileId", &file.file_id)?
            .var("fileSecurity", file.file_security)?
            .var("permissions", &file.permissions)?;
        let upload = MultipartUpload::new(payload, "file", UploadFile::from_path(file.path, file.mime_type));

        let response = self
            .http
            .call(Method::POST, GRAPHQL_PATH, &self.scope.side_headers(), RequestBody::Multipart(upload))
            .await?;
        Envelope::check(&json_body(&response)?)?.decode(Operation::CreateFile.field())
    }

    pub async fn list_files(&self, bucket_id: &str) -> Result<FileList, ClientError> {
        let payload = GraphQLPayload::new(Operation::ListFiles).var("bucketId", bucket_id)?;
        let response = self.post_json(payload, &self.scope.side_headers()).await?;
        Envelope::check(&json_body(&response)?)?.decode(Operation::ListFiles.field())
    }

    pub async fn get_file(&self, bucket_id: &str, file_id: &str) -> Result<StoredFile, ClientError> {
        let payload = GraphQLPayload::new(Operation::GetFile)
            .var("bucketId", bucket_id)?
            .var("fileId", file_id)?;
        let response = self.post_json(payload, &self.scope.side_headers()).await?;
        Envelope::check(&json_body(&response)?)?.decode(Operation::GetFile.field())
    }

    /// Rendered preview; the raw response is returned so callers can check the payload
    pub async fn get_file_preview(
        &self,
        bucket_id: &str,
        file_id: &str,
        width: u32,
        height: u32,
    ) -> Result<ApiResponse, ClientError> {
        let payload = GraphQLPayload::new(Operation::GetFilePreview)
            .var("bucketId", bucket_id)?
            .var("fileId", file_id)?
            .var("width", width)?
            .var("height", height)?;
        binary_body(self.post_json(payload, &self.scope.side_headers()).await?)
    }

    pub async fn get_file_download(&self, bucket_id: &str, file_id: &str) -> Result<ApiResponse, ClientError> {
        self.binary(Operation::GetFileDownload, bucket_id, file_id).await
    }

    pub async fn get_file_view(&self, bucket_id: &str, file_id: &str) -> Result<ApiResponse, ClientError> {
        self.binary(Operation::GetFileView, bucket_id, file_id).await
    }

    pub async fn update_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        permissions: &[Permission],
    ) -> Result<Value, ClientError> {
        let payload = GraphQLPayload::new(Operation::UpdateFile)
            .var("bucketId", bucket_id)?
            .var("fileId", file_id)?
            .var("permissions", permissions)?;
        let response = self.post_json(payload, &self.scope.side_headers()).await?;
        Ok(Envelope::check(&json_body(&response)?)?
            .field(Operation::UpdateFile.field())?
            .clone())
    }

    /// Deletes a file; a successful delete answers 204 with no body
    pub async fn delete_file(&self, bucket_id: &str, file_id: &str) -> Result<ApiResponse, ClientError> {
        info!("Deleting file {} from bucket {}", file_id, bucket_id);
        let payload = GraphQLPayload::new(Operation::DeleteFile)
            .var("bucketId", bucket_id)?
            .var("fileId", file_id)?;
        self.post_json(payload, &self.scope.side_headers()).await
    }

    async fn binary(&self, operation: Operation, bucket_id: &str, file_id: &str) -> Result<ApiResponse, ClientError> {
        let payload = GraphQLPayload::new(operation)
            .var("bucketId", bucket_id)?
            .var("fileId", file_id)?;
        binary_body(self.post_json(payload, &self.scope.side_headers()).await?)
    }

    async fn post_json(
        &self,
        payload: GraphQLPayload,
        headers: &[(String, String)],
    ) -> Result<ApiResponse, ClientError> {
        let mut headers = headers.to_vec();
        headers.push(("content-type".to_string(), "application/json".to_string()));
        let response = self
            .http
            .call(Method::POST, GRAPHQL_PATH, &headers, RequestBody::Json(payload.to_value()))
            .await?;
        debug!("graphql response status {}", response.status);
        Ok(response)
    }
}

/// JSON body of a GraphQL call; anything else is a shape error carrying the status
fn json_body(response: &ApiResponse) -> Result<Value, ClientError> {
    match response.json() {
        Some(value) => Ok(value.clone()),
        None if response.status >= 400 => Err(ClientError::Status {
            status: response.status,
            body: String::from_utf8_lossy(response.bytes()).to_string(),
        }),
        None => Err(ClientError::UnexpectedShape {
            expected: "JSON body".to_string(),
            actual: format!("{} bytes of {}", response.body_len(), response.header("content-type").unwrap_or("unknown")),
        }),
    }
}

/// Binary payloads may be JSON themselves; only a GraphQL `errors` envelope is a failure
fn binary_body(response: ApiResponse) -> Result<ApiResponse, ClientError> {
    if response.is_error_envelope() {
        if let Some(body) = response.json() {
            Envelope::check(body)?;
        }
    }
    Ok(response)
}
