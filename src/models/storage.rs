use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Bucket record as returned by `storageCreateBucket`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "_permissions", default)]
    pub permissions: Vec<String>,
    #[serde(rename = "fileSecurity", default)]
    pub file_security: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// File record as returned by create/get/update calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "bucketId")]
    pub bucket_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "_permissions", default)]
    pub permissions: Vec<String>,
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
    #[serde(rename = "sizeOriginal", default)]
    pub size_original: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `storageListFiles` result; servers answer either `{total, files}` or a bare list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileList {
    Paged {
        #[serde(default)]
        total: u64,
        files: Vec<StoredFile>,
    },
    Plain(Vec<StoredFile>),
}

impl FileList {
    pub fn files(&self) -> &[StoredFile] {
        match self {
            FileList::Paged { files, .. } => files,
            FileList::Plain(files) => files,
        }
    }

    pub fn total(&self) -> u64 {
        match self {
            FileList::Paged { total, .. } => *total,
            FileList::Plain(files) => files.len() as u64,
        }
    }
}
