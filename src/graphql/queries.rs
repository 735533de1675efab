/// Storage operations exercised over `/graphql`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateBucket,
    CreateFile,
    ListFiles,
    GetFile,
    GetFilePreview,
    GetFileDownload,
    GetFileView,
    UpdateFile,
    DeleteFile,
}

const FILE_FIELDS: &str = r#"
            _id
            bucketId
            _permissions
            name
            signature
            mimeType
            sizeOriginal
            chunksTotal
            chunksUploaded"#;

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::CreateBucket,
        Operation::CreateFile,
        Operation::ListFiles,
        Operation::GetFile,
        Operation::GetFilePreview,
        Operation::GetFileDownload,
        Operation::GetFileView,
        Operation::UpdateFile,
        Operation::DeleteFile,
    ];

    /// Name of the result field under `data`
    pub fn field(&self) -> &'static str {
        match self {
            Operation::CreateBucket => "storageCreateBucket",
            Operation::CreateFile => "storageCreateFile",
            Operation::ListFiles => "storageListFiles",
            Operation::GetFile => "storageGetFile",
            Operation::GetFilePreview => "storageGetFilePreview",
            Operation::GetFileDownload => "storageGetFileDownload",
            Operation::GetFileView => "storageGetFileView",
            Operation::UpdateFile => "storageUpdateFile",
            Operation::DeleteFile => "storageDeleteFile",
        }
    }

    /// Binary operations answer with the raw payload instead of a JSON envelope
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            Operation::GetFilePreview | Operation::GetFileDownload | Operation::GetFileView
        )
    }

    /// GraphQL document sent as `query`
    pub fn document(&self) -> String {
        match self {
            Operation::CreateBucket => r#"mutation createBucket($bucketId: String!, $name: String!, $fileSecurity: Boolean, $permissions: [String!]) {
        storageCreateBucket(bucketId: $bucketId, name: $name, fileSecurity: $fileSecurity, permissions: $permissions) {
            _id
            _permissions
            name
            fileSecurity
            enabled
            maximumFileSize
            allowedFileExtensions
            compression
            encryption
            antivirus
        }
    }"#
            .to_string(),
            Operation::CreateFile => format!(
                r#"mutation createFile($bucketId: String!, $fileId: String!, $file: InputFile!, $permissions: [String!]) {{
        storageCreateFile(bucketId: $bucketId, fileId: $fileId, file: $file, permissions: $permissions) {{{}
        }}
    }}"#,
                FILE_FIELDS
            ),
            Operation::ListFiles => format!(
                r#"query listFiles($bucketId: String!) {{
        storageListFiles(bucketId: $bucketId) {{
            total
            files {{{}
            }}
        }}
    }}"#,
                FILE_FIELDS
            ),
            Operation::GetFile => format!(
                r#"query getFile($bucketId: String!, $fileId: String!) {{
        storageGetFile(bucketId: $bucketId, fileId: $fileId) {{{}
        }}
    }}"#,
                FILE_FIELDS
            ),
            Operation::GetFilePreview => r#"query getFilePreview($bucketId: String!, $fileId: String!, $width: Int, $height: Int) {
        storageGetFilePreview(bucketId: $bucketId, fileId: $fileId, width: $width, height: $height) {
            status
        }
    }"#
            .to_string(),
            Operation::GetFileDownload => r#"query getFileDownload($bucketId: String!, $fileId: String!) {
        storageGetFileDownload(bucketId: $bucketId, fileId: $fileId) {
            status
        }
    }"#
            .to_string(),
            Operation::GetFileView => r#"query getFileView($bucketId: String!, $fileId: String!) {
        storageGetFileView(bucketId: $bucketId, fileId: $fileId) {
            status
        }
    }"#
            .to_string(),
            Operation::UpdateFile => format!(
                r#"mutation updateFile($bucketId: String!, $fileId: String!, $permissions: [String!]) {{
        storageUpdateFile(bucketId: $bucketId, fileId: $fileId, permissions: $permissions) {{{}
        }}
    }}"#,
                FILE_FIELDS
            ),
            Operation::DeleteFile => r#"mutation deleteFile($bucketId: String!, $fileId: String!) {
        storageDeleteFile(bucketId: $bucketId, fileId: $fileId) {
            status
        }
    }"#
            .to_string(),
        }
    }
}
