use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::Config;
use crate::models::permission::{public_crud, public_rud, Id, Permission};
use crate::models::storage::{Bucket, StoredFile};
use crate::storage::NewBucket;

/// What a step needs from the steps before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Bucket,
    File,
}

impl Requirement {
    pub fn producer(&self) -> StepId {
        match self {
            Requirement::Bucket => StepId::CreateBucket,
            Requirement::File => StepId::CreateFile,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Requirement::Bucket => "bucket",
            Requirement::File => "file",
        }
    }
}

/// Suite steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepId {
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

impl StepId {
    pub const ALL: [StepId; 9] = [
        StepId::CreateBucket,
        StepId::CreateFile,
        StepId::ListFiles,
        StepId::GetFile,
        StepId::GetFilePreview,
        StepId::GetFileDownload,
        StepId::GetFileView,
        StepId::UpdateFile,
        StepId::DeleteFile,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StepId::CreateBucket => "create-bucket",
            StepId::CreateFile => "create-file",
            StepId::ListFiles => "list-files",
            StepId::GetFile => "get-file",
            StepId::GetFilePreview => "get-file-preview",
            StepId::GetFileDownload => "get-file-download",
            StepId::GetFileView => "get-file-view",
            StepId::UpdateFile => "update-file",
            StepId::DeleteFile => "delete-file",
        }
    }

    pub fn requires(&self) -> &'static [Requirement] {
        match self {
            StepId::CreateBucket => &[],
            StepId::CreateFile | StepId::ListFiles => &[Requirement::Bucket],
            StepId::GetFile => &[Requirement::Bucket, Requirement::File],
            StepId::GetFilePreview
            | StepId::GetFileDownload
            | StepId::GetFileView
            | StepId::UpdateFile
            | StepId::DeleteFile => &[Requirement::File],
        }
    }

    /// `targets` plus every step producing what they need
    pub fn with_prerequisites(targets: &[StepId]) -> Vec<StepId> {
        let mut selected: Vec<StepId> = Vec::new();
        let mut pending: Vec<StepId> = targets.to_vec();
        while let Some(step) = pending.pop() {
            if selected.contains(&step) {
                continue;
            }
            selected.push(step);
            pending.extend(step.requires().iter().map(Requirement::producer));
        }
        selected.sort();
        selected
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StepId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepId::ALL
            .iter()
            .copied()
            .find(|step| step.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = StepId::ALL.iter().map(StepId::name).collect();
                format!("unknown step '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// Values produced by earlier steps
#[derive(Debug, Default, Clone)]
pub struct SuiteContext {
    pub bucket: Option<Bucket>,
    pub file: Option<StoredFile>,
    pub download_digest: Option<String>,
}

impl SuiteContext {
    pub fn has(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::Bucket => self.bucket.is_some(),
            Requirement::File => self.file.is_some(),
        }
    }

    /// First requirement of `step` that is not available
    pub fn missing(&self, step: StepId) -> Option<Requirement> {
        step.requires().iter().copied().find(|r| !self.has(*r))
    }
}

/// Inputs and expectations of one suite run
#[derive(Debug, Clone)]
pub struct Scenario {
    pub bucket: NewBucket,
    pub upload_path: PathBuf,
    pub upload_mime: Option<String>,
    pub file_id: Id,
    pub file_security: bool,
    pub file_permissions: Vec<Permission>,
    pub update_permissions: Vec<Permission>,
    pub preview_width: u32,
    pub preview_height: u32,
    pub preview_size: usize,
    pub download_size: usize,
}

impl Scenario {
    pub fn from_config(config: &Config) -> Self {
        Self {
            bucket: NewBucket {
                bucket_id: Id::custom(&config.bucket.id),
                name: config.bucket.name.clone(),
                file_security: config.bucket.file_security,
                permissions: public_crud(),
            },
            upload_path: config.upload_path(),
            upload_mime: config.upload.mime_type.clone(),
            file_id: Id::from_config(config.upload.file_id.as_deref()),
            file_security: config.upload.file_security,
            file_permissions: public_rud(),
            update_permissions: public_rud(),
            preview_width: config.preview.width,
            preview_height: config.preview.height,
            preview_size: config.expect.preview_size,
            download_size: config.expect.download_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_names_round_trip() {
        for step in StepId::ALL {
            assert_eq!(step.name().parse::<StepId>().unwrap(), step);
        }
        assert!("upload".parse::<StepId>().unwrap_err().contains("create-file"));
    }

    #[test]
    fn test_prerequisites_are_pulled_in() {
        assert_eq!(
            StepId::with_prerequisites(&[StepId::GetFilePreview]),
            vec![StepId::CreateBucket, StepId::CreateFile, StepId::GetFilePreview]
        );
        assert_eq!(StepId::with_prerequisites(&[StepId::CreateBucket]), vec![StepId::CreateBucket]);
        assert_eq!(
            StepId::with_prerequisites(&[StepId::DeleteFile, StepId::ListFiles]),
            vec![StepId::CreateBucket, StepId::CreateFile, StepId::ListFiles, StepId::DeleteFile]
        );
    }

    #[test]
    fn test_context_missing() {
        let ctx = SuiteContext::default();
        assert_eq!(ctx.missing(StepId::CreateBucket), None);
        assert_eq!(ctx.missing(StepId::GetFile), Some(Requirement::Bucket));
        assert_eq!(ctx.missing(StepId::DeleteFile), Some(Requirement::File));
    }
}
