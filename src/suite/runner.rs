use sha2::{Digest, Sha256};
use std::time::Instant;
use tracing::{info, warn};

use super::assertions::{
    assert_body_len, assert_equals, assert_not_structured, assert_object, assert_status, StepFailure,
};
use super::report::{StepReport, StepStatus, SuiteReport};
use super::scenario::{Scenario, StepId, SuiteContext};
use crate::models::storage::{Bucket, StoredFile};
use crate::storage::{NewFile, StorageApi};

/// Runs the storage scenario step by step, threading results forward
pub struct SuiteRunner {
    api: StorageApi,
    scenario: Scenario,
    steps: Vec<StepId>,
    fail_fast: bool,
}

impl SuiteRunner {
    pub fn new(api: StorageApi, scenario: Scenario) -> Self {
        Self {
            api,
            scenario,
            steps: StepId::ALL.to_vec(),
            fail_fast: false,
        }
    }

    /// Restricts the run to `targets` and whatever they depend on
    pub fn only(mut self, targets: &[StepId]) -> Self {
        if !targets.is_empty() {
            self.steps = StepId::with_prerequisites(targets);
        }
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn steps(&self) -> &[StepId] {
        &self.steps
    }

    pub async fn run(&self, endpoint: &str) -> SuiteReport {
        self.run_with(endpoint, |_| {}).await
    }

    /// `on_step` is called before each step starts
    pub async fn run_with(&self, endpoint: &str, mut on_step: impl FnMut(StepId)) -> SuiteReport {
        let mut report = SuiteReport::new(endpoint, &self.api.scope().project_id);
        let mut ctx = SuiteContext::default();
        let mut halted = false;

        for &step in &self.steps {
            if halted {
                report.steps.push(StepReport::new(step, StepStatus::Skipped, 0, "stopped after failure"));
                continue;
            }
            if let Some(missing) = ctx.missing(step) {
                info!("⏭️ {} skipped: no {}", step, missing.name());
                report.steps.push(StepReport::new(
                    step,
                    StepStatus::Skipped,
                    0,
                    format!("requires {} from {}", missing.name(), missing.producer()),
                ));
                continue;
            }

            on_step(step);
            let started = Instant::now();
            let outcome = self.execute(step, &mut ctx).await;
            let elapsed = started.elapsed().as_millis();

            match outcome {
                Ok(detail) => {
                    info!("✅ {} passed in {} ms", step, elapsed);
                    report.steps.push(StepReport::new(step, StepStatus::Passed, elapsed, detail));
                }
                Err(failure) => {
                    warn!("❌ {} failed: {}", step, failure);
                    report.steps.push(StepReport::new(step, StepStatus::Failed, elapsed, failure.to_string()));
                    halted = self.fail_fast;
                }
            }
        }

        report
    }

    async fn execute(&self, step: StepId, ctx: &mut SuiteContext) -> Result<String, StepFailure> {
        match step {
            StepId::CreateBucket => {
                let bucket = self.api.create_bucket(&self.scenario.bucket).await?;
                assert_equals("bucket name", self.scenario.bucket.name.as_str(), bucket.name.as_str())?;
                let detail = format!("bucket {}", bucket.id);
                ctx.bucket = Some(bucket);
                Ok(detail)
            }
            StepId::CreateFile => {
                let bucket = bucket(ctx)?;
                let file = self
                    .api
                    .create_file(&NewFile {
                        bucket_id: &bucket.id,
                        file_id: self.scenario.file_id.clone(),
                        path: &self.scenario.upload_path,
                        mime_type: self.scenario.upload_mime.as_deref(),
                        file_security: self.scenario.file_security,
                        permissions: self.scenario.file_permissions.clone(),
                    })
                    .await?;
                let detail = format!("file {} in {}", file.id, file.bucket_id);
                ctx.file = Some(file);
                Ok(detail)
            }
            StepId::ListFiles => {
                let list = self.api.list_files(&bucket(ctx)?.id).await?;
                Ok(format!("{} file(s), total {}", list.files().len(), list.total()))
            }
            StepId::GetFile => {
                let bucket_id = bucket(ctx)?.id.clone();
                let file = self.api.get_file(&bucket_id, &file(ctx)?.id).await?;
                Ok(format!("file {}", file.id))
            }
            StepId::GetFilePreview => {
                let file = file(ctx)?;
                let response = self
                    .api
                    .get_file_preview(
                        &file.bucket_id,
                        &file.id,
                        self.scenario.preview_width,
                        self.scenario.preview_height,
                    )
                    .await?;
                assert_body_len(&response, self.scenario.preview_size)?;
                Ok(format!(
                    "{}x{} preview, {} bytes",
                    self.scenario.preview_width,
                    self.scenario.preview_height,
                    response.body_len()
                ))
            }
            StepId::GetFileDownload => {
                let file = file(ctx)?;
                let response = self.api.get_file_download(&file.bucket_id, &file.id).await?;
                assert_body_len(&response, self.scenario.download_size)?;
                let digest = sha256(response.bytes());
                let detail = format!("{} bytes, sha256 {}", response.body_len(), short(&digest));
                ctx.download_digest = Some(digest);
                Ok(detail)
            }
            StepId::GetFileView => {
                let file = file(ctx)?;
                let response = self.api.get_file_view(&file.bucket_id, &file.id).await?;
                assert_body_len(&response, self.scenario.download_size)?;
                let digest = sha256(response.bytes());
                if let Some(download) = &ctx.download_digest {
                    assert_equals("view digest matches download", short(download), short(&digest))?;
                }
                Ok(format!("{} bytes, sha256 {}", response.body_len(), short(&digest)))
            }
            StepId::UpdateFile => {
                let file = file(ctx)?;
                let updated = self
                    .api
                    .update_file(&file.bucket_id, &file.id, &self.scenario.update_permissions)
                    .await?;
                assert_object("updated file", &updated)?;
                Ok(format!("{} permission(s) set", self.scenario.update_permissions.len()))
            }
            StepId::DeleteFile => {
                let file = file(ctx)?;
                let response = self.api.delete_file(&file.bucket_id, &file.id).await?;
                assert_not_structured(&response)?;
                assert_status(&response, 204)?;
                Ok(format!("file {} deleted", file.id))
            }
        }
    }
}

fn bucket(ctx: &SuiteContext) -> Result<&Bucket, StepFailure> {
    ctx.bucket
        .as_ref()
        .ok_or_else(|| StepFailure::assertion("context", "bucket", "none"))
}

fn file(ctx: &SuiteContext) -> Result<&StoredFile, StepFailure> {
    ctx.file
        .as_ref()
        .ok_or_else(|| StepFailure::assertion("context", "file", "none"))
}

fn sha256(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn short(digest: &str) -> &str {
    &digest[..digest.len().min(12)]
}
