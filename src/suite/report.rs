use chrono::{DateTime, Utc};
use colored::*;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::scenario::StepId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Passed,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: String,
    pub status: StepStatus,
    pub duration_ms: u128,
    pub detail: String,
}

impl StepReport {
    pub fn new(step: StepId, status: StepStatus, duration_ms: u128, detail: impl Into<String>) -> Self {
        Self {
            step: step.name().to_string(),
            status,
            duration_ms,
            detail: detail.into(),
        }
    }
}

/// Outcome of one suite run
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub endpoint: String,
    pub project: String,
    pub started_at: DateTime<Utc>,
    pub steps: Vec<StepReport>,
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Step")]
    step: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl SuiteReport {
    pub fn new(endpoint: &str, project: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            project: project.to_string(),
            started_at: Utc::now(),
            steps: Vec::new(),
        }
    }

    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }

    /// Nothing failed; skipped steps do not fail a run
    pub fn success(&self) -> bool {
        self.count(StepStatus::Failed) == 0
    }

    pub fn step(&self, step: StepId) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.step == step.name())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn render_table(&self) -> String {
        let rows: Vec<Row> = self
            .steps
            .iter()
            .map(|s| Row {
                step: s.step.clone(),
                status: match s.status {
                    StepStatus::Passed => "✅ passed".to_string(),
                    StepStatus::Failed => "❌ failed".to_string(),
                    StepStatus::Skipped => "⏭️ skipped".to_string(),
                },
                time: format!("{} ms", s.duration_ms),
                detail: s.detail.clone(),
            })
            .collect();
        Table::new(rows).with(Style::rounded()).to_string()
    }

    pub fn summary(&self) -> String {
        let line = format!(
            "{} passed, {} failed, {} skipped",
            self.count(StepStatus::Passed),
            self.count(StepStatus::Failed),
            self.count(StepStatus::Skipped)
        );
        if self.success() {
            format!("{} {}", "✅", line.green())
        } else {
            format!("{} {}", "❌", line.red())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SuiteReport {
        let mut report = SuiteReport::new("http://localhost/v1", "p1");
        report.steps.push(StepReport::new(StepId::CreateBucket, StepStatus::Passed, 12, "bucket actors"));
        report.steps.push(StepReport::new(StepId::CreateFile, StepStatus::Failed, 3, "boom"));
        report.steps.push(StepReport::new(StepId::GetFile, StepStatus::Skipped, 0, "missing file"));
        report
    }

    #[test]
    fn test_counts_and_success() {
        let report = report();
        assert_eq!(report.count(StepStatus::Passed), 1);
        assert_eq!(report.count(StepStatus::Failed), 1);
        assert!(!report.success());
        assert_eq!(report.step(StepId::GetFile).unwrap().status, StepStatus::Skipped);
    }

    #[test]
    fn test_json_and_table() {
        let report = report();
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["steps"][1]["status"], "failed");
        assert_eq!(json["steps"][0]["step"], "create-bucket");

        let table = report.render_table();
        assert!(table.contains("create-bucket"));
        assert!(table.contains("missing file"));
    }
}
