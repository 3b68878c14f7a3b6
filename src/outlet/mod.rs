use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::types::{AnalysisReport, FinancialEvidence};

/// 报告输出通道
pub trait Outlet {
    fn save(&self, report: &AnalysisReport, evidence: Option<&FinancialEvidence>)
    -> Result<SavedFiles>;
}

/// 本次保存写出的文件
#[derive(Debug, Clone, PartialEq)]
pub struct SavedFiles {
    pub report_path: PathBuf,
    pub evidence_path: Option<PathBuf>,
}

#[derive(Serialize)]
struct EvidenceSnapshot<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    evidence: &'a FinancialEvidence,
}

/// 磁盘输出：报告写为txt，证据可选写为同名json
pub struct DiskOutlet {
    output_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn evidence_file_name(report: &AnalysisReport) -> String {
        format!("{}_financial_evidence.json", report.file_stem())
    }
}

impl Outlet for DiskOutlet {
    fn save(
        &self,
        report: &AnalysisReport,
        evidence: Option<&FinancialEvidence>,
    ) -> Result<SavedFiles> {
        fs::create_dir_all(&self.output_dir).context(format!(
            "Failed to create output directory: {:?}",
            self.output_dir
        ))?;

        let report_path = self.output_dir.join(report.file_name());
        fs::write(&report_path, &report.body)
            .context(format!("Failed to write report: {:?}", report_path))?;

        let evidence_path = match evidence {
            Some(evidence) => {
                let path = self.output_dir.join(Self::evidence_file_name(report));
                let snapshot = EvidenceSnapshot {
                    generated_at: Utc::now(),
                    evidence,
                };
                let json = serde_json::to_string_pretty(&snapshot)
                    .context("Failed to serialize evidence")?;
                fs::write(&path, json)
                    .context(format!("Failed to write evidence: {:?}", path))?;
                Some(path)
            }
            None => None,
        };

        Ok(SavedFiles {
            report_path,
            evidence_path,
        })
    }
}
