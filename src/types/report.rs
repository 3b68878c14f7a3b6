use serde::{Deserialize, Serialize};

/// 财务分析报告
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AnalysisReport {
    pub company: String,
    /// 模型原样返回的markdown正文
    pub body: String,
}

impl AnalysisReport {
    pub fn new(company: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            body: body.into(),
        }
    }

    /// 报告文件名，公司名经 `file_stem` 处理
    pub fn file_name(&self) -> String {
        format!("{}_financial_report.txt", self.file_stem())
    }

    /// 文件名主干，始终是输出目录下的单个路径分量：
    /// 字母数字与 `.`、`-`、`_` 以外的字符替换为下划线，去掉开头的点
    pub(crate) fn file_stem(&self) -> String {
        let stem: String = self
            .company
            .trim()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let stem = stem.trim_start_matches('.');

        if stem.is_empty() {
            "report".to_string()
        } else {
            stem.to_string()
        }
    }
}
