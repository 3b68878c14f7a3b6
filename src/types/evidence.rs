use serde::{Deserialize, Serialize};

/// 经过关键词筛选后保留的财务信息片段
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FinancialInfo {
    pub url: String,
    pub title: String,
    /// 截取后的正文，最多1000个字符
    #[serde(rename = "content")]
    pub content_excerpt: String,
}

/// 财务证据，作为报告合成阶段的唯一输入
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct FinancialEvidence {
    pub company: String,
    /// 全部命中结果的来源链接，保持原始顺序
    pub sources: Vec<String>,
    pub financial_info: Vec<FinancialInfo>,
}

impl FinancialEvidence {
    pub fn is_empty(&self) -> bool {
        self.financial_info.is_empty()
    }
}
