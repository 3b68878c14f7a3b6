use crate::types::{FinancialEvidence, FinancialInfo, SearchResult};

/// 证据片段的最大字符数
pub const MAX_EXCERPT_CHARS: usize = 1000;

const FINANCIAL_KEYWORDS: [&str; 2] = ["revenue", "earnings"];

/// 正文是否包含财务关键词（不区分大小写的子串匹配）
pub fn is_financially_relevant(content: &str) -> bool {
    let lowered = content.to_lowercase();
    FINANCIAL_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// 按字符截断，不会切断多字节字符
pub fn truncate_excerpt(content: &str) -> String {
    match content.char_indices().nth(MAX_EXCERPT_CHARS) {
        Some((byte_index, _)) => content[..byte_index].to_string(),
        None => content.to_string(),
    }
}

/// 把原始搜索结果整理为财务证据：sources保留全部链接，financial_info只保留命中关键词的条目
pub fn filter_financial_results(company: &str, results: &[SearchResult]) -> FinancialEvidence {
    let sources = results.iter().map(|result| result.url.clone()).collect();

    let financial_info = results
        .iter()
        .filter(|result| is_financially_relevant(&result.content))
        .map(|result| FinancialInfo {
            url: result.url.clone(),
            title: result.title.clone(),
            content_excerpt: truncate_excerpt(&result.content),
        })
        .collect();

    FinancialEvidence {
        company: company.to_string(),
        sources,
        financial_info,
    }
}
