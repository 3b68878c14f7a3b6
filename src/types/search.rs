use serde::{Deserialize, Serialize};

/// 搜索深度
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    #[default]
    Advanced,
}

impl std::fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchDepth::Basic => write!(f, "basic"),
            SearchDepth::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for SearchDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(SearchDepth::Basic),
            "advanced" => Ok(SearchDepth::Advanced),
            _ => Err(format!("Unknown search depth: {}", s)),
        }
    }
}

/// 单次检索请求，每次调用时新建，不做持久化
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub company_name: String,
    pub search_depth: SearchDepth,
    pub max_results: u8,
    pub include_domains: Vec<String>,
}

impl SearchQuery {
    /// 发往搜索API的查询语句
    pub fn query_text(&self) -> String {
        format!(
            "{} financial reports, earnings, revenue, profit, annual report",
            self.company_name
        )
    }

    /// 组装搜索API的请求体
    pub fn to_payload<'a>(&'a self, api_key: &'a str) -> SearchPayload<'a> {
        SearchPayload {
            api_key,
            query: self.query_text(),
            search_depth: self.search_depth,
            include_answer: true,
            include_raw_content: true,
            max_results: self.max_results,
            include_domains: &self.include_domains,
        }
    }
}

/// 搜索API请求体
#[derive(Debug, Serialize)]
pub struct SearchPayload<'a> {
    pub api_key: &'a str,
    pub query: String,
    pub search_depth: SearchDepth,
    pub include_answer: bool,
    pub include_raw_content: bool,
    pub max_results: u8,
    pub include_domains: &'a [String],
}

/// 搜索API返回的单条命中结果
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SearchResult {
    pub url: String,
    #[serde(default)]
    pub title: String,
    pub content: String,
}

/// 搜索API响应体，缺少results字段视为无结果
#[derive(Debug, Deserialize, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}
