//! 证据检索 - 在可信域名范围内搜索公司财务信息并筛选出财务证据

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::error::RetrievalError;
use crate::http::{HttpTransport, JsonRequest};
use crate::types::search::SearchResponse;
use crate::types::{FinancialEvidence, ReportOptions, SearchQuery};

pub mod filter;

pub use filter::{MAX_EXCERPT_CHARS, filter_financial_results};

/// 证据检索器，每次调用只发出一次搜索请求，失败不重试
#[derive(Clone)]
pub struct EvidenceRetriever {
    config: SearchConfig,
    transport: Arc<dyn HttpTransport>,
}

impl EvidenceRetriever {
    pub fn new(config: &SearchConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config: config.clone(),
            transport,
        }
    }

    /// 构建本次检索的查询
    pub fn build_query(&self, company_name: &str, options: &ReportOptions) -> SearchQuery {
        SearchQuery {
            company_name: company_name.to_string(),
            search_depth: self.config.search_depth,
            max_results: options.max_results,
            include_domains: options.include_domains.clone(),
        }
    }

    #[tracing::instrument(
        name = "pipeline_stage retrieve",
        skip(self, options),
        fields(
            pipeline.stage = "retrieve",
            search.max_results = options.max_results,
            search.results_found,
            search.evidence_kept,
        )
    )]
    pub async fn retrieve(
        &self,
        company_name: &str,
        options: &ReportOptions,
    ) -> Result<FinancialEvidence, RetrievalError> {
        let query = self.build_query(company_name, options);
        let body = serde_json::to_value(query.to_payload(&self.config.api_key))
            .map_err(|e| RetrievalError::Decode(e.to_string()))?;

        let reply = self
            .transport
            .post_json(JsonRequest::new(&self.config.api_url, body))
            .await?;

        if !reply.is_success() {
            return Err(RetrievalError::Status {
                status: reply.status,
                body: reply.body,
            });
        }

        let response: SearchResponse = serde_json::from_str(&reply.body)
            .map_err(|e| RetrievalError::Decode(e.to_string()))?;

        let evidence = filter_financial_results(company_name, &response.results);

        let span = tracing::Span::current();
        span.record("search.results_found", response.results.len());
        span.record("search.evidence_kept", evidence.financial_info.len());

        Ok(evidence)
    }
}
