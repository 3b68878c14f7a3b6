//! 报告合成 - 将财务证据交给LLM生成结构化分析报告

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::LLMConfig;
use crate::error::SynthesisError;
use crate::http::{HttpTransport, JsonRequest};
use crate::types::FinancialEvidence;

pub mod prompt;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// chat completions请求体
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// 报告合成器，模型输出原样返回，不做结构校验
#[derive(Clone)]
pub struct ReportSynthesizer {
    config: LLMConfig,
    transport: Arc<dyn HttpTransport>,
}

impl ReportSynthesizer {
    pub fn new(config: &LLMConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config: config.clone(),
            transport,
        }
    }

    pub fn build_request(
        &self,
        company: &str,
        evidence: &FinancialEvidence,
    ) -> Result<ChatRequest, SynthesisError> {
        Ok(ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(prompt::SYSTEM_PROMPT),
                ChatMessage::user(prompt::build_user_prompt(company, evidence)?),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        })
    }

    #[tracing::instrument(
        name = "pipeline_stage synthesize",
        skip(self, evidence),
        fields(
            pipeline.stage = "synthesize",
            llm.model = %self.config.model,
            evidence.items = evidence.financial_info.len(),
            report.chars,
        )
    )]
    pub async fn synthesize(
        &self,
        company: &str,
        evidence: &FinancialEvidence,
    ) -> Result<String, SynthesisError> {
        let request = self.build_request(company, evidence)?;
        let body =
            serde_json::to_value(&request).map_err(|e| SynthesisError::Prompt(e.to_string()))?;

        let mut http_request = JsonRequest::new(self.config.resolved_api_url(), body);
        if !self.config.api_key.is_empty() {
            http_request = http_request.with_bearer(&self.config.api_key);
        }

        let reply = self.transport.post_json(http_request).await?;

        if !reply.is_success() {
            return Err(SynthesisError::Status {
                status: reply.status,
                body: reply.body,
            });
        }

        let content = extract_first_content(&reply.body)?;
        tracing::Span::current().record("report.chars", content.chars().count());

        Ok(content)
    }
}

/// 取出choices[0].message.content
fn extract_first_content(body: &str) -> Result<String, SynthesisError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| SynthesisError::Decode(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or(SynthesisError::MissingContent)
}
