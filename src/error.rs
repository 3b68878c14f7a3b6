use thiserror::Error;

/// HTTP传输层错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// 证据检索阶段错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RetrievalError {
    #[error("Search API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Search API request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to decode search API response: {0}")]
    Decode(String),
}

/// 报告合成阶段错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthesisError {
    #[error("Completion API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion API request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to decode completion API response: {0}")]
    Decode(String),

    #[error("Completion API response has no choices[0].message.content")]
    MissingContent,

    #[error("Failed to serialize evidence into the prompt: {0}")]
    Prompt(String),
}

/// 启动期配置错误，出现时应立即终止
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting `{0}`")]
    MissingSetting(&'static str),

    #[error("max_results must be between 1 and 10, got {0}")]
    MaxResultsOutOfRange(u8),

    #[error("include_domains must not be empty")]
    NoDomains,

    #[error("Invalid domain pattern `{pattern}`: {reason}")]
    InvalidDomainPattern { pattern: String, reason: String },

    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// 财务报告流水线错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    #[error("Invalid configuration: {0}")]
    Config(ConfigError),

    #[error("Invalid report options: {0}")]
    InvalidOptions(#[from] ConfigError),

    #[error("Evidence retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Report synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),
}

impl ReportError {
    /// 上游API返回的HTTP状态码（如有）
    pub fn status(&self) -> Option<u16> {
        match self {
            ReportError::Retrieval(RetrievalError::Status { status, .. })
            | ReportError::Synthesis(SynthesisError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_status_message() {
        let error = RetrievalError::Status {
            status: 401,
            body: "invalid api key".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Search API returned status 401: invalid api key"
        );
    }

    #[test]
    fn test_synthesis_missing_content_message() {
        let error = SynthesisError::MissingContent;
        assert!(error.to_string().contains("choices[0].message.content"));
    }

    #[test]
    fn test_report_error_wraps_stage_errors() {
        let error: ReportError = RetrievalError::Decode("eof".to_string()).into();
        assert!(matches!(error, ReportError::Retrieval(_)));
        assert_eq!(
            error.to_string(),
            "Evidence retrieval failed: Failed to decode search API response: eof"
        );

        let error: ReportError = SynthesisError::MissingContent.into();
        assert!(matches!(error, ReportError::Synthesis(_)));
    }

    #[test]
    fn test_report_error_status() {
        let error = ReportError::Synthesis(SynthesisError::Status {
            status: 503,
            body: String::new(),
        });
        assert_eq!(error.status(), Some(503));

        let error = ReportError::Retrieval(RetrievalError::Transport(TransportError::Timeout(
            "30s".to_string(),
        )));
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_transport_error_converts_into_stage_errors() {
        let transport = TransportError::Network("connection refused".to_string());
        let retrieval: RetrievalError = transport.clone().into();
        let synthesis: SynthesisError = transport.into();
        assert!(matches!(retrieval, RetrievalError::Transport(_)));
        assert!(matches!(synthesis, SynthesisError::Transport(_)));
    }

    #[test]
    fn test_config_error_stays_distinct_from_options() {
        let config = ReportError::Config(ConfigError::MissingSetting("llm.api_key"));
        let options: ReportError = ConfigError::NoDomains.into();

        assert_eq!(
            config.to_string(),
            "Invalid configuration: Missing required setting `llm.api_key`"
        );
        assert!(matches!(options, ReportError::InvalidOptions(_)));
        assert_eq!(config.status(), None);
    }
}
