use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_MAX_RESULTS: u8 = 5;
pub const MAX_RESULTS_LIMIT: u8 = 10;

/// 默认的可信域名白名单
pub fn default_include_domains() -> Vec<String> {
    vec![
        "sec.gov".to_string(),
        "investor.*".to_string(),
        "finance.*".to_string(),
    ]
}

/// 单次报告生成的调用方选项
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReportOptions {
    /// 最大搜索结果数（1-10）
    pub max_results: u8,

    /// 限定搜索域名，支持glob通配
    pub include_domains: Vec<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            include_domains: default_include_domains(),
        }
    }
}

impl ReportOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_max_results(self.max_results)?;
        validate_domains(&self.include_domains)
    }
}

pub(crate) fn validate_max_results(max_results: u8) -> Result<(), ConfigError> {
    if (1..=MAX_RESULTS_LIMIT).contains(&max_results) {
        Ok(())
    } else {
        Err(ConfigError::MaxResultsOutOfRange(max_results))
    }
}

pub(crate) fn validate_domains(domains: &[String]) -> Result<(), ConfigError> {
    if domains.is_empty() {
        return Err(ConfigError::NoDomains);
    }
    for domain in domains {
        if domain.trim().is_empty() || domain.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidDomainPattern {
                pattern: domain.clone(),
                reason: "domain patterns must be non-empty and contain no whitespace".to_string(),
            });
        }
        glob::Pattern::new(domain).map_err(|e| ConfigError::InvalidDomainPattern {
            pattern: domain.clone(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}
