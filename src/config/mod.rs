use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::options::{
    DEFAULT_MAX_RESULTS, ReportOptions, default_include_domains, validate_domains,
    validate_max_results,
};
use crate::types::SearchDepth;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "finreport.toml";

/// LLM Provider类型，均为OpenAI兼容的chat completions接口
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "deepseek")]
    #[default]
    DeepSeek,
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "moonshot")]
    Moonshot,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Moonshot => write!(f, "moonshot"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "openai" => Ok(LLMProvider::OpenAI),
            "moonshot" => Ok(LLMProvider::Moonshot),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

impl LLMProvider {
    /// 各Provider的chat completions默认地址
    pub fn default_api_url(&self) -> &'static str {
        match self {
            LLMProvider::DeepSeek => "https://api.deepseek.com/chat/completions",
            LLMProvider::OpenAI => "https://api.openai.com/v1/chat/completions",
            LLMProvider::Moonshot => "https://api.moonshot.cn/v1/chat/completions",
            LLMProvider::OpenRouter => "https://openrouter.ai/api/v1/chat/completions",
            LLMProvider::Ollama => "http://localhost:11434/v1/chat/completions",
        }
    }

    /// 是否需要API KEY
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, LLMProvider::Ollama)
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 搜索API配置
    pub search: SearchConfig,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// HTTP超时配置
    pub http: HttpConfig,

    /// 报告输出目录
    pub output_path: PathBuf,

    /// 是否将财务证据一并保存为JSON
    pub save_evidence: bool,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// 搜索API配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// 搜索API地址
    pub api_url: String,

    /// 搜索API KEY
    pub api_key: String,

    /// 搜索深度
    pub search_depth: SearchDepth,

    /// 最大搜索结果数（1-10）
    pub max_results: u8,

    /// 限定搜索域名
    pub include_domains: Vec<String>,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// chat completions完整地址，为空时使用Provider默认地址
    pub api_url: String,

    /// LLM API KEY
    pub api_key: String,

    /// 模型名称
    pub model: String,

    /// 温度
    pub temperature: f64,

    /// 最大输出tokens
    pub max_tokens: u32,
}

/// HTTP超时配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    /// 连接超时（秒）
    pub connect_timeout_seconds: u64,

    /// 单次请求总超时（秒）
    pub timeout_seconds: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 按优先级加载：显式路径 > 当前目录下的finreport.toml > 默认值
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let default_config_path = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_CONFIG_FILE);

        if default_config_path.exists() {
            Self::from_file(&default_config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// 从进程环境变量补充API地址与密钥（先加载.env）
    pub fn apply_process_env(&mut self) {
        dotenvy::dotenv().ok();
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// 用给定的查找函数补充API地址与密钥，非空的环境值覆盖配置文件
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| {
            keys.iter()
                .copied()
                .filter_map(|key| lookup(key))
                .find(|value| !value.trim().is_empty())
        };

        if let Some(url) = first(&["SEARCH_API_URL", "TAVILY_API_URL"]) {
            self.search.api_url = url;
        }
        if let Some(key) = first(&["SEARCH_API_KEY", "TAVILY_API_KEY"]) {
            self.search.api_key = key;
        }
        if let Some(url) = first(&["LLM_API_URL", "DEEPSEEK_API_URL"]) {
            self.llm.api_url = url;
        }
        if let Some(key) = first(&["LLM_API_KEY", "DEEPSEEK_API_KEY"]) {
            self.llm.api_key = key;
        }
        if let Some(model) = first(&["LLM_MODEL"]) {
            self.llm.model = model;
        }
    }

    /// 启动时校验，缺少必要配置时直接失败
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.api_url.trim().is_empty() {
            return Err(ConfigError::MissingSetting("search.api_url"));
        }
        if self.search.api_key.trim().is_empty() {
            return Err(ConfigError::MissingSetting("search.api_key"));
        }
        validate_max_results(self.search.max_results)?;
        validate_domains(&self.search.include_domains)?;

        if self.llm.resolved_api_url().trim().is_empty() {
            return Err(ConfigError::MissingSetting("llm.api_url"));
        }
        if self.llm.provider.requires_api_key() && self.llm.api_key.trim().is_empty() {
            return Err(ConfigError::MissingSetting("llm.api_key"));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::MissingSetting("llm.model"));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature",
                reason: format!("{} is outside 0.0..=2.0", self.llm.temperature),
            });
        }
        if self.llm.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.max_tokens",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.http.connect_timeout_seconds == 0 || self.http.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http",
                reason: "timeouts must be greater than 0 seconds".to_string(),
            });
        }
        Ok(())
    }

    /// 配置中的默认报告选项
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            max_results: self.search.max_results,
            include_domains: self.search.include_domains.clone(),
        }
    }
}

impl LLMConfig {
    /// 实际请求的地址
    pub fn resolved_api_url(&self) -> &str {
        if self.api_url.trim().is_empty() {
            self.provider.default_api_url()
        } else {
            &self.api_url
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            llm: LLMConfig::default(),
            http: HttpConfig::default(),
            output_path: PathBuf::from("./reports"),
            save_evidence: false,
            verbose: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            search_depth: SearchDepth::Advanced,
            max_results: DEFAULT_MAX_RESULTS,
            include_domains: default_include_domains(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_url: String::new(),
            api_key: String::new(),
            model: String::from("deepseek-chat"),
            temperature: 0.2,
            max_tokens: 2000,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: 30,
            timeout_seconds: 30,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
