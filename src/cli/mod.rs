use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, LLMProvider};
use crate::types::SearchDepth;

/// finreport - 基于搜索与大模型的企业财务分析报告生成工具
#[derive(Parser, Debug)]
#[command(name = "finreport")]
#[command(
    about = "Generates a structured financial analysis report for a company: retrieves financial evidence from trusted domains through a search API, then synthesizes the report with an LLM."
)]
#[command(version)]
pub struct Args {
    /// 企业名称（如：Apple Inc.）
    pub company: String,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 报告输出目录
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 最大搜索结果数（1-10）
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub max_results: Option<u8>,

    /// 限定搜索域名，可重复指定，指定后替换默认列表
    #[arg(long = "include-domain")]
    pub include_domains: Vec<String>,

    /// 搜索深度 (basic, advanced)
    #[arg(long)]
    pub search_depth: Option<String>,

    /// 搜索API地址
    #[arg(long)]
    pub search_api_url: Option<String>,

    /// 搜索API KEY
    #[arg(long)]
    pub search_api_key: Option<String>,

    /// LLM Provider (deepseek, openai, moonshot, openrouter, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM chat completions地址
    #[arg(long)]
    pub llm_api_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 模型名称
    #[arg(long)]
    pub model: Option<String>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 最大输出tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 单次请求超时（秒），同时作用于连接超时
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// 打印检索到的财务证据JSON
    #[arg(long)]
    pub show_evidence: bool,

    /// 不保存报告文件
    #[arg(long, conflicts_with = "save_evidence")]
    pub no_save: bool,

    /// 同时保存财务证据JSON
    #[arg(long)]
    pub save_evidence: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 去除首尾空白后的企业名称，为空时报错
    pub fn company_name(&self) -> Result<&str> {
        let name = self.company.trim();
        if name.is_empty() {
            bail!("请输入企业名称");
        }
        Ok(name)
    }

    /// 配置文件 -> 环境变量，命令行覆盖由 `apply_overrides` 在日志初始化后执行
    pub fn load_base_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        config.apply_process_env();
        Ok(config)
    }

    /// 命令行或配置文件任一开启即输出详细日志
    pub fn verbose_logging(&self, config: &Config) -> bool {
        self.verbose || config.verbose
    }

    /// 用命令行参数覆盖配置
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(output_path) = &self.output_path {
            config.output_path = output_path.clone();
        }

        // 搜索配置
        if let Some(max_results) = self.max_results {
            config.search.max_results = max_results;
        }
        if !self.include_domains.is_empty() {
            config.search.include_domains = self.include_domains.clone();
        }
        if let Some(depth_str) = &self.search_depth {
            match depth_str.parse::<SearchDepth>() {
                Ok(depth) => config.search.search_depth = depth,
                Err(_) => tracing::warn!(
                    "⚠️ 未知的搜索深度: {}，使用 {}",
                    depth_str,
                    config.search.search_depth
                ),
            }
        }
        if let Some(url) = &self.search_api_url {
            config.search.api_url = url.clone();
        }
        if let Some(key) = &self.search_api_key {
            config.search.api_key = key.clone();
        }

        // LLM配置
        if let Some(provider_str) = &self.llm_provider {
            match provider_str.parse::<LLMProvider>() {
                Ok(provider) => config.llm.provider = provider,
                Err(_) => tracing::warn!(
                    "⚠️ 未知的provider: {}，使用 {}",
                    provider_str,
                    config.llm.provider
                ),
            }
        }
        if let Some(url) = &self.llm_api_url {
            config.llm.api_url = url.clone();
        }
        if let Some(key) = &self.llm_api_key {
            config.llm.api_key = key.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }

        if let Some(timeout_seconds) = self.timeout_seconds {
            config.http.connect_timeout_seconds = timeout_seconds;
            config.http.timeout_seconds = timeout_seconds;
        }

        // 其他配置
        if self.save_evidence {
            config.save_evidence = true;
        }
        if self.verbose {
            config.verbose = true;
        }
    }
}
