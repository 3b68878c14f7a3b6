//! 财务报告流水线：Retrieving -> Synthesizing -> Done，任一阶段失败即进入Failed并终止

use std::sync::Arc;

use crate::config::Config;
use crate::error::{ConfigError, ReportError};
use crate::http::{HttpTransport, ReqwestTransport};
use crate::retriever::EvidenceRetriever;
use crate::synthesizer::ReportSynthesizer;
use crate::types::{AnalysisReport, FinancialEvidence, ReportOptions};

pub mod timing;

pub use timing::{StageTimings, TimingScope};

/// 流水线状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Retrieving,
    Synthesizing,
    Done,
    Failed,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineState::Retrieving => write!(f, "retrieving"),
            PipelineState::Synthesizing => write!(f, "synthesizing"),
            PipelineState::Done => write!(f, "done"),
            PipelineState::Failed => write!(f, "failed"),
        }
    }
}

/// 阶段计时键
pub struct TimingKeys;

impl TimingKeys {
    pub const RETRIEVE: &'static str = "retrieve";
    pub const SYNTHESIZE: &'static str = "synthesize";
}

/// 一次完整运行的产物
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub evidence: FinancialEvidence,
    pub report: AnalysisReport,
    pub timings: StageTimings,
}

/// 两阶段财务报告流水线，自身不持有可变状态，可在多个会话间共享
#[derive(Clone)]
pub struct FinancialReportPipeline {
    retriever: EvidenceRetriever,
    synthesizer: ReportSynthesizer,
}

impl FinancialReportPipeline {
    /// 用已校验的配置与指定传输层构建
    pub fn new(config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            retriever: EvidenceRetriever::new(&config.search, transport.clone()),
            synthesizer: ReportSynthesizer::new(&config.llm, transport),
        }
    }

    /// 校验配置并使用reqwest传输层构建
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let transport =
            ReqwestTransport::new(&config.http).map_err(|e| ConfigError::InvalidValue {
                field: "http",
                reason: e.to_string(),
            })?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    /// 生成财务分析报告
    pub async fn generate_financial_report(
        &self,
        company_name: &str,
        options: &ReportOptions,
    ) -> Result<AnalysisReport, ReportError> {
        self.run(company_name, options).await.map(|run| run.report)
    }

    /// 执行完整流水线，同时返回证据与计时
    #[tracing::instrument(
        name = "financial_report",
        skip(self, options),
        fields(pipeline.state = %PipelineState::Retrieving)
    )]
    pub async fn run(
        &self,
        company_name: &str,
        options: &ReportOptions,
    ) -> Result<PipelineRun, ReportError> {
        let result = self.run_stages(company_name, options).await;

        let final_state = if result.is_ok() {
            PipelineState::Done
        } else {
            PipelineState::Failed
        };
        tracing::Span::current().record("pipeline.state", tracing::field::display(final_state));

        result
    }

    async fn run_stages(
        &self,
        company_name: &str,
        options: &ReportOptions,
    ) -> Result<PipelineRun, ReportError> {
        options.validate()?;

        let mut timing = TimingScope::new();

        timing.start_phase(TimingKeys::RETRIEVE);
        let evidence = self.retriever.retrieve(company_name, options).await?;
        timing.end_phase(TimingKeys::RETRIEVE);

        tracing::Span::current().record(
            "pipeline.state",
            tracing::field::display(PipelineState::Synthesizing),
        );

        timing.start_phase(TimingKeys::SYNTHESIZE);
        let body = self.synthesizer.synthesize(company_name, &evidence).await?;
        timing.end_phase(TimingKeys::SYNTHESIZE);

        Ok(PipelineRun {
            report: AnalysisReport::new(company_name, body),
            evidence,
            timings: timing.finish(),
        })
    }
}

/// 从配置构建流水线并生成一份报告，配置不合法时返回 `ReportError::Config`
pub async fn generate_financial_report(
    config: &Config,
    company_name: &str,
    options: &ReportOptions,
) -> Result<AnalysisReport, ReportError> {
    let pipeline = FinancialReportPipeline::from_config(config).map_err(ReportError::Config)?;
    pipeline
        .generate_financial_report(company_name, options)
        .await
}
