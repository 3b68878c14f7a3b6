use crate::error::SynthesisError;
use crate::types::FinancialEvidence;

pub const SYSTEM_PROMPT: &str = "你是一位专注财务分析的AI助手";

/// 构建财务分析提示词，证据以缩进JSON嵌入
pub fn build_user_prompt(
    company: &str,
    evidence: &FinancialEvidence,
) -> Result<String, SynthesisError> {
    let evidence_json = serde_json::to_string_pretty(evidence)
        .map_err(|e| SynthesisError::Prompt(e.to_string()))?;

    Ok(format!(
        r#"你是一位资深财务分析师，请基于以下信息为{company}生成一份结构化财务分析报告：
{evidence_json}

报告需包含以下部分：
1. 以表格形式给出财务表现概览（收入、利润、增长趋势）
2. 关键财务指标分析
3. 风险因素与机遇
4. 分析总结（未来展望）

注意：
- 使用最新财务数据
- 使用专业财务术语
- 保持客观中立，不要胡乱编造
- 表述需要简洁清晰，但也要有足够的分析
- 给明数据来源：[提供的搜索结果]
"#
    ))
}
