use anyhow::{Context, Result};
use clap::Parser;

use finreport_rs::cli::Args;
use finreport_rs::logging;
use finreport_rs::outlet::{DiskOutlet, Outlet};
use finreport_rs::pipeline::{FinancialReportPipeline, PipelineRun};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let company = args.company_name()?.to_string();

    let mut config = args.load_base_config()?;
    logging::init(args.verbose_logging(&config));
    args.apply_overrides(&mut config);

    // 启动时校验配置，缺少API地址或密钥时直接退出
    let pipeline =
        FinancialReportPipeline::from_config(&config).context("配置校验失败，请检查API地址与密钥")?;
    let options = config.report_options();

    println!("🔍 正在获取 {} 的财务数据并生成分析报告...", company);
    let run = pipeline
        .run(&company, &options)
        .await
        .context("财务分析过程中出错")?;

    print_run(&run, args.show_evidence)?;

    if !args.no_save {
        let outlet = DiskOutlet::new(&config.output_path);
        let evidence = config.save_evidence.then_some(&run.evidence);
        let saved = outlet.save(&run.report, evidence)?;

        println!("💾 已保存报告: {}", saved.report_path.display());
        if let Some(evidence_path) = saved.evidence_path {
            println!("💾 已保存财务证据: {}", evidence_path.display());
        }
    }

    if config.verbose {
        println!("\n{}", run.timings.generate_timing_report());
    }

    Ok(())
}

fn print_run(run: &PipelineRun, show_evidence: bool) -> Result<()> {
    println!(
        "📄 检索到 {} 个来源，其中 {} 条包含财务信息",
        run.evidence.sources.len(),
        run.evidence.financial_info.len()
    );
    if run.evidence.is_empty() {
        println!("⚠️ 未检索到包含财务关键词的结果，报告可能缺少数据支撑");
    }
    if show_evidence {
        println!("\n📊 获取的财务数据摘要");
        println!("{}", serde_json::to_string_pretty(&run.evidence)?);
    }

    println!("\n✅ 财务分析完成！");
    println!("\n# {} 财务分析报告\n", run.report.company);
    println!("{}", run.report.body);
    Ok(())
}
