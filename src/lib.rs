pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod outlet;
pub mod pipeline;
pub mod retriever;
pub mod synthesizer;
pub mod testing;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, ReportError, RetrievalError, SynthesisError};
pub use pipeline::{FinancialReportPipeline, generate_financial_report};
pub use types::{AnalysisReport, FinancialEvidence, ReportOptions};
