pub mod evidence;
pub mod options;
pub mod report;
pub mod search;

pub use evidence::{FinancialEvidence, FinancialInfo};
pub use options::ReportOptions;
pub use report::AnalysisReport;
pub use search::{SearchDepth, SearchQuery, SearchResult};
