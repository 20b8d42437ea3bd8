//! Pipeline configuration.

use std::path::PathBuf;

/// Batch run configuration.
///
/// Collaborator settings (tools, storage, content API) live with their
/// clients; this covers where results go and how records are scheduled.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root under which `{category}/{subcategory}` folders are created
    pub output_root: PathBuf,
    /// Where the success/failure report is written
    pub report_path: PathBuf,
    /// Optional CSV sink for extracted records
    pub extracted_csv: Option<PathBuf>,
    /// Records in flight at once; 1 processes strictly in order
    pub max_parallel: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("."),
            report_path: PathBuf::from("upload_report.csv"),
            extracted_csv: None,
            max_parallel: 1,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            output_root: std::env::var("REELSYNC_OUTPUT_ROOT")
                .map(PathBuf::from)
                .or_else(|_| std::env::current_dir())
                .unwrap_or_else(|_| PathBuf::from(".")),
            report_path: std::env::var("REELSYNC_REPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("upload_report.csv")),
            extracted_csv: std::env::var("REELSYNC_EXTRACTED_CSV")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            max_parallel: std::env::var("REELSYNC_MAX_PARALLEL")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(1),
        }
    }
}
