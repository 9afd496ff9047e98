pub mod extractor;
pub mod log_file;
pub mod scan;

pub use extractor::{
    ExtractorStats, FormattedDelta, IntervalExtractor, IntervalRecord, Intervals, BURST_THRESHOLD,
};
pub use log_file::{default_log_dir, find_latest_log, open_log, LossyLines, DEFAULT_LOG_FILE};
pub use scan::{scan, ScanError, ScanSummary};
