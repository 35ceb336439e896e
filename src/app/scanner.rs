use std::error::Error;
use std::time::Duration;

use thiserror::Error;

use crate::domain::compliance::{image::Image, scan_status::ScanStatus};

use super::scan_timer::ScanTimer;

/// A scanning strategy backed by some external tool.
///
/// `scan` is total: failures to run the tool, unknown exit codes and
/// unreadable reports are reported to the scanner's observer and end up as
/// [`ScanStatus::Failed`]. Implementations in this crate never return `Err`.
#[async_trait::async_trait]
pub trait ImageScanner: Send + Sync {
    async fn scan(&self, image: &Image) -> Result<ScanStatus, ImageScanError>;

    fn timer(&self) -> &ScanTimer;
}

#[derive(Error, Debug)]
pub enum ImageScanError {
    #[error("error in the internal scanner execution: {0}")]
    InternalScannerError(Box<dyn Error + Send + Sync>),
}

/// Why a single reference did not produce a usable result.
#[derive(Error, Debug)]
pub enum ScanAttemptError {
    #[error("unable to launch the scanner: {0}")]
    Launch(#[from] std::io::Error),

    #[error("scanner did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("scanner exited with unexpected code {code}: {stderr}")]
    UnexpectedExitCode { code: i32, stderr: String },

    #[error("scanner was terminated by a signal: {stderr}")]
    TerminatedBySignal { stderr: String },

    #[error("unable to parse scan report: {0}")]
    ReportParse(#[from] serde_json::Error),

    #[error("image is past end-of-life, which has no classification yet")]
    EndOfLifeUnclassified,
}
