use std::process::{Output, Stdio};
use std::sync::Arc;

use tokio::process::Command;

use crate::{
    app::{
        CODE_EOL, CODE_VULNERABLE, Config, ImageScanError, ImageScanner, ScanAttemptError,
        ScanObserver, ScanTimer,
    },
    domain::compliance::{image::Image, scan_report::ScanReport, scan_status::ScanStatus},
};

use super::trivy_json_report::JsonReport;

/// Classifies images by running the Trivy CLI once per reference until one
/// of them yields a usable result.
pub struct TrivyImageScanner {
    config: Arc<Config>,
    observer: Arc<dyn ScanObserver>,
    timer: ScanTimer,
}

impl TrivyImageScanner {
    pub fn new(config: Arc<Config>, observer: Arc<dyn ScanObserver>) -> Self {
        let timer = ScanTimer::start(config.timeout.total);
        Self {
            config,
            observer,
            timer,
        }
    }

    async fn attempt(&self, reference: &str) -> Result<ScanStatus, ScanAttemptError> {
        let output = self.run(reference).await?;

        match output.status.code() {
            Some(0) => Ok(ScanStatus::Ok),
            Some(CODE_VULNERABLE) => {
                let report: JsonReport = serde_json::from_slice(&output.stdout)?;
                let vulns = &self.config.vulnerabilities;
                Ok(ScanReport::from(report)
                    .classify(vulns.ignore_unfixed, vulns.severities.as_slice()))
            }
            Some(CODE_EOL) => Err(ScanAttemptError::EndOfLifeUnclassified),
            Some(code) => Err(ScanAttemptError::UnexpectedExitCode {
                code,
                stderr: stderr_of(&output),
            }),
            None => Err(ScanAttemptError::TerminatedBySignal {
                stderr: stderr_of(&output),
            }),
        }
    }

    /// Runs the scanner to completion with both streams captured. The child is
    /// killed if the per-image budget runs out first.
    async fn run(&self, reference: &str) -> Result<Output, ScanAttemptError> {
        let mut command = Command::new(&self.config.binary_path);
        command
            .args(self.config.invocation(reference))
            .stdin(Stdio::null())
            .kill_on_drop(true);
        let output = command.output();

        let per_image = self.config.timeout.per_image;
        if per_image.is_zero() {
            return Ok(output.await?);
        }

        match tokio::time::timeout(per_image, output).await {
            Ok(output) => Ok(output?),
            Err(_) => Err(ScanAttemptError::TimedOut(per_image)),
        }
    }
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_owned()
}

#[async_trait::async_trait]
impl ImageScanner for TrivyImageScanner {
    async fn scan(&self, image: &Image) -> Result<ScanStatus, ImageScanError> {
        self.observer.scan_started(image);

        let mut status = ScanStatus::Failed;
        for reference in image.references() {
            match self.attempt(reference).await {
                Ok(verdict) => {
                    status = verdict;
                    break;
                }
                Err(err) => self.observer.attempt_failed(image, reference, &err),
            }
        }

        self.observer.scan_finished(image, status);
        Ok(status)
    }

    fn timer(&self) -> &ScanTimer {
        &self.timer
    }
}
