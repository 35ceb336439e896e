use crate::domain::compliance::{image::Image, scan_status::ScanStatus};

use super::scanner::ScanAttemptError;

/// Receives what a scanner does while classifying an image. Scanners take it
/// as a dependency instead of logging through process-wide state.
pub trait ScanObserver: Send + Sync {
    fn scan_started(&self, image: &Image);

    fn attempt_failed(&self, image: &Image, reference: &str, error: &ScanAttemptError);

    fn scan_finished(&self, image: &Image, status: ScanStatus);
}
