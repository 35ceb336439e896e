use tracing::{info, warn};

use crate::{
    app::{ScanAttemptError, ScanObserver},
    domain::compliance::{image::Image, scan_status::ScanStatus},
};

/// Reports scanner activity as structured `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingScanObserver;

impl ScanObserver for TracingScanObserver {
    fn scan_started(&self, image: &Image) {
        info!(
            image_id = image.image_id().unwrap_or_default(),
            refs = ?image.references().collect::<Vec<_>>(),
            "scanning image"
        );
    }

    fn attempt_failed(&self, image: &Image, reference: &str, error: &ScanAttemptError) {
        warn!(
            image_id = image.image_id().unwrap_or_default(),
            reference,
            error = %error,
            "could not scan image reference"
        );
    }

    fn scan_finished(&self, image: &Image, status: ScanStatus) {
        info!(
            image_id = image.image_id().unwrap_or_default(),
            status = %status,
            "finished scanning image"
        );
    }
}
