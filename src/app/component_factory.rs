use std::sync::Arc;

use super::{ImageScanner, config::Config};

/// Builds the scanning strategy a policy asks for.
pub trait ComponentFactory {
    fn image_scanner(&self, config: Arc<Config>) -> Box<dyn ImageScanner>;
}
