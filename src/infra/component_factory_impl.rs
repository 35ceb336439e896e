use std::sync::Arc;

use crate::app::{ComponentFactory, Config, ImageScanner, ScanObserver, ScannerKind};

use super::{TracingScanObserver, TrivyImageScanner};

pub struct ConcreteComponentFactory {
    observer: Arc<dyn ScanObserver>,
}

impl ConcreteComponentFactory {
    pub fn new(observer: Arc<dyn ScanObserver>) -> Self {
        Self { observer }
    }
}

impl Default for ConcreteComponentFactory {
    fn default() -> Self {
        Self::new(Arc::new(TracingScanObserver))
    }
}

impl ComponentFactory for ConcreteComponentFactory {
    fn image_scanner(&self, config: Arc<Config>) -> Box<dyn ImageScanner> {
        match config.scanner {
            ScannerKind::Trivy => Box::new(TrivyImageScanner::new(config, self.observer.clone())),
        }
    }
}
