mod component_factory_impl;
mod tracing_scan_observer;
mod trivy_image_scanner;
mod trivy_json_report;

pub use component_factory_impl::ConcreteComponentFactory;
pub use tracing_scan_observer::TracingScanObserver;
pub use trivy_image_scanner::TrivyImageScanner;
