mod component_factory;
mod config;
pub mod duration_format;
mod invocation;
mod scan_observer;
mod scan_timer;
mod scanner;

pub use component_factory::ComponentFactory;
pub use config::{Config, ConfigError, ScannerKind, TimeoutConfig, VulnConfig};
pub use invocation::{CODE_EOL, CODE_VULNERABLE};
pub use scan_observer::ScanObserver;
pub use scan_timer::ScanTimer;
pub use scanner::{ImageScanError, ImageScanner, ScanAttemptError};
