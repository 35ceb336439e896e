pub mod image;
pub mod scan_report;
pub mod scan_status;
pub mod severity;
