//! Severity labels and filter values understood by the scanner.

pub const SEVERITY_CRITICAL: &str = "CRITICAL";
pub const SEVERITY_HIGH: &str = "HIGH";
pub const SEVERITY_MEDIUM: &str = "MEDIUM";
pub const SEVERITY_LOW: &str = "LOW";
pub const SEVERITY_UNKNOWN: &str = "UNKNOWN";

pub const VULN_TYPE_OS: &str = "os";
pub const VULN_TYPE_LIBRARY: &str = "library";

pub const SECURITY_CHECK_VULN: &str = "vuln";

/// An empty label means the scanner could not rate the finding.
pub fn normalize_severity(label: &str) -> &str {
    if label.is_empty() {
        SEVERITY_UNKNOWN
    } else {
        label
    }
}
