use tracing::debug;

use super::{scan_status::ScanStatus, severity::normalize_severity};

/// Parsed output of a single scan attempt: result groups in report order,
/// each holding its findings in report order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    results: Vec<ResultGroup>,
}

/// Findings reported for one scan target (an OS package set, a lock file...).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultGroup {
    target: String,
    findings: Vec<Finding>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    vulnerability_id: String,
    package_name: String,
    severity: String,
    fixed_version: String,
}

impl ScanReport {
    pub fn new(results: Vec<ResultGroup>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[ResultGroup] {
        &self.results
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.results.iter().flat_map(|r| r.findings.iter())
    }

    /// Applies the vulnerability filters and decides the verdict for a report
    /// that was obtained successfully.
    ///
    /// Returns `NonCompliant` as soon as a finding survives the unfixed filter
    /// with a severity in `allowed_severities`, `Ok` otherwise.
    pub fn classify<S: AsRef<str>>(
        &self,
        ignore_unfixed: bool,
        allowed_severities: &[S],
    ) -> ScanStatus {
        for finding in self.findings() {
            if ignore_unfixed && !finding.has_fix() {
                continue;
            }

            let severity = finding.severity();
            if allowed_severities.iter().any(|s| s.as_ref() == severity) {
                debug!(
                    vulnerability = finding.vulnerability_id(),
                    package = finding.package_name(),
                    severity,
                    "finding matches severity filter"
                );
                return ScanStatus::NonCompliant;
            }
        }

        ScanStatus::Ok
    }
}

impl ResultGroup {
    pub fn new(target: impl Into<String>, findings: Vec<Finding>) -> Self {
        Self {
            target: target.into(),
            findings,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }
}

impl Finding {
    pub fn new(
        vulnerability_id: impl Into<String>,
        package_name: impl Into<String>,
        severity: impl Into<String>,
        fixed_version: impl Into<String>,
    ) -> Self {
        Self {
            vulnerability_id: vulnerability_id.into(),
            package_name: package_name.into(),
            severity: severity.into(),
            fixed_version: fixed_version.into(),
        }
    }

    pub fn vulnerability_id(&self) -> &str {
        &self.vulnerability_id
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Severity label with empty labels reported as `UNKNOWN`.
    pub fn severity(&self) -> &str {
        normalize_severity(&self.severity)
    }

    pub fn fixed_version(&self) -> &str {
        &self.fixed_version
    }

    pub fn has_fix(&self) -> bool {
        !self.fixed_version.is_empty()
    }
}
