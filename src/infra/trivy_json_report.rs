use serde::Deserialize;

use crate::domain::compliance::scan_report::{Finding, ResultGroup, ScanReport};

impl From<JsonReport> for ScanReport {
    fn from(report: JsonReport) -> Self {
        ScanReport::new(
            report
                .results
                .unwrap_or_default()
                .into_iter()
                .map(ResultGroup::from)
                .collect(),
        )
    }
}

impl From<JsonResult> for ResultGroup {
    fn from(result: JsonResult) -> Self {
        let findings = result
            .vulnerabilities
            .unwrap_or_default()
            .into_iter()
            .map(|v| {
                Finding::new(
                    v.vulnerability_id.unwrap_or_default(),
                    v.pkg_name.unwrap_or_default(),
                    v.severity.unwrap_or_default(),
                    v.fixed_version.unwrap_or_default(),
                )
            })
            .collect();

        ResultGroup::new(result.target.unwrap_or_default(), findings)
    }
}

/// Subset of the scanner's `--format=json` report needed for classification.
/// Anything else in the document is ignored.
#[derive(Debug, Deserialize)]
pub(super) struct JsonReport {
    #[serde(rename = "Results")]
    pub results: Option<Vec<JsonResult>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct JsonResult {
    #[serde(rename = "Target")]
    pub target: Option<String>,
    #[serde(rename = "Vulnerabilities")]
    pub vulnerabilities: Option<Vec<JsonVulnerability>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct JsonVulnerability {
    #[serde(rename = "VulnerabilityID")]
    pub vulnerability_id: Option<String>,
    #[serde(rename = "PkgName")]
    pub pkg_name: Option<String>,
    #[serde(rename = "FixedVersion")]
    pub fixed_version: Option<String>,
    #[serde(rename = "Severity")]
    pub severity: Option<String>,
}
