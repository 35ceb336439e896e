use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::compliance::severity::{
    SECURITY_CHECK_VULN, SEVERITY_CRITICAL, SEVERITY_HIGH, SEVERITY_LOW, SEVERITY_MEDIUM,
    VULN_TYPE_LIBRARY, VULN_TYPE_OS,
};

use super::duration_format;

const DEFAULT_CACHE_DIR: &str = "/var/lib/trivy";
const DEFAULT_DB_REPO: &str = "ghcr.io/aquasecurity/trivy-db";
const DEFAULT_BINARY: &str = "trivy";
const DEFAULT_TOTAL_TIMEOUT: Duration = Duration::from_secs(23 * 60 * 60);
const DEFAULT_PER_IMAGE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Scan policy. Read-only once loaded and safe to share between concurrent scans.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub scanner: ScannerKind,
    pub binary_path: PathBuf,
    /// Empty means the scanner's own default cache location.
    pub cache_dir: String,
    pub db_repo: String,
    /// Not used while scanning; tells the caller whether images that could
    /// not be scanned should be removed anyway.
    pub delete_failed_images: bool,
    pub vulnerabilities: VulnConfig,
    pub timeout: TimeoutConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VulnConfig {
    pub ignore_unfixed: bool,
    pub types: Vec<String>,
    pub security_checks: Vec<String>,
    pub severities: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeoutConfig {
    #[serde(deserialize_with = "duration_format::deserialize")]
    pub total: Duration,
    /// Zero disables the per-image budget.
    #[serde(deserialize_with = "duration_format::deserialize")]
    pub per_image: Duration,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScannerKind {
    #[default]
    Trivy,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid yaml config: {0}")]
    Yaml(#[from] marked_yaml::FromYamlError),

    #[error("invalid json config: {0}")]
    Json(#[from] serde_json::Error),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scanner: ScannerKind::default(),
            binary_path: PathBuf::from(DEFAULT_BINARY),
            cache_dir: DEFAULT_CACHE_DIR.to_owned(),
            db_repo: DEFAULT_DB_REPO.to_owned(),
            delete_failed_images: true,
            vulnerabilities: VulnConfig::default(),
            timeout: TimeoutConfig::default(),
        }
    }
}

impl Default for VulnConfig {
    fn default() -> Self {
        Self {
            ignore_unfixed: true,
            types: vec![VULN_TYPE_OS.to_owned(), VULN_TYPE_LIBRARY.to_owned()],
            security_checks: vec![SECURITY_CHECK_VULN.to_owned()],
            severities: [
                SEVERITY_CRITICAL,
                SEVERITY_HIGH,
                SEVERITY_MEDIUM,
                SEVERITY_LOW,
            ]
            .map(str::to_owned)
            .to_vec(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            total: DEFAULT_TOTAL_TIMEOUT,
            per_image: DEFAULT_PER_IMAGE_TIMEOUT,
        }
    }
}

impl Config {
    /// Loads a policy document. `.yaml`/`.yml` files are read as YAML, anything
    /// else as JSON.
    pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_owned(),
                    source,
                })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(marked_yaml::from_yaml(0, content)?)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::{Config, ScannerKind};

    #[test]
    fn it_has_sane_defaults() {
        let config = Config::default();

        assert_eq!(config.scanner, ScannerKind::Trivy);
        assert_eq!(config.binary_path, PathBuf::from("trivy"));
        assert_eq!(config.cache_dir, "/var/lib/trivy");
        assert_eq!(config.db_repo, "ghcr.io/aquasecurity/trivy-db");
        assert!(config.delete_failed_images);
        assert!(config.vulnerabilities.ignore_unfixed);
        assert_eq!(config.vulnerabilities.types, vec!["os", "library"]);
        assert_eq!(config.vulnerabilities.security_checks, vec!["vuln"]);
        assert_eq!(
            config.vulnerabilities.severities,
            vec!["CRITICAL", "HIGH", "MEDIUM", "LOW"]
        );
        assert_eq!(config.timeout.total, Duration::from_secs(23 * 3600));
        assert_eq!(config.timeout.per_image, Duration::from_secs(3600));
    }

    #[test]
    fn it_fills_missing_json_fields_with_defaults() {
        let config = Config::from_json(
            r#"{
                "cacheDir": "",
                "vulnerabilities": { "severities": ["CRITICAL"] },
                "timeout": { "perImage": "5m" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.cache_dir, "");
        assert_eq!(config.db_repo, "ghcr.io/aquasecurity/trivy-db");
        assert_eq!(config.vulnerabilities.severities, vec!["CRITICAL"]);
        assert!(config.vulnerabilities.ignore_unfixed);
        assert_eq!(config.vulnerabilities.types, vec!["os", "library"]);
        assert_eq!(config.timeout.per_image, Duration::from_secs(300));
        assert_eq!(config.timeout.total, Duration::from_secs(23 * 3600));
    }

    #[test]
    fn it_loads_an_empty_json_document_as_the_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn it_loads_yaml_documents() {
        let config = Config::from_yaml(
            "scanner: trivy\n\
             binaryPath: /usr/local/bin/trivy\n\
             dbRepo: registry.local/trivy-db\n\
             deleteFailedImages: false\n\
             vulnerabilities:\n  \
               ignoreUnfixed: false\n  \
               types:\n    - os\n  \
               severities:\n    - HIGH\n    - UNKNOWN\n\
             timeout:\n  \
               total: 2h\n  \
               perImage: 0s\n",
        )
        .unwrap();

        assert_eq!(config.binary_path, PathBuf::from("/usr/local/bin/trivy"));
        assert_eq!(config.db_repo, "registry.local/trivy-db");
        assert!(!config.delete_failed_images);
        assert!(!config.vulnerabilities.ignore_unfixed);
        assert_eq!(config.vulnerabilities.types, vec!["os"]);
        assert_eq!(config.vulnerabilities.severities, vec!["HIGH", "UNKNOWN"]);
        assert_eq!(config.timeout.total, Duration::from_secs(7200));
        assert_eq!(config.timeout.per_image, Duration::ZERO);
    }

    #[test]
    fn it_rejects_invalid_durations() {
        let err = Config::from_json(r#"{"timeout": {"total": "one day"}}"#).unwrap_err();

        assert!(err.to_string().contains("invalid duration"), "{err}");
    }

    #[test]
    fn it_rejects_unknown_scanners() {
        assert!(Config::from_json(r#"{"scanner": "grype"}"#).is_err());
    }

    #[tokio::test]
    async fn it_reports_missing_files() {
        let err = Config::from_file(&PathBuf::from("/nonexistent/policy.yaml"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("/nonexistent/policy.yaml"), "{err}");
    }
}
