use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::Arc;

use trivy_compliance::{
    app::{ComponentFactory, Config, ImageScanner},
    infra::ConcreteComponentFactory,
};

/// A stand-in for the scanner CLI: a shell script that receives the same
/// arguments, with the scanned reference available as `$ref`.
pub struct FakeScanner {
    binary: PathBuf,
}

impl FakeScanner {
    pub fn with_script(body: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "trivy-compliance-it-{}",
            rand::random::<u64>()
        ));
        std::fs::create_dir_all(&dir).unwrap();

        let binary = dir.join("trivy");
        std::fs::write(
            &binary,
            format!(
                "#!/bin/sh\nfor ref; do :; done\necho \"$ref\" >> \"$(dirname \"$0\")/calls\"\n{body}\n"
            ),
        )
        .unwrap();
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();

        Self { binary }
    }

    /// Prints `report` and exits with the "vulnerabilities found" code.
    pub fn reporting(report: &str) -> Self {
        Self::with_script(&format!("cat <<'EOF'\n{report}\nEOF\nexit 111"))
    }

    pub fn exiting_with(code: i32) -> Self {
        Self::with_script(&format!("exit {code}"))
    }

    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.binary.with_file_name("calls"))
            .unwrap_or_default()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    pub fn scanner(&self, config: Config) -> Box<dyn ImageScanner> {
        scanner_with(Config {
            binary_path: self.binary.clone(),
            ..config
        })
    }
}

impl Drop for FakeScanner {
    fn drop(&mut self) {
        if let Some(dir) = self.binary.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}

pub fn scanner_with(config: Config) -> Box<dyn ImageScanner> {
    ConcreteComponentFactory::default().image_scanner(Arc::new(config))
}

pub fn report_with(severity: &str, fixed_version: &str) -> String {
    format!(
        r#"{{"SchemaVersion":2,"ArtifactName":"registry.local/app:1.0","Results":[{{"Target":"registry.local/app:1.0 (debian 12.5)","Class":"os-pkgs","Type":"debian","Vulnerabilities":[{{"VulnerabilityID":"CVE-2024-2511","PkgName":"libssl3","InstalledVersion":"3.0.11-1","FixedVersion":"{fixed_version}","Severity":"{severity}"}}]}}]}}"#
    )
}
