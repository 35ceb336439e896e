use itertools::Itertools;

use super::{config::Config, duration_format::format_duration};

/// Exit code the scanner uses when it found vulnerabilities and printed a report.
pub const CODE_VULNERABLE: i32 = 111;
/// Exit code the scanner uses when the image's OS is past end-of-life.
pub const CODE_EOL: i32 = 222;

impl Config {
    /// Arguments for scanning `reference`. The order matters to the scanner and
    /// is kept stable: global flags, the `image` subcommand with its output and
    /// exit code contract, the filters, then the reference itself.
    pub fn invocation(&self, reference: &str) -> Vec<String> {
        let mut args = Vec::new();

        if !self.cache_dir.is_empty() {
            args.push(format!("--cache-dir={}", self.cache_dir));
        }

        if !self.timeout.per_image.is_zero() {
            args.push(format!(
                "--timeout={}",
                format_duration(self.timeout.per_image)
            ));
        }

        args.extend([
            "image".to_owned(),
            "--runtime=containerd".to_owned(),
            "--format=json".to_owned(),
            format!("--exit-code={CODE_VULNERABLE}"),
            format!("--exit-on-eol={CODE_EOL}"),
        ]);

        if !self.db_repo.is_empty() {
            args.push(format!("--db-repository={}", self.db_repo));
        }

        let vulns = &self.vulnerabilities;
        if vulns.ignore_unfixed {
            args.push("--ignore-unfixed".to_owned());
        }

        if !vulns.types.is_empty() {
            args.push(format!("--vuln-type={}", vulns.types.iter().join(",")));
        }

        if !vulns.security_checks.is_empty() {
            args.push(format!(
                "--scanners={}",
                vulns.security_checks.iter().join(",")
            ));
        }

        if !vulns.severities.is_empty() {
            args.push(format!("--severity={}", vulns.severities.iter().join(",")));
        }

        args.push(reference.to_owned());
        args
    }
}
