use std::fmt::{Display, Formatter};

/// Outcome of evaluating one image against the scan policy.
///
/// Ordered from "no verdict" to "acceptable": `Failed < NonCompliant < Ok`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Debug)]
pub enum ScanStatus {
    Failed,
    NonCompliant,
    Ok,
}

impl Display for ScanStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ScanStatus::Failed => "FAILED",
                ScanStatus::NonCompliant => "NON_COMPLIANT",
                ScanStatus::Ok => "OK",
            }
        )
    }
}
