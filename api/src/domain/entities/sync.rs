//! Geography synchronization outcomes

use serde::Serialize;

/// Result of trying to enable the spatial extension.
///
/// Failing to confirm the capability is not an error: the extension may
/// already be installed by someone with more privileges than us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityStatus {
    Enabled,
    Unconfirmed { reason: String },
}

impl CapabilityStatus {
    /// Warning text to surface to the operator, if any
    pub fn warning(&self) -> Option<String> {
        match self {
            CapabilityStatus::Enabled => None,
            CapabilityStatus::Unconfirmed { reason } => Some(format!(
                "could not confirm spatial extension is enabled: {}",
                reason
            )),
        }
    }
}

/// Summary of one synchronization run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Rows that received a freshly derived location point
    pub updated_count: u64,
    /// Non-fatal problems met along the way
    pub warnings: Vec<String>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_has_no_warning() {
        assert_eq!(CapabilityStatus::Enabled.warning(), None);
    }

    #[test]
    fn unconfirmed_carries_reason() {
        let status = CapabilityStatus::Unconfirmed {
            reason: "permission denied to create extension \"postgis\"".to_string(),
        };

        let warning = status.warning().unwrap();
        assert!(warning.contains("permission denied"));
    }

    #[test]
    fn report_serializes_for_operators() {
        let report = SyncReport {
            updated_count: 3,
            warnings: vec!["careful".to_string()],
        };

        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"updated_count":3,"warnings":["careful"]}"#);
        assert!(!report.is_clean());
    }
}
