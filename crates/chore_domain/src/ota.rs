//! Boot-time decision of whether a freshly fetched main script replaces the
//! installed one. Fetching and writing the script belong to the board.

use tracing::info;

use crate::wake::WakeReason;

/// Payloads this short are error pages or empty bodies, never a real script.
const MIN_SCRIPT_BYTES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OtaConfig {
    pub url: Option<String>,
    pub token: Option<String>,
}

impl OtaConfig {
    pub fn is_enabled(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }

    /// `Authorization` header value for private script hosts.
    pub fn authorization_header(&self) -> Option<String> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| format!("token {token}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDecision {
    Apply,
    UpToDate,
    TooSmall,
}

/// Only a cold boot outside dev mode pays for an update check; deep-sleep
/// wakes go straight to the dashboard.
pub fn should_check_for_update(config: &OtaConfig, dev_mode: bool, reason: WakeReason) -> bool {
    if dev_mode {
        info!("dev mode, skipping update check");
        return false;
    }
    if !config.is_enabled() {
        info!("no update url configured");
        return false;
    }
    matches!(reason, WakeReason::FreshBoot)
}

pub fn evaluate_update(fetched: &str, installed: Option<&str>) -> UpdateDecision {
    if fetched.len() <= MIN_SCRIPT_BYTES {
        return UpdateDecision::TooSmall;
    }
    if installed == Some(fetched) {
        return UpdateDecision::UpToDate;
    }
    UpdateDecision::Apply
}
