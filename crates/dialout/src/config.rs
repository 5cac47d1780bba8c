//! Notification configuration as a plain value.
//!
//! The host owns however these values are persisted and edited; this crate
//! only sees the finished struct, passed by value into the dispatcher.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Three-valued flag replacing the host's nullable booleans.
///
/// `Unset` means the option was never configured, which every consumer in
/// this crate treats as "off".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    #[default]
    Unset,
    Enabled,
    Disabled,
}

impl Toggle {
    /// True only for an explicit `Enabled`.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Map a host-side optional boolean onto the three states.
    #[must_use]
    pub const fn from_option(value: Option<bool>) -> Self {
        match value {
            None => Self::Unset,
            Some(true) => Self::Enabled,
            Some(false) => Self::Disabled,
        }
    }
}

/// Per-project notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Message template; `%PROJECT%`, `%BUILD%`, `%STATUS%` and `%CULPRITS%`
    /// are substituted before sending.
    pub message: String,
    /// Template used for culprit recipients. Blank or absent falls back to
    /// the general template. May additionally use `%CULPRIT-NAME%`.
    #[serde(default)]
    pub culprit_message: Option<String>,
    /// Comma-separated phone numbers that always receive the notification.
    pub to_list: String,
    /// Gate: notify on every build, only on failure/recovery, or never
    /// while unconfigured.
    #[serde(default)]
    pub only_on_failure_or_recovery: Toggle,
    /// Also message the committers associated with the build.
    #[serde(default)]
    pub send_to_culprits: bool,
    /// Send a text message to each recipient.
    #[serde(default)]
    pub sms: Toggle,
    /// Place a voice call to each recipient.
    #[serde(default)]
    pub call: Toggle,
    /// Append a shortened build-status link to outgoing texts.
    #[serde(default)]
    pub include_url: Toggle,
}

/// A single problem found by [`NotifyConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("the recipient list must contain at least one phone number")]
    EmptyRecipientList,
    #[error("`{0}` is not a valid phone number")]
    InvalidPhoneNumber(String),
    #[error("neither SMS nor voice calls are enabled; nothing would be sent")]
    NoChannelEnabled,
}

impl NotifyConfig {
    /// Check the configuration for problems worth surfacing to the host's
    /// settings screen. An empty result means the configuration is usable.
    ///
    /// A config that fails validation is still dispatchable; the dispatcher
    /// degrades per recipient rather than refusing outright.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        let number_pattern = Regex::new(r"^[0-9()/+ \-]+$").unwrap();
        let entries: Vec<&str> = self
            .to_list
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();

        if entries.is_empty() && !self.send_to_culprits {
            issues.push(ValidationIssue::EmptyRecipientList);
        }
        for entry in entries {
            if !number_pattern.is_match(entry) {
                issues.push(ValidationIssue::InvalidPhoneNumber(entry.to_string()));
            }
        }

        if !self.sms.is_enabled() && !self.call.is_enabled() {
            issues.push(ValidationIssue::NoChannelEnabled);
        }

        issues
    }
}

/// Telephony-provider credentials persisted by the host and passed through
/// as opaque values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub account_sid: String,
    pub auth_token: String,
    /// Number outgoing texts and calls are placed from.
    pub from_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NotifyConfig {
        NotifyConfig {
            message: "%PROJECT% %BUILD% is %STATUS%".to_string(),
            culprit_message: None,
            to_list: "+15005550001".to_string(),
            only_on_failure_or_recovery: Toggle::Enabled,
            send_to_culprits: false,
            sms: Toggle::Enabled,
            call: Toggle::Unset,
            include_url: Toggle::Unset,
        }
    }

    #[test]
    fn toggle_enabled_only_when_explicit() {
        assert!(Toggle::Enabled.is_enabled());
        assert!(!Toggle::Disabled.is_enabled());
        assert!(!Toggle::Unset.is_enabled());
    }

    #[test]
    fn toggle_from_option_covers_all_states() {
        assert_eq!(Toggle::from_option(None), Toggle::Unset);
        assert_eq!(Toggle::from_option(Some(true)), Toggle::Enabled);
        assert_eq!(Toggle::from_option(Some(false)), Toggle::Disabled);
    }

    #[test]
    fn valid_config_has_no_issues() {
        assert!(config().validate().is_empty());
    }

    #[test]
    fn letters_in_a_number_are_flagged() {
        let mut cfg = config();
        cfg.to_list = "+1500call-me".to_string();
        assert_eq!(
            cfg.validate(),
            vec![ValidationIssue::InvalidPhoneNumber("+1500call-me".to_string())]
        );
    }

    #[test]
    fn punctuation_forms_are_accepted() {
        let mut cfg = config();
        cfg.to_list = "(415) 555-0001, +44/20 5550002".to_string();
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn empty_list_without_culprit_sending_is_flagged() {
        let mut cfg = config();
        cfg.to_list = " , ,".to_string();
        assert_eq!(cfg.validate(), vec![ValidationIssue::EmptyRecipientList]);
    }

    #[test]
    fn empty_list_is_fine_when_culprits_are_messaged() {
        let mut cfg = config();
        cfg.to_list = String::new();
        cfg.send_to_culprits = true;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn both_channels_off_is_flagged_as_inert() {
        let mut cfg = config();
        cfg.sms = Toggle::Disabled;
        cfg.call = Toggle::Unset;
        assert_eq!(cfg.validate(), vec![ValidationIssue::NoChannelEnabled]);
    }
}
