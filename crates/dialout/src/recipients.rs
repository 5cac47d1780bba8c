//! Turning configured numbers and culprit names into dispatch targets.

use std::fmt;

use tracing::warn;

/// One phone number the dispatcher will contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub number: String,
    /// Present only for culprit-derived recipients; static numbers carry no
    /// name.
    pub display_name: Option<String>,
}

impl Recipient {
    /// Label used in logs and dispatch records.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.number)
    }
}

/// Host-side lookup from a user identity to their registered phone number.
///
/// `None` means the user never registered a number; `Some` returns the raw
/// stored value, which may be blank.
pub trait PhoneDirectory: Send + Sync {
    fn number_for(&self, user: &str) -> Option<String>;
}

/// Why a culprit was dropped from the target set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The directory has no entry for the user.
    NoRegisteredNumber,
    /// The directory entry exists but holds a blank number.
    EmptyNumber,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRegisteredNumber => f.write_str("no registered phone number"),
            Self::EmptyNumber => f.write_str("registered phone number is empty"),
        }
    }
}

/// Culprit targets plus the culprits that had to be dropped.
#[derive(Debug, Default)]
pub struct CulpritResolution {
    pub recipients: Vec<Recipient>,
    pub skipped: Vec<(String, SkipReason)>,
}

/// Parse the configured comma-separated recipient list.
///
/// Entries are trimmed and empty ones dropped, so `"a, b ,,c"` yields three
/// recipients.
#[must_use]
pub fn parse_static_list(raw: &str) -> Vec<Recipient> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| Recipient {
            number: entry.to_string(),
            display_name: None,
        })
        .collect()
}

/// Resolve culprit names to dialable recipients via the directory.
///
/// A culprit without a usable number is skipped and recorded; one missing
/// number never blocks the rest of the batch.
#[must_use]
pub fn resolve_culprits(names: &[String], directory: &dyn PhoneDirectory) -> CulpritResolution {
    let mut resolution = CulpritResolution::default();

    for name in names {
        match directory.number_for(name) {
            None => {
                warn!(user = %name, "culprit has no registered phone number, skipping");
                resolution
                    .skipped
                    .push((name.clone(), SkipReason::NoRegisteredNumber));
            }
            Some(number) if number.trim().is_empty() => {
                warn!(user = %name, "culprit's registered phone number is empty, skipping");
                resolution
                    .skipped
                    .push((name.clone(), SkipReason::EmptyNumber));
            }
            Some(number) => {
                resolution.recipients.push(Recipient {
                    number: number.trim().to_string(),
                    display_name: Some(name.clone()),
                });
            }
        }
    }

    resolution
}
