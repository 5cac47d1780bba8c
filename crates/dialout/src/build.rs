//! Build metadata supplied by the host at notification time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal state of a completed build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
    Success,
    Unstable,
    Failure,
    Aborted,
    /// Anything else the host may report (not built, cancelled mid-queue, ...).
    Other,
}

impl BuildStatus {
    /// Display form used for the `%STATUS%` placeholder.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Unstable => "UNSTABLE",
            Self::Failure => "FAILURE",
            Self::Aborted => "ABORTED",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of one completed build.
///
/// Constructed by the host from its build record and handed to
/// [`Dispatcher::perform`](crate::Dispatcher::perform). Nothing here outlives
/// a single notification attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSnapshot {
    /// Project display name (`%PROJECT%`).
    pub project: String,
    /// Build display name (`%BUILD%`).
    pub build: String,
    /// Terminal result of this build.
    pub status: BuildStatus,
    /// Result of the immediately preceding build, absent for a first build.
    pub previous_status: Option<BuildStatus>,
    /// Status URL relative to the host's base URL.
    pub url: String,
    /// Committers the host recorded against this build, in recorded order.
    #[serde(default)]
    pub committers: Vec<String>,
    /// Authors of the change-log entries, in change-log order.
    #[serde(default)]
    pub changelog_authors: Vec<String>,
}

impl BuildSnapshot {
    /// Users considered responsible for this build.
    ///
    /// The recorded committer set is authoritative; only when it is empty do
    /// the change-log authors stand in for it. The two tiers are never
    /// merged. Duplicates keep their first occurrence so downstream
    /// formatting stays in resolution order.
    #[must_use]
    pub fn culprits(&self) -> Vec<String> {
        let source = if self.committers.is_empty() {
            &self.changelog_authors
        } else {
            &self.committers
        };

        let mut seen = Vec::new();
        for name in source {
            if !seen.contains(name) {
                seen.push(name.clone());
            }
        }
        seen
    }
}
