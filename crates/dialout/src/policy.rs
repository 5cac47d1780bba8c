//! The gate deciding whether a build outcome is announced at all.

use crate::build::{BuildSnapshot, BuildStatus};
use crate::config::Toggle;

/// Decide whether this build's result should be announced.
///
/// The toggle is mandatory: while it is [`Toggle::Unset`] nothing is ever
/// sent, regardless of outcome. An explicit `Disabled` announces every
/// build; `Enabled` restricts announcements to failures and recoveries.
#[must_use]
pub fn should_notify(snapshot: &BuildSnapshot, only_on_failure_or_recovery: Toggle) -> bool {
    match only_on_failure_or_recovery {
        Toggle::Unset => false,
        Toggle::Disabled => true,
        Toggle::Enabled => is_failure_or_recovery(snapshot),
    }
}

/// Whether the build is a failure or a recovery.
///
/// Failed and unstable builds count as failures. A recovery is a successful
/// build immediately following one that was not successful; a first build
/// cannot be a recovery. Aborted builds never qualify.
#[must_use]
pub fn is_failure_or_recovery(snapshot: &BuildSnapshot) -> bool {
    match snapshot.status {
        BuildStatus::Failure | BuildStatus::Unstable => true,
        BuildStatus::Success => snapshot
            .previous_status
            .is_some_and(|previous| previous != BuildStatus::Success),
        BuildStatus::Aborted | BuildStatus::Other => false,
    }
}
