//! Orchestration of one notification attempt.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::build::BuildSnapshot;
use crate::channels::Messenger;
use crate::config::NotifyConfig;
use crate::culprits::format_name_list;
use crate::error::ProviderError;
use crate::policy::should_notify;
use crate::recipients::{parse_static_list, resolve_culprits, PhoneDirectory, Recipient, SkipReason};
use crate::shorten::UrlShortener;
use crate::template::{
    substitute, SubstitutionMap, BUILD_KEY, CULPRITS_KEY, CULPRIT_NAME_KEY, PROJECT_KEY, STATUS_KEY,
};

/// Delivery channel a single send went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Sms,
    Call,
}

impl Channel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Call => "call",
        }
    }
}

/// Result of one recipient/channel pair within a dispatch.
#[derive(Debug)]
pub enum DispatchOutcome {
    Sent {
        recipient: Recipient,
        channel: Channel,
    },
    /// A culprit dropped before any send was attempted.
    Skipped { user: String, reason: SkipReason },
    Failed {
        recipient: Recipient,
        channel: Channel,
        error: ProviderError,
    },
}

/// Everything that happened during one [`Dispatcher::perform`] call.
///
/// The report exists for observability; its contents never influence the
/// caller's control flow. An empty report is a successful no-op (policy
/// declined, or nobody qualified).
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub outcomes: Vec<DispatchOutcome>,
}

impl DispatchReport {
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DispatchOutcome::Sent { .. }))
            .count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DispatchOutcome::Failed { .. }))
            .count()
    }
}

/// Sends build notifications over the configured channels.
///
/// `perform` is deliberately infallible: a build pipeline must never be
/// blocked because a text message could not be delivered. Every collaborator
/// failure is logged, recorded in the report, and otherwise swallowed.
pub struct Dispatcher {
    messenger: Arc<dyn Messenger>,
    shortener: Arc<dyn UrlShortener>,
    /// Base URL the snapshot's relative status URL is appended to.
    host_url: String,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        messenger: Arc<dyn Messenger>,
        shortener: Arc<dyn UrlShortener>,
        host_url: impl Into<String>,
    ) -> Self {
        Self {
            messenger,
            shortener,
            host_url: host_url.into(),
        }
    }

    /// Run one notification attempt for a completed build.
    ///
    /// Sends are sequential and isolated: a failure for one recipient or
    /// channel never aborts the rest. The per-attempt substitution map and
    /// recipient lists live and die inside this call.
    pub async fn perform(
        &self,
        snapshot: &BuildSnapshot,
        config: &NotifyConfig,
        directory: &dyn PhoneDirectory,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();

        let mut map = SubstitutionMap::new();
        map.set(PROJECT_KEY, snapshot.project.as_str());
        map.set(BUILD_KEY, snapshot.build.as_str());
        map.set(STATUS_KEY, snapshot.status.as_str());

        if !should_notify(snapshot, config.only_on_failure_or_recovery) {
            info!(
                project = %snapshot.project,
                build = %snapshot.build,
                "policy declined, not notifying"
            );
            return report;
        }
        info!(
            project = %snapshot.project,
            build = %snapshot.build,
            status = %snapshot.status,
            "notifying"
        );

        // Culprit discovery is only worth the lookup when a template mentions
        // the list or culprits themselves are messaged.
        let culprit_names = snapshot.culprits();
        if config.send_to_culprits || templates_mention_culprits(config) {
            let joined = format_name_list(&culprit_names);
            debug!(culprits = %joined, "resolved culprit list");
            map.set(CULPRITS_KEY, joined);
        }

        let short_url = self.shorten_build_url(snapshot, config).await;

        for recipient in parse_static_list(&config.to_list) {
            let text = substitute(&config.message, &map);
            self.send_to(&recipient, &text, short_url.as_deref(), config, &mut report)
                .await;
        }

        if config.send_to_culprits {
            if culprit_names.is_empty() {
                info!("no culprits to message");
            }
            let resolution = resolve_culprits(&culprit_names, directory);
            for (user, reason) in resolution.skipped {
                report.outcomes.push(DispatchOutcome::Skipped { user, reason });
            }
            for recipient in resolution.recipients {
                let mut local = map.clone();
                local.set(
                    CULPRIT_NAME_KEY,
                    recipient.display_name.clone().unwrap_or_default(),
                );

                let template = match config.culprit_message.as_deref() {
                    Some(culprit_template) if !culprit_template.trim().is_empty() => {
                        culprit_template
                    }
                    _ => {
                        debug!("culprit message is blank, using the general template");
                        &config.message
                    }
                };

                let text = substitute(template, &local);
                self.send_to(&recipient, &text, short_url.as_deref(), config, &mut report)
                    .await;
            }
        }

        report
    }

    /// Shorten the build-status link once per attempt; every recipient gets
    /// the same URL. Failure downgrades to "send without the link".
    async fn shorten_build_url(
        &self,
        snapshot: &BuildSnapshot,
        config: &NotifyConfig,
    ) -> Option<String> {
        if !config.include_url.is_enabled() || !config.sms.is_enabled() {
            return None;
        }

        let build_url = format!("{}{}", self.host_url, snapshot.url);
        match self.shortener.shorten(&build_url).await {
            Ok(short) => Some(short),
            Err(e) => {
                warn!(
                    url = %build_url,
                    error = %e,
                    "URL shortening failed, sending without a link"
                );
                None
            }
        }
    }

    /// Fire the enabled channels for one recipient. Channels are independent
    /// and each failure is contained here.
    async fn send_to(
        &self,
        recipient: &Recipient,
        text: &str,
        short_url: Option<&str>,
        config: &NotifyConfig,
        report: &mut DispatchReport,
    ) {
        if config.sms.is_enabled() {
            let body = match short_url {
                Some(url) => format!("{text} {url}"),
                None => text.to_string(),
            };
            match self.messenger.send_sms(&recipient.number, &body).await {
                Ok(()) => {
                    info!(channel = Channel::Sms.as_str(), to = %recipient.label(), "sent");
                    report.outcomes.push(DispatchOutcome::Sent {
                        recipient: recipient.clone(),
                        channel: Channel::Sms,
                    });
                }
                Err(error) => {
                    error!(
                        channel = Channel::Sms.as_str(),
                        to = %recipient.label(),
                        error = %error,
                        "send failed"
                    );
                    report.outcomes.push(DispatchOutcome::Failed {
                        recipient: recipient.clone(),
                        channel: Channel::Sms,
                        error,
                    });
                }
            }
        }

        if config.call.is_enabled() {
            match self.messenger.place_call(&recipient.number, text).await {
                Ok(()) => {
                    info!(channel = Channel::Call.as_str(), to = %recipient.label(), "sent");
                    report.outcomes.push(DispatchOutcome::Sent {
                        recipient: recipient.clone(),
                        channel: Channel::Call,
                    });
                }
                Err(error) => {
                    error!(
                        channel = Channel::Call.as_str(),
                        to = %recipient.label(),
                        error = %error,
                        "send failed"
                    );
                    report.outcomes.push(DispatchOutcome::Failed {
                        recipient: recipient.clone(),
                        channel: Channel::Call,
                        error,
                    });
                }
            }
        }
    }
}

fn templates_mention_culprits(config: &NotifyConfig) -> bool {
    config.message.contains(CULPRITS_KEY)
        || config
            .culprit_message
            .as_deref()
            .is_some_and(|t| t.contains(CULPRITS_KEY))
}
