//! SMS and voice-call notifications for build results.
//!
//! This crate decides whether a completed build is worth announcing, works
//! out who should hear about it (a configured list of numbers plus the
//! committers who broke the build), fills a message template with build
//! metadata, and hands the result to a telephony gateway — a text, a call,
//! or both per recipient.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use dialout::{
//!     BuildSnapshot, BuildStatus, Dispatcher, NotifyConfig, PhoneDirectory,
//!     ProviderSettings, TinyUrlShortener, Toggle, TwilioMessenger,
//! };
//!
//! struct NoDirectory;
//! impl PhoneDirectory for NoDirectory {
//!     fn number_for(&self, _user: &str) -> Option<String> {
//!         None
//!     }
//! }
//!
//! # async fn run() {
//! let messenger = TwilioMessenger::new(ProviderSettings {
//!     account_sid: "AC...".to_string(),
//!     auth_token: "...".to_string(),
//!     from_number: "+15005550006".to_string(),
//! });
//! let dispatcher = Dispatcher::new(
//!     Arc::new(messenger),
//!     Arc::new(TinyUrlShortener::new()),
//!     "https://ci.example.com/",
//! );
//!
//! let snapshot = BuildSnapshot {
//!     project: "website".to_string(),
//!     build: "#12".to_string(),
//!     status: BuildStatus::Failure,
//!     previous_status: Some(BuildStatus::Success),
//!     url: "job/website/12/".to_string(),
//!     committers: vec!["alice".to_string()],
//!     changelog_authors: vec![],
//! };
//! let config = NotifyConfig {
//!     message: "%PROJECT% %BUILD% finished: %STATUS%".to_string(),
//!     culprit_message: None,
//!     to_list: "+15005550001, +15005550002".to_string(),
//!     only_on_failure_or_recovery: Toggle::Enabled,
//!     send_to_culprits: false,
//!     sms: Toggle::Enabled,
//!     call: Toggle::Unset,
//!     include_url: Toggle::Enabled,
//! };
//!
//! let report = dispatcher.perform(&snapshot, &config, &NoDirectory).await;
//! println!("{} sent, {} failed", report.sent_count(), report.failed_count());
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`policy`] gates the attempt on the build outcome and the
//!   only-on-failure-or-recovery toggle.
//! - [`recipients`] resolves the static number list and the culprits.
//! - [`template`] substitutes `%PROJECT%`-style placeholders.
//! - [`Dispatcher`] drives the above and sends through a [`Messenger`],
//!   recording per-recipient, per-channel outcomes.
//! - [`TwilioMessenger`] and [`TinyUrlShortener`] are the bundled
//!   collaborator implementations; hosts may substitute their own.
//!
//! Delivery is strictly best-effort: `perform` never propagates an error to
//! the build pipeline that invoked it.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod build;
pub mod channels;
pub mod config;
pub mod culprits;
pub mod dispatch;
pub mod error;
pub mod policy;
pub mod recipients;
pub mod shorten;
pub mod template;

pub use build::{BuildSnapshot, BuildStatus};
pub use channels::twilio::TwilioMessenger;
pub use channels::Messenger;
pub use config::{NotifyConfig, ProviderSettings, Toggle, ValidationIssue};
pub use culprits::format_name_list;
pub use dispatch::{Channel, DispatchOutcome, DispatchReport, Dispatcher};
pub use error::{ProviderError, ShortenError};
pub use policy::{is_failure_or_recovery, should_notify};
pub use recipients::{PhoneDirectory, Recipient, SkipReason};
pub use shorten::{TinyUrlShortener, UrlShortener};
pub use template::{substitute, SubstitutionMap};
