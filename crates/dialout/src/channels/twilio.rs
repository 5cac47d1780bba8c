//! Twilio REST implementation of the [`Messenger`] trait.

use async_trait::async_trait;
use tracing::debug;

use crate::channels::Messenger;
use crate::config::ProviderSettings;
use crate::error::ProviderError;

/// Production Twilio endpoint.
const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// Twimlet that echoes back the TwiML passed in its query string; used to
/// turn a text into a spoken call without hosting our own TwiML.
const TWIMLET_ECHO_URL: &str = "http://twimlets.com/echo";

/// Messenger backed by the Twilio REST API.
///
/// Cheap to construct; build one per dispatch invocation rather than
/// sharing across builds.
pub struct TwilioMessenger {
    settings: ProviderSettings,
    api_base: String,
    client: reqwest::Client,
}

impl TwilioMessenger {
    #[must_use]
    pub fn new(settings: ProviderSettings) -> Self {
        Self::with_api_base(settings, DEFAULT_API_BASE)
    }

    /// Point the client at a different endpoint. Used by tests and by hosts
    /// fronting Twilio with a proxy.
    #[must_use]
    pub fn with_api_base(settings: ProviderSettings, api_base: impl Into<String>) -> Self {
        Self {
            settings,
            api_base: api_base.into(),
            client: reqwest::Client::new(),
        }
    }

    fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/{resource}.json",
            self.api_base, self.settings.account_sid
        )
    }

    /// Callback URL handed to Twilio for voice calls: the echo twimlet with
    /// a `<Say>` response wrapping the spoken text.
    fn twiml_callback(spoken_text: &str) -> String {
        let twiml = format!("<Response><Say>{spoken_text}</Say></Response>");
        format!("{TWIMLET_ECHO_URL}?Twiml={}", urlencoding::encode(&twiml))
    }

    async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<(), ProviderError> {
        let response = self
            .client
            .post(url)
            .basic_auth(&self.settings.account_sid, Some(&self.settings.auth_token))
            .form(params)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str().map(String::from)))
            .unwrap_or(body);

        Err(ProviderError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl Messenger for TwilioMessenger {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), ProviderError> {
        debug!(to = %to, "sending SMS via Twilio");
        self.post_form(
            &self.resource_url("Messages"),
            &[
                ("To", to),
                ("From", self.settings.from_number.as_str()),
                ("Body", body),
            ],
        )
        .await
    }

    async fn place_call(&self, to: &str, spoken_text: &str) -> Result<(), ProviderError> {
        debug!(to = %to, "placing call via Twilio");
        let callback = Self::twiml_callback(spoken_text);
        self.post_form(
            &self.resource_url("Calls"),
            &[
                ("To", to),
                ("From", self.settings.from_number.as_str()),
                ("Url", callback.as_str()),
            ],
        )
        .await
    }
}
