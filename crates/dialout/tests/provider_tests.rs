//! HTTP-level tests for the Twilio client and the TinyURL shortener.

use dialout::{Messenger, ProviderError, ProviderSettings, ShortenError, TinyUrlShortener,
    TwilioMessenger, UrlShortener};
use wiremock::matchers::{basic_auth, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings() -> ProviderSettings {
    ProviderSettings {
        account_sid: "AC123".to_string(),
        auth_token: "secret".to_string(),
        from_number: "+15005550006".to_string(),
    }
}

// =============================================================================
// Twilio messenger
// =============================================================================

#[tokio::test]
async fn sms_posts_an_authenticated_form_to_the_messages_resource() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
        .and(basic_auth("AC123", "secret"))
        .and(body_string_contains("To=%2B15005550001"))
        .and(body_string_contains("From=%2B15005550006"))
        .and(body_string_contains("Body=build+failed"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let messenger = TwilioMessenger::with_api_base(settings(), server.uri());
    messenger
        .send_sms("+15005550001", "build failed")
        .await
        .expect("SMS should be accepted");
}

#[tokio::test]
async fn call_posts_a_twimlet_echo_callback_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
        .and(basic_auth("AC123", "secret"))
        .and(body_string_contains("To=%2B15005550001"))
        // The callback URL is form-encoded inside the body, so its own
        // percent escapes are double-encoded.
        .and(body_string_contains("twimlets.com%2Fecho%3FTwiml%3D"))
        .and(body_string_contains("%253CSay%253Ehello%253C%252FSay%253E"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let messenger = TwilioMessenger::with_api_base(settings(), server.uri());
    messenger
        .place_call("+15005550001", "hello")
        .await
        .expect("call should be accepted");
}

#[tokio::test]
async fn provider_rejection_surfaces_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": 21211,
            "message": "The 'To' number is not a valid phone number.",
        })))
        .mount(&server)
        .await;

    let messenger = TwilioMessenger::with_api_base(settings(), server.uri());
    let err = messenger
        .send_sms("not-a-number", "hi")
        .await
        .expect_err("a 400 must map to an error");

    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "The 'To' number is not a valid phone number.");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_error_body_is_passed_through_raw() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("gateway exploded"))
        .mount(&server)
        .await;

    let messenger = TwilioMessenger::with_api_base(settings(), server.uri());
    let err = messenger.send_sms("+15005550001", "hi").await.unwrap_err();
    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "gateway exploded");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

// =============================================================================
// TinyURL shortener
// =============================================================================

#[tokio::test]
async fn shortener_returns_the_response_body_on_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api-create.php"))
        .and(query_param("url", "https://ci.test/job/website/12/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("http://tinyurl.com/abc123"))
        .expect(1)
        .mount(&server)
        .await;

    let shortener = TinyUrlShortener::with_api_base(server.uri());
    let short = shortener
        .shorten("https://ci.test/job/website/12/")
        .await
        .expect("shortening should succeed");
    assert_eq!(short, "http://tinyurl.com/abc123");
}

#[tokio::test]
async fn shortener_escapes_spaces_in_the_long_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api-create.php"))
        .and(query_param("url", "https://ci.test/job/my site/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("http://tinyurl.com/s"))
        .expect(1)
        .mount(&server)
        .await;

    let shortener = TinyUrlShortener::with_api_base(server.uri());
    shortener
        .shorten("https://ci.test/job/my site/1/")
        .await
        .expect("spaces must not break the request");
}

#[tokio::test]
async fn shortener_non_ok_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let shortener = TinyUrlShortener::with_api_base(server.uri());
    let err = shortener
        .shorten("https://ci.test/job/website/12/")
        .await
        .expect_err("a 503 must map to an error");
    assert!(matches!(err, ShortenError::Status(503)));
}
