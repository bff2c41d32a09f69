use std::collections::HashMap;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{valid_subscription_body, TestApp};

#[tokio::test]
async fn subscribe_returns_201_when_body_is_valid() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_subscription(valid_subscription_body()).await;

    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn subscribe_persists_the_new_subscription() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&test_app.email_server)
        .await;

    test_app.post_subscription(valid_subscription_body()).await;

    assert_eq!(test_app.store.count(), 1);
}

#[tokio::test]
async fn subscribe_returns_400_when_body_require_field_is_missing() {
    let test_app = TestApp::spawn_app().await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases: Vec<(HashMap<&str, &str>, &str)> = vec![
        (HashMap::from([]), "missing body parameters"),
        (
            HashMap::from([("email", "friend@test.com")]),
            "missing every subscription field",
        ),
        (
            {
                let mut body = valid_subscription_body();
                body.remove("pet_name");
                body
            },
            "missing pet name parameter",
        ),
        (
            {
                let mut body = valid_subscription_body();
                body.remove("cadence");
                body
            },
            "missing cadence parameter",
        ),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_subscription(invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            error_message
        );
    }
}

#[tokio::test]
async fn subscribe_returns_400_when_body_is_present_but_not_valid() {
    let test_app = TestApp::spawn_app().await;

    let test_cases: Vec<(&str, &str, &str)> = vec![
        ("email", "test.com", "invalid email parameter"),
        ("pet_name", "", "empty pet name parameter"),
        ("cadence", "fortnightly", "cadence outside the enum"),
        ("toy", "catnip", "toy outside the catalog"),
        ("portrait_url", "", "empty portrait reference"),
    ];

    for (field, value, error_message) in test_cases {
        let mut body = valid_subscription_body();
        body.insert(field, value);

        let response = test_app.post_subscription(body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload had {}",
            error_message
        );
    }
}

#[tokio::test]
async fn subscribe_returns_409_for_a_duplicate_email_and_pet_name_pair() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&test_app.email_server)
        .await;

    let first = test_app.post_subscription(valid_subscription_body()).await;
    let second = test_app.post_subscription(valid_subscription_body()).await;

    assert_eq!(201, first.status().as_u16());
    assert_eq!(409, second.status().as_u16());
    assert_eq!(test_app.store.count(), 1);
}

#[tokio::test]
async fn subscribe_sends_the_welcome_letter_with_the_memory_verbatim() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    test_app.post_subscription(valid_subscription_body()).await;

    let received_requests = &test_app.email_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received_requests[0].body).unwrap();
    let story = body["content"][0]["value"].as_str().unwrap();

    assert!(story.contains("we fell asleep on the porch"));
    assert!(story.contains("Whiskers"));
    assert_eq!(
        body["personalizations"][0]["dynamic_template_data"]["pet_name"],
        "Whiskers"
    );
    assert_eq!(
        body["personalizations"][0]["dynamic_template_data"]["frequency"],
        "weekly"
    );
}

#[tokio::test]
async fn subscribe_still_returns_201_when_the_welcome_send_fails() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_subscription(valid_subscription_body()).await;

    // The subscription is saved either way; the letter can go out later.
    assert_eq!(201, response.status().as_u16());
    assert_eq!(test_app.store.count(), 1);
}
