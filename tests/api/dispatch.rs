use chrono::{Duration, Utc};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::TestApp;
use meow_memory_lane::domain::cadence_tier::CadenceTier;

#[tokio::test]
async fn dispatch_sends_to_due_subscriptions_and_advances_their_timestamps() {
    let test_app = TestApp::spawn_app().await;
    let now = Utc::now();

    let due_id = test_app.seed_subscription(
        "due@test.com",
        "Whiskers",
        CadenceTier::Daily,
        now - Duration::hours(25),
    );
    let fresh_id = test_app.seed_subscription(
        "fresh@test.com",
        "Mittens",
        CadenceTier::Daily,
        now - Duration::hours(1),
    );

    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.dispatch_updates().await;
    assert_eq!(200, response.status().as_u16());

    let summary: serde_json::Value = response.json().await.unwrap();
    assert_eq!(summary["selected"], 1);
    assert_eq!(summary["sent"], 1);
    assert_eq!(summary["recorded"], 1);
    assert_eq!(summary["transient_send_failures"], 0);
    assert_eq!(summary["inconsistent_state_failures"], 0);

    let due = test_app.store.get(due_id).unwrap();
    let fresh = test_app.store.get(fresh_id).unwrap();

    assert!(due.last_sent_at > now - Duration::minutes(1));
    assert_eq!(fresh.last_sent_at, now - Duration::hours(1));
}

#[tokio::test]
async fn an_immediate_re_dispatch_selects_nothing() {
    let test_app = TestApp::spawn_app().await;
    let now = Utc::now();

    test_app.seed_subscription(
        "due@test.com",
        "Whiskers",
        CadenceTier::Weekly,
        now - Duration::days(8),
    );

    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let first: serde_json::Value = test_app.dispatch_updates().await.json().await.unwrap();
    assert_eq!(first["recorded"], 1);

    let second: serde_json::Value = test_app.dispatch_updates().await.json().await.unwrap();
    assert_eq!(second["selected"], 0);
}

#[tokio::test]
async fn a_failing_send_leaves_the_subscription_due_without_blocking_others() {
    let test_app = TestApp::spawn_app().await;
    let now = Utc::now();
    let stale = now - Duration::hours(25);

    let failing_id =
        test_app.seed_subscription("broken@test.com", "Whiskers", CadenceTier::Daily, stale);
    let healthy_id =
        test_app.seed_subscription("healthy@test.com", "Mittens", CadenceTier::Daily, stale);

    // The sender rejects the letter addressed to broken@test.com and accepts
    // everything else. Mount order matters: the specific mock goes first.
    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .and(body_string_contains("broken@test.com"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&test_app.email_server)
        .await;
    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&test_app.email_server)
        .await;

    let summary: serde_json::Value = test_app.dispatch_updates().await.json().await.unwrap();

    assert_eq!(summary["selected"], 2);
    assert_eq!(summary["recorded"], 1);
    assert_eq!(summary["transient_send_failures"], 1);

    // The healthy subscription advanced, the failing one stays due.
    assert!(test_app.store.get(healthy_id).unwrap().last_sent_at > stale);
    assert_eq!(test_app.store.get(failing_id).unwrap().last_sent_at, stale);
}

#[tokio::test]
async fn a_cadence_change_takes_effect_on_the_next_pass() {
    let test_app = TestApp::spawn_app().await;
    let now = Utc::now();

    // Two days since the last letter: not due on weekly.
    let id = test_app.seed_subscription(
        "friend@test.com",
        "Whiskers",
        CadenceTier::Weekly,
        now - Duration::days(2),
    );

    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&test_app.email_server)
        .await;

    let before: serde_json::Value = test_app.dispatch_updates().await.json().await.unwrap();
    assert_eq!(before["selected"], 0);

    // Admin flips the tier to daily; the very next pass picks it up.
    let mut subscription = test_app.store.get(id).unwrap();
    subscription.cadence = CadenceTier::Daily;
    test_app.store.insert(subscription);

    let after: serde_json::Value = test_app.dispatch_updates().await.json().await.unwrap();
    assert_eq!(after["selected"], 1);
    assert_eq!(after["recorded"], 1);
}
