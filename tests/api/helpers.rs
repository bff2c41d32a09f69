use chrono::{DateTime, Utc};
use reqwest::Response;
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Arc;
use uuid::Uuid;
use wiremock::MockServer;

use meow_memory_lane::config::get_configuration;
use meow_memory_lane::domain::cadence_tier::CadenceTier;
use meow_memory_lane::domain::pet_name::PetName;
use meow_memory_lane::domain::portrait_url::PortraitUrl;
use meow_memory_lane::domain::subscriber_email::SubscriberEmail;
use meow_memory_lane::domain::subscription::Subscription;
use meow_memory_lane::domain::toy_preference::ToyPreference;
use meow_memory_lane::email_client::{EmailClient, UpdateSender};
use meow_memory_lane::startup::run;
use meow_memory_lane::storage::memory::InMemorySubscriptionStore;
use meow_memory_lane::storage::SubscriptionStore;

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemorySubscriptionStore>,
    pub email_server: MockServer,
}

impl TestApp {
    /// Spins up the real server against the in-memory store and a mock
    /// SendGrid, so the suite needs no external services.
    pub async fn spawn_app() -> TestApp {
        let mut config = get_configuration().expect("Missing configuration file.");
        let email_server = MockServer::start().await;

        config.set_email_client_base_url(email_server.uri());

        let store = Arc::new(InMemorySubscriptionStore::new());
        let sender_email = config
            .get_email_client_sender()
            .expect("Sender email is not valid");
        let email_client = EmailClient::new(
            config.get_email_client_base_url(),
            sender_email,
            config.email_client.get_sender_name(),
            config.get_email_client_api(),
            None,
        );
        let sender: Arc<dyn UpdateSender> = Arc::new(email_client);

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        let server = run(
            listener,
            store.clone() as Arc<dyn SubscriptionStore>,
            sender,
            config.get_cadence_policy(),
            config.get_concurrency_limit(),
            config.get_send_timeout(),
        )
        .expect("Failed to start the server.");

        tokio::spawn(server);

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            store,
            email_server,
        }
    }

    pub async fn post_subscription(&self, body: HashMap<&str, &str>) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}/subscriptions", self.address);

        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.");

        response
    }

    pub async fn dispatch_updates(&self) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}/updates/dispatch", self.address);

        client
            .post(&url)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Seeds a subscription directly into the store, bypassing intake.
    pub fn seed_subscription(
        &self,
        email: &str,
        pet_name: &str,
        cadence: CadenceTier,
        last_sent_at: DateTime<Utc>,
    ) -> Uuid {
        let subscription = Subscription {
            id: Uuid::new_v4(),
            email: SubscriberEmail::parse(email.to_string()).unwrap(),
            pet_name: PetName::parse(pet_name.to_string()).unwrap(),
            cadence,
            portrait_url: PortraitUrl::parse("https://example.com/portrait.jpg".to_string())
                .unwrap(),
            toy: ToyPreference::Yarn,
            memory: "we watched the rain from the window".to_string(),
            created_at: last_sent_at,
            last_sent_at,
        };
        let id = subscription.id;

        self.store.insert(subscription);

        id
    }
}

pub fn valid_subscription_body() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("email", "friend@test.com"),
        ("pet_name", "Whiskers"),
        ("cadence", "weekly"),
        ("portrait_url", "https://example.com/whiskers.jpg"),
        ("toy", "yarn"),
        ("memory", "we fell asleep on the porch"),
    ])
}
