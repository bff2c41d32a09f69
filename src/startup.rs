use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use crate::config::{DatabaseSettings, Settings};
use crate::content::selector::ContentSelector;
use crate::email_client::{EmailClient, UpdateSender};
use crate::routes::{handle_create_subscription, handle_dispatch_updates, health_check};
use crate::scheduler::cadence::CadencePolicy;
use crate::scheduler::orchestrator::DeliveryOrchestrator;
use crate::storage::postgres::PgSubscriptionStore;
use crate::storage::SubscriptionStore;

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        let db_pool = get_connection_db_pool(&config.database);
        let store: Arc<dyn SubscriptionStore> = Arc::new(PgSubscriptionStore::new(db_pool));

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

        let listener =
            TcpListener::bind(config.get_address()).expect("Failed to bind the address.");
        let port = listener.local_addr().unwrap().port();
        let server = run(
            listener,
            store,
            sender,
            config.get_cadence_policy(),
            config.get_concurrency_limit(),
            config.get_send_timeout(),
        )?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    store: Arc<dyn SubscriptionStore>,
    sender: Arc<dyn UpdateSender>,
    policy: CadencePolicy,
    concurrency_limit: usize,
    send_timeout: std::time::Duration,
) -> Result<Server, std::io::Error> {
    let orchestrator = web::Data::new(DeliveryOrchestrator::new(
        store.clone(),
        sender.clone(),
        ContentSelector::with_thread_rng(),
        policy,
        concurrency_limit,
        send_timeout,
    ));
    let selector = web::Data::new(ContentSelector::with_thread_rng());
    // Trait objects go in through Data::from so handlers can depend on the
    // store/sender contracts instead of the concrete types.
    let store: web::Data<dyn SubscriptionStore> = web::Data::from(store);
    let sender: web::Data<dyn UpdateSender> = web::Data::from(sender);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/subscriptions", web::post().to(handle_create_subscription))
            .route("/updates/dispatch", web::post().to(handle_dispatch_updates))
            .app_data(store.clone())
            .app_data(sender.clone())
            .app_data(selector.clone())
            .app_data(orchestrator.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn get_connection_db_pool(config: &DatabaseSettings) -> Pool<Postgres> {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.get_db_options())
}
