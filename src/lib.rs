pub mod config;
pub mod content;
pub mod domain;
pub mod email_client;
pub mod routes;
pub mod scheduler;
pub mod startup;
pub mod storage;
pub mod telemetry;
